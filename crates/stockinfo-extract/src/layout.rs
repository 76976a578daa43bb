//! Bespoke page layouts.
//!
//! Growth estimates and P/E ratio bounds are not published as year columns
//! but as a label/value panel and as key-statistic cards respectively.

use scraper::{Html, Selector};
use std::sync::LazyLock;
use stockinfo_core::{Normalizer, Result, Symbol};
use tracing::{debug, warn};

use crate::table::{selector, text_of};

static GROWTH_SECTION: LazyLock<Selector> =
    LazyLock::new(|| selector("#earnings_growth_estimates"));

static SECTION_ROW: LazyLock<Selector> = LazyLock::new(|| selector("table > tbody > tr"));

static DATA_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td"));

static KEY_STAT: LazyLock<Selector> = LazyLock::new(|| selector("div.key-stat"));

static KEY_STAT_TITLE: LazyLock<Selector> = LazyLock::new(|| selector("div.key-stat-title"));

static HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h1"));

/// Which key-statistic card to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatBound {
    /// The card mentioning "Minimum".
    Minimum,
    /// The card mentioning "Maximum".
    Maximum,
}

impl StatBound {
    /// Text identifying the card.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Minimum => "Minimum",
            Self::Maximum => "Maximum",
        }
    }
}

/// Read the growth estimate whose row label abbreviates `label`.
///
/// A row matches when its non-empty label cell is a suffix of `label`, so a
/// row titled "Next 5 Years" matches "Growth Estimates - Next 5 Years".
/// The first matching row wins.
///
/// # Errors
///
/// Returns [`MalformedNumber`](stockinfo_core::ScrapeError::MalformedNumber)
/// if the matching value cell does not parse.
pub fn growth_estimate(
    document: &Html,
    label: &str,
    normalizer: Normalizer,
) -> Result<Option<f64>> {
    let Some(section) = document.select(&GROWTH_SECTION).next() else {
        warn!("growth estimates section not found");
        return Ok(None);
    };

    for row in section.select(&SECTION_ROW) {
        let cells: Vec<_> = row.select(&DATA_CELL).collect();
        let Some(name) = cells.first().map(|cell| text_of(*cell)) else {
            continue;
        };
        if name.is_empty() || !label.ends_with(name.as_str()) {
            continue;
        }

        return match cells.get(1) {
            Some(value) => normalizer.apply(&text_of(*value)),
            None => {
                debug!(row = %name, "growth estimate row has no value cell");
                Ok(None)
            }
        };
    }

    debug!(label, "no growth estimate row matched");
    Ok(None)
}

/// Read a P/E ratio bound from the key-statistic cards.
///
/// Scans every `div.key-stat` card; the first one whose text contains the
/// bound's marker and that has a `div.key-stat-title` yields the value.
///
/// # Errors
///
/// Returns [`MalformedNumber`](stockinfo_core::ScrapeError::MalformedNumber)
/// if the title text does not parse.
pub fn pe_ratio_bound(
    document: &Html,
    bound: StatBound,
    normalizer: Normalizer,
) -> Result<Option<f64>> {
    for card in document.select(&KEY_STAT) {
        if !card.text().collect::<String>().contains(bound.marker()) {
            continue;
        }
        let Some(title) = card.select(&KEY_STAT_TITLE).next() else {
            continue;
        };
        return normalizer.apply(&text_of(title));
    }

    debug!(bound = bound.marker(), "no key statistic card matched");
    Ok(None)
}

/// Company name from the page heading, e.g. `"Meta Platforms, Inc. (META)"`.
///
/// Text from `"({symbol})"` onwards is dropped. Returns `None` when the page
/// has no `h1` or the name is empty.
#[must_use]
pub fn company_name(document: &Html, symbol: &Symbol) -> Option<String> {
    let heading = text_of(document.select(&HEADING).next()?);
    let marker = format!("({symbol})");
    let name = heading
        .split_once(marker.as_str())
        .map_or(heading.as_str(), |(name, _)| name)
        .trim();

    (!name.is_empty()).then(|| name.to_string())
}
