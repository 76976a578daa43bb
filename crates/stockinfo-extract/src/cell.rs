//! Single cell extraction.

use scraper::Html;
use stockinfo_core::{Normalizer, Result, SourcePage};
use tracing::debug;

use crate::table::{find_row, find_year_column, find_year_column_by_offset, header_labels, text_of};

/// Marker text of cells hidden behind a subscription prompt.
pub const PAYWALL_MARKER: &str = "Upgrade";

/// How the column of a cell is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum YearSelector {
    /// The column headed by this fiscal year.
    Year(i32),
    /// The column this many years before the most recent closed period.
    Offset(usize),
}

impl YearSelector {
    /// Offset addressing adjusted for `page`'s layout.
    ///
    /// Pages with a current column at index 1 shift every closed period one
    /// column right, so the offset is bumped by one there.
    #[must_use]
    pub const fn offset_on(page: SourcePage, offset: usize) -> Self {
        if page.has_current_column() {
            Self::Offset(offset + 1)
        } else {
            Self::Offset(offset)
        }
    }
}

/// Extract and normalize one cell of the financial table.
///
/// Returns `Ok(None)` when the row or column does not exist, when the cell
/// sits behind a paywall, or when it just repeats the row label.
///
/// # Errors
///
/// Returns [`MalformedNumber`](stockinfo_core::ScrapeError::MalformedNumber)
/// if the cell holds text that is neither a number nor a sentinel.
pub fn extract_cell(
    document: &Html,
    label: &str,
    selector: YearSelector,
    normalizer: Normalizer,
) -> Result<Option<f64>> {
    let Some(row) = find_row(document, label) else {
        debug!(label, "row not found");
        return Ok(None);
    };

    let column = match selector {
        YearSelector::Year(year) => find_year_column(&header_labels(document), year),
        YearSelector::Offset(offset) => Some(find_year_column_by_offset(offset)),
    };
    let Some(column) = column else {
        debug!(label, ?selector, "column not found");
        return Ok(None);
    };

    let Some(cell) = row.cell(column) else {
        debug!(label, column, "row has no cell at column");
        return Ok(None);
    };

    let text = text_of(cell);
    let echoes_label = text.to_lowercase() == label.to_lowercase();
    if text.contains(PAYWALL_MARKER) || echoes_label {
        debug!(label, column, "placeholder cell");
        return Ok(None);
    }

    normalizer.apply(&text)
}
