//! Per-ticker record assembly.
//!
//! [`Documents`] parses the raw markup of one ticker once per page.
//! [`build_record`] then walks the metric registry and dispatches each kind
//! to the extractor its [`Extraction`] names.

use scraper::Html;
use std::collections::HashMap;
use stockinfo_core::{
    Extraction, MetricKind, MetricSpec, Result, ScalarLayout, ScrapeError, SourceHtmls,
    SourcePage, Symbol, TickerRecord, YearSeries,
};
use tracing::debug;

use crate::{
    cell::{YearSelector, extract_cell},
    layout::{StatBound, company_name, growth_estimate, pe_ratio_bound},
};

/// Parsed pages of one ticker.
///
/// Pages shared between metrics are parsed once; every metric reading the
/// page borrows the same document.
#[derive(Debug)]
pub struct Documents {
    symbol: Symbol,
    pages: HashMap<SourcePage, Html>,
}

impl Documents {
    /// Parse every page in `sources`.
    #[must_use]
    pub fn parse(sources: &SourceHtmls) -> Self {
        let pages = sources
            .iter()
            .map(|(page, html)| (page, Html::parse_document(html)))
            .collect();

        Self {
            symbol: sources.symbol.clone(),
            pages,
        }
    }

    /// The ticker these documents belong to.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Returns the parsed document of `page`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::DocumentUnavailable`] if the page was not fetched.
    pub fn get(&self, page: SourcePage) -> Result<&Html> {
        self.pages
            .get(&page)
            .ok_or_else(|| ScrapeError::DocumentUnavailable {
                ticker: self.symbol.to_string(),
                page: page.to_string(),
                reason: "page was not fetched".to_string(),
            })
    }

    /// Returns the document a metric is read from.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::DocumentUnavailable`] if the page was not fetched.
    pub fn for_metric(&self, kind: MetricKind) -> Result<&Html> {
        self.get(kind.page())
    }
}

/// Build the record of one ticker for the requested `years`.
///
/// Every time-series metric gets a key for each requested year. Missing
/// cells are absent values; they never fail the record.
///
/// # Errors
///
/// Returns [`ScrapeError::DocumentUnavailable`] if a page is missing, or a
/// [`ScrapeError::Field`] wrapping a malformed number with the metric and
/// year it was found at.
pub fn build_record(documents: &Documents, years: &[i32]) -> Result<TickerRecord> {
    let symbol = documents.symbol();
    let ticker = symbol.as_str();
    let mut record = TickerRecord::new(symbol.clone());
    record.company = company_name(documents.get(SourcePage::IncomeStatement)?, symbol);

    for kind in MetricKind::ALL {
        let spec = kind.spec();
        let document = documents.for_metric(kind)?;

        match spec.extraction {
            Extraction::TimeSeries => {
                let series = years
                    .iter()
                    .map(|&year| {
                        extract_cell(
                            document,
                            spec.label,
                            YearSelector::Year(year),
                            spec.normalizer,
                        )
                        .map(|value| (year, spec.unit.convert(value)))
                        .map_err(|e| e.in_field(ticker, kind, Some(year)))
                    })
                    .collect::<Result<YearSeries>>()?;
                record.series.insert(kind, series);
            }
            Extraction::Scalar(layout) => {
                let value = extract_scalar(document, spec, layout)
                    .map_err(|e| e.in_field(ticker, kind, None))?;
                record.set_scalar(kind, spec.unit.convert(value));
            }
        }
    }

    debug!(ticker, years = ?record.year_range(), "record built");
    Ok(record)
}

fn extract_scalar(
    document: &Html,
    spec: &MetricSpec,
    layout: ScalarLayout,
) -> Result<Option<f64>> {
    let bound = match layout {
        ScalarLayout::GrowthPanel => {
            return growth_estimate(document, spec.label, spec.normalizer);
        }
        ScalarLayout::KeyStatMinimum => StatBound::Minimum,
        ScalarLayout::KeyStatMaximum => StatBound::Maximum,
    };
    pe_ratio_bound(document, bound, spec.normalizer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockinfo_core::YearRange;

    fn statement(header: &[&str], rows: &[(&str, &[&str])]) -> String {
        let header: String = header.iter().map(|h| format!("<th>{h}</th>")).collect();
        let body: String = rows
            .iter()
            .map(|(label, cells)| {
                let cells: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
                format!("<tr><td>{label}</td>{cells}</tr>")
            })
            .collect();
        format!(
            "<h1>Meta Platforms, Inc. (META)</h1>\
             <table data-test=\"financials\"><thead><tr>{header}</tr></thead>\
             <tbody>{body}</tbody></table>"
        )
    }

    fn sources() -> SourceHtmls {
        let ratios = statement(
            &["Fiscal Year", "Current", "2022", "2021", "2020", "2019"],
            &[(
                "Return on Capital (ROIC)",
                &["15.2%", "18.45%", "29.46%", "24.70%", "30.10%"],
            )],
        );
        let balance = statement(
            &["Fiscal Year", "2022", "2021", "2020", "2019"],
            &[(
                "Book Value Per Share",
                &["46.05", "44.24", "Book Value Per Share", "Upgrade"],
            )],
        );
        let income = statement(
            &["Fiscal Year", "TTM", "2022", "2021", "2020", "2019"],
            &[
                ("Revenue", &["116,609", "116,609", "117,929", "85,965", "0"]),
                ("EPS (Diluted)", &["8.59", "8.59", "13.77", "10.09", "6.43"]),
            ],
        );
        let cash_flow = statement(
            &["Fiscal Year", "2022", "2021", "2020", "2019"],
            &[(
                "Free Cash Flow Per Share",
                &["7.09", "13.69", "8.11", "Free Cash Flow Per Share"],
            )],
        );
        let estimates = r#"<div id="earnings_growth_estimates"><table><tbody>
            <tr><td>Next 5 Years</td><td>19.00%</td></tr>
        </tbody></table></div>"#;
        let pe = r#"
            <div class="key-stat"><div class="key-stat-title">8.476</div>Minimum</div>
            <div class="key-stat"><div class="key-stat-title">72.13</div>Maximum</div>"#;

        SourceHtmls::new(Symbol::new("META"))
            .with_page(SourcePage::Ratios, ratios)
            .with_page(SourcePage::BalanceSheet, balance)
            .with_page(SourcePage::IncomeStatement, income)
            .with_page(SourcePage::CashFlowStatement, cash_flow)
            .with_page(SourcePage::EarningsEstimates, estimates)
            .with_page(SourcePage::PeRatio, pe)
    }

    #[test]
    fn test_build_record() {
        let documents = Documents::parse(&sources());
        let record = build_record(&documents, &[2023, 2022, 2021, 2020, 2019]).unwrap();

        assert_eq!(record.symbol.as_str(), "META");
        assert_eq!(record.company.as_deref(), Some("Meta Platforms, Inc."));

        assert_eq!(record.value(MetricKind::ReturnOnCapital, 2019), Some(30.10));
        assert_eq!(record.value(MetricKind::ReturnOnCapital, 2022), Some(18.45));
        assert_eq!(record.value(MetricKind::BookValuePerShare, 2022), Some(46.05));
        assert_eq!(record.value(MetricKind::BookValuePerShare, 2020), None);
        assert_eq!(record.value(MetricKind::BookValuePerShare, 2019), None);
        assert_eq!(record.value(MetricKind::EpsDiluted, 2021), Some(13.77));
        assert_eq!(record.value(MetricKind::Revenue, 2020), Some(85.97));
        assert_eq!(record.value(MetricKind::Revenue, 2019), Some(0.0));
        assert_eq!(record.value(MetricKind::FreeCashFlowPerShare, 2019), None);

        assert_eq!(record.growth_estimate_5y, Some(19.00));
        assert_eq!(record.pe_ratio_min, Some(8.476));
        assert_eq!(record.pe_ratio_max, Some(72.13));
    }

    #[test]
    fn test_every_requested_year_is_present() {
        let documents = Documents::parse(&sources());
        let years = [2023, 2022, 2021, 2020, 2019, 2018];
        let record = build_record(&documents, &years).unwrap();

        for kind in MetricKind::TIME_SERIES {
            let series = record.series(kind).unwrap();
            assert_eq!(series.len(), years.len(), "{kind}");
            assert!(series.contains_key(&2023));
            assert_eq!(series[&2018], None);
        }
        assert_eq!(record.year_range(), Some(YearRange::new(2019, 2022)));
    }

    #[test]
    fn test_build_record_is_idempotent() {
        let documents = Documents::parse(&sources());
        let years = [2022, 2021, 2020];

        let first = build_record(&documents, &years).unwrap();
        let second = build_record(&documents, &years).unwrap();
        let reparsed = build_record(&Documents::parse(&sources()), &years).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, reparsed);
    }

    #[test]
    fn test_missing_document_fails_the_record() {
        let full = sources();
        let partial = SourceHtmls::new(full.symbol.clone())
            .with_page(SourcePage::Ratios, full.get(SourcePage::Ratios).unwrap())
            .with_page(
                SourcePage::IncomeStatement,
                full.get(SourcePage::IncomeStatement).unwrap(),
            );
        let documents = Documents::parse(&partial);

        let err = build_record(&documents, &[2022]).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::DocumentUnavailable { ref page, .. } if page == "balance-sheet"
        ));
    }

    #[test]
    fn test_malformed_cell_names_the_field() {
        let mut sources = sources();
        sources.insert(
            SourcePage::BalanceSheet,
            statement(&["Fiscal Year", "2022"], &[("Book Value per Share", &["12,3x"])]),
        );
        let documents = Documents::parse(&sources);

        let err = build_record(&documents, &[2022]).unwrap_err();
        assert!(err.is_malformed_number());
        assert!(matches!(
            err,
            ScrapeError::Field {
                metric: MetricKind::BookValuePerShare,
                year: Some(2022),
                ..
            }
        ));
    }
}
