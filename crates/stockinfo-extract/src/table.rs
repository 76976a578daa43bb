//! Financial table navigation.
//!
//! Statement pages render their data in a single table marked with
//! `data-test="financials"`. The first header cell and the first cell of
//! each body row hold labels; the remaining columns hold one fiscal period
//! each, most recent first.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static HEADER_ROW: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"table[data-test="financials"] > thead > tr"#));

static BODY_ROW: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"table[data-test="financials"] > tbody > tr"#));

static CELL: LazyLock<Selector> = LazyLock::new(|| selector("th, td"));

/// Header prefixes of columns holding an unclosed fiscal period.
const CURRENT_PREFIXES: [&str; 2] = ["current", "ttm"];

/// Parse a selector known at compile time.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

/// Trimmed text content of an element.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// A body row of a financial table.
#[derive(Clone, Debug)]
pub struct Row<'a> {
    cells: Vec<ElementRef<'a>>,
}

impl<'a> Row<'a> {
    fn new(row: ElementRef<'a>) -> Self {
        Self {
            cells: row.select(&CELL).collect(),
        }
    }

    /// Trimmed text of the leading label cell.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        self.cells.first().map(|cell| text_of(*cell))
    }

    /// Returns the cell at `index`, counting the label cell as 0.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<ElementRef<'a>> {
        self.cells.get(index).copied()
    }

    /// Number of cells in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the row has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Find the first body row whose label equals `label`, ignoring case.
///
/// Returns `None` if no row matches.
#[must_use]
pub fn find_row<'a>(document: &'a Html, label: &str) -> Option<Row<'a>> {
    let wanted = label.to_lowercase();
    document
        .select(&BODY_ROW)
        .map(Row::new)
        .find(|row| row.label().is_some_and(|text| text.to_lowercase() == wanted))
}

/// Trimmed texts of the first header row, including the label column.
#[must_use]
pub fn header_labels(document: &Html) -> Vec<String> {
    document
        .select(&HEADER_ROW)
        .next()
        .map(|row| row.select(&CELL).map(text_of).collect())
        .unwrap_or_default()
}

/// Returns true if a header cell names an unclosed ("Current"/"TTM") period.
#[must_use]
pub fn is_current_column(header: &str) -> bool {
    let header = header.trim().to_lowercase();
    CURRENT_PREFIXES
        .iter()
        .any(|prefix| header.starts_with(prefix))
}

/// Resolve the column index of `year` in a header row.
///
/// Index 0 is the label column and never a result. Current/TTM columns are
/// never matched, whatever year they cover.
#[must_use]
pub fn find_year_column<S: AsRef<str>>(header: &[S], year: i32) -> Option<usize> {
    let target = year.to_string();
    header
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, text)| !is_current_column(text.as_ref()))
        .find(|(_, text)| text.as_ref().trim() == target)
        .map(|(index, _)| index)
}

/// Column index of the period `offset` years before the most recent closed one.
///
/// No search is performed: column 1 is taken to be the most recent closed
/// period. Pages whose column 1 is a current column need `offset + 1`, see
/// [`YearSelector::offset_on`](crate::cell::YearSelector::offset_on).
#[must_use]
pub const fn find_year_column_by_offset(offset: usize) -> usize {
    1 + offset
}
