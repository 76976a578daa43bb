//! Ticker list parsing.
//!
//! A ticker list has one ticker per line. Everything after a `#` is a
//! comment, and blank lines are skipped.

use std::path::Path;

use stockinfo_core::{Result, Symbol};
use tracing::debug;

/// Parse a newline-delimited ticker list.
#[must_use]
pub fn parse_tickers(text: &str) -> Vec<Symbol> {
    text.lines()
        .filter_map(|line| {
            let ticker = line.split('#').next().unwrap_or_default().trim();
            if ticker.is_empty() {
                debug!(line = line.trim(), "Skipping ticker list line");
                None
            } else {
                Some(Symbol::new(ticker))
            }
        })
        .collect()
}

/// Read and parse a ticker list file.
///
/// # Errors
///
/// Returns [`ScrapeError::Io`](stockinfo_core::ScrapeError::Io) if the file
/// cannot be read.
pub fn load_tickers(path: impl AsRef<Path>) -> Result<Vec<Symbol>> {
    let path = path.as_ref();
    let tickers = parse_tickers(&std::fs::read_to_string(path)?);
    debug!(path = %path.display(), count = tickers.len(), "Loaded tickers");
    Ok(tickers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use stockinfo_core::ScrapeError;

    #[test]
    fn test_parse_tickers() {
        let text = "# watch list\nmeta\n\n  LLY  \nGOOG # Alphabet\n#AAPL\n";
        let tickers = parse_tickers(text);

        assert_eq!(tickers, ["META", "LLY", "GOOG"].map(Symbol::new).to_vec());
    }

    #[test]
    fn test_parse_tickers_empty() {
        assert!(parse_tickers("").is_empty());
        assert!(parse_tickers("# only comments\n\n").is_empty());
    }

    #[test]
    fn test_load_tickers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "META\n# comment\nlly").unwrap();

        let tickers = load_tickers(file.path()).unwrap();

        assert_eq!(tickers, vec![Symbol::new("META"), Symbol::new("LLY")]);
    }

    #[test]
    fn test_load_tickers_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_tickers(dir.path().join("tickers.txt")).unwrap_err();

        assert!(matches!(err, ScrapeError::Io(_)));
    }
}
