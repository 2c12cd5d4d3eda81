use crate::error::IngestError;

/// Ordered set of ticker symbols to poll, fixed for the process lifetime.
///
/// Parsed once at startup from a comma-separated list
/// (e.g. `AAPL,MSFT,GOOG`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watchlist {
    symbols: Vec<String>,
}

impl Watchlist {
    /// Parse a comma-separated symbol list. Entries are trimmed and empty
    /// entries dropped; an input with no symbols at all is a configuration
    /// error.
    pub fn parse(input: &str) -> Result<Self, IngestError> {
        let symbols: Vec<String> = input
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();

        if symbols.is_empty() {
            return Err(IngestError::EmptyWatchlist);
        }

        Ok(Self { symbols })
    }

    /// Rejoin for the `symbols=` query parameter.
    pub fn query_param(&self) -> String {
        self.symbols.join(",")
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }
}

impl std::fmt::Display for Watchlist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.query_param())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order() {
        let wl = Watchlist::parse("AAPL,MSFT,GOOG").unwrap();
        assert_eq!(wl.symbols(), &["AAPL", "MSFT", "GOOG"]);
    }

    #[test]
    fn test_parse_trims_and_skips_empty() {
        let wl = Watchlist::parse(" AAPL , ,MSFT,").unwrap();
        assert_eq!(wl.symbols(), &["AAPL", "MSFT"]);
        assert_eq!(wl.query_param(), "AAPL,MSFT");
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert!(matches!(
            Watchlist::parse(" , ,"),
            Err(IngestError::EmptyWatchlist)
        ));
        assert!(matches!(
            Watchlist::parse(""),
            Err(IngestError::EmptyWatchlist)
        ));
    }

    #[test]
    fn test_display_matches_query_param() {
        let wl = Watchlist::parse("AAPL,MSFT").unwrap();
        assert_eq!(wl.to_string(), "AAPL,MSFT");
    }
}
