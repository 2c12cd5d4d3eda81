use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::IngestError;
use crate::types::{QuoteMessage, RawQuote};

/// Timestamp format on the wire: `2024-01-01 00:00:00 +0000`, always UTC.
const AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Normalize a raw quote record, stamping the current instant.
pub fn normalize(raw: &RawQuote) -> Result<QuoteMessage, IngestError> {
    normalize_at(raw, Utc::now())
}

/// Normalize a raw quote record at an explicit instant.
///
/// The extended-hours price wins when present and non-empty. The selected
/// string is parsed as an exact base-10 decimal (no binary floats anywhere)
/// and rounded to exactly 2 fractional digits, half away from zero.
pub fn normalize_at(raw: &RawQuote, at: DateTime<Utc>) -> Result<QuoteMessage, IngestError> {
    let selected = raw.effective_price();

    let price = Decimal::from_str(selected).map_err(|_| IngestError::PriceParse {
        raw: selected.to_string(),
    })?;

    let mut rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // Force a 2-digit scale so "150" renders as "150.00".
    rounded.rescale(2);

    Ok(QuoteMessage {
        quote: rounded.to_string(),
        at: at.format(AT_FORMAT).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw(last: &str, extended: &str) -> RawQuote {
        RawQuote {
            symbol: "AAPL".into(),
            last_trade_price: last.into(),
            last_extended_hours_trade_price: extended.into(),
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_extended_hours_price_wins() {
        let msg = normalize_at(&raw("150.00", "150.25"), at()).unwrap();
        assert_eq!(msg.quote, "150.25");
    }

    #[test]
    fn test_falls_back_to_last_trade_price() {
        let msg = normalize_at(&raw("150.00", ""), at()).unwrap();
        assert_eq!(msg.quote, "150.00");
    }

    #[test]
    fn test_rounding_is_idempotent() {
        let msg = normalize_at(&raw("150.25", ""), at()).unwrap();
        assert_eq!(msg.quote, "150.25");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(normalize_at(&raw("150.256", ""), at()).unwrap().quote, "150.26");
        assert_eq!(normalize_at(&raw("150.254", ""), at()).unwrap().quote, "150.25");
        assert_eq!(normalize_at(&raw("150.255", ""), at()).unwrap().quote, "150.26");
        assert_eq!(normalize_at(&raw("300.004", "301.996"), at()).unwrap().quote, "302.00");
    }

    #[test]
    fn test_pads_to_two_digits() {
        assert_eq!(normalize_at(&raw("150", ""), at()).unwrap().quote, "150.00");
        assert_eq!(normalize_at(&raw("150.5", ""), at()).unwrap().quote, "150.50");
    }

    #[test]
    fn test_non_numeric_price_is_parse_error() {
        let err = normalize_at(&raw("", ""), at()).unwrap_err();
        assert!(matches!(err, IngestError::PriceParse { raw } if raw.is_empty()));

        let err = normalize_at(&raw("n/a", ""), at()).unwrap_err();
        assert!(matches!(err, IngestError::PriceParse { raw } if raw == "n/a"));
    }

    #[test]
    fn test_scientific_notation_rejected() {
        let err = normalize_at(&raw("1.5e2", ""), at()).unwrap_err();
        assert!(matches!(err, IngestError::PriceParse { .. }));
    }

    #[test]
    fn test_timestamp_format() {
        let msg = normalize_at(&raw("150.00", ""), at()).unwrap();
        assert_eq!(msg.at, "2024-01-01 00:00:00 +0000");
    }
}
