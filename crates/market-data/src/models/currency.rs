use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;

/// Display currency a snapshot is priced in.
///
/// The variants are the allow-list: anything else is rejected before the
/// provider is contacted, which also bounds the number of cache entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VsCurrency {
    Usd,
    Krw,
}

impl VsCurrency {
    /// Every supported currency, in display order.
    pub const ALL: [VsCurrency; 2] = [VsCurrency::Usd, VsCurrency::Krw];

    /// Currency used when the request does not name one.
    pub const DEFAULT: VsCurrency = VsCurrency::Usd;

    /// Lower-case key used on the wire and in upstream requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            VsCurrency::Usd => "usd",
            VsCurrency::Krw => "krw",
        }
    }

    /// Comma separated list of accepted keys, for error messages.
    pub fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(VsCurrency::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Normalizes a requested currency.
    ///
    /// `None` and the empty string resolve to [`VsCurrency::DEFAULT`]. Matching
    /// is case-insensitive; a rejected value is reported lower-cased.
    pub fn parse(raw: Option<&str>) -> Result<Self, MarketDataError> {
        let normalized = match raw {
            Some(value) if !value.is_empty() => value.to_ascii_lowercase(),
            _ => return Ok(Self::DEFAULT),
        };
        Self::ALL
            .into_iter()
            .find(|vs| vs.as_str() == normalized)
            .ok_or(MarketDataError::InvalidCurrency(normalized))
    }
}

impl fmt::Display for VsCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_defaults_to_usd() {
        assert_eq!(VsCurrency::parse(None).unwrap(), VsCurrency::Usd);
        assert_eq!(VsCurrency::parse(Some("")).unwrap(), VsCurrency::Usd);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(VsCurrency::parse(Some("USD")).unwrap(), VsCurrency::Usd);
        assert_eq!(VsCurrency::parse(Some("Krw")).unwrap(), VsCurrency::Krw);
        assert_eq!(VsCurrency::parse(Some("krw")).unwrap(), VsCurrency::Krw);
    }

    #[test]
    fn test_parse_rejects_unknown_currency() {
        let err = VsCurrency::parse(Some("EUR")).unwrap_err();
        match err {
            MarketDataError::InvalidCurrency(value) => assert_eq!(value, "eur"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_does_not_trim() {
        assert!(VsCurrency::parse(Some(" usd")).is_err());
    }

    #[test]
    fn test_allowed_list() {
        assert_eq!(VsCurrency::allowed_list(), "usd, krw");
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&VsCurrency::Krw).unwrap(), "\"krw\"");
    }

    proptest! {
        #[test]
        fn prop_only_allow_list_parses(raw in "[a-zA-Z]{1,6}") {
            let lower = raw.to_ascii_lowercase();
            let parsed = VsCurrency::parse(Some(&raw));
            if lower == "usd" || lower == "krw" {
                prop_assert_eq!(parsed.unwrap().as_str(), lower.as_str());
            } else {
                prop_assert!(parsed.unwrap_err().is_validation());
            }
        }
    }
}
