//! Shared type definitions and newtypes

use serde::{Deserialize, Serialize};
use std::fmt;

/// A redeemable promo code issued by the upstream API.
///
/// The only validation the system performs is a non-empty check at
/// construction; codes are otherwise opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PromoCode(String);

impl PromoCode {
    /// Wrap a raw code string. Returns `None` for empty input.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(PromoCode(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_code() {
        assert!(PromoCode::new("").is_none());
        assert_eq!(PromoCode::new("ABC-123").unwrap().as_str(), "ABC-123");
    }

    #[test]
    fn codes_sort_lexicographically() {
        let mut codes = vec![
            PromoCode::new("ZED").unwrap(),
            PromoCode::new("ALPHA").unwrap(),
        ];
        codes.sort();
        assert_eq!(codes[0].as_str(), "ALPHA");
    }
}
