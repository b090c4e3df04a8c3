//! Exchange quote data model and envelope encoding helpers.
//!
//! The pricing API and the quotation service both wrap a quote in a one-entry JSON
//! object keyed by its currency pair, e.g. `{"USDBRL": {...}}`. The key is not known
//! in advance, so [`unwrap_envelope`] accepts any single key and keeps only the value.
//! All quote values are decimal numbers encoded as text and are kept verbatim.
use std::collections::BTreeMap;

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::QuoteError;
use crate::result::Result;

/// Exchange rate snapshot for one currency pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeQuote {
    /// Base currency (e.g. `USD`).
    pub code: String,
    /// Quote currency (e.g. `BRL`).
    pub codein: String,
    /// Display name of the pair.
    pub name: String,
    /// Session high.
    pub high: String,
    /// Session low.
    pub low: String,
    /// Absolute variation of the bid.
    #[serde(rename = "varBid")]
    pub var_bid: String,
    /// Percent change.
    #[serde(rename = "pctChange")]
    pub pct_change: String,
    /// Buy price.
    pub bid: String,
    /// Sell price.
    pub ask: String,
    /// Upstream timestamp, seconds since the epoch as text.
    pub timestamp: String,
    /// Upstream creation date as text.
    pub create_date: String,
}

impl ExchangeQuote {
    /// Decode a quote from an enveloped JSON body.
    ///
    /// Every field must be present, and `code`, `codein` and `bid` must be non-empty.
    pub fn from_envelope(body: &[u8]) -> Result<Self> {
        let quote: ExchangeQuote = unwrap_envelope(body)?;
        quote.validate()?;
        Ok(quote)
    }

    /// Envelope key for this quote, e.g. `USDBRL`.
    pub fn pair(&self) -> String {
        format!("{}{}", self.code, self.codein)
    }

    /// Encode the quote wrapped in its pair envelope.
    pub fn to_envelope_bytes(&self) -> Result<Vec<u8>> {
        let mut envelope = BTreeMap::new();
        envelope.insert(self.pair(), self);
        Ok(serde_json::to_vec(&envelope)?)
    }

    fn validate(&self) -> Result<()> {
        for (field, value) in [("code", &self.code), ("codein", &self.codein), ("bid", &self.bid)] {
            if value.trim().is_empty() {
                return Err(QuoteError::Decode(format!("field `{}` is empty", field)));
            }
        }
        Ok(())
    }
}

/// Extract the single value of a `{ "<PAIR>": value }` object and decode it as `T`.
pub fn unwrap_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let envelope: BTreeMap<String, Value> = serde_json::from_slice(body)?;
    if envelope.len() != 1 {
        return Err(QuoteError::Decode(format!(
            "expected exactly one currency pair, found {}",
            envelope.len()
        )));
    }

    let Some((pair, inner)) = envelope.into_iter().next() else {
        return Err(QuoteError::Decode("empty envelope".to_string()));
    };
    debug!("Unwrapping envelope for pair {}", pair);
    serde_json::from_value(inner).map_err(|e| QuoteError::Decode(format!("{}: {}", pair, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    const UPSTREAM_BODY: &str = r#"{"USDBRL":{"code":"USD","codein":"BRL","name":"Dólar/Real","high":"5.50","low":"5.30","varBid":"0.01","pctChange":"0.2","bid":"5.43","ask":"5.44","timestamp":"123","create_date":"2024-01-01"}}"#;

    #[test]
    fn decodes_upstream_body() {
        let quote = ExchangeQuote::from_envelope(UPSTREAM_BODY.as_bytes()).unwrap();
        assert_eq!(quote.code, "USD");
        assert_eq!(quote.codein, "BRL");
        assert_eq!(quote.name, "Dólar/Real");
        assert_eq!(quote.var_bid, "0.01");
        assert_eq!(quote.pct_change, "0.2");
        assert_eq!(quote.bid, "5.43");
        assert_eq!(quote.create_date, "2024-01-01");
        assert_eq!(quote.pair(), "USDBRL");
    }

    #[test]
    fn envelope_key_is_not_hardcoded() {
        let body = UPSTREAM_BODY
            .replace("USDBRL", "EURBRL")
            .replace(r#""code":"USD""#, r#""code":"EUR""#);
        let quote = ExchangeQuote::from_envelope(body.as_bytes()).unwrap();
        assert_eq!(quote.pair(), "EURBRL");
    }

    #[test]
    fn numbers_keep_upstream_formatting() {
        let body = UPSTREAM_BODY.replace(r#""bid":"5.43""#, r#""bid":"5.4300""#);
        let quote = ExchangeQuote::from_envelope(body.as_bytes()).unwrap();
        assert_eq!(quote.bid, "5.4300");
    }

    #[test]
    fn missing_field_is_a_decode_failure() {
        let body = UPSTREAM_BODY.replace(r#""ask":"5.44","#, "");
        let err = ExchangeQuote::from_envelope(body.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Decode);
    }

    #[test]
    fn empty_bid_is_rejected() {
        let body = UPSTREAM_BODY.replace(r#""bid":"5.43""#, r#""bid":"""#);
        let err = ExchangeQuote::from_envelope(body.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Decode);
    }

    #[test]
    fn empty_and_ambiguous_envelopes_are_rejected() {
        for body in ["{}", "[]", "not json", r#"{"A":{},"B":{}}"#] {
            let err = ExchangeQuote::from_envelope(body.as_bytes()).unwrap_err();
            assert_eq!(err.kind(), FailureKind::Decode, "body: {}", body);
        }
    }

    #[test]
    fn upstream_error_payload_is_rejected() {
        let body = r#"{"status":404,"code":"CoinNotExists","message":"moeda nao encontrada USD-XXX"}"#;
        let err = ExchangeQuote::from_envelope(body.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Decode);
    }

    #[test]
    fn envelope_uses_upstream_field_names() {
        let quote = ExchangeQuote::from_envelope(UPSTREAM_BODY.as_bytes()).unwrap();
        let bytes = quote.to_envelope_bytes().unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        let inner = &value["USDBRL"];

        assert_eq!(value.as_object().unwrap().len(), 1);
        assert_eq!(inner.as_object().unwrap().len(), 11);
        assert_eq!(inner["varBid"], "0.01");
        assert_eq!(inner["pctChange"], "0.2");
        assert_eq!(inner["create_date"], "2024-01-01");
    }

    #[derive(Deserialize)]
    struct BidOnly {
        bid: String,
    }

    #[test]
    fn partial_projection_ignores_other_fields() {
        let bid: BidOnly = unwrap_envelope(UPSTREAM_BODY.as_bytes()).unwrap();
        assert_eq!(bid.bid, "5.43");
    }
}
