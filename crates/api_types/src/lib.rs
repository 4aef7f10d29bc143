//! Wire types shared with the persistence API.
//!
//! The server speaks decimals (`"amount": 12.5` or `"amount": "12.50"`); these
//! types carry amounts as integer minor units (`amount_minor`) and convert at
//! the serde boundary.

pub mod transaction {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    /// Request body of `POST /transactions`.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TransactionCreate {
        /// Must be > 0. Serialized as a decimal number.
        #[serde(rename = "amount", with = "crate::amount")]
        pub amount_minor: i64,
        pub category: String,
        /// `null` when the user left the note empty.
        pub note: Option<String>,
    }

    /// Canonical record returned by the server.
    ///
    /// There is no `type` field: the client attaches the kind it submitted.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TransactionRead {
        #[serde(with = "crate::id")]
        pub id: String,
        #[serde(rename = "amount", with = "crate::amount")]
        pub amount_minor: i64,
        pub category: String,
        #[serde(default)]
        pub note: Option<String>,
        /// RFC3339, or a naive ISO-8601 timestamp which is read as UTC.
        #[serde(with = "crate::timestamp")]
        pub created_at: DateTime<Utc>,
    }
}

/// Decimal amount ⇄ minor units (2 fraction digits).
pub mod amount {
    use serde::{Deserialize, Deserializer, Serializer, de::Error, ser};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    /// Largest magnitude, in minor units, that is written as a JSON number.
    ///
    /// Up to 15 significant digits every `units.cents` value has a unique
    /// nearest `f64`, whose shortest representation is those same digits.
    pub const MAX_EXACT_MINOR: i64 = 999_999_999_999_999;

    pub fn serialize<S: Serializer>(minor: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        if minor % 100 == 0 {
            return serializer.serialize_i64(minor / 100);
        }
        if minor.unsigned_abs() > MAX_EXACT_MINOR.unsigned_abs() {
            return Err(<S::Error as ser::Error>::custom(format!(
                "amount out of range: {minor} minor units"
            )));
        }
        serializer.serialize_f64(*minor as f64 / 100.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Int(major) => major
                .checked_mul(100)
                .ok_or_else(|| D::Error::custom("amount too large")),
            Raw::Float(major) => from_f64(major).ok_or_else(|| {
                D::Error::custom(format!("invalid amount: {major}"))
            }),
            Raw::Text(text) => parse_decimal(&text)
                .ok_or_else(|| D::Error::custom(format!("invalid amount: {text:?}"))),
        }
    }

    fn from_f64(major: f64) -> Option<i64> {
        if !major.is_finite() {
            return None;
        }
        let scaled = major * 100.0;
        let rounded = scaled.round();
        if (scaled - rounded).abs() > 1e-6 || rounded.abs() > i64::MAX as f64 {
            return None;
        }
        Some(rounded as i64)
    }

    /// Parses `12`, `12.5`, `-12.50`; rejects more than 2 decimals.
    pub fn parse_decimal(text: &str) -> Option<i64> {
        let text = text.trim();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let (units, frac) = digits.split_once('.').unwrap_or((digits, ""));
        if units.is_empty()
            || !units.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }
        // Trailing zeros beyond the cents are harmless ("50.000").
        let frac = frac.trim_end_matches('0');
        if frac.len() > 2 {
            return None;
        }
        let cents = format!("{frac:0<2}").parse::<i64>().ok()?;
        let total = units.parse::<i64>().ok()?.checked_mul(100)?.checked_add(cents)?;
        Some(if negative { -total } else { total })
    }
}

/// Record ids: the server may send strings or integers; both become strings.
pub mod id {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(u64),
    }

    pub fn serialize<S: Serializer>(id: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text,
            Raw::Int(value) => value.to_string(),
        })
    }
}

/// Timestamps with or without an offset.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw:?}")))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Some(at.with_timezone(&Utc));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|pattern| NaiveDateTime::parse_from_str(raw, pattern).ok())
            .map(|naive| naive.and_utc())
    }
}
