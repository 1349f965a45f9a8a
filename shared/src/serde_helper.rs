//! Lenient decoders for aggregate columns.
//!
//! The API computes averages and counts in SQL, and depending on the driver
//! they arrive as JSON numbers, numeric strings (`"4.50"`) or `null`.

use serde::{Deserialize, Deserializer, de::Error};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Float(f64),
    Text(String),
}

impl NumberLike {
    fn to_f64<E: Error>(&self) -> Result<f64, E> {
        match self {
            NumberLike::Float(v) => Ok(*v),
            NumberLike::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("expected a number, got {:?}", s))),
        }
    }
}

/// `null`, empty strings and missing values become `None`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberLike>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberLike::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(n) => n.to_f64().map(Some),
    }
}

/// Counts; `null` reads as zero.
pub fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberLike>::deserialize(deserializer)? {
        None => Ok(0),
        Some(n) => {
            let value = n.to_f64()?;
            if value < 0.0 || value.fract() != 0.0 {
                return Err(D::Error::custom(format!(
                    "expected a non-negative integer, got {}",
                    value
                )));
            }
            Ok(value as u64)
        }
    }
}

/// Like [`lenient_u64`], but a missing key stays distinguishable from a
/// present one. Pair with `#[serde(default)]`.
pub fn present_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_u64(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_f64")]
        avg: Option<f64>,
        #[serde(default, deserialize_with = "lenient_u64")]
        count: u64,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn numbers_strings_and_nulls() {
        let p = probe(r#"{"avg": 3.25, "count": 4}"#);
        assert_eq!((p.avg, p.count), (Some(3.25), 4));

        let p = probe(r#"{"avg": "4.00", "count": "12"}"#);
        assert_eq!((p.avg, p.count), (Some(4.0), 12));

        let p = probe(r#"{"avg": null, "count": null}"#);
        assert_eq!((p.avg, p.count), (None, 0));

        let p = probe(r#"{}"#);
        assert_eq!((p.avg, p.count), (None, 0));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(serde_json::from_str::<Probe>(r#"{"avg": "abc"}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"count": -1}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"count": 1.5}"#).is_err());
    }
}
