//! Serde helpers for the backend's loosely typed numbers.
//!
//! Prices arrive either as JSON numbers or as numeric strings depending on the
//! endpoint, so both are accepted here and anything else is rejected.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrStr {
    Num(f64),
    Str(String),
}

fn to_f64<E: de::Error>(raw: NumOrStr) -> Result<f64, E> {
    match raw {
        NumOrStr::Num(v) => Ok(v),
        NumOrStr::Str(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| E::custom(format!("expected a number, got {:?}", s))),
    }
}

/// `f64` from a JSON number or numeric string
pub mod lenient_f64 {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        to_f64(NumOrStr::deserialize(deserializer)?)
    }
}

/// `Option<f64>` from null, a JSON number or a numeric string
pub mod lenient_opt_f64 {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumOrStr>::deserialize(deserializer)? {
            Some(raw) => to_f64(raw).map(Some),
            None => Ok(None),
        }
    }
}
