//! utilities
use {
    hashbrown::HashMap,
    serde::{Deserialize, Deserializer},
    tracing::Level,
};

/// a number the api may send either as a json number or as a string
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    /// a real json number
    Number(f64),
    /// a number wrapped in a string
    Text(String),
    /// `null`
    Null(()),
}

impl LenientNumber {
    /// turn it into an f64, falling back to 0 for garbage
    fn into_f64(self) -> f64 {
        match self {
            Self::Number(n) => n,
            Self::Text(s) => s.trim().parse().unwrap_or_default(),
            Self::Null(()) => 0.0,
        }
    }
}

/// deserialize a `null` into the default value of `T`
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// deserialize a number that might be a numeric string
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(LenientNumber::deserialize(deserializer)?.into_f64())
}

/// deserialize a string-keyed map of numbers that might be numeric strings
pub fn lenient_f64_map<'de, D>(deserializer: D) -> Result<HashMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<HashMap<String, LenientNumber>>::deserialize(deserializer)?;

    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k, v.into_f64()))
        .collect())
}

/// deserialize a string-keyed map of counts, treating `null` counts as 0
pub fn null_counts_as_zero<'de, D>(deserializer: D) -> Result<HashMap<String, i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<HashMap<String, Option<i64>>>::deserialize(deserializer)?;

    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k, v.unwrap_or(0)))
        .collect())
}

/// convert a string to a log level
pub fn string_to_log_level(lvl: &str) -> Level {
    match lvl.to_lowercase().as_str() {
        "d" | "debug" | "dbg" => Level::DEBUG,
        "t" | "trace" | "trc" => Level::TRACE,
        "e" | "error" | "err" => Level::ERROR,
        "i" | "info" | "inf" => Level::INFO,
        "w" | "warn" | "wrn" => Level::WARN,
        _ => Level::ERROR,
    }
}
