//! Shared serialization/deserialization utilities for configuration

/// Helper module for Duration serialization as seconds
///
/// Serializes `std::time::Duration` as a u64 number of seconds, which reads
/// better in TOML/JSON configuration files.
pub mod duration_secs {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    /// Serialize a Duration as seconds (u64)
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    /// Deserialize a Duration from seconds (u64)
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Optional TCP port given either as a number or as a numeric string.
///
/// Capabilities frequently carry ports as strings (`"9100"`); an empty
/// string is treated as unset.
pub mod lenient_port {
    use serde::de::Error;
    use serde::{self, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPort {
        Number(u16),
        Text(String),
    }

    /// Serialize as a plain number, or skip when unset
    pub fn serialize<S>(port: &Option<u16>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match port {
            Some(p) => serializer.serialize_u16(*p),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize from a number, a numeric string, or an empty string
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawPort>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawPort::Number(p)) => Ok(Some(p)),
            Some(RawPort::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(RawPort::Text(s)) => s
                .trim()
                .parse::<u16>()
                .map(Some)
                .map_err(|e| D::Error::custom(format!("invalid port {:?}: {}", s, e))),
        }
    }
}
