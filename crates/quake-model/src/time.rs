//! Timezone-aware timestamp handling.
//!
//! All instants in the system carry an offset. Upstream feeds sometimes
//! omit one; those timestamps are normalized to the reference offset
//! (UTC+8, the zone of the monitored regions) at deserialization.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// Seconds east of UTC for the reference zone
const REFERENCE_OFFSET_SECS: i32 = 8 * 3600;

/// The fixed reference offset (UTC+8)
pub fn reference_offset() -> FixedOffset {
    FixedOffset::east_opt(REFERENCE_OFFSET_SECS).unwrap()
}

/// Parse a timestamp string, assuming the reference offset when none is given
pub fn parse_flexible(s: &str) -> Result<DateTime<FixedOffset>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|e| format!("invalid timestamp {s:?}: {e}"))?;
    naive
        .and_local_timezone(reference_offset())
        .single()
        .ok_or_else(|| format!("ambiguous timestamp {s:?}"))
}

/// Serde adapter for `DateTime<FixedOffset>` fields accepting naive input
pub mod flexible {
    use chrono::{DateTime, FixedOffset};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        dt: &DateTime<FixedOffset>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<FixedOffset>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_flexible(&raw).map_err(de::Error::custom)
    }
}

/// Serde adapter for optional timestamps, same normalization rules
pub mod flexible_opt {
    use chrono::{DateTime, FixedOffset};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        dt: &Option<DateTime<FixedOffset>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<FixedOffset>>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|s| super::parse_flexible(&s).map_err(de::Error::custom))
            .transpose()
    }
}
