//! Bike-share station types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A BiciMad station identifier.
///
/// Identifiers are non-negative integers. Agent runtimes sometimes pass
/// them as strings, so [`StationId::parse`] accepts decimal text.
///
/// # Examples
///
/// ```
/// use transit_server::domain::StationId;
///
/// let id = StationId::parse("42").unwrap();
/// assert_eq!(id.get(), 42);
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("12a").is_err());
/// assert!(StationId::parse("-3").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationId(u32);

impl StationId {
    pub fn new(id: u32) -> Self {
        StationId(id)
    }

    /// Parse a station id from decimal text, ignoring surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        let s = s.trim();

        if s.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStationId {
                reason: "must contain only ASCII digits",
            });
        }

        s.parse::<u32>().map(StationId).map_err(|_| InvalidStationId {
            reason: "out of range",
        })
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for StationId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Ok(StationId(n)),
            Raw::Text(s) => StationId::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// The short station number printed on the dock.
///
/// BiciMad issues these as strings ("1a", "25b") for most stations and as
/// bare integers for a few; the form is kept as issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StationNumber {
    Int(i64),
    Text(String),
}

/// A normalized bike-share station as seen by agent tools.
///
/// Field names are stable and never mirror the vendor's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationRecord {
    pub id: i64,
    pub number: StationNumber,
    /// Display name; BiciMad leaves it `null` on some stations.
    pub name: Option<String>,
    /// Street address; `null` when BiciMad has none on file.
    pub address: Option<String>,
    /// Total docks at the station.
    pub total_slots: u32,
    /// Docks currently holding a bike.
    pub occupied_slots: u32,
    /// Docks available to return a bike.
    pub free_slots: u32,
    /// Whether the station is in service.
    pub operational: bool,
}

/// Outcome of a lookup by station id.
///
/// A missing station serializes as an empty JSON array rather than `null`,
/// which is what agent prompts built against this server expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationInfo {
    Found(StationRecord),
    NotFound,
}

impl Serialize for StationInfo {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;

        match self {
            StationInfo::Found(record) => record.serialize(serializer),
            StationInfo::NotFound => serializer.serialize_seq(Some(0))?.end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn record() -> StationRecord {
        StationRecord {
            id: 1,
            number: StationNumber::Text("1a".to_string()),
            name: Some("Puerta del Sol A".to_string()),
            address: Some("Puerta del Sol nº 1".to_string()),
            total_slots: 24,
            occupied_slots: 10,
            free_slots: 14,
            operational: true,
        }
    }

    #[test]
    fn parse_valid_ids() {
        assert_eq!(StationId::parse("0").unwrap().get(), 0);
        assert_eq!(StationId::parse("264").unwrap().get(), 264);
        assert_eq!(StationId::parse(" 7 ").unwrap().get(), 7);
    }

    #[test]
    fn reject_invalid_ids() {
        assert!(StationId::parse("").is_err());
        assert!(StationId::parse("   ").is_err());
        assert!(StationId::parse("abc").is_err());
        assert!(StationId::parse("+5").is_err());
        assert!(StationId::parse("99999999999").is_err());
    }

    #[test]
    fn station_id_deserializes_from_int_or_text() {
        let a: StationId = serde_json::from_value(json!(12)).unwrap();
        let b: StationId = serde_json::from_value(json!("12")).unwrap();
        assert_eq!(a, b);

        assert!(serde_json::from_value::<StationId>(json!("twelve")).is_err());
        assert!(serde_json::from_value::<StationId>(json!(-1)).is_err());
        assert!(serde_json::from_value::<StationId>(json!(1.5)).is_err());
    }

    #[test]
    fn station_number_keeps_vendor_form() {
        assert_eq!(
            serde_json::to_value(StationNumber::Int(3)).unwrap(),
            json!(3)
        );
        assert_eq!(
            serde_json::to_value(StationNumber::Text("3b".into())).unwrap(),
            json!("3b")
        );
    }

    #[test]
    fn record_uses_stable_field_names() {
        let value = serde_json::to_value(record()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "number": "1a",
                "name": "Puerta del Sol A",
                "address": "Puerta del Sol nº 1",
                "total_slots": 24,
                "occupied_slots": 10,
                "free_slots": 14,
                "operational": true,
            })
        );
    }

    #[test]
    fn missing_address_serializes_as_null() {
        let record = StationRecord {
            address: None,
            ..record()
        };
        let value = serde_json::to_value(record).unwrap();
        assert_eq!(value["address"], Value::Null);
        assert_eq!(value.as_object().unwrap().len(), 8);
    }

    #[test]
    fn station_info_not_found_is_empty_array() {
        assert_eq!(
            serde_json::to_value(StationInfo::NotFound).unwrap(),
            json!([])
        );
        assert_eq!(
            serde_json::to_value(StationInfo::Found(record())).unwrap()["id"],
            json!(1)
        );
    }
}
