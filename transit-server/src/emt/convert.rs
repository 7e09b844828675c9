//! Conversion from raw BiciMad station records to domain types.
//!
//! Vendor keys: `id`, `number`, `name`, `address`, `total_bases`,
//! `dock_bikes`, `free_bases`, `activate`. All are required; a missing key
//! is an error, never a default. `name` and `address` may be `null`.

use serde_json::{Map, Value};

use crate::domain::{StationNumber, StationRecord};

/// Error during raw record to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    /// The record was not a JSON object
    #[error("station record is not a JSON object")]
    NotAnObject,

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Field present but of the wrong type or out of range
    #[error("invalid value for field {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

/// Convert one raw station record into a [`StationRecord`].
pub fn normalize_station(raw: &Value) -> Result<StationRecord, NormalizeError> {
    let obj = raw.as_object().ok_or(NormalizeError::NotAnObject)?;

    let id = field(obj, "id")?;
    let id = id.as_i64().ok_or_else(|| invalid("id", id))?;

    let number = field(obj, "number")?;
    let number = match number {
        Value::String(s) => StationNumber::Text(s.clone()),
        Value::Number(n) => n
            .as_i64()
            .map(StationNumber::Int)
            .ok_or_else(|| invalid("number", number))?,
        other => return Err(invalid("number", other)),
    };

    Ok(StationRecord {
        id,
        number,
        name: text_field(obj, "name")?,
        address: text_field(obj, "address")?,
        total_slots: count_field(obj, "total_bases")?,
        occupied_slots: count_field(obj, "dock_bikes")?,
        free_slots: count_field(obj, "free_bases")?,
        // Only the integer 1 means active; 0, null and "1" all do not.
        operational: field(obj, "activate")?.as_i64() == Some(1),
    })
}

/// Normalize every record, failing on the first malformed one.
pub fn normalize_stations(raw: &[Value]) -> Result<Vec<StationRecord>, NormalizeError> {
    raw.iter().map(normalize_station).collect()
}

fn field<'a>(obj: &'a Map<String, Value>, key: &'static str) -> Result<&'a Value, NormalizeError> {
    obj.get(key).ok_or(NormalizeError::MissingField(key))
}

fn text_field(
    obj: &Map<String, Value>,
    key: &'static str,
) -> Result<Option<String>, NormalizeError> {
    match field(obj, key)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        other => Err(invalid(key, other)),
    }
}

fn count_field(obj: &Map<String, Value>, key: &'static str) -> Result<u32, NormalizeError> {
    let value = field(obj, key)?;
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| invalid(key, value))
}

fn invalid(field: &'static str, value: &Value) -> NormalizeError {
    NormalizeError::InvalidField {
        field,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn raw_station() -> Value {
        json!({
            "id": 1,
            "number": "1a",
            "name": "Puerta del Sol A",
            "address": "Puerta del Sol nº 1",
            "total_bases": 24,
            "dock_bikes": 10,
            "free_bases": 13,
            "reservations_count": 0,
            "light": 1,
            "no_available": 0,
            "activate": 1,
            "geometry": {"type": "Point", "coordinates": [-3.7024, 40.4168]}
        })
    }

    #[test]
    fn normalizes_all_fields() {
        let record = normalize_station(&raw_station()).unwrap();

        assert_eq!(record.id, 1);
        assert_eq!(record.number, StationNumber::Text("1a".to_string()));
        assert_eq!(record.name.as_deref(), Some("Puerta del Sol A"));
        assert_eq!(record.address.as_deref(), Some("Puerta del Sol nº 1"));
        assert_eq!(record.total_slots, 24);
        assert_eq!(record.occupied_slots, 10);
        assert_eq!(record.free_slots, 13);
        assert!(record.operational);
    }

    #[test]
    fn drops_vendor_field_names() {
        let value = serde_json::to_value(normalize_station(&raw_station()).unwrap()).unwrap();
        let obj = value.as_object().unwrap();

        for vendor_key in ["total_bases", "dock_bikes", "free_bases", "activate", "light", "geometry"] {
            assert!(!obj.contains_key(vendor_key), "leaked {vendor_key}");
        }
        assert_eq!(obj.len(), 8);
    }

    #[test]
    fn integer_station_number_is_kept() {
        let mut raw = raw_station();
        raw["number"] = json!(175);
        let record = normalize_station(&raw).unwrap();
        assert_eq!(record.number, StationNumber::Int(175));
    }

    #[test]
    fn inactive_values() {
        for activate in [json!(0), json!(null), json!("1"), json!(2), json!(true)] {
            let mut raw = raw_station();
            raw["activate"] = activate.clone();
            let record = normalize_station(&raw).unwrap();
            assert!(!record.operational, "activate={activate} should not be operational");
        }
    }

    #[test]
    fn missing_field_is_reported() {
        for key in [
            "id",
            "number",
            "name",
            "address",
            "total_bases",
            "dock_bikes",
            "free_bases",
            "activate",
        ] {
            let mut raw = raw_station();
            raw.as_object_mut().unwrap().remove(key);
            assert_eq!(
                normalize_station(&raw),
                Err(NormalizeError::MissingField(key))
            );
        }
    }

    #[test]
    fn null_text_fields_are_kept_as_none() {
        let mut raw = raw_station();
        raw["name"] = Value::Null;
        raw["address"] = Value::Null;

        let record = normalize_station(&raw).unwrap();
        assert_eq!(record.name, None);
        assert_eq!(record.address, None);
        assert_eq!(record.free_slots, 13);
    }

    #[test]
    fn non_string_text_field_is_invalid() {
        let mut raw = raw_station();
        raw["address"] = json!(12);
        assert_eq!(
            normalize_station(&raw),
            Err(NormalizeError::InvalidField {
                field: "address",
                value: "12".to_string(),
            })
        );
    }

    #[test]
    fn negative_counts_are_invalid() {
        let mut raw = raw_station();
        raw["dock_bikes"] = json!(-1);
        assert!(matches!(
            normalize_station(&raw),
            Err(NormalizeError::InvalidField {
                field: "dock_bikes",
                ..
            })
        ));
    }

    #[test]
    fn non_object_is_rejected() {
        assert_eq!(
            normalize_station(&json!([1, 2])),
            Err(NormalizeError::NotAnObject)
        );
    }

    #[test]
    fn normalize_stations_fails_on_first_bad_record() {
        let mut bad = raw_station();
        bad.as_object_mut().unwrap().remove("name");

        assert_eq!(normalize_stations(&[]), Ok(vec![]));
        assert_eq!(normalize_stations(&[raw_station()]).map(|v| v.len()), Ok(1));
        assert_eq!(
            normalize_stations(&[raw_station(), bad]),
            Err(NormalizeError::MissingField("name"))
        );
    }

    proptest! {
        #[test]
        fn normalization_is_deterministic(
            id in 0i64..100_000,
            total in 0u32..64,
            docked in 0u32..64,
            free in 0u32..64,
            activate in -2i64..4,
            name in "[A-Za-z ]{0,20}",
        ) {
            let raw = json!({
                "id": id,
                "number": id.to_string(),
                "name": name,
                "address": "Calle Mayor",
                "total_bases": total,
                "dock_bikes": docked,
                "free_bases": free,
                "activate": activate,
            });

            let first = normalize_station(&raw).unwrap();
            let second = normalize_station(&raw).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.operational, activate == 1);
            prop_assert_eq!(first.total_slots, total);
        }
    }
}
