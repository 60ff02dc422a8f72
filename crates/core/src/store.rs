//! Train persistence.

use std::{fs, io, path::Path};

use serde_json::Value;
use tracing::info;

use crate::{
    codec::{DecodeError, Record},
    error::StoreError,
    models::Train,
};

/// File name used when no explicit data file is configured.
pub const DEFAULT_DATA_FILE: &str = "train_data.txt";

impl Train {
    /// Write the composition to `path` as indented UTF-8 JSON.
    ///
    /// Non-ASCII text (train numbers, routes, serial numbers) is written
    /// literally. Missing parent directories are created.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        write_document(path, &self.encode())?;
        info!(
            path = %path.display(),
            train = %self.number(),
            carriages = self.carriages().len(),
            "train saved"
        );
        Ok(())
    }

    /// Read a composition previously written by [`Train::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let document = read_document(path)?;
        let train = Train::decode(&document).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            path = %path.display(),
            train = %train.number(),
            carriages = train.carriages().len(),
            "train loaded"
        );
        Ok(train)
    }
}

fn write_document(path: &Path, document: &Value) -> Result<(), StoreError> {
    let write_error = |source: io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    let serialised = serde_json::to_string_pretty(document)
        .map_err(|err| write_error(io::Error::from(err)))?;
    fs::write(path, serialised).map_err(write_error)
}

fn read_document(path: &Path) -> Result<Value, StoreError> {
    let content =
        fs::read_to_string(path).map_err(|source| StoreError::from_read(path, source))?;
    serde_json::from_str(&content).map_err(|err| StoreError::Parse {
        path: path.to_path_buf(),
        source: DecodeError::Syntax(err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Carriage, CarriageType, ComfortClass, Locomotive, Seat, SeatType};
    use anyhow::Result;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample_train() -> Train {
        let mut compartment = Carriage::new(10, CarriageType::Compartment);
        compartment.add_seat(Seat::new(1, SeatType::Lower, ComfortClass::Compartment));
        compartment.add_seat(Seat::reserved(2, SeatType::Upper, ComfortClass::Compartment));
        let mut open = Carriage::new(11, CarriageType::Open);
        open.add_seat(Seat::new(1, SeatType::Lower, ComfortClass::Open));

        let mut train = Train::new("045А", "Москва - Санкт-Петербург");
        train.set_locomotive(Locomotive::new("ТЭП-70-1234", 4000));
        train.add_carriage(compartment);
        train.add_carriage(open);
        train
    }

    #[test]
    fn save_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(DEFAULT_DATA_FILE);
        let train = sample_train();

        train.save(&path)?;
        assert!(path.exists());

        let loaded = Train::load(&path)?;
        assert_eq!(loaded, train);
        assert_eq!(loaded.route(), train.route());
        assert_eq!(loaded.encode(), train.encode());
        let seats: Vec<(u32, u32, bool)> = loaded
            .seats()
            .map(|(carriage, seat)| (carriage.number(), seat.number(), seat.is_reserved()))
            .collect();
        assert_eq!(seats, vec![(10, 1, false), (10, 2, true), (11, 1, false)]);
        Ok(())
    }

    #[test]
    fn writes_unescaped_two_space_json() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("train.txt");
        sample_train().save(&path)?;

        let text = fs::read_to_string(&path)?;
        assert!(text.contains("Москва - Санкт-Петербург"));
        assert!(!text.contains("\\u"));
        assert!(text.starts_with("{\n  \"number\": \"045А\""));
        assert!(text.contains("\n      \"number\": 10,"));
        Ok(())
    }

    #[test]
    fn missing_locomotive_round_trips_as_null() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("bare.txt");
        Train::new("001", "A - B").save(&path)?;

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(raw["locomotive"], Value::Null);
        assert_eq!(raw["carriages"], json!([]));

        let loaded = Train::load(&path)?;
        assert!(loaded.locomotive().is_none());
        assert!(loaded.carriages().is_empty());
        Ok(())
    }

    #[test]
    fn save_creates_parent_directories() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested/deeper/train.txt");
        sample_train().save(&path)?;
        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn load_missing_file_is_not_found() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("absent.txt");
        match Train::load(&path) {
            Err(StoreError::NotFound { path: missing }) => assert_eq!(missing, path),
            other => panic!("unexpected result: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn load_invalid_json_is_parse_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("broken.txt");
        fs::write(&path, "{ \"number\": ")?;
        assert!(matches!(
            Train::load(&path),
            Err(StoreError::Parse {
                source: DecodeError::Syntax(_),
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn load_wrong_structure_names_field() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("wrong.txt");
        let document = json!({
            "number": "045A",
            "route": "A - B",
            "locomotive": null,
            "carriages": [
                { "number": "ten", "carriage_type": "open", "seats": [] }
            ],
        });
        fs::write(&path, serde_json::to_string_pretty(&document)?)?;

        match Train::load(&path) {
            Err(StoreError::Parse {
                source: DecodeError::InvalidType { field, .. },
                ..
            }) => assert_eq!(field, "carriages[0].number"),
            other => panic!("unexpected result: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn load_missing_key_is_parse_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("partial.txt");
        fs::write(&path, r#"{ "number": "045A", "route": "A - B", "locomotive": null }"#)?;

        let err = Train::load(&path).unwrap_err();
        assert_eq!(err.path(), path.as_path());
        assert!(matches!(
            err,
            StoreError::Parse {
                source: DecodeError::MissingField { .. },
                ..
            }
        ));
        Ok(())
    }

    #[test]
    fn load_ignores_unknown_keys() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("extended.txt");
        let document = json!({
            "number": "045A",
            "route": "A - B",
            "operator": "RZD",
            "locomotive": { "serial_number": "ЧС2-001", "power": 4620, "depot": "Moscow" },
            "carriages": [
                {
                    "number": 10,
                    "carriage_type": "compartment",
                    "built": 1987,
                    "seats": [
                        {
                            "number": 3,
                            "seat_type": "upper",
                            "comfort_class": "compartment",
                            "reserved": true,
                            "price": 2500,
                        }
                    ],
                }
            ],
        });
        fs::write(&path, serde_json::to_string_pretty(&document)?)?;

        let loaded = Train::load(&path)?;
        assert_eq!(loaded.number(), "045A");
        assert_eq!(loaded.route(), "A - B");
        assert_eq!(loaded.locomotive().map(Locomotive::power), Some(4620));
        let seats: Vec<(u32, u32, SeatType, bool)> = loaded
            .seats()
            .map(|(carriage, seat)| {
                (carriage.number(), seat.number(), seat.seat_type(), seat.is_reserved())
            })
            .collect();
        assert_eq!(seats, vec![(10, 3, SeatType::Upper, true)]);

        let rewritten = loaded.encode();
        assert!(rewritten.get("operator").is_none());
        assert!(rewritten["carriages"][0]["seats"][0].get("price").is_none());
        Ok(())
    }
}
