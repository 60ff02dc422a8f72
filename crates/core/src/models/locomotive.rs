use std::fmt;

use serde_json::{json, Value};

use crate::codec::{DecodeError, Fields, Record};

/// Traction unit, identified by its serial number.
#[derive(Debug, Clone)]
pub struct Locomotive {
    serial_number: String,
    power: u32,
}

impl Locomotive {
    pub fn new(serial_number: impl Into<String>, power: u32) -> Self {
        Self {
            serial_number: serial_number.into(),
            power,
        }
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    pub fn power(&self) -> u32 {
        self.power
    }
}

impl PartialEq for Locomotive {
    fn eq(&self, other: &Self) -> bool {
        self.serial_number == other.serial_number
    }
}

impl Eq for Locomotive {}

impl fmt::Display for Locomotive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (power {})", self.serial_number, self.power)
    }
}

impl Record for Locomotive {
    fn encode(&self) -> Value {
        json!({
            "serial_number": self.serial_number,
            "power": self.power,
        })
    }

    fn decode_at(value: &Value, path: &str) -> Result<Self, DecodeError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            serial_number: fields.string("serial_number")?.to_string(),
            power: fields.u32("power")?,
        })
    }
}
