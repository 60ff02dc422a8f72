use std::fmt;

use serde_json::{json, Value};

use crate::codec::{decode_list, DecodeError, Fields, Record};

use super::seat::Seat;

/// Layout of a passenger carriage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarriageType {
    /// Sleeping car split into enclosed compartments.
    Compartment,
    /// Open-plan sleeping car.
    Open,
}

impl CarriageType {
    /// Canonical label written to data files.
    pub fn as_str(self) -> &'static str {
        match self {
            CarriageType::Compartment => "compartment",
            CarriageType::Open => "open",
        }
    }

    /// Parse a canonical or legacy label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "compartment" | "купейный" => Some(CarriageType::Compartment),
            "open" | "плацкартный" => Some(CarriageType::Open),
            _ => None,
        }
    }
}

impl fmt::Display for CarriageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rail car holding an ordered list of seats.
///
/// Carriages are equal when number and type match; seats are ignored.
#[derive(Debug, Clone)]
pub struct Carriage {
    number: u32,
    carriage_type: CarriageType,
    seats: Vec<Seat>,
}

impl Carriage {
    pub fn new(number: u32, carriage_type: CarriageType) -> Self {
        Self {
            number,
            carriage_type,
            seats: Vec::new(),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn carriage_type(&self) -> CarriageType {
        self.carriage_type
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Append a seat. Seats equal to an existing one are still added.
    pub fn add_seat(&mut self, seat: Seat) {
        self.seats.push(seat);
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// Number of seats not yet reserved.
    pub fn free_seats(&self) -> usize {
        self.seats.iter().filter(|seat| !seat.is_reserved()).count()
    }
}

impl PartialEq for Carriage {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number && self.carriage_type == other.carriage_type
    }
}

impl Eq for Carriage {}

impl fmt::Display for Carriage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "carriage {} ({}, {}/{} free)",
            self.number,
            self.carriage_type,
            self.free_seats(),
            self.seats.len()
        )
    }
}

impl Record for Carriage {
    fn encode(&self) -> Value {
        json!({
            "number": self.number,
            "carriage_type": self.carriage_type.as_str(),
            "seats": self.seats.iter().map(Record::encode).collect::<Vec<_>>(),
        })
    }

    fn decode_at(value: &Value, path: &str) -> Result<Self, DecodeError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            number: fields.u32("number")?,
            carriage_type: fields.label("carriage_type", CarriageType::from_label)?,
            seats: decode_list(fields.array("seats")?, &fields.path_of("seats"))?,
        })
    }
}
