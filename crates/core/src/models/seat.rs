use std::fmt;

use serde_json::{json, Value};

use crate::codec::{DecodeError, Fields, Record};

/// Berth position inside a compartment or bay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeatType {
    /// Lower berth.
    Lower,
    /// Upper berth.
    Upper,
}

impl SeatType {
    /// Canonical label written to data files.
    pub fn as_str(self) -> &'static str {
        match self {
            SeatType::Lower => "lower",
            SeatType::Upper => "upper",
        }
    }

    /// Parse a canonical or legacy label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "lower" | "нижнее" => Some(SeatType::Lower),
            "upper" | "верхнее" => Some(SeatType::Upper),
            _ => None,
        }
    }
}

impl fmt::Display for SeatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comfort class of a seat: enclosed compartment or open-plan bay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComfortClass {
    /// Enclosed four-berth compartment.
    Compartment,
    /// Open-plan car.
    Open,
}

impl ComfortClass {
    /// Canonical label written to data files.
    pub fn as_str(self) -> &'static str {
        match self {
            ComfortClass::Compartment => "compartment",
            ComfortClass::Open => "open",
        }
    }

    /// Parse a canonical or legacy label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "compartment" | "купейное" => Some(ComfortClass::Compartment),
            "open" | "плацкартное" => Some(ComfortClass::Open),
            _ => None,
        }
    }
}

impl fmt::Display for ComfortClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single seat in a carriage.
///
/// Two seats compare equal when their comfort class and seat type match;
/// the seat number and reservation flag are not part of equality.
#[derive(Debug, Clone)]
pub struct Seat {
    number: u32,
    seat_type: SeatType,
    comfort_class: ComfortClass,
    reserved: bool,
}

impl Seat {
    /// A free seat.
    pub fn new(number: u32, seat_type: SeatType, comfort_class: ComfortClass) -> Self {
        Self::with_reserved(number, seat_type, comfort_class, false)
    }

    /// A seat that is already reserved.
    pub fn reserved(number: u32, seat_type: SeatType, comfort_class: ComfortClass) -> Self {
        Self::with_reserved(number, seat_type, comfort_class, true)
    }

    /// Construct with an explicit reservation flag.
    pub fn with_reserved(
        number: u32,
        seat_type: SeatType,
        comfort_class: ComfortClass,
        reserved: bool,
    ) -> Self {
        Self {
            number,
            seat_type,
            comfort_class,
            reserved,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn seat_type(&self) -> SeatType {
        self.seat_type
    }

    pub fn comfort_class(&self) -> ComfortClass {
        self.comfort_class
    }

    pub fn is_reserved(&self) -> bool {
        self.reserved
    }

    pub fn reserve(&mut self) {
        self.reserved = true;
    }

    pub fn release(&mut self) {
        self.reserved = false;
    }

    /// Report label for the reservation flag.
    pub fn status_label(&self) -> &'static str {
        if self.reserved {
            "Reserved"
        } else {
            "Free"
        }
    }
}

impl PartialEq for Seat {
    fn eq(&self, other: &Self) -> bool {
        self.comfort_class == other.comfort_class && self.seat_type == other.seat_type
    }
}

impl Eq for Seat {}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seat {} ({}, {}, {})",
            self.number,
            self.seat_type,
            self.comfort_class,
            if self.reserved { "reserved" } else { "free" }
        )
    }
}

impl Record for Seat {
    fn encode(&self) -> Value {
        json!({
            "number": self.number,
            "seat_type": self.seat_type.as_str(),
            "comfort_class": self.comfort_class.as_str(),
            "reserved": self.reserved,
        })
    }

    fn decode_at(value: &Value, path: &str) -> Result<Self, DecodeError> {
        let fields = Fields::new(value, path)?;
        Ok(Self {
            number: fields.u32("number")?,
            seat_type: fields.label("seat_type", SeatType::from_label)?,
            comfort_class: fields.label("comfort_class", ComfortClass::from_label)?,
            reserved: fields.bool("reserved")?,
        })
    }
}
