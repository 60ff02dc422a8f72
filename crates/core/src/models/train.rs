use std::fmt;

use serde_json::{json, Value};
use tracing::debug;

use crate::codec::{decode_list, DecodeError, Fields, Record};

use super::{carriage::Carriage, locomotive::Locomotive, seat::Seat};

/// A train composition: one optional locomotive plus an ordered set of carriages.
///
/// Trains are equal when their numbers match.
#[derive(Debug, Clone)]
pub struct Train {
    number: String,
    route: String,
    locomotive: Option<Locomotive>,
    carriages: Vec<Carriage>,
}

impl Train {
    /// An empty composition with no locomotive.
    pub fn new(number: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            route: route.into(),
            locomotive: None,
            carriages: Vec::new(),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn locomotive(&self) -> Option<&Locomotive> {
        self.locomotive.as_ref()
    }

    pub fn carriages(&self) -> &[Carriage] {
        &self.carriages
    }

    /// Attach a locomotive, returning the one it replaces.
    pub fn set_locomotive(&mut self, locomotive: Locomotive) -> Option<Locomotive> {
        self.locomotive.replace(locomotive)
    }

    /// Append `carriage` unless an equal carriage is already coupled.
    ///
    /// Returns `true` when the carriage was added.
    pub fn add_carriage(&mut self, carriage: Carriage) -> bool {
        if self.carriages.iter().any(|existing| existing == &carriage) {
            debug!(
                train = %self.number,
                carriage = carriage.number(),
                "carriage already coupled, skipping"
            );
            return false;
        }
        self.carriages.push(carriage);
        true
    }

    /// Remove the first carriage equal to `carriage`, if any.
    pub fn remove_carriage(&mut self, carriage: &Carriage) -> Option<Carriage> {
        match self.carriages.iter().position(|existing| existing == carriage) {
            Some(index) => Some(self.carriages.remove(index)),
            None => {
                debug!(
                    train = %self.number,
                    carriage = carriage.number(),
                    "carriage not coupled, nothing to remove"
                );
                None
            }
        }
    }

    /// Every seat paired with its carriage, in carriage-then-seat order.
    pub fn seats(&self) -> impl Iterator<Item = (&Carriage, &Seat)> {
        self.carriages
            .iter()
            .flat_map(|carriage| carriage.seats().iter().map(move |seat| (carriage, seat)))
    }
}

impl PartialEq for Train {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Train {}

impl fmt::Display for Train {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "train {} ({})", self.number, self.route)
    }
}

impl Record for Train {
    fn encode(&self) -> Value {
        json!({
            "number": self.number,
            "route": self.route,
            "locomotive": self.locomotive.as_ref().map(Record::encode),
            "carriages": self.carriages.iter().map(Record::encode).collect::<Vec<_>>(),
        })
    }

    fn decode_at(value: &Value, path: &str) -> Result<Self, DecodeError> {
        let fields = Fields::new(value, path)?;
        let locomotive = fields
            .nullable("locomotive")?
            .map(|raw| Locomotive::decode_at(raw, &fields.path_of("locomotive")))
            .transpose()?;
        Ok(Self {
            number: fields.string("number")?.to_string(),
            route: fields.string("route")?.to_string(),
            locomotive,
            carriages: decode_list(fields.array("carriages")?, &fields.path_of("carriages"))?,
        })
    }
}
