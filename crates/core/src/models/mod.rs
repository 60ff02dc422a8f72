#![allow(missing_docs)]

//! Train composition models.

mod carriage;
mod locomotive;
mod seat;
mod train;

pub use carriage::{Carriage, CarriageType};
pub use locomotive::Locomotive;
pub use seat::{ComfortClass, Seat, SeatType};
pub use train::Train;
