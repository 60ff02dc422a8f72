#![warn(clippy::all, missing_docs)]

//! Core domain logic for railcomp.
//!
//! This crate hosts the train composition models, their JSON persistence,
//! the seat occupancy report and configuration handling used by the
//! command-line front end.

pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod store;

pub use codec::{DecodeError, Record};
pub use config::AppConfig;
pub use error::StoreError;
pub use models::{Carriage, CarriageType, ComfortClass, Locomotive, Seat, SeatType, Train};
pub use report::SeatReport;
