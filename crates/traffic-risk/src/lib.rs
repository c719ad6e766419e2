//! Traffic risk estimation for a city and date.
//!
//! [`scoring`] holds the pure engine; [`providers`] acquires the signals it
//! consumes and [`prediction`] wires both into HTTP-ready payloads.

pub mod config;
pub mod error;
pub mod prediction;
pub mod providers;
pub mod scoring;
pub mod signals;
pub mod telemetry;
