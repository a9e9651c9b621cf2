#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![deny(clippy::use_self, rust_2018_idioms)]
#![allow(clippy::multiple_crate_versions, clippy::module_name_repetitions)]

pub mod config;

/// clock, stopwatch and alarms
pub mod clock;
pub mod communication;
/// registration form with validation and the remote record store
pub mod registration;
pub mod widgets;

pub use clock::ClockWidget;
pub use registration::RegistrationForm;
