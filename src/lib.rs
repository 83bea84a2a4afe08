//! NTC thermistor probe firmware library.
//!
//! Exposes the measurement pipeline for host-side testing and external
//! inspection. All ESP-IDF-specific code is gated behind the `espidf` cargo
//! feature within each module; the core compiles and tests on any host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod ports;
pub mod sampler;
pub mod thermistor;
