//! Core library for the eligibility analysis service: configuration,
//! telemetry, and the naturalization case workflows built around the
//! eligibility determination engine.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
