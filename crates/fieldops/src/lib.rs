//! Core engine for the appliance service-request system: a tamper-evident
//! hash-chained complaint ledger plus a proximity- and skill-based
//! technician dispatch engine.

pub mod config;
pub mod error;
pub mod ledger;
pub mod telemetry;
pub mod workflows;
