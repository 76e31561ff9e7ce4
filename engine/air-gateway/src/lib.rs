//! # air-gateway
//!
//! The HTTP boundary of the AirWatch simulator. Exposes the engine's
//! query API under `/pollutiondata`, lets callers read and override the
//! simulated clock, and registers push subscribers. The boundary owns the
//! translation of engine nulls/empties into status codes; the engine
//! itself never distinguishes client from server errors.

pub mod config;
pub mod rest_api;

pub use config::GatewayConfig;
