//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `catalog_validators`: catalog source validation
//! - `registry_validators`: usage, registry and logging validation
//! - `tests`: Test suite for all validators

mod catalog_validators;
mod registry_validators;
mod trait_def;

pub use trait_def::Validate;
