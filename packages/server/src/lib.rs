// Dental Care Plan Portal - Wizard Core
//
// This crate provides the application and renewal wizard engine of the portal
// and the JSON API that drives it.
// Architecture follows domain-driven design; business rules live in domains/wizard.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
