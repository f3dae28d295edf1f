// src/config/mod.rs
// DOCUMENTATION: Configuration module organization
// PURPOSE: Re-export configuration components

pub mod env;
pub mod locator;

pub use env::Config;
pub use locator::{Capabilities, Labels, LocatorConfiguration, MapOptions};
