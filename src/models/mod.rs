// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod details;
pub mod location;
pub mod maps;
pub mod search;
pub mod views;

pub use details::*;
pub use location::*;
pub use maps::*;
pub use search::*;
pub use views::*;
