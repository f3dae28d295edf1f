// src/models/search.rs
// DOCUMENTATION: Search request DTOs
// PURPOSE: Parse the two ways a visitor can search (typed text or picked suggestion)

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::LatLng;
use crate::errors::LocatorError;

/// Autocomplete suggestion picked by the visitor
/// DOCUMENTATION: When the visitor presses enter without choosing a
/// prediction, only `name` (the raw input) is present.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Suggestion {
    #[validate(length(max = 512))]
    pub name: Option<String>,

    #[validate(length(max = 512))]
    pub formatted_address: Option<String>,

    #[validate]
    pub location: Option<LatLng>,
}

/// Request body for POST /sessions/{id}/search
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    /// Free text typed into the search input
    #[validate(length(max = 512))]
    pub query: Option<String>,

    /// Suggestion chosen from autocomplete
    #[validate]
    pub suggestion: Option<Suggestion>,
}

/// What a search resolves against
#[derive(Debug, Clone, PartialEq)]
pub enum SearchInput {
    /// Needs geocoding (possibly served from the session cache)
    Text(String),
    /// Already resolved by autocomplete, no geocoding needed
    Resolved { address: String, location: LatLng },
}

impl SearchRequest {
    /// Pick the search path
    /// DOCUMENTATION: A suggestion with geometry bypasses geocoding; a
    /// suggestion without geometry falls back to geocoding its raw text.
    pub fn into_input(self) -> Result<SearchInput, LocatorError> {
        if let Some(suggestion) = self.suggestion {
            if let Some(location) = suggestion.location {
                let address = suggestion
                    .formatted_address
                    .or(suggestion.name)
                    .unwrap_or_default();
                return Ok(SearchInput::Resolved { address, location });
            }

            let text = suggestion
                .name
                .or(suggestion.formatted_address)
                .unwrap_or_default();
            return Ok(SearchInput::Text(text.trim().to_string()));
        }

        match self.query {
            Some(query) => Ok(SearchInput::Text(query.trim().to_string())),
            None => Err(LocatorError::InvalidInput(
                "Either query or suggestion is required".to_string(),
            )),
        }
    }
}
