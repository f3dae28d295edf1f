// src/config/locator.rs
// DOCUMENTATION: Locator payload (business listings and capability switches)
// PURPOSE: Load and validate the static JSON configuration injected at start-up

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use validator::Validate;

use crate::models::Location;

/// Optional features of the locator
/// DOCUMENTATION: Mirrors the payload's `capabilities` map; anything missing is off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Capabilities {
    /// Free-text address search
    pub input: bool,
    /// Address predictions while typing
    pub autocomplete: bool,
    /// Driving route to the selected location
    pub directions: bool,
    /// Driving distance annotation and ranking
    pub distance_matrix: bool,
    /// Place details panel
    pub details: bool,
}

/// Map display options passed through to the page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapOptions {
    pub fullscreen_control: Option<bool>,
    pub zoom_control: Option<bool>,
    pub street_view_control: Option<bool>,
    pub map_type_control: Option<bool>,
}

/// Section titles of the results list; `{count}` is replaced with the list length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Labels {
    pub nearest: String,
    pub all: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            nearest: "Nearest locations ({count})".to_string(),
            all: "All locations ({count})".to_string(),
        }
    }
}

impl Labels {
    pub fn section_name(&self, has_search: bool, count: usize) -> String {
        let template = if has_search { &self.nearest } else { &self.all };
        template.replace("{count}", &count.to_string())
    }
}

/// The static payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LocatorConfiguration {
    #[serde(default)]
    pub capabilities: Capabilities,

    #[serde(default)]
    #[validate]
    pub locations: Vec<Location>,

    #[serde(default)]
    pub map_options: MapOptions,

    #[serde(default)]
    pub maps_api_key: Option<String>,

    #[serde(default)]
    pub labels: Labels,
}

impl LocatorConfiguration {
    /// Parse and validate a payload
    pub fn from_json(raw: &str) -> Result<Self> {
        let configuration: LocatorConfiguration =
            serde_json::from_str(raw).context("Locator payload is not valid JSON")?;

        configuration
            .validate()
            .context("Locator payload failed validation")?;

        if configuration.locations.is_empty() {
            log::warn!("Locator payload has no locations");
        }

        // Derived travel distances belong to sessions, never to the payload
        if configuration
            .locations
            .iter()
            .any(|l| l.travel_distance_value.is_some())
        {
            bail!("Locator payload must not carry travel distances");
        }

        Ok(configuration)
    }

    /// Read the payload from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read locator payload {}", path.display()))?;
        Self::from_json(&raw)
    }
}
