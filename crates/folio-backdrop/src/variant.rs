//! Background variants and preference resolution

use folio_hal::{Host, HostError};
use serde::{Deserialize, Serialize};

use crate::settings::BackdropSettings;
use crate::tier::Tier;

/// Available background effects
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Drifting node graph with distance-linked edges
    Network,
    /// Procedural clouds from a remotely loaded shader
    Clouds,
    /// Rotating wireframe cube
    Geometry,
}

impl Variant {
    /// Get all available variants
    pub fn all() -> &'static [Variant] {
        &[Variant::Network, Variant::Clouds, Variant::Geometry]
    }

    /// Get the display name for this variant
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Network => "Neural Network",
            Variant::Clouds => "Twilight Clouds",
            Variant::Geometry => "Glass Cube",
        }
    }

    /// Parse from string ID (e.g., "network", "clouds")
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "network" => Some(Variant::Network),
            "clouds" => Some(Variant::Clouds),
            "geometry" => Some(Variant::Geometry),
            _ => None,
        }
    }

    /// Get the string ID for this variant
    pub fn id(&self) -> &'static str {
        match self {
            Variant::Network => "network",
            Variant::Clouds => "clouds",
            Variant::Geometry => "geometry",
        }
    }

    /// Default for a tier: weak devices get the network graph
    pub fn default_for(tier: Tier) -> Self {
        match tier {
            Tier::Potato | Tier::Low => Variant::Network,
            Tier::Medium | Tier::High | Tier::Ultra => Variant::Clouds,
        }
    }

    /// Whether setup must fetch a shader before creating the surface
    pub fn needs_remote_shader(&self) -> bool {
        matches!(self, Variant::Clouds)
    }
}

/// Where a resolved variant came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariantSource {
    /// Passed explicitly by the caller
    Selected,
    Query,
    Storage,
    TierDefault,
}

/// Resolve the variant for this page load
///
/// Query parameter beats local storage beats the tier default. Unknown ids
/// at either level are skipped.
pub fn resolve_variant<H: Host>(
    host: &H,
    settings: &BackdropSettings,
    tier: Tier,
) -> (Variant, VariantSource) {
    if let Some(variant) = host
        .query_param(&settings.query_param)
        .as_deref()
        .and_then(Variant::from_id)
    {
        return (variant, VariantSource::Query);
    }
    if let Some(variant) = host
        .storage_get(&settings.storage_key)
        .as_deref()
        .and_then(Variant::from_id)
    {
        return (variant, VariantSource::Storage);
    }
    (Variant::default_for(tier), VariantSource::TierDefault)
}

/// Persist an explicit user selection
pub fn remember_variant<H: Host>(
    host: &H,
    settings: &BackdropSettings,
    variant: Variant,
) -> Result<(), HostError> {
    host.storage_set(&settings.storage_key, variant.id())
}
