//! User-facing backdrop settings
//!
//! Every recognised option lives here with its default. Settings arrive as
//! camelCase JSON from the page and are validated before any mount uses them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Palette, Rgb};

/// Errors from parsing or validating [`BackdropSettings`]
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Settings JSON could not be parsed
    #[error("invalid settings JSON: {0}")]
    Json(String),

    /// A palette entry is not a hex colour
    #[error("invalid colour for {field}: {value:?}")]
    InvalidColor { field: &'static str, value: String },

    /// `offscreenDamp` outside 0..=1
    #[error("offscreen damp {0} out of range 0..=1")]
    DampOutOfRange(f32),

    /// `density` outside (0, 2]
    #[error("density {0} out of range (0, 2]")]
    DensityOutOfRange(f32),

    /// `intersectionThreshold` outside 0..=1
    #[error("intersection threshold {0} out of range 0..=1")]
    ThresholdOutOfRange(f64),

    /// `cloudShaderSources` has no usable URL
    #[error("no cloud shader sources configured")]
    NoShaderSources,

    /// A storage key or query parameter name is empty
    #[error("{0} must not be empty")]
    EmptyKey(&'static str),

    /// A variant id that no variant answers to
    #[error("unknown background variant: {0}")]
    UnknownVariant(String),
}

/// Palette as configured, one hex string per colour
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaletteSettings {
    pub gradient_from: String,
    pub gradient_to: String,
    pub sky: String,
    pub cloud: String,
    pub cloud_shadow: String,
    pub sun: String,
    pub sun_glare: String,
    pub sunlight: String,
    pub node: String,
    pub node_glow: String,
    pub line: String,
    pub line_opacity: f32,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        let twilight = Palette::twilight();
        Self {
            gradient_from: twilight.gradient_from.to_css(),
            gradient_to: twilight.gradient_to.to_css(),
            sky: twilight.sky.to_css(),
            cloud: twilight.cloud.to_css(),
            cloud_shadow: twilight.cloud_shadow.to_css(),
            sun: twilight.sun.to_css(),
            sun_glare: twilight.sun_glare.to_css(),
            sunlight: twilight.sunlight.to_css(),
            node: twilight.node.to_css(),
            node_glow: twilight.node_glow.to_css(),
            line: twilight.line.to_css(),
            line_opacity: twilight.line_opacity,
        }
    }
}

impl PaletteSettings {
    pub fn validate(&self) -> Result<Palette, ConfigError> {
        let color = |field: &'static str, value: &str| {
            Rgb::parse(value).ok_or_else(|| ConfigError::InvalidColor {
                field,
                value: value.to_string(),
            })
        };
        Ok(Palette {
            gradient_from: color("gradientFrom", &self.gradient_from)?,
            gradient_to: color("gradientTo", &self.gradient_to)?,
            sky: color("sky", &self.sky)?,
            cloud: color("cloud", &self.cloud)?,
            cloud_shadow: color("cloudShadow", &self.cloud_shadow)?,
            sun: color("sun", &self.sun)?,
            sun_glare: color("sunGlare", &self.sun_glare)?,
            sunlight: color("sunlight", &self.sunlight)?,
            node: color("node", &self.node)?,
            node_glow: color("nodeGlow", &self.node_glow)?,
            line: color("line", &self.line)?,
            line_opacity: self.line_opacity.clamp(0.0, 1.0),
        })
    }
}

/// Backdrop settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackdropSettings {
    /// Delay before setup starts, so the page paints first
    pub init_delay_ms: u32,
    /// Opacity ramp after the first frame
    pub fade_in_ms: u32,
    /// Speed multiplier while the container is off-screen
    pub offscreen_damp: f32,
    /// Pause or slow the effect when its container leaves the viewport
    pub hero_only: bool,
    /// Scales node count linearly and link distance by its square root
    pub density: f32,
    pub intersection_threshold: f64,
    pub root_margin: String,
    /// Local storage key of the remembered variant
    pub storage_key: String,
    /// Query parameter that overrides the variant for one page load
    pub query_param: String,
    /// Cloud shader URLs, tried in order
    pub cloud_shader_sources: Vec<String>,
    pub palette: PaletteSettings,
}

impl Default for BackdropSettings {
    fn default() -> Self {
        Self {
            init_delay_ms: 300,
            fade_in_ms: 800,
            offscreen_damp: 0.25,
            hero_only: true,
            density: 1.0,
            intersection_threshold: 0.1,
            root_margin: "0px 0px -20% 0px".to_string(),
            storage_key: "folio.backdrop".to_string(),
            query_param: "bg".to_string(),
            cloud_shader_sources: vec![
                "/effects/clouds.wgsl".to_string(),
                "/assets/effects/clouds.wgsl".to_string(),
            ],
            palette: PaletteSettings::default(),
        }
    }
}

impl BackdropSettings {
    /// Parse and validate settings JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check every field, returning the typed palette
    pub fn validate(&self) -> Result<Palette, ConfigError> {
        if !(0.0..=1.0).contains(&self.offscreen_damp) {
            return Err(ConfigError::DampOutOfRange(self.offscreen_damp));
        }
        if !(self.density > 0.0 && self.density <= 2.0) {
            return Err(ConfigError::DensityOutOfRange(self.density));
        }
        if !(0.0..=1.0).contains(&self.intersection_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.intersection_threshold));
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyKey("storageKey"));
        }
        if self.query_param.trim().is_empty() {
            return Err(ConfigError::EmptyKey("queryParam"));
        }
        if self.shader_sources().next().is_none() {
            return Err(ConfigError::NoShaderSources);
        }
        self.palette.validate()
    }

    /// Non-blank shader source URLs in order
    pub fn shader_sources(&self) -> impl Iterator<Item = &str> {
        self.cloud_shader_sources
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}
