//! Effect configuration derived once per mount

use folio_hal::Capabilities;
use serde::Serialize;

use crate::settings::BackdropSettings;
use crate::tier::Tier;
use crate::variant::Variant;

/// Speed forced when the user prefers reduced motion
pub const REDUCED_MOTION_SPEED: f32 = 0.0;

/// Fixed per-tier quality parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct QualityProfile {
    /// Cloud layers / density step, 1..=5
    pub quantity: u32,
    /// Base animation speed multiplier
    pub speed: f32,
    /// Camera zoom
    pub zoom: f32,
    /// Highest device pixel ratio the surface renders at
    pub dpr_cap: f32,
}

impl QualityProfile {
    /// Particle count before density scaling: `22 * quantity + 4`
    pub fn node_count(&self) -> u32 {
        22 * self.quantity + 4
    }

    /// Link distance before density scaling: `2.5 * quantity + 4.5`
    pub fn connection_distance(&self) -> f32 {
        2.5 * self.quantity as f32 + 4.5
    }
}

/// Quality table lookup
pub fn quality(tier: Tier) -> QualityProfile {
    let (quantity, speed, zoom, dpr_cap) = match tier {
        Tier::Potato => (1, 0.25, 0.98, 0.9),
        Tier::Low => (2, 0.35, 1.0, 1.0),
        Tier::Medium => (3, 0.45, 1.02, 1.25),
        Tier::High => (4, 0.55, 1.04, 1.5),
        Tier::Ultra => (5, 0.65, 1.05, 1.8),
    };
    QualityProfile {
        quantity,
        speed,
        zoom,
        dpr_cap,
    }
}

/// Linear RGB colour with components in 0..=1
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// From a packed `0xRRGGBB`
    pub const fn from_u32(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Parse `#rrggbb`, `rrggbb` or `#rgb`
    pub fn parse(value: &str) -> Option<Self> {
        let digits = value.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let packed = match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok()?,
            3 => {
                let short = u32::from_str_radix(digits, 16).ok()?;
                let (r, g, b) = ((short >> 8) & 0xf, (short >> 4) & 0xf, short & 0xf);
                (r * 0x11) << 16 | (g * 0x11) << 8 | (b * 0x11)
            }
            _ => return None,
        };
        Some(Self::from_u32(packed))
    }

    /// Packed `0xRRGGBB`
    pub fn to_u32(&self) -> u32 {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        c(self.r) << 16 | c(self.g) << 8 | c(self.b)
    }

    /// CSS `#rrggbb`
    pub fn to_css(&self) -> String {
        format!("#{:06x}", self.to_u32())
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Validated colours shared by every variant
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Palette {
    pub gradient_from: Rgb,
    pub gradient_to: Rgb,
    pub sky: Rgb,
    pub cloud: Rgb,
    pub cloud_shadow: Rgb,
    pub sun: Rgb,
    pub sun_glare: Rgb,
    pub sunlight: Rgb,
    pub node: Rgb,
    pub node_glow: Rgb,
    pub line: Rgb,
    /// Alpha of network links
    pub line_opacity: f32,
}

impl Palette {
    /// The twilight palette
    pub fn twilight() -> Self {
        Self {
            gradient_from: Rgb::from_u32(0x1b2438),
            gradient_to: Rgb::from_u32(0x121a2c),
            sky: Rgb::from_u32(0x1b2438),
            cloud: Rgb::from_u32(0x7a9bcf),
            cloud_shadow: Rgb::from_u32(0x0e1424),
            sun: Rgb::from_u32(0x1b2438),
            sun_glare: Rgb::from_u32(0x2a3652),
            sunlight: Rgb::from_u32(0x24324a),
            node: Rgb::from_u32(0x60a5fa),
            node_glow: Rgb::from_u32(0x1e3a8a),
            line: Rgb::from_u32(0x60a5fa),
            line_opacity: 0.2,
        }
    }

    /// Static CSS background used when no effect can run
    pub fn gradient_css(&self) -> String {
        format!(
            "linear-gradient(180deg, {} 0%, {} 100%)",
            self.gradient_from.to_css(),
            self.gradient_to.to_css()
        )
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::twilight()
    }
}

/// Parameters for one mounted effect
///
/// Derived from a single capability probe and immutable for the mount.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EffectConfig {
    pub tier: Tier,
    pub variant: Variant,
    pub quantity: u32,
    /// Base speed; [`REDUCED_MOTION_SPEED`] under reduced motion
    pub speed: f32,
    pub zoom: f32,
    /// `min(dpr cap, device dpr)`
    pub pixel_ratio: f32,
    pub node_count: u32,
    pub connection_distance: f32,
    pub offscreen_damp: f32,
    pub reduced_motion: bool,
    pub fade_in_ms: u32,
    pub palette: Palette,
}

impl EffectConfig {
    pub fn derive(
        caps: &Capabilities,
        tier: Tier,
        variant: Variant,
        settings: &BackdropSettings,
        palette: &Palette,
    ) -> Self {
        let q = quality(tier);
        let reduced_motion = caps.prefers_reduced_motion == Some(true);
        let device_dpr = caps
            .device_pixel_ratio
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(1.0) as f32;
        let density = settings.density;

        Self {
            tier,
            variant,
            quantity: q.quantity,
            speed: if reduced_motion {
                REDUCED_MOTION_SPEED
            } else {
                q.speed
            },
            zoom: q.zoom,
            pixel_ratio: device_dpr.min(q.dpr_cap),
            node_count: ((q.node_count() as f32 * density).round() as u32).max(1),
            connection_distance: q.connection_distance() * density.sqrt(),
            offscreen_damp: settings.offscreen_damp,
            reduced_motion,
            fade_in_ms: settings.fade_in_ms,
            palette: palette.clone(),
        }
    }
}
