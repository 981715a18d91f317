//! Device performance tiers

use folio_hal::Capabilities;
use serde::{Deserialize, Serialize};

/// Viewports narrower than this count as mobile
pub const MOBILE_MAX_WIDTH: f64 = 768.0;
/// Device pixel ratio above which a display counts as high density
pub const HIGH_DPR: f64 = 2.0;
/// Heap hints below this mean memory is limited
pub const LIMITED_HEAP_BYTES: u64 = 2 * 1024 * 1024 * 1024;
/// Heap hint required for `Ultra`
pub const ULTRA_HEAP_BYTES: u64 = 4 * 1024 * 1024 * 1024;
/// Viewport width required for `Ultra`
pub const ULTRA_MIN_WIDTH: f64 = 1920.0;

/// Lowercase user agent fragments that identify a mobile device
const MOBILE_AGENTS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
    "mobi",
];

/// Coarse device performance classification, weakest first
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Potato,
    #[default]
    Low,
    Medium,
    High,
    Ultra,
}

impl Tier {
    /// All tiers, weakest first
    pub fn all() -> &'static [Tier] {
        &[Tier::Potato, Tier::Low, Tier::Medium, Tier::High, Tier::Ultra]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Tier::Potato => "potato",
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
            Tier::Ultra => "ultra",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "potato" => Some(Tier::Potato),
            "low" => Some(Tier::Low),
            "medium" => Some(Tier::Medium),
            "high" => Some(Tier::High),
            "ultra" => Some(Tier::Ultra),
            _ => None,
        }
    }
}

/// Whether the user agent names a mobile platform
pub fn is_mobile_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    MOBILE_AGENTS.iter().any(|needle| ua.contains(needle))
}

/// Classify a device from one capability probe
///
/// Never fails. Missing signals count as absent, and a probe without a
/// viewport width (no browser state at all) yields [`Tier::Low`].
pub fn detect_tier(caps: &Capabilities) -> Tier {
    let Some(width) = caps.viewport_width.filter(|w| w.is_finite()) else {
        return Tier::Low;
    };

    if caps.prefers_reduced_motion == Some(true) {
        return Tier::Potato;
    }

    let limited_memory = caps
        .heap_limit_bytes
        .map(|heap| heap < LIMITED_HEAP_BYTES)
        .unwrap_or(false);

    let mobile = width < MOBILE_MAX_WIDTH
        || caps.user_agent.as_deref().map(is_mobile_agent).unwrap_or(false);
    if mobile {
        return if limited_memory { Tier::Potato } else { Tier::Low };
    }

    let dpr = caps.device_pixel_ratio.unwrap_or(1.0);
    if dpr > HIGH_DPR {
        if limited_memory {
            return Tier::Medium;
        }
        let big_heap = caps
            .heap_limit_bytes
            .map(|heap| heap >= ULTRA_HEAP_BYTES)
            .unwrap_or(false);
        return if big_heap && width >= ULTRA_MIN_WIDTH {
            Tier::Ultra
        } else {
            Tier::High
        };
    }

    Tier::Medium
}
