//! Per-frame draw parameters

use folio_hal::PixelSize;

use crate::config::EffectConfig;
use crate::motion::MotionSample;
use crate::variant::Variant;

/// Everything a renderer needs for one frame
#[derive(Clone, Debug, PartialEq)]
pub struct FrameState {
    pub variant: Variant,
    /// Animation time in seconds
    pub time: f32,
    /// Surface size in device pixels
    pub size: PixelSize,
    pub zoom: f32,
    pub quantity: u32,
    /// Fade-in progress, 0..=1
    pub opacity: f32,
    /// Node pulsing is skipped under reduced motion
    pub pulse: bool,
    pub motion: MotionSample,
}

impl FrameState {
    pub fn new(config: &EffectConfig, time: f32, size: PixelSize, elapsed_ms: f64) -> Self {
        Self {
            variant: config.variant,
            time,
            size,
            zoom: config.zoom,
            quantity: config.quantity,
            opacity: fade_in(elapsed_ms, config.fade_in_ms),
            pulse: !config.reduced_motion,
            motion: MotionSample::at(time),
        }
    }
}

/// Opacity after `elapsed_ms` of a `duration_ms` fade
pub fn fade_in(elapsed_ms: f64, duration_ms: u32) -> f32 {
    if duration_ms == 0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms as f64).clamp(0.0, 1.0) as f32
}
