use crate::foundation::error::{StripFxError, StripFxResult};

pub use kurbo::{Size, Vec2};

/// Smallest aspect ratio a viewport can report.
///
/// A zero-sized viewport clamps here instead of dividing by zero, so
/// projection math stays finite while the host is mid-resize.
pub const MIN_ASPECT: f64 = 1e-6;

/// Logical viewport geometry plus device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> StripFxResult<Self> {
        if !width.is_finite() || !height.is_finite() || !device_pixel_ratio.is_finite() {
            return Err(StripFxError::validation("viewport dimensions must be finite"));
        }
        if device_pixel_ratio <= 0.0 {
            return Err(StripFxError::validation(
                "viewport device_pixel_ratio must be > 0",
            ));
        }
        Ok(Self {
            width,
            height,
            device_pixel_ratio,
        })
    }

    /// Width / height, clamped so degenerate sizes never produce NaN.
    pub fn aspect(self) -> f64 {
        if self.is_degenerate() {
            return MIN_ASPECT;
        }
        (self.width / self.height).max(MIN_ASPECT)
    }

    /// True when either dimension is zero or negative.
    pub fn is_degenerate(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Physical pixel width, rounded.
    pub fn physical_width(self) -> u32 {
        (self.width.max(0.0) * self.device_pixel_ratio).round() as u32
    }

    /// Physical pixel height, rounded.
    pub fn physical_height(self) -> u32 {
        (self.height.max(0.0) * self.device_pixel_ratio).round() as u32
    }
}

/// Perspective camera on the view axis. Only the vertical field of view and
/// the distance along z matter to the effect.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Camera {
    pub fov_y_deg: f64,
    pub z: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_y_deg: 50.0,
            z: 5.0,
        }
    }
}

impl Camera {
    pub fn validate(self) -> StripFxResult<()> {
        if !(0.0..180.0).contains(&self.fov_y_deg) || self.fov_y_deg == 0.0 {
            return Err(StripFxError::validation(
                "camera fov_y_deg must be in (0, 180)",
            ));
        }
        if !self.z.is_finite() {
            return Err(StripFxError::validation("camera z must be finite"));
        }
        Ok(())
    }
}
