//! Screen-space projection metrics.
//!
//! Everything here is a pure function of camera and viewport geometry and is
//! recomputed on demand; none of these values may be cached across a resize.

use crate::foundation::core::{Camera, MIN_ASPECT, Size, Vec2, Viewport};

/// World-space visible width/height at a plane `depth_offset` in front of
/// the camera origin along the view axis.
///
/// `height = 2 * (camera.z - depth_offset) * tan(fov_y / 2)`,
/// `width = height * aspect`.
pub fn visible_size(camera: &Camera, aspect: f64, depth_offset: f64) -> Size {
    let aspect = aspect.max(MIN_ASPECT);
    let half_fov = (camera.fov_y_deg / 2.0).to_radians();
    let height = 2.0 * (camera.z - depth_offset) * half_fov.tan();
    Size::new(height * aspect, height)
}

/// Non-uniform uv scale so a texture of `texture_aspect` fully covers a
/// viewport of `viewport_aspect` without letterboxing. The axis belonging to
/// the larger dimension overscales; the other stays at 1.
pub fn cover_scale(texture_aspect: f64, viewport_aspect: f64) -> Vec2 {
    let texture_aspect = texture_aspect.max(MIN_ASPECT);
    let viewport_aspect = viewport_aspect.max(MIN_ASPECT);
    if viewport_aspect > texture_aspect {
        Vec2::new(viewport_aspect / texture_aspect, 1.0)
    } else {
        Vec2::new(1.0, texture_aspect / viewport_aspect)
    }
}

/// Viewport size in physical pixels, used as a shader-space reference so
/// strip shaders can reason in device pixels.
pub fn screen_coordinate(viewport: &Viewport) -> Vec2 {
    Vec2::new(
        viewport.width * viewport.device_pixel_ratio,
        viewport.height * viewport.device_pixel_ratio,
    )
}
