//! Backend-agnostic frame plan.
//!
//! The pipeline emits one [`FramePlan`] per tick instead of talking to a GPU
//! directly. A plan consists of:
//! - surface declarations (`surfaces`)
//! - a sequence of passes (`passes`)
//! - a declared final surface (`final_surface`)
//!
//! A backend executes the passes in order with two program slots: one taking
//! the source texture plus a cover-fit uv scale (background), one taking the
//! captured texture plus a 2D offset and a physical-pixel screen coordinate
//! (strip). All values a shader needs are plain data here, so the plan is
//! inspectable and testable without any rendering dependency.

use crate::foundation::core::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Identifier for a surface declared in [`FramePlan::surfaces`].
pub struct SurfaceId(pub u32);

/// The on-screen target.
pub const SCREEN_SURFACE: SurfaceId = SurfaceId(0);
/// The off-screen capture buffer.
pub const OFFSCREEN_SURFACE: SurfaceId = SurfaceId(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PixelFormat {
    Rgba8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WrapMode {
    ClampToEdge,
    /// Mirrored repeat on both axes, so sampling slightly outside `[0, 1]`
    /// still returns plausible texel data instead of clamped edges.
    MirrorRepeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceDesc {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub wrap: WrapMode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Which texture a draw samples.
pub enum TextureSource {
    /// The decoded source image.
    SourceImage,
    /// The off-screen buffer captured earlier in the same frame.
    Offscreen,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Uniforms for the full-viewport background quad.
pub struct BackgroundDraw {
    pub texture: TextureSource,
    /// World-space quad scale, overscan margin included.
    pub scale: Vec2,
    /// Cover-fit uv scale for the sampled texture.
    pub uv_scale: Vec2,
    /// Damped look-at target driving the parallax tilt.
    pub tilt: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Uniforms for one strip quad.
pub struct StripDraw {
    pub texture: TextureSource,
    pub position_x: f64,
    pub z: f64,
    pub width_scale: f64,
    pub height_scale: f64,
    pub offset: Vec2,
    pub screen_coord: Vec2,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Render the scene (background only, strips hidden) into the capture target.
pub struct CapturePass {
    pub target: SurfaceId,
    pub background: BackgroundDraw,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Render the on-screen frame: background plus every visible strip, each
/// revealing a slice of the just-captured texture.
pub struct RevealPass {
    pub target: SurfaceId,
    pub background: BackgroundDraw,
    pub strips: Vec<StripDraw>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum Pass {
    Capture(CapturePass),
    Reveal(RevealPass),
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct FramePlan {
    pub surfaces: Vec<SurfaceDesc>,
    pub passes: Vec<Pass>,
    pub final_surface: SurfaceId,
}
