//! stripfx re-presents a full-screen image through a row of independently
//! animated vertical strips that stochastically detach, offset, and snap
//! back based on pointer velocity.
//!
//! # Frame overview
//!
//! 1. **Input**: [`PointerTracker`] normalizes pointer/touch events and
//!    exposes a raw frame-to-frame velocity proxy.
//! 2. **Advance**: [`CompositionPipeline::advance`] derives the parallax
//!    look target, ticks every [`StripAnimator`] (stochastic trigger plus
//!    multi-stage [`Timeline`]), and emits a backend-agnostic [`FramePlan`]:
//!    a capture pass into a mirror-wrapped off-screen surface, then a reveal
//!    pass where each strip samples the captured texture.
//! 3. **Resize**: [`CompositionPipeline::resize`] re-derives all projection
//!    metrics and pushes new layout into the strips; nothing is cached
//!    across a viewport change.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded cooperative ticks**: timelines are time-sliced state
//!   advanced per frame, never awaited.
//! - **Deterministic-by-seed**: all stochastic triggers draw from one seeded
//!   RNG owned by the pipeline.
//! - **No rendering dependency**: the crate emits plain-data frame plans; a
//!   backend executes them with two program slots (background, strip).
#![forbid(unsafe_code)]

pub mod animation;
pub mod assets;
pub mod foundation;
pub mod input;
pub mod pipeline;
pub mod plan;
pub mod projection;
pub mod strip;

pub use animation::ease::Ease;
pub use animation::timeline::{Segment, StripProperty, Timeline};
pub use assets::decode::{SourceImage, decode_image};
pub use foundation::core::{Camera, MIN_ASPECT, Size, Vec2, Viewport};
pub use foundation::error::{StripFxError, StripFxResult};
pub use input::pointer::PointerTracker;
pub use pipeline::{CompositionPipeline, PipelineConfig};
pub use plan::{
    BackgroundDraw, CapturePass, FramePlan, OFFSCREEN_SURFACE, Pass, PixelFormat, RevealPass,
    SCREEN_SURFACE, StripDraw, SurfaceDesc, SurfaceId, TextureSource, WrapMode,
};
pub use projection::{cover_scale, screen_coordinate, visible_size};
pub use strip::{StripAnimator, trigger_threshold};
