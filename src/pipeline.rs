//! Frame orchestration: capture the scene off-screen, reveal it through the
//! strip row.
//!
//! The pipeline owns the strips, the background surface state, and the
//! descriptions of both render surfaces. Once per tick it produces a
//! [`FramePlan`] with a fixed pass order: capture (strips hidden) then
//! reveal. Resize flows top-down from here into every strip.

use rand::{SeedableRng, rngs::SmallRng};

use crate::{
    assets::decode::SourceImage,
    foundation::core::{Camera, Vec2, Viewport},
    foundation::error::{StripFxError, StripFxResult},
    input::pointer::PointerTracker,
    plan::{
        BackgroundDraw, CapturePass, FramePlan, OFFSCREEN_SURFACE, Pass, PixelFormat, RevealPass,
        SCREEN_SURFACE, SurfaceDesc, TextureSource, WrapMode,
    },
    projection::{cover_scale, screen_coordinate, visible_size},
    strip::StripAnimator,
};

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct PipelineConfig {
    /// Number of vertical strips the visible width is partitioned into.
    pub fragment_count: usize,
    pub camera: Camera,
    /// Depth of the background quad, behind the strip row.
    pub background_z: f64,
    /// Scale margin on the background quad so the parallax tilt never
    /// exposes an edge gap.
    pub overscan: f64,
    /// Damping applied to the pointer-derived look target.
    pub look_damping: f64,
    /// Seed for the stochastic trigger draws.
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fragment_count: 30,
            camera: Camera::default(),
            background_z: -1.0,
            overscan: 1.1,
            look_damping: 0.15,
            seed: 0,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> StripFxResult<()> {
        if self.fragment_count == 0 {
            return Err(StripFxError::validation("fragment_count must be > 0"));
        }
        self.camera.validate()?;
        if self.background_z >= self.camera.z {
            return Err(StripFxError::validation(
                "background_z must be in front of the camera",
            ));
        }
        if !(self.overscan.is_finite() && self.overscan >= 1.0) {
            return Err(StripFxError::validation("overscan must be >= 1.0"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
struct BackgroundState {
    scale: Vec2,
    uv_scale: Vec2,
    tilt: Vec2,
}

pub struct CompositionPipeline {
    config: PipelineConfig,
    viewport: Viewport,
    source_aspect: f64,
    background: BackgroundState,
    screen_coord: Vec2,
    strips: Vec<StripAnimator>,
    rng: SmallRng,
    last_speed: f64,
    disposed: bool,
}

impl CompositionPipeline {
    /// Build the scene. The decoded source image is a construction
    /// precondition: there is no way to obtain a pipeline, and therefore no
    /// way to render a frame, before the image is ready.
    pub fn new(
        config: PipelineConfig,
        source: &SourceImage,
        viewport: Viewport,
    ) -> StripFxResult<Self> {
        config.validate()?;

        let aspect = viewport.aspect();
        let screen_coord = screen_coordinate(&viewport);
        let screen = visible_size(&config.camera, aspect, 0.0);

        let count = config.fragment_count;
        let mut strips = Vec::with_capacity(count);
        for i in 0..count {
            let f = i as f64 / count as f64;
            let x = screen.width * f - screen.width / 2.0;
            // Small increasing depth offset so strips never z-fight.
            let z = f * 0.001;
            let height = visible_size(&config.camera, aspect, z).height;
            strips.push(StripAnimator::new(x, z, height, screen_coord));
        }

        let bg_size = visible_size(&config.camera, aspect, config.background_z);
        let background = BackgroundState {
            scale: Vec2::new(
                bg_size.width * config.overscan,
                bg_size.height * config.overscan,
            ),
            uv_scale: cover_scale(source.aspect(), aspect),
            tilt: Vec2::ZERO,
        };

        Ok(Self {
            rng: SmallRng::seed_from_u64(config.seed),
            config,
            viewport,
            source_aspect: source.aspect(),
            background,
            screen_coord,
            strips,
            last_speed: 0.0,
            disposed: false,
        })
    }

    /// Produce the frame plan for one tick.
    ///
    /// Fixed order, no parallelism: derive the look target, hide the strips
    /// and capture the scene off-screen, advance every strip with the
    /// frame's mouse speed, then reveal. When the viewport is degenerate the
    /// strip-trigger step is skipped for the frame; running timelines still
    /// advance.
    #[tracing::instrument(skip(self, pointer))]
    pub fn advance(&mut self, dt: f64, pointer: &PointerTracker) -> StripFxResult<FramePlan> {
        if self.disposed {
            return Err(StripFxError::pipeline("pipeline is disposed"));
        }

        let visible = visible_size(&self.config.camera, self.viewport.aspect(), 0.0);
        let position = pointer.position();
        self.background.tilt = Vec2::new(
            position.x * (visible.width / 2.0) * self.config.look_damping,
            position.y * (visible.height / 2.0) * self.config.look_damping,
        );

        let speed_x = pointer.speed().x;
        let mouse_speed = (self.last_speed - speed_x).abs();
        self.last_speed = speed_x;

        let allow_trigger = !self.viewport.is_degenerate();

        for strip in &mut self.strips {
            strip.set_visible(false);
        }
        let capture = Pass::Capture(CapturePass {
            target: OFFSCREEN_SURFACE,
            background: self.background_draw(),
        });

        for strip in &mut self.strips {
            strip.update(dt, mouse_speed, allow_trigger, &mut self.rng)?;
        }

        for strip in &mut self.strips {
            strip.set_visible(true);
        }
        let animating = self.strips.iter().filter(|s| s.is_animating()).count();
        tracing::trace!(animating, mouse_speed, "frame advanced");

        let reveal = Pass::Reveal(RevealPass {
            target: SCREEN_SURFACE,
            background: self.background_draw(),
            strips: self
                .strips
                .iter()
                .filter(|s| s.visible())
                .map(|s| s.draw_params(TextureSource::Offscreen))
                .collect(),
        });

        Ok(FramePlan {
            surfaces: self.surfaces(),
            passes: vec![capture, reveal],
            final_surface: SCREEN_SURFACE,
        })
    }

    /// Handle a viewport change: re-derive every projection metric and push
    /// the new layout into the strips. Nothing here is cached from before
    /// the resize.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, viewport: Viewport) {
        if self.disposed {
            return;
        }
        self.viewport = viewport;

        let aspect = viewport.aspect();
        let bg_size = visible_size(&self.config.camera, aspect, self.config.background_z);
        self.background.scale = Vec2::new(
            bg_size.width * self.config.overscan,
            bg_size.height * self.config.overscan,
        );
        self.background.uv_scale = cover_scale(self.source_aspect, aspect);
        self.screen_coord = screen_coordinate(&viewport);

        let screen = visible_size(&self.config.camera, aspect, 0.0);
        let count = self.strips.len();
        for (i, strip) in self.strips.iter_mut().enumerate() {
            let f = i as f64 / count as f64;
            strip.rebase(screen.width * f - screen.width / 2.0);
            let height = visible_size(&self.config.camera, aspect, strip.z()).height;
            strip.resize(height, self.screen_coord);
        }
    }

    /// Release strip resources and stop producing plans. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.strips.clear();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn strips(&self) -> &[StripAnimator] {
        &self.strips
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn background_draw(&self) -> BackgroundDraw {
        BackgroundDraw {
            texture: TextureSource::SourceImage,
            scale: self.background.scale,
            uv_scale: self.background.uv_scale,
            tilt: self.background.tilt,
        }
    }

    fn surfaces(&self) -> Vec<SurfaceDesc> {
        let width = self.viewport.physical_width().max(1);
        let height = self.viewport.physical_height().max(1);
        vec![
            SurfaceDesc {
                width,
                height,
                format: PixelFormat::Rgba8,
                wrap: WrapMode::ClampToEdge,
            },
            SurfaceDesc {
                width,
                height,
                format: PixelFormat::Rgba8,
                wrap: WrapMode::MirrorRepeat,
            },
        ]
    }
}
