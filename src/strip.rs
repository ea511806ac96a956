//! One vertical strip of the reveal effect.
//!
//! A strip is either `Idle` or `Animating`; the transition into `Animating`
//! is a stochastic draw gated on pointer speed, and the animation itself is a
//! fixed five-stage [`Timeline`] that detaches the strip, offsets its uv
//! sampling, and snaps both back to rest.

use rand::Rng;

use crate::{
    animation::ease::Ease,
    animation::timeline::{Segment, StripProperty, Timeline},
    foundation::core::Vec2,
    foundation::error::StripFxResult,
    plan::{StripDraw, TextureSource},
};

/// Length of one choreography stage in seconds.
const STAGE_SECS: f64 = 0.5;

/// Per-tick trigger probability for a given pointer speed.
///
/// Zero speed still leaves a small idle flicker chance (0.001); fast pointer
/// movement raises the threshold, saturating at `0.001 + 0.01`.
pub fn trigger_threshold(mouse_speed: f64) -> f64 {
    0.001 + mouse_speed.min(0.01)
}

#[derive(Clone, Debug)]
pub struct StripAnimator {
    /// Anchor every timeline animates away from and returns to. Fixed with
    /// respect to animation; re-derived only by layout (see [`rebase`]).
    ///
    /// [`rebase`]: StripAnimator::rebase
    base_x: f64,
    z: f64,
    position_x: f64,
    width_scale: f64,
    height_scale: f64,
    offset: Vec2,
    screen_coord: Vec2,
    visible: bool,
    timeline: Option<Timeline>,
}

impl StripAnimator {
    pub fn new(x: f64, z: f64, height: f64, screen_coord: Vec2) -> Self {
        Self {
            base_x: x,
            z,
            position_x: x,
            width_scale: 1.0,
            height_scale: height,
            offset: Vec2::ZERO,
            screen_coord,
            visible: true,
            timeline: None,
        }
    }

    pub fn base_x(&self) -> f64 {
        self.base_x
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn position_x(&self) -> f64 {
        self.position_x
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn height_scale(&self) -> f64 {
        self.height_scale
    }

    pub fn width_scale(&self) -> f64 {
        self.width_scale
    }

    pub fn is_animating(&self) -> bool {
        self.timeline.is_some()
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Externally toggled by the pipeline around the capture pass. Does not
    /// interact with the animation state machine.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Push new layout values from a viewport change. Legal at any time,
    /// including mid-timeline: the timeline animates the width axis and the
    /// horizontal position, never the height scale.
    pub fn resize(&mut self, height: f64, screen_coord: Vec2) {
        self.height_scale = height;
        self.screen_coord = screen_coord;
    }

    /// Move the strip's anchor to a new tiling position.
    ///
    /// An idle strip snaps to the new anchor immediately. A running timeline
    /// keeps its captured values and finishes undisturbed; the completion
    /// snap then lands on the new anchor.
    pub fn rebase(&mut self, x: f64) {
        self.base_x = x;
        if self.timeline.is_none() {
            self.position_x = x;
        }
    }

    /// Advance one tick: progress the active timeline (if any), then run the
    /// stochastic trigger draw when idle and `allow_trigger` is set.
    pub fn update<R: Rng>(
        &mut self,
        dt: f64,
        mouse_speed: f64,
        allow_trigger: bool,
        rng: &mut R,
    ) -> StripFxResult<()> {
        if let Some(tl) = &mut self.timeline {
            let finished = tl.advance(dt);
            if finished {
                // The round-trip invariant is exact, not a float approximation.
                let final_width = tl.terminal_value(StripProperty::WidthScale);
                self.offset = Vec2::ZERO;
                self.position_x = self.base_x;
                if let Some(w) = final_width {
                    self.width_scale = w;
                }
                self.timeline = None;
            } else {
                self.apply_active_timeline();
            }
        }

        if self.timeline.is_none() && allow_trigger {
            let draw: f64 = rng.random();
            if draw < trigger_threshold(mouse_speed) {
                self.trigger(mouse_speed, rng)?;
            }
        }
        Ok(())
    }

    /// Start the five-stage glitch timeline. A trigger while already
    /// animating is a silent no-op (dropped, not queued).
    pub fn trigger<R: Rng>(&mut self, mouse_speed: f64, rng: &mut R) -> StripFxResult<()> {
        if self.timeline.is_some() {
            return Ok(());
        }
        let tl = self.glitch_timeline(mouse_speed, rng)?;
        self.timeline = Some(tl);
        self.apply_active_timeline();
        Ok(())
    }

    /// Project current animation state into the render parameters of one
    /// strip quad sampling `texture`.
    pub fn draw_params(&self, texture: TextureSource) -> StripDraw {
        StripDraw {
            texture,
            position_x: self.position_x,
            z: self.z,
            width_scale: self.width_scale,
            height_scale: self.height_scale,
            offset: self.offset,
            screen_coord: self.screen_coord,
        }
    }

    fn apply_active_timeline(&mut self) {
        let Some(tl) = &self.timeline else {
            return;
        };
        if let Some(x) = tl.value_of(StripProperty::OffsetX) {
            self.offset.x = x;
        }
        if let Some(y) = tl.value_of(StripProperty::OffsetY) {
            self.offset.y = y;
        }
        if let Some(x) = tl.value_of(StripProperty::PositionX) {
            self.position_x = x;
        }
        if let Some(w) = tl.value_of(StripProperty::WidthScale) {
            self.width_scale = w;
        }
    }

    /// Five overlapping stages, each `STAGE_SECS` long:
    ///
    /// | start | property        | motion                                  |
    /// |-------|-----------------|-----------------------------------------|
    /// | 0.00  | offset x/y      | 0 -> random(±0.2), 0 -> random(±0.05)   |
    /// | 0.00  | position x      | base -> base + random(±(0.3 + speed))   |
    /// | 0.50  | offset x/y      | back to 0                               |
    /// | 0.75  | width scale     | random(0..0.3) -> random(0..0.3) jitter |
    /// | 0.80  | position x      | back to base                            |
    fn glitch_timeline<R: Rng>(&self, mouse_speed: f64, rng: &mut R) -> StripFxResult<Timeline> {
        let off_x = symmetric(rng, 0.2);
        let off_y = symmetric(rng, 0.05);
        let excursion = symmetric(rng, 0.3 + mouse_speed.max(0.0));
        let width_from = rng.random_range(0.0..0.3);
        let width_to = rng.random_range(0.0..0.3);

        Timeline::new(vec![
            Segment {
                property: StripProperty::OffsetX,
                start: 0.0,
                duration: STAGE_SECS,
                from: 0.0,
                to: off_x,
                ease: Ease::InOutCubic,
            },
            Segment {
                property: StripProperty::OffsetY,
                start: 0.0,
                duration: STAGE_SECS,
                from: 0.0,
                to: off_y,
                ease: Ease::InOutCubic,
            },
            Segment {
                property: StripProperty::PositionX,
                start: 0.0,
                duration: STAGE_SECS,
                from: self.base_x,
                to: self.base_x + excursion,
                ease: Ease::OutQuart,
            },
            Segment {
                property: StripProperty::OffsetX,
                start: STAGE_SECS,
                duration: STAGE_SECS,
                from: off_x,
                to: 0.0,
                ease: Ease::InOutCubic,
            },
            Segment {
                property: StripProperty::OffsetY,
                start: STAGE_SECS,
                duration: STAGE_SECS,
                from: off_y,
                to: 0.0,
                ease: Ease::InOutCubic,
            },
            Segment {
                property: StripProperty::WidthScale,
                start: 1.5 * STAGE_SECS,
                duration: STAGE_SECS,
                from: width_from,
                to: width_to,
                ease: Ease::OutQuart,
            },
            Segment {
                property: StripProperty::PositionX,
                start: 1.6 * STAGE_SECS,
                duration: STAGE_SECS,
                from: self.base_x + excursion,
                to: self.base_x,
                ease: Ease::OutQuart,
            },
        ])
    }
}

fn symmetric<R: Rng>(rng: &mut R, range: f64) -> f64 {
    rng.random_range(-range..range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::SmallRng};

    fn strip() -> StripAnimator {
        StripAnimator::new(-2.5, 0.0003, 7.5, Vec2::new(1920.0, 1080.0))
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn threshold_saturates() {
        assert_eq!(trigger_threshold(0.0), 0.001);
        assert!((trigger_threshold(0.005) - 0.006).abs() < 1e-12);
        assert!((trigger_threshold(0.01) - 0.011).abs() < 1e-12);
        assert!((trigger_threshold(5.0) - 0.011).abs() < 1e-12);
    }

    #[test]
    fn trigger_enters_animating_and_is_reentrant_noop() {
        let mut s = strip();
        let mut r = rng();
        s.trigger(0.0, &mut r).unwrap();
        assert!(s.is_animating());

        s.update(0.3, 0.0, false, &mut r).unwrap();
        let offset_before = s.offset();
        let pos_before = s.position_x();
        s.trigger(1.0, &mut r).unwrap();
        assert_eq!(s.offset(), offset_before);
        assert_eq!(s.position_x(), pos_before);
    }

    #[test]
    fn timeline_round_trips_exactly() {
        let mut s = strip();
        let mut r = rng();
        s.trigger(0.2, &mut r).unwrap();

        // Mid-flight the strip must actually leave its anchor.
        let mut moved = false;
        for _ in 0..100 {
            s.update(0.016, 0.0, false, &mut r).unwrap();
            if s.position_x() != s.base_x() || s.offset() != Vec2::ZERO {
                moved = true;
            }
        }
        assert!(moved);
        assert!(!s.is_animating());
        assert_eq!(s.offset(), Vec2::ZERO);
        assert_eq!(s.position_x(), s.base_x());
    }

    #[test]
    fn animating_flag_covers_full_duration() {
        let mut s = strip();
        let mut r = rng();
        s.trigger(0.0, &mut r).unwrap();

        // Total duration is 1.3s; still animating just before that.
        for _ in 0..12 {
            s.update(0.1, 0.0, false, &mut r).unwrap();
            assert!(s.is_animating());
        }
        s.update(0.2, 0.0, false, &mut r).unwrap();
        assert!(!s.is_animating());
    }

    #[test]
    fn resize_mid_timeline_keeps_progress() {
        let mut s = strip();
        let mut r = rng();
        s.trigger(0.0, &mut r).unwrap();
        s.update(0.4, 0.0, false, &mut r).unwrap();

        let offset = s.offset();
        let pos = s.position_x();
        s.resize(3.3, Vec2::new(800.0, 600.0));
        assert!(s.is_animating());
        assert_eq!(s.offset(), offset);
        assert_eq!(s.position_x(), pos);
        assert_eq!(s.height_scale(), 3.3);

        // The running timeline continues from where it was.
        s.update(0.4, 0.0, false, &mut r).unwrap();
        assert!(s.is_animating());
    }

    #[test]
    fn stochastic_trigger_fires_at_idle_threshold() {
        let mut s = strip();
        let mut r = rng();
        let mut triggered_at = None;
        for tick in 0..100_000 {
            s.update(0.0, 0.0, true, &mut r).unwrap();
            if s.is_animating() {
                triggered_at = Some(tick);
                break;
            }
        }
        // p = 0.001 per tick; virtually certain within 100k ticks.
        assert!(triggered_at.is_some());
    }

    #[test]
    fn trigger_disabled_never_animates() {
        let mut s = strip();
        let mut r = rng();
        for _ in 0..10_000 {
            s.update(0.016, 5.0, false, &mut r).unwrap();
        }
        assert!(!s.is_animating());
    }

    #[test]
    fn visibility_is_independent_of_animation() {
        let mut s = strip();
        let mut r = rng();
        s.trigger(0.0, &mut r).unwrap();
        s.set_visible(false);
        assert!(s.is_animating());
        assert!(!s.visible());
        s.set_visible(true);
        assert!(s.visible());
    }

    #[test]
    fn rebase_snaps_idle_strip_and_defers_for_running_one() {
        let mut s = strip();
        let mut r = rng();
        s.rebase(1.25);
        assert_eq!(s.base_x(), 1.25);
        assert_eq!(s.position_x(), 1.25);

        s.trigger(0.0, &mut r).unwrap();
        s.update(0.4, 0.0, false, &mut r).unwrap();
        let mid = s.position_x();
        s.rebase(-4.0);
        assert_eq!(s.position_x(), mid);

        for _ in 0..100 {
            s.update(0.016, 0.0, false, &mut r).unwrap();
        }
        assert!(!s.is_animating());
        assert_eq!(s.position_x(), -4.0);
    }

    #[test]
    fn draw_params_project_current_state() {
        let mut s = strip();
        let mut r = rng();
        s.trigger(0.0, &mut r).unwrap();
        s.update(0.25, 0.0, false, &mut r).unwrap();

        let draw = s.draw_params(TextureSource::Offscreen);
        assert_eq!(draw.texture, TextureSource::Offscreen);
        assert_eq!(draw.position_x, s.position_x());
        assert_eq!(draw.offset, s.offset());
        assert_eq!(draw.height_scale, s.height_scale());
        assert_eq!(draw.screen_coord, Vec2::new(1920.0, 1080.0));
    }
}
