//! Explicit multi-segment timeline evaluator.
//!
//! A [`Timeline`] is an ordered list of [`Segment`]s with absolute start
//! offsets, advanced by `dt` once per tick. Segments may overlap in time and
//! may target the same property; for each property the most recently started
//! segment wins, which is what lets a "go back to rest" segment take over
//! from the excursion segment it follows.

use crate::{
    animation::ease::Ease,
    foundation::error::{StripFxError, StripFxResult},
};

/// Animatable scalar channel of one strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum StripProperty {
    /// Material uv offset, x component.
    OffsetX,
    /// Material uv offset, y component.
    OffsetY,
    /// World-space horizontal position.
    PositionX,
    /// Width-axis scale jitter.
    WidthScale,
}

/// One sub-animation: `property` travels `from -> to` over
/// `[start, start + duration)` seconds, shaped by `ease`.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    pub property: StripProperty,
    pub start: f64,
    pub duration: f64,
    pub from: f64,
    pub to: f64,
    pub ease: Ease,
}

impl Segment {
    fn value_at(&self, t: f64) -> f64 {
        let local = ((t - self.start) / self.duration).clamp(0.0, 1.0);
        lerp(self.from, self.to, self.ease.apply(local))
    }
}

/// A running per-strip timeline; cooperative state advanced every tick.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    segments: Vec<Segment>,
    elapsed: f64,
}

impl Timeline {
    pub fn new(segments: Vec<Segment>) -> StripFxResult<Self> {
        if segments.is_empty() {
            return Err(StripFxError::animation(
                "timeline must have at least one segment",
            ));
        }
        for seg in &segments {
            if !(seg.start.is_finite() && seg.duration.is_finite()) {
                return Err(StripFxError::animation("segment timing must be finite"));
            }
            if seg.start < 0.0 {
                return Err(StripFxError::animation("segment start must be >= 0"));
            }
            if seg.duration <= 0.0 {
                return Err(StripFxError::animation("segment duration must be > 0"));
            }
            if !(seg.from.is_finite() && seg.to.is_finite()) {
                return Err(StripFxError::animation("segment values must be finite"));
            }
        }
        Ok(Self {
            segments,
            elapsed: 0.0,
        })
    }

    /// Advance by `dt` seconds (negative deltas are treated as zero).
    /// Returns true once the timeline has reached its total duration.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.elapsed += dt.max(0.0);
        self.is_finished()
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn total_duration(&self) -> f64 {
        self.segments
            .iter()
            .map(|s| s.start + s.duration)
            .fold(0.0, f64::max)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total_duration()
    }

    /// Current value of `property`, or `None` if no segment targeting it has
    /// started yet. When several have started, the one with the latest start
    /// wins (declaration order breaks ties).
    pub fn value_of(&self, property: StripProperty) -> Option<f64> {
        let mut active: Option<&Segment> = None;
        for seg in &self.segments {
            if seg.property != property || seg.start > self.elapsed {
                continue;
            }
            match active {
                Some(cur) if cur.start > seg.start => {}
                _ => active = Some(seg),
            }
        }
        active.map(|seg| seg.value_at(self.elapsed))
    }

    /// Final resting value of `property` once the timeline completes, i.e.
    /// the `to` of its latest-starting segment.
    pub fn terminal_value(&self, property: StripProperty) -> Option<f64> {
        let mut last: Option<&Segment> = None;
        for seg in &self.segments {
            if seg.property != property {
                continue;
            }
            match last {
                Some(cur) if cur.start > seg.start => {}
                _ => last = Some(seg),
            }
        }
        last.map(|seg| seg.to)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(property: StripProperty, start: f64, from: f64, to: f64) -> Segment {
        Segment {
            property,
            start,
            duration: 1.0,
            from,
            to,
            ease: Ease::Linear,
        }
    }

    #[test]
    fn rejects_empty_and_degenerate_segments() {
        assert!(Timeline::new(vec![]).is_err());

        let mut bad = seg(StripProperty::OffsetX, 0.0, 0.0, 1.0);
        bad.duration = 0.0;
        assert!(Timeline::new(vec![bad]).is_err());

        let mut bad = seg(StripProperty::OffsetX, -1.0, 0.0, 1.0);
        bad.duration = 1.0;
        assert!(Timeline::new(vec![bad]).is_err());
    }

    #[test]
    fn samples_linear_segment() {
        let mut tl = Timeline::new(vec![seg(StripProperty::PositionX, 0.0, 2.0, 4.0)]).unwrap();
        assert_eq!(tl.value_of(StripProperty::PositionX), Some(2.0));
        tl.advance(0.5);
        assert_eq!(tl.value_of(StripProperty::PositionX), Some(3.0));
        assert!(tl.advance(0.5));
        assert_eq!(tl.value_of(StripProperty::PositionX), Some(4.0));
    }

    #[test]
    fn later_started_segment_takes_over_property() {
        let mut tl = Timeline::new(vec![
            seg(StripProperty::OffsetX, 0.0, 0.0, 1.0),
            seg(StripProperty::OffsetX, 1.0, 1.0, 0.0),
        ])
        .unwrap();

        tl.advance(0.5);
        assert_eq!(tl.value_of(StripProperty::OffsetX), Some(0.5));
        tl.advance(1.0); // elapsed 1.5, second segment halfway
        assert_eq!(tl.value_of(StripProperty::OffsetX), Some(0.5));
        tl.advance(0.5);
        assert_eq!(tl.value_of(StripProperty::OffsetX), Some(0.0));
    }

    #[test]
    fn unstarted_property_samples_none() {
        let tl = Timeline::new(vec![
            seg(StripProperty::OffsetX, 0.0, 0.0, 1.0),
            seg(StripProperty::WidthScale, 2.0, 0.1, 0.2),
        ])
        .unwrap();
        assert_eq!(tl.value_of(StripProperty::WidthScale), None);
        assert_eq!(tl.value_of(StripProperty::PositionX), None);
    }

    #[test]
    fn total_duration_is_latest_segment_end() {
        let tl = Timeline::new(vec![
            seg(StripProperty::OffsetX, 0.0, 0.0, 1.0),
            seg(StripProperty::PositionX, 0.8, 0.0, 1.0),
        ])
        .unwrap();
        assert!((tl.total_duration() - 1.8).abs() < 1e-12);
        assert!(!tl.is_finished());
    }

    #[test]
    fn terminal_values_come_from_latest_segment() {
        let tl = Timeline::new(vec![
            seg(StripProperty::OffsetX, 0.0, 0.0, 0.7),
            seg(StripProperty::OffsetX, 1.0, 0.7, 0.0),
        ])
        .unwrap();
        assert_eq!(tl.terminal_value(StripProperty::OffsetX), Some(0.0));
        assert_eq!(tl.terminal_value(StripProperty::PositionX), None);
    }

    #[test]
    fn negative_dt_does_not_rewind() {
        let mut tl = Timeline::new(vec![seg(StripProperty::OffsetX, 0.0, 0.0, 1.0)]).unwrap();
        tl.advance(0.5);
        tl.advance(-10.0);
        assert_eq!(tl.elapsed(), 0.5);
    }
}
