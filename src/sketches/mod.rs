mod hospital;
mod reborn;

pub use hospital::HospitalDream;
pub use reborn::Reborn;

use crate::display::PixelCanvas;

/// A self-contained looping animation sketch.
pub trait Sketch {
    /// Advance the sketch clock and any per-frame state
    /// - dt: delta time in seconds
    fn update(&mut self, dt: f32);

    /// Draw the current frame onto the canvas
    fn render(&self, canvas: &mut PixelCanvas);

    /// Sketch name for logs and the startup banner
    fn name(&self) -> &str;

    /// Whether the current frame wants film grain layered on top
    /// (default: no grain)
    fn wants_grain(&self) -> bool {
        false
    }
}

/// Time-threshold scene sequencer.
///
/// A sketch is a chain of scenes, each active for a fixed stretch of the
/// looping clock. `segment` maps a clock position to the scene index and the
/// scene-local progress in 0..1.
pub struct Timeline {
    /// Cumulative segment end times, strictly increasing
    ends: Vec<f32>,
}

impl Timeline {
    /// Build from per-segment durations in seconds
    pub fn from_durations(durations: &[f32]) -> Self {
        debug_assert!(!durations.is_empty());
        let mut ends = Vec::with_capacity(durations.len());
        let mut acc = 0.0;
        for &d in durations {
            debug_assert!(d > 0.0);
            acc += d;
            ends.push(acc);
        }
        Self { ends }
    }

    /// Loop length in seconds
    pub fn total(&self) -> f32 {
        self.ends[self.ends.len() - 1]
    }

    /// Fold a clock value into [0, total)
    pub fn wrap(&self, t: f32) -> f32 {
        let total = self.total();
        let t = t % total;
        if t < 0.0 {
            t + total
        } else {
            t
        }
    }

    /// Active segment index and its local 0..1 progress at clock position t
    pub fn segment(&self, t: f32) -> (usize, f32) {
        let t = self.wrap(t);
        let last = self.ends.len() - 1;
        let mut start = 0.0;
        for (i, &end) in self.ends.iter().enumerate() {
            if t < end || i == last {
                return (i, ((t - start) / (end - start)).clamp(0.0, 1.0));
            }
            start = end;
        }
        (last, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_maps_thresholds_to_segments() {
        let tl = Timeline::from_durations(&[1.0, 0.6, 1.0]);
        assert!((tl.total() - 2.6).abs() < 1e-6);

        let (i, p) = tl.segment(0.5);
        assert_eq!(i, 0);
        assert!((p - 0.5).abs() < 1e-4);

        let (i, p) = tl.segment(1.3);
        assert_eq!(i, 1);
        assert!((p - 0.5).abs() < 1e-4);

        // a segment starts at its threshold
        let (i, p) = tl.segment(1.0);
        assert_eq!(i, 1);
        assert!(p < 1e-4);
    }

    #[test]
    fn timeline_wraps_the_clock() {
        let tl = Timeline::from_durations(&[2.0, 1.0]);
        let (i, p) = tl.segment(3.5);
        assert_eq!(i, 0);
        assert!((p - 0.25).abs() < 1e-4);

        let (i, _) = tl.segment(-0.5);
        assert_eq!(i, 1);
    }
}
