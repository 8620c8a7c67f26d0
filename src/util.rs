//! Shared utilities

use crate::display::Color;

/// Simple deterministic RNG using xorshift64
/// Good for reproducible grain without external dependencies
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) } // Ensure non-zero
    }

    /// Get the next random u64
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Get a random i32 in [min, max]
    ///
    /// # Panics
    /// Panics in debug builds if `min > max`
    #[inline]
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max, "range_i32: min ({}) must be <= max ({})", min, max);
        if min >= max {
            return min;
        }
        let range = (max - min + 1) as u64;
        min + (self.next_u64() % range) as i32
    }
}

/// Linear interpolation between two opaque colors
#[inline]
pub fn lerp_color(c1: Color, c2: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
    Color::rgb(mix(c1.r, c2.r), mix(c1.g, c2.g), mix(c1.b, c2.b))
}

// ============================================================================
// Easing
// ============================================================================

/// Decelerating quadratic: fast start, soft landing
#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    t * (2.0 - t)
}

/// Smooth sine ramp from 0 to 1
#[inline]
pub fn ease_in_out_sine(t: f32) -> f32 {
    0.5 * (1.0 - (std::f32::consts::PI * t).cos())
}

// ============================================================================
// FPS Counter
// ============================================================================

use std::collections::VecDeque;
use std::time::Instant;

/// FPS counter with rolling average
pub struct FpsCounter {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    sample_count: usize,
}

impl FpsCounter {
    /// Create a new FPS counter with specified sample window
    pub fn new(sample_count: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: Instant::now(),
            sample_count,
        }
    }

    /// Call at the start of each frame to record timing
    /// Returns (delta_time, average_fps)
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }

        let avg_dt: f32 =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32;
        let avg_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };

        (dt, avg_fps)
    }

    /// Get the average frame time in milliseconds
    pub fn avg_frame_time_ms(&self) -> f32 {
        let avg_dt: f32 =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32;
        avg_dt * 1000.0
    }

    /// Get min/max FPS from sample window
    pub fn min_max_fps(&self) -> (f32, f32) {
        if self.frame_times.is_empty() {
            return (0.0, 0.0);
        }
        let min_dt = self
            .frame_times
            .iter()
            .cloned()
            .fold(f32::INFINITY, f32::min);
        let max_dt = self.frame_times.iter().cloned().fold(0.0, f32::max);
        let max_fps = if min_dt > 0.0 { 1.0 / min_dt } else { 0.0 };
        let min_fps = if max_dt > 0.0 { 1.0 / max_dt } else { 0.0 };
        (min_fps, max_fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_is_deterministic() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn rng_range_stays_in_bounds() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let v = rng.range_i32(-10, 10);
            assert!((-10..=10).contains(&v));
        }
    }

    #[test]
    fn easing_hits_endpoints() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert!(ease_in_out_sine(0.0).abs() < 1e-6);
        assert!((ease_in_out_sine(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn lerp_color_endpoints() {
        let a = Color::rgb(10, 20, 30);
        let b = Color::rgb(110, 120, 130);
        assert_eq!(lerp_color(a, b, 0.0), a);
        assert_eq!(lerp_color(a, b, 1.0), b);
        assert_eq!(lerp_color(a, b, 0.5), Color::rgb(60, 70, 80));
    }
}
