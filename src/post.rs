//! Full-buffer post-processing passes.
//!
//! These run after all shape drawing for a frame and touch the canvas only
//! through its public accessors, so the drawing primitives stay testable in
//! isolation.

use crate::display::{Color, PixelCanvas};
use crate::util::Rng;

/// Peak darkening alpha at the canvas corners
const VIGNETTE_ALPHA: f32 = 180.0;
/// Falloff exponent; higher keeps more of the center clean
const VIGNETTE_POWER: f32 = 2.2;

/// Darken toward the canvas edges. The center pixel is untouched.
pub fn vignette(canvas: &mut PixelCanvas) {
    let w = canvas.width() as i32;
    let h = canvas.height() as i32;
    let cx = w / 2;
    let cy = h / 2;
    let max_d = ((cx * cx + cy * cy) as f32).sqrt();

    for y in 0..h {
        for x in 0..w {
            let dx = (x - cx) as f32;
            let dy = (y - cy) as f32;
            let d = (dx * dx + dy * dy).sqrt() / max_d;
            let a = (VIGNETTE_ALPHA * d.powf(VIGNETTE_POWER)) as u8;
            canvas.blend_pixel(x, y, Color::rgb(0, 0, 0), a);
        }
    }
}

/// Maximum per-channel brightness perturbation
const GRAIN_AMPLITUDE: i32 = 10;

/// Sprinkle film grain: perturb `width*height/strength` randomly chosen
/// pixels by up to +-10 per channel. Deterministic for a given seed, so a
/// frame's grain is reproducible. `strength == 0` disables the pass.
pub fn film_grain(canvas: &mut PixelCanvas, seed: u64, strength: u32) {
    if strength == 0 {
        return;
    }
    let w = canvas.width() as i32;
    let h = canvas.height() as i32;
    let count = (canvas.width() * canvas.height() / strength) as usize;

    let mut rng = Rng::new(seed);
    for _ in 0..count {
        let x = rng.range_i32(0, w - 1);
        let y = rng.range_i32(0, h - 1);
        let k = rng.range_i32(-GRAIN_AMPLITUDE, GRAIN_AMPLITUDE);
        if let Some(px) = canvas.get_pixel(x, y) {
            let bump = |c: u8| (c as i32 + k).clamp(0, 255) as u8;
            canvas.set_pixel(x, y, Color::argb(px.a, bump(px.r), bump(px.g), bump(px.b)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_canvas() -> PixelCanvas {
        let mut c = PixelCanvas::new(32, 32).unwrap();
        c.clear(Color::rgb(128, 128, 128));
        c
    }

    #[test]
    fn vignette_spares_center_and_darkens_corners() {
        let mut c = gray_canvas();
        vignette(&mut c);
        assert_eq!(c.get_pixel(16, 16), Some(Color::rgb(128, 128, 128)));
        let corner = c.get_pixel(0, 0).unwrap();
        assert!(corner.r < 128 && corner.g < 128 && corner.b < 128);
    }

    #[test]
    fn film_grain_is_deterministic_per_seed() {
        let mut a = gray_canvas();
        let mut b = gray_canvas();
        film_grain(&mut a, 99, 10);
        film_grain(&mut b, 99, 10);
        assert_eq!(a.buffer_view(), b.buffer_view());
    }

    #[test]
    fn film_grain_zero_strength_is_noop() {
        let mut c = gray_canvas();
        let before = c.buffer_view().to_vec();
        film_grain(&mut c, 1, 0);
        assert_eq!(c.buffer_view(), before.as_slice());
    }

    #[test]
    fn film_grain_touches_bounded_pixel_count_and_keeps_alpha() {
        let mut c = gray_canvas();
        film_grain(&mut c, 5, 4);
        let mut changed = 0;
        for y in 0..32 {
            for x in 0..32 {
                let p = c.get_pixel(x, y).unwrap();
                assert_eq!(p.a, 255);
                if p != Color::rgb(128, 128, 128) {
                    changed += 1;
                }
            }
        }
        // at most one pixel per draw, and with 256 draws some must land
        assert!(changed > 0 && changed <= 256);
    }
}
