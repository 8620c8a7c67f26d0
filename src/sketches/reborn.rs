//! "What if I reborned" — a stickman walks into the path of a truck, the
//! screen cuts to black, and he wakes up as a slime.
//!
//! Three scenes on one looping timeline: street (with motion-blurred truck
//! and impact shake), fade to black, slime world. Film grain is requested
//! for the street scene only; the slime scene stays clean so its outline
//! doesn't shimmer.

use super::{Sketch, Timeline};
use crate::display::{Color, PixelCanvas};
use crate::util::{ease_in_out_sine, ease_out_quad, lerp_color};
use std::f32::consts::{PI, TAU};

const STREET_SECS: f32 = 2.0;
const FADE_SECS: f32 = 1.0;
const SLIME_SECS: f32 = 5.0;

const SEG_STREET: usize = 0;
const SEG_FADE: usize = 1;

const SLIME_BASE_RX: f32 = 130.0;
const SLIME_BASE_RY: f32 = 110.0;
/// Low-pass factor for the breathing radii; smaller is smoother
const RADII_SMOOTHING: f32 = 0.25;

const DROPLET_COUNT: usize = 16;

/// Distant skyline silhouette, closed against the road horizon
const SKYLINE_FAR: [(i32, i32); 12] = [
    (0, 360),
    (80, 300),
    (120, 330),
    (200, 280),
    (240, 340),
    (320, 310),
    (380, 290),
    (460, 320),
    (520, 300),
    (600, 280),
    (600, 420),
    (0, 420),
];

/// Nearer skyline layer
const SKYLINE_NEAR: [(i32, i32); 13] = [
    (0, 390),
    (60, 340),
    (140, 350),
    (180, 330),
    (260, 360),
    (300, 340),
    (360, 355),
    (420, 340),
    (480, 360),
    (540, 335),
    (600, 350),
    (600, 420),
    (0, 420),
];

pub struct Reborn {
    timeline: Timeline,
    t: f32,
    // Temporally smoothed slime radii; the raw breathing targets round to
    // different pixels frame to frame and make the boundary shimmer
    rx_sm: f32,
    ry_sm: f32,
}

impl Reborn {
    pub fn new() -> Self {
        Self {
            timeline: Timeline::from_durations(&[STREET_SECS, FADE_SECS, SLIME_SECS]),
            t: 0.0,
            rx_sm: SLIME_BASE_RX,
            ry_sm: SLIME_BASE_RY,
        }
    }

    /// Shake offset near the moment of impact, applied to foreground
    /// objects only so the backdrop stays put
    fn impact_shake(u: f32) -> (i32, i32) {
        if u <= 0.85 {
            return (0, 0);
        }
        let k = (u - 0.85) / 0.15;
        let dx = ((60.0 * k).sin() * 8.0) as i32;
        let dy = ((50.0 * k).cos() * 6.0) as i32;
        (dx, dy)
    }

    fn scene_street(canvas: &mut PixelCanvas, u: f32) {
        let w = canvas.width() as i32;
        let h = canvas.height() as i32;

        // night-sky gradient
        let top = Color::rgb(20, 25, 40);
        let bottom = Color::rgb(5, 10, 15);
        for y in 0..h {
            let k = y as f32 / h as f32;
            canvas.hline(0, w - 1, y, lerp_color(top, bottom, k));
        }

        canvas.polygon_filled(&SKYLINE_FAR, Color::rgb(35, 45, 70));
        canvas.polygon_filled(&SKYLINE_NEAR, Color::rgb(25, 35, 55));

        // road
        canvas.polygon_filled(&[(0, 430), (w, 430), (w, h), (0, h)], Color::rgb(40, 40, 45));

        // dashed center line
        let dash = Color::argb(200, 220, 220, 140);
        let mut x = 0;
        while x < w {
            canvas.polygon_filled(&[(x, 510), (x + 50, 510), (x + 50, 520), (x, 520)], dash);
            x += 80;
        }

        let (shake_x, shake_y) = Self::impact_shake(u);

        // stickman walking in from the left
        let ground_y = 430;
        let sx = 100 + (180.0 * u) as i32;
        Self::draw_stickman(canvas, sx + shake_x, ground_y + shake_y);

        // truck closing in from the right, six motion-blur layers
        let truck_start = w + 120;
        let truck_end = sx + 10;
        let tx = truck_start + ((truck_end - truck_start) as f32 * u) as i32;
        for i in 0..6 {
            let off = i * 14;
            let alpha = (220.0 * 0.75_f32.powi(i)) as u8;
            Self::draw_truck(canvas, tx + off + shake_x, ground_y - 10 + shake_y, alpha);
        }
    }

    fn draw_stickman(canvas: &mut PixelCanvas, x: i32, ground_y: i32) {
        let head_r = 16;
        let head_y = ground_y - 88;

        canvas.circle_filled(x, head_y, head_r, Color::rgb(240, 230, 220));

        // torso and legs
        let limb = Color::rgb(235, 235, 235);
        canvas.thick_line(x, head_y + head_r, x, ground_y - 30, 1, limb);
        canvas.thick_line(x, ground_y - 30, x - 22, ground_y, 1, limb);
        canvas.thick_line(x, ground_y - 30, x + 22, ground_y, 1, limb);

        // arms swing on curves
        let shoulder_y = head_y + head_r + 10;
        canvas.quadratic_bezier(x, shoulder_y, x - 18, ground_y - 70, x - 34, ground_y - 60, limb);
        canvas.quadratic_bezier(x, shoulder_y, x + 18, ground_y - 70, x + 34, ground_y - 60, limb);
    }

    fn draw_truck(canvas: &mut PixelCanvas, x: i32, y: i32, alpha: u8) {
        const BODY: Color = Color::rgb(70, 130, 180);
        const CABIN: Color = Color::rgb(100, 170, 210);
        const GLASS: Color = Color::rgb(200, 230, 250);
        const TIRE: Color = Color::rgb(40, 40, 40);
        const HUB: Color = Color::rgb(120, 120, 120);

        canvas.polygon_filled(
            &[(x, y - 60), (x + 180, y - 60), (x + 180, y), (x, y)],
            BODY.with_alpha(alpha),
        );
        canvas.polygon_filled(
            &[(x + 130, y - 100), (x + 180, y - 100), (x + 180, y - 60), (x + 130, y - 60)],
            CABIN.with_alpha(alpha),
        );
        canvas.polygon_filled(
            &[(x + 140, y - 95), (x + 175, y - 95), (x + 175, y - 70), (x + 140, y - 70)],
            GLASS.with_alpha((alpha as f32 * 0.7) as u8),
        );

        for wx in [x + 30, x + 100, x + 170] {
            canvas.circle_filled(wx, y, 22, TIRE.with_alpha(alpha));
            canvas.circle_filled(wx, y, 9, HUB.with_alpha(alpha));
        }
    }

    fn scene_slime(&self, canvas: &mut PixelCanvas, u: f32) {
        let w = canvas.width() as i32;
        let h = canvas.height() as i32;

        // oceanic gradient
        let top = Color::rgb(5, 15, 10);
        let bottom = Color::rgb(20, 80, 60);
        for y in 0..h {
            let k = y as f32 / h as f32;
            canvas.hline(0, w - 1, y, lerp_color(top, bottom, k));
        }

        // soft caustic stripes near the surface
        for i in 0..8 {
            let ph = i as f32 * 0.6 + u * 2.0;
            let yy = (h as f32 * (0.1 + 0.1 * ph.sin())) as i32;
            let sway = (10.0 * (ph + 1.3).sin()) as i32;
            canvas.thick_line(0, yy, w, yy + sway, 1, Color::argb(35, 30, 70, 55));
        }

        let cx = w / 2;
        let cy = h / 2 + 30;
        let rx = self.rx_sm.round() as i32;
        let ry = self.ry_sm.round() as i32;

        Self::slime_body(canvas, cx, cy, rx, ry);

        // eyes
        let ex = (rx as f32 * 0.40) as i32;
        let ey_off = (-(ry as f32) * 0.18) as i32;
        let e_rx = (rx as f32 * 0.26) as i32;
        let e_ry = (ry as f32 * 0.20) as i32;
        let eye = Color::rgb(30, 40, 45);
        canvas.ellipse_filled(cx - ex, cy + ey_off, e_rx, e_ry, eye);
        canvas.ellipse_filled(cx + ex, cy + ey_off, e_rx, e_ry, eye);

        // pulsing highlights
        let hx = cx - ex - (e_rx as f32 * 0.15) as i32;
        let hy = cy + ey_off - (e_ry as f32 * 0.15) as i32;
        let hr = 9 + (3.0 * (u * 15.0).sin()) as i32;
        let shine = Color::argb(200, 255, 255, 255);
        canvas.circle_filled(hx, hy, hr, shine);
        canvas.circle_filled(hx + 2 * ex, hy, hr, shine);

        // smile
        let mw = (rx as f32 * (0.5 + 0.15 * (u * 4.0 * PI).sin())) as i32;
        let mh = (ry as f32 * 0.18) as i32;
        let mouth_y = cy + (ry as f32 * 0.3) as i32;
        canvas.quadratic_bezier(
            cx - mw / 2,
            mouth_y,
            cx,
            mouth_y + mh,
            cx + mw / 2,
            mouth_y,
            Color::rgb(40, 70, 45),
        );

        // droplets orbiting the body
        for i in 0..DROPLET_COUNT {
            let ang = i as f32 * (TAU / DROPLET_COUNT as f32) + u * 6.0;
            let px = cx + ((rx + 18) as f32 * ang.cos()) as i32;
            let py = cy + ((ry + 18) as f32 * ang.sin()) as i32;
            let pr = 6 + (3.0 * (u * 15.0 + i as f32).sin()) as i32;
            let al = (110.0 + 110.0 * (u * 15.0 + i as f32).sin()).clamp(0.0, 255.0) as u8;
            canvas.circle_filled(px, py, pr, Color::argb(al, 180, 250, 200));
        }
    }

    /// Radially shaded body with an off-center inner light and a rim stroke
    fn slime_body(canvas: &mut PixelCanvas, cx: i32, cy: i32, rx: i32, ry: i32) {
        let rxf = rx as f32;
        let ryf = ry as f32;
        for yy in -ry..=ry {
            let y_term = (yy * yy) as f32 / (ryf * ryf);
            if y_term > 1.0 {
                continue;
            }
            let half = (rxf * (1.0 - y_term).sqrt()).floor() as i32;
            for xx in -half..=half {
                let nx = xx as f32 / rxf;
                let ny = yy as f32 / ryf;
                let d = (nx * nx + ny * ny).sqrt();
                let base_r = 20.0 + 50.0 * (1.0 - d);
                let base_g = 50.0 + 130.0 * (1.0 - d);
                let base_b = 30.0 + 110.0 * (1.0 - d);

                let lx = (xx as f32 - rxf * 0.2) / (rxf * 1.2);
                let ly = (yy as f32 - ryf * 0.3) / (ryf * 1.2);
                let light = (-(lx * lx + ly * ly) * 2.5).exp();

                let col = Color::rgb(
                    (base_r + 30.0 * light).clamp(0.0, 255.0) as u8,
                    (base_g + 40.0 * light).clamp(0.0, 255.0) as u8,
                    (base_b + 35.0 * light).clamp(0.0, 255.0) as u8,
                );
                canvas.blend_pixel(cx + xx, cy + yy, col, 230);
            }
        }
        canvas.ellipse_outline(cx, cy, rx, ry, Color::argb(180, 180, 255, 220));
    }
}

impl Default for Reborn {
    fn default() -> Self {
        Self::new()
    }
}

impl Sketch for Reborn {
    fn update(&mut self, dt: f32) {
        self.t = self.timeline.wrap(self.t + dt);

        let (seg, u) = self.timeline.segment(self.t);
        if seg > SEG_FADE {
            // breathing targets, low-passed before they become pixel radii
            let pulse = 0.08 * (u * PI * 6.0).sin();
            let rx_target = SLIME_BASE_RX * (1.0 + pulse + 0.25 * ease_in_out_sine(u));
            let ry_target = SLIME_BASE_RY * (1.0 - pulse + 0.12 * ease_out_quad(u));
            self.rx_sm += RADII_SMOOTHING * (rx_target - self.rx_sm);
            self.ry_sm += RADII_SMOOTHING * (ry_target - self.ry_sm);
        }
    }

    fn render(&self, canvas: &mut PixelCanvas) {
        let (seg, u) = self.timeline.segment(self.t);
        let w = canvas.width();
        let h = canvas.height();

        match seg {
            SEG_STREET => {
                Self::scene_street(canvas, u);
            },
            SEG_FADE => {
                // black rises over the instant of impact
                Self::scene_street(canvas, 1.0);
                canvas.fill_rect(0, 0, w, h, Color::argb((255.0 * u) as u8, 0, 0, 0));
            },
            _ => {
                self.scene_slime(canvas, u);
            },
        }
    }

    fn name(&self) -> &str {
        "What If I Reborned"
    }

    fn wants_grain(&self) -> bool {
        self.timeline.segment(self.t).0 == SEG_STREET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_scene_without_panicking() {
        let mut canvas = PixelCanvas::new(600, 600).unwrap();
        for t in [0.5_f32, 1.9, 2.1, 4.0, 7.5] {
            let mut sketch = Reborn::new();
            sketch.update(t);
            sketch.render(&mut canvas);
            let first = canvas.buffer_view()[0];
            assert!(
                canvas.buffer_view().iter().any(|&p| p != first),
                "uniform frame at t={}",
                t
            );
        }
    }

    #[test]
    fn clock_wraps_at_loop_end() {
        let mut sketch = Reborn::new();
        sketch.update(STREET_SECS + FADE_SECS + SLIME_SECS + 0.25);
        assert!((sketch.t - 0.25).abs() < 1e-3);
    }
}
