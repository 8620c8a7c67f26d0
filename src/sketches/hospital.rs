//! Hospital dream sequence: exterior establishing shot, cut to black, waking
//! up in a ward, a doctor walking in, a wordless conversation, and a dash
//! for the window.
//!
//! Dialogue is drawn as speech bubbles with dot glyphs; there is no text
//! rendering anywhere in the engine.

use super::{Sketch, Timeline};
use crate::display::{Color, PixelCanvas};

const LINE: Color = Color::rgb(20, 20, 20);
const ACCENT: Color = Color::rgb(220, 60, 60);
const BLACK: Color = Color::rgb(0, 0, 0);
const SKY: Color = Color::rgb(210, 235, 255);
const ROOM: Color = Color::rgb(245, 245, 248);
const HERO: Color = Color::rgb(20, 20, 20);
const DOCTOR: Color = Color::rgb(30, 30, 30);

const SEG_EXTERIOR: usize = 0;
const SEG_BLACKOUT: usize = 1;
const SEG_HANDS: usize = 2;
const SEG_SIT_UP: usize = 3;
const SEG_DOOR: usize = 4;
const SEG_TALK: usize = 5;

pub struct HospitalDream {
    timeline: Timeline,
    t: f32,
}

impl HospitalDream {
    pub fn new() -> Self {
        // scene thresholds at 1.0, 1.6, 2.6, 3.8, 5.0, 6.2, 7.4 seconds
        Self {
            timeline: Timeline::from_durations(&[1.0, 0.6, 1.0, 1.2, 1.2, 1.2, 1.2]),
            t: 0.0,
        }
    }

    fn rect_outline(canvas: &mut PixelCanvas, x: i32, y: i32, w: i32, h: i32, color: Color) {
        canvas.line(x, y, x + w, y, color);
        canvas.line(x + w, y, x + w, y + h, color);
        canvas.line(x + w, y + h, x, y + h, color);
        canvas.line(x, y + h, x, y, color);
    }

    fn window_grid(
        canvas: &mut PixelCanvas,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        rows: i32,
        cols: i32,
        color: Color,
    ) {
        Self::rect_outline(canvas, x, y, w, h, color);
        for c in 1..cols {
            canvas.line(x + c * w / cols, y, x + c * w / cols, y + h, color);
        }
        for r in 1..rows {
            canvas.line(x, y + r * h / rows, x + w, y + r * h / rows, color);
        }
    }

    fn hospital_exterior(canvas: &mut PixelCanvas) {
        let w = canvas.width() as i32;
        canvas.clear(SKY);
        canvas.line(0, 500, w, 500, LINE);

        // building, entrance, banner
        Self::rect_outline(canvas, 120, 220, 360, 260, LINE);
        Self::rect_outline(canvas, 270, 360, 60, 120, LINE);
        Self::rect_outline(canvas, 220, 320, 160, 20, LINE);

        for r in 0..2 {
            for c in 0..3 {
                let wx = 150 + c * 110;
                let wy = 250 + r * 80;
                Self::window_grid(canvas, wx, wy, 80, 50, 2, 3, LINE);
            }
        }

        // cross sign inside a circle
        canvas.circle_outline(300, 260, 30, LINE);
        canvas.line(285, 260, 315, 260, ACCENT);
        canvas.line(300, 245, 300, 275, ACCENT);
    }

    fn room_background(canvas: &mut PixelCanvas) {
        let w = canvas.width() as i32;
        canvas.clear(ROOM);
        canvas.line(0, 420, w, 420, LINE);

        // window on the left wall
        Self::window_grid(canvas, 40, 60, 150, 120, 2, 2, LINE);

        // bed frame and headboard
        Self::rect_outline(canvas, 230, 350, 260, 40, LINE);
        Self::rect_outline(canvas, 220, 300, 220, 20, LINE);

        // IV stand with a wheel
        canvas.line(510, 240, 510, 420, LINE);
        canvas.line(480, 240, 540, 240, LINE);
        canvas.circle_outline(510, 430, 6, LINE);
    }

    /// Stick figure with Bezier arms. `arm_lift` raises the arm control
    /// points, `sit` folds the legs forward, `scale` sizes the whole figure.
    fn stick_person(
        canvas: &mut PixelCanvas,
        cx: i32,
        cy: i32,
        arm_lift: f32,
        sit: f32,
        scale: f32,
        color: Color,
    ) {
        let s = |v: f32| (v * scale) as i32;

        canvas.circle_outline(cx, cy - s(28.0), s(12.0), color);
        canvas.line(cx, cy - s(16.0), cx, cy + s(16.0), color);
        canvas.line(cx, cy + s(16.0), cx - s(12.0), cy + s(30.0), color);
        canvas.line(cx, cy + s(16.0), cx + s(12.0), cy + s(30.0), color);

        let ax0 = cx;
        let ay0 = cy - s(10.0);
        let lift = s(10.0) + arm_lift as i32;
        canvas.quadratic_bezier(ax0, ay0, ax0 - s(12.0), ay0 - lift, cx - s(18.0), cy + s(5.0), color);
        canvas.quadratic_bezier(ax0, ay0, ax0 + s(12.0), ay0 - lift, cx + s(18.0), cy + s(5.0), color);

        if sit > 0.0 {
            let knee_y = cy + s(16.0);
            let f = (10.0 * scale * sit) as i32;
            canvas.line(cx, knee_y, cx + f, knee_y, color);
            canvas.line(cx + f, knee_y, cx + f + s(12.0), knee_y, color);
        }
    }

    /// Elliptical bubble with a curved tail and three dots inside
    fn speech_bubble(
        canvas: &mut PixelCanvas,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        tail_dx: i32,
        tail_dy: i32,
    ) {
        canvas.ellipse_outline(x + w / 2, y + h / 2, w / 2, h / 2, LINE);

        let tx0 = x + (3 * w) / 4;
        let ty0 = y + h;
        let tx2 = tx0 + tail_dx;
        let ty2 = ty0 + tail_dy;
        canvas.quadratic_bezier(tx0, ty0, tx0 + tail_dx / 2, ty0 + tail_dy / 2, tx2, ty2, LINE);
        canvas.line(tx2, ty2, tx2 - 4, ty2 - 2, LINE);
        canvas.line(tx2, ty2, tx2 - 2, ty2 - 4, LINE);

        let cx = x + w / 2;
        let cy = y + h / 2;
        canvas.circle_outline(cx - 20, cy, 3, LINE);
        canvas.circle_outline(cx, cy, 3, LINE);
        canvas.circle_outline(cx + 20, cy, 3, LINE);
    }

    /// Door pivoting at the left jamb, with a Bezier swing arc
    fn opening_door(canvas: &mut PixelCanvas, angle: f32) {
        let px = 100;
        let py_top = 260;
        let py_bot = 420;
        let door_w = 80;

        let reach = (door_w as f32 * angle.cos()).round() as i32;
        let drop = (door_w as f32 * angle.sin()).round() as i32;
        let x_edge = px + reach;
        let y_top = py_top - drop;
        let y_bot = py_bot - drop;

        canvas.line(px, py_top, px, py_bot, LINE);
        canvas.line(px, py_top, x_edge, y_top, LINE);
        canvas.line(px, py_bot, x_edge, y_bot, LINE);
        canvas.line(x_edge, y_top, x_edge, y_bot, LINE);

        canvas.quadratic_bezier(px + door_w, py_top, px + door_w, py_top - 20, x_edge, y_top, LINE);
    }
}

impl Default for HospitalDream {
    fn default() -> Self {
        Self::new()
    }
}

impl Sketch for HospitalDream {
    fn update(&mut self, dt: f32) {
        self.t = self.timeline.wrap(self.t + dt);
    }

    fn render(&self, canvas: &mut PixelCanvas) {
        let (seg, u) = self.timeline.segment(self.t);
        let door_open = 70.0_f32.to_radians();

        match seg {
            SEG_EXTERIOR => {
                Self::hospital_exterior(canvas);
            },
            SEG_BLACKOUT => {
                canvas.clear(BLACK);
                Self::speech_bubble(canvas, 200, 380, 200, 80, -40, 30);
            },
            SEG_HANDS => {
                Self::room_background(canvas);
                let arm_lift = 30.0 * u * u;
                Self::stick_person(canvas, 330, 340, arm_lift, 0.0, 1.2, HERO);
            },
            SEG_SIT_UP => {
                Self::room_background(canvas);
                let rise = (15.0 * u) as i32;
                Self::stick_person(canvas, 330, 340 - rise, 10.0, u, 1.2, HERO);
            },
            SEG_DOOR => {
                Self::room_background(canvas);
                Self::opening_door(canvas, u * door_open);
                // doctor walks from the doorway to the bedside
                let dx = (u * 220.0) as i32;
                Self::stick_person(canvas, 520 - dx, 340, 5.0, 0.0, 1.0, DOCTOR);
            },
            SEG_TALK => {
                Self::room_background(canvas);
                Self::opening_door(canvas, door_open);
                Self::stick_person(canvas, 300, 325, 6.0, 1.0, 1.2, HERO);
                Self::stick_person(canvas, 320, 340, 5.0, 0.0, 1.0, DOCTOR);
                Self::speech_bubble(canvas, 340, 230, 180, 70, -30, 30);
                Self::speech_bubble(canvas, 180, 260, 200, 80, 20, 40);
            },
            _ => {
                if u < 0.6 {
                    Self::room_background(canvas);
                    Self::opening_door(canvas, door_open);
                    // sprint toward the window, arcing upward
                    let x = (300.0 - 300.0 * u * 1.2) as i32;
                    let y = 340 - (120.0 * u * u) as i32;
                    Self::stick_person(canvas, x, y, 0.0, 0.0, 1.1, HERO);
                    // faint motion trail
                    canvas.circle_outline(x - 20, y - 30, 8, Color::rgb(180, 180, 180));
                } else {
                    canvas.clear(BLACK);
                }
            },
        }
    }

    fn name(&self) -> &str {
        "Hospital Dream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_scene_without_panicking() {
        let mut canvas = PixelCanvas::new(600, 600).unwrap();
        for t in [0.5_f32, 1.3, 2.0, 3.0, 4.5, 5.5, 6.5, 7.3] {
            let mut sketch = HospitalDream::new();
            sketch.update(t);
            sketch.render(&mut canvas);
        }
    }

    #[test]
    fn scene_content_is_not_uniform() {
        let mut canvas = PixelCanvas::new(600, 600).unwrap();
        // one representative t per visible scene
        for t in [0.5_f32, 1.3, 2.0, 3.0, 4.5, 5.5, 6.5] {
            let mut sketch = HospitalDream::new();
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
}
