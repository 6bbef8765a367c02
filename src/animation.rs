//! Two-keyframe animations with CSS easing curves.
//!
//! An [`Animation`] is pure data: it is handed to [`crate::document::Document::animate`]
//! and sampled later by whoever renders the page. Before its delay has elapsed it holds
//! the first keyframe, after its duration it holds the last one (fill forwards).

/// A length in one of the units the site's keyframes use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f32),
    Vw(f32),
    Vh(f32),
}

impl Length {
    pub fn to_px(self, viewport: Viewport) -> f32 {
        match self {
            Length::Px(v) => v,
            Length::Vw(v) => v * viewport.width / 100.0,
            Length::Vh(v) => v * viewport.height / 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub translate_x: Length,
    pub translate_y: Length,
    pub scale: f32,
    pub opacity: f32,
}

impl Keyframe {
    pub fn new(translate_x: Length, translate_y: Length, scale: f32, opacity: f32) -> Self {
        Self { translate_x, translate_y, scale, opacity }
    }
}

/// Resolved state of an animated element at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseOut,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` onto eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

fn bezier(p1: f32, p2: f32, s: f32) -> f32 {
    // B(s) with P0 = 0 and P3 = 1
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    if t <= 0.0 || t >= 1.0 {
        return t;
    }

    // Solve x(s) = t with Newton, fall back to bisection when the slope flattens
    let mut s = t;
    for _ in 0..8 {
        let err = bezier(x1, x2, s) - t;
        if err.abs() < 1e-5 {
            return bezier(y1, y2, s);
        }
        let slope = bezier_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = t;
    for _ in 0..32 {
        let x = bezier(x1, x2, s);
        if (x - t).abs() < 1e-5 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    bezier(y1, y2, s)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub from: Keyframe,
    pub to: Keyframe,
    pub start_ms: u64,
    pub delay_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Animation {
    pub fn end_ms(&self) -> u64 {
        self.start_ms + self.delay_ms + self.duration_ms
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms >= self.end_ms()
    }

    /// Eased progress in `[0, 1]` at `now_ms`.
    pub fn progress(&self, now_ms: u64) -> f32 {
        let begin = self.start_ms + self.delay_ms;
        if now_ms <= begin {
            return 0.0;
        }
        if self.duration_ms == 0 || now_ms >= self.end_ms() {
            return 1.0;
        }
        let t = (now_ms - begin) as f32 / self.duration_ms as f32;
        self.easing.apply(t)
    }

    pub fn sample(&self, now_ms: u64, viewport: Viewport) -> Pose {
        let t = self.progress(now_ms);
        Pose {
            x: lerp(self.from.translate_x.to_px(viewport), self.to.translate_x.to_px(viewport), t),
            y: lerp(self.from.translate_y.to_px(viewport), self.to.translate_y.to_px(viewport), t),
            scale: lerp(self.from.scale, self.to.scale, t),
            opacity: lerp(self.from.opacity, self.to.opacity, t),
        }
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport { width: 1000.0, height: 500.0 };

    fn fly_in() -> Animation {
        Animation {
            from: Keyframe::new(Length::Vw(-100.0), Length::Px(0.0), 0.5, 0.0),
            to: Keyframe::new(Length::Vw(0.0), Length::Px(0.0), 1.0, 1.0),
            start_ms: 1000,
            delay_ms: 200,
            duration_ms: 1000,
            easing: Easing::CubicBezier(0.2, 0.8, 0.2, 1.0),
        }
    }

    #[test]
    fn holds_first_keyframe_until_delay_elapses() {
        let anim = fly_in();
        let pose = anim.sample(1100, VIEWPORT);
        assert_eq!(pose.x, -1000.0);
        assert_eq!(pose.opacity, 0.0);
        assert_eq!(pose.scale, 0.5);
    }

    #[test]
    fn holds_last_keyframe_after_end() {
        let anim = fly_in();
        assert_eq!(anim.end_ms(), 2200);
        assert!(anim.is_finished(2200));
        let pose = anim.sample(5000, VIEWPORT);
        assert_eq!(pose.x, 0.0);
        assert_eq!(pose.opacity, 1.0);
        assert_eq!(pose.scale, 1.0);
    }

    #[test]
    fn easing_curves_keep_endpoints_and_are_monotonic() {
        for easing in [
            Easing::Linear,
            Easing::EaseOut,
            Easing::CubicBezier(0.4, 0.0, 0.2, 1.0),
            Easing::CubicBezier(0.2, 0.8, 0.2, 1.0),
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            let mut last = 0.0;
            for step in 1..=20 {
                let v = easing.apply(step as f32 / 20.0);
                assert!(v + 1e-4 >= last, "{easing:?} not monotonic at step {step}");
                last = v;
            }
        }
    }

    #[test]
    fn ease_out_runs_ahead_of_linear() {
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert!(Easing::CubicBezier(0.2, 0.8, 0.2, 1.0).apply(0.3) > 0.6);
    }

    #[test]
    fn viewport_units_resolve_against_viewport() {
        assert_eq!(Length::Vw(50.0).to_px(VIEWPORT), 500.0);
        assert_eq!(Length::Vh(50.0).to_px(VIEWPORT), 250.0);
        assert_eq!(Length::Px(20.0).to_px(VIEWPORT), 20.0);
    }
}
