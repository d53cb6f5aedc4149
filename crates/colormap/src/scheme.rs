//! Color schemes and multi-stop interpolation engine.

use serde::{Deserialize, Serialize};

/// RGB color as (r, g, b) with values in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attach an alpha channel, producing an RGBA quad.
    pub const fn with_alpha(self, a: u8) -> [u8; 4] {
        [self.r, self.g, self.b, a]
    }
}

/// A color stop: position in [0, 1] mapped to an RGB color.
#[derive(Debug, Clone, Copy)]
pub struct ColorStop {
    pub t: f64,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(t: f64, r: u8, g: u8, b: u8) -> Self {
        Self {
            t,
            color: Rgb::new(r, g, b),
        }
    }
}

/// Available color schemes.
///
/// Sequential: `Viridis`, `Plasma`, `Turbo`. Diverging: `Coolwarm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColorScheme {
    /// Dark purple -> teal -> yellow (perceptually uniform)
    #[default]
    Viridis,
    /// Dark blue -> pink -> yellow
    Plasma,
    /// Dark blue -> green -> dark red (rainbow-like)
    Turbo,
    /// Blue -> white -> red (divergent data)
    Coolwarm,
}

impl ColorScheme {
    /// All available schemes, useful for UI combo boxes.
    pub const ALL: &'static [ColorScheme] =
        &[Self::Viridis, Self::Plasma, Self::Turbo, Self::Coolwarm];

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Viridis => "Viridis",
            Self::Plasma => "Plasma",
            Self::Turbo => "Turbo",
            Self::Coolwarm => "Coolwarm",
        }
    }
}

// ─── Color stop definitions ────────────────────────────────────────────

const VIRIDIS_STOPS: &[ColorStop] = &[
    ColorStop::new(0.000, 68, 1, 84),
    ColorStop::new(0.125, 71, 44, 122),
    ColorStop::new(0.250, 59, 81, 139),
    ColorStop::new(0.375, 44, 113, 142),
    ColorStop::new(0.500, 33, 144, 141),
    ColorStop::new(0.625, 39, 173, 129),
    ColorStop::new(0.750, 92, 200, 99),
    ColorStop::new(0.875, 170, 220, 50),
    ColorStop::new(1.000, 253, 231, 37),
];

const PLASMA_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 13, 8, 135),
    ColorStop::new(0.25, 126, 3, 168),
    ColorStop::new(0.50, 204, 71, 120),
    ColorStop::new(0.75, 248, 149, 64),
    ColorStop::new(1.00, 240, 249, 33),
];

// Turbo breakpoints: four linear pieces over [0, .25, .5, .75, 1].
const TURBO_BREAKS: [(f64, Rgb); 5] = [
    (0.00, Rgb::new(48, 18, 59)),
    (0.25, Rgb::new(62, 154, 244)),
    (0.50, Rgb::new(90, 220, 100)),
    (0.75, Rgb::new(230, 183, 50)),
    (1.00, Rgb::new(122, 4, 3)),
];

// Coolwarm endpoints (Moreland's diverging map).
const COOLWARM_BLUE: Rgb = Rgb::new(59, 76, 192);
const COOLWARM_WHITE: Rgb = Rgb::new(221, 221, 221);
const COOLWARM_RED: Rgb = Rgb::new(180, 4, 38);

// ─── Interpolation engine ──────────────────────────────────────────────

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_color(c1: Rgb, c2: Rgb, t: f64) -> Rgb {
    Rgb::new(
        lerp(c1.r as f64, c2.r as f64, t).round() as u8,
        lerp(c1.g as f64, c2.g as f64, t).round() as u8,
        lerp(c1.b as f64, c2.b as f64, t).round() as u8,
    )
}

fn multi_stop(stops: &[ColorStop], t: f64) -> Rgb {
    if t <= 0.0 {
        return stops[0].color;
    }
    if t >= 1.0 {
        return stops[stops.len() - 1].color;
    }
    for i in 1..stops.len() {
        if t <= stops[i].t {
            let ratio = (t - stops[i - 1].t) / (stops[i].t - stops[i - 1].t);
            return lerp_color(stops[i - 1].color, stops[i].color, ratio);
        }
    }
    stops[stops.len() - 1].color
}

/// Turbo evaluated as four linear pieces over quarter sub-ranges.
fn turbo(t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    for w in TURBO_BREAKS.windows(2) {
        let (t0, c0) = w[0];
        let (t1, c1) = w[1];
        if t <= t1 {
            return lerp_color(c0, c1, (t - t0) / (t1 - t0));
        }
    }
    TURBO_BREAKS[4].1
}

/// Diverging blue -> white -> red around t = 0.5.
fn coolwarm(t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    if t <= 0.5 {
        lerp_color(COOLWARM_BLUE, COOLWARM_WHITE, t * 2.0)
    } else {
        lerp_color(COOLWARM_WHITE, COOLWARM_RED, (t - 0.5) * 2.0)
    }
}

/// Evaluate a color scheme at normalized position `t`.
///
/// `t` is clamped to [0, 1] before any lookup; the function is total and
/// deterministic for every finite input. Endpoint colors are fixed:
///
/// | scheme   | t = 0           | t = 1           |
/// |----------|-----------------|-----------------|
/// | Viridis  | (68, 1, 84)     | (253, 231, 37)  |
/// | Plasma   | (13, 8, 135)    | (240, 249, 33)  |
/// | Turbo    | (48, 18, 59)    | (122, 4, 3)     |
/// | Coolwarm | (59, 76, 192)   | (180, 4, 38)    |
pub fn evaluate(scheme: ColorScheme, t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    match scheme {
        ColorScheme::Viridis => multi_stop(VIRIDIS_STOPS, t),
        ColorScheme::Plasma => multi_stop(PLASMA_STOPS, t),
        ColorScheme::Turbo => turbo(t),
        ColorScheme::Coolwarm => coolwarm(t),
    }
}
