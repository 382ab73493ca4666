use serde::Serialize;

const HALF_SWEEP_DEGREES: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    /// -90 is fully bearish, +90 fully bullish.
    pub needle_degrees: f64,
    pub caption: String,
    pub tone: Tone,
}

/// Gauge for a sentiment strength. The caption follows the sign of the strength, the needle
/// is pinned to the dial for values outside [-1, 1].
pub fn gauge(strength: f64) -> Gauge {
    // Folds -0.0 into 0.0 so the caption never reads "-0.00".
    let strength = strength + 0.0;
    let (label, tone) = if strength > 0.0 {
        ("Bullish", Tone::Positive)
    } else if strength < 0.0 {
        ("Bearish", Tone::Negative)
    } else {
        ("Neutral", Tone::Neutral)
    };

    let needle = if strength.is_nan() {
        0.0
    } else {
        strength.clamp(-1.0, 1.0) * HALF_SWEEP_DEGREES
    };

    Gauge {
        needle_degrees: needle,
        caption: format!("{label} ({strength:.2})"),
        tone,
    }
}
