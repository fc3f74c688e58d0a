//! Closed-form probability-of-detection curves.
//!
//! Every function here returns a value in [0, 1] and never NaN.  Rates are
//! leak rates in g/s unless stated otherwise; a rate ≤ 0 (or non-finite)
//! always has PoD 0.

use ldar_core::SimRng;

/// g/s → kg/h.
pub const GS_TO_KGH: f64 = 3.6;
/// m/s → km/h.
pub const MS_TO_KMH: f64 = 3.6;
/// g/s → g/h.
pub const GS_TO_GH: f64 = 3_600.0;

/// Default mean and standard deviation of the OGI curve steepness `k`.
pub const OGI_K_MEAN: f64 = 4.9;
pub const OGI_K_SD: f64 = 0.3;

#[inline]
fn sanitize(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

/// `PoD(r) = 1 / (1 + exp(a − b·r))`, with PoD(r ≤ 0) = 0.
///
/// `r` is in whatever unit `a` and `b` were fitted against (kg/h, or kg/h
/// per km/h of wind for the wind-normalized curve).
pub fn logistic_pod(a: f64, b: f64, r: f64) -> f64 {
    if !(r > 0.0) || !r.is_finite() {
        return 0.0;
    }
    sanitize(1.0 / (1.0 + (a - b * r).exp()))
}

/// Rate normalized by wind: `(rate g/s → kg/h) / (wind m/s → km/h)`.
///
/// Returns `None` for zero, negative or missing wind; callers treat that as
/// PoD 0.
pub fn wind_normalized_rate(rate_gs: f64, wind_ms: Option<f64>) -> Option<f64> {
    match wind_ms {
        Some(w) if w > 0.0 && w.is_finite() => Some(rate_gs * GS_TO_KGH / (w * MS_TO_KMH)),
        _ => None,
    }
}

/// OGI camera curve on log10 of the rate in g/h:
///
/// `PoD = 1 / (1 + exp(−k·(log10(rate·3600) − log10(x0·3600))))`
///
/// `x0_gs` is the curve midpoint in g/s.  A midpoint ≤ 0 means every
/// positive rate sits above the curve, so PoD is 1.
pub fn fixed_curve_pod(k: f64, x0_gs: f64, rate_gs: f64) -> f64 {
    if !(rate_gs > 0.0) || !rate_gs.is_finite() {
        return 0.0;
    }
    if !(x0_gs > 0.0) {
        return 1.0;
    }
    let x = (rate_gs * GS_TO_GH).log10();
    let x0 = (x0_gs * GS_TO_GH).log10();
    sanitize(1.0 / (1.0 + (-k * (x - x0)).exp()))
}

/// Apply quantification error: `rate × max(0, N(1, qe))`.
///
/// `qe == 0` returns the rate unchanged without drawing.
pub fn measured_rate(rate: f64, qe: f64, rng: &mut SimRng) -> f64 {
    if qe <= 0.0 {
        return rate;
    }
    rate * rng.normal(1.0, qe).max(0.0)
}
