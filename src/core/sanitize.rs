//! Numeric sanitization for untrusted combat inputs.
//!
//! Every number that enters the resolver passes through one of these
//! helpers. None of them panic or fail: non-finite values collapse to a
//! neutral default and negative values clamp to zero where a quantity
//! cannot be negative (health, shield, stacks, damage).

/// Clamp to a finite, non-negative value. `NaN` and infinities become `0.0`.
#[must_use]
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Like [`non_negative`], treating a missing value as `0.0`.
#[must_use]
pub fn non_negative_or_zero(value: Option<f64>) -> f64 {
    value.map_or(0.0, non_negative)
}

/// Return `value` if it is finite, otherwise `default`.
#[must_use]
pub fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        default
    }
}

/// Sanitize an optional multiplier.
///
/// Missing or non-finite multipliers are neutral (`1.0`); negative ones
/// clamp to `0.0`.
#[must_use]
pub fn multiplier(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.max(0.0),
        _ => 1.0,
    }
}

/// Sanitize an optional additive bonus. Missing or non-finite is `0.0`.
/// Sign is preserved.
#[must_use]
pub fn bonus(value: Option<f64>) -> f64 {
    value.map_or(0.0, |v| finite_or(v, 0.0))
}

/// Clamp the result of arithmetic on sanitized values to `[0, f64::MAX]`.
///
/// Products of large finite inputs can overflow; they saturate instead of
/// becoming infinite. `NaN` becomes `0.0`.
#[must_use]
pub fn saturating(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, f64::MAX)
    }
}

/// Clamp into the closed unit interval. Non-finite becomes `0.0`.
#[must_use]
pub fn unit_interval(value: f64) -> f64 {
    finite_or(value, 0.0).clamp(0.0, 1.0)
}
