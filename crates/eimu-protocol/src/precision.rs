//! Output precision policy.
//!
//! Transport values are full-precision `f32`. Everything handed to callers is
//! widened to `f64` and rounded to [`DECIMAL_PLACES`] decimals.

/// Decimal places kept in every returned measurement.
pub const DECIMAL_PLACES: i32 = 6;

/// Round a raw wire value to six decimal places.
pub fn round_to_precision(value: f32) -> f64 {
    let scale = 10f64.powi(DECIMAL_PLACES);
    (f64::from(value) * scale).round() / scale
}

/// Interpret a wire value as an integer: rounded, then truncated toward zero.
pub fn to_integer(value: f32) -> i32 {
    round_to_precision(value).trunc() as i32
}
