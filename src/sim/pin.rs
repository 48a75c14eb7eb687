//! Pin resolution: which slice sits under the fixed pin
//!
//! Slices are laid out clockwise starting with slice 0 centered under the pin.
//! Rotating the wheel by `k * slice_angle` degrees brings slice `k` under it.

use crate::consts::PIN_ANGLE_DEG;
use crate::normalize_degrees;

/// Angular width of one slice (degrees)
#[inline]
pub fn slice_angle(number_of_slices: usize) -> f32 {
    360.0 / number_of_slices as f32
}

/// Start and end angle (degrees) of a slice in wheel-local space
///
/// The start angle is larger than the end angle; slices sweep clockwise.
pub fn slice_span(index: usize, number_of_slices: usize) -> (f32, f32) {
    let width = slice_angle(number_of_slices);
    // Center slice 0 on the pin
    let offset = PIN_ANGLE_DEG + width / 2.0;
    let start = offset - index as f32 * width;
    let end = offset - (index + 1) as f32 * width;
    (start, end)
}

/// Index of the slice under the pin for a wheel rotated `z_rot` degrees
///
/// Returns `None` for an empty wheel or a non-finite rotation.
pub fn slice_at_pin(z_rot: f32, number_of_slices: usize) -> Option<usize> {
    if number_of_slices == 0 || !z_rot.is_finite() {
        return None;
    }
    let width = slice_angle(number_of_slices);

    // Shift by half a slice so slice centers line up with the pin
    let normalized = normalize_degrees(normalize_degrees(z_rot) + width / 2.0);

    let index = (normalized / width).floor() as usize % number_of_slices;
    Some(index)
}

/// Circular distance between two slice indices
pub fn slice_distance(a: usize, b: usize, number_of_slices: usize) -> usize {
    if number_of_slices == 0 {
        return 0;
    }
    let d = a.abs_diff(b) % number_of_slices;
    d.min(number_of_slices - d)
}
