//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{Vector2, Vector4};
use num_traits::Float;

/// Map a value from one range into another.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where 
    T: Float 
{
    target_range.0 
        + ((value - source_range.0) 
        * (target_range.1 - target_range.0) 
        / (source_range.1 - source_range.0))
}

/// Limit a value to the range `[min, max]`.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T 
where
    T: Float
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
/// 
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()`, violating the mathematical definition, if
/// `self` is much smaller than `rhs.abs()` in magnitude and `self < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::from(0.0).unwrap() { r + rhs.abs() } else { r }
}

/// Wrap an angle into the range [0, 2pi).
pub fn wrap_2pi<T>(value: T) -> T
where
    T: Float
{
    rem_euclid(value, T::from(std::f64::consts::TAU).unwrap())
}

/// Scale a 2D vector back onto the unit circle if it lies outside it.
///
/// Vectors with a norm of 1 or less are returned unchanged, this never scales
/// a vector up.
pub fn unit_circle_clamp(vec: Vector2<f64>) -> Vector2<f64> {
    let norm = vec.norm();

    if norm > 1.0 {
        vec / norm
    }
    else {
        vec
    }
}

/// Scale all elements of a vector by the same factor so that the largest
/// magnitude element is at most 1.
///
/// If no element exceeds 1 in magnitude the vector is returned unchanged. The
/// ratios between the elements are always preserved.
pub fn group_normalise(vec: Vector4<f64>) -> Vector4<f64> {
    let max = vec.amax();

    if max > 1.0 {
        vec / max
    }
    else {
        vec
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lin_map() {
        assert_eq!(lin_map((-1f64, 1f64), (0f64, 1f64), -1f64), 0f64);
        assert_eq!(lin_map((-1f64, 1f64), (0f64, 1f64), 0f64), 0.5f64);
        assert_eq!(lin_map((-1f64, 1f64), (0f64, 1f64), 1f64), 1f64);
    }

    #[test]
    fn test_wrap_2pi() {
        const TAU: f64 = std::f64::consts::TAU;
        const PI: f64 = std::f64::consts::PI;

        assert_eq!(wrap_2pi(1f64), 1f64);
        assert!((wrap_2pi(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-12);
        assert!((wrap_2pi(TAU + 1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unit_circle_clamp() {
        // Inside the circle nothing changes, never scaled up
        let v = unit_circle_clamp(Vector2::new(0.3, 0.4));
        assert_eq!(v, Vector2::new(0.3, 0.4));

        // Outside is scaled onto the circle keeping direction
        let v = unit_circle_clamp(Vector2::new(3.0, 4.0));
        assert!((v.norm() - 1.0).abs() < 1e-12);
        assert!((v[0] - 0.6).abs() < 1e-12);
        assert!((v[1] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_group_normalise() {
        let v = group_normalise(Vector4::new(0.5, -0.25, 0.0, 1.0));
        assert_eq!(v, Vector4::new(0.5, -0.25, 0.0, 1.0));

        let v = group_normalise(Vector4::new(2.0, -4.0, 1.0, 0.0));
        assert_eq!(v, Vector4::new(0.5, -1.0, 0.25, 0.0));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(&2f64, &-1f64, &1f64), 1f64);
        assert_eq!(clamp(&-2f64, &-1f64, &1f64), -1f64);
        assert_eq!(clamp(&0.25f64, &-1f64, &1f64), 0.25f64);
    }
}
