//! Temperature conversion primitives.
//!
//! Both conversions are total over the IEEE-754 doubles: there is no range
//! restriction, and NaN or infinite inputs propagate through the arithmetic
//! without special-casing.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

/// Converts a temperature in degrees Celsius to degrees Fahrenheit.
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Converts a temperature in degrees Fahrenheit to degrees Celsius.
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_points() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(fahrenheit_to_celsius(32.0), 0.0);
        assert_eq!(fahrenheit_to_celsius(212.0), 100.0);
    }

    #[test]
    fn negative_forty_is_its_own_image() {
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
        assert_eq!(fahrenheit_to_celsius(-40.0), -40.0);
    }

    #[test]
    fn below_absolute_zero_is_not_rejected() {
        // Pure arithmetic, not a physical-validity check.
        assert_eq!(celsius_to_fahrenheit(-300.0), -508.0);
    }

    #[test]
    fn round_trip() {
        let samples = [-273.15, -40.0, -1.5, 0.0, 0.1, 25.0, 36.6, 100.0, 451.0, 1e12];
        for celsius in samples {
            let back = fahrenheit_to_celsius(celsius_to_fahrenheit(celsius));
            // Rounding in the intermediate Fahrenheit value is dominated by
            // the +32 step for small magnitudes.
            let tolerance = celsius.abs().max(32.0) * f64::EPSILON * 8.0;
            assert!(
                (back - celsius).abs() <= tolerance,
                "round trip diverged for {celsius}: got {back}"
            );
        }
    }

    #[test]
    fn non_finite_values_propagate() {
        assert!(celsius_to_fahrenheit(f64::NAN).is_nan());
        assert!(fahrenheit_to_celsius(f64::NAN).is_nan());
        assert_eq!(celsius_to_fahrenheit(f64::INFINITY), f64::INFINITY);
        assert_eq!(fahrenheit_to_celsius(f64::NEG_INFINITY), f64::NEG_INFINITY);
    }

    #[test]
    fn deterministic_on_repeated_calls() {
        let c = 36.6;
        assert_eq!(celsius_to_fahrenheit(c).to_bits(), celsius_to_fahrenheit(c).to_bits());
    }
}
