//! Standard normal distribution functions.

use statrs::function::erf::erfc;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Standard normal CDF Φ(x).
#[must_use]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

/// Standard normal PDF φ(x).
#[must_use]
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_norm_cdf_reference_points() {
        // statrs erfc is accurate to about 1e-12 away from the origin.
        assert_relative_eq!(norm_cdf(0.0), 0.5, epsilon = 1e-15);
        assert_relative_eq!(norm_cdf(1.96), 0.975_002_104_851_780, max_relative = 1e-11);
        assert_relative_eq!(norm_cdf(-1.0), 0.158_655_253_931_457, max_relative = 1e-11);
        assert_relative_eq!(norm_cdf(1.0) + norm_cdf(-1.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(norm_cdf(-8.0), 6.220_960_574_271_78e-16, max_relative = 1e-9);
    }

    #[test]
    fn test_norm_pdf() {
        assert_relative_eq!(norm_pdf(0.0), 0.398_942_280_401_433, epsilon = 1e-15);
        assert_relative_eq!(norm_pdf(1.5), norm_pdf(-1.5));
    }
}
