//! Composite trust score.
//!
//! trust_score = round(mean(D1..D6) × 20)
//!
//! All six domains weigh the same at this level. The mean of integer
//! subscores times 20 has a fractional part of 0, 1/3 or 2/3, so rounding
//! never meets a half-way tie.

use posture_core::constants::{DOMAIN_COUNT, TRUST_SCALE, TRUST_SCORE_MAX};

use super::types::DomainSubscores;

/// Compute the 0-100 trust score from subscores already clamped to 0-5.
pub fn compute_trust_score(subscores: &DomainSubscores) -> u8 {
    let mean = f64::from(subscores.sum()) / DOMAIN_COUNT as f64;
    let score = (mean * TRUST_SCALE).round();
    score.clamp(0.0, f64::from(TRUST_SCORE_MAX)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extremes() {
        assert_eq!(compute_trust_score(&DomainSubscores::new([0; 6])), 0);
        assert_eq!(compute_trust_score(&DomainSubscores::new([5; 6])), 100);
    }

    #[test]
    fn test_rounding_thirds() {
        // sum 1 -> 3.33
        assert_eq!(compute_trust_score(&DomainSubscores::new([1, 0, 0, 0, 0, 0])), 3);
        // sum 2 -> 6.67
        assert_eq!(compute_trust_score(&DomainSubscores::new([1, 1, 0, 0, 0, 0])), 7);
        // sum 25 -> 83.33
        assert_eq!(compute_trust_score(&DomainSubscores::new([5, 4, 4, 4, 4, 4])), 83);
        // sum 26 -> 86.67
        assert_eq!(compute_trust_score(&DomainSubscores::new([5, 5, 4, 4, 4, 4])), 87);
    }
}
