//! Confidence Scoring
//!
//! Lower bound of the Wilson score interval for a Bernoulli proportion. Used to
//! order comments so that a well-supported reply beats one with a lucky
//! handful of votes.

/// ~80% one-sided confidence.
const Z: f64 = 1.281;

/// Wilson lower bound for `positive` out of `positive + negative` votes.
///
/// Returns 0.0 when there are no votes at all: no evidence ranks lowest.
pub fn wilson_score(positive: u32, negative: u32) -> f64 {
    let n = f64::from(positive) + f64::from(negative);
    if n == 0.0 {
        return 0.0;
    }

    let phat = f64::from(positive) / n;
    let z2 = Z * Z;

    let bound = (phat + z2 / (2.0 * n)
        - Z * ((phat * (1.0 - phat) + z2 / (4.0 * n)) / n).sqrt())
        / (1.0 + z2 / n);

    // All-negative votes land on 0 up to rounding error.
    bound.clamp(0.0, 1.0)
}
