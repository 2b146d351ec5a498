//! Interpolation-error scoring for candidate rectangles.
//!
//! A rectangle is acceptable when the interpolation of its four true corners
//! reproduces the true samples closely enough. The raw error is normalized
//! by signal energy so the score is unit-less and comparable across
//! brightness levels:
//!
//! ```text
//! raw = sum((t - i)^2) / sqrt(sum(t^2) * sum(i^2))
//! ```
//!
//! where `t` are the true and `i` the interpolated samples. Two
//! multiplicative penalties then disfavor elongated and very large
//! rectangles, both of which show up as visible blocking even when the raw
//! error is small:
//!
//! ```text
//! score = raw * (long_side / short_side)^aspect_exponent * (1 + area / size_scale)
//! ```
//!
//! The score never decreases when the raw error, the aspect ratio or the
//! area grows with the other two held fixed.

use crate::area::Rect;
use crate::error::CodecError;
use crate::interpolate::interpolate;
use crate::raster::Plane;

/// Tuning knobs for rectangle acceptance.
///
/// # Defaults
///
/// - `threshold`: 0.005
/// - `aspect_exponent`: 2.0
/// - `size_scale`: 4096.0 (a 64x64 block doubles its score)
///
/// # Example
///
/// ```
/// use cobi_codec::QualityOptions;
///
/// let options = QualityOptions::new().threshold(0.002).size_scale(1024.0);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QualityOptions {
    /// Scores strictly below this value are accepted.
    pub threshold: f64,
    /// Exponent applied to the long/short side ratio.
    pub aspect_exponent: f64,
    /// Area at which the size penalty doubles the score.
    pub size_scale: f64,
}

impl Default for QualityOptions {
    fn default() -> Self {
        Self {
            threshold: 0.005,
            aspect_exponent: 2.0,
            size_scale: 4096.0,
        }
    }
}

impl QualityOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[inline]
    pub fn aspect_exponent(mut self, exponent: f64) -> Self {
        self.aspect_exponent = exponent;
        self
    }

    #[inline]
    pub fn size_scale(mut self, scale: f64) -> Self {
        self.size_scale = scale;
        self
    }

    /// Check that the options keep the score well-defined and monotone.
    pub fn validate(&self) -> Result<(), CodecError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(CodecError::InvalidOptions(format!(
                "threshold must be positive and finite, got {}",
                self.threshold
            )));
        }
        if !self.aspect_exponent.is_finite() || self.aspect_exponent < 0.0 {
            return Err(CodecError::InvalidOptions(format!(
                "aspect exponent must be non-negative and finite, got {}",
                self.aspect_exponent
            )));
        }
        if !self.size_scale.is_finite() || self.size_scale <= 0.0 {
            return Err(CodecError::InvalidOptions(format!(
                "size scale must be positive and finite, got {}",
                self.size_scale
            )));
        }
        Ok(())
    }
}

/// Scores rectangles of one plane against its true samples.
pub struct QualityEvaluator<'a> {
    plane: &'a Plane,
    options: &'a QualityOptions,
}

impl<'a> QualityEvaluator<'a> {
    pub fn new(plane: &'a Plane, options: &'a QualityOptions) -> Self {
        Self { plane, options }
    }

    /// Whether `score` passes the acceptance threshold.
    #[inline]
    pub fn accepts(&self, score: f64) -> bool {
        score < self.options.threshold
    }

    /// Penalized score of `rect`; lower is better.
    pub fn score(&self, rect: Rect) -> f64 {
        let raw = self.raw_error(rect);
        if raw == 0.0 {
            return 0.0;
        }
        raw * self.aspect_penalty(rect) * self.size_penalty(rect)
    }

    /// Energy-normalized squared interpolation error of `rect`.
    ///
    /// Zero when interpolation is exact (including all-zero regions) and
    /// infinite when the error is positive but one side has no energy.
    pub fn raw_error(&self, rect: Rect) -> f64 {
        let block = interpolate(
            rect.width as u8,
            rect.height as u8,
            rect.corners_in(self.plane),
        );

        let mut diff_sq: u64 = 0;
        let mut truth_sq: u64 = 0;
        let mut interp_sq: u64 = 0;
        for dy in 0..rect.height {
            let truth = &self.plane.row(rect.y + dy)[rect.x..rect.right()];
            for (&t, &i) in truth.iter().zip(block.row(dy)) {
                let d = t.abs_diff(i) as u64;
                diff_sq += d * d;
                truth_sq += t as u64 * t as u64;
                interp_sq += i as u64 * i as u64;
            }
        }

        if diff_sq == 0 {
            return 0.0;
        }
        let energy = ((truth_sq as f64) * (interp_sq as f64)).sqrt();
        if energy == 0.0 {
            return f64::INFINITY;
        }
        diff_sq as f64 / energy
    }

    fn aspect_penalty(&self, rect: Rect) -> f64 {
        let long = rect.width.max(rect.height) as f64;
        let short = rect.width.min(rect.height) as f64;
        (long / short).powf(self.options.aspect_exponent)
    }

    fn size_penalty(&self, rect: Rect) -> f64 {
        1.0 + rect.area() as f64 / self.options.size_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> Plane {
        let samples = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x * 4 + y * 2) as u8))
            .collect();
        Plane::new(width, height, samples).unwrap()
    }

    fn noisy(width: usize, height: usize) -> Plane {
        let samples = (0..width * height)
            .map(|i| if (i * 7919) % 5 < 2 { 40 } else { 200 })
            .collect();
        Plane::new(width, height, samples).unwrap()
    }

    #[test]
    fn test_flat_region_scores_zero() {
        let plane = Plane::filled(16, 16, 90);
        let options = QualityOptions::default();
        let evaluator = QualityEvaluator::new(&plane, &options);
        assert_eq!(evaluator.score(Rect::new(0, 0, 16, 16)), 0.0);
    }

    #[test]
    fn test_black_region_scores_zero() {
        let plane = Plane::filled(8, 8, 0);
        let options = QualityOptions::default();
        let evaluator = QualityEvaluator::new(&plane, &options);
        assert_eq!(evaluator.raw_error(Rect::new(0, 0, 8, 8)), 0.0);
    }

    #[test]
    fn test_dark_corners_bright_interior_is_infinite() {
        let mut plane = Plane::filled(3, 3, 0);
        plane.set(1, 1, 255);
        let options = QualityOptions::default();
        let evaluator = QualityEvaluator::new(&plane, &options);

        let score = evaluator.score(Rect::new(0, 0, 3, 3));
        assert!(score.is_infinite());
        assert!(!evaluator.accepts(score));
    }

    #[test]
    fn test_linear_gradient_is_nearly_exact() {
        let plane = gradient(16, 16);
        let options = QualityOptions::default();
        let evaluator = QualityEvaluator::new(&plane, &options);
        let score = evaluator.score(Rect::new(0, 0, 16, 16));
        assert!(evaluator.accepts(score), "gradient score {}", score);
    }

    #[test]
    fn test_noise_is_rejected() {
        let plane = noisy(8, 8);
        let options = QualityOptions::default();
        let evaluator = QualityEvaluator::new(&plane, &options);
        let score = evaluator.score(Rect::new(0, 0, 8, 8));
        assert!(!evaluator.accepts(score), "noise score {}", score);
    }

    #[test]
    fn test_aspect_penalty_is_monotone() {
        let plane = noisy(32, 32);
        let options = QualityOptions::default();
        let evaluator = QualityEvaluator::new(&plane, &options);

        let square = evaluator.aspect_penalty(Rect::new(0, 0, 4, 4));
        let wide = evaluator.aspect_penalty(Rect::new(0, 0, 8, 2));
        let wider = evaluator.aspect_penalty(Rect::new(0, 0, 16, 1));
        assert_eq!(square, 1.0);
        assert!(square < wide && wide < wider);
        assert_eq!(
            evaluator.aspect_penalty(Rect::new(0, 0, 2, 8)),
            wide,
            "penalty must not depend on orientation"
        );
    }

    #[test]
    fn test_size_penalty_is_monotone() {
        let plane = noisy(32, 32);
        let options = QualityOptions::default();
        let evaluator = QualityEvaluator::new(&plane, &options);

        let small = evaluator.size_penalty(Rect::new(0, 0, 2, 2));
        let large = evaluator.size_penalty(Rect::new(0, 0, 20, 20));
        assert!(small >= 1.0);
        assert!(small < large);
    }

    #[test]
    fn test_score_grows_with_raw_error() {
        let options = QualityOptions::default();
        let mut mild = Plane::filled(5, 5, 100);
        mild.set(2, 2, 110);
        let mut strong = Plane::filled(5, 5, 100);
        strong.set(2, 2, 160);

        let rect = Rect::new(0, 0, 5, 5);
        let mild_score = QualityEvaluator::new(&mild, &options).score(rect);
        let strong_score = QualityEvaluator::new(&strong, &options).score(rect);
        assert!(mild_score > 0.0);
        assert!(mild_score < strong_score);
    }

    #[test]
    fn test_validate_rejects_bad_options() {
        assert!(QualityOptions::new().threshold(0.0).validate().is_err());
        assert!(QualityOptions::new().threshold(f64::NAN).validate().is_err());
        assert!(QualityOptions::new().aspect_exponent(-1.0).validate().is_err());
        assert!(QualityOptions::new().size_scale(0.0).validate().is_err());
        assert!(QualityOptions::default().validate().is_ok());
    }
}
