//! Piecewise-linear gamaka curves.
//!
//! A curve maps normalized time `t` in `[0.0, 1.0]` to a weight in
//! `[0.0, 1.0]`: how far the pitch has moved from the starting svara toward
//! the ending one.

use std::fmt;

/// One anchor of a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checkpoint {
    pub position: f64,
    pub weight: f64,
}

/// A named, immutable piecewise-linear curve.
///
/// Checkpoint positions strictly increase from `0.0` to `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct GamakaCurve {
    name: String,
    checkpoints: Vec<Checkpoint>,
}

/// Why a set of checkpoints cannot form a curve.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveError {
    TooFewCheckpoints(usize),
    OutOfRange { position: f64, weight: f64 },
    DuplicatePosition(f64),
    MissingEndpoint(f64),
}

impl fmt::Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveError::TooFewCheckpoints(n) => {
                write!(f, "a curve needs at least 2 checkpoints, got {n}")
            }
            CurveError::OutOfRange { position, weight } => write!(
                f,
                "checkpoint ({position}, {weight}) is outside [0, 1]"
            ),
            CurveError::DuplicatePosition(p) => write!(f, "duplicate checkpoint position {p}"),
            CurveError::MissingEndpoint(p) => write!(f, "missing checkpoint at position {p}"),
        }
    }
}

impl std::error::Error for CurveError {}

impl GamakaCurve {
    /// Build a curve from `(position, weight)` pairs, in any order.
    pub fn new(name: impl Into<String>, points: &[(f64, f64)]) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::TooFewCheckpoints(points.len()));
        }

        let unit = 0.0..=1.0;
        let mut checkpoints = Vec::with_capacity(points.len());
        for &(position, weight) in points {
            if !unit.contains(&position) || !unit.contains(&weight) {
                return Err(CurveError::OutOfRange { position, weight });
            }
            checkpoints.push(Checkpoint { position, weight });
        }
        checkpoints.sort_by(|a, b| a.position.total_cmp(&b.position));

        if let Some(pair) = checkpoints
            .windows(2)
            .find(|pair| pair[0].position >= pair[1].position)
        {
            return Err(CurveError::DuplicatePosition(pair[1].position));
        }
        if checkpoints[0].position != 0.0 {
            return Err(CurveError::MissingEndpoint(0.0));
        }
        if checkpoints[checkpoints.len() - 1].position != 1.0 {
            return Err(CurveError::MissingEndpoint(1.0));
        }

        Ok(Self {
            name: name.into(),
            checkpoints,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// The curve's weight at normalized time `t`.
    ///
    /// Uses the first checkpoint pair `(s, e)` with `s <= t <= e` and
    /// interpolates linearly between their weights.
    pub fn weight(&self, t: f64) -> f64 {
        debug_assert!((0.0..=1.0).contains(&t), "sample time {t} outside [0, 1]");
        let t = t.clamp(0.0, 1.0);

        for pair in self.checkpoints.windows(2) {
            let (s, e) = (pair[0], pair[1]);
            if s.position <= t && t <= e.position {
                let frac = (t - s.position) / (e.position - s.position);
                return s.weight + frac * (e.weight - s.weight);
            }
        }
        self.checkpoints[self.checkpoints.len() - 1].weight
    }

    /// Pitch offset at time `t` while moving from `start` to `end` (semitones).
    pub fn sample(&self, t: f64, start: i32, end: i32) -> f64 {
        let (start, end) = (start as f64, end as f64);
        start + self.weight(t) * (end - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn flat() -> GamakaCurve {
        GamakaCurve::new(":", &[(0.0, 0.0), (1.0, 0.0)]).unwrap()
    }

    fn slide() -> GamakaCurve {
        GamakaCurve::new(":/", &[(0.0, 0.0), (1.0, 1.0)]).unwrap()
    }

    #[test]
    fn flat_is_zero_everywhere() {
        let curve = flat();
        for i in 0..=100 {
            assert_eq!(curve.weight(i as f64 / 100.0), 0.0);
        }
    }

    #[test]
    fn slide_endpoints() {
        let curve = slide();
        assert_approx_eq!(curve.weight(0.0), 0.0);
        assert_approx_eq!(curve.weight(1.0), 1.0);
        assert_approx_eq!(curve.weight(0.25), 0.25);
    }

    #[test]
    fn interpolation_is_local_to_bracket() {
        // Rise to the target by the midpoint, then return.
        let curve = GamakaCurve::new(":^", &[(0.0, 0.0), (0.5, 1.0), (1.0, 0.0)]).unwrap();
        assert_approx_eq!(curve.weight(0.25), 0.5);
        assert_approx_eq!(curve.weight(0.5), 1.0);
        assert_approx_eq!(curve.weight(0.75), 0.5);
        assert_approx_eq!(curve.weight(1.0), 0.0);
    }

    #[test]
    fn checkpoint_order_does_not_matter() {
        let a = GamakaCurve::new("x", &[(1.0, 1.0), (0.0, 0.0), (0.4, 0.8)]).unwrap();
        let b = GamakaCurve::new("x", &[(0.0, 0.0), (0.4, 0.8), (1.0, 1.0)]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sample_scales_between_notes() {
        let curve = slide();
        assert_approx_eq!(curve.sample(0.0, 0, 12), 0.0);
        assert_approx_eq!(curve.sample(1.0, 0, 12), 12.0);
        assert_approx_eq!(curve.sample(0.5, 7, 5), 6.0);
    }

    #[test]
    fn sample_with_equal_notes_is_constant() {
        let curve = slide();
        for i in 0..=10 {
            assert_approx_eq!(curve.sample(i as f64 / 10.0, 4, 4), 4.0);
        }
    }

    #[test]
    fn rejects_single_checkpoint() {
        assert_eq!(
            GamakaCurve::new("x", &[(0.0, 0.0)]),
            Err(CurveError::TooFewCheckpoints(1))
        );
    }

    #[test]
    fn rejects_missing_endpoints() {
        assert_eq!(
            GamakaCurve::new("x", &[(0.2, 0.0), (1.0, 1.0)]),
            Err(CurveError::MissingEndpoint(0.0))
        );
        assert_eq!(
            GamakaCurve::new("x", &[(0.0, 0.0), (0.9, 1.0)]),
            Err(CurveError::MissingEndpoint(1.0))
        );
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            GamakaCurve::new("x", &[(0.0, 0.0), (1.0, 1.5)]),
            Err(CurveError::OutOfRange { .. })
        ));
        assert!(matches!(
            GamakaCurve::new("x", &[(0.0, f64::NAN), (1.0, 1.0)]),
            Err(CurveError::OutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_positions() {
        assert_eq!(
            GamakaCurve::new("x", &[(0.0, 0.0), (0.5, 0.2), (0.5, 0.8), (1.0, 1.0)]),
            Err(CurveError::DuplicatePosition(0.5))
        );
    }
}
