//! Gamaka sampler engine: named ornament curves sampled over normalized time.
//!
//! Every gamaka name in a song is looked up here. The builtin registry holds
//! the flat curve `:` and the full slide `:/`; more can be registered from
//! the render configuration.

pub mod curve;

use std::collections::BTreeMap;

pub use curve::{Checkpoint, CurveError, GamakaCurve};

/// The flat curve: hold the starting pitch.
pub const FLAT: &str = ":";
/// The full slide: move linearly to the next pitch.
pub const SLIDE: &str = ":/";

/// Gamaka curves by name.
#[derive(Debug, Clone, Default)]
pub struct GamakaRegistry {
    curves: BTreeMap<String, GamakaCurve>,
}

impl GamakaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the standard curves.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (name, points) in [
            (FLAT, [(0.0, 0.0), (1.0, 0.0)]),
            (SLIDE, [(0.0, 0.0), (1.0, 1.0)]),
        ] {
            if let Ok(curve) = GamakaCurve::new(name, &points) {
                registry.register(curve);
            }
        }
        registry
    }

    /// Add a curve, replacing any curve of the same name.
    pub fn register(&mut self, curve: GamakaCurve) {
        self.curves.insert(curve.name().to_string(), curve);
    }

    pub fn get(&self, name: &str) -> Option<&GamakaCurve> {
        self.curves.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.curves.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}
