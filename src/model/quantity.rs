//! Scalar measurements paired with their uncertainty half-widths.

use serde::Serialize;

/// One end of a worst-case uncertainty interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    High,
    Low,
}

/// A measured or derived value with a symmetric uncertainty.
///
/// The `error` field is a half-width: the value is taken to lie in
/// `[value - error, value + error]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quantity {
    pub value: f64,
    pub error: f64,
}

impl Quantity {
    pub fn new(value: f64, error: f64) -> Self {
        Self { value, error }
    }

    /// A value known exactly (zero uncertainty).
    pub fn exact(value: f64) -> Self {
        Self { value, error: 0.0 }
    }

    /// The value pushed to one end of its uncertainty interval.
    pub fn at(&self, extreme: Extreme) -> f64 {
        match extreme {
            Extreme::High => self.value + self.error,
            Extreme::Low => self.value - self.error,
        }
    }
}

/// The `value` halves of a quantity slice, in order.
pub fn values(quantities: &[Quantity]) -> Vec<f64> {
    quantities.iter().map(|q| q.value).collect()
}

/// The `error` halves of a quantity slice, in order.
pub fn errors(quantities: &[Quantity]) -> Vec<f64> {
    quantities.iter().map(|q| q.error).collect()
}
