//! Worst-case interval propagation, shared by every derived quantity.

use crate::error::Result;
use crate::model::Extreme;

/// Evaluates `formula` once with every input pushed to its high extreme and
/// once with every input at its low extreme, and reports half the spread.
///
/// Exact only while the formula is monotonic in each input over the
/// interval; the pipeline's formulas are used under that assumption.
pub fn worst_case_range<F>(formula: F) -> Result<f64>
where
    F: Fn(Extreme) -> Result<f64>,
{
    let high = formula(Extreme::High)?;
    let low = formula(Extreme::Low)?;
    Ok((high - low) / 2.0)
}
