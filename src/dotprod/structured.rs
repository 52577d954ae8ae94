use std::fmt;

use crate::dotprod::kernel::{MulAcc, run, run4};
use crate::error::{DspError, Result};

/// Structured dot product holding its own copy of one operand
///
/// Typically the held operand is a set of filter taps executed against a
/// sliding window of input samples. The object carries no state between
/// executions; the coefficients only change through [`recreate`](Self::recreate).
#[derive(Debug, Clone, PartialEq)]
pub struct DotProduct<T> {
    coefficients: Vec<T>,
}

impl<T: Copy> DotProduct<T> {
    /// Create a dot product object from a coefficient slice
    ///
    /// # Errors
    /// Returns `DspError::Config` if `coefficients` is empty, or
    /// `DspError::Allocation` if the copy cannot be allocated.
    pub fn new(coefficients: &[T]) -> Result<Self> {
        Ok(Self {
            coefficients: copy_coefficients(coefficients)?,
        })
    }

    /// Replace the coefficients, resizing storage if the length changed
    ///
    /// On error the previous coefficients are left untouched.
    pub fn recreate(&mut self, coefficients: &[T]) -> Result<()> {
        if coefficients.len() == self.coefficients.len() {
            self.coefficients.copy_from_slice(coefficients);
        } else {
            let resized = copy_coefficients(coefficients)?;
            log::trace!(
                "dotprod resized from {} to {} elements",
                self.coefficients.len(),
                resized.len()
            );
            self.coefficients = resized;
        }
        Ok(())
    }

    /// Execute against the first `len()` elements of `x` (unrolled kernel)
    ///
    /// # Panics
    /// Panics if `x` is shorter than the coefficient vector.
    pub fn execute<X: Copy>(&self, x: &[X]) -> T::Output
    where
        T: MulAcc<X>,
    {
        run4(&self.coefficients, &x[..self.coefficients.len()])
    }

    /// Execute with the straight-line reference kernel
    pub fn execute_reference<X: Copy>(&self, x: &[X]) -> T::Output
    where
        T: MulAcc<X>,
    {
        run(&self.coefficients, &x[..self.coefficients.len()])
    }

    /// Number of coefficients
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// Always false; an empty dot product cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }
}

fn copy_coefficients<T: Copy>(coefficients: &[T]) -> Result<Vec<T>> {
    if coefficients.is_empty() {
        return Err(DspError::Config(
            "dot product length must be greater than zero".to_string(),
        ));
    }

    let mut copy = Vec::new();
    copy.try_reserve_exact(coefficients.len())
        .map_err(|_| DspError::Allocation {
            requested: coefficients.len(),
        })?;
    copy.extend_from_slice(coefficients);
    Ok(copy)
}

impl<T: fmt::Display> fmt::Display for DotProduct<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "dotprod [{} elements]:", self.coefficients.len())?;
        for (i, h) in self.coefficients.iter().enumerate() {
            writeln!(f, "  {:4}: {:12.8}", i, h)?;
        }
        Ok(())
    }
}
