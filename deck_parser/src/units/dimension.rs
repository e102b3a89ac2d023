//! Physical dimension: linear map between a raw unit and SI

use super::error::{UnitError, UnitResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `si = raw * si_scaling + si_offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub si_scaling: f64,
    pub si_offset: f64,
}

impl Dimension {
    pub fn new(si_scaling: f64, si_offset: f64) -> Self {
        Self {
            si_scaling,
            si_offset,
        }
    }

    pub fn scaling(si_scaling: f64) -> Self {
        Self::new(si_scaling, 0.0)
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0)
    }

    pub fn is_identity(&self) -> bool {
        self.si_scaling == 1.0 && self.si_offset == 0.0
    }

    /// Only offset-free dimensions can be multiplied or divided
    pub fn is_compositable(&self) -> bool {
        self.si_offset == 0.0
    }

    pub fn convert_raw_to_si(&self, raw: f64) -> f64 {
        raw * self.si_scaling + self.si_offset
    }

    pub fn convert_si_to_raw(&self, si: f64) -> f64 {
        (si - self.si_offset) / self.si_scaling
    }

    pub fn mul(&self, other: &Dimension) -> UnitResult<Dimension> {
        self.check_compositable(other, "*")?;
        Ok(Self::scaling(self.si_scaling * other.si_scaling))
    }

    pub fn div(&self, other: &Dimension) -> UnitResult<Dimension> {
        self.check_compositable(other, "/")?;
        Ok(Self::scaling(self.si_scaling / other.si_scaling))
    }

    fn check_compositable(&self, other: &Dimension, op: &str) -> UnitResult<()> {
        if self.is_compositable() && other.is_compositable() {
            Ok(())
        } else {
            Err(UnitError::invalid_composite(
                &format!("{} {} {}", self, op, other),
                "dimensions with an SI offset cannot be composed",
            ))
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.si_offset == 0.0 {
            write!(f, "x{:?}", self.si_scaling)
        } else {
            write!(f, "x{:?}{:+}", self.si_scaling, self.si_offset)
        }
    }
}
