//! Physical dimensions and unit systems

pub mod dimension;
pub mod error;
pub mod unit_system;

pub use dimension::Dimension;
pub use error::{UnitError, UnitResult};
pub use unit_system::{UnitSystem, UnitType};
