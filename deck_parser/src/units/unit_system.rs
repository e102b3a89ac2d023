//! Named unit systems and dimension-string resolution
//!
//! A `UnitSystem` maps measure names (`Length`, `Pressure`, ...) to the
//! `Dimension` that converts a raw deck number in that system to SI. Item
//! dimensions in schemas may be composites such as `Pressure/Time` or
//! `Length*Length`; those are resolved by multiplying and dividing the named
//! measures.

use super::dimension::Dimension;
use super::error::{UnitError, UnitResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

mod factors {
    pub const DAY: f64 = 86400.0;
    pub const HOUR: f64 = 3600.0;
    pub const BARSA: f64 = 1e5;
    pub const PSIA: f64 = 6894.757293168361;
    pub const ATM: f64 = 101325.0;
    pub const FEET: f64 = 0.3048;
    pub const CENTIMETER: f64 = 0.01;
    pub const POUND: f64 = 0.45359237;
    pub const GRAM: f64 = 1e-3;
    pub const STB: f64 = 0.158987294928;
    pub const CUBIC_FEET: f64 = 0.028316846592;
    pub const MSCF: f64 = 28.316846592;
    pub const CUBIC_CENTIMETER: f64 = 1e-6;
    pub const CENTI_POISE: f64 = 1e-3;
    pub const DARCY: f64 = 9.869233e-13;
    pub const MILLI_DARCY: f64 = DARCY * 1e-3;
    pub const KILO_JOULE: f64 = 1000.0;
    pub const BTU: f64 = 1054.35026444;
    pub const KG_MOLE: f64 = 1000.0;
    pub const LB_MOLE: f64 = 453.59237;
    pub const RANKINE: f64 = 5.0 / 9.0;
    pub const CELSIUS_OFFSET: f64 = 273.15;
    pub const FAHRENHEIT_OFFSET: f64 = 273.15 - 32.0 * 5.0 / 9.0;
    pub const LB_PER_CUBIC_FEET: f64 = POUND / CUBIC_FEET;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitType {
    Metric,
    Field,
    Lab,
    #[serde(rename = "PVT-M")]
    PvtM,
    Input,
}

impl UnitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metric => "METRIC",
            Self::Field => "FIELD",
            Self::Lab => "LAB",
            Self::PvtM => "PVT-M",
            Self::Input => "INPUT",
        }
    }

    /// Unit type selected by a deck keyword
    pub fn from_keyword(name: &str) -> Option<Self> {
        match name {
            "METRIC" => Some(Self::Metric),
            "FIELD" => Some(Self::Field),
            "LAB" => Some(Self::Lab),
            "PVT-M" => Some(Self::PvtM),
            _ => None,
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitSystem {
    name: String,
    unit_type: UnitType,
    dimensions: HashMap<String, Dimension>,
}

impl UnitSystem {
    fn empty(unit_type: UnitType) -> Self {
        let mut system = Self {
            name: unit_type.as_str().to_string(),
            unit_type,
            dimensions: HashMap::new(),
        };
        system.add_dimension("1", Dimension::identity());
        system
    }

    pub fn new_metric() -> Self {
        use factors::*;
        let mut system = Self::empty(UnitType::Metric);
        system.add_scalings(&[
            ("Length", 1.0),
            ("Time", DAY),
            ("Timestep", DAY),
            ("Density", 1.0),
            ("Pressure", BARSA),
            ("AbsoluteTemperature", 1.0),
            ("Viscosity", CENTI_POISE),
            ("Permeability", MILLI_DARCY),
            ("LiquidSurfaceVolume", 1.0),
            ("GasSurfaceVolume", 1.0),
            ("ReservoirVolume", 1.0),
            ("GasDissolutionFactor", 1.0),
            ("OilDissolutionFactor", 1.0),
            ("Mass", 1.0),
            ("Energy", KILO_JOULE),
            ("Moles", KG_MOLE),
            ("Transmissibility", CENTI_POISE / (DAY * BARSA)),
        ]);
        system.add_dimension("Temperature", Dimension::new(1.0, CELSIUS_OFFSET));
        system
    }

    pub fn new_field() -> Self {
        use factors::*;
        let mut system = Self::empty(UnitType::Field);
        system.add_scalings(&[
            ("Length", FEET),
            ("Time", DAY),
            ("Timestep", DAY),
            ("Density", LB_PER_CUBIC_FEET),
            ("Pressure", PSIA),
            ("AbsoluteTemperature", RANKINE),
            ("Viscosity", CENTI_POISE),
            ("Permeability", MILLI_DARCY),
            ("LiquidSurfaceVolume", STB),
            ("GasSurfaceVolume", MSCF),
            ("ReservoirVolume", STB),
            ("GasDissolutionFactor", MSCF / STB),
            ("OilDissolutionFactor", STB / MSCF),
            ("Mass", POUND),
            ("Energy", BTU),
            ("Moles", LB_MOLE),
            ("Transmissibility", CENTI_POISE * STB / (DAY * PSIA)),
        ]);
        system.add_dimension("Temperature", Dimension::new(RANKINE, FAHRENHEIT_OFFSET));
        system
    }

    pub fn new_lab() -> Self {
        use factors::*;
        let mut system = Self::empty(UnitType::Lab);
        system.add_scalings(&[
            ("Length", CENTIMETER),
            ("Time", HOUR),
            ("Timestep", HOUR),
            ("Density", GRAM / CUBIC_CENTIMETER),
            ("Pressure", ATM),
            ("AbsoluteTemperature", 1.0),
            ("Viscosity", CENTI_POISE),
            ("Permeability", MILLI_DARCY),
            ("LiquidSurfaceVolume", CUBIC_CENTIMETER),
            ("GasSurfaceVolume", CUBIC_CENTIMETER),
            ("ReservoirVolume", CUBIC_CENTIMETER),
            ("GasDissolutionFactor", 1.0),
            ("OilDissolutionFactor", 1.0),
            ("Mass", GRAM),
            ("Energy", 1.0),
            ("Moles", 1.0),
            ("Transmissibility", CUBIC_CENTIMETER * CENTI_POISE / (HOUR * ATM)),
        ]);
        system.add_dimension("Temperature", Dimension::new(1.0, CELSIUS_OFFSET));
        system
    }

    /// METRIC with pressures in atmospheres
    pub fn new_pvt_m() -> Self {
        use factors::*;
        let mut system = Self::new_metric();
        system.name = UnitType::PvtM.as_str().to_string();
        system.unit_type = UnitType::PvtM;
        system.add_scalings(&[
            ("Pressure", ATM),
            ("Transmissibility", CENTI_POISE / (DAY * ATM)),
        ]);
        system
    }

    /// Every known measure maps to the identity
    pub fn new_input() -> Self {
        let metric = Self::new_metric();
        let mut system = Self::empty(UnitType::Input);
        for name in metric.dimensions.keys() {
            system.add_dimension(name, Dimension::identity());
        }
        system
    }

    pub fn from_type(unit_type: UnitType) -> Self {
        match unit_type {
            UnitType::Metric => Self::new_metric(),
            UnitType::Field => Self::new_field(),
            UnitType::Lab => Self::new_lab(),
            UnitType::PvtM => Self::new_pvt_m(),
            UnitType::Input => Self::new_input(),
        }
    }

    pub fn from_keyword(name: &str) -> UnitResult<Self> {
        UnitType::from_keyword(name)
            .map(Self::from_type)
            .ok_or_else(|| UnitError::unknown_unit_system(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    pub fn add_dimension(&mut self, name: &str, dimension: Dimension) {
        self.dimensions.insert(name.to_string(), dimension);
    }

    fn add_scalings(&mut self, scalings: &[(&str, f64)]) {
        for (name, scaling) in scalings {
            self.add_dimension(name, Dimension::scaling(*scaling));
        }
    }

    pub fn has_dimension(&self, name: &str) -> bool {
        self.dimensions.contains_key(name)
    }

    /// Named measure, falling back to composite parsing
    pub fn get_dimension(&self, name: &str) -> UnitResult<Dimension> {
        match self.dimensions.get(name) {
            Some(dimension) => Ok(*dimension),
            None => self.parse(name),
        }
    }

    /// Resolve `A*B/C*D` against this system's measures
    pub fn parse(&self, dimension: &str) -> UnitResult<Dimension> {
        let dimension = dimension.trim();
        let mut parts = dimension.split('/');
        let numerator = parts.next().unwrap_or_default();
        let denominator = parts.next();
        if parts.next().is_some() {
            return Err(UnitError::invalid_composite(
                dimension,
                "at most one '/' is allowed",
            ));
        }

        let mut factors = self.lookup_factors(dimension, numerator)?;
        let divisors = match denominator {
            Some(text) => self.lookup_factors(dimension, text)?,
            None => Vec::new(),
        };

        if factors.len() + divisors.len() == 1 {
            if let Some(single) = factors.pop() {
                return Ok(single);
            }
        }

        let mut result = Dimension::identity();
        for factor in &factors {
            result = result.mul(factor).map_err(|_| offset_error(dimension))?;
        }
        for divisor in &divisors {
            result = result.div(divisor).map_err(|_| offset_error(dimension))?;
        }
        Ok(result)
    }

    fn lookup_factors(&self, dimension: &str, text: &str) -> UnitResult<Vec<Dimension>> {
        text.split('*')
            .map(|factor| {
                let factor = factor.trim();
                if factor.is_empty() {
                    return Err(UnitError::invalid_composite(dimension, "empty factor"));
                }
                self.dimensions
                    .get(factor)
                    .copied()
                    .ok_or_else(|| UnitError::unknown_dimension(factor, &self.name))
            })
            .collect()
    }

    pub fn to_si(&self, dimension: &str, raw: f64) -> UnitResult<f64> {
        Ok(self.get_dimension(dimension)?.convert_raw_to_si(raw))
    }

    pub fn from_si(&self, dimension: &str, si: f64) -> UnitResult<f64> {
        Ok(self.get_dimension(dimension)?.convert_si_to_raw(si))
    }
}

fn offset_error(dimension: &str) -> UnitError {
    UnitError::invalid_composite(dimension, "measures with an SI offset cannot be composed")
}

impl Default for UnitSystem {
    fn default() -> Self {
        Self::new_metric()
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
