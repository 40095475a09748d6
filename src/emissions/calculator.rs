use crate::config::EmissionFactors;

use super::model::{EmissionBreakdown, RawMeasurements};

#[derive(Debug, Clone, Copy)]
pub struct EmissionCalculator {
    factors: EmissionFactors,
}

impl EmissionCalculator {
    pub fn new(factors: &EmissionFactors) -> Self {
        Self { factors: *factors }
    }

    pub fn compute(&self, raw: &RawMeasurements) -> EmissionBreakdown {
        EmissionBreakdown::from_parts(
            raw.energy_kwh() * self.factors.energy_coeff,
            raw.material_kg() * self.factors.material_coeff,
            raw.waste_kg() * self.factors.waste_coeff,
            raw.shipping_km() * self.factors.shipping_coeff,
        )
    }
}
