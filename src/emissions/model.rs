use crate::input::InputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Energy,
    Material,
    Waste,
    Shipping,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Energy,
        Category::Material,
        Category::Waste,
        Category::Shipping,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Energy => "Energy",
            Self::Material => "Material",
            Self::Waste => "Waste",
            Self::Shipping => "Shipping",
        }
    }

    pub fn labels() -> [&'static str; 4] {
        Self::ALL.map(Self::label)
    }
}

/// One run's measurements: kWh of energy, kg of material, kg of waste, km shipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawMeasurements {
    energy_kwh: f64,
    material_kg: f64,
    waste_kg: f64,
    shipping_km: f64,
}

impl RawMeasurements {
    pub fn new(
        energy_kwh: f64,
        material_kg: f64,
        waste_kg: f64,
        shipping_km: f64,
    ) -> Result<Self, InputError> {
        for (field, value) in [
            ("energy_kwh", energy_kwh),
            ("material_kg", material_kg),
            ("waste_kg", waste_kg),
            ("shipping_km", shipping_km),
        ] {
            check_measurement(field, value)?;
        }

        Ok(Self {
            energy_kwh,
            material_kg,
            waste_kg,
            shipping_km,
        })
    }

    pub fn energy_kwh(&self) -> f64 {
        self.energy_kwh
    }

    pub fn material_kg(&self) -> f64 {
        self.material_kg
    }

    pub fn waste_kg(&self) -> f64 {
        self.waste_kg
    }

    pub fn shipping_km(&self) -> f64 {
        self.shipping_km
    }
}

pub(crate) fn check_measurement(field: &'static str, value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(InputError::Negative { field, value });
    }
    Ok(value)
}

/// Emissions per category in tons of CO2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionBreakdown {
    energy: f64,
    material: f64,
    waste: f64,
    shipping: f64,
    total: f64,
}

impl EmissionBreakdown {
    /// `total` is always the sum of the four parts, in category order.
    pub(crate) fn from_parts(energy: f64, material: f64, waste: f64, shipping: f64) -> Self {
        Self {
            energy,
            material,
            waste,
            shipping,
            total: energy + material + waste + shipping,
        }
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn material(&self) -> f64 {
        self.material
    }

    pub fn waste(&self) -> f64 {
        self.waste
    }

    pub fn shipping(&self) -> f64 {
        self.shipping
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn value(&self, category: Category) -> f64 {
        match category {
            Category::Energy => self.energy,
            Category::Material => self.material,
            Category::Waste => self.waste,
            Category::Shipping => self.shipping,
        }
    }

    pub fn values(&self) -> [f64; 4] {
        Category::ALL.map(|category| self.value(category))
    }
}
