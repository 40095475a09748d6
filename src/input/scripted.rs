use crate::emissions::RawMeasurements;

use super::{Acquisition, InputError, MeasurementSource};

/// Replays a fixed acquisition result.
pub(crate) struct ScriptedSource {
    result: Option<Result<Acquisition, InputError>>,
}

impl ScriptedSource {
    pub(crate) fn measurements(
        client_name: &str,
        energy_kwh: f64,
        material_kg: f64,
        waste_kg: f64,
        shipping_km: f64,
    ) -> Self {
        let measurements = RawMeasurements::new(energy_kwh, material_kg, waste_kg, shipping_km)
            .expect("scripted measurements should be valid");
        Self {
            result: Some(Ok(Acquisition {
                client_name: (!client_name.is_empty()).then(|| client_name.to_string()),
                measurements,
            })),
        }
    }

    pub(crate) fn failing(error: InputError) -> Self {
        Self {
            result: Some(Err(error)),
        }
    }
}

impl MeasurementSource for ScriptedSource {
    fn acquire(&mut self) -> Result<Acquisition, InputError> {
        self.result.take().unwrap_or(Err(InputError::Closed {
            field: "client_name",
        }))
    }
}
