use std::io::{BufRead, Write};

use crate::emissions::{check_measurement, RawMeasurements};

use super::{Acquisition, InputError, MeasurementSource};

const CLIENT_PROMPT: &str = "Enter the company's name:> ";
const MEASUREMENT_PROMPTS: [(&str, &str); 4] = [
    ("energy_kwh", "Enter energy consumption in kWh: "),
    ("material_kg", "Enter weight of material used in kgs: "),
    ("waste_kg", "Enter waste produced in kgs: "),
    ("shipping_km", "Enter distance shipped in kms: "),
];

/// Interactive acquisition over any line reader, normally stdin/stdout.
pub struct PromptSource<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> PromptSource<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn ask(&mut self, field: &'static str, prompt: &str) -> Result<String, InputError> {
        write!(self.writer, "{}", prompt)
            .and_then(|_| self.writer.flush())
            .map_err(|source| InputError::Io { field, source })?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|source| InputError::Io { field, source })?;
        if read == 0 {
            return Err(InputError::Closed { field });
        }

        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> MeasurementSource for PromptSource<R, W> {
    fn acquire(&mut self) -> Result<Acquisition, InputError> {
        let client_name = self.ask("client_name", CLIENT_PROMPT)?;

        let mut values = [0.0; 4];
        for (slot, (field, prompt)) in values.iter_mut().zip(MEASUREMENT_PROMPTS) {
            let answer = self.ask(field, prompt)?;
            *slot = parse_measurement(field, &answer)?;
        }
        let [energy_kwh, material_kg, waste_kg, shipping_km] = values;

        Ok(Acquisition {
            client_name: (!client_name.is_empty()).then_some(client_name),
            measurements: RawMeasurements::new(energy_kwh, material_kg, waste_kg, shipping_km)?,
        })
    }
}

pub(crate) fn parse_measurement(field: &'static str, text: &str) -> Result<f64, InputError> {
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|_| InputError::NotNumeric {
            field,
            value: text.to_string(),
        })?;
    check_measurement(field, value)
}
