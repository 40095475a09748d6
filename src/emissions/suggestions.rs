use super::model::{Category, EmissionBreakdown};

const EQUIPMENT_MAINTENANCE: &str = "Regularly maintain equipment to ensure energy efficiency.";
const STAFF_TRAINING: &str =
    "Train staff on sustainability practices to foster an eco-friendly workplace culture.";

fn category_advice(category: Category) -> &'static str {
    match category {
        Category::Energy => {
            "Consider switching to renewable energy sources such as solar or wind power."
        }
        Category::Material => {
            "Evaluate material usage and explore recycling or sustainable materials."
        }
        Category::Waste => "Improve waste management strategies to reduce emissions from waste.",
        Category::Shipping => "Optimize logistics to reduce emissions from shipping.",
    }
}

/// Advisory lines in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionSet {
    entries: Vec<String>,
}

impl SuggestionSet {
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SuggestionEngine {
    threshold: f64,
}

impl SuggestionEngine {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn suggest(&self, breakdown: &EmissionBreakdown) -> SuggestionSet {
        // Raw values, strictly above the threshold.
        let mut entries: Vec<String> = Category::ALL
            .into_iter()
            .filter(|category| breakdown.value(*category) > self.threshold)
            .map(|category| category_advice(category).to_string())
            .collect();

        entries.push(EQUIPMENT_MAINTENANCE.to_string());
        entries.push(STAFF_TRAINING.to_string());

        SuggestionSet { entries }
    }
}
