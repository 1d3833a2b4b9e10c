// src/render.rs
// Front-end neutral view of a prediction result

use std::fmt;

use crate::api::{ModelOutcome, PredictionResult, SinglePrediction};

pub const RESULTS_HEADING: &str = "Prediction Results";

#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    pub title: String,
    pub price: String,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultEntry {
    Card(ResultCard),
    /// A model that answered with an error instead of a price
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub entries: Vec<ResultEntry>,
}

impl ResultView {
    pub fn from_result(result: &PredictionResult) -> Self {
        match result {
            PredictionResult::Single(single) => Self {
                entries: vec![ResultEntry::Card(single_card(single))],
            },
            PredictionResult::Comparison(comparison) => Self {
                entries: comparison
                    .ordered()
                    .into_iter()
                    .map(|(model, outcome)| comparison_entry(model, outcome))
                    .collect(),
            },
        }
    }

    pub fn cards(&self) -> impl Iterator<Item = &ResultCard> {
        self.entries.iter().filter_map(|e| match e {
            ResultEntry::Card(card) => Some(card),
            ResultEntry::Error(_) => None,
        })
    }

    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|e| match e {
            ResultEntry::Error(msg) => Some(msg.as_str()),
            ResultEntry::Card(_) => None,
        })
    }
}

fn single_card(single: &SinglePrediction) -> ResultCard {
    ResultCard {
        title: "Price Prediction".to_string(),
        price: format_price(single.predicted_price),
        details: vec![
            format!("Model: {}", single.model_used),
            format!("Log Price: {}", single.log_price),
        ],
    }
}

fn comparison_entry(model: &str, outcome: &ModelOutcome) -> ResultEntry {
    let title = humanize_model_key(model);
    match outcome {
        ModelOutcome::Priced {
            predicted_price,
            log_price,
        } => ResultEntry::Card(ResultCard {
            title,
            price: format_price(*predicted_price),
            details: log_price
                .iter()
                .map(|lp| format!("Log Price: {}", lp))
                .collect(),
        }),
        ModelOutcome::Failed { error } => ResultEntry::Error(format!("{} Error: {}", title, error)),
        ModelOutcome::Unrecognized(_) => {
            ResultEntry::Error(format!("{} Error: unrecognized response", title))
        }
    }
}

/// `$120` for 120.0, `$99.5` for 99.5
pub fn format_price(price: f64) -> String {
    format!("${}", price)
}

/// `linear_regression` -> `Linear Regression`
pub fn humanize_model_key(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Amenity tags display with spaces: `smoke_detector` -> `smoke detector`
pub fn amenity_label(tag: &str) -> String {
    tag.replace('_', " ")
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RESULTS_HEADING)?;
        for entry in &self.entries {
            match entry {
                ResultEntry::Card(card) => {
                    writeln!(f, "  {}", card.title)?;
                    writeln!(f, "    {}", card.price)?;
                    for line in &card.details {
                        writeln!(f, "    {}", line)?;
                    }
                }
                ResultEntry::Error(msg) => writeln!(f, "  {}", msg)?,
            }
        }
        Ok(())
    }
}
