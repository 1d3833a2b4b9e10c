// src/api/types.rs
// Wire types exchanged with the prediction service

use crate::error::PredictError;
use crate::form::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const LINEAR_REGRESSION_KEY: &str = "linear_regression";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub linear_model_loaded: bool,
}

/// Allowed values for every categorical input, in display order
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FormOptions {
    pub property_type: Vec<String>,
    pub room_type: Vec<String>,
    pub bed_type: Vec<String>,
    pub cancellation_policy: Vec<String>,
    pub city: Vec<String>,
    pub amenities_list: Vec<String>,
}

impl FormOptions {
    /// Choices for a field; empty for fields that are not option-backed
    pub fn choices(&self, field: Field) -> &[String] {
        match field {
            Field::PropertyType => &self.property_type,
            Field::RoomType => &self.room_type,
            Field::BedType => &self.bed_type,
            Field::CancellationPolicy => &self.cancellation_policy,
            Field::City => &self.city,
            Field::AmenitiesList => &self.amenities_list,
            _ => &[],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub median: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct NumericRanges {
    pub accommodates: Option<NumericRange>,
    pub bathrooms: Option<NumericRange>,
    pub bedrooms: Option<NumericRange>,
    pub beds: Option<NumericRange>,
    pub amenities_count: Option<NumericRange>,
}

impl NumericRanges {
    pub fn get(&self, field: Field) -> Option<&NumericRange> {
        match field {
            Field::Accommodates => self.accommodates.as_ref(),
            Field::Bathrooms => self.bathrooms.as_ref(),
            Field::Bedrooms => self.bedrooms.as_ref(),
            Field::Beds => self.beds.as_ref(),
            Field::AmenitiesCount => self.amenities_count.as_ref(),
            _ => None,
        }
    }

    pub fn median(&self, field: Field) -> Option<f64> {
        self.get(field).and_then(|r| r.median)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FormOptionsResponse {
    pub categorical_options: FormOptions,
    #[serde(default)]
    pub numeric_ranges: Option<NumericRanges>,
    #[serde(default)]
    pub total_records: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ModelStatus {
    #[serde(default)]
    pub loaded: bool,
    #[serde(rename = "type", default)]
    pub model_type: String,
    #[serde(default)]
    pub expected_features: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ModelInfo {
    #[serde(default)]
    pub linear_regression: Option<ModelStatus>,
    #[serde(default)]
    pub unique_values_columns: Option<Vec<String>>,
    #[serde(default)]
    pub data_source: Option<String>,
}

/// Response of `POST /predict/linear`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SinglePrediction {
    pub predicted_price: f64,
    pub model_used: String,
    pub log_price: f64,
}

/// One model's entry in a comparison response
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ModelOutcome {
    Failed {
        error: String,
    },
    Priced {
        predicted_price: f64,
        #[serde(default)]
        log_price: Option<f64>,
    },
    /// An entry in neither shape; kept so the other models still render
    Unrecognized(serde_json::Value),
}

impl ModelOutcome {
    pub fn error(&self) -> Option<&str> {
        match self {
            ModelOutcome::Failed { error } => Some(error),
            ModelOutcome::Priced { .. } | ModelOutcome::Unrecognized(_) => None,
        }
    }

    pub fn predicted_price(&self) -> Option<f64> {
        match self {
            ModelOutcome::Priced { predicted_price, .. } => Some(*predicted_price),
            ModelOutcome::Failed { .. } | ModelOutcome::Unrecognized(_) => None,
        }
    }
}

/// Response of `POST /predict/both`, keyed by model name
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct ComparisonResult {
    pub models: BTreeMap<String, ModelOutcome>,
}

impl ComparisonResult {
    pub fn get(&self, model: &str) -> Option<&ModelOutcome> {
        self.models.get(model)
    }

    pub fn linear_regression(&self) -> Option<&ModelOutcome> {
        self.get(LINEAR_REGRESSION_KEY)
    }

    /// Entries with linear regression first, the rest in key order
    pub fn ordered(&self) -> Vec<(&str, &ModelOutcome)> {
        let mut entries: Vec<(&str, &ModelOutcome)> = self
            .models
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        entries.sort_by_key(|(k, _)| *k != LINEAR_REGRESSION_KEY);
        entries
    }
}

/// Which prediction endpoint a submit goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionKind {
    Linear,
    Both,
}

impl PredictionKind {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Linear => "/predict/linear",
            Self::Both => "/predict/both",
        }
    }

    /// Button label shown by the front-ends
    pub fn label(&self) -> &'static str {
        match self {
            Self::Linear => "Predict with Linear Regression",
            Self::Both => "Get Prediction",
        }
    }

    pub fn all() -> [PredictionKind; 2] {
        [Self::Linear, Self::Both]
    }
}

impl fmt::Display for PredictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Both => write!(f, "both"),
        }
    }
}

impl FromStr for PredictionKind {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "both" => Ok(Self::Both),
            other => Err(PredictError::InvalidValue {
                field: "model".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum PredictionResult {
    Single(SinglePrediction),
    Comparison(ComparisonResult),
}

impl PredictionResult {
    pub fn kind(&self) -> PredictionKind {
        match self {
            PredictionResult::Single(_) => PredictionKind::Linear,
            PredictionResult::Comparison(_) => PredictionKind::Both,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comparison_decodes_price_and_error_entries() {
        let result: ComparisonResult = serde_json::from_value(json!({
            "linear_regression": { "error": "out of range" },
            "gradient_boosting": { "predicted_price": 98.5, "log_price": 4.59 }
        }))
        .unwrap();

        assert_eq!(
            result.linear_regression().and_then(|m| m.error()),
            Some("out of range")
        );
        assert_eq!(
            result.get("gradient_boosting").and_then(|m| m.predicted_price()),
            Some(98.5)
        );
        let order: Vec<&str> = result.ordered().into_iter().map(|(k, _)| k).collect();
        assert_eq!(order, vec!["linear_regression", "gradient_boosting"]);
    }

    #[test]
    fn test_comparison_tolerates_partial_entries() {
        let result: ComparisonResult = serde_json::from_value(json!({
            "linear_regression": { "predicted_price": 10 },
            "random_forest": "unavailable"
        }))
        .unwrap();

        assert_eq!(
            result.linear_regression(),
            Some(&ModelOutcome::Priced {
                predicted_price: 10.0,
                log_price: None
            })
        );
        assert_eq!(
            result.get("random_forest"),
            Some(&ModelOutcome::Unrecognized(json!("unavailable")))
        );
    }

    #[test]
    fn test_form_options_response_without_ranges() {
        let resp: FormOptionsResponse = serde_json::from_value(json!({
            "categorical_options": { "city": ["Boston", "NYC"] }
        }))
        .unwrap();
        assert_eq!(resp.categorical_options.city, vec!["Boston", "NYC"]);
        assert!(resp.categorical_options.room_type.is_empty());
        assert!(resp.numeric_ranges.is_none());
    }

    #[test]
    fn test_model_info_type_field() {
        let info: ModelInfo = serde_json::from_value(json!({
            "linear_regression": { "loaded": true, "type": "Linear Regression" },
            "data_source": "unique_values.txt"
        }))
        .unwrap();
        let lr = info.linear_regression.unwrap();
        assert!(lr.loaded);
        assert_eq!(lr.model_type, "Linear Regression");
        assert!(lr.expected_features.is_none());
    }

    #[test]
    fn test_prediction_kind_parsing() {
        assert_eq!("linear".parse::<PredictionKind>().unwrap(), PredictionKind::Linear);
        assert_eq!("BOTH".parse::<PredictionKind>().unwrap(), PredictionKind::Both);
        assert!("forest".parse::<PredictionKind>().is_err());
        assert_eq!(PredictionKind::Both.path(), "/predict/both");
    }
}
