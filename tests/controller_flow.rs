// tests/controller_flow.rs
// Form controller driven by an in-memory prediction service

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::BTreeMap;

use pricepredict::api::{
    ComparisonResult, FormOptions, FormOptionsResponse, HealthResponse, ModelInfo, ModelOutcome,
    NumericRange, NumericRanges, PredictionApi, PredictionKind, PredictionResult,
    SinglePrediction,
};
use pricepredict::controller::{PredictionController, Status};
use pricepredict::error::{PredictError, Result};
use pricepredict::form::{fallback_options, Field, FormState, OPTIONS_FALLBACK_MESSAGE};

/// Scripted service that records every request body it receives
#[derive(Default)]
struct FakeApi {
    options: Option<FormOptionsResponse>,
    fail_predictions: bool,
    requests: RefCell<Vec<(PredictionKind, FormState)>>,
}

impl FakeApi {
    fn with_options(options: FormOptionsResponse) -> Self {
        Self {
            options: Some(options),
            ..Default::default()
        }
    }

    fn requests(&self) -> Vec<(PredictionKind, FormState)> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl PredictionApi for FakeApi {
    async fn health(&self) -> Result<HealthResponse> {
        Ok(HealthResponse {
            status: "healthy".to_string(),
            linear_model_loaded: true,
        })
    }

    async fn form_options(&self) -> Result<FormOptionsResponse> {
        self.options.clone().ok_or_else(|| PredictError::Status {
            status: 503,
            detail: "Unique values data not loaded".to_string(),
        })
    }

    async fn model_info(&self) -> Result<ModelInfo> {
        Ok(ModelInfo::default())
    }

    async fn predict_linear(&self, form: &FormState) -> Result<SinglePrediction> {
        self.requests
            .borrow_mut()
            .push((PredictionKind::Linear, form.clone()));
        if self.fail_predictions {
            return Err(PredictError::Status {
                status: 500,
                detail: "Linear regression model not loaded".to_string(),
            });
        }
        Ok(SinglePrediction {
            predicted_price: 120.0,
            model_used: "linear".to_string(),
            log_price: 4.79,
        })
    }

    async fn predict_both(&self, form: &FormState) -> Result<ComparisonResult> {
        self.requests
            .borrow_mut()
            .push((PredictionKind::Both, form.clone()));
        let mut models = BTreeMap::new();
        models.insert(
            "linear_regression".to_string(),
            ModelOutcome::Failed {
                error: "out of range".to_string(),
            },
        );
        Ok(ComparisonResult { models })
    }
}

fn range(min: f64, max: f64, median: Option<f64>) -> Option<NumericRange> {
    Some(NumericRange { min, max, median })
}

fn service_options() -> FormOptionsResponse {
    FormOptionsResponse {
        categorical_options: FormOptions {
            property_type: vec!["Apartment".into(), "House".into()],
            room_type: vec!["Entire home/apt".into(), "Private room".into()],
            bed_type: vec!["Real Bed".into()],
            cancellation_policy: vec!["flexible".into(), "strict".into()],
            city: vec!["Boston".into(), "NYC".into()],
            amenities_list: vec!["tv".into(), "kitchen".into(), "wireless_internet".into()],
        },
        numeric_ranges: Some(NumericRanges {
            accommodates: range(1.0, 16.0, Some(4.0)),
            bathrooms: range(0.0, 8.0, Some(1.5)),
            bedrooms: range(0.0, 10.0, Some(2.0)),
            beds: range(0.0, 18.0, None),
            amenities_count: None,
        }),
        total_records: None,
    }
}

async fn loaded(api: &FakeApi) -> PredictionController {
    let mut controller = PredictionController::new();
    controller.load_options(api).await;
    controller
}

fn fill_required(controller: &mut PredictionController) {
    controller.set_field(Field::PropertyType, "House").unwrap();
    controller.set_field(Field::RoomType, "Entire home/apt").unwrap();
    controller.set_field(Field::City, "Boston").unwrap();
}

#[tokio::test]
async fn test_options_failure_installs_fixed_fallback() {
    let api = FakeApi::default();
    let controller = loaded(&api).await;

    assert_eq!(
        controller.status(),
        &Status::Error(OPTIONS_FALLBACK_MESSAGE.to_string())
    );
    assert!(!controller.is_loading_options());
    assert_eq!(controller.options(), &fallback_options());
    assert_eq!(
        controller.options().property_type,
        vec!["Apartment", "House", "Other"]
    );
    assert_eq!(controller.options().city, vec!["New York", "Los Angeles", "Chicago"]);
    assert_eq!(controller.options().amenities_list.len(), 10);
    assert_eq!(controller.options().amenities_list[0], "air_conditioning");
    // Numeric fields keep their initial values
    assert_eq!(controller.form(), &FormState::new());
}

#[tokio::test]
async fn test_medians_seed_numeric_fields() {
    let api = FakeApi::with_options(service_options());
    let controller = loaded(&api).await;

    assert_eq!(controller.status(), &Status::Ready);
    let form = controller.form();
    assert_eq!(form.accommodates, 4);
    assert_eq!(form.bathrooms, 1.5);
    assert_eq!(form.bedrooms, 2);
    // No median reported: the built-in defaults apply
    assert_eq!(form.beds, 1);
    assert_eq!(form.amenities_count(), 3);
    assert!(form.amenities().is_empty());
}

#[tokio::test]
async fn test_options_load_only_once() {
    let api = FakeApi::with_options(service_options());
    let mut controller = loaded(&api).await;
    controller.set_field(Field::Accommodates, "9").unwrap();

    controller.load_options(&api).await;
    assert_eq!(controller.form().accommodates, 9);
}

#[tokio::test]
async fn test_amenity_toggles_keep_count_in_sync() {
    let api = FakeApi::with_options(service_options());
    let mut controller = loaded(&api).await;

    for tag in ["tv", "kitchen", "wireless_internet"] {
        controller.toggle_amenity(tag);
        assert_eq!(
            controller.form().amenities_count() as usize,
            controller.form().amenities().len()
        );
    }
    assert_eq!(controller.form().amenities_list(), "tv, kitchen, wireless_internet");

    controller.toggle_amenity("kitchen");
    assert_eq!(controller.form().amenities_list(), "tv, wireless_internet");
    assert_eq!(controller.form().amenities_count(), 2);

    // Select then deselect restores the prior state
    let before = controller.form().clone();
    controller.toggle_amenity("kitchen");
    controller.toggle_amenity("kitchen");
    assert_eq!(controller.form(), &before);

    controller.toggle_amenity("tv");
    controller.toggle_amenity("wireless_internet");
    assert_eq!(controller.form().amenities_list(), "");
    assert_eq!(controller.form().amenities_count(), 0);
}

#[tokio::test]
async fn test_request_body_matches_form() {
    let api = FakeApi::with_options(service_options());
    let mut controller = loaded(&api).await;
    fill_required(&mut controller);
    controller.set_amenity("tv", true);
    controller.set_amenity("kitchen", true);
    controller.set_field(Field::CleaningFee, "true").unwrap();

    controller.submit(&api, PredictionKind::Linear).await.unwrap();

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    let (kind, form) = &requests[0];
    assert_eq!(*kind, PredictionKind::Linear);

    let body = serde_json::to_value(form).unwrap();
    assert_eq!(body["amenities_list"], "tv, kitchen");
    assert_eq!(body["amenities_count"], 2);
    assert_eq!(body["city"], "Boston");
    assert_eq!(body["cleaning_fee"], true);
    assert_eq!(body["accommodates"], 4);
    assert_eq!(body.as_object().unwrap().len(), 13);
}

#[tokio::test]
async fn test_missing_required_field_sends_nothing() {
    let api = FakeApi::with_options(service_options());
    let mut controller = loaded(&api).await;
    controller.set_field(Field::PropertyType, "House").unwrap();
    controller.set_field(Field::RoomType, "Private room").unwrap();

    let err = controller
        .submit(&api, PredictionKind::Both)
        .await
        .unwrap_err();
    assert!(matches!(err, PredictError::NotSubmittable(_)));
    assert!(err.to_string().contains("City"));
    assert!(api.requests().is_empty());
    assert_eq!(controller.status(), &Status::Ready);
}

#[tokio::test]
async fn test_linear_result_and_comparison_error() {
    let api = FakeApi::with_options(service_options());
    let mut controller = loaded(&api).await;
    fill_required(&mut controller);

    controller.submit(&api, PredictionKind::Linear).await.unwrap();
    let view = controller.result_view().unwrap();
    let card = view.cards().next().unwrap();
    assert_eq!(card.title, "Price Prediction");
    assert_eq!(card.price, "$120");
    assert!(view.to_string().contains("Model: linear"));

    controller.submit(&api, PredictionKind::Both).await.unwrap();
    let view = controller.result_view().unwrap();
    let errors: Vec<&str> = view.errors().collect();
    assert_eq!(errors, vec!["Linear Regression Error: out of range"]);
    assert!(!view.to_string().contains('$'));
}

#[tokio::test]
async fn test_failed_prediction_allows_resubmit() {
    let api = FakeApi {
        options: Some(service_options()),
        fail_predictions: true,
        ..Default::default()
    };
    let mut controller = loaded(&api).await;
    fill_required(&mut controller);

    controller.submit(&api, PredictionKind::Linear).await.unwrap();
    assert_eq!(
        controller.error(),
        Some("Request failed with status code 500: Linear regression model not loaded")
    );
    assert!(controller.result().is_none());
    assert!(controller.can_submit());

    controller.submit(&api, PredictionKind::Both).await.unwrap();
    assert!(matches!(
        controller.result(),
        Some(PredictionResult::Comparison(_))
    ));
    assert_eq!(api.requests().len(), 2);
}

#[tokio::test]
async fn test_submit_gate_rejects_overlap() {
    let api = FakeApi::with_options(service_options());
    let mut controller = loaded(&api).await;
    fill_required(&mut controller);

    let pending = controller.begin_submit(PredictionKind::Both).unwrap();
    assert!(matches!(
        controller.begin_submit(PredictionKind::Linear),
        Err(PredictError::NotSubmittable(_))
    ));

    let outcome = api.predict(pending.kind, &pending.form).await;
    controller.finish_submit(pending, outcome);
    assert_eq!(
        controller.result().map(|r| r.kind()),
        Some(PredictionKind::Both)
    );
}

#[tokio::test]
async fn test_late_response_overwrites_newer_result() {
    let api = FakeApi::with_options(service_options());
    let mut controller = loaded(&api).await;
    fill_required(&mut controller);

    // First request is still in flight when the page lets go of it
    let first = controller.begin_submit(PredictionKind::Linear).unwrap();
    let late = first.clone();
    controller.finish_submit(
        first,
        Err(PredictError::Status {
            status: 504,
            detail: "timed out".to_string(),
        }),
    );

    let second = controller.begin_submit(PredictionKind::Both).unwrap();
    assert!(second.id > late.id);
    let second_outcome = api.predict(second.kind, &second.form).await;
    controller.finish_submit(second, second_outcome);
    assert_eq!(
        controller.result().map(|r| r.kind()),
        Some(PredictionKind::Both)
    );

    // The older ticket lands last and is what the user sees
    let late_outcome = api.predict(late.kind, &late.form).await;
    controller.finish_submit(late, late_outcome);
    assert_eq!(
        controller.result().map(|r| r.kind()),
        Some(PredictionKind::Linear)
    );
    let view = controller.result_view().unwrap();
    assert_eq!(view.cards().next().unwrap().price, "$120");
}
