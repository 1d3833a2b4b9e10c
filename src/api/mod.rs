// src/api/mod.rs
// Prediction service interface

use async_trait::async_trait;

use crate::error::Result;
use crate::form::FormState;

pub mod client;
pub mod types;

pub use client::HttpApi;
pub use types::{
    ComparisonResult, FormOptions, FormOptionsResponse, HealthResponse, ModelInfo, ModelOutcome,
    ModelStatus, NumericRange, NumericRanges, PredictionKind, PredictionResult, SinglePrediction,
};

/// Endpoints of the remote prediction service.
///
/// Futures are not `Send`: the browser build drives them on a single-threaded
/// event loop.
#[async_trait(?Send)]
pub trait PredictionApi {
    async fn health(&self) -> Result<HealthResponse>;

    async fn form_options(&self) -> Result<FormOptionsResponse>;

    async fn model_info(&self) -> Result<ModelInfo>;

    async fn predict_linear(&self, form: &FormState) -> Result<SinglePrediction>;

    async fn predict_both(&self, form: &FormState) -> Result<ComparisonResult>;

    /// Dispatch to the endpoint for `kind`
    async fn predict(&self, kind: PredictionKind, form: &FormState) -> Result<PredictionResult> {
        match kind {
            PredictionKind::Linear => self.predict_linear(form).await.map(PredictionResult::Single),
            PredictionKind::Both => self.predict_both(form).await.map(PredictionResult::Comparison),
        }
    }
}
