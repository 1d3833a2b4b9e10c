pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod render;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod monitoring;

pub use api::{HttpApi, PredictionApi, PredictionKind, PredictionResult};
pub use config::ApiConfig;
pub use controller::{PredictionController, Status, SubmitTicket};
pub use error::{PredictError, Result};
pub use form::{Field, FormState};
pub use render::ResultView;
