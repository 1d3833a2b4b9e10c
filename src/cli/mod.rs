// src/cli/mod.rs
// Command-line front-end

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::api::{HttpApi, PredictionApi, PredictionKind};
use crate::config::ApiConfig;
use crate::controller::{PredictionController, Status};
use crate::error::{PredictError, Result};
use crate::form::{FormOptionsLoader, FormState};
use crate::render::ResultView;

pub mod output;
pub mod wizard;

#[derive(Debug, Parser)]
#[command(
    name = "pricepredict",
    about = "Estimate nightly rental prices from property details",
    version
)]
pub struct Cli {
    /// Prediction service base URL (overrides PRICEPREDICT_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fill in the form interactively (default).
    Form,

    /// Check that the prediction service is up.
    Health,

    /// Print the choices and numeric ranges the service offers.
    Options,

    /// Print information about the loaded model.
    #[command(name = "model-info")]
    ModelInfo,

    /// Request a prediction without prompts.
    Predict(PredictArgs),
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Which endpoint to call: linear or both
    #[arg(long, default_value = "both")]
    pub model: PredictionKind,

    /// JSON file holding form fields; missing fields keep their defaults
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Field override, e.g. --set city=Chicago
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub set: Vec<String>,

    /// Amenity tag to select, repeatable
    #[arg(long = "amenity", value_name = "TAG")]
    pub amenities: Vec<String>,

    /// Print the raw JSON response
    #[arg(long)]
    pub json: bool,
}

pub async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = ApiConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }
    let api = HttpApi::new(config)?;

    match cli.command.unwrap_or(Commands::Form) {
        Commands::Form => wizard::run_form_wizard(&api).await,
        Commands::Health => {
            output::print_health(&api.health().await?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Options => {
            let loaded = FormOptionsLoader::load(&api).await;
            if let Some(notice) = &loaded.notice {
                output::notice(notice);
            }
            output::print_options(&loaded.options, &loaded.ranges);
            Ok(ExitCode::SUCCESS)
        }
        Commands::ModelInfo => {
            output::print_model_info(&api.model_info().await?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Predict(args) => run_predict(&api, args).await,
    }
}

/// Split `field=value`
pub fn parse_assignment(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| PredictError::InvalidValue {
            field: "--set".to_string(),
            value: raw.to_string(),
        })
}

/// Load options, then layer the input file and overrides on top of the seeded defaults
pub async fn prepare_controller<A: PredictionApi + ?Sized>(
    api: &A,
    args: &PredictArgs,
) -> Result<PredictionController> {
    let mut controller = PredictionController::new();
    controller.load_options(api).await;
    if let Some(notice) = controller.error() {
        output::notice(notice);
    }

    if let Some(path) = &args.input {
        let text = std::fs::read_to_string(path)?;
        let form: FormState = serde_json::from_str(&text)?;
        controller.replace_form(form);
    }
    for assignment in &args.set {
        let (name, value) = parse_assignment(assignment)?;
        controller.set_field_by_name(name, value)?;
    }
    for tag in &args.amenities {
        controller.set_amenity(tag, true);
    }

    for (field, value) in controller.unlisted_values() {
        output::notice(&format!(
            "{} '{}' is not one of the service's choices",
            field.label(),
            value
        ));
    }
    Ok(controller)
}

async fn run_predict(api: &HttpApi, args: PredictArgs) -> Result<ExitCode> {
    let mut controller = prepare_controller(api, &args).await?;

    if let Some(reason) = controller.submit_blocker() {
        output::failure(&format!("Cannot request a prediction: {}", reason));
        return Ok(ExitCode::from(2));
    }

    controller.submit(api, args.model).await?;
    match controller.status() {
        Status::ResultShown(result) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(result)?);
            } else {
                output::print_result(&ResultView::from_result(result));
            }
            Ok(ExitCode::SUCCESS)
        }
        Status::Error(message) => {
            output::failure(message);
            Ok(ExitCode::FAILURE)
        }
        other => Err(PredictError::NotSubmittable(format!(
            "unexpected state {}",
            other.label()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("city=New York").unwrap(), ("city", "New York"));
        assert_eq!(parse_assignment("bed_type=").unwrap(), ("bed_type", ""));
        assert!(parse_assignment("city").is_err());
        assert!(parse_assignment("=Chicago").is_err());
    }

    #[test]
    fn test_cli_parses_predict() {
        let cli = Cli::try_parse_from([
            "pricepredict",
            "--api-url",
            "http://127.0.0.1:9000",
            "predict",
            "--model",
            "linear",
            "--set",
            "city=Chicago",
            "--amenity",
            "tv",
            "--amenity",
            "kitchen",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://127.0.0.1:9000"));
        match cli.command {
            Some(Commands::Predict(args)) => {
                assert_eq!(args.model, PredictionKind::Linear);
                assert_eq!(args.set, vec!["city=Chicago"]);
                assert_eq!(args.amenities, vec!["tv", "kitchen"]);
                assert!(!args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_defaults_to_form() {
        let cli = Cli::try_parse_from(["pricepredict"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_rejects_unknown_model() {
        assert!(Cli::try_parse_from(["pricepredict", "predict", "--model", "forest"]).is_err());
    }
}
