// src/cli/wizard.rs
// Interactive form: one prompt per field, then a prediction

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use std::process::ExitCode;

use super::output;
use crate::api::{PredictionApi, PredictionKind};
use crate::controller::{PredictionController, Status};
use crate::error::{PredictError, Result};
use crate::form::{range_hint, Bounds, Field, FieldKind};
use crate::render::amenity_label;

fn prompt_err(err: dialoguer::Error) -> PredictError {
    PredictError::Prompt(err.to_string())
}

pub async fn run_form_wizard<A: PredictionApi + ?Sized>(api: &A) -> Result<ExitCode> {
    let theme = ColorfulTheme::default();
    let mut controller = PredictionController::new();

    println!("Loading form options from dataset...");
    controller.load_options(api).await;
    if let Some(notice) = controller.error() {
        output::notice(notice);
    }

    for field in Field::ALL {
        match field.kind() {
            FieldKind::Categorical => prompt_choice(&theme, &mut controller, field)?,
            FieldKind::Numeric if field != Field::AmenitiesCount => {
                prompt_number(&theme, &mut controller, field)?
            }
            FieldKind::Numeric => {}
            FieldKind::Boolean => {
                let current = controller.form().get(field) == "true";
                let checked = Confirm::with_theme(&theme)
                    .with_prompt(field.label())
                    .default(current)
                    .interact()
                    .map_err(prompt_err)?;
                controller.set_field(field, &checked.to_string())?;
            }
            FieldKind::Derived => prompt_amenities(&theme, &mut controller)?,
        }
    }

    loop {
        if let Some(reason) = controller.submit_blocker() {
            output::failure(&format!("Cannot request a prediction: {}", reason));
            return Ok(ExitCode::from(2));
        }

        let kinds = PredictionKind::all();
        let labels: Vec<&str> = kinds.iter().map(|k| k.label()).collect();
        let picked = Select::with_theme(&theme)
            .with_prompt("Model")
            .items(&labels)
            .default(1)
            .interact()
            .map_err(prompt_err)?;

        println!("Generating prediction...");
        controller.submit(api, kinds[picked]).await?;
        match controller.status() {
            Status::ResultShown(_) => {
                if let Some(view) = controller.result_view() {
                    output::print_result(&view);
                }
            }
            Status::Error(message) => output::failure(message),
            _ => {}
        }

        let again = Confirm::with_theme(&theme)
            .with_prompt("Request another prediction with the same details?")
            .default(false)
            .interact()
            .map_err(prompt_err)?;
        if !again {
            break;
        }
    }

    Ok(match controller.status() {
        Status::Error(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

fn prompt_choice(
    theme: &ColorfulTheme,
    controller: &mut PredictionController,
    field: Field,
) -> Result<()> {
    let choices = controller.options().choices(field).to_vec();
    let prompt = if field.is_required() {
        format!("{} *", field.label())
    } else {
        field.label().to_string()
    };

    let value = if choices.is_empty() {
        Input::<String>::with_theme(theme)
            .with_prompt(prompt)
            .allow_empty(!field.is_required())
            .interact_text()
            .map_err(prompt_err)?
    } else {
        let current = controller.form().get(field);
        let default = choices.iter().position(|c| *c == current).unwrap_or(0);
        let picked = Select::with_theme(theme)
            .with_prompt(prompt)
            .items(&choices)
            .default(default)
            .interact()
            .map_err(prompt_err)?;
        choices[picked].clone()
    };

    controller.set_field(field, &value)
}

fn prompt_number(
    theme: &ColorfulTheme,
    controller: &mut PredictionController,
    field: Field,
) -> Result<()> {
    let bounds = Bounds::for_field(controller.ranges(), field);
    let prompt = match range_hint(controller.ranges(), field) {
        Some(hint) => format!("{} * ({})", field.label(), hint),
        None => format!("{} *", field.label()),
    };
    let probe = controller.form().clone();

    let value = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .default(controller.form().get(field))
        .validate_with(move |input: &String| -> std::result::Result<(), String> {
            let mut scratch = probe.clone();
            scratch.set(field, input).map_err(|e| e.to_string())?;
            if let (Some(bounds), Ok(number)) = (bounds, input.trim().parse::<f64>()) {
                if !bounds.contains(number) {
                    return Err(format!("must be between {} and {}", bounds.min, bounds.max));
                }
            }
            Ok(())
        })
        .interact_text()
        .map_err(prompt_err)?;

    controller.set_field(field, &value)
}

fn prompt_amenities(theme: &ColorfulTheme, controller: &mut PredictionController) -> Result<()> {
    let tags = controller.options().choices(Field::AmenitiesList).to_vec();
    if tags.is_empty() {
        return Ok(());
    }
    let labels: Vec<String> = tags.iter().map(|t| amenity_label(t)).collect();
    let checked: Vec<bool> = tags.iter().map(|t| controller.form().has_amenity(t)).collect();

    let picked = MultiSelect::with_theme(theme)
        .with_prompt("Amenities (select all that apply)")
        .items(&labels)
        .defaults(&checked)
        .interact()
        .map_err(prompt_err)?;

    // One checkbox change per amenity
    for (i, tag) in tags.iter().enumerate() {
        let selected = picked.contains(&i);
        if selected != controller.form().has_amenity(tag) {
            controller.set_amenity(tag, selected);
        }
    }

    println!(
        "Selected Amenities Count: {}",
        controller.form().amenities_count()
    );
    Ok(())
}
