// src/cli/output.rs
// Terminal rendering of options and results

use colored::Colorize;

use crate::api::{FormOptions, HealthResponse, ModelInfo, NumericRanges};
use crate::form::{range_hint, Field, FieldKind};
use crate::render::{amenity_label, ResultEntry, ResultView, RESULTS_HEADING};

pub fn print_result(view: &ResultView) {
    println!("\n{}", RESULTS_HEADING.bold());
    for entry in &view.entries {
        match entry {
            ResultEntry::Card(card) => {
                println!("  {}", card.title.bold());
                println!("    {}", card.price.green().bold());
                for line in &card.details {
                    println!("    {}", line.dimmed());
                }
            }
            ResultEntry::Error(msg) => println!("  {}", msg.red()),
        }
    }
}

pub fn notice(msg: &str) {
    eprintln!("{} {}", "!".yellow().bold(), msg.yellow());
}

pub fn failure(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}

pub fn print_health(health: &HealthResponse) {
    let status = if health.status == "healthy" {
        health.status.green()
    } else {
        health.status.yellow()
    };
    println!("Service: {}", status);
    println!(
        "Linear model loaded: {}",
        if health.linear_model_loaded { "yes".green() } else { "no".red() }
    );
}

pub fn print_options(options: &FormOptions, ranges: &NumericRanges) {
    for field in Field::ALL {
        match field.kind() {
            FieldKind::Categorical => {
                println!("{}", field.label().bold());
                for choice in options.choices(field) {
                    println!("  {}", choice);
                }
            }
            FieldKind::Derived => {
                println!("{}", field.label().bold());
                for tag in options.choices(field) {
                    println!("  {} ({})", amenity_label(tag), tag.dimmed());
                }
            }
            FieldKind::Numeric => {
                if let Some(hint) = range_hint(ranges, field) {
                    let median = ranges
                        .median(field)
                        .map(|m| format!(", median {}", m))
                        .unwrap_or_default();
                    println!("{}: {}{}", field.label().bold(), hint, median);
                }
            }
            FieldKind::Boolean => {}
        }
    }
}

pub fn print_model_info(info: &ModelInfo) {
    match &info.linear_regression {
        Some(model) => {
            println!(
                "{}: {}",
                model.model_type.bold(),
                if model.loaded { "loaded".green() } else { "not loaded".red() }
            );
            if let Some(features) = &model.expected_features {
                println!("  Expected features: {}", features.join(", "));
            }
        }
        None => println!("{}", "No model information reported".yellow()),
    }
    if let Some(source) = &info.data_source {
        println!("Data source: {}", source);
    }
    if let Some(columns) = &info.unique_values_columns {
        println!("Known columns: {}", columns.join(", "));
    }
}
