use dioxus::prelude::*;
use pricepredict::api::{PredictionApi, PredictionKind};
use pricepredict::controller::{PredictionController, Status};
use pricepredict::form::{range_hint, Bounds, Field, FieldKind, FormOptionsLoader, LoadedOptions};
use pricepredict::render::amenity_label;

use crate::api::{self, Connection};
use crate::components::ResultCards;
use crate::monitoring::Logger;

fn update_field(mut controller: Signal<PredictionController>, field: Field, raw: &str) {
    if let Err(err) = controller.with_mut(|c| c.set_field(field, raw)) {
        // Partially typed numbers land here; the last valid value is kept
        Logger::debug(&err.to_string());
    }
}

fn toggle_amenity(mut controller: Signal<PredictionController>, tag: &str) {
    controller.with_mut(|c| {
        c.toggle_amenity(tag);
    });
}

fn start_prediction(
    mut controller: Signal<PredictionController>,
    connection: &Connection,
    kind: PredictionKind,
) {
    let Ok(client) = connection.clone() else {
        return;
    };
    let ticket = match controller.with_mut(|c| c.begin_submit(kind)) {
        Ok(ticket) => ticket,
        Err(err) => {
            Logger::warn(&err.to_string());
            return;
        }
    };

    spawn(async move {
        let mut controller = controller;
        let outcome = client.predict(ticket.kind, &ticket.form).await;
        if let Err(err) = &outcome {
            Logger::error(&format!("Error making prediction: {}", err));
        }
        controller.with_mut(|c| c.finish_submit(ticket, outcome));
    });
}

fn label_text(field: Field) -> String {
    if field.is_required() {
        format!("{} *", field.label())
    } else {
        field.label().to_string()
    }
}

fn choice_input(
    controller: Signal<PredictionController>,
    state: &PredictionController,
    field: Field,
) -> Element {
    let loading = state.is_loading_options();
    let current = state.form().get(field);
    let choices = state.options().choices(field).to_vec();
    let placeholder = if loading {
        "Loading...".to_string()
    } else {
        format!("Select {}", field.label().to_lowercase())
    };

    rsx! {
        div { class: "form-group",
            label { {label_text(field)} }
            select {
                name: field.name(),
                value: current.clone(),
                required: field.is_required(),
                disabled: loading,
                onchange: move |evt| update_field(controller, field, &evt.value()),
                option { value: "", "{placeholder}" }
                for choice in choices {
                    option {
                        value: choice.clone(),
                        selected: choice == current,
                        "{choice}"
                    }
                }
            }
        }
    }
}

fn number_input(
    controller: Signal<PredictionController>,
    state: &PredictionController,
    field: Field,
) -> Element {
    let bounds = Bounds::for_field(state.ranges(), field);
    let hint = range_hint(state.ranges(), field);
    let (min, max, step) = match bounds {
        Some(b) => (b.min.to_string(), b.max.to_string(), b.step.to_string()),
        None => (String::new(), String::new(), "1".to_string()),
    };

    rsx! {
        div { class: "form-group",
            label { {label_text(field)} }
            input {
                r#type: "number",
                name: field.name(),
                value: state.form().get(field),
                min,
                max,
                step,
                required: true,
                oninput: move |evt| update_field(controller, field, &evt.value()),
            }
            if let Some(hint) = hint {
                small { class: "range-hint", "{hint}" }
            }
        }
    }
}

fn flag_input(
    controller: Signal<PredictionController>,
    state: &PredictionController,
    field: Field,
) -> Element {
    let checked = state.form().get(field) == "true";

    rsx! {
        div { class: "form-group checkbox-group",
            label {
                input {
                    r#type: "checkbox",
                    name: field.name(),
                    checked,
                    onchange: move |evt| {
                        let raw = if evt.checked() { "true" } else { "false" };
                        update_field(controller, field, raw);
                    },
                }
                {format!(" {}", field.label())}
            }
        }
    }
}

struct AmenityItem {
    tag: String,
    label: String,
    checked: bool,
}

fn amenity_grid(controller: Signal<PredictionController>, state: &PredictionController) -> Element {
    let form = state.form();
    let items: Vec<AmenityItem> = state
        .options()
        .choices(Field::AmenitiesList)
        .iter()
        .map(|tag| AmenityItem {
            tag: tag.clone(),
            label: amenity_label(tag),
            checked: form.has_amenity(tag),
        })
        .collect();
    let count = form.amenities_count();
    let selected = form.amenities_list();

    rsx! {
        div { class: "form-group amenities",
            label { "Amenities (Select all that apply)" }
            if state.is_loading_options() {
                div { class: "loading", "Loading amenities..." }
            } else {
                div { class: "amenities-grid",
                    for item in items {
                        label { class: "amenity-item",
                            input {
                                r#type: "checkbox",
                                checked: item.checked,
                                onchange: move |_| toggle_amenity(controller, &item.tag),
                            }
                            " {item.label}"
                        }
                    }
                }
                div { class: "amenities-summary",
                    strong { "Selected Amenities Count: {count}" }
                    if !selected.is_empty() {
                        div { "Selected: {selected}" }
                    }
                }
            }
        }
    }
}

fn field_input(
    controller: Signal<PredictionController>,
    state: &PredictionController,
    field: Field,
) -> Element {
    match field.kind() {
        FieldKind::Categorical => choice_input(controller, state, field),
        // Derived from the amenity selection
        FieldKind::Numeric if field == Field::AmenitiesCount => rsx! {},
        FieldKind::Numeric => number_input(controller, state, field),
        FieldKind::Boolean => flag_input(controller, state, field),
        FieldKind::Derived => amenity_grid(controller, state),
    }
}

fn status_view(state: &PredictionController) -> Element {
    if let Some(message) = state.error() {
        return rsx! {
            div { class: "error", "{message}" }
        };
    }
    match state.result_view() {
        Some(view) => rsx! {
            ResultCards { view }
        },
        None => rsx! {},
    }
}

#[component]
pub fn Predict() -> Element {
    let connection = use_hook(api::connect);
    let controller = use_signal(PredictionController::new);

    {
        let connection = connection.clone();
        use_future(move || {
            let connection = connection.clone();
            let mut controller = controller;
            async move {
                if !controller.with_mut(|c| c.begin_loading_options()) {
                    return;
                }
                let loaded = match &connection {
                    Ok(client) => FormOptionsLoader::load(client).await,
                    Err(_) => LoadedOptions::fallback(),
                };
                if let Some(notice) = &loaded.notice {
                    Logger::warn(notice);
                }
                controller.with_mut(|c| c.apply_options(loaded));
            }
        });
    }

    let state = controller();
    let blocked = state.submit_blocker().is_some() || connection.is_err();
    let predicting = match state.status() {
        Status::Predicting(kind) => Some(*kind),
        _ => None,
    };
    let connection_linear = connection.clone();
    let connection_both = connection.clone();

    rsx! {
        section { class: "prediction-form", id: "predict",
            h2 { "Property Details" }

            if let Err(message) = &connection {
                div { class: "error", "{message}" }
            }

            div { class: "form-grid",
                for field in Field::ALL {
                    {field_input(controller, &state, field)}
                }
            }

            div { class: "predict-buttons",
                button {
                    class: "predict-btn linear",
                    disabled: blocked,
                    onclick: move |_| start_prediction(controller, &connection_linear, PredictionKind::Linear),
                    if predicting == Some(PredictionKind::Linear) {
                        "Predicting..."
                    } else {
                        {PredictionKind::Linear.label()}
                    }
                }
                button {
                    class: "predict-btn both",
                    disabled: blocked,
                    onclick: move |_| start_prediction(controller, &connection_both, PredictionKind::Both),
                    if predicting == Some(PredictionKind::Both) {
                        "Predicting..."
                    } else {
                        {PredictionKind::Both.label()}
                    }
                }
            }

            if state.is_loading_options() {
                div { class: "loading", "Loading form options from dataset..." }
            }
            if predicting.is_some() {
                div { class: "loading", "Generating prediction..." }
            }

            {status_view(&state)}
        }
    }
}
