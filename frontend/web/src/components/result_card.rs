use dioxus::prelude::*;
use pricepredict::render::{ResultEntry, ResultView, RESULTS_HEADING};

/// Prediction results: one card per priced model, an error line per failed one
#[component]
pub fn ResultCards(view: ResultView) -> Element {
    rsx! {
        div { class: "results",
            h3 { "{RESULTS_HEADING}" }
            for entry in view.entries {
                {entry_view(entry)}
            }
        }
    }
}

fn entry_view(entry: ResultEntry) -> Element {
    match entry {
        ResultEntry::Card(card) => rsx! {
            div { class: "result-card",
                h3 { "{card.title}" }
                div { class: "price", "{card.price}" }
                for line in card.details {
                    p { class: "result-detail", "{line}" }
                }
            }
        },
        ResultEntry::Error(message) => rsx! {
            div { class: "result-card error-card",
                p { class: "error", "{message}" }
            }
        },
    }
}
