use dioxus::prelude::*;

#[component]
pub fn Header() -> Element {
    rsx! {
        header { class: "header",
            h1 { class: "header-title", "Rental Price Prediction" }
            p { class: "header-subtitle",
                "Estimate a nightly price from your property details"
            }
        }
    }
}
