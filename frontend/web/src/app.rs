use crate::components::Header;
use crate::pages::Predict;
use dioxus::prelude::*;

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[component]
pub fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        div { class: "app",
            Header {}
            main { class: "container",
                Predict {}
            }
        }
    }
}
