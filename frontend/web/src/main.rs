mod api;
mod app;
mod components;
mod monitoring;
mod pages;

fn main() {
    monitoring::init();
    dioxus::launch(app::App);
}
