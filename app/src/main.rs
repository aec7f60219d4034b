#![allow(non_snake_case)]

mod app;
mod audio;
mod components;
mod viewport;

use dioxus_logger::tracing::Level;

fn main() {
    // Fails only if a logger is already installed
    let _ = dioxus_logger::init(Level::INFO);
    dioxus::launch(app::App);
}
