pub mod api;
pub mod app;
pub mod catalog;
pub mod chat;
pub mod components;
pub mod error;
pub mod markdown;
pub mod model;
pub mod normalize;
pub mod orchestrator;
pub mod pages;
pub mod view_model;

#[cfg(feature = "ssr")]
pub mod server;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;

    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
