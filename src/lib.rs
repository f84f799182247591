// lib.rs - Root module for the catalog_proposals library
//
// The same crate builds the SSR server (feature "ssr") and the WASM bundle
// that hydrates it in the browser (feature "hydrate").

pub mod web_app;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(web_app::App);
}
