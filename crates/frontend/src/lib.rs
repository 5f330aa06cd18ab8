//! Client-side services and view models of the SEO dashboard.
//!
//! Components render the signals exposed by the view models under
//! `domain::*::ui` and `usecases::*`; everything that talks to the API
//! lives here.

pub mod domain;
pub mod shared;
pub mod usecases;

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}
