pub mod app;
pub mod config;
pub mod contact;
pub mod error;
pub mod models {
    pub mod listing;
    pub mod metadata;
}
pub mod content {
    pub mod catalog;
    pub mod repository;
}
pub mod rendering {
    pub mod markdown;
}
pub mod seo;
pub mod components {
    pub mod catalog;
    pub mod listing_card;
    pub mod listing_view;
    pub mod sale_form;
    pub mod seo_head;
}
pub mod api {
    pub mod errors;
    pub mod listings;
    pub mod seo;
}
#[cfg(feature = "ssr")]
pub mod state;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(app::App);
}
