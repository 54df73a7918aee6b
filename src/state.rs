use std::sync::Arc;

use crate::config::SiteConfig;
use crate::content::repository::ListingRepository;

/// Shared server state, provided to handlers via axum `State` and to
/// server functions via Leptos context.
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteConfig>,
    pub listings: Arc<dyn ListingRepository>,
    pub leptos_options: leptos::prelude::LeptosOptions,
}

impl axum::extract::FromRef<AppState> for leptos::prelude::LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.clone()
    }
}

impl AppState {
    pub fn new(
        site: SiteConfig,
        listings: Arc<dyn ListingRepository>,
        leptos_options: leptos::prelude::LeptosOptions,
    ) -> Self {
        Self {
            site: Arc::new(site),
            listings,
            leptos_options,
        }
    }
}
