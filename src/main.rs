#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::routing::get;
    use axum::Router;
    use casagrande::api;
    use casagrande::app::{shell, App};
    use casagrande::config::SiteConfig;
    use casagrande::content::repository::{JsonListingRepository, ListingRepository};
    use casagrande::state::AppState;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use std::sync::Arc;
    use tower_http::services::ServeDir;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "casagrande=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting Casagrande server...");

    let site = SiteConfig::from_env()?;

    // Load listings once; content only changes with a redeploy
    let repo = JsonListingRepository::load_dir(&site.content_dir)?;
    tracing::info!(
        dir = %site.content_dir.display(),
        listings = repo.len(),
        "Content loaded"
    );
    let listings: Arc<dyn ListingRepository> = Arc::new(repo);

    // Load Leptos options from Cargo.toml metadata
    let conf = get_configuration(None)?;
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let site_root = leptos_options.site_root.to_string();

    let app_state = AppState::new(site, listings, leptos_options.clone());

    // Generate the Leptos route list for SSR
    let routes = generate_route_list(App);

    let app = Router::new()
        .route("/sitemap.xml", get(api::seo::sitemap_handler))
        .route("/robots.txt", get(api::seo::robots_handler))
        .route(
            "/api/v1/listings/{kind}/{slug}/metadata",
            get(api::listings::listing_metadata_handler),
        )
        .leptos_routes_with_context(
            &app_state,
            routes,
            {
                let state = app_state.clone();
                move || provide_context(state.clone())
            },
            move || shell(leptos_options.clone()),
        )
        .fallback_service(ServeDir::new(&site_root))
        .with_state(app_state);

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

// The hydrate() function in lib.rs handles client-side initialization.
#[cfg(not(feature = "ssr"))]
fn main() {}
