use chrono::{DateTime, Utc};

use crate::config::SiteConfig;
use crate::content::repository::ListingRepository;
use crate::error::AppError;
use crate::models::listing::ListingKind;
use crate::seo::sitemap::{build_sitemap, render_sitemap_xml};

/// Sitemap document for the current content.
pub async fn sitemap_xml(
    repo: &dyn ListingRepository,
    site: &SiteConfig,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    let projects = repo.list(ListingKind::Project).await?;
    let properties = repo.list(ListingKind::Property).await?;

    let entries = build_sitemap(site, &projects, &properties, now);
    tracing::debug!(entries = entries.len(), "Generated sitemap");
    Ok(render_sitemap_xml(&entries))
}

#[cfg(feature = "ssr")]
pub use handlers::*;

#[cfg(feature = "ssr")]
mod handlers {
    use axum::extract::State;
    use axum::http::header;
    use axum::response::IntoResponse;

    use super::*;
    use crate::seo::sitemap::render_robots_txt;
    use crate::state::AppState;

    /// `GET /sitemap.xml`
    pub async fn sitemap_handler(
        State(state): State<AppState>,
    ) -> Result<impl IntoResponse, AppError> {
        let xml = sitemap_xml(state.listings.as_ref(), &state.site, Utc::now()).await?;
        Ok(([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml))
    }

    /// `GET /robots.txt`
    pub async fn robots_handler(State(state): State<AppState>) -> impl IntoResponse {
        (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            render_robots_txt(&state.site),
        )
    }
}
