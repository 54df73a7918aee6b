use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;
use crate::contact::listing_enquiry_link;
use crate::content::repository::ListingRepository;
use crate::error::AppError;
use crate::models::listing::{ListingKind, ListingRecord};
use crate::rendering::markdown::render_description;
use crate::seo::ListingSeo;

/// Everything a listing detail page renders, resolved on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPage {
    pub kind: ListingKind,
    /// The slug as requested, before alias resolution.
    pub slug: String,
    /// `None` when the slug doesn't resolve.
    pub record: Option<ListingRecord>,
    pub seo: ListingSeo,
    /// Sanitized HTML of the listing description.
    pub description_html: Option<String>,
    pub enquiry_link: String,
}

impl ListingPage {
    pub fn is_found(&self) -> bool {
        self.record.is_some()
    }
}

/// Parse a kind from a URL segment, rejecting unknown values.
pub fn parse_kind(raw: &str) -> Result<ListingKind, AppError> {
    ListingKind::from_str_ci(raw)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown listing kind '{}'", raw)))
}

/// Resolve a listing page. An unknown slug yields the not-found variant
/// rather than an error.
pub async fn load_listing_page(
    repo: &dyn ListingRepository,
    site: &SiteConfig,
    kind: ListingKind,
    slug: &str,
) -> Result<ListingPage, AppError> {
    let record = repo.find_by_slug(kind, slug).await?;

    let page = match record {
        Some(record) => {
            tracing::debug!(%kind, slug = %record.slug, "Rendering listing");
            ListingPage {
                kind,
                slug: slug.to_string(),
                seo: ListingSeo::build(&record, kind, site),
                description_html: record.description.as_deref().map(render_description),
                enquiry_link: listing_enquiry_link(&record, kind, site),
                record: Some(record),
            }
        }
        None => {
            tracing::info!(%kind, slug, "Listing not found");
            ListingPage {
                kind,
                slug: slug.to_string(),
                record: None,
                seo: ListingSeo::not_found(kind, slug, site),
                description_html: None,
                enquiry_link: crate::contact::whatsapp_link(&site.contact.whatsapp, ""),
            }
        }
    };

    Ok(page)
}

/// Derived SEO data for one listing. Unknown slugs are `NotFound`.
pub async fn listing_metadata(
    repo: &dyn ListingRepository,
    site: &SiteConfig,
    kind: ListingKind,
    slug: &str,
) -> Result<ListingSeo, AppError> {
    let record = repo
        .find_by_slug(kind, slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} '{}'", kind.label(), slug)))?;

    Ok(ListingSeo::build(&record, kind, site))
}

#[cfg(feature = "ssr")]
pub use handlers::*;

#[cfg(feature = "ssr")]
mod handlers {
    use axum::extract::{Path, State};
    use axum::Json;

    use super::*;
    use crate::state::AppState;

    /// `GET /api/v1/listings/{kind}/{slug}/metadata`
    pub async fn listing_metadata_handler(
        State(state): State<AppState>,
        Path((kind, slug)): Path<(String, String)>,
    ) -> Result<Json<ListingSeo>, AppError> {
        let kind = parse_kind(&kind)?;
        let seo = listing_metadata(state.listings.as_ref(), &state.site, kind, &slug).await?;
        Ok(Json(seo))
    }
}
