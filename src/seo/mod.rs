pub mod derive;
pub mod jsonld;
pub mod page_meta;
pub mod sitemap;
pub mod slug;

use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;
use crate::models::listing::{ListingKind, ListingRecord};
use crate::models::metadata::DerivedMetadata;
use page_meta::PageMeta;

/// Everything a listing page needs for search engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSeo {
    /// `None` for the not-found variant.
    pub metadata: Option<DerivedMetadata>,
    pub page: PageMeta,
    /// JSON-LD objects in emission order: WebPage, BreadcrumbList, RealEstateListing.
    pub structured_data: Vec<serde_json::Value>,
}

impl ListingSeo {
    pub fn build(record: &ListingRecord, kind: ListingKind, site: &SiteConfig) -> Self {
        let metadata = derive::derive_metadata(record, site);
        let page = PageMeta::for_listing(record, kind, &metadata, site);

        let structured_data = vec![
            jsonld::web_page(site, &page.canonical, &page.title, Some(page.description.as_str())).to_value(),
            jsonld::breadcrumb(site, kind, &page.title, &page.canonical).to_value(),
            jsonld::real_estate_listing(
                site,
                record,
                &metadata,
                &page.title,
                &page.canonical,
                &page.image_url,
                Some(page.description.as_str()),
            )
            .to_value(),
        ];

        Self {
            metadata: Some(metadata),
            page,
            structured_data,
        }
    }

    /// Noindex metadata for a slug that doesn't resolve. No listing object is emitted.
    pub fn not_found(kind: ListingKind, slug: &str, site: &SiteConfig) -> Self {
        let page = PageMeta::not_found(kind, site);
        let canonical = site.listing_url(kind, slug);
        let name = format!("{} | {}", kind.label(), site.brand_name);

        let structured_data = vec![
            jsonld::web_page(site, &canonical, &name, None).to_value(),
            jsonld::breadcrumb(site, kind, slug, &canonical).to_value(),
        ];

        Self {
            metadata: None,
            page,
            structured_data,
        }
    }

    /// Each structured-data object serialized for a `<script>` body.
    pub fn scripts(&self) -> Vec<String> {
        self.structured_data.iter().map(jsonld::to_script_json).collect()
    }
}
