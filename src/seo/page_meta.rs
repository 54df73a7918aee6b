use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;
use crate::models::listing::{ListingKind, ListingRecord};
use crate::models::metadata::DerivedMetadata;
use crate::rendering::markdown::plain_text_excerpt;
use crate::seo::derive::format_amount;

/// Maximum length of `<meta name="description">`.
pub const DESCRIPTION_MAX_CHARS: usize = 160;

/// Open Graph image dimensions every page advertises.
pub const OG_IMAGE_WIDTH: u32 = 1200;
pub const OG_IMAGE_HEIGHT: u32 = 630;

/// Crawler directives for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Robots {
    pub index: bool,
    pub follow: bool,
}

impl Robots {
    pub const INDEX: Robots = Robots {
        index: true,
        follow: true,
    };
    pub const NOINDEX: Robots = Robots {
        index: false,
        follow: false,
    };

    /// Value of `<meta name="robots">`.
    pub fn content(&self) -> String {
        let index = if self.index { "index" } else { "noindex" };
        let follow = if self.follow { "follow" } else { "nofollow" };
        if self.index {
            format!("{index}, {follow}, max-image-preview:large, max-snippet:-1, max-video-preview:-1")
        } else {
            format!("{index}, {follow}")
        }
    }
}

/// Everything that goes into a page's `<head>` besides structured data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical: String,
    pub image_url: String,
    pub image_alt: String,
    pub robots: Robots,
    pub site_name: String,
    pub locale: String,
    pub language: String,
}

impl PageMeta {
    fn base(site: &SiteConfig, title: String, description: String, canonical: String, image_url: String) -> Self {
        Self {
            image_alt: title.clone(),
            title,
            description,
            keywords: Vec::new(),
            canonical,
            image_url,
            robots: Robots::INDEX,
            site_name: site.brand_name.clone(),
            locale: site.locale.clone(),
            language: site.language.clone(),
        }
    }

    /// Head metadata for a listing detail page.
    pub fn for_listing(
        record: &ListingRecord,
        kind: ListingKind,
        meta: &DerivedMetadata,
        site: &SiteConfig,
    ) -> Self {
        let canonical = site.listing_url(kind, &record.slug);
        let image_url = listing_image_url(record, kind, site);

        let mut page = Self::base(
            site,
            listing_page_title(record, meta),
            listing_description(record),
            canonical,
            image_url,
        );
        page.keywords = meta.keyword_set.iter().cloned().collect();
        page
    }

    /// Head metadata when a slug doesn't resolve. Never indexed.
    pub fn not_found(kind: ListingKind, site: &SiteConfig) -> Self {
        let (article, found) = match kind {
            ListingKind::Property => ("La", "encontrada"),
            ListingKind::Project | ListingKind::Rental => ("El", "encontrado"),
        };
        let title = format!("{} no {} | {}", kind.label(), found, site.brand_name);
        let description = format!(
            "{} {} que buscas no está disponible. Revisa terrenos y lotes en {} y alrededores.",
            article,
            kind.label().to_lowercase(),
            site.address.region
        );
        let mut page = Self::base(
            site,
            title,
            description,
            site.catalog_url(kind),
            site.fallback_image(kind),
        );
        page.robots = Robots::NOINDEX;
        page
    }

    /// Head metadata for the catalog of one listing kind.
    pub fn for_catalog(kind: ListingKind, site: &SiteConfig) -> Self {
        let region = &site.address.region;
        let title = format!("{} en {} | Lotes, Terrenos y Proyectos", kind.plural_label(), region);
        let description = format!(
            "Catálogo de {} en {}: lotes y terrenos para vivienda, casa de campo o inversión. \
             Agenda tu visita por WhatsApp.",
            kind.plural_label().to_lowercase(),
            region
        );
        let mut page = Self::base(
            site,
            title,
            description,
            site.catalog_url(kind),
            site.fallback_image(kind),
        );
        page.keywords = site.base_keywords.clone();
        page
    }

    /// Head metadata for `/inmuebles`, the catalog of every kind.
    pub fn for_all_listings(site: &SiteConfig) -> Self {
        let region = &site.address.region;
        let title = format!("Propiedades en {region} | Lotes, Terrenos y Proyectos");
        let description = format!(
            "Catálogo de propiedades en {region}: lotes, terrenos y proyectos para vivienda, \
             casa de campo o inversión. Asesoría completa y procesos seguros. Agenda tu visita por WhatsApp."
        );
        let mut page = Self::base(
            site,
            title,
            plain_text_excerpt(&description, DESCRIPTION_MAX_CHARS),
            site.absolute_url("/inmuebles"),
            site.absolute_url("/og-image.jpg"),
        );
        page.keywords = site.base_keywords.clone();
        page
    }

    /// Head metadata for the `/nosotros` page.
    pub fn about(site: &SiteConfig) -> Self {
        let region = &site.address.region;
        let title = format!("Nosotros | {} – Inmobiliaria en {region}", site.brand_name);
        let description = format!(
            "Conoce {}, inmobiliaria en {region} especializada en venta de terrenos y lotes. \
             Procesos seguros y acompañamiento completo.",
            site.brand_name
        );
        let mut page = Self::base(
            site,
            title,
            plain_text_excerpt(&description, DESCRIPTION_MAX_CHARS),
            site.absolute_url("/nosotros"),
            site.absolute_url("/og-nosotros.jpg"),
        );
        page.keywords = site.base_keywords.clone();
        page
    }

    /// Head metadata for the home page.
    pub fn home(site: &SiteConfig) -> Self {
        let title = format!(
            "{} | Terrenos y Lotes en {}",
            site.brand_name, site.address.region
        );
        let mut page = Self::base(
            site,
            title,
            plain_text_excerpt(&site.description, DESCRIPTION_MAX_CHARS),
            site.absolute_url("/"),
            site.absolute_url("/og-image.jpg"),
        );
        page.keywords = site.base_keywords.clone();
        page
    }

    pub fn keywords_content(&self) -> String {
        self.keywords.join(", ")
    }
}

/// `Display title (200 m²) (desde S/ 30,000)`.
pub fn listing_page_title(record: &ListingRecord, meta: &DerivedMetadata) -> String {
    let mut parts = vec![meta.display_title.clone()];
    if let Some(area) = meta.area_amount.filter(|a| *a > 0.0) {
        parts.push(format!("({} m²)", format_amount(area)));
    }
    if let Some(price) = record.price_from.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        if meta.price_amount.is_some() {
            parts.push(format!("(desde {price})"));
        }
    }
    parts.join(" ")
}

fn listing_description(record: &ListingRecord) -> String {
    let excerpt = record
        .description
        .as_deref()
        .map(|d| plain_text_excerpt(d, DESCRIPTION_MAX_CHARS))
        .unwrap_or_default();

    if !excerpt.is_empty() {
        return excerpt;
    }

    let location = record.location.trim();
    let fallback = if location.is_empty() {
        format!("{}: solicita información y agenda tu visita.", record.title.trim())
    } else {
        format!(
            "{} en {}: solicita información y agenda tu visita.",
            record.title.trim(),
            location
        )
    };
    plain_text_excerpt(&fallback, DESCRIPTION_MAX_CHARS)
}

/// Absolute URL of the listing's hero image, or the kind's fallback image.
pub fn listing_image_url(record: &ListingRecord, kind: ListingKind, site: &SiteConfig) -> String {
    match record.image.as_deref().map(str::trim).filter(|i| !i.is_empty()) {
        Some(image) => site.absolute_url(image),
        None => site.fallback_image(kind),
    }
}
