//! schema.org structured data emitted as JSON-LD.
//!
//! Absent values are skipped, never serialized as `null`.

use serde::Serialize;

use crate::config::SiteConfig;
use crate::models::listing::{ListingKind, ListingRecord};
use crate::models::metadata::DerivedMetadata;
use crate::seo::derive::format_amount;

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// A top-level JSON-LD object: `@context` plus the flattened entity.
#[derive(Debug, Clone, Serialize)]
pub struct JsonLd<T: Serialize> {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(flatten)]
    pub entity: T,
}

impl<T: Serialize> JsonLd<T> {
    pub fn new(entity: T) -> Self {
        Self {
            context: SCHEMA_CONTEXT,
            entity,
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPage {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub url: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub in_language: String,
    pub is_part_of: WebSiteRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebSiteRef {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub url: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbList {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub item_list_element: Vec<ListItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub position: u32,
    pub name: String,
    pub item: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    pub address_locality: String,
    pub address_region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub address_country: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Place {
    #[serde(rename = "@type")]
    pub schema_type: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitativeValue {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub value: f64,
    pub unit_text: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub price_currency: String,
    pub price: String,
    pub availability: String,
    pub url: String,
}

/// The agency as listing provider.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRef {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub alternate_name: String,
    pub url: String,
    pub telephone: String,
    pub email: String,
    pub area_served: Vec<Place>,
    pub address: PostalAddress,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealEstateListing {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    pub image: Vec<String>,
    pub provider: AgentRef,
    pub address: PostalAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_size: Option<QuantitativeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offers: Option<Offer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageObject {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeoCoordinates {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub telephone: String,
    pub contact_type: &'static str,
    pub available_language: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHoursSpecification {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub day_of_week: Vec<String>,
    pub opens: String,
    pub closes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Thing {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub name: String,
}

/// A site section page (`CollectionPage`, `AboutPage`) whose main entity is the agency.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPage {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub in_language: String,
    pub is_part_of: WebSiteRef,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub about: Vec<Thing>,
    pub main_entity: AgentRef,
}

/// Site-wide `RealEstateAgent` entity for the home page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub alternate_name: String,
    pub description: String,
    pub url: String,
    pub logo: ImageObject,
    pub telephone: String,
    pub email: String,
    pub address: PostalAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoCoordinates>,
    pub contact_point: Vec<ContactPoint>,
    pub opening_hours_specification: Vec<OpeningHoursSpecification>,
    pub area_served: Vec<Place>,
    pub same_as: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founding_date: Option<String>,
}

fn organization_id(site: &SiteConfig) -> String {
    format!("{}#organization", site.absolute_url("/"))
}

fn website_ref(site: &SiteConfig) -> WebSiteRef {
    WebSiteRef {
        schema_type: "WebSite",
        url: site.absolute_url("/"),
        name: site.brand_name.clone(),
    }
}

/// The agency as a reference from another entity, sharing the home page `@id`.
fn agent_ref(site: &SiteConfig) -> AgentRef {
    AgentRef {
        schema_type: "RealEstateAgent",
        id: organization_id(site),
        name: site.brand_name.clone(),
        alternate_name: site.alternate_name.clone(),
        url: site.absolute_url("/"),
        telephone: site.contact.phone.clone(),
        email: site.contact.email.clone(),
        area_served: areas_served(site),
        address: agency_address(site),
    }
}

fn areas_served(site: &SiteConfig) -> Vec<Place> {
    site.areas_served
        .iter()
        .map(|a| Place {
            schema_type: a.kind.clone(),
            name: a.name.clone(),
        })
        .collect()
}

/// The agency's full postal address.
pub fn agency_address(site: &SiteConfig) -> PostalAddress {
    let a = &site.address;
    PostalAddress {
        schema_type: "PostalAddress",
        street_address: Some(a.street_address.clone()).filter(|s| !s.is_empty()),
        address_locality: a.locality.clone(),
        address_region: a.region.clone(),
        postal_code: Some(a.postal_code.clone()).filter(|s| !s.is_empty()),
        address_country: a.country.clone(),
    }
}

/// Listings are only placed at locality level.
fn listing_address(site: &SiteConfig) -> PostalAddress {
    PostalAddress {
        street_address: None,
        postal_code: None,
        ..agency_address(site)
    }
}

pub fn web_page(
    site: &SiteConfig,
    canonical: &str,
    name: &str,
    description: Option<&str>,
) -> JsonLd<WebPage> {
    JsonLd::new(WebPage {
        schema_type: "WebPage",
        id: format!("{canonical}#webpage"),
        url: canonical.to_string(),
        name: name.to_string(),
        description: description.map(str::to_string),
        in_language: site.language.clone(),
        is_part_of: website_ref(site),
    })
}

/// `CollectionPage` for a catalog, about land and projects in the agency's region.
pub fn collection_page(
    site: &SiteConfig,
    canonical: &str,
    name: &str,
    description: &str,
) -> JsonLd<SectionPage> {
    let region = &site.address.region;
    let topics = [
        format!("Terrenos en {region}"),
        format!("Lotes en {}", site.address.locality),
        format!("Proyectos inmobiliarios en {region}"),
    ];

    JsonLd::new(SectionPage {
        schema_type: "CollectionPage",
        id: format!("{canonical}#collection"),
        name: name.to_string(),
        description: description.to_string(),
        url: canonical.to_string(),
        in_language: site.language.clone(),
        is_part_of: website_ref(site),
        about: topics
            .into_iter()
            .map(|name| Thing {
                schema_type: "Thing",
                name,
            })
            .collect(),
        main_entity: agent_ref(site),
    })
}

pub fn about_page(site: &SiteConfig, canonical: &str, description: &str) -> JsonLd<SectionPage> {
    JsonLd::new(SectionPage {
        schema_type: "AboutPage",
        id: format!("{canonical}#about"),
        name: format!("Nosotros | {}", site.brand_name),
        description: description.to_string(),
        url: canonical.to_string(),
        in_language: site.language.clone(),
        is_part_of: website_ref(site),
        about: Vec::new(),
        main_entity: agent_ref(site),
    })
}

/// Home › Section, for top-level pages.
pub fn section_breadcrumb(site: &SiteConfig, name: &str, canonical: &str) -> JsonLd<BreadcrumbList> {
    JsonLd::new(BreadcrumbList {
        schema_type: "BreadcrumbList",
        item_list_element: vec![
            ListItem {
                schema_type: "ListItem",
                position: 1,
                name: site.brand_name.clone(),
                item: site.absolute_url("/"),
            },
            ListItem {
                schema_type: "ListItem",
                position: 2,
                name: name.to_string(),
                item: canonical.to_string(),
            },
        ],
    })
}

/// Home › Catalog › Listing.
pub fn breadcrumb(
    site: &SiteConfig,
    kind: ListingKind,
    name: &str,
    canonical: &str,
) -> JsonLd<BreadcrumbList> {
    let entry = |position, name: &str, url: String| ListItem {
        schema_type: "ListItem",
        position,
        name: name.to_string(),
        item: url,
    };

    JsonLd::new(BreadcrumbList {
        schema_type: "BreadcrumbList",
        item_list_element: vec![
            entry(1, &site.brand_name, site.absolute_url("/")),
            entry(2, kind.plural_label(), site.catalog_url(kind)),
            entry(3, name, canonical.to_string()),
        ],
    })
}

/// `RealEstateListing` for one listing. `floorSize` and `offers` appear
/// only for a positive area and price.
pub fn real_estate_listing(
    site: &SiteConfig,
    record: &ListingRecord,
    meta: &DerivedMetadata,
    page_title: &str,
    canonical: &str,
    image_url: &str,
    description: Option<&str>,
) -> JsonLd<RealEstateListing> {
    let floor_size = meta
        .area_amount
        .filter(|a| *a > 0.0)
        .map(|value| QuantitativeValue {
            schema_type: "QuantitativeValue",
            value,
            unit_text: "M2",
        });

    let offers = meta.price_amount.filter(|p| *p > 0.0).map(|price| Offer {
        schema_type: "Offer",
        price_currency: site.currency.clone(),
        price: format_amount(price),
        availability: meta.availability.schema_url(),
        url: canonical.to_string(),
    });

    tracing::trace!(slug = %record.slug, has_offer = offers.is_some(), "building listing JSON-LD");

    JsonLd::new(RealEstateListing {
        schema_type: "RealEstateListing",
        id: format!("{canonical}#listing"),
        name: page_title.to_string(),
        description: description.map(str::to_string),
        url: canonical.to_string(),
        image: vec![image_url.to_string()],
        provider: agent_ref(site),
        address: listing_address(site),
        floor_size,
        offers,
    })
}

pub fn organization(site: &SiteConfig) -> JsonLd<Organization> {
    JsonLd::new(Organization {
        schema_type: "RealEstateAgent",
        id: organization_id(site),
        name: site.brand_name.clone(),
        alternate_name: site.alternate_name.clone(),
        description: site.description.clone(),
        url: site.absolute_url("/"),
        logo: ImageObject {
            schema_type: "ImageObject",
            url: site.logo_url(),
            width: 512,
            height: 512,
        },
        telephone: site.contact.phone.clone(),
        email: site.contact.email.clone(),
        address: agency_address(site),
        geo: site.geo.map(|g| GeoCoordinates {
            schema_type: "GeoCoordinates",
            latitude: g.latitude,
            longitude: g.longitude,
        }),
        contact_point: vec![ContactPoint {
            schema_type: "ContactPoint",
            telephone: site.contact.phone.clone(),
            contact_type: "sales",
            available_language: vec![site.language.split('-').next().unwrap_or("es").to_string()],
        }],
        opening_hours_specification: vec![OpeningHoursSpecification {
            schema_type: "OpeningHoursSpecification",
            day_of_week: site.opening_hours.days.clone(),
            opens: site.opening_hours.opens.clone(),
            closes: site.opening_hours.closes.clone(),
        }],
        area_served: areas_served(site),
        same_as: site.social_links.iter().map(|l| l.href.clone()).collect(),
        founding_date: site.founding_year.clone(),
    })
}

/// Serialize for embedding inside `<script type="application/ld+json">`.
///
/// `<`, `>` and `&` are escaped as JSON unicode escapes so the payload can
/// never close the script element.
pub fn to_script_json(value: &serde_json::Value) -> String {
    let raw = serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string());
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            _ => out.push(c),
        }
    }
    out
}
