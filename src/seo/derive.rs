//! Listing metadata derivation.
//!
//! Every function here is total: malformed or missing optional fields
//! turn into absent outputs, never into errors or panics.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::SiteConfig;
use crate::models::listing::{Attribute, ListingRecord, Stock};
use crate::models::metadata::{Availability, DerivedMetadata};
use crate::seo::slug::fold_diacritics;

static CURRENCY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:s/\.?|us\$|\$|€|pen|usd)\s*").expect("valid regex"));

static NUMBER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid regex"));

/// Derive title, keywords, price, area and availability for one listing.
pub fn derive_metadata(record: &ListingRecord, site: &SiteConfig) -> DerivedMetadata {
    DerivedMetadata {
        display_title: display_title(record),
        keyword_set: build_keywords(record, site),
        price_amount: record.price_from.as_deref().and_then(parse_price),
        area_amount: parse_area(&record.attributes),
        availability: availability_from_stock(record.stock.as_ref()),
    }
}

/// Parse a localized price such as `S/ 20,000` into `20000.0`.
///
/// Currency markers and thousands separators are dropped; what remains
/// must be digits with at most one decimal point.
pub fn parse_price(text: &str) -> Option<f64> {
    let without_currency = CURRENCY_MARKER.replace_all(text, "");
    let cleaned: String = without_currency
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Area from the first attribute whose label mentions "area" (accents and case ignored).
pub fn parse_area(attributes: &[Attribute]) -> Option<f64> {
    let attribute = attributes
        .iter()
        .find(|a| fold_diacritics(&a.label).to_lowercase().contains("area"))?;

    first_number(&attribute.value)
}

fn first_number(text: &str) -> Option<f64> {
    NUMBER_TOKEN
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Base keywords ∪ listing-specific terms, lowercased and deduplicated.
pub fn build_keywords(record: &ListingRecord, site: &SiteConfig) -> BTreeSet<String> {
    let mut keywords: BTreeSet<String> = site
        .base_keywords
        .iter()
        .chain(std::iter::once(&site.brand_name))
        .map(|k| k.trim().to_lowercase())
        .collect();

    keywords.insert(record.title.trim().to_lowercase());

    let category = record.category.trim();
    let subtitle = record.subtitle.trim();
    if !category.is_empty() && !subtitle.is_empty() {
        keywords.insert(format!("{category} en {subtitle}").to_lowercase());
    }

    keywords.extend(record.tags.iter().map(|t| t.trim().to_lowercase()));

    let location = record.location.trim();
    if !location.is_empty() {
        keywords.insert(location.to_lowercase());
    }

    keywords.retain(|k| !k.is_empty());
    keywords
}

/// `InStock` unless the stock says nothing remains. Missing data counts as in stock.
pub fn availability_from_stock(stock: Option<&Stock>) -> Availability {
    match stock.and_then(|s| s.remaining) {
        Some(remaining) if remaining <= 0.0 => Availability::SoldOut,
        _ => Availability::InStock,
    }
}

/// `Title | Subtitle, Location`, skipping the subtitle when the location already names it.
pub fn display_title(record: &ListingRecord) -> String {
    let title = record.title.trim();
    let subtitle = record.subtitle.trim();
    let location = record.location.trim();

    let mentions_subtitle = !subtitle.is_empty()
        && fold_diacritics(&location.to_lowercase()).contains(&fold_diacritics(&subtitle.to_lowercase()));

    let place = match (subtitle.is_empty() || mentions_subtitle, location.is_empty()) {
        (true, true) => String::new(),
        (true, false) => location.to_string(),
        (false, true) => subtitle.to_string(),
        (false, false) => format!("{subtitle}, {location}"),
    };

    if place.is_empty() {
        title.to_string()
    } else {
        format!("{title} | {place}")
    }
}

/// Render an amount without a trailing `.0` (`200`, `1500.5`).
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        format!("{amount}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(label: &str, value: &str) -> Attribute {
        Attribute {
            label: label.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_parse_price_soles() {
        assert_eq!(parse_price("S/ 20,000"), Some(20000.0));
        assert_eq!(parse_price("s/30,000"), Some(30000.0));
        assert_eq!(parse_price("S/. 1,500.50"), Some(1500.5));
    }

    #[test]
    fn test_parse_price_other_currencies() {
        assert_eq!(parse_price("US$ 5,000"), Some(5000.0));
        assert_eq!(parse_price("$ 12,000"), Some(12000.0));
    }

    #[test]
    fn test_parse_price_without_digits() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("Consultar"), None);
        assert_eq!(parse_price("S/."), None);
    }

    #[test]
    fn test_parse_price_malformed_decimal() {
        assert_eq!(parse_price("1.2.3"), None);
    }

    #[test]
    fn test_parse_area_accented_label() {
        let attrs = vec![attr("Precio", "S/ 30,000"), attr("Área típica", "200 m²")];
        assert_eq!(parse_area(&attrs), Some(200.0));
    }

    #[test]
    fn test_parse_area_decimal_and_plain_label() {
        let attrs = vec![attr("AREA", "aprox. 187.5 m2")];
        assert_eq!(parse_area(&attrs), Some(187.5));
    }

    #[test]
    fn test_parse_area_first_match_only() {
        // The first matching row has no number: area is absent, no fallback.
        let attrs = vec![attr("Área", "Consultar"), attr("Área total", "500 m²")];
        assert_eq!(parse_area(&attrs), None);
    }

    #[test]
    fn test_parse_area_missing() {
        assert_eq!(parse_area(&[]), None);
        assert_eq!(parse_area(&[attr("Uso", "Vivienda")]), None);
    }

    #[test]
    fn test_availability() {
        assert_eq!(availability_from_stock(None), Availability::InStock);
        let empty = Stock::default();
        assert_eq!(availability_from_stock(Some(&empty)), Availability::InStock);
        let sold = Stock {
            total: Some(10),
            remaining: Some(0.0),
            last_updated: None,
        };
        assert_eq!(availability_from_stock(Some(&sold)), Availability::SoldOut);
        let left = Stock {
            remaining: Some(3.0),
            ..Stock::default()
        };
        assert_eq!(availability_from_stock(Some(&left)), Availability::InStock);
        let fraction = Stock {
            remaining: Some(0.5),
            ..Stock::default()
        };
        assert_eq!(availability_from_stock(Some(&fraction)), Availability::InStock);
    }

    #[test]
    fn test_keywords_dedup_and_lowercase() {
        let site = SiteConfig::default();
        let mut record = ListingRecord::new("x", "Cañones");
        record.tags = vec!["Ayacucho".into(), "ayacucho".into(), " ".into()];
        record.location = "Qorihuillca, Huamanga".into();

        let keywords = build_keywords(&record, &site);
        assert_eq!(keywords.iter().filter(|k| *k == "ayacucho").count(), 1);
        assert!(keywords.contains("cañones"));
        assert!(keywords.contains("qorihuillca, huamanga"));
        assert!(keywords.contains("casagrande bienes y raíces"));
        assert!(keywords.contains("terrenos en ayacucho"));
        assert!(!keywords.contains(""));
    }

    #[test]
    fn test_keywords_category_phrase() {
        let site = SiteConfig::default();
        let mut record = ListingRecord::new("x", "Cañones");
        record.category = "Lotes".into();
        record.subtitle = "Qorihuillca".into();
        assert!(build_keywords(&record, &site).contains("lotes en qorihuillca"));
    }

    #[test]
    fn test_display_title_variants() {
        let mut record = ListingRecord::new("x", "Cañones");
        assert_eq!(display_title(&record), "Cañones");

        record.subtitle = "Qorihuillca".into();
        assert_eq!(display_title(&record), "Cañones | Qorihuillca");

        record.location = "Huamanga – Ayacucho".into();
        assert_eq!(display_title(&record), "Cañones | Qorihuillca, Huamanga – Ayacucho");

        record.location = "Qorihuillca, Huamanga – Ayacucho".into();
        assert_eq!(display_title(&record), "Cañones | Qorihuillca, Huamanga – Ayacucho");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(200.0), "200");
        assert_eq!(format_amount(1500.5), "1500.5");
    }
}
