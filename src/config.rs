use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::listing::ListingKind;

/// Site-wide configuration shared by every renderer.
///
/// Built once at startup (see [`SiteConfig::load`]) and handed to the
/// rendering layer behind an `Arc`. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public origin without trailing slash, e.g. `https://www.example.com`.
    pub site_url: String,
    pub brand_name: String,
    pub alternate_name: String,
    /// Organization description used on the home page and the agent JSON-LD.
    pub description: String,
    /// BCP 47 language tag (`es-PE`).
    pub language: String,
    /// Open Graph locale (`es_PE`).
    pub locale: String,
    /// ISO 4217 currency for listing offers.
    pub currency: String,
    /// Directory holding `proyectos.json`, `propiedades.json` and `alquileres.json`.
    pub content_dir: PathBuf,
    pub logo_path: String,
    pub contact: ContactConfig,
    pub address: AddressConfig,
    pub geo: Option<GeoPoint>,
    pub opening_hours: OpeningHours,
    pub areas_served: Vec<ServedArea>,
    pub social_links: Vec<NamedLink>,
    /// Keywords every listing page starts from (brand and locality terms).
    pub base_keywords: Vec<String>,
    pub founding_year: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// E.164 phone, e.g. `+51916194372`.
    pub phone: String,
    /// WhatsApp number, digits only.
    pub whatsapp: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressConfig {
    pub street_address: String,
    pub locality: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningHours {
    pub days: Vec<String>,
    pub opens: String,
    pub closes: String,
}

/// An area the agency serves, with its schema.org type (`City`, `AdministrativeArea`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServedArea {
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedLink {
    pub label: String,
    pub href: String,
}

impl NamedLink {
    fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            phone: "+51916194372".to_string(),
            whatsapp: "51970993246".to_string(),
            email: "u19217724@gmail.com".to_string(),
        }
    }
}

impl Default for AddressConfig {
    fn default() -> Self {
        Self {
            street_address: "Jirón Quinua 570".to_string(),
            locality: "Huamanga".to_string(),
            region: "Ayacucho".to_string(),
            postal_code: "05003".to_string(),
            country: "PE".to_string(),
        }
    }
}

impl Default for OpeningHours {
    fn default() -> Self {
        Self {
            days: ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]
                .into_iter()
                .map(String::from)
                .collect(),
            opens: "09:00".to_string(),
            closes: "18:30".to_string(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_url: "https://www.casagrande-inmobilaria.com".to_string(),
            brand_name: "Casagrande Bienes y Raíces".to_string(),
            alternate_name: "Casagrande Inmobiliaria Ayacucho".to_string(),
            description: "Casagrande Bienes y Raíces: venta de terrenos y lotes en Ayacucho \
                (Huamanga) con proyectos en Ccorihuillca/Qorihuillca. Asesoría completa y \
                procesos seguros. Ideal para vivienda, casa de campo o inversión."
                .to_string(),
            language: "es-PE".to_string(),
            locale: "es_PE".to_string(),
            currency: "PEN".to_string(),
            content_dir: PathBuf::from("data"),
            logo_path: "/logo.svg".to_string(),
            contact: ContactConfig::default(),
            address: AddressConfig::default(),
            geo: Some(GeoPoint {
                latitude: -13.155749,
                longitude: -74.220991,
            }),
            opening_hours: OpeningHours::default(),
            areas_served: vec![
                ServedArea {
                    kind: "AdministrativeArea".to_string(),
                    name: "Ayacucho".to_string(),
                },
                ServedArea {
                    kind: "City".to_string(),
                    name: "Huamanga".to_string(),
                },
            ],
            social_links: vec![
                NamedLink::new("Facebook", "https://www.facebook.com/Casagrande.Bienes.R"),
                NamedLink::new("Instagram", "https://www.instagram.com/casagrandeinmobilaria/"),
                NamedLink::new("TikTok", "https://www.tiktok.com/@casagrandeinmb.24"),
                NamedLink::new(
                    "LinkedIn",
                    "https://www.linkedin.com/company/casagrande-bienes-y-raices/",
                ),
            ],
            base_keywords: [
                "terrenos en ayacucho",
                "lotes ayacucho",
                "venta de lotes ayacucho",
                "terrenos en huamanga",
                "inmobiliaria en ayacucho",
                "casagrande bienes y raices",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            founding_year: Some("2023".to_string()),
        }
    }
}

impl SiteConfig {
    /// Join a site-relative path onto the public origin.
    ///
    /// Already-absolute URLs are returned unchanged.
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.site_url.trim_end_matches('/');
        if path.is_empty() || path == "/" {
            return base.to_string();
        }
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Canonical URL of a listing detail page.
    pub fn listing_url(&self, kind: ListingKind, slug: &str) -> String {
        self.absolute_url(&format!("/{}/{}", kind.path_segment(), slug))
    }

    /// Canonical URL of the catalog a listing kind belongs to.
    pub fn catalog_url(&self, kind: ListingKind) -> String {
        self.absolute_url(kind.catalog_path())
    }

    /// Fallback Open Graph image for pages of the given kind.
    pub fn fallback_image(&self, kind: ListingKind) -> String {
        self.absolute_url(&format!("/og-{}.jpg", kind.path_segment()))
    }

    pub fn logo_url(&self) -> String {
        self.absolute_url(&self.logo_path)
    }
}

#[cfg(feature = "ssr")]
impl SiteConfig {
    /// Layer the built-in defaults, an optional config file and
    /// `CASAGRANDE__*` environment variables.
    pub fn load(path: Option<&std::path::Path>) -> Result<Self, crate::error::AppError> {
        use crate::error::AppError;

        let defaults = config::Config::try_from(&SiteConfig::default())
            .map_err(|e| AppError::Config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("CASAGRANDE")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .and_then(|cfg| cfg.try_deserialize::<SiteConfig>())
            .map_err(|e| AppError::Config(e.to_string()))
    }

    /// Load using the file named by `CASAGRANDE_CONFIG`, if set.
    pub fn from_env() -> Result<Self, crate::error::AppError> {
        let path = std::env::var("CASAGRANDE_CONFIG").ok().map(PathBuf::from);
        Self::load(path.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url_joins_paths() {
        let site = SiteConfig::default();
        assert_eq!(
            site.absolute_url("/villasol01.webp"),
            "https://www.casagrande-inmobilaria.com/villasol01.webp"
        );
        assert_eq!(
            site.absolute_url("images/a.webp"),
            "https://www.casagrande-inmobilaria.com/images/a.webp"
        );
        assert_eq!(site.absolute_url("/"), "https://www.casagrande-inmobilaria.com");
    }

    #[test]
    fn test_absolute_url_keeps_external() {
        let site = SiteConfig::default();
        assert_eq!(
            site.absolute_url("https://cdn.example.com/a.jpg"),
            "https://cdn.example.com/a.jpg"
        );
    }

    #[test]
    fn test_trailing_slash_on_site_url() {
        let site = SiteConfig {
            site_url: "https://example.com/".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(site.absolute_url("/robots.txt"), "https://example.com/robots.txt");
    }

    #[test]
    fn test_listing_and_catalog_urls() {
        let site = SiteConfig::default();
        assert_eq!(
            site.listing_url(ListingKind::Property, "huanupata"),
            "https://www.casagrande-inmobilaria.com/propiedades/huanupata"
        );
        assert_eq!(
            site.catalog_url(ListingKind::Project),
            "https://www.casagrande-inmobilaria.com/inmuebles#proyectos"
        );
        assert_eq!(
            site.fallback_image(ListingKind::Project),
            "https://www.casagrande-inmobilaria.com/og-proyectos.jpg"
        );
    }

    #[test]
    fn test_deserialize_partial_uses_defaults() {
        let site: SiteConfig =
            serde_json::from_str(r#"{"brand_name": "Otra Inmobiliaria"}"#).unwrap();
        assert_eq!(site.brand_name, "Otra Inmobiliaria");
        assert_eq!(site.currency, "PEN");
        assert_eq!(site.address.region, "Ayacucho");
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn test_load_overrides_from_file() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "site_url = \"https://staging.example.com\"").unwrap();
        writeln!(file, "[contact]").unwrap();
        writeln!(file, "email = \"ventas@example.com\"").unwrap();

        let site = SiteConfig::load(Some(file.path())).unwrap();
        assert_eq!(site.site_url, "https://staging.example.com");
        assert_eq!(site.contact.email, "ventas@example.com");
        assert_eq!(site.contact.phone, "+51916194372");
        assert_eq!(site.brand_name, "Casagrande Bienes y Raíces");
    }
}
