use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The three families of listings the site publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ListingKind {
    #[serde(rename = "proyecto", alias = "project")]
    Project,
    #[serde(rename = "propiedad", alias = "property")]
    Property,
    #[serde(rename = "alquiler", alias = "rental")]
    Rental,
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingKind::Project => write!(f, "proyecto"),
            ListingKind::Property => write!(f, "propiedad"),
            ListingKind::Rental => write!(f, "alquiler"),
        }
    }
}

impl ListingKind {
    pub const ALL: [ListingKind; 3] = [ListingKind::Project, ListingKind::Property, ListingKind::Rental];

    /// Parse a kind from either its singular name or its URL segment (case-insensitive).
    pub fn from_str_ci(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "proyecto" | "proyectos" | "project" | "projects" => Some(ListingKind::Project),
            "propiedad" | "propiedades" | "property" | "properties" => Some(ListingKind::Property),
            "alquiler" | "alquileres" | "rental" | "rentals" => Some(ListingKind::Rental),
            _ => None,
        }
    }

    /// URL segment of the detail pages (`/proyectos/{slug}`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            ListingKind::Project => "proyectos",
            ListingKind::Property => "propiedades",
            ListingKind::Rental => "alquileres",
        }
    }

    /// Site-relative path of the catalog that lists this kind.
    pub fn catalog_path(&self) -> &'static str {
        match self {
            ListingKind::Project => "/inmuebles#proyectos",
            ListingKind::Property => "/propiedades",
            ListingKind::Rental => "/inmuebles#alquileres",
        }
    }

    /// Name of the content file holding this kind.
    pub fn content_file(&self) -> &'static str {
        match self {
            ListingKind::Project => "proyectos.json",
            ListingKind::Property => "propiedades.json",
            ListingKind::Rental => "alquileres.json",
        }
    }

    /// Singular display label, capitalized.
    pub fn label(&self) -> &'static str {
        match self {
            ListingKind::Project => "Proyecto",
            ListingKind::Property => "Propiedad",
            ListingKind::Rental => "Alquiler",
        }
    }

    /// Plural display label used in breadcrumbs and tabs.
    pub fn plural_label(&self) -> &'static str {
        match self {
            ListingKind::Project => "Proyectos",
            ListingKind::Property => "Propiedades",
            ListingKind::Rental => "Alquileres",
        }
    }
}

/// A `(label, value)` feature row such as `Área: 200 m²`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub label: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub value: String,
}

/// Lot inventory for a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: Option<i64>,
    /// Kept fractional: any positive amount still counts as available.
    #[serde(default, alias = "restantes", deserialize_with = "lenient_amount")]
    pub remaining: Option<f64>,
    #[serde(default, alias = "actualizado", alias = "lastUpdated", deserialize_with = "lenient_opt_text")]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingContact {
    #[serde(default, deserialize_with = "lenient_opt_text")]
    pub whatsapp: Option<String>,
    #[serde(default, alias = "telefono", deserialize_with = "lenient_opt_text")]
    pub phone: Option<String>,
    #[serde(default, alias = "direccion", deserialize_with = "lenient_opt_text")]
    pub address: Option<String>,
    #[serde(default, alias = "horario", deserialize_with = "lenient_opt_text")]
    pub hours: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gallery {
    #[serde(default, alias = "fotos", deserialize_with = "lenient")]
    pub photos: Vec<String>,
    #[serde(default, alias = "youtubeId", deserialize_with = "lenient_opt_text")]
    pub youtube_id: Option<String>,
}

/// One listing as authored in the JSON content files.
///
/// Spanish keys used by the content files (`titulo`, `ubicacion`,
/// `precioDesdeSol`, …) are accepted as aliases of the English field names.
/// Only `slug` and `title` are required; a null or wrongly typed optional
/// field falls back to its empty value instead of rejecting the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub slug: String,
    /// Filled from the content file when the record doesn't carry it.
    #[serde(default, alias = "tipo", deserialize_with = "lenient")]
    pub kind: Option<ListingKind>,
    #[serde(alias = "titulo")]
    pub title: String,
    #[serde(default, alias = "subtitulo", deserialize_with = "lenient_text")]
    pub subtitle: String,
    #[serde(default, alias = "categoria", deserialize_with = "lenient_text")]
    pub category: String,
    #[serde(default, alias = "ubicacion", deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(default, alias = "priceFrom", alias = "precioDesdeSol", deserialize_with = "lenient_opt_text")]
    pub price_from: Option<String>,
    #[serde(default, alias = "precioDesdeDolar", deserialize_with = "lenient_opt_text")]
    pub price_from_usd: Option<String>,
    #[serde(default, alias = "pagoContado", deserialize_with = "lenient_opt_text")]
    pub down_payment: Option<String>,
    #[serde(default, alias = "imagen", deserialize_with = "lenient_opt_text")]
    pub image: Option<String>,
    #[serde(default, alias = "etiquetas", deserialize_with = "lenient")]
    pub tags: Vec<String>,
    #[serde(default, alias = "descripcion", deserialize_with = "lenient_opt_text")]
    pub description: Option<String>,
    #[serde(default, alias = "equipamiento", deserialize_with = "lenient")]
    pub amenities: Vec<String>,
    #[serde(default, alias = "caracteristicas", deserialize_with = "lenient_attributes")]
    pub attributes: Vec<Attribute>,
    #[serde(default, alias = "stockLotes", deserialize_with = "lenient")]
    pub stock: Option<Stock>,
    #[serde(default, alias = "contacto", deserialize_with = "lenient")]
    pub contact: Option<ListingContact>,
    #[serde(default, alias = "mapsUrl", deserialize_with = "lenient_opt_text")]
    pub maps_url: Option<String>,
    #[serde(default, alias = "galeria", deserialize_with = "lenient")]
    pub gallery: Option<Gallery>,
}

impl ListingRecord {
    /// Minimal record with only the required fields set.
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            kind: None,
            title: title.into(),
            subtitle: String::new(),
            category: String::new(),
            location: String::new(),
            price_from: None,
            price_from_usd: None,
            down_payment: None,
            image: None,
            tags: Vec::new(),
            description: None,
            amenities: Vec::new(),
            attributes: Vec::new(),
            stock: None,
            contact: None,
            maps_url: None,
            gallery: None,
        }
    }

    /// Check the fields every page relies on. Returns the reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.slug.trim().is_empty() {
            return Err("slug cannot be empty".to_string());
        }
        if self.title.trim().is_empty() {
            return Err(format!("listing '{}' has an empty title", self.slug));
        }
        Ok(())
    }
}

/// Deserialize `T` if the value has the right shape, otherwise `T::default()`.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn text_of(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Strings pass through, numbers become their decimal form, anything else is empty.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(text_of(value).unwrap_or_default())
}

fn lenient_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(text_of(value))
}

/// Keep the well-formed rows of an attribute list and drop the rest.
fn lenient_attributes<'de, D>(deserializer: D) -> Result<Vec<Attribute>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Accept any JSON number as a count; every other shape becomes `None`.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        _ => None,
    })
}

/// Accept any finite JSON number; every other shape becomes `None`.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        _ => None,
    })
}
