use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::SiteConfig;
use crate::models::listing::{ListingKind, ListingRecord};

/// `https://wa.me/<digits>?text=<message>`.
///
/// Anything but digits is dropped from the number, so `+51 970 993 246`
/// and `51970993246` produce the same link.
pub fn whatsapp_link(number: &str, text: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    if text.is_empty() {
        return format!("https://wa.me/{digits}");
    }
    format!("https://wa.me/{digits}?text={}", urlencoding::encode(text))
}

/// `tel:` link with whitespace removed.
pub fn phone_link(phone: &str) -> String {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    format!("tel:{compact}")
}

/// WhatsApp link asking about one listing. Uses the listing's own number
/// when its content provides one.
pub fn listing_enquiry_link(record: &ListingRecord, kind: ListingKind, site: &SiteConfig) -> String {
    let number = record
        .contact
        .as_ref()
        .and_then(|c| c.whatsapp.as_deref())
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(&site.contact.whatsapp);

    let subject = match kind {
        ListingKind::Project => "el proyecto",
        ListingKind::Property => "la propiedad",
        ListingKind::Rental => "el alquiler",
    };
    let text = format!(
        "Hola {}, quiero información sobre {} {}: {}",
        site.brand_name,
        subject,
        record.title.trim(),
        site.listing_url(kind, &record.slug)
    );
    whatsapp_link(number, &text)
}

/// Kind of property an owner wants to sell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    Terreno,
    Casa,
    Departamento,
    Local,
    Otros,
}

impl PropertyType {
    pub const CHOICES: [PropertyType; 5] = [
        PropertyType::Terreno,
        PropertyType::Casa,
        PropertyType::Departamento,
        PropertyType::Local,
        PropertyType::Otros,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Unspecified => "-",
            PropertyType::Terreno => "Terreno",
            PropertyType::Casa => "Casa",
            PropertyType::Departamento => "Departamento",
            PropertyType::Local => "Local comercial",
            PropertyType::Otros => "Otros",
        }
    }

    /// Form value, the inverse of [`PropertyType::from_value`].
    pub fn value(&self) -> &'static str {
        match self {
            PropertyType::Unspecified => "",
            PropertyType::Terreno => "terreno",
            PropertyType::Casa => "casa",
            PropertyType::Departamento => "departamento",
            PropertyType::Local => "local",
            PropertyType::Otros => "otros",
        }
    }

    pub fn from_value(value: &str) -> Self {
        Self::CHOICES
            .into_iter()
            .find(|t| t.value().eq_ignore_ascii_case(value.trim()))
            .unwrap_or_default()
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An owner's request to list a property for sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleInquiry {
    #[serde(default)]
    pub property_type: PropertyType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub price: String,
}

impl SaleInquiry {
    /// Multi-line WhatsApp message. Empty fields are shown as `-`.
    pub fn message(&self, brand: &str) -> String {
        [
            format!("Hola {brand}, quiero vender una propiedad."),
            format!("Tipo: {}", self.property_type.label()),
            format!("Nombre: {}", or_dash(&self.name)),
            format!("Teléfono: {}", or_dash(&self.phone)),
            format!("Lugar: {}", or_dash(&self.place)),
            format!("Precio: {}", or_dash(&self.price)),
        ]
        .join("\n")
    }

    pub fn whatsapp_link(&self, site: &SiteConfig) -> String {
        whatsapp_link(&site.contact.whatsapp, &self.message(&site.brand_name))
    }

    /// Fields the form marks as required, by label, that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.property_type == PropertyType::Unspecified {
            missing.push("Tipo de propiedad");
        }
        for (label, value) in [
            ("Nombre", &self.name),
            ("Número (WhatsApp)", &self.phone),
            ("Lugar / Ubicación", &self.place),
            ("Precio (referencial)", &self.price),
        ] {
            if value.trim().is_empty() {
                missing.push(label);
            }
        }
        missing
    }
}

fn or_dash(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
