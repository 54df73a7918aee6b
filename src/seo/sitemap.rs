use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::SiteConfig;
use crate::models::listing::{ListingKind, ListingRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeFrequency::Daily => write!(f, "daily"),
            ChangeFrequency::Weekly => write!(f, "weekly"),
            ChangeFrequency::Monthly => write!(f, "monthly"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapEntry {
    pub loc: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Paths excluded from crawling.
const DISALLOWED_PATHS: &[&str] = &["/api/", "/pkg/", "/admin/", "/private/", "/*?*"];

/// Static pages first, then every project and property detail page.
///
/// Hash anchors are never listed, and neither are rentals.
pub fn build_sitemap(
    site: &SiteConfig,
    projects: &[ListingRecord],
    properties: &[ListingRecord],
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let entry = |path: &str, change_frequency, priority| SitemapEntry {
        loc: site.absolute_url(path),
        last_modified: now,
        change_frequency,
        priority,
    };

    let mut entries = vec![
        entry("/", ChangeFrequency::Weekly, 1.0),
        entry("/inmuebles", ChangeFrequency::Weekly, 0.9),
        entry("/proyectos", ChangeFrequency::Weekly, 0.85),
        entry("/propiedades", ChangeFrequency::Weekly, 0.85),
        entry("/nosotros", ChangeFrequency::Monthly, 0.6),
    ];

    for (kind, records, priority) in [
        (ListingKind::Project, projects, 0.8),
        (ListingKind::Property, properties, 0.75),
    ] {
        entries.extend(records.iter().map(|record| {
            let path = format!(
                "/{}/{}",
                kind.path_segment(),
                urlencoding::encode(&record.slug)
            );
            entry(&path, ChangeFrequency::Weekly, priority)
        }));
    }

    entries
}

/// Serialize entries as a `urlset` document.
pub fn render_sitemap_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.change_frequency
        ));
        xml.push_str(&format!("    <priority>{:.2}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// `robots.txt` allowing everything except the API and build assets.
pub fn render_robots_txt(site: &SiteConfig) -> String {
    let mut out = String::from("User-agent: *\nAllow: /\n");
    for path in DISALLOWED_PATHS {
        out.push_str(&format!("Disallow: {path}\n"));
    }
    out.push('\n');
    out.push_str(&format!("Sitemap: {}\n", site.absolute_url("/sitemap.xml")));
    out.push_str(&format!("Host: {}\n", site.absolute_url("/")));
    out
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
