use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::listing::{ListingKind, ListingRecord};
use crate::seo::slug::slug_aliases;

/// Read access to listing content.
///
/// This trait allows swapping the content source in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Find a listing by slug. Percent-encoded, differently-cased and
    /// ASCII-folded spellings of the slug resolve to the same listing.
    async fn find_by_slug(
        &self,
        kind: ListingKind,
        slug: &str,
    ) -> Result<Option<ListingRecord>, AppError>;

    /// All listings of one kind, in content-file order.
    async fn list(&self, kind: ListingKind) -> Result<Vec<ListingRecord>, AppError>;
}

/// Listings loaded from the JSON content files at startup and kept in memory.
#[derive(Debug, Default)]
pub struct JsonListingRepository {
    listings: BTreeMap<ListingKind, Vec<ListingRecord>>,
    /// Slug alias to `(rank, position)`. A lower rank is a closer spelling
    /// of the record's own slug (0 exact, 1 normalized, 2 ASCII-folded).
    index: HashMap<(ListingKind, String), (usize, usize)>,
}

impl JsonListingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_listings(mut self, kind: ListingKind, records: Vec<ListingRecord>) -> Self {
        self.insert(kind, records);
        self
    }

    /// Add listings of one kind. A slug already present keeps its first record.
    ///
    /// When two records share an alias, the one whose own slug is the closer
    /// spelling owns it, so an exact slug is never shadowed by a folded one.
    pub fn insert(&mut self, kind: ListingKind, records: Vec<ListingRecord>) {
        let bucket = self.listings.entry(kind).or_default();

        for mut record in records {
            if bucket.iter().any(|r| r.slug == record.slug) {
                tracing::warn!(%kind, slug = %record.slug, "Duplicate listing slug, keeping the first");
                continue;
            }
            record.kind = Some(kind);

            let position = bucket.len();
            for (rank, alias) in slug_aliases(&record.slug).into_iter().enumerate() {
                let entry = self.index.entry((kind, alias)).or_insert((rank, position));
                if rank < entry.0 {
                    *entry = (rank, position);
                }
            }
            bucket.push(record);
        }
    }

    /// Load `proyectos.json`, `propiedades.json` and `alquileres.json` from `dir`.
    ///
    /// A missing file leaves that kind empty. A file that isn't a JSON
    /// array is an error; invalid records inside a valid file are skipped.
    pub fn load_dir(dir: &Path) -> Result<Self, AppError> {
        let mut repo = Self::new();

        for kind in ListingKind::ALL {
            let path = dir.join(kind.content_file());
            if !path.exists() {
                tracing::warn!(path = %path.display(), "Content file not found, no {kind} listings loaded");
                continue;
            }

            let raw = std::fs::read_to_string(&path).map_err(|e| {
                AppError::Content(format!("Failed to read {}: {e}", path.display()))
            })?;
            let records = parse_listings(kind, &raw)
                .map_err(|e| AppError::Content(format!("{}: {e}", path.display())))?;

            tracing::info!(path = %path.display(), count = records.len(), "Loaded {kind} listings");
            repo.insert(kind, records);
        }

        Ok(repo)
    }

    pub fn len(&self) -> usize {
        self.listings.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, kind: ListingKind, slug: &str) -> Option<&ListingRecord> {
        let bucket = self.listings.get(&kind)?;
        slug_aliases(slug)
            .into_iter()
            .find_map(|alias| self.index.get(&(kind, alias)))
            .and_then(|&(_, position)| bucket.get(position))
    }
}

#[async_trait]
impl ListingRepository for JsonListingRepository {
    async fn find_by_slug(
        &self,
        kind: ListingKind,
        slug: &str,
    ) -> Result<Option<ListingRecord>, AppError> {
        Ok(self.lookup(kind, slug).cloned())
    }

    async fn list(&self, kind: ListingKind) -> Result<Vec<ListingRecord>, AppError> {
        Ok(self.listings.get(&kind).cloned().unwrap_or_default())
    }
}

/// Parse one content file. Each record is validated on its own so a single
/// malformed entry doesn't take the whole catalog down.
pub fn parse_listings(kind: ListingKind, raw: &str) -> Result<Vec<ListingRecord>, AppError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| AppError::Content(format!("Invalid JSON: {e}")))?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(AppError::Content(format!(
                "Expected a JSON array of listings, found {}",
                json_type_name(&other)
            )))
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        let record = match serde_json::from_value::<ListingRecord>(item) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(%kind, position, error = %e, "Skipping malformed listing");
                continue;
            }
        };

        if let Err(reason) = record.validate() {
            tracing::warn!(%kind, position, %reason, "Skipping invalid listing");
            continue;
        }

        if let Some(declared) = record.kind.filter(|k| *k != kind) {
            tracing::debug!(%kind, %declared, slug = %record.slug, "Listing kind overridden by its content file");
        }

        records.push(ListingRecord {
            kind: Some(kind),
            ..record
        });
    }

    Ok(records)
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> JsonListingRepository {
        JsonListingRepository::new()
            .with_listings(
                ListingKind::Project,
                vec![ListingRecord::new("cañones-ayacucho-qorihuillca", "Cañones")],
            )
            .with_listings(
                ListingKind::Property,
                vec![
                    ListingRecord::new("huanupata", "Huanupata"),
                    ListingRecord::new("bungavilia-ayacucho", "Bungavilia"),
                ],
            )
    }

    #[tokio::test]
    async fn test_find_by_exact_slug() {
        let repo = repo();
        let found = repo
            .find_by_slug(ListingKind::Property, "huanupata")
            .await
            .unwrap();
        assert_eq!(found.unwrap().title, "Huanupata");
    }

    #[tokio::test]
    async fn test_find_by_slug_aliases() {
        let repo = repo();
        for slug in [
            "cañones-ayacucho-qorihuillca",
            "ca%C3%B1ones-ayacucho-qorihuillca",
            "CAÑONES-AYACUCHO-QORIHUILLCA",
            "canones-ayacucho-qorihuillca",
        ] {
            let found = repo.find_by_slug(ListingKind::Project, slug).await.unwrap();
            assert_eq!(found.map(|r| r.title), Some("Cañones".to_string()), "slug {slug}");
        }
    }

    #[tokio::test]
    async fn test_find_respects_kind() {
        let repo = repo();
        let found = repo
            .find_by_slug(ListingKind::Project, "huanupata")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_list_keeps_order_and_sets_kind() {
        let repo = repo();
        let properties = repo.list(ListingKind::Property).await.unwrap();
        let slugs: Vec<_> = properties.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["huanupata", "bungavilia-ayacucho"]);
        assert!(properties.iter().all(|r| r.kind == Some(ListingKind::Property)));
        assert!(repo.list(ListingKind::Rental).await.unwrap().is_empty());
        assert_eq!(repo.len(), 3);
    }

    #[test]
    fn test_duplicate_slug_keeps_first() {
        let repo = JsonListingRepository::new().with_listings(
            ListingKind::Property,
            vec![
                ListingRecord::new("huanupata", "Primero"),
                ListingRecord::new("huanupata", "Segundo"),
            ],
        );
        assert_eq!(repo.len(), 1);
        assert_eq!(
            repo.lookup(ListingKind::Property, "huanupata").unwrap().title,
            "Primero"
        );
    }

    #[test]
    fn test_exact_slug_beats_folded_alias() {
        let repo = JsonListingRepository::new().with_listings(
            ListingKind::Project,
            vec![
                ListingRecord::new("cañones", "Con tilde"),
                ListingRecord::new("canones", "Sin tilde"),
            ],
        );
        assert_eq!(repo.lookup(ListingKind::Project, "canones").unwrap().title, "Sin tilde");
        assert_eq!(repo.lookup(ListingKind::Project, "cañones").unwrap().title, "Con tilde");
        assert_eq!(
            repo.lookup(ListingKind::Project, "ca%C3%B1ones").unwrap().title,
            "Con tilde"
        );
    }

    #[test]
    fn test_parse_skips_invalid_records() {
        let raw = r#"[
            {"slug": "ok", "titulo": "Bien"},
            {"slug": "sin-titulo"},
            {"slug": "", "titulo": "Sin slug"},
            "not an object",
            {"slug": "otro", "titulo": "Otro", "tipo": "alquiler"}
        ]"#;
        let records = parse_listings(ListingKind::Project, raw).unwrap();
        let slugs: Vec<_> = records.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["ok", "otro"]);
        assert_eq!(records[1].kind, Some(ListingKind::Project));
    }

    #[test]
    fn test_parse_keeps_records_with_malformed_optional_fields() {
        let raw = r#"[
            {"slug": "a", "titulo": "A", "subtitulo": null},
            {"slug": "b", "titulo": "B", "precioDesdeSol": 20000},
            {"slug": "c", "titulo": "C", "etiquetas": null},
            {"slug": "d", "titulo": "D", "caracteristicas": [{"label": "Área", "value": 200}]}
        ]"#;
        let records = parse_listings(ListingKind::Project, raw).unwrap();
        let slugs: Vec<_> = records.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b", "c", "d"]);
        assert_eq!(records[1].price_from.as_deref(), Some("20000"));
        assert_eq!(records[3].attributes[0].value, "200");
    }

    #[tokio::test]
    async fn test_malformed_optional_fields_still_resolve() {
        for record in [
            r#"{"slug": "a", "titulo": "A", "subtitulo": null}"#,
            r#"{"slug": "a", "titulo": "A", "precioDesdeSol": 20000}"#,
            r#"{"slug": "a", "titulo": "A", "etiquetas": null}"#,
            r#"{"slug": "a", "titulo": "A", "caracteristicas": [{"label": "Área", "value": 200}]}"#,
        ] {
            let records = parse_listings(ListingKind::Project, &format!("[{record}]")).unwrap();
            let repo = JsonListingRepository::new().with_listings(ListingKind::Project, records);
            let found = repo.find_by_slug(ListingKind::Project, "a").await.unwrap();
            assert!(found.is_some(), "record {record} should load");
        }
    }

    #[test]
    fn test_fractional_remaining_stock_is_in_stock() {
        use crate::config::SiteConfig;
        use crate::models::metadata::Availability;
        use crate::seo::derive::derive_metadata;

        let raw = r#"[{"slug": "a", "titulo": "A", "stockLotes": {"total": 10, "restantes": 0.5}}]"#;
        let records = parse_listings(ListingKind::Project, raw).unwrap();
        let meta = derive_metadata(&records[0], &SiteConfig::default());
        assert_eq!(records[0].stock.as_ref().and_then(|s| s.remaining), Some(0.5));
        assert_eq!(meta.availability, Availability::InStock);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_listings(ListingKind::Project, r#"{"slug": "x"}"#).unwrap_err();
        assert!(matches!(err, AppError::Content(msg) if msg.contains("an object")));

        let err = parse_listings(ListingKind::Project, "not json").unwrap_err();
        assert!(matches!(err, AppError::Content(_)));
    }

    #[tokio::test]
    async fn test_mock_repository() {
        let mut mock = MockListingRepository::new();
        mock.expect_list()
            .withf(|kind| *kind == ListingKind::Rental)
            .returning(|_| Ok(vec![ListingRecord::new("depa-centro", "Depa Centro")]));

        let rentals = mock.list(ListingKind::Rental).await.unwrap();
        assert_eq!(rentals[0].slug, "depa-centro");
    }
}
