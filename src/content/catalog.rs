use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::listing::{ListingKind, ListingRecord};
use crate::seo::slug::fold_diacritics;

use super::repository::ListingRepository;

/// Summary of one listing as shown on a catalog card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCard {
    pub kind: ListingKind,
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub category: String,
    pub location: String,
    pub price_from: Option<String>,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub href: String,
}

impl CatalogCard {
    pub fn from_record(kind: ListingKind, record: &ListingRecord) -> Self {
        Self {
            kind,
            slug: record.slug.clone(),
            title: record.title.clone(),
            subtitle: record.subtitle.clone(),
            category: record.category.clone(),
            location: record.location.clone(),
            price_from: record.price_from.clone(),
            image: record.image.clone(),
            tags: record.tags.clone(),
            href: href(kind, &record.slug),
        }
    }
}

/// Catalog results split into the three sections of the listings page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogGroups {
    pub projects: Vec<CatalogCard>,
    pub properties: Vec<CatalogCard>,
    pub rentals: Vec<CatalogCard>,
}

impl CatalogGroups {
    pub fn get(&self, kind: ListingKind) -> &[CatalogCard] {
        match kind {
            ListingKind::Project => &self.projects,
            ListingKind::Property => &self.properties,
            ListingKind::Rental => &self.rentals,
        }
    }

    fn get_mut(&mut self, kind: ListingKind) -> &mut Vec<CatalogCard> {
        match kind {
            ListingKind::Project => &mut self.projects,
            ListingKind::Property => &mut self.properties,
            ListingKind::Rental => &mut self.rentals,
        }
    }

    pub fn total(&self) -> usize {
        self.projects.len() + self.properties.len() + self.rentals.len()
    }
}

/// Site-relative link to a listing detail page.
pub fn href(kind: ListingKind, slug: &str) -> String {
    format!("/{}/{}", kind.path_segment(), urlencoding::encode(slug))
}

/// Whether `record` matches a catalog search term.
///
/// Matches on title or location, ignoring case and accents. A blank term
/// matches everything.
pub fn matches(record: &ListingRecord, term: &str) -> bool {
    let needle = fold_for_search(term);
    if needle.is_empty() {
        return true;
    }
    fold_for_search(&record.title).contains(&needle)
        || fold_for_search(&record.location).contains(&needle)
}

fn fold_for_search(text: &str) -> String {
    fold_diacritics(text.trim()).to_lowercase()
}

/// Group records of one kind that match `term`, preserving order.
pub fn filter_records(kind: ListingKind, records: &[ListingRecord], term: &str) -> Vec<CatalogCard> {
    records
        .iter()
        .filter(|record| matches(record, term))
        .map(|record| CatalogCard::from_record(kind, record))
        .collect()
}

/// Search every listing kind in the repository.
pub async fn search(repo: &dyn ListingRepository, term: &str) -> Result<CatalogGroups, AppError> {
    let mut groups = CatalogGroups::default();
    for kind in ListingKind::ALL {
        let records = repo.list(kind).await?;
        *groups.get_mut(kind) = filter_records(kind, &records, term);
    }

    tracing::debug!(term, results = groups.total(), "Catalog search");
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::repository::JsonListingRepository;

    fn record(slug: &str, title: &str, location: &str) -> ListingRecord {
        let mut record = ListingRecord::new(slug, title);
        record.location = location.to_string();
        record
    }

    fn repo() -> JsonListingRepository {
        JsonListingRepository::new()
            .with_listings(
                ListingKind::Project,
                vec![
                    record("cañones-ayacucho-qorihuillca", "Cañones", "Qorihuillca, Huamanga"),
                    record("villa-sol-2-qorihuillca", "Villa Sol 2", "Qorihuillca"),
                ],
            )
            .with_listings(
                ListingKind::Property,
                vec![record("huanupata", "Huanupata", "Carmen Alto, Ayacucho")],
            )
            .with_listings(
                ListingKind::Rental,
                vec![record("depa-centro", "Departamento Centro", "Huamanga")],
            )
    }

    #[test]
    fn test_href_encodes_slug() {
        assert_eq!(
            href(ListingKind::Project, "cañones"),
            "/proyectos/ca%C3%B1ones"
        );
        assert_eq!(href(ListingKind::Rental, "depa-centro"), "/alquileres/depa-centro");
    }

    #[test]
    fn test_matches_title_or_location() {
        let r = record("x", "Villa Sol 2", "Qorihuillca");
        assert!(matches(&r, "villa"));
        assert!(matches(&r, "QORI"));
        assert!(matches(&r, "  "));
        assert!(!matches(&r, "huanupata"));
    }

    #[test]
    fn test_matches_ignores_accents() {
        let r = record("x", "Cañones", "Huamanga");
        assert!(matches(&r, "canones"));
        assert!(matches(&r, "CAÑO"));
    }

    #[tokio::test]
    async fn test_search_groups_by_kind() {
        let repo = repo();
        let groups = search(&repo, "").await.unwrap();
        assert_eq!(groups.projects.len(), 2);
        assert_eq!(groups.properties.len(), 1);
        assert_eq!(groups.rentals.len(), 1);
        assert_eq!(groups.total(), 4);
        assert_eq!(groups.properties[0].href, "/propiedades/huanupata");
    }

    #[tokio::test]
    async fn test_search_filters_each_group() {
        let repo = repo();
        let groups = search(&repo, "huamanga").await.unwrap();
        let slugs: Vec<_> = ListingKind::ALL
            .iter()
            .flat_map(|k| groups.get(*k).iter().map(|c| c.slug.as_str()))
            .collect();
        assert_eq!(slugs, vec!["cañones-ayacucho-qorihuillca", "depa-centro"]);
    }
}
