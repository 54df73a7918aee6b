mod common;

use casagrande::content::catalog;
use casagrande::content::repository::{JsonListingRepository, ListingRepository};
use casagrande::error::AppError;
use casagrande::models::listing::ListingKind;
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn loads_every_kind_from_content_dir() {
    let dir = TempDir::new().unwrap();
    common::seed_content(dir.path());

    let repo = JsonListingRepository::load_dir(dir.path()).unwrap();
    assert_eq!(repo.len(), 4);

    let projects = repo.list(ListingKind::Project).await.unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].title, "Cañones");
    assert_eq!(projects[0].kind, Some(ListingKind::Project));
    assert_eq!(
        projects[0].stock.as_ref().and_then(|s| s.remaining),
        Some(12.0)
    );

    let rentals = repo.list(ListingKind::Rental).await.unwrap();
    assert_eq!(rentals[0].slug, "departamento-centro");
}

#[tokio::test]
async fn missing_file_leaves_kind_empty() {
    let dir = TempDir::new().unwrap();
    common::write_content(
        dir.path(),
        "propiedades.json",
        &json!([{ "slug": "huanupata", "titulo": "Huanupata" }]),
    );

    let repo = JsonListingRepository::load_dir(dir.path()).unwrap();
    assert!(repo.list(ListingKind::Project).await.unwrap().is_empty());
    assert!(repo.list(ListingKind::Rental).await.unwrap().is_empty());
    assert_eq!(repo.list(ListingKind::Property).await.unwrap().len(), 1);
}

#[test]
fn empty_dir_loads_empty_repository() {
    let dir = TempDir::new().unwrap();
    let repo = JsonListingRepository::load_dir(dir.path()).unwrap();
    assert!(repo.is_empty());
}

#[test]
fn non_array_file_is_a_content_error() {
    let dir = TempDir::new().unwrap();
    common::write_content(
        dir.path(),
        "proyectos.json",
        &json!({ "slug": "cañones", "titulo": "Cañones" }),
    );

    let err = JsonListingRepository::load_dir(dir.path()).unwrap_err();
    match err {
        AppError::Content(msg) => assert!(msg.contains("proyectos.json"), "message: {msg}"),
        other => panic!("expected content error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_records_are_skipped() {
    let dir = TempDir::new().unwrap();
    common::write_content(
        dir.path(),
        "proyectos.json",
        &json!([
            { "slug": "sin-titulo" },
            { "slug": "   ", "titulo": "Slug en blanco" },
            { "slug": "ok", "titulo": "Válido", "stockLotes": { "total": "muchos", "restantes": 3 } }
        ]),
    );

    let repo = JsonListingRepository::load_dir(dir.path()).unwrap();
    let projects = repo.list(ListingKind::Project).await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].slug, "ok");

    let stock = projects[0].stock.as_ref().unwrap();
    assert_eq!(stock.total, None);
    assert_eq!(stock.remaining, Some(3.0));
}

#[tokio::test]
async fn slug_lookup_accepts_aliases() {
    let dir = TempDir::new().unwrap();
    common::seed_content(dir.path());
    let repo = JsonListingRepository::load_dir(dir.path()).unwrap();

    for slug in [
        "cañones-ayacucho-qorihuillca",
        "canones-ayacucho-qorihuillca",
        "ca%C3%B1ones-ayacucho-qorihuillca",
        " Cañones-Ayacucho-Qorihuillca ",
    ] {
        let found = repo.find_by_slug(ListingKind::Project, slug).await.unwrap();
        assert!(found.is_some(), "slug {slug:?} should resolve");
    }

    let missing = repo
        .find_by_slug(ListingKind::Property, "canones-ayacucho-qorihuillca")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn catalog_search_groups_results() {
    let dir = TempDir::new().unwrap();
    common::seed_content(dir.path());
    let repo = JsonListingRepository::load_dir(dir.path()).unwrap();

    let groups = catalog::search(&repo, "qorihuillca").await.unwrap();
    assert_eq!(groups.projects.len(), 2);
    assert!(groups.properties.is_empty());
    assert!(groups.rentals.is_empty());

    let groups = catalog::search(&repo, "ayacucho").await.unwrap();
    let hrefs: Vec<_> = groups
        .projects
        .iter()
        .chain(&groups.properties)
        .map(|c| c.href.as_str())
        .collect();
    assert_eq!(
        hrefs,
        vec!["/proyectos/ca%C3%B1ones-ayacucho-qorihuillca", "/propiedades/huanupata"]
    );
}
