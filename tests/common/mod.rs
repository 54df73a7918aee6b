#![allow(dead_code)]

use std::path::Path;

use serde_json::json;

/// Write a content file into `dir`.
pub fn write_content(dir: &Path, file: &str, body: &serde_json::Value) {
    std::fs::write(dir.join(file), body.to_string()).expect("Failed to write content file");
}

/// Two projects (one sold out), one property and one rental.
pub fn seed_content(dir: &Path) {
    write_content(
        dir,
        "proyectos.json",
        &json!([
            {
                "slug": "cañones-ayacucho-qorihuillca",
                "titulo": "Cañones",
                "subtitulo": "Qorihuillca",
                "categoria": "Lotes",
                "ubicacion": "Qorihuillca, Huamanga – Ayacucho",
                "precioDesdeSol": "S/ 30,000",
                "imagen": "/CAÑONES/CAÑONES03.webp",
                "etiquetas": ["Ayacucho", "ayacucho"],
                "descripcion": "Lotes con **agua** y luz.",
                "caracteristicas": [{ "label": "Área típica", "value": "200 m²" }],
                "stockLotes": { "total": 60, "restantes": 12 }
            },
            {
                "slug": "villa-sol-2-qorihuillca",
                "titulo": "Villa Sol 2",
                "ubicacion": "Qorihuillca",
                "precioDesdeSol": "S/ 19,000",
                "stockLotes": { "total": 40, "restantes": 0 }
            }
        ]),
    );
    write_content(
        dir,
        "propiedades.json",
        &json!([
            {
                "slug": "huanupata",
                "titulo": "Huanupata",
                "ubicacion": "Carmen Alto, Ayacucho",
                "precioDesdeSol": "Consultar"
            }
        ]),
    );
    write_content(
        dir,
        "alquileres.json",
        &json!([
            {
                "slug": "departamento-centro",
                "titulo": "Departamento Centro",
                "ubicacion": "Huamanga"
            }
        ]),
    );
}

#[cfg(feature = "ssr")]
pub use server::TestEnv;

#[cfg(feature = "ssr")]
mod server {
    use std::sync::Arc;

    use axum::routing::get;
    use axum::Router;
    use tempfile::TempDir;

    use casagrande::config::SiteConfig;
    use casagrande::content::repository::{JsonListingRepository, ListingRepository};
    use casagrande::state::AppState;

    /// Seeded content directory plus the Axum router serving it.
    ///
    /// The directory is removed when this struct is dropped.
    pub struct TestEnv {
        _content: TempDir,
        pub router: Router,
        pub repo: Arc<dyn ListingRepository>,
        pub site: SiteConfig,
    }

    impl TestEnv {
        pub fn start() -> Self {
            let content = TempDir::new().expect("Failed to create temp dir");
            super::seed_content(content.path());

            let site = SiteConfig {
                content_dir: content.path().to_path_buf(),
                ..SiteConfig::default()
            };
            let repo: Arc<dyn ListingRepository> = Arc::new(
                JsonListingRepository::load_dir(&site.content_dir)
                    .expect("Failed to load seeded content"),
            );

            let leptos_options = leptos::prelude::LeptosOptions::builder()
                .output_name("casagrande")
                .build();
            let app_state = AppState::new(site.clone(), repo.clone(), leptos_options);

            // API and SEO routes only, no Leptos SSR
            let router = Router::new()
                .route("/sitemap.xml", get(casagrande::api::seo::sitemap_handler))
                .route("/robots.txt", get(casagrande::api::seo::robots_handler))
                .route(
                    "/api/v1/listings/{kind}/{slug}/metadata",
                    get(casagrande::api::listings::listing_metadata_handler),
                )
                .with_state(app_state);

            Self {
                _content: content,
                router,
                repo,
                site,
            }
        }

        /// Build an `axum_test::TestServer` from this environment's router.
        pub fn server(&self) -> axum_test::TestServer {
            axum_test::TestServer::builder()
                .expect_success_by_default()
                .try_build(self.router.clone())
                .expect("Failed to build TestServer")
        }

        /// Build a `TestServer` that does NOT expect success by default (for error tests).
        pub fn server_permissive(&self) -> axum_test::TestServer {
            axum_test::TestServer::builder()
                .try_build(self.router.clone())
                .expect("Failed to build TestServer")
        }
    }
}
