use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet};
use leptos_router::components::*;
use leptos_router::{path, SsrMode};

use crate::components::catalog::CatalogView;
use crate::contact::whatsapp_link;
use crate::components::listing_view::ListingView;
use crate::components::sale_form::SaleForm;
use crate::components::seo_head::{JsonLdScripts, SeoHead};
use crate::config::SiteConfig;
use crate::models::listing::ListingKind;
use crate::seo::jsonld;
use crate::seo::page_meta::PageMeta;

/// HTML document wrapping [`App`] for server rendering.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="es">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[server]
pub async fn get_site_config() -> Result<SiteConfig, ServerFnError> {
    use crate::state::AppState;

    let state = use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("AppState not found in context"))?;
    Ok(state.site.as_ref().clone())
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/casagrande.css"/>

        <Router>
            <main>
                <Routes fallback=|| view! { "Página no encontrada." }.into_view()>
                    <Route path=path!("/") view=HomePage ssr=SsrMode::Async/>
                    <Route path=path!("/inmuebles") view=CatalogPage ssr=SsrMode::Async/>
                    <Route
                        path=path!("/proyectos")
                        view=|| view! { <KindCatalogPage kind=ListingKind::Project/> }
                        ssr=SsrMode::Async
                    />
                    <Route
                        path=path!("/propiedades")
                        view=|| view! { <KindCatalogPage kind=ListingKind::Property/> }
                        ssr=SsrMode::Async
                    />
                    <Route
                        path=path!("/proyectos/:slug")
                        view=|| view! { <ListingView kind=ListingKind::Project/> }
                        ssr=SsrMode::Async
                    />
                    <Route
                        path=path!("/propiedades/:slug")
                        view=|| view! { <ListingView kind=ListingKind::Property/> }
                        ssr=SsrMode::Async
                    />
                    <Route
                        path=path!("/alquileres/:slug")
                        view=|| view! { <ListingView kind=ListingKind::Rental/> }
                        ssr=SsrMode::Async
                    />
                    <Route path=path!("/venta-terreno") view=SalePage ssr=SsrMode::Async/>
                    <Route path=path!("/nosotros") view=AboutPage ssr=SsrMode::Async/>
                </Routes>
            </main>
        </Router>
    }
}

/// Runs `render` once the site configuration has loaded.
#[component]
fn WithSite<F, V>(render: F) -> impl IntoView
where
    F: Fn(SiteConfig) -> V + Send + Sync + 'static,
    V: IntoView + 'static,
{
    let site = Resource::new(|| (), |_| get_site_config());

    view! {
        <Suspense fallback=|| view! { <p>"Cargando..."</p> }>
            {move || site.get().map(|res| match res {
                Ok(site) => render(site).into_any(),
                Err(e) => view! { <p class="error">"Error: " {e.to_string()}</p> }.into_any(),
            })}
        </Suspense>
    }
}

/// `CollectionPage` and breadcrumb scripts for a catalog page.
fn catalog_scripts(site: &SiteConfig, page: &PageMeta, name: &str) -> Vec<String> {
    let collection =
        jsonld::collection_page(site, &page.canonical, &page.title, &page.description).to_value();
    let breadcrumb = jsonld::section_breadcrumb(site, name, &page.canonical).to_value();
    vec![
        jsonld::to_script_json(&collection),
        jsonld::to_script_json(&breadcrumb),
    ]
}

#[component]
fn HomePage() -> impl IntoView {
    view! {
        <WithSite render=|site: SiteConfig| {
            let page = PageMeta::home(&site);
            let organization = jsonld::organization(&site).to_value();
            let scripts = vec![jsonld::to_script_json(&organization)];

            view! {
                <SeoHead page=page/>
                <JsonLdScripts scripts=scripts/>
                <section class="hero">
                    <h1>{site.brand_name.clone()}</h1>
                    <p>{site.description.clone()}</p>
                    <a href="/inmuebles">"Ver inmuebles"</a>
                </section>
            }
        }/>
    }
}

#[component]
fn CatalogPage() -> impl IntoView {
    view! {
        <WithSite render=|site: SiteConfig| {
            let page = PageMeta::for_all_listings(&site);
            let scripts = catalog_scripts(&site, &page, "Inmuebles");

            view! {
                <SeoHead page=page/>
                <JsonLdScripts scripts=scripts/>
                <h1>"Inmuebles"</h1>
                <CatalogView/>
            }
        }/>
    }
}

#[component]
fn KindCatalogPage(kind: ListingKind) -> impl IntoView {
    view! {
        <WithSite render=move |site: SiteConfig| {
            let mut page = PageMeta::for_catalog(kind, &site);
            page.canonical = site.absolute_url(&format!("/{}", kind.path_segment()));
            let scripts = catalog_scripts(&site, &page, kind.plural_label());

            view! {
                <SeoHead page=page/>
                <JsonLdScripts scripts=scripts/>
                <h1>{kind.plural_label()}</h1>
                <CatalogView only=kind/>
            }
        }/>
    }
}

#[component]
fn SalePage() -> impl IntoView {
    view! {
        <WithSite render=|site: SiteConfig| {
            let mut page = PageMeta::home(&site);
            page.title = format!("Vende tu terreno | {}", site.brand_name);
            page.canonical = site.absolute_url("/venta-terreno");

            view! {
                <SeoHead page=page/>
                <h1>"Vende tu propiedad"</h1>
                <SaleForm site=site/>
            }
        }/>
    }
}

#[component]
fn AboutPage() -> impl IntoView {
    view! {
        <WithSite render=|site: SiteConfig| {
            let page = PageMeta::about(&site);
            let about = jsonld::about_page(&site, &page.canonical, &page.description).to_value();
            let breadcrumb = jsonld::section_breadcrumb(&site, "Nosotros", &page.canonical).to_value();
            let scripts = vec![
                jsonld::to_script_json(&about),
                jsonld::to_script_json(&breadcrumb),
            ];
            let description = page.description.clone();
            let address = format!(
                "{}, {} – {}",
                site.address.street_address, site.address.locality, site.address.region
            );
            let contact = whatsapp_link(
                &site.contact.whatsapp,
                &format!("Hola {}, quiero más información.", site.brand_name),
            );

            view! {
                <SeoHead page=page/>
                <JsonLdScripts scripts=scripts/>
                <section class="about">
                    <h1>"Nosotros"</h1>
                    <p>{description}</p>
                    <p class="address">{address}</p>
                    <a class="whatsapp" href=contact target="_blank" rel="noopener">
                        "Escríbenos por WhatsApp"
                    </a>
                </section>
            }
        }/>
    }
}
