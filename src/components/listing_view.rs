use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::api::listings::ListingPage;
use crate::components::seo_head::{JsonLdScripts, SeoHead};
use crate::models::listing::{ListingKind, ListingRecord};

#[server]
pub async fn get_listing_page(kind: ListingKind, slug: String) -> Result<ListingPage, ServerFnError> {
    use crate::api::listings::load_listing_page;
    use crate::state::AppState;

    let state = use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("AppState not found in context"))?;

    load_listing_page(state.listings.as_ref(), &state.site, kind, &slug)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// Detail page for the listing named by the `:slug` route parameter.
#[component]
pub fn ListingView(kind: ListingKind) -> impl IntoView {
    let params = use_params_map();
    let slug = Memo::new(move |_| params.get().get("slug").unwrap_or_default());

    let page = Resource::new(move || slug.get(), move |s| get_listing_page(kind, s));

    view! {
        <Suspense fallback=|| view! { <p>"Cargando..."</p> }>
            {move || page.get().map(|res| match res {
                Ok(page) => view! { <ListingDetail page=page/> }.into_any(),
                Err(e) => view! { <p class="error">"Error: " {e.to_string()}</p> }.into_any(),
            })}
        </Suspense>
    }
}

#[component]
fn ListingDetail(page: ListingPage) -> impl IntoView {
    let scripts = page.seo.scripts();
    let ListingPage {
        kind,
        record,
        seo,
        description_html,
        enquiry_link,
        ..
    } = page;

    let body = match record {
        Some(record) => view! {
            <ListingBody
                record=record
                description_html=description_html
                enquiry_link=enquiry_link
            />
        }
        .into_any(),
        None => view! {
            <section class="listing-not-found">
                <h1>{seo.page.title.clone()}</h1>
                <p>{seo.page.description.clone()}</p>
                <a href=kind.catalog_path()>"Ver " {kind.plural_label().to_lowercase()}</a>
            </section>
        }
        .into_any(),
    };

    view! {
        <SeoHead page=seo.page/>
        <JsonLdScripts scripts=scripts/>
        {body}
    }
}

#[component]
fn ListingBody(
    record: ListingRecord,
    description_html: Option<String>,
    enquiry_link: String,
) -> impl IntoView {
    let ListingRecord {
        title,
        subtitle,
        category,
        location,
        price_from,
        price_from_usd,
        image,
        stock,
        attributes,
        amenities,
        contact,
        maps_url,
        gallery,
        ..
    } = record;

    let stock_line = stock.and_then(|s| match (s.remaining, s.total) {
        (Some(remaining), Some(total)) if remaining <= 0.0 => Some(format!("Agotado ({total} lotes)")),
        (Some(remaining), Some(total)) => Some(format!("Quedan {remaining} de {total} lotes")),
        (Some(remaining), None) if remaining > 0.0 => Some(format!("Quedan {remaining} lotes")),
        (Some(_), None) => Some("Agotado".to_string()),
        _ => None,
    });
    let phone = contact.and_then(|c| c.phone).filter(|p| !p.trim().is_empty());
    let photos = gallery.map(|g| g.photos).unwrap_or_default();
    let alt = title.clone();

    view! {
        <article class="listing-detail">
            <header>
                <span class="listing-category">{category}</span>
                <h1>{title}</h1>
                <p class="listing-subtitle">{subtitle}</p>
                <p class="listing-location">{location}</p>
            </header>

            {image.map(|src| view! { <img class="listing-hero" src=src alt=alt/> })}

            <section class="listing-price">
                {price_from.map(|p| view! { <p>"Desde " {p}</p> })}
                {price_from_usd.map(|p| view! { <p class="listing-price-usd">{p}</p> })}
                {stock_line.map(|line| view! { <p class="listing-stock">{line}</p> })}
            </section>

            {description_html.map(|html| view! { <div class="listing-description" inner_html=html></div> })}

            <dl class="listing-attributes">
                {attributes
                    .into_iter()
                    .map(|attr| view! { <dt>{attr.label}</dt><dd>{attr.value}</dd> })
                    .collect_view()}
            </dl>

            <ul class="listing-amenities">
                {amenities.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
            </ul>

            <div class="listing-gallery">
                {photos
                    .into_iter()
                    .map(|src| view! { <img src=src loading="lazy" alt=""/> })
                    .collect_view()}
            </div>

            <footer class="listing-contact">
                <a class="cta-whatsapp" href=enquiry_link target="_blank" rel="noopener">
                    "Consultar por WhatsApp"
                </a>
                {phone.map(|p| view! { <a href=crate::contact::phone_link(&p)>{p.clone()}</a> })}
                {maps_url.map(|url| view! { <a href=url target="_blank" rel="noopener">"Ver en el mapa"</a> })}
            </footer>
        </article>
    }
}
