use leptos::prelude::*;

use crate::components::listing_card::ListingCard;
use crate::content::catalog::CatalogGroups;
use crate::models::listing::ListingKind;

#[server]
pub async fn search_catalog(term: String) -> Result<CatalogGroups, ServerFnError> {
    use crate::state::AppState;

    let state = use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("AppState not found in context"))?;

    crate::content::catalog::search(state.listings.as_ref(), &term)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// Searchable catalog, one section per listing kind, or only `only` when set.
#[component]
pub fn CatalogView(#[prop(optional)] only: Option<ListingKind>) -> impl IntoView {
    let (term, set_term) = signal(String::new());
    let results = Resource::new(move || term.get(), search_catalog);

    view! {
        <div class="catalog">
            <input
                type="search"
                placeholder="Buscar por nombre o ubicación..."
                on:input=move |ev| set_term.set(event_target_value(&ev))
                prop:value=term
            />
            <Suspense fallback=|| view! { <p>"Buscando..."</p> }>
                {move || results.get().map(|res| match res {
                    Ok(groups) => {
                        let kinds: Vec<ListingKind> = ListingKind::ALL
                            .into_iter()
                            .filter(|kind| only.is_none_or(|o| o == *kind))
                            .filter(|kind| !groups.get(*kind).is_empty())
                            .collect();
                        if kinds.is_empty() {
                            return view! { <p class="catalog-empty">"No se encontraron inmuebles."</p> }
                                .into_any();
                        }
                        kinds
                            .into_iter()
                            .map(|kind| view! { <CatalogSection kind=kind groups=groups.clone()/> })
                            .collect_view()
                            .into_any()
                    }
                    Err(e) => view! { <p class="error">"Error: " {e.to_string()}</p> }.into_any(),
                })}
            </Suspense>
        </div>
    }
}

#[component]
fn CatalogSection(kind: ListingKind, groups: CatalogGroups) -> impl IntoView {
    let cards = groups.get(kind).to_vec();

    view! {
        <section id=kind.path_segment() class="catalog-section">
            <h2>{kind.plural_label()}</h2>
            <div class="catalog-grid">
                {cards.into_iter().map(|card| view! { <ListingCard card=card/> }).collect_view()}
            </div>
        </section>
    }
}
