use leptos::prelude::*;

use crate::content::catalog::CatalogCard;

#[component]
pub fn ListingCard(card: CatalogCard) -> impl IntoView {
    let CatalogCard {
        title,
        subtitle,
        category,
        location,
        price_from,
        image,
        tags,
        href,
        ..
    } = card;
    let alt = title.clone();

    view! {
        <article class="listing-card">
            <a href=href>
                {image.map(|src| view! { <img src=src alt=alt loading="lazy"/> })}
                <div class="listing-card-body">
                    <span class="listing-card-category">{category}</span>
                    <h3>{title}</h3>
                    <p class="listing-card-subtitle">{subtitle}</p>
                    <p class="listing-card-location">{location}</p>
                    {price_from.map(|price| view! { <p class="listing-card-price">"Desde " {price}</p> })}
                    <ul class="listing-card-tags">
                        {tags.into_iter().map(|tag| view! { <li>{tag}</li> }).collect_view()}
                    </ul>
                </div>
            </a>
        </article>
    }
}
