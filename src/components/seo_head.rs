use leptos::prelude::*;
use leptos_meta::{Link, Meta, Title};

use crate::seo::page_meta::{PageMeta, OG_IMAGE_HEIGHT, OG_IMAGE_WIDTH};

/// Title, description, canonical, robots, Open Graph and Twitter tags.
#[component]
pub fn SeoHead(page: PageMeta) -> impl IntoView {
    let PageMeta {
        title,
        description,
        canonical,
        image_url,
        image_alt,
        site_name,
        locale,
        ..
    } = page.clone();

    view! {
        <Title text=title.clone()/>
        <Meta name="description" content=description.clone()/>
        <Meta name="keywords" content=page.keywords_content()/>
        <Meta name="robots" content=page.robots.content()/>
        <Link rel="canonical" href=canonical.clone()/>

        <Meta property="og:type" content="website"/>
        <Meta property="og:site_name" content=site_name/>
        <Meta property="og:locale" content=locale/>
        <Meta property="og:title" content=title.clone()/>
        <Meta property="og:description" content=description.clone()/>
        <Meta property="og:url" content=canonical/>
        <Meta property="og:image" content=image_url.clone()/>
        <Meta property="og:image:width" content=OG_IMAGE_WIDTH.to_string()/>
        <Meta property="og:image:height" content=OG_IMAGE_HEIGHT.to_string()/>
        <Meta property="og:image:alt" content=image_alt/>

        <Meta name="twitter:card" content="summary_large_image"/>
        <Meta name="twitter:title" content=title/>
        <Meta name="twitter:description" content=description/>
        <Meta name="twitter:image" content=image_url/>
    }
}

/// One `<script type="application/ld+json">` per structured-data object.
///
/// Bodies must already be escaped with [`crate::seo::jsonld::to_script_json`].
#[component]
pub fn JsonLdScripts(scripts: Vec<String>) -> impl IntoView {
    scripts
        .into_iter()
        .map(|json| view! { <script type="application/ld+json" inner_html=json></script> })
        .collect_view()
}
