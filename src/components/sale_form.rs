use leptos::prelude::*;

use crate::config::SiteConfig;
use crate::contact::{PropertyType, SaleInquiry};

/// Owner form that turns its fields into a prefilled WhatsApp message.
#[component]
pub fn SaleForm(site: SiteConfig) -> impl IntoView {
    let inquiry = RwSignal::new(SaleInquiry::default());

    let link = {
        let site = site.clone();
        move || inquiry.with(|i| i.whatsapp_link(&site))
    };
    let missing = move || inquiry.with(|i| i.missing_fields().join(", "));
    let ready = move || inquiry.with(|i| i.missing_fields().is_empty());

    view! {
        <form class="sale-form" on:submit=|ev| ev.prevent_default()>
            <label>
                "Tipo de propiedad *"
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    inquiry.update(|i| i.property_type = PropertyType::from_value(&value));
                }>
                    <option value="">"Selecciona"</option>
                    {PropertyType::CHOICES
                        .into_iter()
                        .map(|t| view! { <option value=t.value()>{t.label()}</option> })
                        .collect_view()}
                </select>
            </label>
            <TextField label="Nombre *" on_input=move |v| inquiry.update(|i| i.name = v)/>
            <TextField label="Número (WhatsApp) *" on_input=move |v| inquiry.update(|i| i.phone = v)/>
            <TextField label="Lugar / Ubicación *" on_input=move |v| inquiry.update(|i| i.place = v)/>
            <TextField label="Precio (referencial) *" on_input=move |v| inquiry.update(|i| i.price = v)/>

            <Show
                when=ready
                fallback=move || view! { <p class="sale-form-missing">"Completa: " {missing}</p> }
            >
                <a class="cta-whatsapp" href=link.clone() target="_blank" rel="noopener">
                    "Enviar por WhatsApp"
                </a>
            </Show>
        </form>
    }
}

#[component]
fn TextField(label: &'static str, on_input: impl Fn(String) + 'static) -> impl IntoView {
    view! {
        <label>
            {label}
            <input type="text" on:input=move |ev| on_input(event_target_value(&ev))/>
        </label>
    }
}
