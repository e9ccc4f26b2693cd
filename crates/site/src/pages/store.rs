use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use site_core::{
    api::store_error_message,
    stores::{
        format_rating, instagram_href, parse_store_id, phone_href, whatsapp_href, StoreDetails,
    },
    urls::{store_deep_link, APP_NAME},
};
use site_runtime::{use_site_api, OpenInAppButton};

use super::{LoadingNotice, PageStateView};

#[component]
pub(crate) fn StorePage() -> impl IntoView {
    let params = use_params_map();
    let store_id =
        create_memo(move |_| params.with(|map| map.get("id").and_then(|raw| parse_store_id(raw))));

    move || match store_id.get() {
        Some(id) => view! { <StoreProfile id=id /> }.into_view(),
        None => view! {
            <Title text=format!("Loja inválida | {APP_NAME}") />
            <StoreStateView
                title="Loja inválida."
                message="O identificador informado não é um UUID válido."
            />
        }
        .into_view(),
    }
}

#[component]
fn StoreStateView(#[prop(into)] title: String, #[prop(into)] message: String) -> impl IntoView {
    view! {
        <PageStateView eyebrow="Loja" title=title message=message>
            <A href="/" class="button">"Voltar para o início"</A>
            <A href="/contents" class="button secondary">"Ver conteúdos"</A>
        </PageStateView>
    }
}

#[component]
fn StoreProfile(id: String) -> impl IntoView {
    let api = use_site_api();
    let store = create_local_resource(
        move || id.clone(),
        move |id| {
            let api = api.clone();
            async move { api.get_store(&id).await }
        },
    );

    view! {
        <Suspense fallback=|| view! { <LoadingNotice /> }>
            {move || store.get().map(|result| match result {
                Ok(store) => view! { <StoreDetailsView store=store /> }.into_view(),
                Err(err) => view! {
                    <StoreStateView
                        title="Não foi possível abrir essa loja."
                        message=store_error_message(&err)
                    />
                }
                .into_view(),
            })}
        </Suspense>
    }
}

#[component]
fn StoreDetailsView(store: StoreDetails) -> impl IntoView {
    let summary = store.summary();
    let rating = format_rating(store.rating, store.review_count);
    let kind = if store.is_online_store {
        "Loja online"
    } else {
        "Loja física"
    };
    let has_contact = store.has_contact_channel();
    let name = store.name.clone();

    view! {
        <Title text=format!("{} | {APP_NAME}", store.name) />
        <Meta name="description" content=summary />

        <section class="store-hero">
            <span class="eyebrow">"Loja"</span>
            <h1>{store.name.clone()}</h1>
            {store.description.clone().map(|description| view! {
                <p class="store-description">{description}</p>
            })}
            <div class="store-tags">
                {store.badge_label.clone().map(|badge| view! { <span class="store-badge">{badge}</span> })}
                {store
                    .categories
                    .iter()
                    .map(|category| view! { <span class="store-category">{category.clone()}</span> })
                    .collect_view()}
            </div>
            <OpenInAppButton deep_link=store_deep_link(&store.id) class="button">
                "Abrir no app"
            </OpenInAppButton>
        </section>

        {(!store.images.is_empty()).then(|| view! {
            <section class="store-gallery">
                <h2>"Fotos da loja"</h2>
                <div class="store-gallery-grid">
                    {store
                        .images
                        .iter()
                        .map(|image| view! {
                            <img
                                src=image.url.clone()
                                alt=format!("Imagem da loja {name}")
                                loading="lazy"
                            />
                        })
                        .collect_view()}
                </div>
            </section>
        })}

        <section class="store-info-grid">
            <article class="store-info">
                <h2>"Informações"</h2>
                <dl>
                    <InfoRow term="Bairro" value=store.neighborhood.clone() />
                    <InfoRow term="Endereço" value=store.address_line.clone() />
                    <InfoRow term="Horário" value=store.opening_hours.clone() />
                    <InfoRow term="Avaliação" value=Some(rating) />
                    <InfoRow term="Tipo" value=Some(kind.to_string()) />
                </dl>
            </article>

            <article class="store-contact">
                <h2>"Contato e redes"</h2>
                <div class="store-contact-links">
                    {store.website.clone().map(|website| view! {
                        <a class="button secondary" href=website target="_blank" rel="noreferrer noopener">
                            "Site oficial"
                        </a>
                    })}
                    {store.instagram.clone().map(|instagram| view! {
                        <a
                            class="button secondary"
                            href=instagram_href(&instagram)
                            target="_blank"
                            rel="noreferrer noopener"
                        >
                            "Instagram"
                        </a>
                    })}
                    {store.facebook.clone().map(|facebook| view! {
                        <a class="button secondary" href=facebook target="_blank" rel="noreferrer noopener">
                            "Facebook"
                        </a>
                    })}
                    {store.phone.clone().map(|phone| view! {
                        <a class="button secondary" href=phone_href(&phone)>
                            "Ligar: " {phone.clone()}
                        </a>
                    })}
                    {store.whatsapp.clone().map(|whatsapp| view! {
                        <a
                            class="button secondary"
                            href=whatsapp_href(&whatsapp)
                            target="_blank"
                            rel="noreferrer noopener"
                        >
                            "WhatsApp: " {whatsapp.clone()}
                        </a>
                    })}
                    {(!has_contact).then(|| view! {
                        <p class="store-contact-empty">"Nenhum canal de contato disponível no momento."</p>
                    })}
                </div>
            </article>
        </section>
    }
}

#[component]
fn InfoRow(term: &'static str, value: Option<String>) -> impl IntoView {
    value.map(|value| {
        view! {
            <div>
                <dt>{term}</dt>
                <dd>{value}</dd>
            </div>
        }
    })
}
