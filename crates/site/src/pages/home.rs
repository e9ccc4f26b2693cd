use leptos::*;
use leptos_router::*;
use site_core::{
    contents::{
        build_contents_href, parse_contents_query, parse_query_string, ContentsHrefParams,
    },
    navigation::{
        remove_home_section_intent_query_param, resolve_home_section_intent, HomeSection,
        HOME_SECTION_QUERY_PARAM,
    },
    stores::{store_page_path, FeaturedStore},
    urls::{android_store_url, ios_store_url, APP_NAME},
};
use site_runtime::{use_site_api, LandingContentsAd};

use super::{ContentPreviewCard, LoadingNotice};

const HOME_PREVIEW_COUNT: u32 = 6;

fn scroll_to_section(section: HomeSection) {
    if let Some(target) = document().get_element_by_id(section.id()) {
        target.scroll_into_view();
    }
}

/// Scrolls to the section named by `?section=` or the hash, then drops the query parameter.
fn install_section_intent_handler() {
    let location = use_location();
    let navigate = use_navigate();

    create_effect(move |_| {
        let search = location.search.get();
        let hash = location.hash.get();
        let Some(section) = resolve_home_section_intent(&search, &hash) else {
            return;
        };
        request_animation_frame(move || scroll_to_section(section));

        let has_param = parse_query_string(&search)
            .iter()
            .any(|(key, _)| key == HOME_SECTION_QUERY_PARAM);
        if has_param {
            let path = format!(
                "{}{}",
                location.pathname.get_untracked(),
                remove_home_section_intent_query_param(&search)
            );
            navigate(
                &path,
                NavigateOptions {
                    replace: true,
                    scroll: false,
                    ..Default::default()
                },
            );
        }
    });
}

#[component]
pub(crate) fn HomePage() -> impl IntoView {
    install_section_intent_handler();

    let api = use_site_api();
    let latest = {
        let api = api.clone();
        create_local_resource(
            || (),
            move |_| {
                let api = api.clone();
                async move {
                    let mut query = parse_contents_query(&[]);
                    query.page_size = HOME_PREVIEW_COUNT;
                    api.list_contents(&query).await
                }
            },
        )
    };
    let featured = create_local_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { api.list_featured_stores().await }
        },
    );

    view! {
        <section class="hero">
            <h1>{APP_NAME}</h1>
            <p>"Encontre brechós, garimpe peças únicas e acompanhe as novidades das lojas."</p>
            <div class="store-badges">
                <a href=android_store_url() rel="noopener">"Disponível no Google Play"</a>
                <a href=ios_store_url() rel="noopener">"Baixar na App Store"</a>
            </div>
        </section>

        <section id=HomeSection::Conteudos.id() class="home-section">
            <h2>"Conteúdos recentes"</h2>
            <Suspense fallback=|| view! { <LoadingNotice /> }>
                {move || latest.get().map(|result| match result {
                    Ok(page) if !page.items.is_empty() => view! {
                        <div class="content-grid">
                            {page
                                .items
                                .into_iter()
                                .map(|content| view! { <ContentPreviewCard content=content /> })
                                .collect_view()}
                        </div>
                    }
                    .into_view(),
                    Ok(_) => view! {
                        <p class="contents-empty">"Ainda não há conteúdos publicados."</p>
                    }
                    .into_view(),
                    Err(err) => {
                        logging::debug_warn!("home contents: {err}");
                        view! {
                            <p class="form-error">
                                "Não foi possível carregar os conteúdos agora. Acesse a listagem completa para tentar novamente."
                            </p>
                        }
                        .into_view()
                    }
                })}
            </Suspense>
            <A href=build_contents_href(&ContentsHrefParams::default())>"Ver todos"</A>
            <LandingContentsAd class="ad-card" />
        </section>

        <section id=HomeSection::Destaques.id() class="home-section featured-stores">
            <p class="eyebrow">"Brechós em destaque"</p>
            <h2>"Curadoria especial da semana"</h2>
            <Suspense fallback=|| view! { <LoadingNotice /> }>
                {move || featured.get().map(|result| {
                    let stores = result.unwrap_or_else(|err| {
                        logging::debug_warn!("featured stores: {err}");
                        Vec::new()
                    });
                    if stores.is_empty() {
                        view! {
                            <div class="featured-stores-empty">
                                "Não conseguimos carregar os brechós em destaque agora."
                            </div>
                        }
                        .into_view()
                    } else {
                        view! {
                            <div class="featured-stores-row">
                                {stores
                                    .into_iter()
                                    .map(|store| view! { <FeaturedStoreCard store=store /> })
                                    .collect_view()}
                            </div>
                        }
                        .into_view()
                    }
                })}
            </Suspense>
        </section>
    }
}

#[component]
fn FeaturedStoreCard(store: FeaturedStore) -> impl IntoView {
    view! {
        <article class="featured-store-card">
            <A href=store_page_path(&store.id)>
                <img
                    src=store.cover_image_url.clone()
                    alt=format!("Capa do brechó {}", store.name)
                    loading="lazy"
                />
                <h3>{store.name.clone()}</h3>
            </A>
        </article>
    }
}
