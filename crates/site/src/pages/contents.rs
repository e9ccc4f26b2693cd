use leptos::*;
use leptos_router::*;
use site_core::{
    api::list_error_message,
    contents::{
        build_contents_href, build_legacy_content_redirect_path, parse_contents_query,
        parse_query_string, ContentSort, ContentsHrefParams,
    },
};
use site_runtime::{use_site_api, ContentsListingAd};

use super::{ContentPreviewCard, LoadingNotice, NotFoundPage};

#[component]
pub(crate) fn ContentsPage() -> impl IntoView {
    let location = use_location();
    let api = use_site_api();
    let query =
        create_memo(move |_| parse_contents_query(&parse_query_string(&location.search.get())));
    let page = create_local_resource(
        move || query.get(),
        move |query| {
            let api = api.clone();
            async move { api.list_contents(&query).await }
        },
    );

    let page_href = move |delta: i64| {
        query.with(|query| {
            build_contents_href(&ContentsHrefParams {
                page: Some(i64::from(query.page) + delta),
                ..ContentsHrefParams::from(query)
            })
        })
    };
    let sort_href = move |sort: ContentSort| {
        query.with(|query| {
            build_contents_href(&ContentsHrefParams {
                page: Some(0),
                sort: Some(sort),
                ..ContentsHrefParams::from(query)
            })
        })
    };

    view! {
        <section class="contents-page">
            <h1>"Conteúdos"</h1>
            <form method="get" action="/contents" class="contents-search">
                <input
                    type="search"
                    name="q"
                    placeholder="Buscar conteúdos"
                    prop:value=move || query.with(|query| query.q.clone())
                />
                <button type="submit">"Buscar"</button>
            </form>
            <nav class="contents-sort">
                <A href=move || sort_href(ContentSort::Newest)>"Mais recentes"</A>
                <A href=move || sort_href(ContentSort::Oldest)>"Mais antigos"</A>
            </nav>

            <Suspense fallback=|| view! { <LoadingNotice /> }>
                {move || page.get().map(|result| match result {
                    Ok(page) => {
                        let item_count = page.items.len();
                        let has_next = page.has_next;
                        view! {
                            <Show
                                when=move || { item_count > 0 }
                                fallback=|| view! {
                                    <p class="contents-empty">"Nenhum conteúdo encontrado."</p>
                                }
                            >
                                <div class="content-grid">
                                    {page
                                        .items
                                        .clone()
                                        .into_iter()
                                        .map(|content| view! { <ContentPreviewCard content=content /> })
                                        .collect_view()}
                                </div>
                            </Show>
                            <ContentsListingAd has_error=false item_count=item_count class="ad-card" />
                            <nav class="pagination">
                                <Show when=move || query.with(|query| query.page > 0)>
                                    <A href=move || page_href(-1)>"Anterior"</A>
                                </Show>
                                <Show when=move || has_next>
                                    <A href=move || page_href(1)>"Próxima"</A>
                                </Show>
                            </nav>
                        }
                        .into_view()
                    }
                    Err(err) => view! {
                        <section class="contents-error">
                            <h2>"Não foi possível carregar os conteúdos."</h2>
                            <p>{list_error_message(&err)}</p>
                        </section>
                        <ContentsListingAd has_error=true item_count=0 />
                    }
                    .into_view(),
                })}
            </Suspense>
        </section>
    }
}

/// Old `/contents/{id}` detail URLs move to `/content/{id}` with their query intact.
#[component]
pub(crate) fn LegacyContentRedirect() -> impl IntoView {
    let params = use_params_map();
    let location = use_location();
    let target = params
        .with_untracked(|map| map.get("id").cloned())
        .and_then(|id| {
            build_legacy_content_redirect_path(
                &id,
                &parse_query_string(&location.search.get_untracked()),
            )
        });

    match target {
        Some(path) => view! {
            <Redirect
                path=path
                options=NavigateOptions {
                    replace: true,
                    ..Default::default()
                }
            />
        }
        .into_view(),
        None => view! { <NotFoundPage /> }.into_view(),
    }
}
