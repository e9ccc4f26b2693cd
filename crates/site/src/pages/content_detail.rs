use leptos::*;
use leptos_router::*;
use site_core::{
    api::{comments_error_message, content_error_message},
    contents::{
        build_comments_href, format_date_time, parse_comments_page, parse_content_id,
        parse_query_string, GuideContent, GuideContentComment, PageResponse,
    },
    urls::content_deep_link,
    SiteApiError,
};
use site_runtime::{use_site_api, AutoOpenInApp, ContentDetailAd, OpenInAppButton};

use super::{ContentPreviewCard, LoadingNotice, PageStateView};

const ANONYMOUS_COMMENTER: &str = "Usuário";

#[component]
pub(crate) fn ContentDetailPage() -> impl IntoView {
    let params = use_params_map();
    let location = use_location();
    let content_id = create_memo(move |_| {
        params.with(|map| map.get("id").and_then(|raw| parse_content_id(raw)))
    });
    let comments_page =
        create_memo(move |_| parse_comments_page(&parse_query_string(&location.search.get())));

    let initial_id = params.with_untracked(|map| map.get("id").cloned().unwrap_or_default());

    view! {
        <AutoOpenInApp deep_link=content_deep_link(&initial_id) />
        {move || match content_id.get() {
            Some(id) => view! { <ContentDetail id=id comments_page=comments_page /> }.into_view(),
            None => view! {
                <PageStateView
                    eyebrow="Conteúdo"
                    title="Conteúdo inválido."
                    message="O identificador informado não é numérico."
                >
                    <A href="/contents" class="button">"Voltar para conteúdos"</A>
                </PageStateView>
            }
            .into_view(),
        }}
    }
}

#[component]
fn ContentDetail(id: u64, comments_page: Memo<u32>) -> impl IntoView {
    let api = use_site_api();
    let content = {
        let api = api.clone();
        create_local_resource(
            move || id,
            move |id| {
                let api = api.clone();
                async move { api.get_content(id).await }
            },
        )
    };
    let deep_link = content_deep_link(&id.to_string());

    view! {
        <Suspense fallback=|| view! { <LoadingNotice /> }>
            {
                let deep_link = deep_link.clone();
                move || content.get().map(|result| match result {
                    Ok(content) => view! {
                        <ContentArticle content=content deep_link=deep_link.clone() />
                        <CommentsSection content_id=id page=comments_page />
                    }
                    .into_view(),
                    Err(err) => {
                        let deep_link = deep_link.clone();
                        view! {
                            <PageStateView
                                eyebrow="Conteúdo"
                                title="Não foi possível abrir este conteúdo."
                                message=content_error_message(&err)
                            >
                                <A href="/contents" class="button">"Voltar para conteúdos"</A>
                                <OpenInAppButton deep_link=deep_link class="button secondary">
                                    "Abrir no app"
                                </OpenInAppButton>
                            </PageStateView>
                        }
                        .into_view()
                    }
                })
            }
        </Suspense>
    }
}

#[component]
fn ContentArticle(content: GuideContent, #[prop(into)] deep_link: String) -> impl IntoView {
    let api = use_site_api();
    let current = content.clone();
    let current_id = content.id;
    let related = create_local_resource(
        move || current_id,
        move |_| {
            let (api, current) = (api.clone(), current.clone());
            async move { api.related_contents(&current).await }
        },
    );
    let store_name = if content.thrift_store_name.trim().is_empty() {
        "Comunidade".to_string()
    } else {
        content.thrift_store_name.clone()
    };

    view! {
        <article class="content-detail">
            <span class="eyebrow">"Conteúdo"</span>
            <h1>{content.title.clone()}</h1>
            <p class="content-description">{content.description.clone()}</p>
            <div class="hero-actions">
                <OpenInAppButton deep_link=deep_link class="button">
                    "Abrir no app"
                </OpenInAppButton>
                <A href="/contents" class="button secondary">"Ver mais conteúdos"</A>
            </div>
            {(!content.image_url.is_empty()).then(|| view! {
                <img
                    class="content-detail-image"
                    src=content.image_url.clone()
                    alt=format!("Imagem do conteúdo {}", content.title)
                />
            })}
            <div class="content-detail-meta">
                <p><strong>"Loja: "</strong>{store_name}</p>
                <p><strong>"Publicado em: "</strong>{format_date_time(&content.created_at)}</p>
                <p>
                    <strong>"Curtidas: "</strong>{content.like_count}
                    " • "
                    <strong>"Comentários: "</strong>{content.comment_count}
                </p>
            </div>
            <ContentDetailAd
                title=content.title.clone()
                description=content.description.clone()
                class="ad-card"
            />
        </article>
        <Suspense fallback=|| ()>
            {move || related.get().filter(|items| !items.is_empty()).map(|items| view! {
                <section class="related-contents">
                    <h2>"Conteúdos relacionados"</h2>
                    <p>"Continue explorando temas parecidos para aprofundar seu próximo garimpo."</p>
                    <div class="content-grid">
                        {items
                            .into_iter()
                            .map(|item| view! { <ContentPreviewCard content=item /> })
                            .collect_view()}
                    </div>
                </section>
            })}
        </Suspense>
    }
}

#[component]
fn CommentsSection(content_id: u64, page: Memo<u32>) -> impl IntoView {
    let api = use_site_api();
    let comments = create_local_resource(
        move || page.get(),
        move |page| {
            let api = api.clone();
            async move { api.list_comments(content_id, page).await }
        },
    );

    view! {
        <section class="comments-section">
            <h2>"Comentários"</h2>
            <Suspense fallback=|| view! { <LoadingNotice /> }>
                {move || comments.get().map(|result| comments_view(content_id, result))}
            </Suspense>
        </section>
    }
}

fn comments_view(
    content_id: u64,
    result: Result<PageResponse<GuideContentComment>, SiteApiError>,
) -> View {
    let page = match result {
        Ok(page) => page,
        Err(err) => {
            return view! { <p class="form-error">{comments_error_message(&err)}</p> }.into_view();
        }
    };
    let previous = page.page.checked_sub(1);
    let next = page.has_next.then(|| page.page.saturating_add(1));
    let label = format!("Página {}", page.page.saturating_add(1));

    view! {
        {if page.items.is_empty() {
            view! { <p>"Nenhum comentário ainda."</p> }.into_view()
        } else {
            view! {
                <div class="comments-list">
                    {page
                        .items
                        .into_iter()
                        .map(|comment| view! { <CommentItem comment=comment /> })
                        .collect_view()}
                </div>
            }
            .into_view()
        }}
        <nav class="contents-pagination" aria-label="Paginação de comentários">
            {match previous {
                Some(target) => view! {
                    <A href=build_comments_href(content_id, target) class="button secondary">
                        "Comentários anteriores"
                    </A>
                }
                .into_view(),
                None => view! {
                    <span class="button secondary button-disabled" aria-disabled="true">
                        "Comentários anteriores"
                    </span>
                }
                .into_view(),
            }}
            <p class="contents-pagination-label">{label}</p>
            {match next {
                Some(target) => view! {
                    <A href=build_comments_href(content_id, target) class="button">
                        "Próximos comentários"
                    </A>
                }
                .into_view(),
                None => view! {
                    <span class="button button-disabled" aria-disabled="true">
                        "Próximos comentários"
                    </span>
                }
                .into_view(),
            }}
        </nav>
    }
    .into_view()
}

#[component]
fn CommentItem(comment: GuideContentComment) -> impl IntoView {
    let author = comment
        .user_display_name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| ANONYMOUS_COMMENTER.to_string());

    view! {
        <article class="comment-item">
            <header class="comment-header">
                <strong>{author}</strong>
                <span>{format_date_time(&comment.created_at)}</span>
            </header>
            <p>{comment.body.clone()}</p>
            {comment.edited.then(|| view! { <small>"Comentário editado"</small> })}
        </article>
    }
}
