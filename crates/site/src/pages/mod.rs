//! Routed pages.

mod content_detail;
mod contents;
mod home;
mod reset_password;
mod store;

use leptos::*;
use leptos_router::*;
use site_core::contents::{format_date_short, GuideContent};

pub(crate) use content_detail::ContentDetailPage;
pub(crate) use contents::{ContentsPage, LegacyContentRedirect};
pub(crate) use home::HomePage;
pub(crate) use reset_password::ResetPasswordPage;
pub(crate) use store::StorePage;

#[component]
fn ContentPreviewCard(content: GuideContent) -> impl IntoView {
    view! {
        <article class="content-card">
            <a href=format!("/content/{}", content.id)>
                <img src=content.image_url.clone() alt=content.title.clone() loading="lazy" />
                <h3>{content.title.clone()}</h3>
            </a>
            <p class="content-card-meta">
                {content.thrift_store_name.clone()} " · " {format_date_short(&content.created_at)}
            </p>
        </article>
    }
}

/// Full-width notice for a page that cannot show its subject.
#[component]
fn PageStateView(
    /// Small caps label above the title.
    #[prop(into)]
    eyebrow: String,
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <section class="page-state">
            <span class="eyebrow">{eyebrow}</span>
            <h1>{title}</h1>
            <p>{message}</p>
            <div class="page-state-actions">
                {children.map(|children| children())}
            </div>
        </section>
    }
}

#[component]
fn LoadingNotice() -> impl IntoView {
    view! { <p class="loading" aria-live="polite">"Carregando…"</p> }
}

#[component]
pub(crate) fn NotFoundPage() -> impl IntoView {
    view! {
        <PageStateView eyebrow="404" title="Página não encontrada" message="O endereço acessado não existe ou foi movido.">
            <A href="/" class="button">"Voltar para o início"</A>
        </PageStateView>
    }
}
