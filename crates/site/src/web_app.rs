use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use site_core::{
    navigation::{build_home_section_path, HomeSection},
    urls::APP_NAME,
};
use site_runtime::{SiteRuntimeProvider, ThemeToggleButton};

use crate::pages::{
    ContentDetailPage, ContentsPage, HomePage, LegacyContentRedirect, NotFoundPage,
    ResetPasswordPage, StorePage,
};

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME />
        <Meta name="description" content="Descubra brechós e conteúdos de moda circular perto de você." />

        <SiteRuntimeProvider host_services=platform_host_web::build_host_services()>
            <Router>
                <SiteHeader />
                <main class="site-root">
                    <Routes>
                        <Route path="" view=HomePage />
                        <Route path="/contents" view=ContentsPage />
                        <Route path="/contents/:id" view=LegacyContentRedirect />
                        <Route path="/content/:id" view=ContentDetailPage />
                        <Route path="/store/:id" view=StorePage />
                        <Route path="/reset-password/:token" view=ResetPasswordPage />
                        <Route path="/*any" view=NotFoundPage />
                    </Routes>
                </main>
            </Router>
        </SiteRuntimeProvider>
    }
}

#[component]
fn SiteHeader() -> impl IntoView {
    view! {
        <header class="site-header" data-site-header="">
            <A href="/" class="site-brand">{APP_NAME}</A>
            <nav class="site-nav">
                <A href=build_home_section_path(HomeSection::Conteudos)>"Conteúdos"</A>
                <A href=build_home_section_path(HomeSection::Destaques)>"Destaques"</A>
                <A href="/contents">"Todos os conteúdos"</A>
            </nav>
            <ThemeToggleButton />
        </header>
    }
}
