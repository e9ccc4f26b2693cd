use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use site_core::{
    contents::safe_decode_path_segment,
    urls::{password_reset_deep_link, APP_NAME, WEB_BASE_URL},
    validation::{password_rules_hint, validate_password_reset, PASSWORD_RULES},
};
use site_runtime::OpenInAppButton;

use super::PageStateView;

/// Host shown in the footer, without the scheme.
fn pretty_base_url() -> &'static str {
    WEB_BASE_URL
        .strip_prefix("https://")
        .or_else(|| WEB_BASE_URL.strip_prefix("http://"))
        .unwrap_or(WEB_BASE_URL)
}

#[component]
pub(crate) fn ResetPasswordPage() -> impl IntoView {
    let params = use_params_map();
    let token = params.with_untracked(|map| {
        map.get("token")
            .and_then(|raw| safe_decode_path_segment(raw))
            .filter(|token| !token.trim().is_empty())
    });

    view! {
        <Title text=format!("Redefinir senha | {APP_NAME}") />
        <Meta name="robots" content="noindex" />
        {match token {
            Some(token) => view! {
                <section class="hero">
                    <span class="eyebrow">"Redefinir senha"</span>
                    <h1>"Crie uma nova senha para sua conta."</h1>
                    <p>"Ela precisa ter " {password_rules_hint()} "."</p>
                </section>
                <ResetPasswordForm token=token />
            }
            .into_view(),
            None => view! {
                <PageStateView
                    eyebrow="Redefinir senha"
                    title="Link inválido."
                    message="Este link de redefinição está incompleto. Solicite um novo pelo app."
                >
                    <A href="/" class="button">"Voltar para o início"</A>
                </PageStateView>
            }
            .into_view(),
        }}
        <footer class="footer">{APP_NAME} " • " {pretty_base_url()}</footer>
    }
}

#[component]
fn ResetPasswordForm(token: String) -> impl IntoView {
    let password = create_rw_signal(String::new());
    let confirmation = create_rw_signal(String::new());
    let error = create_rw_signal(None::<&'static str>);
    let accepted = create_rw_signal(false);
    let deep_link = password_reset_deep_link(&token);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let checked = password.with(|password| {
            confirmation.with(|confirmation| validate_password_reset(password, confirmation))
        });
        match checked {
            Ok(()) => {
                error.set(None);
                accepted.set(true);
            }
            Err(message) => {
                error.set(Some(message));
                accepted.set(false);
            }
        }
    };

    view! {
        <form class="reset-password-form" on:submit=on_submit>
            <label>
                "Nova senha"
                <input
                    type="password"
                    autocomplete="new-password"
                    prop:value=password
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
            </label>
            <ul class="password-rules" aria-live="polite">
                {PASSWORD_RULES
                    .iter()
                    .map(|rule| {
                        let rule = *rule;
                        let met = move || password.with(|password| rule.is_satisfied_by(password));
                        view! {
                            <li class:rule-met=met data-rule=rule.id>
                                {rule.label}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <label>
                "Confirmar senha"
                <input
                    type="password"
                    autocomplete="new-password"
                    prop:value=confirmation
                    on:input=move |ev| confirmation.set(event_target_value(&ev))
                />
            </label>
            {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
            <button type="submit" class="button">"Salvar nova senha"</button>
        </form>
        <Show when=move || accepted.get()>
            <section class="reset-password-next">
                <p>"Senha válida. Abra o app do Guia Brechó para concluir a redefinição."</p>
                <OpenInAppButton deep_link=deep_link.clone() class="button">
                    "Concluir no app"
                </OpenInAppButton>
            </section>
        </Show>
    }
}
