//! Reader-facing explanations for failed API calls, per page.

use super::client::SiteApiError;

fn backend_or(error: &SiteApiError, fallback: &'static str) -> String {
    if error.message.trim().is_empty() {
        fallback.to_string()
    } else {
        error.message.clone()
    }
}

/// Message for a content detail that failed to load.
pub fn content_error_message(error: &SiteApiError) -> String {
    match error.status {
        404 => "Este conteúdo não foi encontrado. Ele pode ter sido removido.".to_string(),
        400 => "O identificador informado é inválido.".to_string(),
        401 => "A API deste conteúdo ainda está protegida (401). O backend precisa liberar leitura \
                pública para o site."
            .to_string(),
        _ => backend_or(error, "Não foi possível carregar o conteúdo."),
    }
}

/// Message for a comments page that failed to load.
pub fn comments_error_message(error: &SiteApiError) -> String {
    match error.status {
        400 => "A paginação de comentários está inválida.".to_string(),
        401 => "A API de comentários ainda está protegida (401).".to_string(),
        _ => backend_or(error, "Não foi possível carregar os comentários."),
    }
}

/// Message for a contents listing that failed to load.
pub fn list_error_message(error: &SiteApiError) -> String {
    match error.status {
        400 => "Os filtros informados são inválidos. Revise página, busca e paginação.".to_string(),
        401 => "A API de conteúdos ainda está protegida (401). O backend precisa liberar leitura \
                pública para o site."
            .to_string(),
        _ => backend_or(error, "Ocorreu um erro ao carregar os conteúdos."),
    }
}

/// Message for a store profile that failed to load.
pub fn store_error_message(error: &SiteApiError) -> String {
    match error.status {
        404 => "Essa loja não foi encontrada. Ela pode ter sido removida.".to_string(),
        400 => "O identificador informado é inválido.".to_string(),
        _ => backend_or(error, "Não foi possível carregar os detalhes da loja."),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn known_statuses_get_page_specific_text() {
        let missing = SiteApiError::new(404, "Not Found");
        assert_eq!(
            content_error_message(&missing),
            "Este conteúdo não foi encontrado. Ele pode ter sido removido."
        );
        assert_eq!(
            store_error_message(&missing),
            "Essa loja não foi encontrada. Ela pode ter sido removida."
        );
        assert_eq!(
            comments_error_message(&SiteApiError::new(400, "bad")),
            "A paginação de comentários está inválida."
        );
        assert!(list_error_message(&SiteApiError::new(401, "")).contains("(401)"));
    }

    #[test]
    fn other_statuses_prefer_backend_message() {
        assert_eq!(
            list_error_message(&SiteApiError::new(500, "Banco indisponível")),
            "Banco indisponível"
        );
        assert_eq!(
            comments_error_message(&SiteApiError::new(502, "  ")),
            "Não foi possível carregar os comentários."
        );
        assert_eq!(
            comments_error_message(&SiteApiError::new(404, "Sem comentários")),
            "Sem comentários"
        );
    }
}
