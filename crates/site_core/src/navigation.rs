//! Deep-linkable home page sections (`/?section=destaques`, `/#conteudos`).

use url::form_urlencoded;

use crate::contents::query::{first_param, parse_query_string};

/// Query parameter naming the section to scroll to.
pub const HOME_SECTION_QUERY_PARAM: &str = "section";

/// Anchored sections of the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeSection {
    /// Latest guide contents.
    Conteudos,
    /// Featured thrift stores.
    Destaques,
}

impl HomeSection {
    /// Element id and query token.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Conteudos => "conteudos",
            Self::Destaques => "destaques",
        }
    }
}

/// Parses a section token, ignoring case and surrounding whitespace.
pub fn parse_home_section(value: Option<&str>) -> Option<HomeSection> {
    match value?.trim().to_lowercase().as_str() {
        "conteudos" => Some(HomeSection::Conteudos),
        "destaques" => Some(HomeSection::Destaques),
        _ => None,
    }
}

/// Home URL that scrolls to `section` after load.
pub fn build_home_section_path(section: HomeSection) -> String {
    format!("/?{HOME_SECTION_QUERY_PARAM}={}", section.id())
}

/// Section requested by the current location; the query parameter wins over the hash.
pub fn resolve_home_section_intent(search: &str, hash: &str) -> Option<HomeSection> {
    let params = parse_query_string(search);
    parse_home_section(first_param(&params, HOME_SECTION_QUERY_PARAM))
        .or_else(|| parse_home_section(Some(hash.strip_prefix('#').unwrap_or(hash))))
}

/// `search` without the section parameter, as `?…` or an empty string.
pub fn remove_home_section_intent_query_param(search: &str) -> String {
    let params = parse_query_string(search);
    let remaining = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(
            params
                .iter()
                .filter(|(key, _)| key != HOME_SECTION_QUERY_PARAM),
        )
        .finish();
    if remaining.is_empty() {
        String::new()
    } else {
        format!("?{remaining}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_sections_loosely() {
        assert_eq!(parse_home_section(Some(" Destaques ")), Some(HomeSection::Destaques));
        assert_eq!(parse_home_section(Some("conteudos")), Some(HomeSection::Conteudos));
        assert_eq!(parse_home_section(Some("lojas")), None);
        assert_eq!(parse_home_section(None), None);
        assert_eq!(build_home_section_path(HomeSection::Destaques), "/?section=destaques");
    }

    #[test]
    fn query_intent_beats_hash() {
        assert_eq!(
            resolve_home_section_intent("?section=destaques", "#conteudos"),
            Some(HomeSection::Destaques)
        );
        assert_eq!(
            resolve_home_section_intent("?section=nope", "#conteudos"),
            Some(HomeSection::Conteudos)
        );
        assert_eq!(resolve_home_section_intent("", ""), None);
    }

    #[test]
    fn removing_intent_keeps_other_params() {
        assert_eq!(
            remove_home_section_intent_query_param("?section=destaques&utm_source=app"),
            "?utm_source=app"
        );
        assert_eq!(remove_home_section_intent_query_param("?section=destaques"), "");
        assert_eq!(remove_home_section_intent_query_param(""), "");
    }
}
