//! Query string encoding.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Appends `params` to `url` as an `application/x-www-form-urlencoded`
/// query string.
///
/// Returns `url` unchanged when `params` is `None`. The separator is `&`
/// when `url` already has a query component and `?` otherwise. Keys are
/// emitted in sorted order, so the output is deterministic. Bytes outside
/// `[A-Za-z0-9*-._]` are percent-encoded and spaces become `+`.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use brex_axios::clients::build_url_with_params;
///
/// let mut params = BTreeMap::new();
/// params.insert("q".to_string(), "rust lang".to_string());
/// params.insert("page".to_string(), "2".to_string());
///
/// assert_eq!(
///     build_url_with_params("/search", Some(&params)),
///     "/search?page=2&q=rust+lang"
/// );
/// assert_eq!(
///     build_url_with_params("/search?sort=asc", Some(&params)),
///     "/search?sort=asc&page=2&q=rust+lang"
/// );
/// assert_eq!(build_url_with_params("/search", None), "/search");
/// ```
#[must_use]
pub fn build_url_with_params(url: &str, params: Option<&BTreeMap<String, String>>) -> String {
    let Some(params) = params else {
        return url.to_string();
    };

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();

    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_no_params_returns_url_unchanged() {
        assert_eq!(build_url_with_params("/posts?x=1", None), "/posts?x=1");
    }

    #[test]
    fn test_uses_question_mark_without_existing_query() {
        let p = params(&[("limit", "10")]);
        assert_eq!(build_url_with_params("/posts", Some(&p)), "/posts?limit=10");
    }

    #[test]
    fn test_uses_ampersand_with_existing_query() {
        let p = params(&[("limit", "10")]);
        assert_eq!(
            build_url_with_params("/posts?page=1", Some(&p)),
            "/posts?page=1&limit=10"
        );
    }

    #[test]
    fn test_encodes_reserved_characters() {
        let p = params(&[("filter", "a&b=c"), ("name", "José Díaz")]);
        assert_eq!(
            build_url_with_params("/u", Some(&p)),
            "/u?filter=a%26b%3Dc&name=Jos%C3%A9+D%C3%ADaz"
        );
    }

    #[test]
    fn test_tilde_and_star_follow_form_encoding() {
        let p = params(&[("q", "a~b*c")]);
        assert_eq!(build_url_with_params("/x", Some(&p)), "/x?q=a%7Eb*c");
    }

    #[test]
    fn test_output_is_deterministic() {
        let p = params(&[("b", "2"), ("a", "1"), ("c", "3")]);
        let first = build_url_with_params("/x", Some(&p));
        let second = build_url_with_params("/x", Some(&p));
        assert_eq!(first, second);
        assert_eq!(first, "/x?a=1&b=2&c=3");
    }

    #[test]
    fn test_empty_params_still_appends_separator() {
        let p = BTreeMap::new();
        assert_eq!(build_url_with_params("/x", Some(&p)), "/x?");
    }
}
