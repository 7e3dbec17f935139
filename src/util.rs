use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ResponseError;
use crate::request::GetOptions;

pub(crate) const API_PREFIX: [&str; 3] = ["wp-json", "wp", "v2"];
pub(crate) const API_TOKEN_HEADER: &str = "api-token";

pub(crate) fn user_agent() -> String {
    format!("rooftop-rs/{}", env!("CARGO_PKG_VERSION"))
}

/// `<base>/wp-json/wp/v2/<resource>?<params>`.
///
/// On failure the error carries the best textual form of the URL we could make.
pub(crate) fn resource_url(
    base_url: &str,
    resource: &str,
    options: &GetOptions,
) -> Result<Url, ResponseError> {
    let attempted = || format!("{}/{}/{}", base_url, API_PREFIX.join("/"), resource);

    let mut url =
        Url::parse(base_url).map_err(|e| ResponseError::invalid_url(e, &attempted()))?;

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| ResponseError::invalid_url("URL cannot be a base", &attempted()))?;
        segments.pop_if_empty();
        segments.extend(API_PREFIX);
        segments.push(resource);
    }

    if !options.params().is_empty() {
        let mut query = url.query_pairs_mut();
        for (key, value) in options.params() {
            query.append_pair(key, &value.to_string());
        }
    }

    Ok(url)
}

/// Maps a finished response onto the `get` contract.
pub(crate) fn decode_body<T: DeserializeOwned>(
    status: StatusCode,
    url: &str,
    text: &str,
) -> Result<T, ResponseError> {
    if !status.is_success() {
        return Err(ResponseError::from_status(status, url, text));
    }

    serde_json::from_str::<T>(text).map_err(|e| ResponseError::undecodable(status, &e, url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use test_case::test_case;

    #[test_case("http://rooftop-seeds.rooftopcms.io", "http://rooftop-seeds.rooftopcms.io/wp-json/wp/v2/posts" ; "http")]
    #[test_case("https://site.io", "https://site.io/wp-json/wp/v2/posts" ; "https")]
    #[test_case("https://site.io/blog", "https://site.io/blog/wp-json/wp/v2/posts" ; "subpath")]
    #[test_case("https://site.io:8443", "https://site.io:8443/wp-json/wp/v2/posts" ; "port")]
    fn builds_resource_url(base: &str, expected: &str) {
        let url = resource_url(base, "posts", &GetOptions::new()).unwrap();
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn appends_params_in_order() {
        let opts = GetOptions::new()
            .param("per_page", 2)
            .param("order", "asc")
            .param("orderby", "id");
        let url = resource_url("https://site.io", "posts", &opts).unwrap();
        assert_eq!(
            url.as_str(),
            "https://site.io/wp-json/wp/v2/posts?per_page=2&order=asc&orderby=id"
        );
    }

    #[test]
    fn encodes_params_and_resource() {
        let opts = GetOptions::new().param("search", "a&b c");
        let url = resource_url("https://site.io", "foo bars", &opts).unwrap();
        assert_eq!(
            url.as_str(),
            "https://site.io/wp-json/wp/v2/foo%20bars?search=a%26b+c"
        );
    }

    #[test]
    fn unparseable_base_reports_attempted_url() {
        let err = resource_url("https://exa mple.com", "posts", &GetOptions::new()).unwrap_err();
        assert!(err.is_transport());
        assert!(err.error.starts_with("invalid request URL"));
        assert_eq!(err.url, "https://exa mple.com/wp-json/wp/v2/posts");
    }

    #[test]
    fn decode_success() {
        let v: Value = decode_body(StatusCode::OK, "u", r#"[{"id":1}]"#).unwrap();
        assert_eq!(v[0]["id"], 1);
    }

    #[test]
    fn decode_non_json_success_keeps_status() {
        let err = decode_body::<Value>(StatusCode::OK, "u", "<html>").unwrap_err();
        assert_eq!(err.status.code, Some(200));
        assert!(err.error.starts_with("failed to parse response JSON"));
    }

    #[test]
    fn decode_error_status() {
        let err = decode_body::<Value>(StatusCode::NOT_FOUND, "u", "").unwrap_err();
        assert_eq!(err.status.code, Some(404));
        assert_eq!(err.url, "u");
    }
}
