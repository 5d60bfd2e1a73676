//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Join an endpoint path onto the API base URL.
///
/// Keeps any query string the endpoint already carries.
pub fn join_endpoint(base_url: &str, endpoint: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = endpoint.trim_start_matches('/');
    format!("{base}/{path}")
}

/// Append query parameters to a URL, preserving existing ones.
pub fn with_params(url: &str, params: &[(&str, String)]) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            {
                let mut pairs = parsed.query_pairs_mut();
                for (key, value) in params {
                    pairs.append_pair(key, value);
                }
            }
            parsed.to_string()
        }
        Err(_) => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_endpoint() {
        assert_eq!(
            join_endpoint("http://localhost:5000/", "/api/galleries"),
            "http://localhost:5000/api/galleries"
        );
        assert_eq!(
            join_endpoint("http://localhost:5000", "api/galleries?category=modern"),
            "http://localhost:5000/api/galleries?category=modern"
        );
    }

    #[test]
    fn test_with_params_preserves_existing_query() {
        let url = with_params(
            "http://localhost:5000/api/galleries?category=modern",
            &[("limit", "100".to_string()), ("page", "2".to_string())],
        );
        assert_eq!(
            url,
            "http://localhost:5000/api/galleries?category=modern&limit=100&page=2"
        );
    }

    #[test]
    fn test_with_params_on_unparseable_url() {
        assert_eq!(with_params("not a url", &[]), "not a url");
    }
}
