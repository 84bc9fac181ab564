//! Query string parsing

/// Value of the first `name` parameter in a raw query string
///
/// Values are form-decoded: percent escapes are resolved and `+` becomes a
/// space.
pub fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param_present() {
        assert_eq!(
            query_param(Some("loc=test/fixture/script.js:2:12:5:6"), "loc"),
            Some("test/fixture/script.js:2:12:5:6".to_string())
        );
        assert_eq!(
            query_param(Some("a=1&loc=x.js&b=2"), "loc"),
            Some("x.js".to_string())
        );
    }

    #[test]
    fn test_query_param_decoding() {
        assert_eq!(
            query_param(Some("loc=dir%2Fmy+file.js%3A3"), "loc"),
            Some("dir/my file.js:3".to_string())
        );
    }

    #[test]
    fn test_query_param_first_wins() {
        assert_eq!(
            query_param(Some("loc=first.js&loc=second.js"), "loc"),
            Some("first.js".to_string())
        );
    }

    #[test]
    fn test_query_param_missing() {
        assert_eq!(query_param(None, "loc"), None);
        assert_eq!(query_param(Some("locx=a.js"), "loc"), None);
        assert_eq!(query_param(Some("loc="), "loc"), Some(String::new()));
    }
}
