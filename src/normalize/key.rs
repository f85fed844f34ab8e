use once_cell::sync::Lazy;
use regex::Regex;

/// A lowercase letter or digit directly followed by an uppercase letter.
///
/// Matches never overlap, so an uppercase run (`URL`) is split once, at the
/// transition into it, and never inside it.
static CAMEL_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-z0-9])([A-Z])").expect("camel-case boundary pattern is valid")
});

/// Convert an external lower-camel-case key to its internal snake-case name.
///
/// - `tableHeader` → `table_header`
/// - `id` → `id` (no uppercase, unchanged)
/// - `mediaTypeURL` → `media_type_url`
/// - `HTTPServer` → `httpserver` (no lowercase/digit before the run)
pub fn camel_to_snake_case(key: &str) -> String {
    if !key.chars().any(|c| c.is_ascii_uppercase()) {
        return key.to_string();
    }
    CAMEL_BOUNDARY
        .replace_all(key, "${1}_${2}")
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("id", "id")]
    #[case("tableHeader", "table_header")]
    #[case("tableBody", "table_body")]
    #[case("docString", "doc_string")]
    #[case("keywordType", "keyword_type")]
    #[case("gherkinDocument", "gherkin_document")]
    #[case("line2Column", "line2_column")]
    #[case("table_header", "table_header")]
    fn converts_camel_case(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(camel_to_snake_case(key), expected);
    }

    #[rstest]
    #[case("mediaTypeURL", "media_type_url")]
    #[case("parseHTTPResponse", "parse_httpresponse")]
    #[case("HTTPServer", "httpserver")]
    #[case("aBC", "a_bc")]
    fn splits_uppercase_runs_once(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(camel_to_snake_case(key), expected);
    }

    #[test]
    fn snake_case_is_a_fixed_point() {
        for key in ["table_header", "media_type_url", "a", "x1_y2"] {
            assert_eq!(camel_to_snake_case(key), key);
        }
    }
}
