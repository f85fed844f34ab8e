//! Property tests for the key and scalar normalizers.

use gherkin_ast::normalize::{camel_to_snake_case, strip_spaces};
use proptest::prelude::*;

/// lowerCamelCase names built from lowercase words.
fn camel_case_strategy() -> impl Strategy<Value = (String, String)> {
    prop::collection::vec("[a-z][a-z0-9]{0,6}", 1..5).prop_map(|words| {
        let snake = words.join("_");
        let camel = words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                if i == 0 {
                    word.clone()
                } else {
                    let mut chars = word.chars();
                    let first = chars.next().map(|c| c.to_ascii_uppercase()).unwrap_or_default();
                    std::iter::once(first).chain(chars).collect()
                }
            })
            .collect::<String>();
        (camel, snake)
    })
}

/// Text with ragged indentation and mixed line separators.
fn ragged_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(("[ \t]{0,4}", "[a-z ]{0,8}", "[ \t]{0,4}", prop_oneof![Just("\n"), Just("\r\n"), Just("\r"), Just("")]), 0..6)
        .prop_map(|lines| {
            lines
                .into_iter()
                .map(|(lead, body, trail, sep)| format!("{lead}{body}{trail}{sep}"))
                .collect()
        })
}

proptest! {
    #[test]
    fn camel_case_maps_back_to_its_words((camel, snake) in camel_case_strategy()) {
        prop_assert_eq!(camel_to_snake_case(&camel), snake);
    }

    #[test]
    fn key_normalizer_is_idempotent(key in "[a-zA-Z][a-zA-Z0-9_]{0,15}") {
        let once = camel_to_snake_case(&key);
        prop_assert_eq!(camel_to_snake_case(&once), once.clone());
    }

    #[test]
    fn scalar_normalizer_is_idempotent(text in ragged_text_strategy()) {
        let once = strip_spaces(&text);
        prop_assert_eq!(strip_spaces(&once), once);
    }

    #[test]
    fn scalar_normalizer_keeps_separators(text in ragged_text_strategy()) {
        let separators = |s: &str| s.chars().filter(|c| *c == '\n' || *c == '\r').collect::<String>();
        prop_assert_eq!(separators(&strip_spaces(&text)), separators(&text));
    }

    #[test]
    fn normalized_lines_have_no_outer_whitespace(text in ragged_text_strategy()) {
        let normalized = strip_spaces(&text);
        for line in normalized.split(['\n', '\r']) {
            prop_assert_eq!(line, line.trim());
        }
    }
}
