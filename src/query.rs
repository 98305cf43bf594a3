//! Turning hook input into the URL handed to providers.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left untouched by JavaScript's `encodeURIComponent`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const SCHEMES: [&str; 2] = ["http://", "https://"];

/// True when the input already carries a scheme the providers can fetch.
pub fn has_scheme(input: &str) -> bool {
    SCHEMES.iter().any(|scheme| {
        input
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, QUERY_COMPONENT).to_string()
}

/// `<search_base>?q=<text>`, or `&q=` when the base already has a query string.
pub fn search_url(search_base: &str, query: &str) -> String {
    let separator = if search_base.contains('?') { '&' } else { '?' };
    format!("{}{}q={}", search_base, separator, encode_component(query))
}
