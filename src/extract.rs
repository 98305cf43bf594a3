use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};

// Create static selectors to avoid recompiling them each time
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to parse body selector")
});

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("title").expect("Failed to parse title selector")
});

static H1_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1").expect("Failed to parse h1 selector")
});

const SKIPPED_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Longest title taken from body text when the page has no `<title>` or `<h1>`.
pub const FALLBACK_TITLE_CHARS: usize = 100;

/// Rendered page reduced to what a reader would see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub title: String,
    pub text: String,
}

pub fn extract_page(html: &str) -> PageText {
    let document = Html::parse_document(html);
    let text = extract_text(&document);
    let title = extract_title(&document)
        .unwrap_or_else(|| leading_chars(&text, FALLBACK_TITLE_CHARS));

    PageText { title, text }
}

/// Visible text of the body with every whitespace run collapsed to one space.
pub fn extract_text(document: &Html) -> String {
    let root = document
        .select(&BODY_SELECTOR)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut raw = String::new();
    for node in root.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            raw.push_str(text);
            raw.push(' ');
        }
    }

    collapse_whitespace(&raw)
}

/// `<title>` if present and non-empty, otherwise the first `<h1>`.
pub fn extract_title(document: &Html) -> Option<String> {
    first_text(document, &TITLE_SELECTOR).or_else(|| first_text(document, &H1_SELECTOR))
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .map(|el: ElementRef| collapse_whitespace(&el.text().collect::<String>()))
        .find(|s| !s.is_empty())
}

fn leading_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].trim_end().to_string(),
        None => text.to_string(),
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
