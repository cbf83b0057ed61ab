use scraper::{ElementRef, Selector};

use crate::error::{Result, ScrapeError};
use crate::normalize::clean_text;

pub fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        css,
        reason: format!("{:?}", e),
    })
}

/// Whitespace-normalized text content of an element.
pub fn text_of(element: ElementRef) -> String {
    clean_text(&element.text().collect::<String>())
}

pub fn has_class(element: ElementRef, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// The first element sibling after `element` with the given tag name.
pub fn next_sibling_named<'a>(element: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == name)
}
