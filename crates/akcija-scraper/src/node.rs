//! Read-only element queries over a parsed document.
//!
//! Extraction rules are written against [`NodeQuery`] rather than a concrete
//! HTML tree, so they run the same over `scraper` elements and over small
//! hand-built trees in tests.

use scraper::ElementRef;

/// Element predicate: tag name, class, exact attribute value, and `id`
/// prefix. Unset parts match anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    tag: Option<&'static str>,
    class: Option<&'static str>,
    attr: Option<(&'static str, &'static str)>,
    id_prefix: Option<&'static str>,
}

impl Query {
    #[must_use]
    pub const fn any() -> Self {
        Self {
            tag: None,
            class: None,
            attr: None,
            id_prefix: None,
        }
    }

    #[must_use]
    pub const fn tag(tag: &'static str) -> Self {
        let mut query = Self::any();
        query.tag = Some(tag);
        query
    }

    #[must_use]
    pub const fn with_class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    #[must_use]
    pub const fn with_attr(mut self, name: &'static str, value: &'static str) -> Self {
        self.attr = Some((name, value));
        self
    }

    #[must_use]
    pub const fn with_id_prefix(mut self, prefix: &'static str) -> Self {
        self.id_prefix = Some(prefix);
        self
    }

    /// Tests one element, given its tag name and an attribute lookup.
    pub fn matches<'a>(&self, tag: &str, attr: impl Fn(&str) -> Option<&'a str>) -> bool {
        if let Some(want) = self.tag {
            if !tag.eq_ignore_ascii_case(want) {
                return false;
            }
        }
        if let Some(want) = self.class {
            let has_class = attr("class")
                .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == want));
            if !has_class {
                return false;
            }
        }
        if let Some((name, want)) = self.attr {
            if attr(name) != Some(want) {
                return false;
            }
        }
        if let Some(prefix) = self.id_prefix {
            if !attr("id").is_some_and(|id| id.starts_with(prefix)) {
                return false;
            }
        }
        true
    }
}

/// Minimal query surface the extractors need from a document node.
///
/// Searches cover descendants only, in document order; the node itself is
/// never a match.
pub trait NodeQuery: Sized {
    fn find_all(&self, query: &Query) -> Vec<Self>;

    fn find_first(&self, query: &Query) -> Option<Self> {
        self.find_all(query).into_iter().next()
    }

    fn attr(&self, name: &str) -> Option<&str>;

    /// Text nodes under this element, in document order.
    fn text_fragments(&self) -> Vec<&str>;

    /// Each text fragment trimmed, blanks dropped, and the rest concatenated.
    fn stripped_text(&self) -> String {
        self.text_fragments()
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// All text concatenated, then trimmed once at the ends.
    fn full_text(&self) -> String {
        self.text_fragments().concat().trim().to_owned()
    }
}

impl NodeQuery for ElementRef<'_> {
    fn find_all(&self, query: &Query) -> Vec<Self> {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|el| {
                let element = el.value();
                query.matches(element.name(), |name| element.attr(name))
            })
            .collect()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn text_fragments(&self) -> Vec<&str> {
        self.text().collect()
    }
}
