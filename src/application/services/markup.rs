//! Lightweight markup expansion for long text values.

use pulldown_cmark::{Options, Parser, html};

use super::sanitizer::{self, SanitizedHtml};

/// HTML produced by expanding markup. Not safe to display.
///
/// The only way out of this type is [`ExpandedMarkup::sanitize`], which keeps
/// expansion and sanitizing in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedMarkup(String);

impl ExpandedMarkup {
    /// Runs the expanded HTML through the allowlist sanitizer.
    #[must_use]
    pub fn sanitize(self) -> SanitizedHtml {
        sanitizer::sanitize(&self.0)
    }

    #[cfg(test)]
    pub(crate) fn unsanitized(&self) -> &str {
        &self.0
    }
}

/// Expands markdown to HTML.
///
/// Raw HTML in the source is passed through untouched; it is the
/// sanitizer's job to remove anything unsafe.
#[must_use]
pub fn expand(source: &str) -> ExpandedMarkup {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(source, options);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    ExpandedMarkup(out)
}

/// Expands and sanitizes in one step.
#[must_use]
pub fn render(source: &str) -> SanitizedHtml {
    expand(source).sanitize()
}
