//! Allowlist HTML sanitizer.
//!
//! Input is parsed into a small element tree, the tree is filtered against a
//! fixed element and attribute allowlist, and the result is serialized with
//! every text node and attribute value escaped.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

/// HTML that passed the allowlist. Only [`sanitize`] constructs it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct SanitizedHtml(String);

impl SanitizedHtml {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SanitizedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Elements removed together with everything inside them.
const DROPPED: &[&str] = &[
    "applet", "base", "button", "embed", "frame", "frameset", "head", "iframe", "input", "link",
    "math", "meta", "noembed", "noframes", "noscript", "object", "option", "plaintext", "script",
    "select", "style", "svg", "template", "textarea", "title", "xmp",
];

/// Elements whose content is not markup and runs to the matching close tag.
const RAW_TEXT: &[&str] = &[
    "iframe", "noembed", "noframes", "noscript", "plaintext", "script", "style", "textarea",
    "title", "xmp",
];

const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

const URL_ATTRIBUTES: &[&str] = &["href", "src"];

fn allowed_attributes(element: &str) -> Option<&'static [&'static str]> {
    let attributes: &'static [&'static str] = match element {
        "a" => &["href", "title"],
        "img" => &["src", "alt", "title", "width", "height"],
        "abbr" => &["title"],
        "ol" => &["start"],
        "td" | "th" => &["align", "colspan", "rowspan"],
        "code" => &["class"],
        "b" | "blockquote" | "br" | "caption" | "dd" | "del" | "details" | "div" | "dl" | "dt"
        | "em" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "hr" | "i" | "ins" | "kbd" | "li"
        | "mark" | "p" | "pre" | "q" | "s" | "small" | "span" | "strong" | "sub" | "summary"
        | "sup" | "table" | "tbody" | "tfoot" | "thead" | "tr" | "u" | "ul" => &[],
        _ => return None,
    };
    Some(attributes)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Element(Element),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    fn new(name: String, attributes: Vec<(String, String)>) -> Self {
        Self {
            name,
            attributes,
            children: Vec::new(),
        }
    }
}

/// Sanitizes an HTML fragment.
#[must_use]
pub fn sanitize(input: &str) -> SanitizedHtml {
    let tree = parse_fragment(input);
    let mut cleaned = Vec::with_capacity(tree.len());
    clean(tree, &mut cleaned);

    let mut out = String::with_capacity(input.len());
    serialize(&cleaned, &mut out);
    SanitizedHtml(out)
}

#[derive(Default)]
struct TreeBuilder {
    root: Vec<Node>,
    open: Vec<Element>,
}

impl TreeBuilder {
    fn push(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root.push(node),
        }
    }

    fn text(&mut self, raw: &str) {
        if !raw.is_empty() {
            self.push(Node::Text(decode_entities(raw)));
        }
    }

    fn open(&mut self, element: Element) {
        self.open.push(element);
    }

    /// Closes the innermost open element with this name and everything
    /// opened after it. Unmatched close tags are ignored.
    fn close(&mut self, name: &str) {
        let Some(position) = self.open.iter().rposition(|e| e.name == name) else {
            return;
        };
        while self.open.len() > position {
            if let Some(element) = self.open.pop() {
                self.push(Node::Element(element));
            }
        }
    }

    fn finish(mut self) -> Vec<Node> {
        while let Some(element) = self.open.pop() {
            self.push(Node::Element(element));
        }
        self.root
    }
}

fn parse_fragment(input: &str) -> Vec<Node> {
    static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r#"^<(/?)([A-Za-z][A-Za-z0-9-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
            .expect("Invalid regex")
    });

    let mut builder = TreeBuilder::default();
    let mut rest = input;

    while !rest.is_empty() {
        let Some(lt) = rest.find('<') else {
            builder.text(rest);
            break;
        };
        builder.text(&rest[..lt]);
        rest = &rest[lt..];

        if let Some(comment) = rest.strip_prefix("<!--") {
            rest = skip_comment(comment);
            continue;
        }
        if rest.starts_with("<!") || rest.starts_with("<?") {
            rest = rest.find('>').map_or("", |end| &rest[end + 1..]);
            continue;
        }

        let Some(caps) = TAG_RE.captures(rest) else {
            builder.text("<");
            rest = &rest[1..];
            continue;
        };

        let consumed = caps.get(0).map_or(1, |m| m.end());
        let closing = !caps[1].is_empty();
        let name = caps[2].to_ascii_lowercase();
        let raw_attributes = caps.get(3).map_or("", |m| m.as_str());
        rest = &rest[consumed..];

        if closing {
            builder.close(&name);
            continue;
        }

        let self_closing = raw_attributes.trim_end().ends_with('/');
        let element = Element::new(name, parse_attributes(raw_attributes));

        if RAW_TEXT.contains(&element.name.as_str()) {
            let (content, after) = split_raw_text(rest, &element.name);
            let mut element = element;
            element.children.push(Node::Text(content.to_string()));
            builder.push(Node::Element(element));
            rest = after;
        } else if self_closing || VOID.contains(&element.name.as_str()) {
            builder.push(Node::Element(element));
        } else {
            builder.open(element);
        }
    }

    builder.finish()
}

/// Splits raw text content at the matching close tag.
fn split_raw_text<'a>(rest: &'a str, name: &str) -> (&'a str, &'a str) {
    let needle = format!("</{name}");
    let Some(start) = rest.to_ascii_lowercase().find(&needle) else {
        return (rest, "");
    };
    let after_close = &rest[start..];
    let end = after_close.find('>').map_or(after_close.len(), |i| i + 1);
    (&rest[..start], &after_close[end..])
}

fn parse_attributes(raw: &str) -> Vec<(String, String)> {
    static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r#"([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
            .expect("Invalid regex")
    });

    ATTR_RE
        .captures_iter(raw)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or_else(String::new, |m| decode_entities(m.as_str()));
            (name, value)
        })
        .collect()
}

/// Decodes character references. Unknown named references are left as is.
fn decode_entities(raw: &str) -> String {
    static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"&(?:#([0-9]{1,8})|#[xX]([0-9a-fA-F]{1,7})|([a-zA-Z][a-zA-Z0-9]*));")
            .expect("Invalid regex")
    });

    if !raw.contains('&') {
        return raw.to_string();
    }

    ENTITY_RE
        .replace_all(raw, |caps: &Captures<'_>| {
            let numeric = caps
                .get(1)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .or_else(|| caps.get(2).and_then(|m| u32::from_str_radix(m.as_str(), 16).ok()));

            if let Some(code) = numeric {
                return char::from_u32(code)
                    .filter(|c| *c != '\0')
                    .unwrap_or('\u{FFFD}')
                    .to_string();
            }

            match caps.get(3).map(|m| m.as_str()) {
                Some("lt") => "<".to_string(),
                Some("gt") => ">".to_string(),
                Some("amp") => "&".to_string(),
                Some("quot") => "\"".to_string(),
                Some("apos") => "'".to_string(),
                Some("nbsp") => "\u{a0}".to_string(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn clean(nodes: Vec<Node>, out: &mut Vec<Node>) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push(Node::Text(text)),
            Node::Element(element) => {
                if DROPPED.contains(&element.name.as_str()) {
                    continue;
                }
                match allowed_attributes(&element.name) {
                    Some(allowed) => {
                        let mut children = Vec::with_capacity(element.children.len());
                        clean(element.children, &mut children);
                        let attributes = element
                            .attributes
                            .into_iter()
                            .filter(|(name, value)| keep_attribute(name, value, allowed))
                            .collect();
                        out.push(Node::Element(Element {
                            name: element.name,
                            attributes,
                            children,
                        }));
                    }
                    // Unknown elements are unwrapped.
                    None => clean(element.children, out),
                }
            }
        }
    }
}

fn keep_attribute(name: &str, value: &str, allowed: &[&str]) -> bool {
    if !allowed.contains(&name) {
        return false;
    }
    if URL_ATTRIBUTES.contains(&name) {
        return is_safe_url(value);
    }
    if name == "class" {
        return value
            .strip_prefix("language-")
            .is_some_and(|lang| {
                !lang.is_empty()
                    && lang
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'))
            });
    }
    true
}

/// Accepts relative URLs and absolute URLs with an allowlisted scheme.
///
/// Whitespace and control characters are removed before the scheme is read.
fn is_safe_url(value: &str) -> bool {
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    match normalized.find([':', '/', '?', '#']) {
        Some(index) if normalized[index..].starts_with(':') => {
            SAFE_SCHEMES.contains(&&normalized[..index])
        }
        _ => true,
    }
}

fn serialize(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => escape_into(text, false, out),
            Node::Element(element) => {
                out.push('<');
                out.push_str(&element.name);
                for (name, value) in &element.attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_into(value, true, out);
                    out.push('"');
                }
                if VOID.contains(&element.name.as_str()) {
                    out.push_str(" />");
                    continue;
                }
                out.push('>');
                serialize(&element.children, out);
                out.push_str("</");
                out.push_str(&element.name);
                out.push('>');
            }
        }
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// Returns what follows a comment body. `<!-->` and `<!--->` close at once;
/// anything else runs to the first `-->`, or to the end when unterminated.
fn skip_comment(body: &str) -> &str {
    if let Some(after) = body.strip_prefix('>') {
        return after;
    }
    if let Some(after) = body.strip_prefix("->") {
        return after;
    }
    body.find("-->").map_or("", |end| &body[end + 3..])
}
