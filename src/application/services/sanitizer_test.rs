#[cfg(test)]
mod tests {
    use crate::application::services::markup;
    use crate::application::services::sanitizer::sanitize;
    use test_case::test_case;

    fn assert_inert(html: &str) {
        let lower = html.to_ascii_lowercase();
        for needle in [
            "<script", "<iframe", "<object", "<embed", "<svg", "<style", "onerror", "onload",
            "onclick", "javascript:", "vbscript:", "data:",
        ] {
            assert!(!lower.contains(needle), "found {needle:?} in {html:?}");
        }
    }

    #[test_case("<script>alert(1)</script>" ; "script element")]
    #[test_case("<SCRIPT SRC=//evil.example/x.js></SCRIPT>" ; "uppercase script")]
    #[test_case("<img src=x onerror=alert(1)>" ; "event handler")]
    #[test_case("<a href=\"javascript:alert(1)\">x</a>" ; "script url")]
    #[test_case("<a href=\"jav&#x09;ascript:alert(1)\">x</a>" ; "encoded tab in scheme")]
    #[test_case("<a href=\"&#106;avascript:alert(1)\">x</a>" ; "encoded scheme letter")]
    #[test_case("<a href=\"  JaVaScRiPt:alert(1)\">x</a>" ; "mixed case scheme")]
    #[test_case("<iframe src=\"https://evil.example\"></iframe>" ; "iframe")]
    #[test_case("<svg><script>alert(1)</script></svg>" ; "svg script")]
    #[test_case("<style>body{background:url(javascript:alert(1))}</style>" ; "style")]
    #[test_case("<img src=\"data:image/svg+xml,<svg onload=alert(1)>\">" ; "data url")]
    #[test_case("<div onclick=\"alert(1)\">x</div>" ; "div handler")]
    #[test_case("<object data=\"x.swf\"><embed src=\"x.swf\"></object>" ; "plugin content")]
    #[test_case("<scr<script>ipt>alert(1)</script>" ; "split tag")]
    fn test_hostile_html_is_neutralized(input: &str) {
        assert_inert(sanitize(input).as_str());
    }

    #[test]
    fn test_script_content_is_dropped_not_unwrapped() {
        let html = sanitize("before<script>var secret = 1;</script>after");
        assert_eq!(html.as_str(), "beforeafter");
    }

    #[test_case("a<!-->b", "ab" ; "abrupt empty comment")]
    #[test_case("a<!--->b", "ab" ; "abrupt dashed comment")]
    #[test_case("a<!-- x > y -->b", "ab" ; "comment containing gt")]
    #[test_case("a<!-- open", "a" ; "unterminated comment")]
    fn test_comments_are_dropped(input: &str, expected: &str) {
        assert_eq!(sanitize(input).as_str(), expected);
    }

    #[test]
    fn test_unknown_elements_are_unwrapped() {
        let html = sanitize("<custom-tag><b>bold</b></custom-tag>");
        assert_eq!(html.as_str(), "<b>bold</b>");
    }

    #[test]
    fn test_safe_link_is_kept() {
        let html = sanitize("<a href=\"https://example.com/?a=1&amp;b=2\" title=\"t\" target=\"_blank\">x</a>");
        assert_eq!(
            html.as_str(),
            "<a href=\"https://example.com/?a=1&amp;b=2\" title=\"t\">x</a>"
        );
    }

    #[test]
    fn test_code_language_class_survives() {
        let html = sanitize("<pre><code class=\"language-rust\">fn main() {}</code></pre>");
        assert_eq!(
            html.as_str(),
            "<pre><code class=\"language-rust\">fn main() {}</code></pre>"
        );

        let html = sanitize("<code class=\"x\" onmouseover=\"y\">z</code>");
        assert_eq!(html.as_str(), "<code>z</code>");
    }

    #[test]
    fn test_markup_formatting_survives_round_trip() {
        let html = markup::render("Some *emphasis* and **strong** text\n\n- one\n- two");
        assert_eq!(
            html.as_str(),
            "<p>Some <em>emphasis</em> and <strong>strong</strong> text</p>\n<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_markup_with_embedded_script_payload() {
        let html = markup::render("*hello*\n\n<script>alert('x')</script>\n\n<img src=x onerror=alert(1)>");
        assert_inert(html.as_str());
        assert!(html.as_str().contains("<em>hello</em>"));
        assert!(html.as_str().contains("<img src=\"x\" />"));
    }

    #[test]
    fn test_markup_image_and_code_span() {
        let html = markup::render("![alt text](https://example.com/a.png) `a < b`");
        assert_eq!(
            html.as_str(),
            "<p><img src=\"https://example.com/a.png\" alt=\"alt text\" /> <code>a &lt; b</code></p>\n"
        );
    }

    #[test]
    fn test_markup_escaped_text_is_not_reinterpreted() {
        let html = markup::render("&lt;script&gt;alert(1)&lt;/script&gt;");
        assert_eq!(html.as_str(), "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>\n");
    }
}
