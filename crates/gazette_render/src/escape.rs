/// Escape feed-supplied text for embedding in HTML, attributes included.
/// Feeds are untrusted input; everything user-visible goes through here.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<script>alert("hi")</script>"#),
            "&lt;script&gt;alert(&quot;hi&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn escapes_ampersand_first() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn passes_plain_text_through() {
        assert_eq!(escape_html("Fed holds rates steady"), "Fed holds rates steady");
    }

    #[test]
    fn escapes_attribute_breakers() {
        assert_eq!(escape_html(r#"x" onload="evil"#), "x&quot; onload=&quot;evil");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }
}
