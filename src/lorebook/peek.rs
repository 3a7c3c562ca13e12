//! Short previews of content pages.
//!
//! A peek shows the opening and closing lines of a page's text with the
//! middle elided, for quick hover-style inspection without the full
//! document. Content pages are HTML, so markup is stripped to plain text
//! first.

/// A truncated preview. `hidden` is zero when the text fit entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePreview {
    pub head: Vec<String>,
    pub hidden: usize,
    pub tail: Vec<String>,
}

impl PagePreview {
    pub fn is_truncated(&self) -> bool {
        self.hidden > 0
    }
}

/// Reduces an HTML fragment to its text lines: tags dropped, entities for
/// the common few decoded, blank lines removed.
pub fn strip_tags(html: &str) -> Vec<String> {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => {
                if in_tag {
                    in_tag = false;
                    // Keep block boundaries as line breaks.
                    if !text.ends_with('\n') {
                        text.push('\n');
                    }
                } else {
                    text.push(ch);
                }
            }
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    let text = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");
    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

/// Builds a preview over the stripped lines. Short texts come back whole;
/// anything longer than both windows plus a small slack gets its middle
/// elided.
pub fn preview(html: &str, window: usize) -> PagePreview {
    let lines = strip_tags(html);
    let threshold = window * 2 + 3;
    if lines.len() <= threshold {
        return PagePreview {
            head: lines,
            hidden: 0,
            tail: Vec::new(),
        };
    }
    let hidden = lines.len() - window * 2;
    let tail = lines[lines.len() - window..].to_vec();
    let head = lines[..window].to_vec();
    PagePreview { head, hidden, tail }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markup_and_blank_lines() {
        let lines = strip_tags("<h1>Dent</h1>\n<p>Mostly &amp; harmless</p>\n\n<p></p>");
        assert_eq!(lines, vec!["Dent", "Mostly & harmless"]);
    }

    #[test]
    fn short_text_is_not_truncated() {
        let html = "<p>one</p><p>two</p><p>three</p>";
        let result = preview(html, 3);
        assert!(!result.is_truncated());
        assert_eq!(result.head, vec!["one", "two", "three"]);
        assert!(result.tail.is_empty());
    }

    #[test]
    fn text_at_threshold_stays_whole() {
        // window 2 keeps up to 2*2+3 = 7 lines intact.
        let html: String = (1..=7).map(|i| format!("<p>line {}</p>", i)).collect();
        let result = preview(&html, 2);
        assert!(!result.is_truncated());
        assert_eq!(result.head.len(), 7);
    }

    #[test]
    fn long_text_elides_the_middle() {
        let html: String = (1..=20).map(|i| format!("<p>line {}</p>", i)).collect();
        let result = preview(&html, 3);
        assert!(result.is_truncated());
        assert_eq!(result.head, vec!["line 1", "line 2", "line 3"]);
        assert_eq!(result.tail, vec!["line 18", "line 19", "line 20"]);
        assert_eq!(result.hidden, 14);
    }

    #[test]
    fn empty_input() {
        let result = preview("", 3);
        assert!(result.head.is_empty());
        assert!(!result.is_truncated());
    }
}
