//! Markdown source handle with a small, deterministic HTML renderer

use regex::Regex;
use std::sync::OnceLock;

/// Markdown source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markdown {
    source: String,
}

impl Markdown {
    pub fn create(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn to_text(&self) -> String {
        self.source.clone()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render headings, lists, fenced code, paragraphs and inline markup to HTML.
    ///
    /// # Example
    /// ```
    /// use morphic_core::value::Markdown;
    /// let html = Markdown::create("# Title").to_html();
    /// assert_eq!(html, "<h1>Title</h1>\n");
    /// ```
    pub fn to_html(&self) -> String {
        let mut renderer = Renderer::default();
        for line in self.source.replace("\r\n", "\n").lines() {
            renderer.line(line);
        }
        renderer.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

#[derive(Default)]
struct Renderer {
    html: String,
    paragraph: Vec<String>,
    list: Option<ListKind>,
    in_code: bool,
}

impl Renderer {
    fn line(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            if self.in_code {
                self.html.push_str("</code></pre>\n");
                self.in_code = false;
            } else {
                self.close_blocks();
                self.html.push_str("<pre><code>");
                self.in_code = true;
            }
            return;
        }
        if self.in_code {
            self.html.push_str(&escape_html(line));
            self.html.push('\n');
            return;
        }
        if trimmed.is_empty() {
            self.close_blocks();
            return;
        }
        if let Some((level, content)) = heading(trimmed) {
            self.close_blocks();
            self.html.push_str(&format!(
                "<h{level}>{}</h{level}>\n",
                render_inline(content)
            ));
            return;
        }
        if let Some((kind, item)) = list_item(trimmed) {
            self.flush_paragraph();
            if self.list != Some(kind) {
                self.close_list();
                self.html.push_str(&format!("<{}>\n", kind.tag()));
                self.list = Some(kind);
            }
            self.html
                .push_str(&format!("<li>{}</li>\n", render_inline(item)));
            return;
        }
        self.close_list();
        self.paragraph.push(render_inline(trimmed));
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        self.html
            .push_str(&format!("<p>{}</p>\n", self.paragraph.join("\n")));
        self.paragraph.clear();
    }

    fn close_list(&mut self) {
        if let Some(kind) = self.list.take() {
            self.html.push_str(&format!("</{}>\n", kind.tag()));
        }
    }

    fn close_blocks(&mut self) {
        self.flush_paragraph();
        self.close_list();
    }

    fn finish(mut self) -> String {
        if self.in_code {
            self.html.push_str("</code></pre>\n");
        }
        self.close_blocks();
        self.html
    }
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &line[level..];
    if rest.is_empty() {
        return Some((level, ""));
    }
    rest.strip_prefix(' ').map(|content| (level, content.trim()))
}

fn list_item(line: &str) -> Option<(ListKind, &str)> {
    if let Some(item) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Some((ListKind::Unordered, item.trim()));
    }
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        if let Some(item) = line[digits..].strip_prefix(". ") {
            return Some((ListKind::Ordered, item.trim()));
        }
    }
    None
}

struct InlineRules {
    code: Regex,
    strong: Regex,
    emphasis: Regex,
    link: Regex,
}

static INLINE_RULES: OnceLock<InlineRules> = OnceLock::new();

fn render_inline(text: &str) -> String {
    let rules = INLINE_RULES.get_or_init(|| InlineRules {
        code: Regex::new(r"`([^`]+)`").unwrap(),
        strong: Regex::new(r"\*\*([^*]+)\*\*").unwrap(),
        emphasis: Regex::new(r"\*([^*]+)\*").unwrap(),
        link: Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").unwrap(),
    });
    let escaped = escape_html(text);
    let out = rules.code.replace_all(&escaped, "<code>$1</code>");
    let out = rules.strong.replace_all(&out, "<strong>$1</strong>");
    let out = rules.emphasis.replace_all(&out, "<em>$1</em>");
    let out = rules.link.replace_all(&out, "<a href=\"$2\">$1</a>");
    out.into_owned()
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
