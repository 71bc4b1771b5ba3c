use serde::{Deserialize, Serialize};

use crate::utils::escape_html;

/// One block of structured rich text. `kind` carries the block type the
/// CMS uses ("paragraph", "heading1".."heading6", "preformatted",
/// "list-item", "o-list-item"); unknown kinds render as paragraphs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<Span>,
}

/// An inline annotation over a character range of the block text.
/// Offsets index characters, not bytes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Option<SpanData>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SpanData {
    pub url: Option<String>,
}

impl Span {
    fn open_tag(&self) -> String {
        match self.kind.as_str() {
            "strong" => "<strong>".to_string(),
            "em" => "<em>".to_string(),
            "hyperlink" => {
                let url = self
                    .data
                    .as_ref()
                    .and_then(|d| d.url.as_deref())
                    .unwrap_or("#");
                format!(r#"<a href="{}">"#, escape_html(url))
            }
            _ => String::new(),
        }
    }

    fn close_tag(&self) -> &'static str {
        match self.kind.as_str() {
            "strong" => "</strong>",
            "em" => "</em>",
            "hyperlink" => "</a>",
            _ => "",
        }
    }
}

/// Renders the block text with spans applied at their character
/// offsets. Spans are assumed non-overlapping or properly nested, which
/// is what the CMS produces. Offsets past the end of the text are
/// clamped so a malformed span can't leave a tag unclosed; spans that
/// cover no characters after clamping are dropped.
fn render_spans(text: &str, spans: &[Span]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let spans: Vec<(usize, usize, &Span)> = spans
        .iter()
        .filter_map(|s| {
            let end = s.end.min(len);
            (s.start < end).then_some((s.start, end, s))
        })
        .collect();
    let mut out = String::with_capacity(text.len());
    for i in 0..=len {
        for (_, end, span) in spans.iter().rev() {
            if *end == i {
                out.push_str(span.close_tag());
            }
        }
        for (start, _, span) in spans.iter() {
            if *start == i {
                out.push_str(&span.open_tag());
            }
        }
        if let Some(c) = chars.get(i) {
            crate::utils::push_escaped(&mut out, *c);
        }
    }
    out
}

fn list_tag(kind: &str) -> Option<&'static str> {
    match kind {
        "list-item" => Some("ul"),
        "o-list-item" => Some("ol"),
        _ => None,
    }
}

/// Renders blocks to HTML in source order. Consecutive list items are
/// grouped under a single `<ul>`/`<ol>`.
pub fn blocks_to_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    let mut open_list: Option<&'static str> = None;
    for block in blocks {
        let list = list_tag(&block.kind);
        if open_list != list {
            if let Some(tag) = open_list {
                out.push_str(&format!("</{}>", tag));
            }
            if let Some(tag) = list {
                out.push_str(&format!("<{}>", tag));
            }
            open_list = list;
        }
        let inner = render_spans(&block.text, &block.spans);
        match block.kind.as_str() {
            "heading1" => out.push_str(&format!("<h1>{}</h1>", inner)),
            "heading2" => out.push_str(&format!("<h2>{}</h2>", inner)),
            "heading3" => out.push_str(&format!("<h3>{}</h3>", inner)),
            "heading4" => out.push_str(&format!("<h4>{}</h4>", inner)),
            "heading5" => out.push_str(&format!("<h5>{}</h5>", inner)),
            "heading6" => out.push_str(&format!("<h6>{}</h6>", inner)),
            "preformatted" => out.push_str(&format!("<pre>{}</pre>", inner)),
            "list-item" | "o-list-item" => out.push_str(&format!("<li>{}</li>", inner)),
            _ => out.push_str(&format!("<p>{}</p>", inner)),
        }
    }
    if let Some(tag) = open_list {
        out.push_str(&format!("</{}>", tag));
    }
    out
}

/// Plain text of the blocks, newline-joined. Used for word counts and
/// meta descriptions.
pub fn blocks_to_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
