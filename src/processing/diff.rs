//! Word-level diff between an original and a tailored document
//!
//! Alignment is a longest-common-subsequence table over whitespace-separated words.
//! Common prefix and suffix are stripped before the table is built, and the table size
//! is bounded by `max_cells`; beyond that the renderer degrades to escaped plain text.

use crate::error::{Result, TailorError};
use askama::Template;
use log::warn;
use serde::{Deserialize, Serialize};
use std::ops::Range;

pub const DEFAULT_MAX_CELLS: usize = 4_000_000;

/// Hard ceiling on any configured cell budget (200 MB of `u32` cells)
pub const MAX_TABLE_CELLS: usize = 50_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpTag {
    Equal,
    Insert,
    Delete,
    Replace,
}

/// One opcode: `old` indexes the original words, `new` the tailored words
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOp {
    pub tag: OpTag,
    pub old: Range<usize>,
    pub new: Range<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    Equal,
    Inserted,
    Deleted,
    ReplacedOld,
    ReplacedNew,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSpan {
    pub kind: SpanKind,
    pub text: String,
}

impl DiffSpan {
    fn new(kind: SpanKind, words: &[&str]) -> Self {
        Self {
            kind,
            text: words.join(" "),
        }
    }
}

#[derive(Template)]
#[template(
    source = "{% for span in spans %}{% if !loop.first %} {% endif %}{{ span.open|safe }}{{ span.text }}{{ span.close|safe }}{% endfor %}",
    ext = "html"
)]
struct DiffMarkup<'a> {
    spans: Vec<MarkupSpan<'a>>,
}

struct MarkupSpan<'a> {
    open: &'static str,
    text: &'a str,
    close: &'static str,
}

impl<'a> MarkupSpan<'a> {
    fn from_span(span: &'a DiffSpan) -> Self {
        let (open, close) = match span.kind {
            SpanKind::Equal => ("", ""),
            SpanKind::Inserted | SpanKind::ReplacedNew => ("<ins>", "</ins>"),
            SpanKind::Deleted | SpanKind::ReplacedOld => ("<del>", "</del>"),
        };
        Self {
            open,
            text: &span.text,
            close,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DiffRenderer {
    max_cells: usize,
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CELLS)
    }
}

impl DiffRenderer {
    /// `max_cells` is clamped to `MAX_TABLE_CELLS`
    pub fn new(max_cells: usize) -> Self {
        Self {
            max_cells: max_cells.min(MAX_TABLE_CELLS),
        }
    }

    pub fn opcodes(&self, old: &[&str], new: &[&str]) -> Result<Vec<DiffOp>> {
        let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
        let suffix = old[prefix..]
            .iter()
            .rev()
            .zip(new[prefix..].iter().rev())
            .take_while(|(a, b)| a == b)
            .count();

        let old_mid = &old[prefix..old.len() - suffix];
        let new_mid = &new[prefix..new.len() - suffix];

        let cells = (old_mid.len() + 1).checked_mul(new_mid.len() + 1);
        if cells.map_or(true, |cells| cells > self.max_cells) {
            return Err(TailorError::Diff(format!(
                "alignment of {}x{} words exceeds {} cells",
                old_mid.len(),
                new_mid.len(),
                self.max_cells
            )));
        }

        let mut ops = Vec::new();
        if prefix > 0 {
            ops.push(DiffOp {
                tag: OpTag::Equal,
                old: 0..prefix,
                new: 0..prefix,
            });
        }
        for op in lcs_opcodes(old_mid, new_mid) {
            ops.push(DiffOp {
                tag: op.tag,
                old: op.old.start + prefix..op.old.end + prefix,
                new: op.new.start + prefix..op.new.end + prefix,
            });
        }
        if suffix > 0 {
            ops.push(DiffOp {
                tag: OpTag::Equal,
                old: old.len() - suffix..old.len(),
                new: new.len() - suffix..new.len(),
            });
        }

        Ok(ops)
    }

    pub fn spans(&self, original: &str, tailored: &str) -> Result<Vec<DiffSpan>> {
        let old: Vec<&str> = original.split_whitespace().collect();
        let new: Vec<&str> = tailored.split_whitespace().collect();

        let mut spans = Vec::new();
        for op in self.opcodes(&old, &new)? {
            let old_words = &old[op.old.clone()];
            let new_words = &new[op.new.clone()];
            match op.tag {
                OpTag::Equal => spans.push(DiffSpan::new(SpanKind::Equal, old_words)),
                OpTag::Insert => spans.push(DiffSpan::new(SpanKind::Inserted, new_words)),
                OpTag::Delete => spans.push(DiffSpan::new(SpanKind::Deleted, old_words)),
                OpTag::Replace => {
                    spans.push(DiffSpan::new(SpanKind::ReplacedOld, old_words));
                    spans.push(DiffSpan::new(SpanKind::ReplacedNew, new_words));
                }
            }
        }

        Ok(spans)
    }

    pub fn markup(&self, spans: &[DiffSpan]) -> Result<String> {
        let markup = DiffMarkup {
            spans: spans.iter().map(MarkupSpan::from_span).collect(),
        };
        markup
            .render()
            .map_err(|e| TailorError::Diff(format!("Failed to render diff markup: {}", e)))
    }

    pub fn try_render(&self, original: &str, tailored: &str) -> Result<String> {
        self.markup(&self.spans(original, tailored)?)
    }

    /// Spans and escaped markup. On failure the spans are empty and the markup is the
    /// escaped tailored text.
    pub fn render_with_spans(&self, original: &str, tailored: &str) -> (Vec<DiffSpan>, String) {
        let rendered = self
            .spans(original, tailored)
            .and_then(|spans| self.markup(&spans).map(|markup| (spans, markup)));

        match rendered {
            Ok(rendered) => rendered,
            Err(e) => {
                warn!("Diff rendering degraded to plain text: {}", e);
                (Vec::new(), plain_text_fallback(tailored))
            }
        }
    }

    pub fn render(&self, original: &str, tailored: &str) -> String {
        self.render_with_spans(original, tailored).1
    }
}

fn plain_text_fallback(tailored: &str) -> String {
    escape_markup(&tailored.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// LCS table walk over the unmatched middle section
fn lcs_opcodes(old: &[&str], new: &[&str]) -> Vec<DiffOp> {
    let (n, m) = (old.len(), new.len());
    let width = m + 1;
    // table[i * width + j] = LCS length of old[i..] and new[j..]
    let mut table = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i * width + j] = if old[i] == new[j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let mut ops: Vec<DiffOp> = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < n || j < m {
        if i < n && j < m && old[i] == new[j] {
            let (start_i, start_j) = (i, j);
            while i < n && j < m && old[i] == new[j] {
                i += 1;
                j += 1;
            }
            ops.push(DiffOp {
                tag: OpTag::Equal,
                old: start_i..i,
                new: start_j..j,
            });
            continue;
        }

        // Consume the whole non-matching stretch up to the next common word
        let (start_i, start_j) = (i, j);
        while (i < n || j < m) && !(i < n && j < m && old[i] == new[j]) {
            if j >= m || (i < n && table[(i + 1) * width + j] >= table[i * width + j + 1]) {
                i += 1;
            } else {
                j += 1;
            }
        }
        let tag = match (i > start_i, j > start_j) {
            (true, true) => OpTag::Replace,
            (true, false) => OpTag::Delete,
            _ => OpTag::Insert,
        };
        ops.push(DiffOp {
            tag,
            old: start_i..i,
            new: start_j..j,
        });
    }

    ops
}

/// Minimal HTML escaping for the plain-text fallback
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Opcodes between two word sequences
pub fn diff_words(old: &[&str], new: &[&str]) -> Result<Vec<DiffOp>> {
    DiffRenderer::default().opcodes(old, new)
}

pub fn diff_spans(original: &str, tailored: &str) -> Result<Vec<DiffSpan>> {
    DiffRenderer::default().spans(original, tailored)
}

/// Escaped word-level diff markup of `original` against `tailored`
pub fn render_diff(original_text: &str, tailored_text: &str) -> String {
    DiffRenderer::default().render(original_text, tailored_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(kind: SpanKind, text: &str) -> DiffSpan {
        DiffSpan {
            kind,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_single_word_replacement() {
        let spans = diff_spans("alpha beta gamma", "alpha delta gamma").unwrap();
        assert_eq!(
            spans,
            vec![
                span(SpanKind::Equal, "alpha"),
                span(SpanKind::ReplacedOld, "beta"),
                span(SpanKind::ReplacedNew, "delta"),
                span(SpanKind::Equal, "gamma"),
            ]
        );

        let ops = diff_words(&["alpha", "beta", "gamma"], &["alpha", "delta", "gamma"]).unwrap();
        let tags: Vec<OpTag> = ops.iter().map(|op| op.tag).collect();
        assert_eq!(tags, vec![OpTag::Equal, OpTag::Replace, OpTag::Equal]);
        assert_eq!(ops[1].old, 1..2);
        assert_eq!(ops[1].new, 1..2);

        assert_eq!(
            render_diff("alpha beta gamma", "alpha delta gamma"),
            "alpha <del>beta</del> <ins>delta</ins> gamma"
        );
    }

    #[test]
    fn test_identical_text_is_all_equal() {
        let text = "Built scalable data infrastructure\nLed a team of 5";
        let spans = diff_spans(text, text).unwrap();
        assert!(spans.iter().all(|s| s.kind == SpanKind::Equal));

        let markup = render_diff(text, text);
        assert!(!markup.contains("<ins>") && !markup.contains("<del>"));
        assert_eq!(markup, "Built scalable data infrastructure Led a team of 5");
    }

    #[test]
    fn test_insert_and_delete() {
        let ops = diff_words(&["a", "b", "c"], &["a", "x", "b"]).unwrap();
        let tags: Vec<OpTag> = ops.iter().map(|op| op.tag).collect();
        assert_eq!(tags, vec![OpTag::Equal, OpTag::Insert, OpTag::Equal, OpTag::Delete]);

        assert_eq!(render_diff("a b c", "a x b"), "a <ins>x</ins> b <del>c</del>");
    }

    #[test]
    fn test_empty_sides() {
        assert_eq!(render_diff("", ""), "");
        assert_eq!(render_diff("", "new words"), "<ins>new words</ins>");
        assert_eq!(render_diff("old words", ""), "<del>old words</del>");
        assert!(diff_words(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_opcodes_cover_both_sequences() {
        let old: Vec<&str> = "the quick brown fox jumps over the lazy dog".split(' ').collect();
        let new: Vec<&str> = "a quick red fox leaps over lazy dogs today".split(' ').collect();
        let ops = diff_words(&old, &new).unwrap();

        let (mut i, mut j) = (0, 0);
        for op in &ops {
            assert_eq!(op.old.start, i);
            assert_eq!(op.new.start, j);
            if op.tag == OpTag::Equal {
                assert_eq!(old[op.old.clone()], new[op.new.clone()]);
            }
            i = op.old.end;
            j = op.new.end;
        }
        assert_eq!((i, j), (old.len(), new.len()));

        let equal_words: usize = ops.iter().filter(|op| op.tag == OpTag::Equal).map(|op| op.old.len()).sum();
        // quick, fox, over, lazy
        assert_eq!(equal_words, 4);
    }

    #[test]
    fn test_markup_is_escaped() {
        let markup = render_diff(
            "<b>bold</b> & \"quoted\"",
            "<script>alert('x')</script> & \"quoted\"",
        );

        assert!(!markup.contains("<b>"));
        assert!(!markup.contains("<script>"));
        assert!(!markup.contains('"'));
        let stripped = markup
            .replace("<ins>", "")
            .replace("</ins>", "")
            .replace("<del>", "")
            .replace("</del>", "");
        assert!(!stripped.contains('<') && !stripped.contains('>'));
        assert!(!stripped.replace("&amp;", "").replace("&lt;", "").replace("&gt;", "").contains("& "));
    }

    #[test]
    fn test_oversized_alignment_falls_back() {
        let renderer = DiffRenderer::new(4);
        assert!(renderer.try_render("a b c", "x y z").is_err());
        assert_eq!(renderer.render("a b c", "x <y> z"), "x &lt;y&gt; z");

        // Identical input needs no table at all
        assert_eq!(renderer.render("a b c", "a b c"), "a b c");
    }

    #[test]
    fn test_unbounded_budget_is_clamped() {
        let renderer = DiffRenderer::new(usize::MAX);
        assert_eq!(renderer.max_cells, MAX_TABLE_CELLS);
        assert_eq!(renderer.render("alpha beta", "alpha gamma"), "alpha <del>beta</del> <ins>gamma</ins>");

        let words = "w ".repeat(8_000);
        let other = "v ".repeat(8_000);
        assert!(renderer.try_render(&words, &other).is_err());
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape_markup(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }
}
