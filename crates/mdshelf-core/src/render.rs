//! Markdown to a typed node tree.
//!
//! [`render_document`] runs pulldown-cmark over the source with the GFM
//! extensions we support (tables, strikethrough, task lists, footnotes) and
//! folds its event stream into a [`Document`]. Bare URLs are turned into links
//! by a linkify pass, since pulldown-cmark has no autolink-literal extension.
//!
//! # Inline code vs fenced blocks
//!
//! The parser reports inline code and code blocks as different events, but the
//! viewer decides from the original source: the leading backtick run of the
//! node's span wins (three or more means a fenced block, one or two means
//! inline code). The parser's flag only decides when the span has no leading
//! backticks, as with indented blocks and `~~~` fences.

use std::ops::Range;
use std::sync::LazyLock;

use ammonia::Url;
use pulldown_cmark::{Alignment, CodeBlockKind, Event, Options, Parser, Tag};
use regex::Regex;

use crate::error::RenderError;

/// Maximum block/inline nesting accepted before falling back to raw text.
pub const MAX_NESTING_DEPTH: usize = 64;

/// `target` attribute for rendered links.
pub const LINK_TARGET: &str = "_blank";

/// `rel` attribute for rendered links (no opener, no referrer).
pub const LINK_REL: &str = "noopener noreferrer";

/// URL schemes allowed in link and image destinations. Relative URLs and
/// fragments resolve against an `https` base and are allowed too.
pub const SAFE_URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Base used to resolve relative destinations before the scheme check.
static RELATIVE_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("https://relative.invalid/").expect("base url is valid"));

/// Bare URL candidates for autolinking.
static BARE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:https?://|www\.)[^ \t\r\n<>]+").expect("bare url pattern is valid")
});

// =============================================================================
// Node Types
// =============================================================================

/// Discriminant of a [`Node`], used as the key of the view lookup table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Heading,
    Paragraph,
    BlockQuote,
    List,
    ListItem,
    TaskMarker,
    CodeBlock,
    InlineCode,
    Link,
    Image,
    Table,
    TableHead,
    TableRow,
    TableCell,
    Rule,
    Strong,
    Emphasis,
    Strikethrough,
    Text,
    SoftBreak,
    HardBreak,
    Html,
    FootnoteReference,
    FootnoteDefinition,
}

impl NodeKind {
    /// Every node kind.
    pub const ALL: [NodeKind; 24] = [
        Self::Heading,
        Self::Paragraph,
        Self::BlockQuote,
        Self::List,
        Self::ListItem,
        Self::TaskMarker,
        Self::CodeBlock,
        Self::InlineCode,
        Self::Link,
        Self::Image,
        Self::Table,
        Self::TableHead,
        Self::TableRow,
        Self::TableCell,
        Self::Rule,
        Self::Strong,
        Self::Emphasis,
        Self::Strikethrough,
        Self::Text,
        Self::SoftBreak,
        Self::HardBreak,
        Self::Html,
        Self::FootnoteReference,
        Self::FootnoteDefinition,
    ];
}

/// Table column alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl Align {
    /// CSS `text-align` value, if any.
    pub fn css(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Left => Some("left"),
            Self::Center => Some("center"),
            Self::Right => Some("right"),
        }
    }
}

impl From<Alignment> for Align {
    fn from(alignment: Alignment) -> Self {
        match alignment {
            Alignment::None => Self::None,
            Alignment::Left => Self::Left,
            Alignment::Center => Self::Center,
            Alignment::Right => Self::Right,
        }
    }
}

/// A fenced code block with its copy payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
    /// Class indicator (`language-xxx`) when the fence named a language
    pub class: Option<String>,
    /// Block text, without fences and without the trailing newline
    pub code: String,
}

impl CodeBlock {
    /// Language label parsed from the class indicator.
    pub fn language(&self) -> Option<&str> {
        self.class.as_deref().and_then(language_from_class)
    }

    /// Text written to the clipboard by the copy action.
    pub fn copy_payload(&self) -> &str {
        &self.code
    }
}

/// One node of a rendered document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Heading { level: u8, children: Vec<Node> },
    Paragraph(Vec<Node>),
    BlockQuote(Vec<Node>),
    List { start: Option<u64>, items: Vec<Node> },
    ListItem(Vec<Node>),
    TaskMarker(bool),
    CodeBlock(CodeBlock),
    InlineCode(String),
    Link { href: String, title: String, children: Vec<Node> },
    Image { src: String, title: String, alt: String },
    Table { alignments: Vec<Align>, children: Vec<Node> },
    TableHead(Vec<Node>),
    TableRow(Vec<Node>),
    TableCell { header: bool, align: Align, children: Vec<Node> },
    Rule,
    Strong(Vec<Node>),
    Emphasis(Vec<Node>),
    Strikethrough(Vec<Node>),
    Text(String),
    SoftBreak,
    HardBreak,
    Html(String),
    FootnoteReference(String),
    FootnoteDefinition { label: String, children: Vec<Node> },
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Heading { .. } => NodeKind::Heading,
            Self::Paragraph(_) => NodeKind::Paragraph,
            Self::BlockQuote(_) => NodeKind::BlockQuote,
            Self::List { .. } => NodeKind::List,
            Self::ListItem(_) => NodeKind::ListItem,
            Self::TaskMarker(_) => NodeKind::TaskMarker,
            Self::CodeBlock(_) => NodeKind::CodeBlock,
            Self::InlineCode(_) => NodeKind::InlineCode,
            Self::Link { .. } => NodeKind::Link,
            Self::Image { .. } => NodeKind::Image,
            Self::Table { .. } => NodeKind::Table,
            Self::TableHead(_) => NodeKind::TableHead,
            Self::TableRow(_) => NodeKind::TableRow,
            Self::TableCell { .. } => NodeKind::TableCell,
            Self::Rule => NodeKind::Rule,
            Self::Strong(_) => NodeKind::Strong,
            Self::Emphasis(_) => NodeKind::Emphasis,
            Self::Strikethrough(_) => NodeKind::Strikethrough,
            Self::Text(_) => NodeKind::Text,
            Self::SoftBreak => NodeKind::SoftBreak,
            Self::HardBreak => NodeKind::HardBreak,
            Self::Html(_) => NodeKind::Html,
            Self::FootnoteReference(_) => NodeKind::FootnoteReference,
            Self::FootnoteDefinition { .. } => NodeKind::FootnoteDefinition,
        }
    }

    /// Child nodes (empty for leaves).
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Heading { children, .. }
            | Self::Link { children, .. }
            | Self::Table { children, .. }
            | Self::TableCell { children, .. }
            | Self::FootnoteDefinition { children, .. }
            | Self::List {
                items: children, ..
            } => children,
            Self::Paragraph(children)
            | Self::BlockQuote(children)
            | Self::ListItem(children)
            | Self::TableHead(children)
            | Self::TableRow(children)
            | Self::Strong(children)
            | Self::Emphasis(children)
            | Self::Strikethrough(children) => children,
            _ => &[],
        }
    }

    /// Concatenated text content.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) | Self::InlineCode(text) | Self::Html(text) => out.push_str(text),
            Self::CodeBlock(block) => out.push_str(&block.code),
            Self::Image { alt, .. } => out.push_str(alt),
            Self::SoftBreak | Self::HardBreak => out.push(' '),
            _ => {
                for child in self.children() {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// A rendered markdown document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    /// Top-level block nodes
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first iterator over every node.
    pub fn walk(&self) -> impl Iterator<Item = &Node> {
        let mut stack: Vec<&Node> = self.nodes.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children().iter().rev());
            Some(node)
        })
    }

    /// All code blocks, in document order.
    pub fn code_blocks(&self) -> impl Iterator<Item = &CodeBlock> {
        self.walk().filter_map(|node| match node {
            Node::CodeBlock(block) => Some(block),
            _ => None,
        })
    }
}

// =============================================================================
// Code Classification
// =============================================================================

/// How a code span is displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CodeStyle {
    Block,
    Inline,
}

/// Length of the backtick run opening `span`, after up to three spaces of
/// fence indentation.
fn leading_backticks(span: &str) -> usize {
    let indent = span.bytes().take(3).take_while(|b| *b == b' ').count();
    span[indent..].bytes().take_while(|b| *b == b'`').count()
}

/// Decide inline vs block: the source span first, the parser's flag second.
fn classify_code(span: &str, parsed_as_block: bool) -> CodeStyle {
    match leading_backticks(span) {
        0 if parsed_as_block => CodeStyle::Block,
        0 => CodeStyle::Inline,
        1 | 2 => CodeStyle::Inline,
        _ => CodeStyle::Block,
    }
}

/// Extract `xxx` from a `language-xxx` class indicator.
pub fn language_from_class(class: &str) -> Option<&str> {
    class
        .split_whitespace()
        .find_map(|c| c.strip_prefix("language-"))
        .filter(|lang| !lang.is_empty())
}

/// Class indicator for a fence info string (`rust,ignore` -> `language-rust`).
fn class_for_info(info: &str) -> Option<String> {
    info.split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .next()
        .filter(|lang| !lang.is_empty())
        .map(|lang| format!("language-{}", lang))
}

/// Whether `url` may be used as a link or image destination.
///
/// The URL is resolved with the WHATWG parser, so case tricks and embedded
/// tabs or newlines (`JaVa\tScript:`) are normalized before the scheme is
/// compared.
pub fn is_safe_url(url: &str) -> bool {
    RELATIVE_BASE
        .join(url)
        .is_ok_and(|resolved| SAFE_URL_SCHEMES.contains(&resolved.scheme()))
}

// =============================================================================
// Tree Builder
// =============================================================================

enum FrameKind {
    Heading(u8),
    Paragraph,
    BlockQuote,
    List(Option<u64>),
    Item,
    CodeBlock { style: CodeStyle, class: Option<String> },
    Table(Vec<Align>),
    TableHead,
    TableRow,
    TableCell,
    Strong,
    Emphasis,
    Strikethrough,
    Link { href: String, title: String },
    Image { src: String, title: String },
    FootnoteDefinition(String),
    HtmlBlock,
    /// Tags we do not style; children are spliced into the parent.
    Transparent,
}

struct Frame {
    kind: FrameKind,
    children: Vec<Node>,
}

struct TreeBuilder<'a> {
    source: &'a str,
    root: Vec<Node>,
    stack: Vec<Frame>,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            root: Vec::new(),
            stack: Vec::new(),
        }
    }

    fn span(&self, range: &Range<usize>) -> &'a str {
        self.source.get(range.clone()).unwrap_or("")
    }

    fn children_mut(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(frame) => &mut frame.children,
            None => &mut self.root,
        }
    }

    /// Append a node, merging adjacent text.
    fn push(&mut self, node: Node) {
        let children = self.children_mut();
        if let Node::Text(text) = &node
            && let Some(Node::Text(prev)) = children.last_mut()
        {
            prev.push_str(text);
            return;
        }
        children.push(node);
    }

    fn open(&mut self, kind: FrameKind) -> Result<(), RenderError> {
        if self.stack.len() >= MAX_NESTING_DEPTH {
            return Err(RenderError::TooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        self.stack.push(Frame {
            kind,
            children: Vec::new(),
        });
        Ok(())
    }

    fn start(&mut self, tag: Tag<'_>, range: &Range<usize>) -> Result<(), RenderError> {
        let kind = match tag {
            Tag::Paragraph => FrameKind::Paragraph,
            Tag::Heading { level, .. } => FrameKind::Heading(level as u8),
            Tag::BlockQuote(_) => FrameKind::BlockQuote,
            Tag::CodeBlock(kind) => {
                let class = match &kind {
                    CodeBlockKind::Fenced(info) => class_for_info(info),
                    CodeBlockKind::Indented => None,
                };
                FrameKind::CodeBlock {
                    style: classify_code(self.span(range), true),
                    class,
                }
            }
            Tag::HtmlBlock => FrameKind::HtmlBlock,
            Tag::List(start) => FrameKind::List(start),
            Tag::Item => FrameKind::Item,
            Tag::FootnoteDefinition(label) => FrameKind::FootnoteDefinition(label.to_string()),
            Tag::Table(alignments) => {
                FrameKind::Table(alignments.into_iter().map(Align::from).collect())
            }
            Tag::TableHead => FrameKind::TableHead,
            Tag::TableRow => FrameKind::TableRow,
            Tag::TableCell => FrameKind::TableCell,
            Tag::Emphasis => FrameKind::Emphasis,
            Tag::Strong => FrameKind::Strong,
            Tag::Strikethrough => FrameKind::Strikethrough,
            Tag::Link {
                dest_url, title, ..
            } => FrameKind::Link {
                href: dest_url.to_string(),
                title: title.to_string(),
            },
            Tag::Image {
                dest_url, title, ..
            } => FrameKind::Image {
                src: dest_url.to_string(),
                title: title.to_string(),
            },
            _ => FrameKind::Transparent,
        };
        self.open(kind)
    }

    fn end(&mut self) -> Result<(), RenderError> {
        let frame = self.stack.pop().ok_or(RenderError::Unbalanced)?;
        let children = frame.children;

        let node = match frame.kind {
            FrameKind::Heading(level) => Node::Heading { level, children },
            FrameKind::Paragraph => Node::Paragraph(children),
            FrameKind::BlockQuote => Node::BlockQuote(children),
            FrameKind::List(start) => Node::List {
                start,
                items: children,
            },
            FrameKind::Item => Node::ListItem(children),
            FrameKind::CodeBlock { style, class } => {
                let text = concat_text(&children);
                let code = text.strip_suffix('\n').unwrap_or(&text).to_string();
                match style {
                    CodeStyle::Block => Node::CodeBlock(CodeBlock { class, code }),
                    CodeStyle::Inline => Node::InlineCode(code),
                }
            }
            FrameKind::Table(alignments) => Node::Table {
                alignments,
                children,
            },
            FrameKind::TableHead => Node::TableHead(children),
            FrameKind::TableRow => Node::TableRow(children),
            FrameKind::TableCell => {
                let (header, align) = self.cell_position();
                Node::TableCell {
                    header,
                    align,
                    children,
                }
            }
            FrameKind::Strong => Node::Strong(children),
            FrameKind::Emphasis => Node::Emphasis(children),
            FrameKind::Strikethrough => Node::Strikethrough(children),
            FrameKind::Link { href, title } if is_safe_url(&href) => Node::Link {
                href,
                title,
                children,
            },
            // Unsafe destination: keep the link text, drop the link
            FrameKind::Link { href, .. } => {
                log::debug!("dropping link with unsafe destination {:?}", href);
                for child in children {
                    self.push(child);
                }
                return Ok(());
            }
            FrameKind::Image { src, title } if is_safe_url(&src) => Node::Image {
                src,
                title,
                alt: concat_text(&children),
            },
            FrameKind::Image { src, .. } => {
                log::debug!("dropping image with unsafe source {:?}", src);
                Node::Text(concat_text(&children))
            }
            FrameKind::FootnoteDefinition(label) => Node::FootnoteDefinition { label, children },
            FrameKind::HtmlBlock => Node::Html(concat_text(&children)),
            FrameKind::Transparent => {
                for child in children {
                    self.push(child);
                }
                return Ok(());
            }
        };

        self.push(node);
        Ok(())
    }

    /// Header flag and alignment for the cell being closed, from its parent
    /// row and the enclosing table.
    fn cell_position(&self) -> (bool, Align) {
        let Some(parent) = self.stack.last() else {
            return (false, Align::None);
        };
        let header = matches!(parent.kind, FrameKind::TableHead);
        let column = parent.children.len();
        let align = self
            .stack
            .iter()
            .rev()
            .find_map(|frame| match &frame.kind {
                FrameKind::Table(alignments) => Some(alignments.get(column).copied().unwrap_or_default()),
                _ => None,
            })
            .unwrap_or_default();
        (header, align)
    }

    fn event(&mut self, event: Event<'_>, range: Range<usize>) -> Result<(), RenderError> {
        match event {
            Event::Start(tag) => self.start(tag, &range)?,
            Event::End(_) => self.end()?,
            Event::Text(text) => self.push(Node::Text(text.to_string())),
            Event::Code(code) => {
                let node = match classify_code(self.span(&range), false) {
                    CodeStyle::Inline => Node::InlineCode(code.to_string()),
                    CodeStyle::Block => Node::CodeBlock(CodeBlock {
                        class: None,
                        code: code.to_string(),
                    }),
                };
                self.push(node);
            }
            Event::Html(html) | Event::InlineHtml(html) => self.push(Node::Html(html.to_string())),
            Event::FootnoteReference(label) => {
                self.push(Node::FootnoteReference(label.to_string()))
            }
            Event::SoftBreak => self.push(Node::SoftBreak),
            Event::HardBreak => self.push(Node::HardBreak),
            Event::Rule => self.push(Node::Rule),
            Event::TaskListMarker(checked) => self.push(Node::TaskMarker(checked)),
            _ => {}
        }
        Ok(())
    }

    fn finish(self) -> Result<Document, RenderError> {
        if !self.stack.is_empty() {
            return Err(RenderError::Unbalanced);
        }
        Ok(Document {
            nodes: linkify(self.root),
        })
    }
}

fn concat_text(children: &[Node]) -> String {
    children.iter().map(Node::plain_text).collect()
}

// =============================================================================
// Autolinks
// =============================================================================

/// Trim trailing punctuation the way GFM autolink literals do.
fn trim_url(candidate: &str) -> &str {
    let mut url = candidate;
    loop {
        let Some(last) = url.chars().last() else {
            return url;
        };
        let trim = match last {
            '.' | ',' | ':' | ';' | '!' | '?' | '\'' | '"' | '*' | '_' | '~' => true,
            ')' => url.matches(')').count() > url.matches('(').count(),
            _ => false,
        };
        if !trim {
            return url;
        }
        url = &url[..url.len() - last.len_utf8()];
    }
}

/// Whether an autolink candidate names a host after its prefix, so that a
/// bare `https://` or `www.` stays text.
fn has_host(url: &str) -> bool {
    let rest = ["https://", "http://", "www."]
        .iter()
        .find_map(|prefix| url.strip_prefix(prefix))
        .unwrap_or(url);
    rest.chars().next().is_some_and(char::is_alphanumeric)
}

/// Split a text run into text and link nodes.
fn split_urls(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut cursor = 0;

    for m in BARE_URL.find_iter(text) {
        let url = trim_url(m.as_str());
        if !has_host(url) {
            continue;
        }
        if m.start() > cursor {
            nodes.push(Node::Text(text[cursor..m.start()].to_string()));
        }
        let href = if url.starts_with("www.") {
            format!("http://{}", url)
        } else {
            url.to_string()
        };
        nodes.push(Node::Link {
            href,
            title: String::new(),
            children: vec![Node::Text(url.to_string())],
        });
        cursor = m.start() + url.len();
    }

    if cursor == 0 {
        return vec![Node::Text(text.to_string())];
    }
    if cursor < text.len() {
        nodes.push(Node::Text(text[cursor..].to_string()));
    }
    nodes
}

/// Turn bare URLs in text into links, leaving existing links alone.
fn linkify(nodes: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Text(text) => out.extend(split_urls(&text)),
            Node::Heading { level, children } => out.push(Node::Heading {
                level,
                children: linkify(children),
            }),
            Node::Paragraph(children) => out.push(Node::Paragraph(linkify(children))),
            Node::BlockQuote(children) => out.push(Node::BlockQuote(linkify(children))),
            Node::List { start, items } => out.push(Node::List {
                start,
                items: linkify(items),
            }),
            Node::ListItem(children) => out.push(Node::ListItem(linkify(children))),
            Node::Table {
                alignments,
                children,
            } => out.push(Node::Table {
                alignments,
                children: linkify(children),
            }),
            Node::TableHead(children) => out.push(Node::TableHead(linkify(children))),
            Node::TableRow(children) => out.push(Node::TableRow(linkify(children))),
            Node::TableCell {
                header,
                align,
                children,
            } => out.push(Node::TableCell {
                header,
                align,
                children: linkify(children),
            }),
            Node::Strong(children) => out.push(Node::Strong(linkify(children))),
            Node::Emphasis(children) => out.push(Node::Emphasis(linkify(children))),
            Node::Strikethrough(children) => out.push(Node::Strikethrough(linkify(children))),
            Node::FootnoteDefinition { label, children } => out.push(Node::FootnoteDefinition {
                label,
                children: linkify(children),
            }),
            other => out.push(other),
        }
    }
    out
}

// =============================================================================
// Entry Point
// =============================================================================

/// Parser options: tables, strikethrough, task lists and footnotes.
fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

/// Render markdown source into a [`Document`].
///
/// Fails only on pathological input (nesting deeper than
/// [`MAX_NESTING_DEPTH`]) or an inconsistent event stream; callers show the
/// raw text in that case.
pub fn render_document(markdown: &str) -> Result<Document, RenderError> {
    let mut builder = TreeBuilder::new(markdown);
    for (event, range) in Parser::new_ext(markdown, parser_options()).into_offset_iter() {
        builder.event(event, range)?;
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(markdown: &str) -> Document {
        render_document(markdown).expect("render should succeed")
    }

    fn first_code_block(doc: &Document) -> &CodeBlock {
        doc.code_blocks().next().expect("document has a code block")
    }

    #[test]
    fn test_heading() {
        let doc = render("# Hi");
        let headings: Vec<_> = doc
            .nodes
            .iter()
            .filter(|n| matches!(n, Node::Heading { level: 1, .. }))
            .collect();
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].plain_text(), "Hi");
    }

    #[test]
    fn test_heading_levels() {
        let doc = render("## Two\n\n###### Six");
        assert!(matches!(doc.nodes[0], Node::Heading { level: 2, .. }));
        assert!(matches!(doc.nodes[1], Node::Heading { level: 6, .. }));
    }

    #[test]
    fn test_fenced_block_language_and_payload() {
        let doc = render("```python\nprint(1)\n```\n");
        let block = first_code_block(&doc);
        assert_eq!(block.class.as_deref(), Some("language-python"));
        assert_eq!(block.language(), Some("python"));
        assert_eq!(block.copy_payload(), "print(1)");
    }

    #[test]
    fn test_fenced_block_multiline_payload() {
        let doc = render("```rust\nfn main() {\n    println!(\"hi\");\n}\n```");
        assert_eq!(
            first_code_block(&doc).copy_payload(),
            "fn main() {\n    println!(\"hi\");\n}"
        );
    }

    #[test]
    fn test_fenced_block_without_language() {
        let doc = render("```\nplain\n```");
        let block = first_code_block(&doc);
        assert_eq!(block.language(), None);
        assert_eq!(block.copy_payload(), "plain");
    }

    #[test]
    fn test_info_string_attributes_are_ignored() {
        let doc = render("```rust,ignore\nlet x = 1;\n```");
        assert_eq!(first_code_block(&doc).language(), Some("rust"));
    }

    #[test]
    fn test_single_backtick_is_inline() {
        let doc = render("call `foo()` now");
        let Node::Paragraph(children) = &doc.nodes[0] else {
            panic!("expected paragraph");
        };
        assert!(children.contains(&Node::InlineCode("foo()".to_string())));
        assert_eq!(doc.code_blocks().count(), 0);
    }

    #[test]
    fn test_double_backtick_is_inline() {
        let doc = render("use ``a`b`` here");
        assert_eq!(doc.code_blocks().count(), 0);
        assert!(doc.walk().any(|n| n == &Node::InlineCode("a`b".to_string())));
    }

    #[test]
    fn test_triple_backtick_span_is_block() {
        // The source span opens with three backticks, which wins over the
        // parser's inline flag
        let doc = render("run ```make all``` first");
        assert_eq!(first_code_block(&doc).copy_payload(), "make all");
    }

    #[test]
    fn test_tilde_fence_falls_back_to_parser_flag() {
        let doc = render("~~~sh\nls\n~~~");
        let block = first_code_block(&doc);
        assert_eq!(block.language(), Some("sh"));
        assert_eq!(block.copy_payload(), "ls");
    }

    #[test]
    fn test_indented_block_falls_back_to_parser_flag() {
        let doc = render("para\n\n    indented code\n");
        assert_eq!(first_code_block(&doc).copy_payload(), "indented code");
    }

    #[test]
    fn test_classify_code() {
        assert_eq!(classify_code("`x`", false), CodeStyle::Inline);
        assert_eq!(classify_code("``x``", false), CodeStyle::Inline);
        assert_eq!(classify_code("```x```", false), CodeStyle::Block);
        assert_eq!(classify_code("  ```py\nx\n```", true), CodeStyle::Block);
        assert_eq!(classify_code("~~~\nx\n~~~", true), CodeStyle::Block);
        assert_eq!(classify_code("    x", true), CodeStyle::Block);
        assert_eq!(classify_code("x", false), CodeStyle::Inline);
    }

    #[test]
    fn test_language_from_class() {
        assert_eq!(language_from_class("language-go"), Some("go"));
        assert_eq!(language_from_class("hljs language-ts"), Some("ts"));
        assert_eq!(language_from_class("language-"), None);
        assert_eq!(language_from_class("plain"), None);
    }

    #[test]
    fn test_links_and_emphasis() {
        let doc = render("see [docs](https://example.com \"Docs\") and **bold** *em* ~~old~~");
        let link = doc
            .walk()
            .find(|n| n.kind() == NodeKind::Link)
            .expect("link");
        let Node::Link { href, title, .. } = link else {
            unreachable!();
        };
        assert_eq!(href, "https://example.com");
        assert_eq!(title, "Docs");
        assert_eq!(link.plain_text(), "docs");

        for kind in [NodeKind::Strong, NodeKind::Emphasis, NodeKind::Strikethrough] {
            assert!(doc.walk().any(|n| n.kind() == kind), "missing {:?}", kind);
        }
    }

    #[test]
    fn test_bare_url_autolink() {
        let doc = render("visit https://example.com/path. Thanks");
        let links: Vec<_> = doc.walk().filter(|n| n.kind() == NodeKind::Link).collect();
        assert_eq!(links.len(), 1);
        let Node::Link { href, .. } = links[0] else {
            unreachable!();
        };
        assert_eq!(href, "https://example.com/path");
        assert_eq!(doc.nodes[0].plain_text(), "visit https://example.com/path. Thanks");
    }

    #[test]
    fn test_www_autolink() {
        let doc = render("(see www.example.com)");
        let Some(Node::Link { href, .. }) = doc.walk().find(|n| n.kind() == NodeKind::Link) else {
            panic!("expected link");
        };
        assert_eq!(href, "http://www.example.com");
    }

    #[test]
    fn test_no_autolink_inside_code() {
        let doc = render("`https://example.com`\n\n```\nhttps://example.com\n```");
        assert!(doc.walk().all(|n| n.kind() != NodeKind::Link));
    }

    #[test]
    fn test_trim_url() {
        assert_eq!(trim_url("https://a.com/x."), "https://a.com/x");
        assert_eq!(trim_url("https://a.com/(x)"), "https://a.com/(x)");
        assert_eq!(trim_url("https://a.com/x)"), "https://a.com/x");
        assert_eq!(trim_url("https://a.com/x?!"), "https://a.com/x");
    }

    #[test]
    fn test_lists_and_tasks() {
        let doc = render("3. three\n4. four\n\n- [x] done\n- [ ] todo\n");
        let Node::List { start, items } = &doc.nodes[0] else {
            panic!("expected ordered list");
        };
        assert_eq!(*start, Some(3));
        assert_eq!(items.len(), 2);

        let markers: Vec<_> = doc
            .walk()
            .filter_map(|n| match n {
                Node::TaskMarker(checked) => Some(*checked),
                _ => None,
            })
            .collect();
        assert_eq!(markers, [true, false]);
    }

    #[test]
    fn test_table_alignment_and_header() {
        let doc = render("| a | b |\n|:--|--:|\n| 1 | 2 |\n");
        let cells: Vec<_> = doc
            .walk()
            .filter_map(|n| match n {
                Node::TableCell { header, align, .. } => Some((*header, *align, n.plain_text())),
                _ => None,
            })
            .collect();
        assert_eq!(
            cells,
            [
                (true, Align::Left, "a".to_string()),
                (true, Align::Right, "b".to_string()),
                (false, Align::Left, "1".to_string()),
                (false, Align::Right, "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_blockquote_rule_and_image() {
        let doc = render("> quoted\n\n---\n\n![alt text](img.png \"T\")");
        assert_eq!(doc.nodes[0].kind(), NodeKind::BlockQuote);
        assert_eq!(doc.nodes[1], Node::Rule);
        let Some(Node::Image { src, alt, title }) =
            doc.walk().find(|n| n.kind() == NodeKind::Image)
        else {
            panic!("expected image");
        };
        assert_eq!(src, "img.png");
        assert_eq!(alt, "alt text");
        assert_eq!(title, "T");
    }

    #[test]
    fn test_footnotes() {
        let doc = render("Claim[^1].\n\n[^1]: Source.\n");
        assert!(doc
            .walk()
            .any(|n| n == &Node::FootnoteReference("1".to_string())));
        assert!(doc
            .walk()
            .any(|n| n.kind() == NodeKind::FootnoteDefinition));
    }

    #[test]
    fn test_raw_html_is_kept_as_text() {
        let doc = render("<script>alert(1)</script>\n");
        assert!(doc
            .walk()
            .any(|n| matches!(n, Node::Html(html) if html.contains("<script>"))));
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let markdown = ">".repeat(MAX_NESTING_DEPTH + 8) + " deep";
        assert_eq!(
            render_document(&markdown),
            Err(RenderError::TooDeep {
                limit: MAX_NESTING_DEPTH
            })
        );
    }

    #[test]
    fn test_empty_document() {
        assert!(render("").is_empty());
    }

    #[test]
    fn test_unsafe_link_destinations_are_dropped() {
        for markdown in [
            "[click](javascript:alert(document.cookie))",
            "[click](JavaScript:alert(1))",
            "[click](<java\tscript:alert(1)>)",
            "[click](vbscript:msgbox(1))",
            "[click](data:text/html;base64,PHNjcmlwdD4=)",
        ] {
            let doc = render(markdown);
            assert!(
                doc.walk().all(|n| n.kind() != NodeKind::Link),
                "link kept for {}",
                markdown
            );
            assert_eq!(doc.nodes[0].plain_text(), "click");
        }
    }

    #[test]
    fn test_unsafe_image_source_becomes_alt_text() {
        let doc = render("![pic](javascript:alert(1))");
        assert!(doc.walk().all(|n| n.kind() != NodeKind::Image));
        assert_eq!(doc.nodes[0].plain_text(), "pic");
    }

    #[test]
    fn test_safe_link_destinations_are_kept() {
        let doc = render(
            "[a](https://example.com) [b](http://example.com) [c](mailto:me@example.com) \
             [d](docs/intro.md) [e](#usage) [f](/abs/path) [g](//cdn.example.com/x)",
        );
        let hrefs: Vec<_> = doc
            .walk()
            .filter_map(|n| match n {
                Node::Link { href, .. } => Some(href.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            hrefs,
            [
                "https://example.com",
                "http://example.com",
                "mailto:me@example.com",
                "docs/intro.md",
                "#usage",
                "/abs/path",
                "//cdn.example.com/x",
            ]
        );
    }

    #[test]
    fn test_is_safe_url() {
        assert!(is_safe_url("https://example.com"));
        assert!(is_safe_url("HTTPS://example.com"));
        assert!(is_safe_url("#top"));
        assert!(is_safe_url("img.png"));
        assert!(!is_safe_url("javascript:void(0)"));
        assert!(!is_safe_url(" javascript:void(0)"));
        assert!(!is_safe_url("vbscript:x"));
        assert!(!is_safe_url("data:image/png;base64,AAAA"));
        assert!(!is_safe_url("file:///etc/passwd"));
    }

    #[test]
    fn test_scheme_without_host_is_not_linked() {
        for text in ["see https://. ok", "see http:// ok", "see www. ok", "https://"] {
            let doc = render(text);
            assert!(
                doc.walk().all(|n| n.kind() != NodeKind::Link),
                "linked {:?}",
                text
            );
        }
        assert!(has_host("https://a"));
        assert!(!has_host("https://"));
        assert!(!has_host("https://."));
    }

    #[test]
    fn test_links_open_in_new_context_without_opener() {
        assert_eq!(LINK_TARGET, "_blank");
        let rel: Vec<_> = LINK_REL.split(' ').collect();
        assert!(rel.contains(&"noopener"));
        assert!(rel.contains(&"noreferrer"));
    }

    #[test]
    fn test_all_kinds_listed_once() {
        let kinds: std::collections::HashSet<_> = NodeKind::ALL.into_iter().collect();
        assert_eq!(kinds.len(), NodeKind::ALL.len());
    }
}
