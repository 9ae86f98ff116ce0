//! Markdown document tree built on pulldown-cmark.
//!
//! pulldown-cmark produces a flat event stream. The survey wants a tree, so
//! start/end events are folded into [`Node`]s. Only the node kinds that some
//! classifier inspects get their own variant; every other block or inline
//! container becomes [`NodeKind::Container`] so its children stay reachable.

mod walk;

pub use walk::Descendants;

use once_cell::sync::Lazy;
use pulldown_cmark::{CodeBlockKind, Event, LinkType, Options, Parser, Tag, TagEnd};
use regex::Regex;

/// Node kinds relevant to classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root.
    Document,
    /// Any other block or inline container.
    Container,
    /// Inline image.
    Image { url: String },
    /// Inline link (not an image).
    Link { url: String },
    /// Raw HTML block.
    HtmlBlock { raw: String },
    /// Fenced code block with its language label.
    FencedCode { info: String },
    /// Table.
    Table,
    /// Emphasis span (`*`, `_`) or strikethrough (`~`).
    Emphasis { delimiter: char },
}

/// A node in a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: NodeKind, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// All nodes below this one, in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(self)
    }
}

// Deep block quotes and lists nest thousands of levels; the default drop
// would recurse once per level.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// A parsed markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Node,
}

impl Document {
    /// Parse markdown source with the GitHub-flavored extensions enabled.
    ///
    /// Parsing never fails: any input produces some tree.
    pub fn parse(source: &str) -> Self {
        let mut stack = vec![Node::new(NodeKind::Document)];
        // Text runs are split around inline markup, so bare links are found
        // once a run is complete.
        let mut text = String::new();
        // Open links, images and code blocks, whose text is never autolinked.
        let mut literal_depth = 0usize;

        for (event, range) in Parser::new_ext(source, parse_options()).into_offset_iter() {
            if let Event::Text(chunk) = &event {
                if literal_depth == 0 {
                    text.push_str(chunk);
                }
                continue;
            }
            flush_bare_links(&mut text, &mut stack);

            match event {
                Event::Start(tag) => {
                    if matches!(tag, Tag::Link { .. } | Tag::Image { .. } | Tag::CodeBlock(_)) {
                        literal_depth += 1;
                    }
                    let delimiter = source.get(range.start..).and_then(|s| s.chars().next());
                    stack.push(Node::new(node_kind(tag, delimiter)));
                }
                Event::End(tag) => {
                    if matches!(tag, TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock) {
                        literal_depth = literal_depth.saturating_sub(1);
                    }
                    // The root stays on the stack.
                    if stack.len() > 1 {
                        if let Some(node) = stack.pop() {
                            if let Some(parent) = stack.last_mut() {
                                parent.children.push(node);
                            }
                        }
                    }
                }
                Event::Html(html) => {
                    if let Some(Node {
                        kind: NodeKind::HtmlBlock { raw },
                        ..
                    }) = stack.last_mut()
                    {
                        raw.push_str(&html);
                    }
                }
                _ => {}
            }
        }
        flush_bare_links(&mut text, &mut stack);

        // Close anything left open so no subtree is lost.
        while stack.len() > 1 {
            if let Some(node) = stack.pop() {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(node);
                }
            }
        }

        let root = stack
            .pop()
            .unwrap_or_else(|| Node::new(NodeKind::Document));
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// All nodes in the document, in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        self.root.descendants()
    }
}

fn parse_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

fn node_kind(tag: Tag<'_>, delimiter: Option<char>) -> NodeKind {
    match tag {
        Tag::Image { dest_url, .. } => NodeKind::Image {
            url: dest_url.into_string(),
        },
        Tag::Link {
            link_type: LinkType::Email,
            dest_url,
            ..
        } if !dest_url.starts_with("mailto:") => NodeKind::Link {
            url: format!("mailto:{dest_url}"),
        },
        Tag::Link { dest_url, .. } => NodeKind::Link {
            url: dest_url.into_string(),
        },
        Tag::HtmlBlock => NodeKind::HtmlBlock { raw: String::new() },
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => NodeKind::FencedCode {
            info: fence_label(&info).to_string(),
        },
        Tag::Table(_) => NodeKind::Table,
        Tag::Strikethrough => NodeKind::Emphasis { delimiter: '~' },
        Tag::Emphasis | Tag::Strong => match delimiter {
            Some(delimiter) => NodeKind::Emphasis { delimiter },
            None => NodeKind::Container,
        },
        _ => NodeKind::Container,
    }
}

/// Language label of a fence info string: its first word.
fn fence_label(info: &str) -> &str {
    info.split_whitespace().next().unwrap_or("")
}

/// `ftp://` and `mailto:` URIs written as plain text. http(s) never counts
/// as special, so bare web addresses are left alone.
static BARE_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:ftp://|mailto:)[^\s<>()\[\]]+").expect("valid bare link pattern")
});

/// Append a link node under the innermost open node for each bare link in
/// `text`, then clear it.
fn flush_bare_links(text: &mut String, stack: &mut [Node]) {
    if text.is_empty() {
        return;
    }
    if let Some(parent) = stack.last_mut() {
        for m in BARE_LINK.find_iter(text.as_str()) {
            let url = m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?', '\'', '"']);
            parent.children.push(Node::new(NodeKind::Link {
                url: url.to_string(),
            }));
        }
    }
    text.clear();
}
