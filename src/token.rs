//! The flat token stream a parsed document is read through.
//!
//! comrak hands back a tree of arena-allocated nodes. The title logic works
//! over an ordered stream instead: headings become an open/close pair around
//! one [`Token::Inline`] holding the heading's content, and every node kind
//! the title logic has no use for collapses into [`Token::Other`].

use std::mem;

use comrak::arena_tree::NodeEdge;
use comrak::nodes::{AstNode, NodeValue};

/// One entry in a document's token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Token {
    /// Start of a heading.
    HeadingOpen {
        /// 1 to 6 for ATX headings, 1 or 2 for setext headings.
        level: u8,
    },

    /// End of the heading opened at the same level.
    HeadingClose {
        /// Level of the heading being closed.
        level: u8,
    },

    /// Literal text.
    Text(String),

    /// Inline content, in document order.
    Inline(Vec<Token>),

    /// Anything else: block markers, images, code spans, raw HTML, breaks.
    Other,
}

impl Drop for Token {
    fn drop(&mut self) {
        // Unnest before dropping so deep inline nesting does not recurse.
        if let Token::Inline(ref mut children) = *self {
            let mut pending = mem::take(children);
            while let Some(mut token) = pending.pop() {
                if let Token::Inline(ref mut nested) = token {
                    pending.append(nested);
                }
            }
        }
    }
}

/// Flattens the document rooted at `root` into its token stream.
///
/// The tree is walked with [`Node::traverse`](comrak::arena_tree::Node::traverse),
/// so nesting depth costs heap, not stack.
pub fn tokenize<'a>(root: &'a AstNode<'a>) -> Vec<Token> {
    let mut flattener = Flattener::default();
    for child in root.children() {
        for edge in child.traverse() {
            match edge {
                NodeEdge::Start(node) => flattener.enter(node),
                NodeEdge::End(_) => flattener.leave(),
            }
        }
    }
    flattener.tokens
}

/// What to do when the walk leaves a node.
#[derive(Debug, Clone, Copy)]
enum Frame {
    /// A heading: close its span, then the heading.
    Heading(u8),
    /// A paragraph or table cell: close its span, then the block.
    InlineBlock,
    /// A block holding other blocks.
    Container,
    /// An inline node with children: close its span.
    Span,
    /// Nothing to close.
    Leaf,
    /// An image or anything inside one.
    Opaque,
}

#[derive(Default)]
struct Flattener {
    tokens: Vec<Token>,
    spans: Vec<Vec<Token>>,
    frames: Vec<Frame>,
}

impl Flattener {
    fn enter<'a>(&mut self, node: &'a AstNode<'a>) {
        if let Some(Frame::Opaque) = self.frames.last() {
            self.frames.push(Frame::Opaque);
            return;
        }

        let in_span = !self.spans.is_empty();
        let ast = node.data.borrow();
        let frame = match ast.value {
            NodeValue::Heading(ref heading) => {
                self.emit(Token::HeadingOpen {
                    level: heading.level,
                });
                self.spans.push(Vec::new());
                Frame::Heading(heading.level)
            }
            NodeValue::Paragraph | NodeValue::TableCell => {
                self.emit(Token::Other);
                self.spans.push(Vec::new());
                Frame::InlineBlock
            }
            NodeValue::Text(ref text) if in_span => {
                self.emit(Token::Text(text.to_string()));
                Frame::Leaf
            }
            // Alt text is not part of the visible heading.
            NodeValue::Image(..) if in_span => {
                self.emit(Token::Other);
                Frame::Opaque
            }
            _ if node.first_child().is_some() => {
                if in_span {
                    self.spans.push(Vec::new());
                    Frame::Span
                } else {
                    self.emit(Token::Other);
                    Frame::Container
                }
            }
            _ => {
                self.emit(Token::Other);
                Frame::Leaf
            }
        };
        self.frames.push(frame);
    }

    fn leave(&mut self) {
        let frame = match self.frames.pop() {
            Some(frame) => frame,
            None => return,
        };

        match frame {
            Frame::Heading(level) => {
                self.close_span();
                self.emit(Token::HeadingClose { level });
            }
            Frame::InlineBlock => {
                self.close_span();
                self.emit(Token::Other);
            }
            Frame::Span => self.close_span(),
            Frame::Container => self.emit(Token::Other),
            Frame::Leaf | Frame::Opaque => {}
        }
    }

    fn close_span(&mut self) {
        let span = self.spans.pop().unwrap_or_default();
        self.emit(Token::Inline(span));
    }

    /// Appends to the innermost open span, or to the stream at block level.
    fn emit(&mut self, token: Token) {
        match self.spans.last_mut() {
            Some(span) => span.push(token),
            None => self.tokens.push(token),
        }
    }
}
