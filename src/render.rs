//! Markdown to [`RenderedPage`], by way of comrak.

use std::fmt::Write;

use comrak::html::{dangerous_url, render_sourcepos};
use comrak::nodes::NodeValue;
use comrak::options::Options;
use comrak::{create_formatter, parse_document, Arena};
use tracing::debug;

use crate::error::Error;
use crate::page::{RenderedPage, Style};
use crate::title::extract_title;
use crate::token::tokenize;

/// How a document should be rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Stylesheet to embed.
    pub style: Style,

    /// Produce XHTML: raw HTML in the source is omitted instead of passed
    /// through. Void elements are always self-closed.
    pub xhtml: bool,
}

/// The comrak options used for `options`.
///
/// Tables, strikethrough, autolinks and task lists are on, as is smart
/// punctuation.
pub fn comrak_options(options: &RenderOptions) -> Options<'static> {
    let mut comrak = Options::default();

    let ext = &mut comrak.extension;
    ext.table = true;
    ext.strikethrough = true;
    ext.autolink = true;
    ext.tasklist = true;

    comrak.parse.smart = true;
    comrak.render.r#unsafe = !options.xhtml;

    comrak
}

create_formatter!(NofollowFormatter, {
    // As comrak's own link rendering, plus `rel="nofollow"`.
    NodeValue::Link(ref link) => |context, node, entering| {
        if entering {
            context.write_str("<a")?;
            render_sourcepos(context, node)?;
            context.write_str(" href=\"")?;
            if context.options.render.r#unsafe || !dangerous_url(&link.url) {
                context.escape_href(&link.url)?;
            }
            if !link.title.is_empty() {
                context.write_str("\" title=\"")?;
                context.escape(&link.title)?;
            }
            context.write_str("\" rel=\"nofollow\">")?;
        } else {
            context.write_str("</a>")?;
        }
    },
});

/// Parses `markdown` and renders it into a page, titled after its first
/// heading. Every link is marked `rel="nofollow"`.
pub fn render(markdown: &str, options: &RenderOptions) -> Result<RenderedPage, Error> {
    let comrak = comrak_options(options);
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &comrak);

    let tokens = tokenize(root);
    let title = extract_title(&tokens);
    debug!(tokens = tokens.len(), %title, "parsed document");

    let mut body = String::with_capacity(markdown.len() * 3 / 2);
    NofollowFormatter::format_document(root, &comrak, &mut body)?;

    Ok(RenderedPage::new(options.style, title, body))
}
