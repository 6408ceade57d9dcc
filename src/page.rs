//! The standalone page a document is rendered into.

use html_escape::encode_text;

const LIGHT_CSS: &str = include_str!("style/light.css");
const DARK_CSS: &str = include_str!("style/dark.css");

/// The stylesheet embedded in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// No stylesheet at all.
    Bare,
    /// GitHub-like light stylesheet.
    #[default]
    Light,
    /// The light stylesheet's layout on a dark palette.
    Dark,
}

impl Style {
    /// Picks the style for the `--bare` and `--dark` flags. Dark wins when
    /// both are given.
    pub fn from_flags(bare: bool, dark: bool) -> Style {
        if dark {
            Style::Dark
        } else if bare {
            Style::Bare
        } else {
            Style::Light
        }
    }

    /// The CSS placed in the page's `<style>` element.
    pub fn css(self) -> &'static str {
        match self {
            Style::Bare => "",
            Style::Light => LIGHT_CSS,
            Style::Dark => DARK_CSS,
        }
    }
}

/// A rendered document, ready to be placed into the page template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    style: Style,
    title: String,
    body: String,
}

impl RenderedPage {
    /// Assembles a page from its parts. `title` is plain text; `body` is HTML.
    pub fn new(style: Style, title: String, body: String) -> RenderedPage {
        RenderedPage { style, title, body }
    }

    /// The page's style.
    pub fn style(&self) -> Style {
        self.style
    }

    /// The page's title, as plain text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The rendered document body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The complete HTML document.
    pub fn materialize(&self) -> String {
        let css = self.style.css();
        let title = encode_text(&self.title);

        let mut html = String::with_capacity(css.len() + title.len() + self.body.len() + 256);
        html.push_str("<!DOCTYPE html><html><head>");
        html.push_str("<meta http-equiv=\"content-type\" content=\"text/html; charset=utf-8\"> ");
        html.push_str("<style>");
        html.push_str(css);
        html.push_str("</style><title>");
        html.push_str(&title);
        html.push_str("</title></head><body class=\"markdown-body\">");
        html.push_str(&self.body);
        html.push_str("</body></html>");
        html
    }
}
