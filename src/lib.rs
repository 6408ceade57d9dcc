//! Render a Markdown document as a standalone, styled HTML page and surface
//! it: open it in the platform's default viewer when attached to a terminal,
//! or hand the page (or its path) down a pipe otherwise.
//!
//! Parsing is done by [comrak]. This crate contributes the page template and
//! stylesheets, extraction of a title from the parsed document, and the
//! routing policy that decides where the page goes.
//!
//! ```
//! use mdview::{render, RenderOptions, Style};
//!
//! let options = RenderOptions {
//!     style: Style::Bare,
//!     xhtml: false,
//! };
//! let page = render("# Hello *world*\n\nBody.\n", &options).unwrap();
//! assert_eq!(page.title(), "Hello world");
//! assert!(page.materialize().contains("<title>Hello world</title>"));
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub mod page;
pub mod render;
pub mod router;
pub mod scratch;
pub mod title;
pub mod token;

pub use error::{
    Error, EXIT_LAUNCH_VIEWER, EXIT_PARSE_CONFIG, EXIT_READ_INPUT, EXIT_RENDER, EXIT_SUCCESS,
    EXIT_USAGE, EXIT_WRITE_OUTPUT,
};
pub use page::{RenderedPage, Style};
pub use render::{render, RenderOptions};
pub use router::{route, OutputCapability, OutputTarget, SystemViewer, Viewer};
pub use scratch::{scratch_file, ScratchDir};
pub use title::{extract_title, text_of};
pub use token::{tokenize, Token};
