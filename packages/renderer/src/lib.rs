//! # Pagecraft Renderer
//!
//! Turns a page document into a virtual DOM, and the virtual DOM into HTML.
//!
//! ```text
//! Document ──Renderer──▶ VNode ──to_html──▶ HTML
//! ```
//!
//! Each block type has a [`BlockView`]. Blocks without a view render as a
//! plain `div`; blocks the registry no longer knows render as a placeholder
//! and the rest of the page carries on.

mod html;
mod renderer;
mod vdom;
pub mod views;

pub use html::{render_page, to_html, HtmlOptions};
pub use renderer::{PlaceholderSlot, RenderError, RenderOptions, RenderOutput, Renderer};
pub use vdom::VNode;
pub use views::{BlockView, ViewRegistry};
