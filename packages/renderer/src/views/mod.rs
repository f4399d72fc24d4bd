mod content;
mod forms;
mod layout;
mod media;

pub use content::{ButtonView, ImageView, TextView};
pub use forms::{BookingFormView, ContactFormView};
pub use layout::{ColumnView, ContainerView, HeroView, SpacerView};
pub use media::PartySliderView;

use crate::vdom::VNode;
use pagecraft_blocks::{prop_f64, prop_str, Props};
use std::collections::HashMap;

/// Turns one block's props (and its already rendered children) into markup
pub trait BlockView: Send + Sync {
    /// Block type this view renders
    fn block_type(&self) -> &'static str;

    /// Build the element for a node. Leaf blocks receive no children.
    fn render(&self, props: &Props, children: Vec<VNode>) -> VNode;
}

/// Registry of block views, keyed by block type
pub struct ViewRegistry {
    views: HashMap<&'static str, Box<dyn BlockView>>,
}

impl ViewRegistry {
    /// Create a new registry with all built-in views
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.add_view(Box::new(ContainerView));
        registry.add_view(Box::new(TextView));
        registry.add_view(Box::new(ButtonView));
        registry.add_view(Box::new(ImageView));
        registry.add_view(Box::new(HeroView));
        registry.add_view(Box::new(ColumnView));
        registry.add_view(Box::new(SpacerView));
        registry.add_view(Box::new(ContactFormView));
        registry.add_view(Box::new(PartySliderView));
        registry.add_view(Box::new(BookingFormView));
        registry
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            views: HashMap::new(),
        }
    }

    /// Add a view, replacing any view for the same block type
    pub fn add_view(&mut self, view: Box<dyn BlockView>) {
        self.views.insert(view.block_type(), view);
    }

    pub fn get(&self, block_type: &str) -> Option<&dyn BlockView> {
        self.views.get(block_type).map(|view| view.as_ref())
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewRegistry")
            .field("views", &format!("{} views", self.views.len()))
            .finish()
    }
}

/// Wrapper used for blocks that are registered but have no view
pub fn generic_view(block_type: &str, children: Vec<VNode>) -> VNode {
    VNode::element("div")
        .with_attr("class", class_for(block_type))
        .with_children(children)
}

/// `pc-<block type in kebab case>`
pub(crate) fn class_for(block_type: &str) -> String {
    let mut class = String::from("pc-");
    for (i, ch) in block_type.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                class.push('-');
            }
            class.push(ch.to_ascii_lowercase());
        } else {
            class.push(ch);
        }
    }
    class
}

/// CSS length from a prop: numbers are pixels, strings pass through
pub(crate) fn length(props: &Props, key: &str) -> Option<String> {
    match props.get(key)? {
        serde_json::Value::Number(_) => prop_f64(props, key).map(px),
        serde_json::Value::String(s) if s.trim().parse::<f64>().is_ok() => prop_f64(props, key).map(px),
        serde_json::Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn px(value: f64) -> String {
    format!("{}px", value)
}

pub(crate) fn text_prop(props: &Props, key: &str) -> Option<String> {
    prop_str(props, key).map(str::to_string)
}

const SAFE_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// URL prop usable as `href`/`src`: relative, or one of [`SAFE_SCHEMES`].
/// `javascript:`, `data:` and other schemes yield `None`.
pub(crate) fn url_prop<'a>(props: &'a Props, key: &str) -> Option<&'a str> {
    prop_str(props, key).and_then(safe_url)
}

pub(crate) fn safe_url(url: &str) -> Option<&str> {
    let url = url.trim();
    // Browsers skip tabs and newlines inside a scheme ("java\tscript:")
    let compact: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect();

    match compact.find([':', '/', '?', '#']) {
        Some(end) if compact[end..].starts_with(':') => {
            let scheme = compact[..end].to_ascii_lowercase();
            SAFE_SCHEMES.contains(&scheme.as_str()).then_some(url)
        }
        _ => Some(url),
    }
}

/// CSS `url("...")` with the address escaped as a CSS string
pub(crate) fn css_url(url: &str) -> String {
    let mut out = String::from("url(\"");
    for ch in url.chars() {
        match ch {
            '"' | '\'' | '\\' | '(' | ')' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' | '\r' | '\u{c}' => out.push_str(&format!("\\{:x} ", ch as u32)),
            _ => out.push(ch),
        }
    }
    out.push_str("\")");
    out
}
