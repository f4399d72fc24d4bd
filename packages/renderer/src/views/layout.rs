use super::{class_for, css_url, length, text_prop, url_prop, BlockView};
use crate::vdom::VNode;
use pagecraft_blocks::{prop_str, Props};

/// Flex box that lays out its children in a row or column
pub struct ContainerView;

impl BlockView for ContainerView {
    fn block_type(&self) -> &'static str {
        "Container"
    }

    fn render(&self, props: &Props, children: Vec<VNode>) -> VNode {
        VNode::element("div")
            .with_attr("class", class_for(self.block_type()))
            .with_style("display", "flex")
            .with_style_opt("flex-direction", text_prop(props, "flexDirection"))
            .with_style_opt("align-items", text_prop(props, "alignItems"))
            .with_style_opt("gap", length(props, "gap"))
            .with_style_opt("padding", length(props, "padding"))
            .with_style_opt("background", text_prop(props, "background"))
            .with_children(children)
    }
}

pub struct ColumnView;

impl BlockView for ColumnView {
    fn block_type(&self) -> &'static str {
        "Column"
    }

    fn render(&self, props: &Props, children: Vec<VNode>) -> VNode {
        VNode::element("div")
            .with_attr("class", class_for(self.block_type()))
            .with_style_opt("width", length(props, "width"))
            .with_style_opt("padding", length(props, "padding"))
            .with_children(children)
    }
}

/// Full-width banner: headline, subtitle, then whatever was dropped into it
pub struct HeroView;

impl BlockView for HeroView {
    fn block_type(&self) -> &'static str {
        "Hero"
    }

    fn render(&self, props: &Props, children: Vec<VNode>) -> VNode {
        let background = url_prop(props, "backgroundImage")
            .filter(|src| !src.is_empty())
            .map(|src| format!("{} center / cover no-repeat", css_url(src)));

        let section = VNode::element("section")
            .with_attr("class", class_for(self.block_type()))
            .with_style_opt("min-height", length(props, "minHeight"))
            .with_style_opt("text-align", text_prop(props, "textAlign"))
            .with_style_opt("background", background);

        let mut inner = VNode::element("div")
            .with_attr("class", "pc-hero-overlay")
            .with_style_opt("background", text_prop(props, "overlayColor"));
        if let Some(title) = prop_str(props, "title").filter(|t| !t.is_empty()) {
            inner = inner.with_child(VNode::element("h1").with_child(VNode::text(title)));
        }
        if let Some(subtitle) = prop_str(props, "subtitle").filter(|t| !t.is_empty()) {
            inner = inner.with_child(VNode::element("p").with_child(VNode::text(subtitle)));
        }

        section.with_child(inner.with_children(children))
    }
}

pub struct SpacerView;

impl BlockView for SpacerView {
    fn block_type(&self) -> &'static str {
        "Spacer"
    }

    fn render(&self, props: &Props, _children: Vec<VNode>) -> VNode {
        VNode::element("div")
            .with_attr("class", class_for(self.block_type()))
            .with_attr("aria-hidden", "true")
            .with_style_opt("height", length(props, "height"))
    }
}
