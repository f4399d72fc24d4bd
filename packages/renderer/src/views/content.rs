use super::{class_for, length, text_prop, url_prop, BlockView};
use crate::vdom::VNode;
use pagecraft_blocks::{prop_str, Props};

const TEXT_TAGS: [&str; 8] = ["p", "h1", "h2", "h3", "h4", "h5", "h6", "span"];

pub struct TextView;

impl BlockView for TextView {
    fn block_type(&self) -> &'static str {
        "Text"
    }

    fn render(&self, props: &Props, _children: Vec<VNode>) -> VNode {
        // Unknown tags fall back to a paragraph
        let tag = prop_str(props, "tag")
            .filter(|tag| TEXT_TAGS.contains(tag))
            .unwrap_or("p");

        VNode::element(tag)
            .with_attr("class", class_for(self.block_type()))
            .with_style_opt("font-size", length(props, "fontSize"))
            .with_style_opt("font-weight", weight(props))
            .with_style_opt("text-align", text_prop(props, "textAlign"))
            .with_style_opt("color", text_prop(props, "color"))
            .with_child(VNode::text(prop_str(props, "text").unwrap_or_default()))
    }
}

fn weight(props: &Props) -> Option<String> {
    match props.get("fontWeight")? {
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

pub struct ButtonView;

impl BlockView for ButtonView {
    fn block_type(&self) -> &'static str {
        "Button"
    }

    fn render(&self, props: &Props, _children: Vec<VNode>) -> VNode {
        let base = class_for(self.block_type());
        let mut class = base.clone();
        for key in ["variant", "size"] {
            if let Some(value) = prop_str(props, key) {
                class.push_str(&format!(" {}-{}", base, value));
            }
        }

        let outline = prop_str(props, "variant") == Some("outline");
        let background = text_prop(props, "background");
        let mut node = VNode::element("a")
            .with_attr("class", class)
            .with_attr("href", url_prop(props, "href").unwrap_or("#"));

        node = if outline {
            node.with_style("background", "transparent")
                .with_style_opt("border-color", background.clone())
                .with_style_opt("color", background)
        } else {
            node.with_style_opt("background", background)
                .with_style_opt("color", text_prop(props, "color"))
        };

        node.with_child(VNode::text(prop_str(props, "text").unwrap_or_default()))
    }
}

pub struct ImageView;

impl BlockView for ImageView {
    fn block_type(&self) -> &'static str {
        "Image"
    }

    fn render(&self, props: &Props, _children: Vec<VNode>) -> VNode {
        VNode::element("img")
            .with_attr("class", class_for(self.block_type()))
            .with_attr("src", url_prop(props, "src").unwrap_or_default())
            .with_attr("alt", prop_str(props, "alt").unwrap_or_default())
            .with_attr("loading", "lazy")
            .with_style_opt("width", length(props, "width"))
            .with_style_opt("height", length(props, "height"))
            .with_style_opt("object-fit", text_prop(props, "objectFit"))
    }
}
