use super::{class_for, safe_url, BlockView};
use crate::vdom::VNode;
use pagecraft_blocks::{prop_bool, prop_f64, prop_list, Props};
use serde_json::Value;

/// Image carousel. Slides are either plain URLs or `{ src, alt, caption }`.
pub struct PartySliderView;

impl BlockView for PartySliderView {
    fn block_type(&self) -> &'static str {
        "PartySlider"
    }

    fn render(&self, props: &Props, _children: Vec<VNode>) -> VNode {
        let autoplay = prop_bool(props, "autoplay").unwrap_or(false);
        let mut slider = VNode::element("div")
            .with_attr("class", class_for(self.block_type()))
            .with_attr("data-autoplay", autoplay.to_string());
        if let Some(interval) = prop_f64(props, "interval") {
            slider = slider.with_attr("data-interval", interval.to_string());
        }

        let slides: Vec<VNode> = prop_list(props, "images").iter().filter_map(slide).collect();
        if slides.is_empty() {
            return slider.with_child(VNode::comment("no slides"));
        }

        let count = slides.len();
        slider = slider.with_children(slides);

        if prop_bool(props, "showDots").unwrap_or(false) {
            let dots = (0..count).map(|i| {
                VNode::element("button")
                    .with_attr("type", "button")
                    .with_attr("data-slide", i.to_string())
                    .with_attr("aria-label", format!("Slide {}", i + 1))
            });
            slider = slider.with_child(
                VNode::element("div")
                    .with_attr("class", "pc-slider-dots")
                    .with_children(dots.collect()),
            );
        }
        slider
    }
}

fn slide(item: &Value) -> Option<VNode> {
    let (src, alt, caption) = match item {
        Value::String(src) => (src.as_str(), "", None),
        Value::Object(fields) => (
            fields.get("src").and_then(Value::as_str)?,
            fields.get("alt").and_then(Value::as_str).unwrap_or(""),
            fields.get("caption").and_then(Value::as_str),
        ),
        _ => return None,
    };
    let src = safe_url(src).filter(|src| !src.is_empty())?;

    let mut figure = VNode::element("figure")
        .with_attr("class", "pc-slide")
        .with_child(VNode::element("img").with_attr("src", src).with_attr("alt", alt));
    if let Some(caption) = caption.filter(|c| !c.is_empty()) {
        figure = figure.with_child(VNode::element("figcaption").with_child(VNode::text(caption)));
    }
    Some(figure)
}
