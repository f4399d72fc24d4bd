use super::{class_for, BlockView};
use crate::vdom::VNode;
use pagecraft_blocks::{prop_bool, prop_list, prop_str, Props};
use serde_json::Value;

fn heading(props: &Props) -> Option<VNode> {
    prop_str(props, "title")
        .filter(|title| !title.is_empty())
        .map(|title| VNode::element("h3").with_child(VNode::text(title)))
}

fn submit(props: &Props, fallback: &str) -> VNode {
    VNode::element("button")
        .with_attr("type", "submit")
        .with_child(VNode::text(prop_str(props, "submitText").unwrap_or(fallback)))
}

fn field_str<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key).and_then(Value::as_str)
}

/// Enquiry form; one input per configured field
pub struct ContactFormView;

impl BlockView for ContactFormView {
    fn block_type(&self) -> &'static str {
        "ContactForm"
    }

    fn render(&self, props: &Props, _children: Vec<VNode>) -> VNode {
        let mut form = VNode::element("form")
            .with_attr("class", class_for(self.block_type()))
            .with_attr("method", "post");
        if let Some(message) = prop_str(props, "successMessage") {
            form = form.with_attr("data-success-message", message);
        }
        if let Some(heading) = heading(props) {
            form = form.with_child(heading);
        }

        for item in prop_list(props, "fields") {
            // Entries without a name cannot be submitted
            let Some(name) = field_str(item, "name").filter(|n| !n.is_empty()) else {
                continue;
            };
            let label = field_str(item, "label").unwrap_or(name);
            let kind = field_str(item, "type").unwrap_or("text");
            let required = item.get("required").and_then(Value::as_bool).unwrap_or(false);

            let mut input = if kind == "textarea" {
                VNode::element("textarea").with_attr("name", name)
            } else {
                VNode::element("input")
                    .with_attr("type", kind)
                    .with_attr("name", name)
            };
            if required {
                input = input.with_attr("required", "required");
            }

            form = form.with_child(
                VNode::element("label")
                    .with_child(VNode::text(label))
                    .with_child(input),
            );
        }

        form.with_child(submit(props, "Send"))
    }
}

/// Party booking: pick a package, a date and (optionally) a guest count
pub struct BookingFormView;

impl BlockView for BookingFormView {
    fn block_type(&self) -> &'static str {
        "BookingForm"
    }

    fn render(&self, props: &Props, _children: Vec<VNode>) -> VNode {
        let currency = prop_str(props, "currency").unwrap_or("USD");

        let mut form = VNode::element("form")
            .with_attr("class", class_for(self.block_type()))
            .with_attr("method", "post");
        if let Some(heading) = heading(props) {
            form = form.with_child(heading);
        }

        let mut select = VNode::element("select")
            .with_attr("name", "service")
            .with_attr("required", "required");
        for service in prop_list(props, "services") {
            let Some(name) = field_str(service, "name") else {
                continue;
            };
            let mut label = name.to_string();
            if let Some(price) = service.get("price").and_then(Value::as_f64) {
                label.push_str(&format!(" ({} {})", price, currency));
            }
            if let Some(minutes) = service.get("duration").and_then(Value::as_u64) {
                label.push_str(&format!(", {} min", minutes));
            }
            select = select.with_child(
                VNode::element("option")
                    .with_attr("value", name)
                    .with_child(VNode::text(label)),
            );
        }

        form = form
            .with_child(
                VNode::element("label")
                    .with_child(VNode::text("Package"))
                    .with_child(select),
            )
            .with_child(
                VNode::element("label").with_child(VNode::text("Date")).with_child(
                    VNode::element("input")
                        .with_attr("type", "date")
                        .with_attr("name", "date")
                        .with_attr("required", "required"),
                ),
            );

        if prop_bool(props, "collectGuests").unwrap_or(false) {
            form = form.with_child(
                VNode::element("label").with_child(VNode::text("Guests")).with_child(
                    VNode::element("input")
                        .with_attr("type", "number")
                        .with_attr("name", "guests")
                        .with_attr("min", "1"),
                ),
            );
        }

        form.with_child(submit(props, "Book now"))
    }
}
