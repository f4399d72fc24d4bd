//! Built-in block types.

use crate::registry::BlockDefinition;
use crate::settings::{FieldKind, SettingField};
use serde_json::json;

/// The built-in block definitions, in toolbox order
pub fn builtin_blocks() -> Vec<BlockDefinition> {
    vec![
        container(),
        text(),
        button(),
        image(),
        hero(),
        column(),
        spacer(),
        contact_form(),
        party_slider(),
        booking_form(),
    ]
}

fn container() -> BlockDefinition {
    BlockDefinition::new("Container", "Container")
        .canvas()
        .in_category("layout")
        .with_default("background", "#ffffff")
        .with_default("padding", 20)
        .with_default("flexDirection", "column")
        .with_default("alignItems", "stretch")
        .with_default("gap", 0)
        .with_setting(SettingField::color("background", "Background"))
        .with_setting(SettingField::number("padding", "Padding", Some(0.0), Some(200.0)))
        .with_setting(SettingField::select("flexDirection", "Direction", &["column", "row"]))
        .with_setting(SettingField::select(
            "alignItems",
            "Align items",
            &["stretch", "flex-start", "center", "flex-end"],
        ))
        .with_setting(SettingField::number("gap", "Gap", Some(0.0), Some(100.0)))
}

fn text() -> BlockDefinition {
    BlockDefinition::new("Text", "Text")
        .with_default("text", "Edit me")
        .with_default("tag", "p")
        .with_default("fontSize", 16)
        .with_default("fontWeight", "400")
        .with_default("textAlign", "left")
        .with_default("color", "#111827")
        .with_setting(SettingField::new("text", "Text", FieldKind::LongText))
        .with_setting(SettingField::select("tag", "Tag", &["p", "h1", "h2", "h3", "h4", "span"]))
        .with_setting(SettingField::number("fontSize", "Font size", Some(8.0), Some(96.0)))
        .with_setting(SettingField::select(
            "fontWeight",
            "Weight",
            &["300", "400", "500", "600", "700"],
        ))
        .with_setting(SettingField::select("textAlign", "Align", &["left", "center", "right"]))
        .with_setting(SettingField::color("color", "Color"))
}

fn button() -> BlockDefinition {
    BlockDefinition::new("Button", "Button")
        .with_default("text", "Click me")
        .with_default("href", "#")
        .with_default("size", "medium")
        .with_default("variant", "filled")
        .with_default("background", "#2563eb")
        .with_default("color", "#ffffff")
        .with_setting(SettingField::text("text", "Label"))
        .with_setting(SettingField::new("href", "Link", FieldKind::Url))
        .with_setting(SettingField::select("size", "Size", &["small", "medium", "large"]))
        .with_setting(SettingField::select("variant", "Variant", &["filled", "outline"]))
        .with_setting(SettingField::color("background", "Background"))
        .with_setting(SettingField::color("color", "Text color"))
}

fn image() -> BlockDefinition {
    BlockDefinition::new("Image", "Image")
        .in_category("media")
        .with_default("src", "")
        .with_default("alt", "")
        .with_default("width", "100%")
        .with_default("height", "auto")
        .with_default("objectFit", "cover")
        .with_setting(SettingField::new("src", "Image URL", FieldKind::Url))
        .with_setting(SettingField::text("alt", "Alt text"))
        .with_setting(SettingField::text("width", "Width"))
        .with_setting(SettingField::text("height", "Height"))
        .with_setting(SettingField::select("objectFit", "Fit", &["cover", "contain", "fill"]))
}

fn hero() -> BlockDefinition {
    BlockDefinition::new("Hero", "Hero section")
        .canvas()
        .in_category("layout")
        .with_default("title", "Your headline here")
        .with_default("subtitle", "A short supporting sentence.")
        .with_default("backgroundImage", "")
        .with_default("overlayColor", "rgba(0, 0, 0, 0.4)")
        .with_default("minHeight", 480)
        .with_default("textAlign", "center")
        .with_setting(SettingField::text("title", "Title"))
        .with_setting(SettingField::new("subtitle", "Subtitle", FieldKind::LongText))
        .with_setting(SettingField::new("backgroundImage", "Background image", FieldKind::Url))
        .with_setting(SettingField::color("overlayColor", "Overlay"))
        .with_setting(SettingField::number("minHeight", "Min height", Some(0.0), None))
        .with_setting(SettingField::select("textAlign", "Align", &["left", "center", "right"]))
}

fn column() -> BlockDefinition {
    BlockDefinition::new("Column", "Column")
        .canvas()
        .in_category("layout")
        .with_default("width", "50%")
        .with_default("padding", 10)
        .with_setting(SettingField::text("width", "Width"))
        .with_setting(SettingField::number("padding", "Padding", Some(0.0), Some(200.0)))
}

fn spacer() -> BlockDefinition {
    BlockDefinition::new("Spacer", "Spacer")
        .in_category("layout")
        .with_default("height", 40)
        .with_setting(SettingField::number("height", "Height", Some(0.0), Some(400.0)))
}

fn contact_form() -> BlockDefinition {
    BlockDefinition::new("ContactForm", "Contact form")
        .in_category("forms")
        .with_default("title", "Get in touch")
        .with_default(
            "fields",
            json!([
                { "name": "name", "label": "Name", "type": "text", "required": true },
                { "name": "email", "label": "Email", "type": "email", "required": true },
                { "name": "phone", "label": "Phone", "type": "tel", "required": false },
                { "name": "message", "label": "Message", "type": "textarea", "required": false },
            ]),
        )
        .with_default("submitText", "Send")
        .with_default("successMessage", "Thanks! We'll be in touch.")
        .with_setting(SettingField::text("title", "Title"))
        .with_setting(SettingField::list("fields", "Fields", &["name", "label", "type", "required"]))
        .with_setting(SettingField::text("submitText", "Submit label"))
        .with_setting(SettingField::text("successMessage", "Success message"))
}

fn party_slider() -> BlockDefinition {
    BlockDefinition::new("PartySlider", "Party slider")
        .in_category("media")
        .with_default("images", json!([]))
        .with_default("autoplay", true)
        .with_default("interval", 5000)
        .with_default("showDots", true)
        .with_setting(SettingField::list("images", "Slides", &["src", "alt", "caption"]))
        .with_setting(SettingField::new("autoplay", "Autoplay", FieldKind::Boolean))
        .with_setting(SettingField::number("interval", "Interval (ms)", Some(1000.0), None))
        .with_setting(SettingField::new("showDots", "Show dots", FieldKind::Boolean))
}

fn booking_form() -> BlockDefinition {
    BlockDefinition::new("BookingForm", "Booking form")
        .in_category("forms")
        .with_default("title", "Book a party")
        .with_default(
            "services",
            json!([
                { "name": "Standard package", "price": 199, "duration": 90 },
            ]),
        )
        .with_default("currency", "USD")
        .with_default("submitText", "Book now")
        .with_default("collectGuests", true)
        .with_setting(SettingField::text("title", "Title"))
        .with_setting(SettingField::list("services", "Services", &["name", "price", "duration"]))
        .with_setting(SettingField::select("currency", "Currency", &["USD", "EUR", "GBP", "CAD"]))
        .with_setting(SettingField::text("submitText", "Submit label"))
        .with_setting(SettingField::new("collectGuests", "Ask for guest count", FieldKind::Boolean))
}
