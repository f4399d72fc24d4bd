//! Starter layouts offered when a page is created.

use crate::document::Document;
use crate::errors::DocumentError;
use pagecraft_blocks::{BlockRegistry, Props};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Root container only
    Blank,
    /// Hero with headline and call to action, followed by a contact form
    Landing,
    /// Intro text and a booking form
    Booking,
    /// Photo slider and enquiry form for party venues
    Party,
}

impl Template {
    pub const ALL: [Template; 4] = [Template::Blank, Template::Landing, Template::Booking, Template::Party];

    pub fn name(&self) -> &'static str {
        match self {
            Template::Blank => "blank",
            Template::Landing => "landing",
            Template::Booking => "booking",
            Template::Party => "party",
        }
    }

    /// Build a fresh document from this template
    pub fn build(&self, registry: Arc<BlockRegistry>, id_scope: &str) -> Result<Document, DocumentError> {
        let mut doc = Document::create(registry, id_scope);
        let root = doc.root_id().clone();

        match self {
            Template::Blank => {}

            Template::Landing => {
                let hero = doc.add_node(
                    &root,
                    "Hero",
                    None,
                    Some(props(json!({
                        "title": "Throw the party they'll talk about",
                        "subtitle": "Packages for every age and budget.",
                    }))),
                )?;
                doc.add_node(
                    &hero,
                    "Button",
                    None,
                    Some(props(json!({ "text": "See packages", "href": "#contact", "size": "large" }))),
                )?;
                doc.add_node(&root, "Spacer", None, None)?;
                doc.add_node(&root, "ContactForm", None, None)?;
            }

            Template::Booking => {
                doc.add_node(
                    &root,
                    "Text",
                    None,
                    Some(props(json!({ "text": "Book your date", "tag": "h1", "fontSize": 40 }))),
                )?;
                doc.add_node(
                    &root,
                    "Text",
                    None,
                    Some(props(json!({ "text": "Pick a package and we'll confirm within a day." }))),
                )?;
                doc.add_node(&root, "BookingForm", None, None)?;
            }

            Template::Party => {
                doc.add_node(&root, "PartySlider", None, None)?;
                let row = doc.add_node(
                    &root,
                    "Container",
                    None,
                    Some(props(json!({ "flexDirection": "row", "gap": 24 }))),
                )?;
                let left = doc.add_node(&row, "Column", None, None)?;
                doc.add_node(
                    &left,
                    "Text",
                    None,
                    Some(props(json!({ "text": "Parties, done for you", "tag": "h2" }))),
                )?;
                let right = doc.add_node(&row, "Column", None, None)?;
                doc.add_node(&right, "ContactForm", None, None)?;
            }
        }

        // Templates start unedited
        doc.reset_version();
        Ok(doc)
    }
}

impl FromStr for Template {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = Template::ALL.iter().map(Template::name).collect();
                format!("unknown template '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

fn props(value: Value) -> Props {
    match value {
        Value::Object(map) => map,
        _ => Props::new(),
    }
}
