//! Stored JSON page → HTML, the way the public page route serves it

use pagecraft_editor::{from_json, BlockRegistry};
use pagecraft_renderer::{render_page, HtmlOptions};

const STORED_PAGE: &str = r##"{
  "blockType": "Container",
  "props": { "padding": 0, "background": "#fff7ed" },
  "children": [
    {
      "blockType": "Hero",
      "props": { "title": "Jumping Jacks Party Hall", "subtitle": "Birthdays & more", "minHeight": 400 },
      "children": [
        { "blockType": "Button", "props": { "text": "Book a party", "href": "#book" } }
      ]
    },
    {
      "blockType": "PartySlider",
      "props": { "images": ["/img/hall.jpg", "/img/cake.jpg"], "autoplay": true, "interval": 4000, "showDots": true }
    },
    {
      "blockType": "BookingForm",
      "props": {
        "title": "Book a party",
        "services": [
          { "name": "Classic", "price": 249, "duration": 120 },
          { "name": "Deluxe", "price": 399, "duration": 180 }
        ],
        "currency": "USD",
        "submitText": "Request booking",
        "collectGuests": true
      }
    }
  ]
}"##;

#[test]
fn test_stored_page_renders() {
    let doc = from_json(STORED_PAGE, BlockRegistry::builtin()).expect("Failed to load page");
    let options = HtmlOptions {
        title: "Jumping Jacks".to_string(),
        ..HtmlOptions::default()
    };

    let html = render_page(&doc, &options).expect("Failed to render");
    println!("Generated HTML:\n{}", html);

    assert!(html.contains("<title>Jumping Jacks</title>"));
    assert!(html.contains("Birthdays &amp; more"));
    assert!(html.contains("href=\"#book\""));
    assert!(html.contains("src=\"/img/cake.jpg\""));
    assert!(html.contains("Deluxe (399 USD), 180 min"));
    assert!(html.contains("name=\"guests\""));
    assert!(html.contains("Request booking"));
    assert!(!html.contains("data-node-id"));

    // Hero comes before the slider, the slider before the form
    let hero = html.find("pc-hero").unwrap();
    let slider = html.find("pc-party-slider").unwrap();
    let form = html.find("pc-booking-form").unwrap();
    assert!(hero < slider && slider < form);
}

#[test]
fn test_editor_preview_is_annotated() {
    let doc = from_json(STORED_PAGE, BlockRegistry::builtin()).unwrap();
    let options = HtmlOptions {
        annotate: true,
        ..HtmlOptions::default()
    };

    let html = render_page(&doc, &options).unwrap();
    assert_eq!(html.matches("data-node-id=").count(), doc.len());
}

#[test]
fn test_stored_page_cannot_inject_script_urls() {
    let page = r#"{
      "blockType": "Container",
      "props": {},
      "children": [
        { "blockType": "Hero", "props": { "title": "Hi", "backgroundImage": "x'); background: url(javascript:alert(1)" }, "children": [
          { "blockType": "Button", "props": { "text": "Go", "href": " JavaScript:alert(document.cookie)" } }
        ] },
        { "blockType": "Image", "props": { "src": "javascript:alert(2)", "alt": "cake" } }
      ]
    }"#;
    let doc = from_json(page, BlockRegistry::builtin()).expect("Failed to load page");

    let html = render_page(&doc, &HtmlOptions::default()).expect("Failed to render");
    println!("Generated HTML:\n{}", html);

    assert!(!html.to_lowercase().contains("javascript"));
    assert!(html.contains("href=\"#\""));
    assert!(html.contains("alt=\"cake\""));
}
