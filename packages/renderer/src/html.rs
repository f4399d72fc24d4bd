use crate::renderer::{RenderError, RenderOptions, Renderer};
use crate::vdom::VNode;
use pagecraft_editor::Document;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Options for HTML output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HtmlOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Page `<title>`
    pub title: String,
    /// Emit editor annotations (`data-node-id`, `data-block`)
    pub annotate: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            title: "Pagecraft".to_string(),
            annotate: false,
        }
    }
}

struct Context<'a> {
    options: &'a HtmlOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        self.end_line();
    }

    fn end_line(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize a VNode tree as an HTML fragment
pub fn to_html(node: &VNode, options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    write_node(node, &mut ctx);
    ctx.get_output()
}

/// Render a document as a complete HTML page with the document's own registry
pub fn render_page(doc: &Document, options: &HtmlOptions) -> Result<String, RenderError> {
    Renderer::new(doc.registry().clone())
        .with_options(RenderOptions {
            annotate: options.annotate,
        })
        .render_page(doc, options)
}

impl Renderer {
    /// Render `doc` and wrap it in a full HTML document
    #[instrument(skip_all, fields(title = %options.title))]
    pub fn render_page(&self, doc: &Document, options: &HtmlOptions) -> Result<String, RenderError> {
        let output = self.render(doc)?;
        let mut ctx = Context::new(options);

        ctx.add_line("<!DOCTYPE html>");
        ctx.add_line("<html lang=\"en\">");
        ctx.indent();

        ctx.add_line("<head>");
        ctx.indent();
        ctx.add_line("<meta charset=\"UTF-8\">");
        ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
        ctx.add_line(&format!("<title>{}</title>", escape_html(&options.title)));
        ctx.dedent();
        ctx.add_line("</head>");

        ctx.add_line("<body>");
        ctx.indent();
        write_node(&output.root, &mut ctx);
        ctx.dedent();
        ctx.add_line("</body>");

        ctx.dedent();
        ctx.add_line("</html>");

        Ok(ctx.get_output())
    }
}

fn write_node(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
        } => write_element(tag, attributes, styles, children, ctx),

        VNode::Text { content } => {
            ctx.add(&escape_html(content));
        }

        VNode::Comment { content } => {
            // "--" would end the comment early
            ctx.add_line(&format!("<!-- {} -->", content.replace("--", "- -")));
        }

        VNode::Placeholder { block_type, .. } => {
            ctx.add_line(&format!(
                "<div class=\"pc-placeholder\" data-block=\"{}\"></div>",
                escape_html(block_type)
            ));
        }
    }
}

fn write_element(
    tag: &str,
    attributes: &std::collections::BTreeMap<String, String>,
    styles: &std::collections::BTreeMap<String, String>,
    children: &[VNode],
    ctx: &mut Context,
) {
    // Opening tag
    if ctx.options.pretty {
        ctx.add_indent();
    }
    ctx.add(&format!("<{}", tag));

    for (name, value) in attributes {
        ctx.add(&format!(" {}=\"{}\"", name, escape_html(value)));
    }

    if !styles.is_empty() {
        let declarations: Vec<String> = styles
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect();
        ctx.add(&format!(" style=\"{}\"", escape_html(&declarations.join("; "))));
    }

    // Void elements
    if children.is_empty() && is_self_closing(tag) {
        ctx.add(" />");
        ctx.end_line();
        return;
    }

    ctx.add(">");

    if !children.is_empty() {
        let block = has_element_children(children);
        if block {
            ctx.end_line();
        }
        ctx.indent();

        for child in children {
            // Mixed content: text gets a line of its own
            if block && matches!(child, VNode::Text { .. }) {
                if ctx.options.pretty {
                    ctx.add_indent();
                }
                write_node(child, ctx);
                ctx.end_line();
            } else {
                write_node(child, ctx);
            }
        }

        ctx.dedent();
        if ctx.options.pretty && block {
            ctx.add_indent();
        }
    }

    // Closing tag
    ctx.add(&format!("</{}>", tag));
    ctx.end_line();
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn has_element_children(children: &[VNode]) -> bool {
    children
        .iter()
        .any(|child| !matches!(child, VNode::Text { .. }))
}
