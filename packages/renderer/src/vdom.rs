use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual DOM node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        children: Vec<VNode>,
    },

    /// Text node
    Text { content: String },

    /// Comment node
    Comment { content: String },

    /// Empty slot for a block this build cannot render (shows up instead of
    /// failing the whole page)
    #[serde(rename_all = "camelCase")]
    Placeholder { block_type: String, node_id: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        VNode::Comment {
            content: content.into(),
        }
    }

    pub fn placeholder(block_type: impl Into<String>, node_id: impl Into<String>) -> Self {
        VNode::Placeholder {
            block_type: block_type.into(),
            node_id: node_id.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    /// Like `with_style`, skipping missing or empty values
    pub fn with_style_opt(self, key: &str, value: Option<String>) -> Self {
        match value {
            Some(value) if !value.is_empty() => self.with_style(key, value),
            _ => self,
        }
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn style(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { styles, .. } => styles.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Concatenated text of this node and everything below it
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text { content } => content.clone(),
            VNode::Element { children, .. } => children.iter().map(VNode::text_content).collect(),
            _ => String::new(),
        }
    }

    /// Depth-first search for the first node matching `predicate`
    pub fn find(&self, predicate: &dyn Fn(&VNode) -> bool) -> Option<&VNode> {
        if predicate(self) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(predicate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builders() {
        let node = VNode::element("a")
            .with_attr("href", "#")
            .with_style("color", "red")
            .with_style_opt("background", Some(String::new()))
            .with_child(VNode::text("Go"));

        assert_eq!(node.tag(), Some("a"));
        assert_eq!(node.attr("href"), Some("#"));
        assert_eq!(node.style("color"), Some("red"));
        assert_eq!(node.style("background"), None);
        assert_eq!(node.text_content(), "Go");
    }

    #[test]
    fn test_builders_ignore_non_elements() {
        let node = VNode::text("plain").with_attr("id", "x").with_child(VNode::text("y"));
        assert_eq!(node, VNode::text("plain"));
    }

    #[test]
    fn test_serialized_tag() {
        let value = serde_json::to_value(VNode::placeholder("Carousel3D", "n-1")).unwrap();
        assert_eq!(
            value,
            json!({ "type": "Placeholder", "blockType": "Carousel3D", "nodeId": "n-1" })
        );
    }
}
