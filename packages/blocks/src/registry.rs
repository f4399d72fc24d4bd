use crate::catalog::builtin_blocks;
use crate::error::BlockError;
use crate::props::Props;
use crate::settings::SettingField;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Everything the editor and renderer need to know about one block type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDefinition {
    /// Type name stored in documents ("Container", "Text", ...)
    pub name: String,

    /// Human-readable name for the toolbox
    pub label: String,

    /// Toolbox group ("layout", "content", "forms", "media")
    pub category: String,

    /// Whether nodes of this type accept children
    pub is_canvas: bool,

    /// Props a new node starts with
    pub defaults: Props,

    /// Settings-panel schema
    pub settings: Vec<SettingField>,
}

impl BlockDefinition {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            category: "content".to_string(),
            is_canvas: false,
            defaults: Props::new(),
            settings: Vec::new(),
        }
    }

    pub fn canvas(mut self) -> Self {
        self.is_canvas = true;
        self
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    pub fn with_setting(mut self, field: SettingField) -> Self {
        self.settings.push(field);
        self
    }
}

/// Catalog of block types, looked up by name
///
/// The process-wide catalog is [`BlockRegistry::builtin`]. Owned registries can
/// be extended with [`BlockRegistry::register`] (tests, plugins).
#[derive(Clone, PartialEq)]
pub struct BlockRegistry {
    blocks: Vec<BlockDefinition>,
    index: HashMap<String, usize>,
}

static BUILTIN: OnceLock<Arc<BlockRegistry>> = OnceLock::new();

impl BlockRegistry {
    /// Create a registry holding the built-in catalog
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for block in builtin_blocks() {
            registry.insert(block);
        }
        registry
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            blocks: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Shared built-in registry, created on first use
    pub fn builtin() -> Arc<BlockRegistry> {
        BUILTIN.get_or_init(|| Arc::new(BlockRegistry::new())).clone()
    }

    /// Add a block type. Names are unique; re-registering one fails.
    pub fn register(&mut self, block: BlockDefinition) -> Result<(), BlockError> {
        if self.index.contains_key(&block.name) {
            return Err(BlockError::DuplicateBlockType(block.name));
        }
        self.insert(block);
        Ok(())
    }

    fn insert(&mut self, block: BlockDefinition) {
        self.index.insert(block.name.clone(), self.blocks.len());
        self.blocks.push(block);
    }

    pub fn lookup(&self, block_type: &str) -> Result<&BlockDefinition, BlockError> {
        self.index
            .get(block_type)
            .map(|&i| &self.blocks[i])
            .ok_or_else(|| BlockError::UnknownBlockType(block_type.to_string()))
    }

    pub fn contains(&self, block_type: &str) -> bool {
        self.index.contains_key(block_type)
    }

    /// Whether `block_type` accepts children; unknown types never do
    pub fn is_canvas(&self, block_type: &str) -> bool {
        self.lookup(block_type).map(|b| b.is_canvas).unwrap_or(false)
    }

    /// Block names in toolbox order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|b| b.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockDefinition> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BlockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockRegistry")
            .field("blocks", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_catalog() {
        let registry = BlockRegistry::new();
        let names: Vec<&str> = registry.names().collect();

        assert_eq!(
            names,
            vec![
                "Container",
                "Text",
                "Button",
                "Image",
                "Hero",
                "Column",
                "Spacer",
                "ContactForm",
                "PartySlider",
                "BookingForm",
            ]
        );
    }

    #[test]
    fn test_canvas_types() {
        let registry = BlockRegistry::new();

        for canvas in ["Container", "Hero", "Column"] {
            assert!(registry.is_canvas(canvas), "{} should accept children", canvas);
        }
        for leaf in ["Text", "Button", "Image", "Spacer", "ContactForm", "PartySlider", "BookingForm"] {
            assert!(!registry.is_canvas(leaf), "{} should be a leaf", leaf);
        }
    }

    #[test]
    fn test_lookup_unknown() {
        let registry = BlockRegistry::new();
        assert_eq!(
            registry.lookup("Marquee"),
            Err(BlockError::UnknownBlockType("Marquee".to_string()))
        );
        assert!(!registry.is_canvas("Marquee"));
    }

    #[test]
    fn test_defaults_exposed() {
        let registry = BlockRegistry::new();
        let text = registry.lookup("Text").unwrap();
        assert_eq!(text.defaults["text"], json!("Edit me"));
    }

    #[test]
    fn test_register_custom_block() {
        let mut registry = BlockRegistry::new();
        registry
            .register(BlockDefinition::new("Divider", "Divider").with_default("thickness", 1))
            .unwrap();

        assert!(registry.contains("Divider"));
        assert_eq!(registry.names().last(), Some("Divider"));
    }

    #[test]
    fn test_register_duplicate_rejected() {
        let mut registry = BlockRegistry::new();
        let result = registry.register(BlockDefinition::new("Text", "Another text"));

        assert_eq!(result, Err(BlockError::DuplicateBlockType("Text".to_string())));
        assert_eq!(registry.lookup("Text").unwrap().label, "Text");
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = BlockRegistry::builtin();
        let b = BlockRegistry::builtin();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
