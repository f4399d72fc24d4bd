//! # Pagecraft Blocks
//!
//! The catalog of block types a page can be built from.
//!
//! Every node in a page document names one of these block types. The registry
//! answers three questions about a type:
//!
//! - which property values a freshly added block starts with,
//! - whether the block is a *canvas* (accepts child blocks),
//! - which fields the settings panel offers for editing it.
//!
//! ```rust,ignore
//! use pagecraft_blocks::BlockRegistry;
//!
//! let registry = BlockRegistry::builtin();
//! let spacer = registry.lookup("Spacer")?;
//! assert!(!spacer.is_canvas);
//! ```

mod catalog;
mod error;
mod props;
mod registry;
mod settings;

pub use catalog::builtin_blocks;
pub use error::BlockError;
pub use props::{merge_props, prop_bool, prop_f64, prop_list, prop_str, Props};
pub use registry::{BlockDefinition, BlockRegistry};
pub use settings::{FieldKind, SettingField};

/// Name of the block type used for document roots.
pub const ROOT_BLOCK: &str = "Container";
