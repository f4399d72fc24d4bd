use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Block type already registered: {0}")]
    DuplicateBlockType(String),
}
