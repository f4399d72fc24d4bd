use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{from_json, BlockRegistry};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Page JSON file to check
    pub file: PathBuf,
}

/// Load a page file against the built-in registry and report its size
pub fn validate(args: ValidateArgs) -> Result<usize> {
    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let doc = from_json(&source, BlockRegistry::builtin())
        .with_context(|| format!("Invalid page {}", args.file.display()))?;

    println!(
        "  {} {} ({} blocks)",
        "✓".green(),
        args.file.display(),
        doc.len()
    );

    Ok(doc.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_good_page() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("home.json");
        fs::write(
            &file,
            r#"{ "blockType": "Container", "props": {}, "children": [
                { "blockType": "Text", "props": { "text": "Hi" } }
            ] }"#,
        )
        .unwrap();

        assert_eq!(validate(ValidateArgs { file }).unwrap(), 2);
    }

    #[test]
    fn test_validate_rejects_children_on_leaf() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.json");
        fs::write(
            &file,
            r#"{ "blockType": "Container", "props": {}, "children": [
                { "blockType": "Spacer", "props": {}, "children": [
                    { "blockType": "Text", "props": {} }
                ] }
            ] }"#,
        )
        .unwrap();

        assert!(validate(ValidateArgs { file }).is_err());
    }

    #[test]
    fn test_validate_missing_file() {
        let file = PathBuf::from("does/not/exist.json");
        assert!(validate(ValidateArgs { file }).is_err());
    }
}
