use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::BlockRegistry;

#[derive(Debug, Args)]
pub struct BlocksArgs {
    /// Print the registry as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn blocks(args: BlocksArgs) -> Result<()> {
    let registry = BlockRegistry::builtin();
    let mut definitions: Vec<_> = registry.iter().collect();
    definitions.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&definitions)?);
        return Ok(());
    }

    println!("{}", "🧱 Available blocks".bright_blue().bold());
    let mut category = "";
    for def in definitions {
        if def.category != category {
            category = &def.category;
            println!();
            println!("  {}", category.bold());
        }
        let kind = if def.is_canvas { "canvas" } else { "leaf" };
        println!(
            "    {:<14} {:<8} {}",
            def.name.bright_white(),
            kind.dimmed(),
            def.label
        );
    }

    Ok(())
}
