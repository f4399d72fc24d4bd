use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{BlockRegistry, EditSession, FilePageStore, PageKey, PageStore, Template};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Site id
    pub site: String,

    /// Page id
    pub page: String,

    /// Starter layout (blank, landing, booking, party)
    #[arg(short, long, default_value = "blank")]
    pub template: Template,

    /// Overwrite an existing page
    #[arg(short, long)]
    pub force: bool,
}

pub async fn new_page(args: NewArgs, store: &FilePageStore) -> Result<()> {
    let key = PageKey::new(args.site, args.page);

    if !args.force && store.load(&key).await?.is_some() {
        bail!("Page {} already exists (use --force to overwrite)", key);
    }

    let mut session = EditSession::from_template(key.clone(), args.template, BlockRegistry::builtin())?;
    session.save(store).await?;

    println!(
        "  {} Created {} from the {} template ({} blocks)",
        "✓".green(),
        key.to_string().bright_white(),
        args.template.name(),
        session.document().len()
    );
    println!("     {}", store.path_for(&key)?.display());

    Ok(())
}
