use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{BlockRegistry, EditSession, FilePageStore, PageKey};
use pagecraft_renderer::render_page;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Site id
    pub site: String,

    /// Page id
    pub page: String,

    /// Write HTML here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Tag elements with their node ids (editor preview)
    #[arg(long)]
    pub annotate: bool,

    /// Override the configured page title
    #[arg(long)]
    pub title: Option<String>,

    /// Emit compact HTML
    #[arg(long)]
    pub compact: bool,
}

pub async fn render(args: RenderArgs, config: &Config, store: &FilePageStore) -> Result<()> {
    let key = PageKey::new(args.site, args.page);
    let session = EditSession::open(store, key.clone(), BlockRegistry::builtin()).await?;

    let mut options = config.html.clone();
    if let Some(title) = args.title {
        options.title = title;
    }
    if args.annotate {
        options.annotate = true;
    }
    if args.compact {
        options.pretty = false;
    }

    let html = render_page(session.document(), &options)?;

    match args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(&path, &html)?;
            println!(
                "  {} Rendered {} → {}",
                "✓".green(),
                key.to_string().bright_white(),
                path.display()
            );
        }
        None => print!("{}", html),
    }

    Ok(())
}
