use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use artboard_model::Design;
use artboard_storage::{FileDesignStore, PersistenceAdapter};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project name for the new design
    pub name: String,

    /// Product the design belongs to
    #[arg(short, long)]
    pub product: Option<String>,

    /// Also write artboard.config.json when missing
    #[arg(long)]
    pub config: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    println!("{}", "📝 Creating design...".bright_blue().bold());

    if args.config {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);
        if config_path.exists() {
            println!(
                "  {} {} already exists",
                "⚠️".yellow(),
                DEFAULT_CONFIG_NAME.bright_white()
            );
        } else {
            fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
            println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
        }
    }

    let mut design = Design::new(args.name.as_str(), config.default_canvas.to_canvas());
    design.meta.product_id = args.product;

    let store_dir = config.get_store_dir(cwd);
    let store = Arc::new(FileDesignStore::new(store_dir));
    let adapter = PersistenceAdapter::new(store.clone());

    let runtime = tokio::runtime::Runtime::new()?;
    let design_id = runtime.block_on(adapter.save(&design))?;

    println!(
        "  {} Created {}",
        "✓".green(),
        store.design_path(&design_id).display()
    );
    println!();
    println!("{}", "✅ Design initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!(
        "  1. Run: artboard edit {}/{}.json <script.json>",
        config.store_dir, design_id
    );
    println!(
        "  2. Run: artboard render {}/{}.json",
        config.store_dir, design_id
    );

    Ok(())
}
