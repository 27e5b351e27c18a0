//! Category commands.

use clap::Subcommand;
use momentum_core::Category;
use uuid::Uuid;

use super::{open_tracker, CliResult};

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Add a category
    Add {
        /// Display name
        name: String,
        /// Display color as a hex string
        #[arg(long, default_value = "#3b82f6")]
        color: String,
        /// Optional icon tag
        #[arg(long)]
        icon: Option<String>,
    },
    /// List categories
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rename a category
    Rename {
        /// Category id
        id: String,
        /// New display name
        name: String,
    },
    /// Remove a category (the last one is refused)
    Remove {
        /// Category id
        id: String,
    },
}

pub fn run(action: CategoryAction) -> CliResult {
    let mut tracker = open_tracker()?;

    match action {
        CategoryAction::Add { name, color, icon } => {
            let category = tracker.add_category(Category {
                id: Uuid::new_v4().to_string(),
                name,
                color,
                icon,
            })?;
            println!("Category added: {}", category.id);
        }
        CategoryAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(tracker.categories())?);
            } else {
                for c in tracker.categories() {
                    println!("{}  {}  {}", c.id, c.name, c.color);
                }
            }
        }
        CategoryAction::Rename { id, name } => {
            tracker.rename_category(&id, name)?;
            println!("Category renamed: {id}");
        }
        CategoryAction::Remove { id } => {
            tracker.remove_category(&id)?;
            println!("Category removed: {id}");
        }
    }
    Ok(())
}
