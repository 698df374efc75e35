pub mod commands;
pub mod render;
pub mod shell;

use crate::api::models::RecipeId;
use crate::browser::PageLimit;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "recipe-browser")]
#[command(about = "Recipe Browser - page through and search a recipe catalog", long_about = None)]
pub struct Cli {
    /// Base URL of the recipe API
    #[arg(long, global = true, env = "RECIPES_API_URL")]
    pub api_url: Option<String>,

    /// Rows per page (15, 20, 25, 30 or 50)
    #[arg(short, long, global = true)]
    pub limit: Option<PageLimit>,

    /// Print the view state as JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List one page of the catalog
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Search with filters; values may start with an operator (>=4, <=30)
    Search {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        cuisine: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        rating: Option<String>,

        /// Total time in minutes
        #[arg(long, allow_hyphen_values = true)]
        total_time: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        calories: Option<String>,
    },

    /// Show the detail panel for a recipe on a catalog page
    Show {
        /// Recipe ID
        id: RecipeId,

        /// Page the recipe is on
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Include cook and prep time
        #[arg(short, long)]
        expand: bool,
    },

    /// Browse interactively (type 'help' at the prompt)
    Browse,
}
