pub mod client;
pub mod models;

pub use client::{RecipeClient, RecipeSource};
pub use models::{Listing, Recipe, RecipeId, Serves};
