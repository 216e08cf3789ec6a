//! Recipe domain module.

mod model;

pub use model::{Ingredient, Metadata, Recipe, RecipeApiResponse, RecipeData, Step};
