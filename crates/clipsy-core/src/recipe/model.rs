//! Recipe domain model as stored by the extraction backend.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub step: u32,
    pub instruction: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub temperature: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub servings: String,
    pub prep_time: String,
    pub cook_time: String,
    pub total_time: String,
    pub difficulty: String,
    pub cuisine: String,
    pub dietary_tags: Vec<String>,
}

/// A recipe (or educational clip) extracted from a shared link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(rename = "ocrExtractedInfo", default)]
    pub ocr_extracted_info: String,
    #[serde(rename = "channelName", default)]
    pub channel_name: String,
    #[serde(rename = "savedDate", default)]
    pub saved_date: String,
    #[serde(rename = "isRecipe", default)]
    pub is_recipe: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub user_id: String,
}

/// Envelope returned by the recipe listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeApiResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub recipe_id: Option<String>,
    #[serde(default)]
    pub recipe_data: Option<RecipeData>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeData {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}
