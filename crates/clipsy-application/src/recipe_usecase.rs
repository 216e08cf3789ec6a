//! Listing of the signed-in user's saved recipes.

use std::sync::Arc;

use clipsy_core::backend::RecipeBackend;
use clipsy_core::error::{ClipsyError, Result};
use clipsy_core::recipe::Recipe;
use clipsy_core::session::{SessionGate, SessionReader, SubmitPermission};
use tokio::sync::RwLock;

pub struct RecipeUseCase {
    backend: Arc<dyn RecipeBackend>,
    reader: SessionReader,
    gate: SessionGate,
    /// Recipes from the last successful load
    recipes: RwLock<Vec<Recipe>>,
}

impl RecipeUseCase {
    pub fn new(backend: Arc<dyn RecipeBackend>, reader: SessionReader) -> Self {
        Self {
            backend,
            gate: SessionGate::new(reader.clone()),
            reader,
            recipes: RwLock::new(Vec::new()),
        }
    }

    /// Fetches the current user's recipes and caches them.
    ///
    /// Fails with `NotAuthenticated` when there is no signed-in user.
    pub async fn load_user_recipes(&self) -> Result<Vec<Recipe>> {
        let SubmitPermission::Allowed { access_token } = self.gate.can_submit() else {
            return Err(ClipsyError::NotAuthenticated);
        };
        let session = self.reader.snapshot();
        let user_id = session.user_id().ok_or(ClipsyError::NotAuthenticated)?;

        let recipes = self.backend.user_recipes(user_id, &access_token).await?;
        tracing::info!("[RecipeUseCase] Loaded {} recipes", recipes.len());

        *self.recipes.write().await = recipes.clone();
        Ok(recipes)
    }

    /// Looks a recipe up among the last loaded ones.
    pub async fn find_recipe(&self, id: &str) -> Option<Recipe> {
        self.recipes
            .read()
            .await
            .iter()
            .find(|recipe| recipe.id == id)
            .cloned()
    }
}
