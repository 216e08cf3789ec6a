use anyhow::{Result, bail};

use super::context::{AppContext, ContextOptions};

pub async fn run(options: &ContextOptions) -> Result<()> {
    let ctx = AppContext::build(options, None)?;
    ctx.start_session().await?;

    let recipes = match ctx.recipes.load_user_recipes().await {
        Ok(recipes) => recipes,
        Err(err) if err.requires_sign_in() => bail!("{err}. Run `clipsy login` first"),
        Err(err) => return Err(err.into()),
    };
    if recipes.is_empty() {
        println!("No saved recipes yet");
        return Ok(());
    }

    for recipe in &recipes {
        let kind = if recipe.is_recipe { "recipe" } else { "clip" };
        println!("{}  {} [{}]", recipe.id, recipe.title, kind);
    }
    Ok(())
}
