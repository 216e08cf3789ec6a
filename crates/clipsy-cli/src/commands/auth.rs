use anyhow::Result;
use clipsy_application::RefreshState;
use clipsy_core::backend::LoginProfile;

use super::context::{AppContext, ContextOptions};

pub async fn login(
    options: &ContextOptions,
    email: String,
    name: String,
    photo: Option<String>,
) -> Result<()> {
    let ctx = AppContext::build(options, None)?;
    let user = ctx
        .auth
        .sign_in(&LoginProfile { email, name, photo })
        .await?;
    println!("✅ Signed in as {} <{}>", user.name, user.email);
    Ok(())
}

pub async fn logout(options: &ContextOptions) -> Result<()> {
    let ctx = AppContext::build(options, None)?;
    ctx.auth.sign_out().await?;
    println!("Signed out");
    Ok(())
}

pub async fn refresh(options: &ContextOptions) -> Result<()> {
    let ctx = AppContext::build(options, None)?;

    match ctx.start_session().await? {
        RefreshState::Refreshed => {
            let session = ctx.store.snapshot();
            let who = session.user().map(|u| u.email.as_str()).unwrap_or("unknown");
            println!("✅ Session refreshed for {}", who);
        }
        RefreshState::Failed => anyhow::bail!("Session refresh failed; please sign in again"),
        RefreshState::Idle | RefreshState::Refreshing => println!("No stored session to refresh"),
    }
    Ok(())
}
