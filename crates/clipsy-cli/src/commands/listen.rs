use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::context::{AppContext, ContextOptions};

/// Line that simulates the app returning to the foreground.
const ACTIVE_COMMAND: &str = ":active";
/// Line prefix that submits a URL without classification.
const TEST_COMMAND: &str = ":test";

pub async fn run(options: &ContextOptions, launch_url: Option<String>) -> Result<()> {
    let ctx = AppContext::build(options, launch_url)?;
    tracing::info!(
        "[Clipsy] Backend: {}",
        ctx.config.backend_url.as_deref().unwrap_or("<unset>")
    );

    let state = ctx.start_session().await?;
    tracing::info!("[Clipsy] Session refresh: {:?}", state);

    ctx.handler.initialize().await?;
    println!("Listening for shared URLs on stdin (Ctrl-D to stop)...");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                handle_line(&ctx, line.trim()).await;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("[Clipsy] Interrupted");
                break;
            }
        }
    }

    ctx.handler.cleanup().await;
    Ok(())
}

async fn handle_line(ctx: &AppContext, line: &str) {
    if line.is_empty() {
        return;
    }

    if line == ACTIVE_COMMAND {
        ctx.handler.on_app_active().await;
        return;
    }

    if let Some(rest) = line.strip_prefix(TEST_COMMAND) {
        let url = rest.trim();
        ctx.handler
            .test_share((!url.is_empty()).then_some(url))
            .await;
        return;
    }

    if ctx.source.deliver(line) == 0 {
        tracing::warn!("[Clipsy] No live subscription for {}", line);
    }
}
