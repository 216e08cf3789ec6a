use anyhow::Result;
use clipsy_core::share::IncomingShareEvent;

use super::context::{AppContext, ContextOptions};

/// Runs one URL through the share pipeline after the usual start-up refresh.
pub async fn run(options: &ContextOptions, url: &str) -> Result<()> {
    let ctx = AppContext::build(options, None)?;
    ctx.start_session().await?;

    match ctx.pipeline.resolve(url) {
        Ok(None) => println!("Not a supported content URL: {}", url),
        _ => ctx.pipeline.handle(IncomingShareEvent::new(url)).await,
    }
    Ok(())
}

pub fn extract_url(options: &ContextOptions, text: &str) -> Result<()> {
    let config = options.load_config()?;
    let classifier = config.classifier();

    match classifier.extract_canonical_url(text)? {
        Some(url) => {
            let supported = classifier.is_supported_content_url(&url);
            println!("{}", url);
            if !supported {
                println!("(not a supported platform)");
            }
        }
        None => println!("No URL found"),
    }
    Ok(())
}
