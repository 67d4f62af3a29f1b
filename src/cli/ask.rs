//! Ask command - one question through the full pipeline

use tracing::warn;

pub async fn run(question: &str) -> anyhow::Result<()> {
    let config = super::load_config()?;
    super::init_quiet_logging(&config)?;

    let state = crate::create_app_state(&config)?;
    if let Err(e) = state.knowledge_service.refresh().await {
        warn!(error = %e, "Index build failed, answering from an empty index");
    }

    let reply = state.chat_service.ask(question).await?;
    println!("{}", reply.response);

    Ok(())
}
