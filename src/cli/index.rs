//! Index command - build once and report

pub async fn run() -> anyhow::Result<()> {
    let config = super::load_config()?;
    super::init_quiet_logging(&config)?;

    let state = crate::create_app_state(&config)?;
    let report = state.knowledge_service.refresh().await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
