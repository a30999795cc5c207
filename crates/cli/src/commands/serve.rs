//! `vitae serve` — Start the HTTP gateway and chat page.

use std::path::PathBuf;
use std::sync::Arc;

use vitae_gateway::GatewayState;

pub async fn run(
    config_path: Option<PathBuf>,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(config_path)?;

    if let Some(host) = host_override {
        config.gateway.host = host;
    }
    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    let notifier = super::build_notifier(&config);
    let assistant = super::build_assistant(&config, Arc::clone(&notifier))?;

    println!("📄 Vitae Gateway");
    println!("   Persona:   {}", assistant.persona_name());
    println!("   Model:     {}", config.provider.model);
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);

    let state = GatewayState::new(assistant, notifier);
    vitae_gateway::serve(&config.gateway.host, config.gateway.port, state).await?;

    Ok(())
}
