pub mod analyzer;
pub mod cli;
pub mod hook;
pub mod llm;
pub mod logs;
pub mod models;
pub mod server;

use analyzer::Analyzer;
use cli::Args;
use hook::{ HighlightHook, NoopHook, WebhookHook };
use llm::chat::new_client as new_chat_client;
use llm::{ parse_llm_type, LlmConfig };
use log::info;
use logs::LogRing;
use server::Server;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Chat LLM Type: {}", args.chat_llm_type);
    info!("Chat Base URL: {}", args.chat_base_url.as_deref().unwrap_or("(default)"));
    info!("Chat Model: {}", args.chat_model.as_deref().unwrap_or("(default)"));
    info!("Request Timeout: {}s", args.request_timeout_secs);
    info!("Highlight Threshold: {}", args.highlight_threshold);
    info!(
        "Highlight Webhook: {}",
        args.highlight_webhook_url.as_deref().unwrap_or("(disabled)")
    );
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let timeout = Duration::from_secs(args.request_timeout_secs);
    let chat_config = LlmConfig {
        llm_type: parse_llm_type(&args.chat_llm_type)?,
        api_key: args.groq_api_key.clone().filter(|k| !k.trim().is_empty()),
        completion_model: args.chat_model.clone(),
        base_url: args.chat_base_url.clone(),
        timeout,
    };
    let chat_client = new_chat_client(&chat_config)?;

    let hook: Arc<dyn HighlightHook> = match args.highlight_webhook_url.as_deref() {
        Some(url) if !url.trim().is_empty() => Arc::new(WebhookHook::new(url.to_string(), timeout)?),
        _ => Arc::new(NoopHook),
    };

    let log_ring = Arc::new(LogRing::default());
    log_ring.append("System", "Newtype Detection Server starting");

    let analyzer = Arc::new(Analyzer::new(chat_client, log_ring.clone()));
    let server = Server::new(analyzer, hook, log_ring, args);
    server.run().await
}
