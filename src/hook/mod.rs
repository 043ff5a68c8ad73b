use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use std::error::Error as StdError;
use std::time::Duration;

use crate::models::analysis::AnalysisResult;

/// Downstream notification fired when a scene qualifies as a highlight.
#[async_trait]
pub trait HighlightHook: Send + Sync {
    async fn notify(&self, result: &AnalysisResult) -> Result<(), Box<dyn StdError + Send + Sync>>;

    fn is_configured(&self) -> bool;

    /// Human-readable target for status output.
    fn target(&self) -> Option<String> {
        None
    }
}

/// Hook used when no downstream target is set; does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHook;

#[async_trait]
impl HighlightHook for NoopHook {
    async fn notify(&self, _result: &AnalysisResult) -> Result<(), Box<dyn StdError + Send + Sync>> {
        Ok(())
    }

    fn is_configured(&self) -> bool {
        false
    }
}

/// Posts the highlight result as JSON to a workflow webhook.
#[derive(Debug)]
pub struct WebhookHook {
    http: HttpClient,
    url: String,
}

impl WebhookHook {
    pub fn new(url: String, timeout: Duration) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Box::new(e) as Box<dyn StdError + Send + Sync>)?;
        Ok(Self { http, url })
    }
}

#[async_trait]
impl HighlightHook for WebhookHook {
    async fn notify(&self, result: &AnalysisResult) -> Result<(), Box<dyn StdError + Send + Sync>> {
        debug!("Posting highlight to {}", self.url);
        self.http.post(&self.url).json(result).send().await?.error_for_status()?;
        Ok(())
    }

    fn is_configured(&self) -> bool {
        true
    }

    fn target(&self) -> Option<String> {
        Some(self.url.clone())
    }
}
