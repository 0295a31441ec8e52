//! Completion-service backends for chalkmate.
//!
//! The classroom core depends only on the [`CompletionService`] trait from
//! `chalkmate-core`; this crate provides the HTTP implementation.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatCompletion;

use std::sync::Arc;

use chalkmate_config::AppConfig;
use chalkmate_core::{CompletionError, CompletionService};

/// Build the completion service described by the configuration.
///
/// Fails fast when no API key or base URL is configured: the classroom
/// cannot run without its external collaborator.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn CompletionService>, CompletionError> {
    let api_key = config
        .api_key
        .clone()
        .ok_or_else(|| CompletionError::NotConfigured("no API key configured".into()))?;
    let base_url = config
        .base_url
        .clone()
        .ok_or_else(|| CompletionError::NotConfigured("no base URL configured".into()))?;

    Ok(Arc::new(OpenAiCompatCompletion::new(
        "openai-compat",
        base_url,
        api_key,
        &config.model,
        std::time::Duration::from_secs(config.request_timeout_secs),
    )))
}
