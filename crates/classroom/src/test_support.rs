//! Shared test doubles for the classroom components.

use std::sync::Mutex;

use chalkmate_core::error::CompletionError;
use chalkmate_core::{CompletionRequest, CompletionService};

/// A completion service that returns a scripted sequence of results.
///
/// Each call to `complete` consumes the next entry. Panics if more calls are
/// made than entries provided.
pub struct SequentialMockCompletion {
    responses: Mutex<Vec<Result<String, CompletionError>>>,
    call_count: Mutex<usize>,
}

impl SequentialMockCompletion {
    pub fn new(responses: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            call_count: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The request log is not kept; only the number of calls.
    fn next(&self) -> Result<String, CompletionError> {
        let mut count = self.call_count.lock().unwrap();
        let responses = self.responses.lock().unwrap();

        if *count >= responses.len() {
            panic!(
                "SequentialMockCompletion: no more responses (call #{}, have {})",
                *count,
                responses.len()
            );
        }

        let response = responses[*count].clone();
        *count += 1;
        response
    }
}

#[async_trait::async_trait]
impl CompletionService for SequentialMockCompletion {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<String, CompletionError> {
        self.next()
    }
}

/// A completion service that returns the same text for every call.
pub struct StaticCompletion(pub String);

impl StaticCompletion {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

#[async_trait::async_trait]
impl CompletionService for StaticCompletion {
    fn name(&self) -> &str {
        "static_mock"
    }

    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<String, CompletionError> {
        Ok(self.0.clone())
    }
}

/// A completion service whose calls never resolve. For exercising drops of
/// in-flight work.
pub struct PendingCompletion;

#[async_trait::async_trait]
impl CompletionService for PendingCompletion {
    fn name(&self) -> &str {
        "pending_mock"
    }

    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<String, CompletionError> {
        std::future::pending().await
    }
}

/// A completion service whose every call fails with a network error.
pub struct FailingCompletion;

#[async_trait::async_trait]
impl CompletionService for FailingCompletion {
    fn name(&self) -> &str {
        "failing_mock"
    }

    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<String, CompletionError> {
        Err(CompletionError::Network("connection refused".into()))
    }
}
