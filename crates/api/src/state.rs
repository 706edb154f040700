use std::sync::Arc;

use crate::config::ServerConfig;
use crate::processing::SubmissionProcessor;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). Validation schemas
/// are process-wide statics in `regform_core` and are not carried here.
#[derive(Clone)]
pub struct AppState {
    /// Downstream step for accepted submissions.
    pub processor: Arc<SubmissionProcessor>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            processor: Arc::new(SubmissionProcessor::new(config.processing_delay())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn processor_uses_configured_delay() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: Vec::new(),
            request_timeout_secs: 30,
            processing_delay_ms: 250,
        };
        let state = AppState::new(&config);
        assert_eq!(state.processor.delay(), Duration::from_millis(250));
    }
}
