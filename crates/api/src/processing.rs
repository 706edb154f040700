//! Stub downstream processing for accepted submissions.
//!
//! Nothing is persisted: an accepted registration is logged (without its
//! passwords) after a configurable delay that stands in for real server work.
//! Validation has already returned by the time this runs.

use std::time::Duration;

use regform_core::registration::RegistrationForm;

/// Submission path that produced an accepted registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionChannel {
    /// JSON body posted to the HTTP endpoint.
    JsonEndpoint,
    /// Urlencoded form posted to the server action.
    ServerAction,
}

impl SubmissionChannel {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionChannel::JsonEndpoint => "json_endpoint",
            SubmissionChannel::ServerAction => "server_action",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubmissionProcessor {
    delay: Duration,
}

impl SubmissionProcessor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Simulate processing an accepted registration.
    pub async fn process(&self, form: &RegistrationForm, channel: SubmissionChannel) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        tracing::info!(
            channel = channel.as_str(),
            submission = %form.redacted(),
            "Registration processed"
        );
    }
}
