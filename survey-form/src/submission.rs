use serde::{Deserialize, Serialize};
use survey_form_types::{SubmitError, SurveyRecord};
use tracing::{debug, info, warn};

use crate::{
    Delivery, FormConfig, FormValidator, SubmitRequest, Transport, TransportError, TransportPolicy,
};

/// Message used when the endpoint rejects a record without saying why.
pub const DEFAULT_REJECTION: &str = "Submission failed";

/// Reply shape of a readable endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerReply {
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,
}

/// Sends survey records and decides whether a send counts as success.
///
/// One call to [`submit`](Self::submit) performs at most one send; nothing is
/// retried.
#[derive(Debug, Clone)]
pub struct SubmissionClient<T> {
    transport: T,
    config: FormConfig,
}

impl<T: Transport> SubmissionClient<T> {
    pub fn new(transport: T, config: FormConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validate, serialize and send `record`, bounded by the configured timeout.
    pub async fn submit(&self, record: &SurveyRecord) -> Result<(), SubmitError> {
        FormValidator::validate_record(record)?;

        let body =
            serde_json::to_string(record).map_err(|e| SubmitError::Encode(e.to_string()))?;
        let request = SubmitRequest {
            url: self.config.endpoint.clone(),
            body,
            policy: self.config.transport,
        };

        let timeout = self.config.timeout();
        debug!(
            endpoint = %request.url,
            policy = ?request.policy,
            ?timeout,
            "sending survey record"
        );

        // Dropping the send future on expiry cancels the request.
        let delivery = match tokio::time::timeout(timeout, self.transport.send(&request)).await {
            Ok(delivery) => delivery,
            Err(_) => {
                warn!(?timeout, "submission timed out, request cancelled");
                return Err(SubmitError::Timeout(timeout));
            }
        };

        let result = self.interpret(delivery);
        match &result {
            Ok(()) => info!(endpoint = %request.url, "survey record submitted"),
            Err(err) => warn!(%err, "survey record submission failed"),
        }
        result
    }

    fn interpret(&self, delivery: Result<Delivery, TransportError>) -> Result<(), SubmitError> {
        match (self.config.transport, delivery) {
            (TransportPolicy::Opaque, Ok(_)) => Ok(()),
            (TransportPolicy::Opaque, Err(TransportError::Unreadable(reason))) => {
                debug!(%reason, "opaque reply unreadable, treating dispatch as success");
                Ok(())
            }
            (_, Err(TransportError::Network(reason))) => Err(SubmitError::Transport(reason)),
            (TransportPolicy::Readable, Err(TransportError::Unreadable(reason))) => {
                Err(SubmitError::Transport(reason))
            }
            (TransportPolicy::Readable, Ok(Delivery::Dispatched)) => Err(
                SubmitError::InvalidReply("reply was not readable".to_string()),
            ),
            (TransportPolicy::Readable, Ok(Delivery::Replied { status, body })) => {
                parse_reply(status, &body)
            }
        }
    }
}

fn parse_reply(status: u16, body: &str) -> Result<(), SubmitError> {
    if !(200..300).contains(&status) {
        return Err(SubmitError::Status(status));
    }

    let reply: ServerReply = serde_json::from_str(body)
        .map_err(|e| SubmitError::InvalidReply(format!("Failed to parse reply: {e}")))?;

    if reply.success {
        Ok(())
    } else {
        let message = reply
            .message
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| DEFAULT_REJECTION.to_string());
        Err(SubmitError::Rejected(message))
    }
}
