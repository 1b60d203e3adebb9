//! Best-effort relay to the Telegram messaging API.
//!
//! Once a request passes validation, this module never fails: when
//! credentials are absent nothing is sent and the caller gets a simulated
//! acknowledgment, and transport or API failures are absorbed into a
//! simulated acknowledgment annotated with the error detail. Availability
//! over correctness, as a typed outcome rather than a silent catch.

use serde_json::Value;

use crate::config::NotifierConfig;

/// How much of the message text makes it into the simulation log line.
const SIM_LOG_CHARS: usize = 100;

/// Outcome of a relay attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    /// The messaging API accepted the message.
    Sent {
        /// Raw API response body, passed through to the caller.
        response: Value,
    },
    /// Credentials are not configured; nothing was sent.
    Simulated,
    /// A transport or API failure was absorbed.
    SimulatedDueToError {
        /// Error detail for the response body.
        detail: String,
    },
}

impl RelayOutcome {
    /// Whether a real message reached the messaging API.
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

/// Credentials for live mode.
#[derive(Clone)]
struct Credentials {
    bot_token: String,
    chat_id: String,
}

/// Outbound relay to the messaging API.
pub struct Notifier {
    client: reqwest::Client,
    credentials: Option<Credentials>,
    api_base: String,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("live", &self.credentials.is_some())
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl Notifier {
    /// Build a notifier from configuration.
    ///
    /// The HTTP client carries the configured timeout so a stalled messaging
    /// API cannot suspend a request indefinitely.
    pub fn new(config: &NotifierConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        let credentials = match (&config.bot_token, &config.chat_id) {
            (Some(bot_token), Some(chat_id)) => Some(Credentials {
                bot_token: bot_token.clone(),
                chat_id: chat_id.clone(),
            }),
            _ => None,
        };

        Ok(Self {
            client,
            credentials,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Whether live credentials are configured.
    pub fn is_live(&self) -> bool {
        self.credentials.is_some()
    }

    /// Relay `text` to the messaging API.
    ///
    /// Never fails: unconfigured credentials yield [`RelayOutcome::Simulated`]
    /// and every transport/API failure yields
    /// [`RelayOutcome::SimulatedDueToError`].
    pub async fn send(&self, text: &str) -> RelayOutcome {
        let Some(credentials) = &self.credentials else {
            tracing::info!("Telegram simulation: {}", truncate(text, SIM_LOG_CHARS));
            return RelayOutcome::Simulated;
        };

        let url = format!("{}/bot{}/sendMessage", self.api_base, credentials.bot_token);
        let payload = build_payload(&credentials.chat_id, text);

        match self.client.post(&url).json(&payload).send().await {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    tracing::warn!("Messaging API returned {}", status);
                    return RelayOutcome::SimulatedDueToError {
                        detail: format!("messaging API returned {status}"),
                    };
                }
                match response.json::<Value>().await {
                    Ok(body) => {
                        tracing::debug!("Telegram message delivered");
                        RelayOutcome::Sent { response: body }
                    }
                    Err(e) => RelayOutcome::SimulatedDueToError {
                        detail: e.to_string(),
                    },
                }
            }
            Err(e) => {
                tracing::warn!("Telegram relay failed: {}", e);
                RelayOutcome::SimulatedDueToError {
                    detail: e.to_string(),
                }
            }
        }
    }
}

/// Actuator side-effect label for a message category.
///
/// The hub does not drive the actuator itself; the label tells the caller
/// what the downstream firmware does with this category.
pub fn esp32_action(kind: &str) -> &'static str {
    if kind == "alert" {
        "LED ON + BUZZER ON"
    } else {
        "No action"
    }
}

/// The `sendMessage` payload: chat id, text, HTML parse mode.
fn build_payload(chat_id: &str, text: &str) -> Value {
    serde_json::json!({
        "chat_id": chat_id,
        "text": text,
        "parse_mode": "HTML",
    })
}

/// Truncate a log line to a maximum character count.
///
/// Uses char boundaries to avoid splitting multi-byte UTF-8.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}
