use crate::error::{NotificationError, StartupError};
use async_trait::async_trait;
use tokio::time::Duration;

const PUSHOVER_URL: &str = "https://api.pushover.net/1/messages.json";

/// One-line alert to whoever the assistant speaks for. Best-effort.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), NotificationError>;
}

#[derive(Clone)]
pub struct PushoverNotifier {
    user: String,
    token: String,
    endpoint: String,
    http: reqwest::Client,
}

impl PushoverNotifier {
    pub fn new(user: String, token: String) -> Result<Self, StartupError> {
        Self::with_endpoint(user, token, PUSHOVER_URL.to_string())
    }

    /// Same as [`PushoverNotifier::new`] but posting to `endpoint` instead of the Pushover API.
    pub fn with_endpoint(user: String, token: String, endpoint: String) -> Result<Self, StartupError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            user,
            token,
            endpoint,
            http,
        })
    }
}

#[async_trait]
impl Notifier for PushoverNotifier {
    async fn notify(&self, text: &str) -> Result<(), NotificationError> {
        let form = [
            ("user", self.user.as_str()),
            ("token", self.token.as_str()),
            ("message", text),
        ];
        let resp = self.http.post(&self.endpoint).form(&form).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        tracing::debug!("push notification delivered");
        Ok(())
    }
}
