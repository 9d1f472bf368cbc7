use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::catalog::PersonalizationClient;
use crate::config::{SourceConfig, SourceMode};
use crate::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    View,
    Like,
    Bookmark,
    Share,
    Rate,
}

impl InteractionKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "view" => Some(InteractionKind::View),
            "like" => Some(InteractionKind::Like),
            "bookmark" => Some(InteractionKind::Bookmark),
            "share" => Some(InteractionKind::Share),
            "rate" => Some(InteractionKind::Rate),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InteractionKind::View => "view",
            InteractionKind::Like => "like",
            InteractionKind::Bookmark => "bookmark",
            InteractionKind::Share => "share",
            InteractionKind::Rate => "rate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub username: String,
    pub post_id: u64,
    pub interaction_type: InteractionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction_value: Option<f64>,
}

#[async_trait::async_trait]
pub trait InteractionTransport: Send + Sync {
    async fn send(&self, interaction: &Interaction) -> Result<(), TransportError>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingTransport;

#[async_trait::async_trait]
impl InteractionTransport for LoggingTransport {
    async fn send(&self, interaction: &Interaction) -> Result<(), TransportError> {
        info!(
            username = %interaction.username,
            post_id = interaction.post_id,
            action = interaction.interaction_type.label(),
            "interaction recorded locally"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "logging"
    }
}

#[derive(Clone)]
pub struct InteractionRecorder {
    transport: Arc<dyn InteractionTransport>,
}

impl InteractionRecorder {
    pub fn new(transport: Arc<dyn InteractionTransport>) -> Self {
        Self { transport }
    }

    pub fn logging() -> Self {
        Self::new(Arc::new(LoggingTransport))
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self, String> {
        match config.to_mode() {
            SourceMode::Local => Ok(Self::logging()),
            SourceMode::Remote => {
                let client = PersonalizationClient::from_config(config)?;
                Ok(Self::new(Arc::new(client)))
            }
        }
    }

    /// Returns `false` when the transport fails. Failures are logged and not retried.
    pub async fn record(
        &self,
        username: &str,
        post_id: u64,
        kind: InteractionKind,
        value: Option<f64>,
    ) -> bool {
        let interaction = Interaction {
            username: username.to_string(),
            post_id,
            interaction_type: kind,
            interaction_value: value,
        };

        match self.transport.send(&interaction).await {
            Ok(()) => {
                debug!(
                    transport = self.transport.name(),
                    post_id,
                    action = kind.label(),
                    "interaction recorded"
                );
                true
            }
            Err(err) => {
                warn!(
                    transport = self.transport.name(),
                    username,
                    post_id,
                    action = kind.label(),
                    error = %err,
                    "failed to record interaction"
                );
                false
            }
        }
    }
}
