//! Presence peers

use discord_rich_presence::{activity, DiscordIpc, DiscordIpcClient};
use flixdesk_core::{ShellError, ShellResult};
use std::time::{SystemTime, UNIX_EPOCH};

/// A full presence update. Every update replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceState {
    pub details: String,
    pub state: String,
    pub large_image_key: String,
    pub large_image_text: String,
    /// Session start, seconds since the Unix epoch
    pub start: i64,
}

pub(crate) fn current_timestamp_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs() as i64)
        .unwrap_or(0)
}

/// The external status-broadcasting client
pub trait PresencePeer {
    /// Open the connection and complete the handshake
    fn connect(&mut self) -> ShellResult<()>;

    fn set_presence(&mut self, presence: &PresenceState) -> ShellResult<()>;

    fn disconnect(&mut self) -> ShellResult<()>;
}

/// Discord desktop client over its local IPC socket
pub struct DiscordPeer {
    application_id: String,
    client: Option<DiscordIpcClient>,
}

impl DiscordPeer {
    pub fn new(application_id: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            client: None,
        }
    }

    fn client(&mut self) -> ShellResult<&mut DiscordIpcClient> {
        self.client
            .as_mut()
            .ok_or_else(|| ShellError::presence("not connected"))
    }
}

impl PresencePeer for DiscordPeer {
    fn connect(&mut self) -> ShellResult<()> {
        let mut client = DiscordIpcClient::new(&self.application_id)
            .map_err(|e| ShellError::presence(e.to_string()))?;
        client
            .connect()
            .map_err(|e| ShellError::presence(e.to_string()))?;
        // The client library consumes the READY reply, user included.
        self.client = Some(client);
        Ok(())
    }

    fn set_presence(&mut self, presence: &PresenceState) -> ShellResult<()> {
        let payload = activity::Activity::new()
            .details(&presence.details)
            .state(&presence.state)
            .assets(
                activity::Assets::new()
                    .large_image(&presence.large_image_key)
                    .large_text(&presence.large_image_text),
            )
            .timestamps(activity::Timestamps::new().start(presence.start));

        self.client()?
            .set_activity(payload)
            .map_err(|e| ShellError::presence(e.to_string()))
    }

    fn disconnect(&mut self) -> ShellResult<()> {
        match self.client.take() {
            Some(mut client) => client
                .close()
                .map_err(|e| ShellError::presence(e.to_string())),
            None => Ok(()),
        }
    }
}
