//! Rich presence for FlixDesk
//!
//! Publishes what the user is doing in the content view to a chat client's
//! status line. Entirely best-effort: a missing or failing client never
//! affects the shell.

pub mod activity;
pub mod peer;
pub mod reporter;

pub use activity::Activity;
pub use peer::{DiscordPeer, PresencePeer, PresenceState};
pub use reporter::{PresenceReporter, PresenceTracker};
