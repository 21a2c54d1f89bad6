pub mod types;

pub use types::{ChatMessage, Dialog, Entity, IncomingMessage, Participant, Sender};

use async_trait::async_trait;

use crate::errors::VigilError;

/// The messaging-platform collaborator. Connection, auth and wire details
/// live behind this seam; the engine only needs these calls.
///
/// Every method is fallible (permission, rate limit, not-found) and callers
/// degrade per the aggregator/orchestrator rules instead of aborting.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// List the account's dialogs, bounded.
    async fn dialogs(&self, limit: usize) -> Result<Vec<Dialog>, VigilError>;

    /// Fetch fresh metadata for an already-known entity.
    async fn entity_info(&self, entity: &Entity) -> Result<Entity, VigilError>;

    /// Fetch message history for an entity, newest first, bounded.
    async fn history(&self, entity: &Entity, limit: usize)
        -> Result<Vec<ChatMessage>, VigilError>;

    /// Fetch a bounded participant sample with phone numbers where the
    /// platform permits the listing.
    async fn participants(
        &self,
        entity: &Entity,
        limit: usize,
    ) -> Result<Vec<types::Participant>, VigilError>;

    /// Resolve an arbitrary identifier string (handle or bare name) to an
    /// entity.
    async fn resolve(&self, identifier: &str) -> Result<Entity, VigilError>;

    /// Send a text message to a destination handle.
    async fn send_message(&self, destination: &str, text: &str) -> Result<(), VigilError>;

    /// Await the next live message event. `None` means the subscription has
    /// ended and the live loop should stop.
    async fn next_event(&self) -> Option<IncomingMessage>;
}
