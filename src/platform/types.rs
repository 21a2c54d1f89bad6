use chrono::{DateTime, Utc};

use crate::models::SourceKind;

/// A platform entity, resolved once at the collaborator boundary.
///
/// Raw platform records expose inconsistent optional attributes; everything
/// downstream works against this closed variant and its uniform accessors.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Broadcast {
        id: i64,
        handle: Option<String>,
        title: String,
        member_count: i64,
        description: String,
    },
    Group {
        id: i64,
        handle: Option<String>,
        title: String,
        member_count: i64,
        description: String,
    },
    Person {
        id: i64,
        handle: Option<String>,
        name: String,
    },
}

impl Entity {
    pub fn id(&self) -> i64 {
        match self {
            Self::Broadcast { id, .. } | Self::Group { id, .. } | Self::Person { id, .. } => *id,
        }
    }

    pub fn handle(&self) -> Option<&str> {
        match self {
            Self::Broadcast { handle, .. }
            | Self::Group { handle, .. }
            | Self::Person { handle, .. } => handle.as_deref(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Broadcast { title, .. } | Self::Group { title, .. } => title,
            Self::Person { name, .. } => name,
        }
    }

    pub fn member_count(&self) -> i64 {
        match self {
            Self::Broadcast { member_count, .. } | Self::Group { member_count, .. } => {
                *member_count
            }
            Self::Person { .. } => 0,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Broadcast { description, .. } | Self::Group { description, .. } => description,
            Self::Person { .. } => "",
        }
    }

    pub fn is_person(&self) -> bool {
        matches!(self, Self::Person { .. })
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Broadcast { .. } => SourceKind::Broadcast,
            Self::Group { .. } => SourceKind::Group,
            Self::Person { .. } => SourceKind::Unknown,
        }
    }

    /// Storage key: the public handle, or an opaque id-derived key for
    /// sources without one. NULL keys would defeat the unique upsert.
    pub fn source_key(&self) -> String {
        match self.handle() {
            Some(h) => h.to_string(),
            None => format!("id_{}", self.id()),
        }
    }
}

/// One entry of an account's dialog list.
#[derive(Debug, Clone)]
pub struct Dialog {
    pub entity: Entity,
}

/// Message author, as far as the platform reveals it.
#[derive(Debug, Clone, Default)]
pub struct Sender {
    pub username: Option<String>,
    pub display_name: Option<String>,
}

/// One message fetched from history or delivered live. `text` is `None`
/// for media-only messages, which the pipeline skips.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: i64,
    pub text: Option<String>,
    pub sender: Option<Sender>,
    pub timestamp: DateTime<Utc>,
}

/// One sampled participant. Only the phone number matters to the geo
/// sampler; it is absent when hidden by privacy settings.
#[derive(Debug, Clone, Default)]
pub struct Participant {
    pub phone: Option<String>,
}

/// A newly arriving message event from the live subscription.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub source: Entity,
    pub message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(handle: Option<&str>) -> Entity {
        Entity::Group {
            id: 42,
            handle: handle.map(|h| h.to_string()),
            title: "Test".into(),
            member_count: 10,
            description: String::new(),
        }
    }

    #[test]
    fn test_source_key_prefers_handle() {
        assert_eq!(group(Some("my_chat")).source_key(), "my_chat");
    }

    #[test]
    fn test_source_key_falls_back_to_id() {
        assert_eq!(group(None).source_key(), "id_42");
    }

    #[test]
    fn test_person_accessors() {
        let p = Entity::Person {
            id: 1,
            handle: None,
            name: "Alice".into(),
        };
        assert!(p.is_person());
        assert_eq!(p.title(), "Alice");
        assert_eq!(p.member_count(), 0);
        assert_eq!(p.description(), "");
    }

    #[test]
    fn test_kind_mapping() {
        let b = Entity::Broadcast {
            id: 1,
            handle: None,
            title: "News".into(),
            member_count: 0,
            description: String::new(),
        };
        assert_eq!(b.kind(), SourceKind::Broadcast);
        assert_eq!(group(None).kind(), SourceKind::Group);
    }
}
