#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{mpsc, Mutex};

use vigil::errors::VigilError;
use vigil::platform::{
    ChatMessage, Dialog, Entity, IncomingMessage, Participant, PlatformClient, Sender,
};

/// In-memory platform client scripted per test: fixed dialogs, per-source
/// histories and participant samples, an optional live event feed, and a
/// log of every message sent through it.
#[derive(Default)]
pub struct ScriptedClient {
    pub dialogs: Vec<Dialog>,
    pub histories: HashMap<String, Vec<ChatMessage>>,
    pub participants: HashMap<String, Vec<Participant>>,
    pub resolvable: HashMap<String, Entity>,
    pub events: Option<Mutex<mpsc::UnboundedReceiver<IncomingMessage>>>,
    pub sent: StdMutex<Vec<(String, String)>>,
}

impl ScriptedClient {
    pub fn with_dialog(mut self, entity: Entity, history: Vec<ChatMessage>) -> Self {
        self.histories.insert(entity.source_key(), history);
        self.dialogs.push(Dialog { entity });
        self
    }

    pub fn with_resolvable(mut self, identifier: &str, entity: Entity, history: Vec<ChatMessage>) -> Self {
        self.histories.insert(entity.source_key(), history);
        self.resolvable.insert(identifier.to_string(), entity);
        self
    }

    pub fn with_participants(mut self, entity: &Entity, participants: Vec<Participant>) -> Self {
        self.participants.insert(entity.source_key(), participants);
        self
    }

    pub fn with_events(mut self, rx: mpsc::UnboundedReceiver<IncomingMessage>) -> Self {
        self.events = Some(Mutex::new(rx));
        self
    }

    pub fn sent_messages(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformClient for ScriptedClient {
    async fn dialogs(&self, limit: usize) -> Result<Vec<Dialog>, VigilError> {
        Ok(self.dialogs.iter().take(limit).cloned().collect())
    }

    async fn entity_info(&self, entity: &Entity) -> Result<Entity, VigilError> {
        Ok(entity.clone())
    }

    async fn history(&self, entity: &Entity, limit: usize) -> Result<Vec<ChatMessage>, VigilError> {
        Ok(self
            .histories
            .get(&entity.source_key())
            .map(|h| h.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn participants(
        &self,
        entity: &Entity,
        limit: usize,
    ) -> Result<Vec<Participant>, VigilError> {
        match self.participants.get(&entity.source_key()) {
            Some(p) => Ok(p.iter().take(limit).cloned().collect()),
            None => Err(VigilError::Platform("participant listing denied".into())),
        }
    }

    async fn resolve(&self, identifier: &str) -> Result<Entity, VigilError> {
        self.resolvable
            .get(identifier)
            .cloned()
            .ok_or_else(|| VigilError::Resolution(identifier.to_string()))
    }

    async fn send_message(&self, destination: &str, text: &str) -> Result<(), VigilError> {
        self.sent
            .lock()
            .unwrap()
            .push((destination.to_string(), text.to_string()));
        Ok(())
    }

    async fn next_event(&self) -> Option<IncomingMessage> {
        match &self.events {
            Some(rx) => rx.lock().await.recv().await,
            None => None,
        }
    }
}

pub fn group(handle: &str, title: &str) -> Entity {
    Entity::Group {
        id: handle.len() as i64,
        handle: Some(handle.to_string()),
        title: title.to_string(),
        member_count: 250,
        description: String::new(),
    }
}

pub fn broadcast(handle: &str, title: &str) -> Entity {
    Entity::Broadcast {
        id: handle.len() as i64 + 1000,
        handle: Some(handle.to_string()),
        title: title.to_string(),
        member_count: 5000,
        description: String::new(),
    }
}

pub fn person(name: &str) -> Entity {
    Entity::Person {
        id: 1,
        handle: None,
        name: name.to_string(),
    }
}

pub fn message(id: i64, text: &str) -> ChatMessage {
    ChatMessage {
        id,
        text: Some(text.to_string()),
        sender: Some(Sender {
            username: Some("author".to_string()),
            display_name: Some("Author".to_string()),
        }),
        timestamp: Utc::now(),
    }
}

pub fn participant(phone: Option<&str>) -> Participant {
    Participant {
        phone: phone.map(|p| p.to_string()),
    }
}
