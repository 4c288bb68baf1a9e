//! Runtime for executing conversations
//!
//! Owns the live conversations of this process. Each turn runs on its own
//! task so a failure inside one turn is answered with the fallback reply
//! instead of taking the request down. Conversations nobody has talked to
//! for a while are evicted by a background sweep.

mod conversation;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use conversation::{Conversation, ConversationSettings, Turn};
pub use traits::*;

use crate::state_machine::{ConversationState, Response};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),
}

/// Debug view of one conversation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: String,
    pub state: ConversationState,
    pub recent_turns: Vec<Turn>,
}

/// Manager for all live conversations
pub struct SessionManager {
    generator: Arc<dyn Generator>,
    settings: ConversationSettings,
    sessions: RwLock<HashMap<String, Arc<Mutex<Conversation>>>>,
}

impl SessionManager {
    pub fn new(generator: Arc<dyn Generator>, settings: ConversationSettings) -> Self {
        Self {
            generator,
            settings,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    fn new_conversation(&self) -> Arc<Mutex<Conversation>> {
        Arc::new(Mutex::new(Conversation::new(
            self.generator.clone(),
            &self.settings,
        )))
    }

    async fn get(&self, session_id: &str) -> Result<Arc<Mutex<Conversation>>, SessionError> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
    }

    /// Start a conversation and return its id with the opening greeting
    pub async fn create(&self) -> (String, Response) {
        let session_id = uuid::Uuid::new_v4().to_string();
        let conversation = self.new_conversation();
        self.sessions
            .write()
            .await
            .insert(session_id.clone(), conversation.clone());
        tracing::info!(session_id = %session_id, "Session created");

        let greeting = run_turn(conversation, String::new(), None).await;
        (session_id, greeting)
    }

    /// Process a message. Without a session id the turn runs on a throwaway
    /// conversation.
    pub async fn chat(
        &self,
        session_id: Option<&str>,
        message: String,
        episode_hint: Option<bool>,
    ) -> Result<Response, SessionError> {
        let conversation = match session_id {
            Some(id) => self.get(id).await?,
            None => self.new_conversation(),
        };
        Ok(run_turn(conversation, message, episode_hint).await)
    }

    pub async fn reset(&self, session_id: &str) -> Result<(), SessionError> {
        let conversation = self.get(session_id).await?;
        conversation.lock().await.reset_conversation();
        tracing::info!(session_id = %session_id, "Session reset");
        Ok(())
    }

    /// Drop a session; false if it did not exist
    pub async fn remove(&self, session_id: &str) -> bool {
        let removed = self.sessions.write().await.remove(session_id).is_some();
        if removed {
            tracing::info!(session_id = %session_id, "Session ended");
        }
        removed
    }

    pub async fn snapshot(&self, session_id: &str) -> Result<SessionSnapshot, SessionError> {
        let conversation = self.get(session_id).await?;
        let conversation = conversation.lock().await;
        Ok(SessionSnapshot {
            session_id: session_id.to_string(),
            state: conversation.state().clone(),
            recent_turns: conversation.history().cloned().collect(),
        })
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop every conversation idle for at least `max_idle`. Conversations
    /// in the middle of a turn are kept. Returns how many were dropped.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|session_id, conversation| {
            let Ok(conversation) = conversation.try_lock() else {
                return true;
            };
            let keep = conversation.idle_for() < max_idle;
            if !keep {
                tracing::debug!(session_id = %session_id, "Evicting idle session");
            }
            keep
        });
        before - sessions.len()
    }

    /// Sweep idle conversations every `interval` until the process exits
    pub fn spawn_idle_sweeper(
        self: &Arc<Self>,
        max_idle: Duration,
        interval: Duration,
    ) -> JoinHandle<()> {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let evicted = manager.evict_idle(max_idle).await;
                if evicted > 0 {
                    let active = manager.session_count().await;
                    tracing::info!(
                        evicted,
                        active,
                        "Idle sessions evicted"
                    );
                }
            }
        })
    }
}

/// Run one turn on its own task; a failed task yields the trouble reply
async fn run_turn(
    conversation: Arc<Mutex<Conversation>>,
    message: String,
    episode_hint: Option<bool>,
) -> Response {
    let handle = tokio::spawn(async move {
        let mut conversation = conversation.lock().await;
        conversation.process_turn(&message, episode_hint).await
    });

    match handle.await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Turn task failed");
            Response::trouble()
        }
    }
}
