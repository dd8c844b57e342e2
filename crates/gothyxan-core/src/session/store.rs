//! In-memory chat session store.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell, RwLock};

use super::{ChatId, ChatSession, TRACING_TARGET};
use crate::{BackendService, Error, Result};

/// Chat state shared between concurrent events of the same chat.
///
/// Holding the lock serializes mutations for one chat; different chats never
/// contend.
pub type SharedChatSession = Arc<Mutex<ChatSession>>;

type SessionSlot = Arc<OnceCell<SharedChatSession>>;

/// Process-lifetime mapping from chat to [`ChatSession`].
///
/// Sessions are created lazily by [`ensure_session`], never evicted and never
/// persisted. Cloning the store is cheap and every clone shares the same map.
///
/// [`ensure_session`]: ChatSessionStore::ensure_session
#[derive(Clone)]
pub struct ChatSessionStore {
    backend: BackendService,
    sessions: Arc<RwLock<HashMap<ChatId, SessionSlot>>>,
}

impl fmt::Debug for ChatSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatSessionStore").finish_non_exhaustive()
    }
}

impl ChatSessionStore {
    /// Creates an empty store that logs in through `backend`.
    pub fn new(backend: BackendService) -> Self {
        Self {
            backend,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the chat's session, logging in on first contact.
    ///
    /// Concurrent first contacts for the same chat share a single login. When
    /// the login fails nothing is stored and the next call tries again.
    pub async fn ensure_session(
        &self,
        chat_id: ChatId,
        telegram_user_id: i64,
        username: Option<&str>,
    ) -> Result<SharedChatSession> {
        let slot = self.slot(chat_id).await;

        let session = slot
            .get_or_try_init(|| async {
                tracing::info!(
                    target: TRACING_TARGET,
                    chat_id = %chat_id,
                    telegram_user_id,
                    "Establishing backend session"
                );

                let backend_session = self
                    .backend
                    .login(&telegram_user_id.to_string(), username)
                    .await?;

                Ok::<_, Error>(Arc::new(Mutex::new(ChatSession::new(backend_session))))
            })
            .await
            .inspect_err(|error| {
                tracing::warn!(
                    target: TRACING_TARGET,
                    chat_id = %chat_id,
                    error = %error,
                    "Backend login failed"
                );
            })?;

        Ok(Arc::clone(session))
    }

    /// Returns the chat's session if one was established.
    pub async fn get(&self, chat_id: ChatId) -> Option<SharedChatSession> {
        let sessions = self.sessions.read().await;
        sessions.get(&chat_id).and_then(|slot| slot.get()).cloned()
    }

    /// Returns the number of established sessions.
    pub async fn len(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.values().filter(|slot| slot.initialized()).count()
    }

    /// Returns true when no session was established yet.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn slot(&self, chat_id: ChatId) -> SessionSlot {
        let existing = self.sessions.read().await.get(&chat_id).cloned();
        match existing {
            Some(slot) => slot,
            None => {
                let mut sessions = self.sessions.write().await;
                Arc::clone(sessions.entry(chat_id).or_default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::backend::MockBackend;

    #[tokio::test]
    async fn test_single_login_per_chat() {
        let mock = MockBackend::new();
        let store = ChatSessionStore::new(mock.service());

        let first = store
            .ensure_session(ChatId(42), 7, Some("neo"))
            .await
            .unwrap();
        let second = store.ensure_session(ChatId(42), 7, None).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(mock.calls().login, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_fresh_state_on_creation() {
        let store = ChatSessionStore::new(MockBackend::new().service());
        let session = store.ensure_session(ChatId(1), 1, None).await.unwrap();
        let chat = session.lock().await;

        assert_eq!(chat.session.access_token(), "access-login-1");
        assert_eq!(chat.preferences.style, "streetwear");
        assert!(chat.last_outfit.is_none());
    }

    #[tokio::test]
    async fn test_chats_are_isolated() {
        let mock = MockBackend::new();
        let store = ChatSessionStore::new(mock.service());

        let a = store.ensure_session(ChatId(1), 1, None).await.unwrap();
        let b = store.ensure_session(ChatId(2), 2, None).await.unwrap();
        a.lock().await.preferences.set_style("goth").unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(b.lock().await.preferences.style, "streetwear");
        assert_eq!(mock.calls().login, 2);
    }

    #[tokio::test]
    async fn test_failed_login_stores_nothing() {
        let mock = MockBackend::new();
        mock.push_login(Err(Error::backend(500, "down")));
        let store = ChatSessionStore::new(mock.service());

        let error = store.ensure_session(ChatId(9), 9, None).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Backend);
        assert!(store.get(ChatId(9)).await.is_none());
        assert!(store.is_empty().await);

        store.ensure_session(ChatId(9), 9, None).await.unwrap();
        assert!(store.get(ChatId(9)).await.is_some());
        assert_eq!(mock.calls().login, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_contact() {
        let mock = MockBackend::new();
        let store = ChatSessionStore::new(mock.service());

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.ensure_session(ChatId(5), 5, None).await })
            })
            .collect();

        let mut sessions = Vec::new();
        for task in tasks {
            sessions.push(task.await.unwrap().unwrap());
        }

        assert_eq!(mock.calls().login, 1);
        assert!(sessions.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
