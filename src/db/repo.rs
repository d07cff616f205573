use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::RwLock;

use crate::db::error::{StoreError, StoreResult};
use crate::db::models::{Reply, Thread, User};

/// Persistence contract for users and threads.
///
/// Operations that check and then mutate are atomic with respect to each other.
#[async_trait]
pub trait ForumStore: Send + Sync {
    /// Returns every user whose email and password both match exactly.
    async fn find_users_by_credentials(&self, email: &str, password: &str) -> Vec<User>;

    async fn find_user(&self, id: &str) -> Option<User>;

    /// Adds the user unless one with the same email and password already exists.
    async fn insert_user(&self, user: User) -> StoreResult<()>;

    async fn find_thread(&self, id: &str) -> Option<Thread>;

    /// Returns all threads, most recently created first.
    async fn list_threads(&self) -> Vec<Thread>;

    /// Puts the thread at the front of the list and returns the updated list.
    async fn insert_thread(&self, thread: Thread) -> Vec<Thread>;

    /// Puts the reply at the front of the thread's replies.
    async fn append_reply(&self, thread_id: &str, reply: Reply) -> StoreResult<()>;

    /// Records a like, at most once per user per thread.
    async fn append_like(&self, thread_id: &str, user_id: &str) -> StoreResult<()>;
}

#[derive(Default)]
struct ForumData {
    users: Vec<User>,
    threads: VecDeque<Thread>,
}

impl ForumData {
    fn thread_mut(&mut self, id: &str) -> StoreResult<&mut Thread> {
        self.threads
            .iter_mut()
            .find(|thread| thread.id == id)
            .ok_or_else(|| StoreError::ThreadNotFound(id.to_string()))
    }
}

/// Process-memory store. Everything is lost on restart.
#[derive(Default)]
pub struct InMemoryStore {
    data: RwLock<ForumData>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn user_count(&self) -> usize {
        self.data.read().await.users.len()
    }
}

#[async_trait]
impl ForumStore for InMemoryStore {
    async fn find_users_by_credentials(&self, email: &str, password: &str) -> Vec<User> {
        self.data
            .read()
            .await
            .users
            .iter()
            .filter(|user| user.email == email && user.password == password)
            .cloned()
            .collect()
    }

    async fn find_user(&self, id: &str) -> Option<User> {
        self.data
            .read()
            .await
            .users
            .iter()
            .find(|user| user.id == id)
            .cloned()
    }

    async fn insert_user(&self, user: User) -> StoreResult<()> {
        let mut data = self.data.write().await;
        let exists = data
            .users
            .iter()
            .any(|u| u.email == user.email && u.password == user.password);
        if exists {
            return Err(StoreError::UserAlreadyExists);
        }
        data.users.push(user);
        Ok(())
    }

    async fn find_thread(&self, id: &str) -> Option<Thread> {
        self.data
            .read()
            .await
            .threads
            .iter()
            .find(|thread| thread.id == id)
            .cloned()
    }

    async fn list_threads(&self) -> Vec<Thread> {
        self.data.read().await.threads.iter().cloned().collect()
    }

    async fn insert_thread(&self, thread: Thread) -> Vec<Thread> {
        let mut data = self.data.write().await;
        data.threads.push_front(thread);
        data.threads.iter().cloned().collect()
    }

    async fn append_reply(&self, thread_id: &str, reply: Reply) -> StoreResult<()> {
        let mut data = self.data.write().await;
        data.thread_mut(thread_id)?.replies.push_front(reply);
        Ok(())
    }

    async fn append_like(&self, thread_id: &str, user_id: &str) -> StoreResult<()> {
        let mut data = self.data.write().await;
        let thread = data.thread_mut(thread_id)?;
        if thread.likes.iter().any(|like| like == user_id) {
            return Err(StoreError::AlreadyLiked(user_id.to_string()));
        }
        thread.likes.push(user_id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn user(id: &str, email: &str, password: &str) -> User {
        User {
            id: id.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            username: format!("name-{id}"),
        }
    }

    fn reply(text: &str) -> Reply {
        Reply {
            user_id: "u1".to_string(),
            name: "alice".to_string(),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_user_rejects_same_credentials() {
        let store = InMemoryStore::new();
        store.insert_user(user("u1", "a@x.com", "p")).await.unwrap();

        let result = store.insert_user(user("u2", "a@x.com", "p")).await;
        assert_eq!(result, Err(StoreError::UserAlreadyExists));
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_insert_user_allows_same_email_with_other_password() {
        let store = InMemoryStore::new();
        store.insert_user(user("u1", "a@x.com", "p")).await.unwrap();
        store.insert_user(user("u2", "a@x.com", "q")).await.unwrap();
        store.insert_user(user("u3", "A@x.com", "p")).await.unwrap();

        assert_eq!(store.user_count().await, 3);
        assert_eq!(store.find_users_by_credentials("a@x.com", "q").await.len(), 1);
        assert!(store.find_users_by_credentials("a@x.com", "z").await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_registration_keeps_one_user() {
        let store = Arc::new(InMemoryStore::new());
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert_user(user(&format!("u{i}"), "a@x.com", "p"))
                        .await
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_find_user_by_id() {
        let store = InMemoryStore::new();
        store.insert_user(user("u1", "a@x.com", "p")).await.unwrap();

        assert_eq!(store.find_user("u1").await.unwrap().username, "name-u1");
        assert!(store.find_user("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_insert_thread_prepends() {
        let store = InMemoryStore::new();
        let first = Thread::new("T1".to_string(), "u1".to_string());
        let second = Thread::new("T2".to_string(), "u1".to_string());

        let threads = store.insert_thread(first.clone()).await;
        assert_eq!(threads, vec![first.clone()]);

        let threads = store.insert_thread(second.clone()).await;
        assert_eq!(threads, vec![second.clone(), first.clone()]);
        assert_eq!(store.list_threads().await, vec![second, first]);
    }

    #[tokio::test]
    async fn test_append_like_once_per_user() {
        let store = InMemoryStore::new();
        let thread = Thread::new("T1".to_string(), "u1".to_string());
        let id = thread.id.clone();
        store.insert_thread(thread).await;

        store.append_like(&id, "bob").await.unwrap();
        assert_eq!(
            store.append_like(&id, "bob").await,
            Err(StoreError::AlreadyLiked("bob".to_string()))
        );
        store.append_like(&id, "carol").await.unwrap();

        let likes = store.find_thread(&id).await.unwrap().likes;
        assert_eq!(likes, vec!["bob".to_string(), "carol".to_string()]);
    }

    #[tokio::test]
    async fn test_append_reply_prepends() {
        let store = InMemoryStore::new();
        let thread = Thread::new("T1".to_string(), "u1".to_string());
        let id = thread.id.clone();
        store.insert_thread(thread).await;

        store.append_reply(&id, reply("R1")).await.unwrap();
        store.append_reply(&id, reply("R2")).await.unwrap();

        let replies = store.find_thread(&id).await.unwrap().replies;
        let texts: Vec<_> = replies.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["R2", "R1"]);
    }

    #[tokio::test]
    async fn test_unknown_thread_is_reported() {
        let store = InMemoryStore::new();

        assert_eq!(
            store.append_like("nope", "bob").await,
            Err(StoreError::ThreadNotFound("nope".to_string()))
        );
        assert_eq!(
            store.append_reply("nope", reply("R1")).await,
            Err(StoreError::ThreadNotFound("nope".to_string()))
        );
        assert!(store.find_thread("nope").await.is_none());
    }
}
