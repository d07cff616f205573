use rand::RngExt;
use rand::rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

const ID_LEN: usize = 8;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: String,
    pub title: String,
    pub user_id: String,
    /// Most recent reply first.
    pub replies: VecDeque<Reply>,
    /// User ids, in the order the likes arrived.
    pub likes: Vec<String>,
}

impl Thread {
    pub fn new(title: String, user_id: String) -> Self {
        Self {
            id: generate_id(),
            title,
            user_id,
            replies: VecDeque::new(),
            likes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub user_id: String,
    pub name: String,
    pub text: String,
}

/// Returns a random 8 character base-36 id.
///
/// Collisions are possible and are not checked for.
pub fn generate_id() -> String {
    let mut rng = rng();
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}
