use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{
    domain::{Entry, EntryId, Gender},
    protocol::RemoteUser,
};
use storage::KeyValueStore;

use crate::remote::{FetchError, RemoteDirectory};

pub struct FakeRemote {
    outcome: Result<Vec<RemoteUser>, FetchError>,
    calls: AtomicUsize,
}

impl FakeRemote {
    pub fn ok(users: Vec<RemoteUser>) -> Self {
        Self {
            outcome: Ok(users),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: FetchError) -> Self {
        Self {
            outcome: Err(err),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteDirectory for FakeRemote {
    async fn fetch_users(&self) -> Result<Vec<RemoteUser>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Reads fail and writes fail.
pub struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Err(anyhow!("disk unavailable while reading '{key}'"))
    }

    async fn set(&self, key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("disk full while writing '{key}'"))
    }
}

pub fn remote_users(count: i64) -> Vec<RemoteUser> {
    (1..=count)
        .map(|id| RemoteUser {
            id,
            name: format!("Remote User {id}"),
            email: format!("user{id}@example.org"),
            phone: format!("1-555-000-{id:04}"),
        })
        .collect()
}

pub fn local_entry(id: i64, name: &str, email: &str) -> Entry {
    Entry {
        id: EntryId(id),
        name: name.to_string(),
        email: email.to_string(),
        phone: "0123456789".to_string(),
        gender: Some(Gender::Female),
    }
}

pub fn encode(entries: &[Entry]) -> String {
    serde_json::to_string(entries).expect("encode entries")
}
