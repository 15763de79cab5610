//! The persisted collection of locally authored entries.
//!
//! The collection lives under [`STUDENTS_KEY`] as a JSON array. Reads never
//! fail: a missing key, a store error or malformed JSON all read as empty.

use shared::domain::{Entry, EntryId};
use storage::KeyValueStore;
use thiserror::Error;

pub const STUDENTS_KEY: &str = "students";

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("failed to encode student collection: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write student collection: {0:#}")]
    Write(anyhow::Error),
}

pub async fn read_local_entries<S: KeyValueStore + ?Sized>(store: &S) -> Vec<Entry> {
    let raw = match store.get(STUDENTS_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!("reading local students failed, treating as empty: {err:#}");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Entry>>(&raw) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!("local students value is malformed, treating as empty: {err}");
            Vec::new()
        }
    }
}

/// Read-modify-write append. `build` sees the collection as read and returns
/// the entry to push. No lock spans the read and the write, so two writers
/// racing on the same store keep only the last write.
pub async fn append_local_entry<S, F>(store: &S, build: F) -> Result<Entry, CollectionError>
where
    S: KeyValueStore + ?Sized,
    F: FnOnce(&[Entry]) -> Entry + Send,
{
    let mut entries = read_local_entries(store).await;
    let entry = build(&entries);
    entries.push(entry.clone());
    let encoded = serde_json::to_string(&entries)?;
    store
        .set(STUDENTS_KEY, &encoded)
        .await
        .map_err(CollectionError::Write)?;
    tracing::info!(id = %entry.id, count = entries.len(), "appended local student");
    Ok(entry)
}

/// Timestamp identifier for a new local entry, bumped past the largest
/// existing identifier when the clock has not moved on.
pub fn next_local_id(existing: &[Entry], now_millis: i64) -> EntryId {
    let floor = existing
        .iter()
        .map(|entry| entry.id.0)
        .max()
        .map_or(i64::MIN, |max| max.saturating_add(1));
    EntryId(now_millis.max(floor))
}

#[cfg(test)]
#[path = "tests/collection_tests.rs"]
mod tests;
