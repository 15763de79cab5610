//! Directory view: local entries merged with one page of remote users.
//!
//! A load reads the persisted collection and fetches the remote page
//! independently. Only the remote outcome decides whether the view is ready
//! or failed; a failed view never exposes the local entries.

use shared::{domain::Entry, protocol::RemoteUser};
use storage::KeyValueStore;

use crate::{
    collection::read_local_entries,
    remote::{FetchError, RemoteDirectory},
};

pub const REMOTE_PAGE_SIZE: usize = 6;

/// Identifies one load. Results carrying an older ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
enum LoadPhase {
    Loading,
    Failed(String),
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryRender<'a> {
    Loading { placeholders: usize },
    Failed { message: &'a str },
    Ready { entries: Vec<&'a Entry> },
}

#[derive(Debug, Clone)]
pub struct DirectoryView {
    local: Vec<Entry>,
    remote: Vec<Entry>,
    phase: LoadPhase,
    query: String,
    generation: u64,
    current: Option<LoadTicket>,
    remote_resolved: bool,
}

impl Default for DirectoryView {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryView {
    pub fn new() -> Self {
        Self {
            local: Vec::new(),
            remote: Vec::new(),
            phase: LoadPhase::Loading,
            query: String::new(),
            generation: 0,
            current: None,
            remote_resolved: false,
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        let ticket = LoadTicket(self.generation);
        self.current = Some(ticket);
        self.remote_resolved = false;
        self.phase = LoadPhase::Loading;
        self.local.clear();
        self.remote.clear();
        ticket
    }

    /// Forget the in-flight load, e.g. when the view is closed. Whatever it
    /// eventually delivers is ignored.
    pub fn abandon(&mut self) {
        self.current = None;
    }

    /// True while `ticket` is the live load and its remote outcome has not
    /// arrived yet.
    pub fn is_pending(&self, ticket: LoadTicket) -> bool {
        self.current == Some(ticket) && !self.remote_resolved
    }

    /// Local and remote results may arrive in either order; the local subset
    /// is accepted for as long as `ticket` is the live load.
    pub fn apply_local(&mut self, ticket: LoadTicket, entries: Vec<Entry>) -> bool {
        if self.current != Some(ticket) {
            tracing::debug!(ticket = ticket.0, "dropping stale local entries");
            return false;
        }
        self.local = entries;
        true
    }

    pub fn resolve_remote(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<Vec<RemoteUser>, FetchError>,
    ) -> bool {
        if !self.is_pending(ticket) {
            tracing::debug!(ticket = ticket.0, "dropping stale remote result");
            return false;
        }
        self.remote_resolved = true;

        match outcome {
            Ok(users) => {
                self.remote = users
                    .into_iter()
                    .take(REMOTE_PAGE_SIZE)
                    .map(Entry::from)
                    .collect();
                self.phase = LoadPhase::Ready;
                tracing::info!(
                    local = self.local.len(),
                    remote = self.remote.len(),
                    "directory ready"
                );
            }
            Err(err) => {
                tracing::warn!("directory load failed: {err}");
                self.remote.clear();
                self.phase = LoadPhase::Failed(err.to_string());
            }
        }
        true
    }

    pub async fn load<S, R>(&mut self, store: &S, remote: &R)
    where
        S: KeyValueStore + ?Sized,
        R: RemoteDirectory + ?Sized,
    {
        let ticket = self.begin_load();
        let (local, fetched) = futures::join!(read_local_entries(store), remote.fetch_users());
        self.apply_local(ticket, local);
        self.resolve_remote(ticket, fetched);
    }

    /// The remote page arrived; the list and its search box are shown.
    pub fn is_ready(&self) -> bool {
        self.phase == LoadPhase::Ready
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn local_entries(&self) -> &[Entry] {
        &self.local
    }

    pub fn remote_entries(&self) -> &[Entry] {
        &self.remote
    }

    /// Local entries first, then remote. Colliding ids are kept as-is.
    pub fn merged(&self) -> impl Iterator<Item = &Entry> {
        self.local.iter().chain(self.remote.iter())
    }

    pub fn render(&self) -> DirectoryRender<'_> {
        match &self.phase {
            LoadPhase::Loading => DirectoryRender::Loading {
                placeholders: REMOTE_PAGE_SIZE,
            },
            LoadPhase::Failed(message) => DirectoryRender::Failed { message },
            LoadPhase::Ready => DirectoryRender::Ready {
                entries: filter_entries(self.merged(), &self.query),
            },
        }
    }
}

/// Case-insensitive substring match on name or email. An empty query keeps
/// everything.
pub fn filter_entries<'a, I>(entries: I, query: &str) -> Vec<&'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let needle = query.to_lowercase();
    entries
        .into_iter()
        .filter(|entry| {
            needle.is_empty()
                || entry.name.to_lowercase().contains(&needle)
                || entry.email.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/directory_tests.rs"]
mod tests;
