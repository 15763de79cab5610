//! Client-side logic for the student directory: the persisted collection,
//! the merged directory view, the entry form and the remote user list.
//!
//! Storage and network are injected through [`storage::KeyValueStore`] and
//! [`RemoteDirectory`], so everything here runs against fakes in tests.

pub mod collection;
pub mod config;
pub mod dashboard;
pub mod directory;
pub mod entry_form;
pub mod remote;

pub use collection::{
    append_local_entry, next_local_id, read_local_entries, CollectionError, STUDENTS_KEY,
};
pub use dashboard::DashboardSummary;
pub use directory::{filter_entries, DirectoryRender, DirectoryView, LoadTicket, REMOTE_PAGE_SIZE};
pub use entry_form::{
    EntryForm, FieldErrors, FormField, SubmitOutcome, ValidationError, PHONE_MAX_LEN,
};
pub use remote::{FetchError, HttpRemoteDirectory, RemoteDirectory, DEFAULT_REMOTE_USERS_URL};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
