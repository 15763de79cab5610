//! Backend commands queued from UI to backend worker.

use client_core::{EntryForm, LoadTicket};

pub enum BackendCommand {
    LoadDashboard,
    LoadDirectory { ticket: LoadTicket },
    SubmitEntry { form: EntryForm },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadDashboard => "load_dashboard",
            BackendCommand::LoadDirectory { .. } => "load_directory",
            BackendCommand::SubmitEntry { .. } => "submit_entry",
        }
    }
}
