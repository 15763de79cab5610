//! Backend worker thread: owns the tokio runtime, the store and the remote
//! directory, and answers UI commands with UI events.

use std::{sync::Arc, thread};

use client_core::{
    config::{normalize_database_url, ClientSettings},
    read_local_entries, DashboardSummary, HttpRemoteDirectory, LoadTicket, RemoteDirectory,
    SubmitOutcome,
};
use crossbeam_channel::{Receiver, Sender};
use storage::{KeyValueStore, Storage};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                report_startup_failure(&ui_tx, format!("failed to build runtime: {err}"));
                return;
            }
        };

        runtime.block_on(async move {
            let (store, remote) = match open_backends(&settings).await {
                Ok(backends) => backends,
                Err(err) => {
                    report_startup_failure(&ui_tx, format!("{err:#}"));
                    return;
                }
            };
            tracing::info!(
                database_url = %settings.database_url,
                remote_url = %settings.remote_users_url,
                "backend worker ready"
            );
            let _ = ui_tx.try_send(UiEvent::BackendReady);

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LoadDirectory { ticket } => {
                        // Runs detached so a slow remote never holds up a submit.
                        let store = Arc::clone(&store);
                        let remote = Arc::clone(&remote);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            load_directory(&*store, &*remote, ticket, &ui_tx).await;
                        });
                    }
                    other => handle_command(other, &*store, &*remote, &ui_tx).await,
                }
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}

async fn open_backends(
    settings: &ClientSettings,
) -> anyhow::Result<(Arc<dyn KeyValueStore>, Arc<dyn RemoteDirectory>)> {
    let database_url = normalize_database_url(&settings.database_url);
    let storage = Storage::new(&database_url).await?;
    let remote_url = settings.remote_url()?;
    let remote = HttpRemoteDirectory::new(remote_url.as_str(), settings.request_timeout())?;
    let store: Arc<dyn KeyValueStore> = Arc::new(storage);
    let remote: Arc<dyn RemoteDirectory> = Arc::new(remote);
    Ok((store, remote))
}

fn report_startup_failure(ui_tx: &Sender<UiEvent>, detail: String) {
    tracing::error!("backend worker startup failure: {detail}");
    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
        UiErrorContext::BackendStartup,
        format!("backend worker startup failure: {detail}"),
    )));
}

pub(crate) async fn handle_command<S, R>(
    cmd: BackendCommand,
    store: &S,
    remote: &R,
    ui_tx: &Sender<UiEvent>,
) where
    S: KeyValueStore + ?Sized,
    R: RemoteDirectory + ?Sized,
{
    match cmd {
        BackendCommand::LoadDashboard => {
            let summary = DashboardSummary::load(store).await;
            let _ = ui_tx.try_send(UiEvent::DashboardLoaded(summary));
        }
        BackendCommand::LoadDirectory { ticket } => {
            load_directory(store, remote, ticket, ui_tx).await;
        }
        BackendCommand::SubmitEntry { mut form } => {
            let result = form.submit(store).await;
            match result {
                Ok(outcome) => {
                    if let SubmitOutcome::Saved(entry) = &outcome {
                        tracing::info!(id = %entry.id, "student saved");
                        let _ = ui_tx.try_send(UiEvent::Info(format!("Saved {}", entry.name)));
                    }
                    let _ = ui_tx.try_send(UiEvent::EntrySubmitted { form });
                }
                Err(err) => {
                    tracing::error!("failed to save student: {err}");
                    let error =
                        UiError::from_message(UiErrorContext::SubmitEntry, err.to_string());
                    let _ = ui_tx.try_send(UiEvent::EntrySubmitFailed { form, error });
                }
            }
        }
    }
}

/// The local read and the remote fetch run side by side and each reports as
/// soon as it finishes.
async fn load_directory<S, R>(store: &S, remote: &R, ticket: LoadTicket, ui_tx: &Sender<UiEvent>)
where
    S: KeyValueStore + ?Sized,
    R: RemoteDirectory + ?Sized,
{
    let local = async {
        let entries = read_local_entries(store).await;
        let _ = ui_tx.try_send(UiEvent::DirectoryLocalLoaded { ticket, entries });
    };
    let fetched = async {
        let result = remote.fetch_users().await;
        let _ = ui_tx.try_send(UiEvent::DirectoryRemoteResolved { ticket, result });
    };
    futures::join!(local, fetched);
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
