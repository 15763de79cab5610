use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings, normalize_database_url},
    DashboardSummary, DirectoryRender, DirectoryView, EntryForm, FormField, HttpRemoteDirectory,
    SubmitOutcome,
};
use shared::domain::Entry;
use storage::Storage;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long)]
    database_url: Option<String>,
    #[arg(long)]
    remote_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print local entries followed by the first remote page.
    List {
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Validate and append one local entry.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        gender: String,
    },
    /// Print how many entries are stored locally.
    Count,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(url) = cli.database_url {
        settings.database_url = url;
    }
    if let Some(url) = cli.remote_url {
        settings.remote_users_url = url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let storage = Storage::new(&normalize_database_url(&settings.database_url)).await?;

    match cli.command {
        Command::List { query } => {
            let remote = HttpRemoteDirectory::new(
                settings.remote_url()?.as_str(),
                settings.request_timeout(),
            )?;
            let mut view = DirectoryView::new();
            view.set_query(query);
            view.load(&storage, &remote).await;
            match view.render() {
                DirectoryRender::Ready { entries } => {
                    tracing::info!(shown = entries.len(), "listed students");
                    for entry in entries {
                        print_entry(entry);
                    }
                }
                DirectoryRender::Failed { message } => {
                    tracing::warn!("remote directory unavailable: {message}");
                    bail!("Critical Failure: {message}");
                }
                DirectoryRender::Loading { .. } => bail!("directory load did not complete"),
            }
        }
        Command::Add {
            name,
            email,
            phone,
            gender,
        } => {
            let mut form = EntryForm::new();
            form.set_text(FormField::Name, name);
            form.set_text(FormField::Email, email);
            form.set_text(FormField::Phone, phone);
            form.set_text(FormField::Gender, gender);

            match form.submit(&storage).await? {
                SubmitOutcome::Saved(entry) => {
                    tracing::info!(id = %entry.id, "student added");
                    println!("{}", form.success_message().unwrap_or_default());
                    print_entry(&entry);
                }
                SubmitOutcome::Rejected(errors) => {
                    tracing::warn!(failures = errors.iter().count(), "entry rejected");
                    for err in errors.iter() {
                        eprintln!("ERR: {err}");
                    }
                    bail!("entry rejected");
                }
            }
        }
        Command::Count => {
            let summary = DashboardSummary::load(&storage).await;
            println!("{}", summary.headline());
        }
    }

    Ok(())
}

fn print_entry(entry: &Entry) {
    let gender = entry.gender.map(|g| g.to_string()).unwrap_or_default();
    println!(
        "Entry #{}\t{}\t{}\t{}\t{}",
        entry.id, entry.name, entry.email, entry.phone, gender
    );
}
