use clap::Parser;
use notesync::application::{init::init, ConfigService, SyncWorkflow};
use notesync::cli::{
    format_export_report, format_note_list, format_restore_report, Cli, Commands, RestoreFrom,
    TerminalSurface,
};
use notesync::error::NoteSyncError;
use notesync::infrastructure::{
    CommandClipboard, FileSystemRepository, HomeRepository, HttpPage, JsonFileStore,
    SnapshotStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing on stderr so stdout carries only command output
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "notesync=debug" } else { "notesync=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let surface = TerminalSurface::new();
    let result = run(cli, &surface).await;

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            if !surface.error_shown() {
                eprintln!("Error: {}", e.display_with_suggestions());
            }
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli, surface: &TerminalSurface) -> Result<(), NoteSyncError> {
    match cli.command {
        Commands::Init { path, base_url } => {
            let path = match path {
                Some(path) => path,
                None => FileSystemRepository::locate()?.root,
            };
            let config = init(&path, base_url)?;
            println!("Initialized notesync home at {}", path.display());
            println!("Page: {}", config.base_url);
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("base_url = {}", config.base_url);
                println!("request_timeout_secs = {}", config.request_timeout_secs);
                println!("copy_command = {}", config.get_copy_command());
                println!("paste_command = {}", config.get_paste_command());
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: notesync config [--list | <key> [<value>]]");
                println!("Valid keys: base_url, request_timeout_secs, copy_command, paste_command, created");
                Ok(())
            }
        }
        Commands::Show => {
            let repo = FileSystemRepository::discover()?;
            let store = JsonFileStore::new(repo.snapshot_path());
            let notes = SnapshotStore::new(&store)
                .load()
                .await?
                .map(|snapshot| snapshot.into_notes())
                .unwrap_or_default();
            print!("{}", format_note_list(&notes));
            if notes.is_empty() {
                println!();
            }
            Ok(())
        }
        command => {
            let repo = FileSystemRepository::discover()?;
            let config = repo.load_config()?;

            let page = HttpPage::new(config.get_base_url(), config.request_timeout_secs)?;
            let store = JsonFileStore::new(repo.snapshot_path());
            let clipboard =
                CommandClipboard::new(config.get_copy_command(), config.get_paste_command());
            let workflow = SyncWorkflow::new(&page, &page, &store, &clipboard, surface);

            match command {
                Commands::Status => {
                    // The surface prints one line per action
                    workflow.availability().await;
                }
                Commands::Export => {
                    let report = workflow.export_and_clear().await?;
                    println!("{}", format_export_report(&report));
                }
                Commands::Restore { from } => {
                    let report = match from {
                        RestoreFrom::Store => workflow.restore_from_store().await?,
                        RestoreFrom::Clipboard => workflow.restore_from_clipboard().await?,
                    };
                    println!("{}", format_restore_report(&report));
                }
                Commands::Init { .. } | Commands::Config { .. } | Commands::Show => {}
            }
            Ok(())
        }
    }
}
