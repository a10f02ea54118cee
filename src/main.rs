use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use listkeeper::application::services::{
    AddOutcome, DeleteOutcome, LoadOutcome, SaveOutcome, SelectOutcome, WriteOutcome,
};
use listkeeper::application::{ListConfigSynchronizer, PropertyRenderer, StoreAction, StoreHandle};
use listkeeper::domain::entities::{Entity, EntityConfig};
use listkeeper::domain::ports::LocalizationPort;
use listkeeper::infrastructure::{
    AppConfig, ChronoDateTimeFormatter, CliArgs, Command, StorageManager, StringCatalog,
    ToastNotifier, TomlListConfigStorage,
};
use listkeeper::presentation::ListConfigPanel;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let manager = StorageManager::new().wrap_err("Failed to locate configuration directory")?;
    let mut config = manager
        .load_config(args.config.as_deref())
        .wrap_err("Failed to load configuration")?;
    config.merge_with_args(args);
    Ok(config)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).wrap_err_with(|| format!("Failed to parse {}", path.display()))
}

fn formatter(config: &AppConfig) -> ChronoDateTimeFormatter {
    ChronoDateTimeFormatter::new(config.ui.timestamp_format.clone())
        .with_offset_minutes(config.ui.utc_offset_minutes)
}

fn render(config: &AppConfig, schema: &Path, entity: &Path) -> Result<()> {
    let schemas: Vec<EntityConfig> = read_json(schema)?;
    let entity: Entity = read_json(entity)?;

    let renderer = PropertyRenderer::new(Arc::new(formatter(config)));
    let view = renderer.render_entity(&entity, &schemas);
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn confirm(strings: &StringCatalog) -> Result<bool> {
    print!("{} [y/N] ", strings.translate("confirmDelete"));
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn print_configs(store: &StoreHandle) {
    store.select(|store| {
        let active = store.list_config_id();
        for config in store.list_configs() {
            let marker = if active == Some(config.id.as_str()) { '*' } else { ' ' };
            if config.themes.is_empty() {
                println!("{marker} {}  {}", config.id, config.name);
            } else {
                println!(
                    "{marker} {}  {}  [{}]",
                    config.id,
                    config.name,
                    config.themes.join(", ")
                );
            }
        }
    });
}

fn flush_toasts(notifier: &ToastNotifier) {
    for toast in notifier.drain() {
        eprintln!("[{}] {}", toast.level, toast.message);
    }
}

async fn run_command(config: &AppConfig, command: Command) -> Result<()> {
    let data_dir = config
        .effective_data_dir()
        .ok_or_else(|| eyre!("Could not determine data directory"))?;
    let strings = StringCatalog::new().with_overrides(&config.strings);
    let notifier = ToastNotifier::new(Duration::from_secs(config.ui.notification_duration));
    let store = StoreHandle::default();
    store.dispatch(StoreAction::SetTheme(config.ui.theme.to_string()));

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let sync = Arc::new(ListConfigSynchronizer::new(
        Arc::new(TomlListConfigStorage::new(&data_dir, config.user_id.clone())),
        Arc::new(notifier.clone()),
        Arc::new(strings.clone()),
        store.clone(),
        events_tx,
    ));
    let mut panel = ListConfigPanel::new(sync.clone(), store.clone(), false);

    if panel.mount().await == LoadOutcome::Failed {
        flush_toasts(&notifier);
        bail!("Failed to load list configurations from {}", data_dir.display());
    }

    let failed = match command {
        Command::List | Command::Render { .. } => false,
        Command::Add => panel.add().await == AddOutcome::Failed,
        Command::Select { id } => {
            if sync.select(&id).await == SelectOutcome::Unknown {
                bail!("Unknown list configuration: {id}");
            }
            false
        }
        Command::Rename { name } => {
            panel.enable_edit_mode();
            panel.focus_name();
            panel.type_name(name);
            panel.submit_name().await == SaveOutcome::Failed
        }
        Command::Delete { yes } => {
            panel.request_delete();
            let confirmed = yes || confirm(&strings)?;
            matches!(
                panel.confirm_delete(confirmed).await,
                Some(DeleteOutcome::Failed)
            )
        }
        Command::Themes { names } => {
            panel.update_themes(names.clone());
            panel.save_themes(names).await == WriteOutcome::Failed
        }
    };

    while let Ok(event) = events_rx.try_recv() {
        debug!(event = event.name(), "UI event");
    }
    flush_toasts(&notifier);
    print_configs(&store);

    if failed {
        bail!("Operation failed");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = dotenvy::dotenv();

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    info!(version = listkeeper::VERSION, "Starting {}", listkeeper::NAME);

    match args.command.unwrap_or(Command::List) {
        Command::Render { schema, entity } => render(&config, &schema, &entity),
        command => run_command(&config, command).await,
    }
}
