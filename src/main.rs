use clap::Parser;
use color_eyre::Result;
use minihabit::{
    cli::{Cli, Commands},
    Config, Database, HabitStore, Profile,
};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    let cli = Cli::parse();

    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Logs go to a file in the data dir: stdout belongs to the TUI's
    // alternate screen
    init_tracing(profile);

    let config = Config::load_with_profile(profile)?;

    let db_path = config.get_database_path();
    let db = Database::new(
        db_path
            .to_str()
            .ok_or_else(|| color_eyre::eyre::eyre!("Database path contains invalid UTF-8"))?,
    )?;

    let mut store = HabitStore::load(db);

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = minihabit::tui::App::new(config, store, profile);
            minihabit::tui::run_event_loop(app)?;
        }
        Commands::Add {
            name,
            emoji,
            duration,
            remind,
        } => {
            minihabit::cli::handle_add(name, emoji, duration, remind, &mut store)?;
        }
        Commands::List => {
            minihabit::cli::handle_list(&store);
        }
        Commands::Done { name } => {
            minihabit::cli::handle_done(name, &mut store)?;
        }
        Commands::Undo { name } => {
            minihabit::cli::handle_undo(name, &mut store)?;
        }
        Commands::Remove { name } => {
            minihabit::cli::handle_remove(name, &mut store)?;
        }
    }

    Ok(())
}

/// Best-effort tracing setup; the app runs fine without a log file
fn init_tracing(profile: Profile) {
    let Some(data_dir) = minihabit::utils::get_data_dir(profile) else {
        return;
    };
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("minihabit.log"))
    else {
        return;
    };

    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(std::sync::Arc::new(file))
        .init();
}
