use clap::{Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::{ConfigOverrides, StorageBackend, settings::Config};
use core_types::Student;
use std::net::IpAddr;
use std::path::PathBuf;

/// The main entry point for the Student Registry application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let overrides = match &cli.command {
        Commands::Serve(args) => ConfigOverrides {
            host: args.host,
            port: args.port,
            backend: args.backend,
        },
        Commands::List => ConfigOverrides::default(),
    };
    let config = configuration::load_config_from(&cli.config, &overrides)?;
    let _log_guard = configuration::init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(_) => web_server::run_server(&config).await,
        Commands::List => handle_list(&config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A small registry of student records served over HTTP.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. A missing file means defaults.
    #[arg(long, global = true, default_value = configuration::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server.
    Serve(ServeArgs),
    /// Print every stored student.
    List,
}

#[derive(Parser)]
struct ServeArgs {
    /// The address to listen on (e.g., "127.0.0.1").
    #[arg(long)]
    host: Option<IpAddr>,

    /// The port to listen on.
    #[arg(long)]
    port: Option<u16>,

    /// Where to keep student records.
    #[arg(long, value_enum)]
    backend: Option<StorageBackend>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Prints all stored students as a table.
async fn handle_list(config: &Config) -> anyhow::Result<()> {
    if config.database.backend == StorageBackend::Memory {
        tracing::warn!("The in-memory backend starts empty; there is nothing to list.");
    }
    let store = web_server::open_store(&config.database).await?;
    let students = store.list_all().await?;
    println!("{}", students_table(&students));
    Ok(())
}

fn students_table(students: &[Student]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Id", "Full name", "Email", "Course", "Age"]);
    for student in students {
        table.add_row(vec![
            student.id.to_string(),
            student.full_name.clone(),
            student.email.clone(),
            student.course.clone(),
            student.age.to_string(),
        ]);
    }
    table
}
