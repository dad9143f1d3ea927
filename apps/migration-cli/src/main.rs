use clap::{Parser, ValueEnum};
use migration::{migrate, MigrationCommand};
use tracing::{error, info};
use wordwolf::config::db::{DbOwner, DbProfile};
use wordwolf::infra::db::connect_db;

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Word-wolf database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Postgres database to target (ignored with --sqlite-file)
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,

    /// Migrate this SQLite file instead of Postgres. In-memory databases are
    /// not offered: they vanish when the command exits.
    #[arg(long)]
    sqlite_file: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,migration_cli=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let profile = match (args.sqlite_file, args.env) {
        (Some(file), _) => DbProfile::SqliteFile { file },
        (None, Env::Prod) => DbProfile::Prod,
        (None, Env::Test) => DbProfile::Test,
    };

    let conn = match connect_db(&profile, DbOwner::Owner).await {
        Ok(conn) => conn,
        Err(e) => {
            error!(error = %e, ?profile, "could not connect");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&conn, args.command.into()).await {
        error!(error = %e, "migration failed");
        std::process::exit(1);
    }
    info!(?profile, "migration finished");
}
