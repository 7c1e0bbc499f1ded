use clap::{Parser, ValueEnum};
use wrestling_brackets::bracket::render::{render_text, write_csv};
use wrestling_brackets::bracket::BracketProjector;
use wrestling_brackets::config::CONFIG;
use wrestling_brackets::db::{build_pool, require_existing_database, DieselConnectionManager};
use wrestling_brackets::store::DieselBracketStore;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
    Csv,
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Tournament id to print
    #[arg(short, long)]
    tournament: String,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    require_existing_database(&CONFIG.database_url)?;

    let pool = build_pool(DieselConnectionManager::new_from_env(), CONFIG.db_pool_size).await?;
    let projector = BracketProjector::new(DieselBracketStore::new(pool), CONFIG.store_timeout);
    let nodes = projector.project_bracket(&args.tournament).await?;

    match args.format {
        Format::Text => print!("{}", render_text(&nodes)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&nodes)?),
        Format::Csv => write_csv(&nodes, std::io::stdout())?,
    }
    Ok(())
}
