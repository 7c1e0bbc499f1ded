use wrestling_brackets::bracket::render::{inconsistent_count, render_report};
use wrestling_brackets::bracket::BracketProjector;
use wrestling_brackets::config::CONFIG;
use wrestling_brackets::db::{
    build_pool, raw_diesel_cxn_from_env, record_counts, require_existing_database,
    DieselConnectionManager,
};
use wrestling_brackets::models::participant_matches::DecidedMatch;
use wrestling_brackets::store::DieselBracketStore;

const SAMPLE_SIZE: i64 = 3;

// Exits non-zero if any tournament's bracket doesn't hang together
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    println!("Checking {}", CONFIG.database_url);
    require_existing_database(&CONFIG.database_url)?;

    {
        let mut db = raw_diesel_cxn_from_env()?;
        println!("\nRecord counts:");
        let counts = record_counts(&mut db)?;
        for (table, n) in &counts {
            println!("   {table}: {n}");
        }
        let total: i64 = counts.iter().map(|(_, n)| n).sum();
        println!("   total: {total}");

        println!("\nSample results:");
        for (i, d) in DecidedMatch::sample(SAMPLE_SIZE, &mut db)?.iter().enumerate() {
            println!("   {}. {d}", i + 1);
        }
    }

    let pool = build_pool(DieselConnectionManager::new_from_env(), CONFIG.db_pool_size).await?;
    let projector = BracketProjector::new(DieselBracketStore::new(pool), CONFIG.store_timeout);
    let reports = projector.validate_all().await?;
    println!("\nBrackets ({} tournaments):", reports.len());
    for (t, report) in &reports {
        print!("{}", render_report(t.display_name(), report));
    }

    let bad = inconsistent_count(&reports);
    if bad > 0 {
        anyhow::bail!("{bad} tournament(s) have inconsistent brackets");
    }
    println!("\nDatabase looks good");
    Ok(())
}
