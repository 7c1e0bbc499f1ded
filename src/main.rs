use log::info;
use wrestling_brackets::bracket::BracketProjector;
use wrestling_brackets::config::CONFIG;
use wrestling_brackets::db::{
    build_pool, raw_diesel_cxn_from_env, run_migrations, DieselConnectionManager,
};
use wrestling_brackets::store::{BracketStore, DieselBracketStore};
use wrestling_brackets::web::launch_website;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    log4rs::init_file(&CONFIG.log4rs_config_file, Default::default())?;
    info!("Starting bracket server");

    {
        let mut cxn = raw_diesel_cxn_from_env()?;
        run_migrations(&mut cxn)?;
    }
    let pool = build_pool(DieselConnectionManager::new_from_env(), CONFIG.db_pool_size).await?;
    let store: Box<dyn BracketStore> = Box::new(DieselBracketStore::new(pool));
    let projector = BracketProjector::new(store, CONFIG.store_timeout);

    // rocket owns ctrl-c handling from here on
    launch_website(projector)
        .await
        .map_err(|e| anyhow::anyhow!("Rocket failed: {e}"))?;
    info!("Shutting down gracefully");
    Ok(())
}
