//! Read-only JSON API over the bracket projector.

use crate::bracket::BracketProjector;
use crate::store::BracketStore;
use log::info;
use rocket::{Build, Rocket};

pub mod api;

/// The projector the routes share. Boxing the store keeps the managed state's type the same
/// whatever the store behind it is.
pub type Projector = BracketProjector<Box<dyn BracketStore>>;

pub fn build_rocket(rocket: Rocket<Build>, projector: Projector) -> Rocket<Build> {
    api::mount(rocket).manage(projector)
}

pub async fn launch_website(projector: Projector) -> Result<(), rocket::Error> {
    let ignited = build_rocket(rocket::build(), projector).ignite().await?;
    info!("Rocket config: {:?}", ignited.config());
    ignited.launch().await?;
    info!("Web server shut down");
    Ok(())
}
