use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use workout_tracker::config::{setup_logging, ServerConfig};
use workout_tracker::{WorkoutServer, WorkoutStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    setup_logging(config.verbose);

    let store = if config.no_seed {
        WorkoutStore::new()
    } else {
        WorkoutStore::with_sample_data()
    };
    info!(workouts = store.len()?, "store ready");

    let server = WorkoutServer::new(config.bind, Arc::new(store)).start().await?;
    println!("Listening on http://{}", server.bound_address());

    tokio::signal::ctrl_c().await?;
    info!("shutdown requested");
    server.stop().await
}
