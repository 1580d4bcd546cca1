//! Server lifecycle: bind, serve in the background, stop gracefully.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::api;
use crate::store::WorkoutStore;

/// Configuration for one HTTP server instance.
#[derive(Clone)]
pub struct WorkoutServer {
    bind_address: SocketAddr,
    store: Arc<WorkoutStore>,
}

impl WorkoutServer {
    pub fn new(bind_address: SocketAddr, store: Arc<WorkoutStore>) -> Self {
        Self {
            bind_address,
            store,
        }
    }

    /// Bind the listener and start serving. Port 0 picks a free port; read
    /// it back with [`RunningWorkoutServer::bound_address`].
    pub async fn start(self) -> Result<RunningWorkoutServer> {
        let cancellation_token = CancellationToken::new();
        let router = api::router(Arc::clone(&self.store));

        let listener = tokio::net::TcpListener::bind(self.bind_address)
            .await
            .map_err(|err| anyhow!("failed to bind {}: {err}", self.bind_address))?;
        let bound_address = listener.local_addr()?;

        let server_handle = tokio::spawn({
            let shutdown = cancellation_token.child_token();
            async move {
                let result = axum::serve(listener, router)
                    .with_graceful_shutdown(async move {
                        shutdown.cancelled().await;
                    })
                    .await;
                if let Err(err) = result {
                    error!(error = %err, "workout server stopped with an error");
                }
            }
        });

        info!(address = %bound_address, "workout server listening");
        Ok(RunningWorkoutServer {
            bind_address: bound_address,
            cancellation_token,
            server_handle,
        })
    }
}

/// Handle to a server started with [`WorkoutServer::start`].
#[derive(Debug)]
pub struct RunningWorkoutServer {
    bind_address: SocketAddr,
    cancellation_token: CancellationToken,
    server_handle: JoinHandle<()>,
}

impl RunningWorkoutServer {
    pub fn bound_address(&self) -> SocketAddr {
        self.bind_address
    }

    /// Stop accepting connections and wait for in-flight requests to finish.
    pub async fn stop(self) -> Result<()> {
        self.cancellation_token.cancel();
        self.server_handle
            .await
            .map_err(|err| anyhow!("workout server task failed: {err}"))?;
        info!("workout server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_on_ephemeral_port_and_stop() {
        let store = Arc::new(WorkoutStore::new());
        let server = WorkoutServer::new("127.0.0.1:0".parse().unwrap(), store)
            .start()
            .await
            .unwrap();

        assert_ne!(server.bound_address().port(), 0);
        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_bind_conflict_is_an_error() {
        let store = Arc::new(WorkoutStore::new());
        let first = WorkoutServer::new("127.0.0.1:0".parse().unwrap(), Arc::clone(&store))
            .start()
            .await
            .unwrap();

        let second = WorkoutServer::new(first.bound_address(), store).start().await;
        assert!(second.is_err());

        first.stop().await.unwrap();
    }
}
