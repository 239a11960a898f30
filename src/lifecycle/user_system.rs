use crate::config::Config;
use crate::model::User;
use crate::store::{TableActor, TableClient, TableSchema};
use tracing::{error, info};

/// The runtime orchestrator for the user service.
///
/// `UserSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the store actor
/// - **Wiring**: exposing the store client and the table name the request
///   handlers need
///
/// # Example
///
/// ```ignore
/// let system = UserSystem::new(&Config::default());
///
/// let response = handlers::handle(&request, system.table(), &system.store).await;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct UserSystem {
    /// Client for the store actor. Clone it freely for concurrent requests.
    pub store: TableClient,

    table: String,

    /// Task handle of the store actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl UserSystem {
    /// Spawns the store actor with the configured users table.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &Config) -> Self {
        let schema = TableSchema::new(config.table_name.clone(), User::KEY_ATTRIBUTE);
        let (actor, store) = TableActor::new(config.channel_capacity.max(1), [schema]);
        let handle = tokio::spawn(actor.run());

        info!(table = %config.table_name, region = %config.region, "User system started");
        Self {
            store,
            table: config.table_name.clone(),
            handle,
        }
    }

    /// Name of the users table.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Gracefully shuts down the store.
    ///
    /// Dropping the client closes the request channel; the actor drains what
    /// is queued and exits. Clones of the client still held elsewhere keep
    /// the actor alive, so drop them first.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor shut down cleanly
    /// - `Err(String)` if the actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.store);

        if let Err(e) = self.handle.await {
            error!("Store task failed: {:?}", e);
            return Err(format!("Store task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
