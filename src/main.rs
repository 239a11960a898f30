//! # user-store
//!
//! Serves user CRUD requests read from stdin, one JSON
//! [`ApiRequest`](user_store::handlers::ApiRequest) per line, and writes one
//! JSON [`ApiResponse`](user_store::handlers::ApiResponse) per line to stdout.
//!
//! ```bash
//! echo '{"httpMethod":"POST","body":"{\"email\":\"a@b.co\",\"firstName\":\"A\"}"}' | cargo run
//! ```

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use user_store::config::Config;
use user_store::handlers;
use user_store::lifecycle::{setup_tracing, UserSystem};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = Config::load().map_err(|e| e.to_string())?;
    info!(?config, "Starting user store");

    let system = UserSystem::new(&config);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut served = 0usize;

    while let Some(line) = lines.next_line().await.map_err(|e| e.to_string())? {
        if line.trim().is_empty() {
            continue;
        }

        let response = handlers::handle_line(&line, system.table(), &system.store).await;

        let mut out = serde_json::to_string(&response).map_err(|e| e.to_string())?;
        out.push('\n');
        stdout
            .write_all(out.as_bytes())
            .await
            .map_err(|e| e.to_string())?;
        stdout.flush().await.map_err(|e| e.to_string())?;
        served += 1;
    }

    info!(served, "Input closed");
    system.shutdown().await?;
    Ok(())
}
