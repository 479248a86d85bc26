use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use fi_config::{ServerConfig, ServiceConfig};
use fi_forms::FormsContext;
use fi_notion::HttpNotionClient;
use tokio_util::sync::CancellationToken;

use crate::routes::{AppState, router};

/// A running HTTP listener with its shutdown handle.
#[derive(Debug)]
pub struct FormServer {
    pub addr: SocketAddr,
    shutdown: CancellationToken,
    server_task: tokio::task::JoinHandle<()>,
}

impl FormServer {
    /// Bind `cfg.bind` (IP address or host name) on `cfg.port` and start
    /// serving. Port 0 picks a free one.
    pub async fn start(cfg: &ServerConfig, state: AppState) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind((cfg.bind.as_str(), cfg.port))
            .await
            .with_context(|| {
                format!(
                    "failed to bind form endpoint at {} port {}",
                    cfg.bind, cfg.port
                )
            })?;
        let addr = listener
            .local_addr()
            .context("failed to resolve local form endpoint address")?;

        let app = router(state).layer(DefaultBodyLimit::max(cfg.max_request_body_bytes));
        let shutdown = CancellationToken::new();
        let server_shutdown = shutdown.clone();
        let server_task = tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    server_shutdown.cancelled().await;
                })
                .await
            {
                tracing::warn!(error = %error, "form server stopped with error");
            }
        });

        Ok(Self {
            addr,
            shutdown,
            server_task,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(self) {
        self.shutdown.cancel();
        if let Err(error) = self.server_task.await {
            tracing::debug!(error = %error, "form server join failed");
        }
    }
}

/// Serve against the real Notion API until Ctrl-C.
pub async fn run_server(cfg: ServiceConfig) -> Result<()> {
    cfg.validate()?;
    let notion = HttpNotionClient::from_config(&cfg.notion)?;
    let forms = FormsContext::new(Arc::new(notion), &cfg.notion.database_id)
        .with_page_size(cfg.notion.page_size);
    let state = AppState::new(forms, cfg.server.expose_error_details);

    let server = FormServer::start(&cfg.server, state).await?;
    tracing::info!(addr = %server.addr, "form server listening");
    println!("founder-intake listening on {}", server.base_url());

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    tracing::info!("shutting down form server");
    server.shutdown().await;
    Ok(())
}
