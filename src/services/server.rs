use anyhow::Result;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::config::{AppConfig, Roster};
use crate::database::{self, setup};

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let roster = Roster::load(&self.config.roster_path)?;
        info!("Loaded roster with {} players", roster.players().len());

        let pool = database::create_pool(&self.config.database_path)?;
        setup::ensure_schema(&mut database::get_connection(&pool)?)?;

        let state = Arc::new(AppState {
            pool,
            config: self.config.clone(),
            roster,
        });

        let app = create_router(state)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
