//! AuthKit API server binary.
//!
//! The single composition root: loads configuration, connects the store,
//! wires the account service with its collaborators, spawns the
//! unverified-account reaper, and serves the HTTP surface.

use std::env;
use std::sync::Arc;

use actix_web::HttpServer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ak_api::create_app;
use ak_core::services::account::{AccountService, AccountServiceConfig};
use ak_core::services::token::{TokenConfig, TokenService};
use ak_infra::{
    create_notification_gateway, AccountReaper, DatabasePool, MySqlAccountRepository, ReaperConfig,
};
use ak_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(config.environment.default_log_filter())
        }))
        .init();

    info!(
        environment = %config.environment,
        "starting {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    if config.environment.is_production() && config.session.is_using_default_secret() {
        warn!("JWT_SECRET is not set; sessions are signed with the built-in development secret");
    }

    // Store
    let pool = DatabasePool::new(config.database.clone()).await?;
    pool.health_check().await?;
    pool.run_migrations().await?;
    let repository = Arc::new(MySqlAccountRepository::new(pool.get_pool().clone()));

    // Collaborators
    let token_service = Arc::new(TokenService::new(TokenConfig {
        jwt_secret: config.session.jwt_secret.clone(),
        session_ttl_days: config.session.session_ttl_days,
    }));

    let provider = env::var("NOTIFY_PROVIDER").unwrap_or_else(|_| {
        if config.environment.is_production() {
            "live".to_string()
        } else {
            "console".to_string()
        }
    });
    let notifier = create_notification_gateway(&provider);

    let service = Arc::new(AccountService::new(
        repository.clone(),
        notifier,
        token_service,
        AccountServiceConfig {
            client_url: config.server.client_url.clone(),
            ..Default::default()
        },
    ));

    // Stale unverified registrations age out in the background.
    let reaper = Arc::new(AccountReaper::new(
        repository.clone(),
        ReaperConfig::from_env(),
    ));
    reaper.start_background_task();

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let session_config = config.session.clone();
    let client_url = config.server.client_url.clone();
    info!(%bind_address, workers, "server listening");

    HttpServer::new(move || {
        create_app(
            Arc::clone(&service),
            session_config.clone(),
            &client_url,
        )
    })
    .workers(workers)
    .bind(&bind_address)?
    .run()
    .await?;

    pool.close().await;
    Ok(())
}
