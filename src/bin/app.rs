use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};

use adapter::{
    database::{connect_database_with, migrate},
    mail::SmtpNotifier,
};
use anyhow::{Context, Result};
use api::route::v1;
use axum::{http::Method, Router};
use registry::AppRegistry;
use shared::{
    config::AppConfig,
    env::{which, Environment},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{self, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    bootstrap().await
}

fn init_logger() -> Result<()> {
    let env = which();
    let log_level = match env {
        Environment::Development => "debug",
        Environment::Production => "info",
    };

    // RUST_LOG が指定されていればそちらを優先する
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());

    let subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    // 本番環境ではログ収集基盤向けに JSON で出力する
    match env {
        Environment::Development => tracing_subscriber::registry()
            .with(subscriber)
            .with(env_filter)
            .try_init()?,
        Environment::Production => tracing_subscriber::registry()
            .with(subscriber.json())
            .with(env_filter)
            .try_init()?,
    }

    Ok(())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_headers(cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(cors::Any)
}

async fn bootstrap() -> Result<()> {
    let app_config = AppConfig::new()?;
    let addr = SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), app_config.server.port);

    let pool = connect_database_with(&app_config.database);
    migrate(&pool).await.context("failed to run migrations")?;
    let roster_pool = connect_database_with(&app_config.roster);
    let notifier = Arc::new(SmtpNotifier::new(&app_config.mail)?);

    let registry = AppRegistry::new(pool, roster_pool, notifier, app_config);

    let app = Router::new()
        .merge(v1::routes())
        .layer(cors())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(registry);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Unexpected error happened in server")
        .inspect_err(|e| {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Unexpected error"
            )
        })
}

// シグナルハンドラを登録できなかった場合は、そのシグナルでは停止しない
async fn wait_for_signal<F>(signal: F, name: &str)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!(
            error.message = %e,
            signal = name,
            "failed to install signal handler"
        );
        std::future::pending::<()>().await;
    }
}

async fn shutdown_signal() {
    let ctrl_c = wait_for_signal(tokio::signal::ctrl_c(), "ctrl_c");

    #[cfg(unix)]
    let terminate = wait_for_signal(
        async {
            let mut signal =
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
            signal.recv().await;
            Ok::<(), std::io::Error>(())
        },
        "terminate",
    );

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutting down");
}
