//! gRPC server initialization and lifecycle management
//!
//! This module handles all server setup:
//! - Tracing initialization
//! - Settings load from the environment
//! - Listener binding on the fixed port
//! - Optional mutual-TLS configuration
//! - Service registration and the blocking serve loop
//!
//! Every failure mode here is fatal-and-immediate: the error propagates to
//! main(), is reported, and the process exits non-zero. Nothing is retried
//! and there is no fallback to plaintext when TLS setup fails.

use std::net::{Ipv4Addr, SocketAddr};

use core_config::{Environment, FromEnv};
use eyre::{Result, WrapErr};
use rpc::greeter::greeter_server::GreeterServer;
use rpc::health::health_server::HealthServer;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tracing::info;

use crate::config::{ServerSettings, GRPC_PORT};
use crate::service::GreeterHandler;
use crate::tls;

/// Run the gRPC server.
///
/// This is the main entry point for server initialization. It:
/// 1. Sets up structured logging (env-aware: JSON for prod, pretty for dev)
/// 2. Loads settings from the environment
/// 3. Binds the listener on port 9091, all interfaces
/// 4. Applies mutual-TLS credentials when enabled
/// 5. Registers the greeter and health services and serves until failure
///
/// # Errors
///
/// Returns an error if the port is unavailable, certificate material
/// cannot be loaded, or the serve loop fails. Never returns `Ok` under
/// normal operation; the process is expected to run until terminated.
pub async fn run() -> Result<()> {
    // Initialize tracing (env-aware: JSON for prod, pretty for dev)
    let environment = Environment::from_env();
    core_config::tracing::init_tracing(&environment);

    info!("Starting server...");
    let settings = ServerSettings::from_env().wrap_err("Failed to load server settings")?;

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, GRPC_PORT));
    let listener = TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to listen on {}", addr))?;
    info!("Listening on {}", addr);

    let mut builder = Server::builder();
    if settings.tls_enabled {
        info!("TLS is enabled");
        info!("Using certificate path: {}", settings.cert_dir.display());
        let tls_config = tls::load_mutual_tls(&settings.cert_dir)?;
        builder = builder
            .tls_config(tls_config)
            .wrap_err("Failed to configure TLS")?;
        info!("Created TLS credentials");
    }

    // Both services share one stateless handler value.
    let handler = GreeterHandler::default();

    info!("Greeter service and health check service registered");
    builder
        .add_service(GreeterServer::new(handler.clone()))
        .add_service(HealthServer::new(handler))
        .serve_with_incoming(TcpListenerStream::new(listener))
        .await
        .wrap_err("gRPC server failed")?;

    Ok(())
}
