//! Greeter gRPC Service
//!
//! A minimal gRPC server exposing a greeting operation and the standard
//! gRPC health checking protocol, optionally secured with mutual TLS.
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   ↓ (gRPC, plaintext or mutual TLS)
//! GreeterHandler (service.rs)
//!   ├─ greeter.Greeter/SayHello      → "Hello " + name
//!   └─ grpc.health.v1.Health/Check   → SERVING
//! ```
//!
//! ## Modules
//!
//! - `config`: environment-driven settings (TLS switch, certificate path)
//! - `tls`: mutual-TLS credential loading
//! - `server`: server initialization and lifecycle
//! - `service`: gRPC request handlers

pub mod config;
pub mod server;
pub mod service;
pub mod tls;

// Re-export for convenience
pub use config::ServerSettings;
pub use server::run;
pub use service::GreeterHandler;
