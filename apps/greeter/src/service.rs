//! gRPC request handlers.
//!
//! One stateless handler backs both registered services: the greeting
//! operation and the health checking protocol. Handlers are total
//! functions; nothing here can fail on well-formed input.

use std::pin::Pin;

use rpc::greeter::greeter_server::Greeter;
use rpc::greeter::{HelloReply, HelloRequest};
use rpc::health::health_check_response::ServingStatus;
use rpc::health::health_server::Health;
use rpc::health::{HealthCheckRequest, HealthCheckResponse};
use tokio_stream::Stream;
use tonic::{Request, Response, Status};
use tracing::info;

type HealthStream = Pin<Box<dyn Stream<Item = Result<HealthCheckResponse, Status>> + Send>>;

/// Stateless, reentrant handler shared by both services.
#[derive(Debug, Default, Clone)]
pub struct GreeterHandler;

impl GreeterHandler {
    /// The greeting contract: `"Hello " + name`, no validation.
    pub fn greeting(name: &str) -> String {
        format!("Hello {}", name)
    }
}

#[tonic::async_trait]
impl Greeter for GreeterHandler {
    async fn say_hello(
        &self,
        request: Request<HelloRequest>,
    ) -> Result<Response<HelloReply>, Status> {
        let req = request.into_inner();
        info!("Received: {}", req.name);

        Ok(Response::new(HelloReply {
            message: Self::greeting(&req.name),
        }))
    }
}

#[tonic::async_trait]
impl Health for GreeterHandler {
    async fn check(
        &self,
        _request: Request<HealthCheckRequest>,
    ) -> Result<Response<HealthCheckResponse>, Status> {
        // Liveness stub: no subsystem is probed and the service field is
        // ignored, so every check reports SERVING.
        Ok(Response::new(HealthCheckResponse {
            status: ServingStatus::Serving as i32,
        }))
    }

    type WatchStream = HealthStream;

    async fn watch(
        &self,
        _request: Request<HealthCheckRequest>,
    ) -> Result<Response<Self::WatchStream>, Status> {
        Err(Status::unimplemented("health watch is not supported"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn say_hello_concatenates_the_name() {
        let handler = GreeterHandler::default();
        let reply = handler
            .say_hello(Request::new(HelloRequest {
                name: "World".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(reply.message, "Hello World");
    }

    #[tokio::test]
    async fn say_hello_with_empty_name() {
        let handler = GreeterHandler::default();
        let reply = handler
            .say_hello(Request::new(HelloRequest::default()))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(reply.message, "Hello ");
    }

    #[tokio::test]
    async fn check_always_reports_serving() {
        let handler = GreeterHandler::default();

        for service in ["", "greeter.Greeter", "no.such.Service"] {
            for _ in 0..3 {
                let status = handler
                    .check(Request::new(HealthCheckRequest {
                        service: service.to_string(),
                    }))
                    .await
                    .unwrap()
                    .into_inner()
                    .status;

                assert_eq!(status, ServingStatus::Serving as i32);
            }
        }
    }

    #[tokio::test]
    async fn watch_is_unimplemented() {
        let handler = GreeterHandler::default();
        // The Ok arm holds a boxed stream without Debug, so no unwrap_err here.
        let status = match handler
            .watch(Request::new(HealthCheckRequest::default()))
            .await
        {
            Ok(_) => panic!("watch unexpectedly succeeded"),
            Err(status) => status,
        };

        assert_eq!(status.code(), tonic::Code::Unimplemented);
    }

    #[tokio::test]
    async fn concurrent_greetings_do_not_interfere() {
        let mut handles = Vec::new();
        for i in 0..32 {
            handles.push(tokio::spawn(async move {
                let handler = GreeterHandler::default();
                let name = format!("caller-{}", i);
                let reply = handler
                    .say_hello(Request::new(HelloRequest { name: name.clone() }))
                    .await
                    .unwrap()
                    .into_inner();
                (name, reply.message)
            }));
        }

        for handle in handles {
            let (name, message) = handle.await.unwrap();
            assert_eq!(message, format!("Hello {}", name));
        }
    }
}
