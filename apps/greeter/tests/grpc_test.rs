//! End-to-end tests against a real server on an ephemeral plaintext port.

use greeter::GreeterHandler;
use rpc::greeter::greeter_client::GreeterClient;
use rpc::greeter::greeter_server::GreeterServer;
use rpc::greeter::HelloRequest;
use rpc::health::health_check_response::ServingStatus;
use rpc::health::health_client::HealthClient;
use rpc::health::health_server::HealthServer;
use rpc::health::HealthCheckRequest;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;

/// Spawn the server on 127.0.0.1:0 and return its endpoint URI.
///
/// The listener is bound before the task is spawned, so clients can connect
/// immediately without polling for readiness.
async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handler = GreeterHandler::default();
    tokio::spawn(async move {
        Server::builder()
            .add_service(GreeterServer::new(handler.clone()))
            .add_service(HealthServer::new(handler))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn say_hello_round_trip() {
    let uri = spawn_server().await;
    let mut client = GreeterClient::connect(uri).await.unwrap();

    let reply = client
        .say_hello(HelloRequest {
            name: "World".to_string(),
        })
        .await
        .unwrap()
        .into_inner();

    assert_eq!(reply.message, "Hello World");
}

#[tokio::test]
async fn say_hello_with_empty_name() {
    let uri = spawn_server().await;
    let mut client = GreeterClient::connect(uri).await.unwrap();

    let reply = client
        .say_hello(HelloRequest::default())
        .await
        .unwrap()
        .into_inner();

    assert_eq!(reply.message, "Hello ");
}

#[tokio::test]
async fn health_check_reports_serving_for_any_service_name() {
    let uri = spawn_server().await;
    let mut client = HealthClient::connect(uri).await.unwrap();

    for service in ["", "greeter.Greeter", "some.other.Service"] {
        let response = client
            .check(HealthCheckRequest {
                service: service.to_string(),
            })
            .await
            .unwrap()
            .into_inner();

        assert_eq!(response.status, ServingStatus::Serving as i32);
    }
}

#[tokio::test]
async fn health_watch_is_unimplemented() {
    let uri = spawn_server().await;
    let mut client = HealthClient::connect(uri).await.unwrap();

    let status = client
        .watch(HealthCheckRequest::default())
        .await
        .unwrap_err();

    assert_eq!(status.code(), tonic::Code::Unimplemented);
}

#[tokio::test]
async fn concurrent_calls_each_get_their_own_reply() {
    let uri = spawn_server().await;

    let mut handles = Vec::new();
    for i in 0..16 {
        let uri = uri.clone();
        handles.push(tokio::spawn(async move {
            let mut client = GreeterClient::connect(uri).await.unwrap();
            let name = format!("client-{}", i);
            let reply = client
                .say_hello(HelloRequest { name: name.clone() })
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
