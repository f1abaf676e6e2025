// @generated
// This file wires up buf-generated protobuf code
// Note: The prost files already include!() the tonic files automatically

pub mod greeter {
    include!("greeter.rs");
    // greeter.tonic.rs is auto-included by greeter.rs
}

pub mod health {
    include!("grpc.health.v1.rs");
    // grpc.health.v1.tonic.rs is auto-included by grpc.health.v1.rs
}
