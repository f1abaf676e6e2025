//! Checked-in protobuf/gRPC code for the greeter workspace.
//!
//! The files under `src/gen/` are generated with buf from `proto/` and
//! committed to the tree; regenerate them when the proto definitions change.

pub mod gen;

pub use gen::{greeter, health};
