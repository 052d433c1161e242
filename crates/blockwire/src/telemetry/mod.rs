pub mod tracing;

pub use tracing::{build_filter, init_subscriber};
