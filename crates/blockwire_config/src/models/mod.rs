pub mod account;
pub mod client;
pub mod logging;
pub mod server;
