pub mod server;
pub mod handlers;
pub mod models;

pub use server::{configure, start_server, ApiConfig};
pub use models::*;
