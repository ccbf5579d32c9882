pub mod analytics;
pub mod loader;
pub mod output;
pub mod render;
pub mod server;
