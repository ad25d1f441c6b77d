mod gateway;
mod health;
pub mod wire;

pub use gateway::{gateway_handler, method_not_allowed_handler};
pub use health::health_handler;
