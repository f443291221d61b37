pub mod conversation;
pub mod diagram;
pub mod error;
pub mod health;
pub mod openapi;
pub mod optimize;

pub use error::ApiError;
