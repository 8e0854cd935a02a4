pub mod app;
pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod state;

pub use app::build_router;
