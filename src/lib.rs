pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

pub use context::FinanceContext;
pub use error::{CollaboratorError, OperationError};
