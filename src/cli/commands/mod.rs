pub mod account;
pub mod auth;
pub mod category;
pub mod dashboard;
pub mod open;
pub mod server;
pub mod user;
