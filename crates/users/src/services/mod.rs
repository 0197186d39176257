//! Business logic layer for the users crate

pub mod user_service;

pub use user_service::{UserRepo, UserService};
