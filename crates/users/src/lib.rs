//! # Waypost Users Crate
//!
//! User registration and opaque identifier handling for the Waypost
//! backend. The crate owns the registration action (validate, hash the
//! password, create the row, materialize the opaque identifier) and the
//! resolution of opaque identifiers back to users.
//!
//! ## Architecture
//!
//! - **Services**: `UserService`, generic over the repository seam
//! - **Types**: registration command types
//! - **Utils**: password hashing and input validation

pub mod services;
pub mod types;
pub mod utils;

// Re-export database types and repositories
pub use waypost_database::{NewUser, User, UserError, UserRepository, UserResult};

// Re-export main types for convenience
pub use services::{UserRepo, UserService};
pub use types::RegisterUserRequest;
