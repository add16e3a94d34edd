//! Argon2id password hashing with fixed cost parameters.

pub mod argon2;
pub mod errors;

pub use argon2::PasswordHasher;
pub use errors::PasswordError;
