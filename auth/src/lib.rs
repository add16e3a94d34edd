//! Credential primitives for the signup service
//!
//! Provides the security mechanics behind account registration:
//! - Password hashing and verification (Argon2id)
//! - Email verification token generation (CSPRNG, hex encoded)
//!
//! Services wrap these behind their own domain errors; nothing here knows
//! about accounts or storage.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("ValidPass123!").unwrap();
//! let is_valid = hasher.verify("ValidPass123!", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Verification Tokens
//! ```
//! use auth::VerificationTokenGenerator;
//!
//! let generator = VerificationTokenGenerator::new();
//! let token = generator.generate().unwrap();
//! assert_eq!(token.value.len(), 64);
//! assert_eq!((token.expires_at - token.issued_at).num_hours(), 24);
//! ```

pub mod password;
pub mod token;

pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenError;
pub use token::VerificationToken;
pub use token::VerificationTokenGenerator;
