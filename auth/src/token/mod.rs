pub mod errors;
pub mod generator;

pub use errors::TokenError;
pub use generator::VerificationToken;
pub use generator::VerificationTokenGenerator;
pub use generator::TOKEN_BYTES;
pub use generator::TOKEN_TTL_HOURS;
