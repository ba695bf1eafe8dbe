mod claims;
mod error;
pub mod jwks;
mod verifier;

pub use claims::*;
pub use error::*;
pub use jwks::{JwkSet, Jwk, JwksCache, JwksError};
pub use verifier::*;
