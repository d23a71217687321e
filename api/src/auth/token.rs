//! HS256 signed tokens
//!
//! Standard compact JWTs via `jsonwebtoken`. Only HS256 is accepted on the way in,
//! and expiry is checked against the caller's clock.

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use crate::domain::entities::Claims;
use crate::error::TokenError;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Sign `claims` with `secret`
pub fn sign(claims: &Claims, secret: &[u8]) -> Result<String, TokenError> {
    encode(&Header::new(ALGORITHM), claims, &EncodingKey::from_secret(secret))
        .map_err(TokenError::from)
}

/// Check the signature and expiry of `token` and return its claims
pub fn verify(token: &str, secret: &[u8], now: DateTime<Utc>) -> Result<Claims, TokenError> {
    let header = decode_header(token)?;
    if header.alg != ALGORITHM {
        return Err(TokenError::UnsupportedAlgorithm(format!("{:?}", header.alg)));
    }

    // Expiry is compared with `now` below rather than the system clock
    let mut validation = Validation::new(ALGORITHM);
    validation.validate_exp = false;

    let claims = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)?.claims;
    if claims.is_expired(now) {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}
