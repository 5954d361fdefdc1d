use thiserror::Error;

/// Authentication failures. Every variant maps to an unauthorized outcome.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication required")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("Invalid token subject")]
    InvalidSubject,

    #[error("Invalid token claims")]
    MalformedClaims,

    #[error("Invalid phone number or password")]
    InvalidCredentials,
}

/// Failures while loading signing/verification key material at startup.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("{0} key is not valid base64")]
    Encoding(&'static str, #[source] base64::DecodeError),

    #[error("{0} key is not a valid RSA PEM key")]
    Pem(&'static str, #[source] jsonwebtoken::errors::Error),
}
