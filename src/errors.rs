//! All errors that can occur in the pedisim library.

use std::fmt;

pub type Result<T> = std::result::Result<T, PedisimError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PedisimError {
    ConfigurationError(String),
    OutOfRangeError(String),
    IllegalStateError(String),
}

impl fmt::Display for PedisimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PedisimError::ConfigurationError(message) => {
                write!(f, "ConfigurationError: {}", message)
            }
            PedisimError::OutOfRangeError(message) => {
                write!(f, "OutOfRangeError: {}", message)
            }
            PedisimError::IllegalStateError(message) => {
                write!(f, "IllegalStateError: {}", message)
            }
        }
    }
}

impl std::error::Error for PedisimError {}
