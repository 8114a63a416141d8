/*!
 * Error Handling for the Hycrypt Module
 *
 * Provides the error taxonomy for the hybrid envelope and matrix cipher,
 * with numeric error codes, user-facing messages and technical details.
 */

use std::collections::HashMap;
use thiserror::Error;

/// Error type for all cryptographic operations in this crate
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The unwrapped session key does not have the expected length
    #[error("Session key length error: expected {expected} bytes, got {actual}")]
    KeyLengthError {
        expected: usize,
        actual: usize,
        error_code: u32,
    },

    /// RSA-OAEP unwrapping failed. Deliberately carries no cause.
    #[error("Session key unwrap failed")]
    UnwrapError { error_code: u32 },

    #[error("Padding check failed: {operation}")]
    PaddingError { operation: String, error_code: u32 },

    #[error("Key matrix is not invertible: determinant {determinant} shares a factor with {modulus}")]
    MatrixNotInvertibleError {
        determinant: i64,
        modulus: i64,
        error_code: u32,
    },

    #[error("Decode error in {field}: {cause}")]
    DecodeError {
        field: String,
        cause: String,
        error_code: u32,
    },

    #[error("Key management error: {operation} - {cause}")]
    KeyManagementError {
        operation: String,
        cause: String,
        error_code: u32,
        context: HashMap<String, String>,
    },

    #[error("Random number generation failed: {cause}")]
    RandomGenerationError { cause: String, error_code: u32 },

    #[error("Invalid parameter: {parameter} - {expected} - got {actual}")]
    InvalidParameter {
        parameter: String,
        expected: String,
        actual: String,
        error_code: u32,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Error code constants for different error categories
pub mod error_codes {
    // Key wrapping errors: 1000-1999
    pub const SESSION_KEY_LENGTH_MISMATCH: u32 = 1001;
    pub const SESSION_KEY_UNWRAP_FAILED: u32 = 1002;
    pub const SESSION_KEY_WRAP_FAILED: u32 = 1003;

    // Symmetric errors: 2000-2999
    pub const AES_PADDING_INVALID: u32 = 2001;
    pub const AES_CIPHERTEXT_TRUNCATED: u32 = 2002;

    // Matrix cipher errors: 3000-3999
    pub const MATRIX_NOT_INVERTIBLE: u32 = 3001;
    pub const MATRIX_PADDING_INVALID: u32 = 3002;

    // Encoding errors: 4000-4999
    pub const BASE64_DECODE_FAILED: u32 = 4001;

    // Key management errors: 5000-5999
    pub const RSA_KEY_GENERATION_FAILED: u32 = 5001;
    pub const PEM_ENCODE_FAILED: u32 = 5002;
    pub const PEM_DECODE_FAILED: u32 = 5003;

    // Randomness errors: 6000-6999
    pub const RANDOM_SOURCE_UNAVAILABLE: u32 = 6001;

    pub const INVALID_PARAMETER: u32 = 9999;
}

impl CryptoError {
    /// Get the numeric error code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            CryptoError::KeyLengthError { error_code, .. } => *error_code,
            CryptoError::UnwrapError { error_code } => *error_code,
            CryptoError::PaddingError { error_code, .. } => *error_code,
            CryptoError::MatrixNotInvertibleError { error_code, .. } => *error_code,
            CryptoError::DecodeError { error_code, .. } => *error_code,
            CryptoError::KeyManagementError { error_code, .. } => *error_code,
            CryptoError::RandomGenerationError { error_code, .. } => *error_code,
            CryptoError::InvalidParameter { error_code, .. } => *error_code,
            CryptoError::SerializationError(_) => 9001,
        }
    }

    /// Get a user-friendly error message
    pub fn user_friendly_message(&self) -> String {
        match self {
            CryptoError::KeyLengthError { .. } | CryptoError::UnwrapError { .. } => {
                "The encrypted session key could not be recovered. The key may be wrong or the envelope tampered with."
                    .to_string()
            }
            CryptoError::PaddingError { .. } => {
                "Decryption produced invalid padding. The key may be wrong or the ciphertext corrupted."
                    .to_string()
            }
            CryptoError::MatrixNotInvertibleError { modulus, .. } => format!(
                "The key matrix cannot be inverted modulo {}. Choose a matrix whose determinant is coprime with {}.",
                modulus, modulus
            ),
            CryptoError::DecodeError { field, .. } => {
                format!("The '{}' field is not valid base64.", field)
            }
            CryptoError::KeyManagementError { operation, .. } => {
                format!("Key management operation '{}' failed.", operation)
            }
            CryptoError::RandomGenerationError { .. } => {
                "Random number generation failed. Cryptographic operations cannot proceed."
                    .to_string()
            }
            CryptoError::InvalidParameter {
                parameter,
                expected,
                ..
            } => format!("Invalid parameter '{}'. Expected {}.", parameter, expected),
            CryptoError::SerializationError(_) => {
                "Data serialization failed. Data format may be corrupted.".to_string()
            }
        }
    }

    /// Get technical details for debugging
    pub fn technical_details(&self) -> HashMap<String, String> {
        let mut details = HashMap::new();

        details.insert("error_code".to_string(), self.error_code().to_string());
        details.insert("error_type".to_string(), self.error_type().to_string());

        match self {
            CryptoError::KeyLengthError {
                expected, actual, ..
            } => {
                details.insert("expected".to_string(), expected.to_string());
                details.insert("actual".to_string(), actual.to_string());
            }
            CryptoError::KeyManagementError {
                operation,
                cause,
                context,
                ..
            } => {
                details.insert("operation".to_string(), operation.clone());
                details.insert("cause".to_string(), cause.clone());
                details.extend(context.clone());
            }
            CryptoError::InvalidParameter {
                parameter,
                expected,
                actual,
                ..
            } => {
                details.insert("parameter".to_string(), parameter.clone());
                details.insert("expected".to_string(), expected.clone());
                details.insert("actual".to_string(), actual.clone());
            }
            // Unwrap failures stay opaque
            CryptoError::UnwrapError { .. } => {}
            _ => {
                details.insert("details".to_string(), self.to_string());
            }
        }

        details
    }

    /// Get the error category/type as a string
    pub fn error_type(&self) -> &'static str {
        match self {
            CryptoError::KeyLengthError { .. } => "KeyLengthError",
            CryptoError::UnwrapError { .. } => "UnwrapError",
            CryptoError::PaddingError { .. } => "PaddingError",
            CryptoError::MatrixNotInvertibleError { .. } => "MatrixNotInvertibleError",
            CryptoError::DecodeError { .. } => "DecodeError",
            CryptoError::KeyManagementError { .. } => "KeyManagementError",
            CryptoError::RandomGenerationError { .. } => "RandomGenerationError",
            CryptoError::InvalidParameter { .. } => "InvalidParameter",
            CryptoError::SerializationError(_) => "SerializationError",
        }
    }
}

/// Convenience constructors for common error types
impl CryptoError {
    pub fn key_length_error(expected: usize, actual: usize) -> Self {
        CryptoError::KeyLengthError {
            expected,
            actual,
            error_code: error_codes::SESSION_KEY_LENGTH_MISMATCH,
        }
    }

    pub fn unwrap_error() -> Self {
        CryptoError::UnwrapError {
            error_code: error_codes::SESSION_KEY_UNWRAP_FAILED,
        }
    }

    pub fn padding_error(operation: &str, error_code: u32) -> Self {
        CryptoError::PaddingError {
            operation: operation.to_string(),
            error_code,
        }
    }

    pub fn matrix_not_invertible(determinant: i64, modulus: i64) -> Self {
        CryptoError::MatrixNotInvertibleError {
            determinant,
            modulus,
            error_code: error_codes::MATRIX_NOT_INVERTIBLE,
        }
    }

    pub fn decode_error(field: &str, cause: &str) -> Self {
        CryptoError::DecodeError {
            field: field.to_string(),
            cause: cause.to_string(),
            error_code: error_codes::BASE64_DECODE_FAILED,
        }
    }

    pub fn key_management_error(operation: &str, cause: &str, key_type: &str, error_code: u32) -> Self {
        let mut context = HashMap::new();
        context.insert("key_type".to_string(), key_type.to_string());

        CryptoError::KeyManagementError {
            operation: operation.to_string(),
            cause: cause.to_string(),
            error_code,
            context,
        }
    }

    pub fn random_generation_error(cause: &str) -> Self {
        CryptoError::RandomGenerationError {
            cause: cause.to_string(),
            error_code: error_codes::RANDOM_SOURCE_UNAVAILABLE,
        }
    }

    pub fn invalid_parameter(parameter: &str, expected: &str, actual: &str) -> Self {
        CryptoError::InvalidParameter {
            parameter: parameter.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            error_code: error_codes::INVALID_PARAMETER,
        }
    }
}

impl From<serde_json::Error> for CryptoError {
    fn from(err: serde_json::Error) -> Self {
        CryptoError::SerializationError(err.to_string())
    }
}

impl From<getrandom::Error> for CryptoError {
    fn from(err: getrandom::Error) -> Self {
        CryptoError::random_generation_error(&err.to_string())
    }
}

/// Result type alias for cryptographic operations
pub type CryptoResult<T> = Result<T, CryptoError>;
