//! Error type shared by every repository port.

use super::define_port_error;

define_port_error! {
    /// Errors raised by repository adapters.
    pub enum RepositoryError {
        /// The store could not be reached (pool checkout, closed connection).
        Connection { message: String } =>
            "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "repository query failed: {message}",
        /// A unique constraint rejected the write.
        DuplicateKey { constraint: String } =>
            "duplicate key violates unique constraint {constraint}",
    }
}

impl RepositoryError {
    /// Whether the error came from a unique constraint.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }
}
