use thiserror::Error;

/// Errors raised by the cart and checkout state machines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("cart line {index} does not exist (cart has {len} lines)")]
    LineOutOfRange { index: usize, len: usize },

    #[error("cart is empty")]
    EmptyCart,

    /// The requested checkout action is not valid in the current state.
    #[error("cannot {action} while checkout is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    /// Required checkout fields are missing. Carries the user-facing message.
    #[error("{0}")]
    Validation(String),

    #[error("cart holds items from {count} pharmacies; orders are limited to one")]
    MixedPharmacies { count: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
