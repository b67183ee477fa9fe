//! Error taxonomy for the deployment and pool workflow

use alloy::primitives::Address;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("math overflow in {0}")]
    Overflow(&'static str),

    #[error("division by zero in {0}")]
    DivisionByZero(&'static str),

    #[error("tick {0} outside [MIN_TICK, MAX_TICK]")]
    TickOutOfBounds(i32),

    #[error("sqrt ratio {0} outside the representable price range")]
    SqrtRatioOutOfBounds(String),

    #[error("tick spacing must be positive, got {0}")]
    InvalidTickSpacing(i32),

    #[error("tick band must span at least one spacing")]
    EmptyTickBand,

    #[error("tick spacing {0} leaves no usable tick range")]
    TickSpacingTooWide(i32),
}

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Connection error: {endpoint} - {message}")]
    Connection {
        endpoint: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Transaction failed: {action} - {message}")]
    Transaction {
        action: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Timed out after {waited:?} waiting for confirmation of {action}")]
    Timeout { action: String, waited: Duration },

    #[error("Not found: {what}")]
    NotFound { what: String, address: Option<Address> },

    #[error("Pool math error: {0}")]
    Math(#[from] MathError),

    #[error("Storage error: {context}")]
    Storage {
        context: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

impl WorkflowError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    pub fn rejected(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transaction {
            action: action.into(),
            message: message.into(),
            source: None,
        }
    }

    pub fn connection(endpoint: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        let source = source.into();
        Self::Connection {
            endpoint: endpoint.into(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    pub fn storage(context: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Storage {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Short, stable label used in logs and run summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration",
            Self::Connection { .. } => "connection",
            Self::Transaction { .. } => "transaction",
            Self::Timeout { .. } => "timeout",
            Self::NotFound { .. } => "not_found",
            Self::Math(_) => "math",
            Self::Storage { .. } => "storage",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(WorkflowError::config("x").kind(), "configuration");
        assert_eq!(WorkflowError::rejected("swap", "zero").kind(), "transaction");
        assert_eq!(
            WorkflowError::from(MathError::DivisionByZero("mul_div")).kind(),
            "math"
        );
    }

    #[test]
    fn transaction_display_names_the_action() {
        let err = WorkflowError::rejected("exactInputSingle", "amountIn must be non-zero");
        assert_eq!(
            err.to_string(),
            "Transaction failed: exactInputSingle - amountIn must be non-zero"
        );
    }
}
