//! Ports and Adapters Infrastructure
//!
//! Shared error type and marker trait for the collaborator ports that sit
//! around the settlement engine (claim store, settlement queue, document
//! renderer, document store, notifier).
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │        Claim processing (entry points)        │
//! └───────────────────────────────────────────────┘
//!            │                         │
//!            ▼                         ▼
//!   ┌─────────────────┐     ┌───────────────────────┐
//!   │ Settlement      │     │ Port traits           │
//!   │ engine (pure)   │     │ (store, queue, docs,  │
//!   │                 │     │  notifications)       │
//!   └─────────────────┘     └───────────────────────┘
//!                                      ▲
//!                                      │
//!                           ┌──────────┴──────────┐
//!                           │  Adapters (memory,  │
//!                           │  managed services)  │
//!                           └─────────────────────┘
//! ```

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// Every adapter reports failures through this type so callers handle
/// internal and external implementations the same way.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The external system is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },

    /// A payload could not be encoded or decoded
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. } | PortError::ServiceUnavailable { .. }
        )
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Result alias for port operations
pub type PortResult<T> = Result<T, PortError>;

/// Marker trait for all domain ports
///
/// Port traits extend this marker so adapters can be shared across tasks.
pub trait DomainPort: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("Claim", "CLM-1");
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert!(error.to_string().contains("Claim"));
        assert!(error.to_string().contains("CLM-1"));
    }

    #[test]
    fn test_port_error_transient() {
        let unavailable = PortError::ServiceUnavailable {
            service: "settlement-queue".to_string(),
        };
        assert!(unavailable.is_transient());
        assert!(!PortError::transformation("bad body").is_transient());
    }
}
