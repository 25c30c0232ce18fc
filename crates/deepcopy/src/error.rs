//! Error types for deep-copy operations

use thiserror::Error;

/// The copy failure raised by the engine.
///
/// Every variant is fatal for the top-level call that produced it: the engine
/// never returns a partially built graph.
#[derive(Error, Debug)]
pub enum CopyError {
    /// The object's class declares no constructor to build a shell with
    #[error("Cannot reconstruct `{class}`: no constructor is declared")]
    NoConstructor {
        /// Class name of the offending object
        class: String,
    },

    /// The selected constructor returned an error
    #[error("Constructor of `{class}` failed")]
    Construction {
        /// Class name of the offending object
        class: String,
        /// Error reported by the constructor
        #[source]
        source: anyhow::Error,
    },

    /// A declared field could not be read from the original or written on the shell
    #[error("Cannot access field `{field}` of `{class}`: {reason}")]
    FieldAccess {
        /// Class name of the object
        class: String,
        /// Field name
        field: String,
        /// What went wrong
        reason: String,
    },

    /// A collection or map runtime type has no usable no-argument factory
    #[error("Cannot create a copy of the {kind} of type `{type_name}`: {reason}")]
    Instantiation {
        /// "collection" or "map"
        kind: &'static str,
        /// Runtime type name of the container
        type_name: String,
        /// What went wrong
        reason: String,
    },

    /// The copy was interrupted through its context
    #[error("Copy interrupted")]
    Interrupted,

    /// More nodes were reached than the context allows
    #[error("Copy aborted: more than {max} nodes reached")]
    NodeLimit {
        /// Configured maximum
        max: usize,
    },
}

/// Result type alias for deep-copy operations
pub type Result<T> = std::result::Result<T, CopyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_type() {
        let err = CopyError::NoConstructor {
            class: "Socket".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot reconstruct `Socket`: no constructor is declared"
        );

        let err = CopyError::Instantiation {
            kind: "map",
            type_name: "WeakHashMap".to_string(),
            reason: "no factory registered".to_string(),
        };
        assert!(err.to_string().contains("`WeakHashMap`"));
        assert!(err.to_string().contains("map"));
    }

    #[test]
    fn test_construction_keeps_source() {
        use std::error::Error as _;

        let err = CopyError::Construction {
            class: "Man".to_string(),
            source: anyhow::anyhow!("age must be positive"),
        };
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("age must be positive"));
    }
}
