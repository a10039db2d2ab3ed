//! Error types for session repository operations.

use std::fmt;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Where an error happened: the operation, the entity kind and its id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// e.g. "replace_table", "fetch_table"
    pub operation: Option<String>,
    /// e.g. "session"
    pub entity: Option<String>,
    pub entity_id: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Context for an operation on one session.
    pub fn session(operation: impl Into<String>, id: impl ToString) -> Self {
        Self::new(operation).with_entity("session").with_entity_id(id)
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref entity) = self.entity {
            parts.push(format!("entity={}", entity));
        }
        if let Some(ref id) = self.entity_id {
            parts.push(format!("id={}", id));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Requested session does not exist.
    #[error("Not found: {message} {context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// Data rejected before it was stored.
    #[error("Data validation error: {message} {context}")]
    ValidationError {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    pub fn not_found_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::NotFound {
            message: message.into(),
            context,
        }
    }

    pub fn validation_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ValidationError {
            message: message.into(),
            context,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::NotFound { context, .. } | Self::ValidationError { context, .. } => context,
        }
    }

    /// Add or update the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        match &mut self {
            Self::NotFound { context, .. } | Self::ValidationError { context, .. } => {
                context.operation = Some(operation.into());
            }
        }
        self
    }
}
