//! # Errors
//!
//! Docket carries one structured error through every layer:
//! - a fixed [`ErrorKind`] taxonomy with a status code and class name
//! - rides inside `anyhow::Error` so services can use `?` freely
//! - transport-agnostic (the access layer decides how to render it)
//!
//! Best-effort compensation failures travel in `errors`, next to the
//! failure that triggered them.

use std::fmt;

use anyhow::Error as AnyError;
use serde_json::Value;

/// A convenience result type for Docket APIs.
pub type DocResult<T> = std::result::Result<T, AnyError>;

/// Failure kinds, each with a fixed status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,    // 400
    NotFound,      // 404
    StorageWrite,  // 500
    StorageRead,   // 500
    StorageAccess, // 500
    Persistence,   // 500
    Configuration, // 500
    Internal,      // 500
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::StorageWrite
            | ErrorKind::StorageRead
            | ErrorKind::StorageAccess
            | ErrorKind::Persistence
            | ErrorKind::Configuration
            | ErrorKind::Internal => 500,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::StorageWrite => "StorageWriteError",
            ErrorKind::StorageRead => "StorageReadError",
            ErrorKind::StorageAccess => "StorageAccessError",
            ErrorKind::Persistence => "PersistenceError",
            ErrorKind::Configuration => "ConfigurationError",
            ErrorKind::Internal => "InternalError",
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not-found",
            ErrorKind::StorageWrite => "storage-write",
            ErrorKind::StorageRead => "storage-read",
            ErrorKind::StorageAccess => "storage-access",
            ErrorKind::Persistence => "persistence",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Internal => "internal",
        }
    }
}

/// A structured Docket error that can live inside `anyhow::Error`.
#[derive(Debug)]
pub struct DocError {
    pub kind: ErrorKind,
    pub message: String,
    pub errors: Option<Value>,
    pub source: Option<AnyError>,
}

impl DocError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            errors: None,
            source: None,
        }
    }

    pub fn with_errors(mut self, errors: Value) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_source(mut self, source: impl Into<AnyError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Record a failed compensation step without changing the kind.
    pub fn with_compensation_failure(mut self, detail: impl Into<String>) -> Self {
        let mut errors = match self.errors.take() {
            Some(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        errors.insert("compensation".to_string(), Value::String(detail.into()));
        self.errors = Some(Value::Object(errors));
        self
    }

    /// The compensation failure attached by [`DocError::with_compensation_failure`], if any.
    pub fn compensation_failure(&self) -> Option<&str> {
        self.errors
            .as_ref()
            .and_then(|e| e.get("compensation"))
            .and_then(|v| v.as_str())
    }

    pub fn code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn class_name(&self) -> &'static str {
        self.kind.class_name()
    }

    pub fn into_anyhow(self) -> AnyError {
        AnyError::new(self)
    }

    /// Downcast an `anyhow::Error` to a `DocError`, looking through contexts.
    pub fn from_anyhow(err: &AnyError) -> Option<&DocError> {
        err.chain().find_map(|e| e.downcast_ref::<DocError>())
    }

    /// Turn any error into a DocError:
    /// - if it is already a DocError, keep it
    /// - otherwise wrap as Internal
    pub fn normalize(err: AnyError) -> DocError {
        match err.downcast::<DocError>() {
            Ok(doc) => doc,
            Err(other) => DocError::new(ErrorKind::Internal, other.to_string()).with_source(other),
        }
    }

    /// Copy without the inner `source`, safe to hand to clients.
    pub fn sanitize_for_client(&self) -> DocError {
        DocError {
            kind: self.kind,
            message: self.message.clone(),
            errors: self.errors.clone(),
            source: None,
        }
    }

    pub fn to_json(&self) -> Value {
        let mut base = serde_json::json!({
            "name": self.name(),
            "message": self.message,
            "code": self.code(),
            "className": self.class_name(),
        });
        if let Some(e) = &self.errors {
            base["errors"] = e.clone();
        }
        base
    }

    // ---- Constructors ----

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, msg)
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg)
    }
    pub fn storage_write(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::StorageWrite, msg)
    }
    pub fn storage_read(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::StorageRead, msg)
    }
    pub fn storage_access(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::StorageAccess, msg)
    }
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Persistence, msg)
    }
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, msg)
    }
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, msg)
    }
}

impl fmt::Display for DocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.code(), self.message)
    }
}

impl std::error::Error for DocError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Convenience helper for "bail with DocError".
#[macro_export]
macro_rules! bail_doc {
    ($ctor:ident, $msg:expr) => {
        return Err($crate::errors::DocError::$ctor($msg).into_anyhow())
    };
    ($ctor:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::errors::DocError::$ctor(format!($fmt, $($arg)*)).into_anyhow())
    };
}
