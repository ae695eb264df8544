// Validation Module - field-scoped error collection
use std::collections::BTreeMap;
use std::fmt;

/// Type alias for validation results
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error with detailed field-level errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Create with a single field error
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::new();
        err.add_field_error(field, message);
        err
    }

    /// Add a field-level error
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Add a fully built field error
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Get errors for a specific field
    pub fn field_errors(&self, field: &str) -> Vec<&FieldError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// First error for a field, if any
    pub fn first_for(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Whether any error carries the given code
    pub fn has_code(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.code.as_deref() == Some(code))
    }

    /// Merge another validation error into this one
    pub fn merge(&mut self, other: ValidationError) {
        self.errors.extend(other.errors);
    }

    /// `Ok(())` when empty, otherwise `Err(self)`
    pub fn into_result(self) -> ValidationResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "Validation error with no specific field errors")?;
        } else if self.errors.len() == 1 {
            write!(f, "Validation failed: {}", self.errors[0].message)?;
        } else {
            write!(f, "Validation failed with {} errors: ", self.errors.len())?;
            for (i, error) in self.errors.iter().enumerate() {
                if i > 0 {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", error.field, error.message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Individual field error
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: Option<String>,
    pub metadata: BTreeMap<String, String>,
}

impl FieldError {
    /// Create a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into(), code: None, metadata: BTreeMap::new() }
    }

    /// Add metadata to the error
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.metadata.insert(key.into(), value.to_string());
        self
    }

    /// Set error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Metadata value parsed as an integer (used for reported limits)
    pub fn metadata_i64(&self, key: &str) -> Option<i64> {
        self.metadata.get(key).and_then(|v| v.parse().ok())
    }
}

/// Collects field errors for one validation pass.
///
/// Every check runs; nothing short-circuits. Call [`Validator::finalize`] to
/// turn the collected errors into a result.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationError,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.add_field_error(field, message);
    }

    /// Add a prepared field error
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Require `value > 0`
    pub fn require_positive(&mut self, field: &str, value: i64, message: &str) -> bool {
        if value > 0 {
            return true;
        }
        self.push(FieldError::new(field, message).with_code("not_positive"));
        false
    }

    /// Require `value >= 0`
    pub fn require_non_negative(&mut self, field: &str, value: i64, message: &str) -> bool {
        if value >= 0 {
            return true;
        }
        self.push(FieldError::new(field, message).with_code("negative"));
        false
    }

    /// Require `value <= limit`; the limit is kept as `limit` metadata
    pub fn require_at_most(
        &mut self,
        field: &str,
        value: i64,
        limit: i64,
        code: &str,
        message: impl Into<String>,
    ) -> bool {
        if value <= limit {
            return true;
        }
        self.push(FieldError::new(field, message).with_code(code).with_metadata("limit", limit));
        false
    }

    /// Require a non-blank string
    pub fn require_not_blank(&mut self, field: &str, value: &str, message: &str) -> bool {
        if !value.trim().is_empty() {
            return true;
        }
        self.push(FieldError::new(field, message).with_code("required"));
        false
    }

    /// Require an optional value to be present
    pub fn require_present<T>(&mut self, field: &str, value: Option<&T>, message: &str) -> bool {
        if value.is_some() {
            return true;
        }
        self.push(FieldError::new(field, message).with_code("required"));
        false
    }

    /// Check if validation has errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.errors.error_count()
    }

    /// Get errors without consuming validator
    pub fn errors(&self) -> &ValidationError {
        &self.errors
    }

    /// Finalize and return result
    pub fn finalize(self) -> ValidationResult<()> {
        self.errors.into_result()
    }
}
