use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use std::fmt;

/// Error types for inventory rules and application failures
#[derive(Debug, Clone)]
pub enum BusinessError {
    /// Validation errors for user input (400 Bad Request)
    ValidationError { field: String, message: String },
    /// Business rule violations (422 Unprocessable Entity)
    BusinessRuleViolation { rule: String, message: String },
    /// Resource not found (404 Not Found)
    NotFound { resource: String, id: String },
    /// Deletion blocked by dependents or by the resource's own state (409 Conflict)
    Protected { resource: String, message: String },
    /// Duplicate resource (409 Conflict)
    Duplicate { resource: String, field: String },
    /// External service errors, the database connection included (502 Bad Gateway)
    ExternalServiceError { service: String, message: String },
    /// Generic application error (500 Internal Server Error)
    InternalError { message: String },
}

impl BusinessError {
    fn parts(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            Self::ValidationError { .. } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "ValidationError")
            }
            Self::BusinessRuleViolation { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "BUSINESS_RULE_VIOLATION",
                "BusinessRuleViolation",
            ),
            Self::NotFound { .. } => (StatusCode::NOT_FOUND, "RESOURCE_NOT_FOUND", "NotFound"),
            Self::Protected { .. } => (StatusCode::CONFLICT, "PROTECTED_RESOURCE", "Protected"),
            Self::Duplicate { .. } => (StatusCode::CONFLICT, "DUPLICATE_RESOURCE", "Duplicate"),
            Self::ExternalServiceError { .. } => (
                StatusCode::BAD_GATEWAY,
                "EXTERNAL_SERVICE_ERROR",
                "ExternalServiceError",
            ),
            Self::InternalError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "InternalError",
            ),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.parts().0
    }
}

impl fmt::Display for BusinessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusinessError::ValidationError { field, message } => {
                write!(f, "Validation failed for field '{field}': {message}")
            }
            BusinessError::BusinessRuleViolation { rule, message } => {
                write!(f, "Business rule '{rule}' violated: {message}")
            }
            BusinessError::NotFound { resource, id } => {
                write!(f, "{resource} with id '{id}' not found")
            }
            BusinessError::Protected { resource, message } => {
                write!(f, "Cannot delete {resource}: {message}")
            }
            BusinessError::Duplicate { resource, field } => {
                write!(f, "{resource} with this {field} already exists")
            }
            BusinessError::ExternalServiceError { service, message } => {
                write!(f, "External service '{service}' error: {message}")
            }
            BusinessError::InternalError { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for BusinessError {}

impl IntoResponse for BusinessError {
    fn into_response(self) -> Response {
        let (status, error_code, error_type) = self.parts();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::debug!("{self}");
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
                "type": error_type,
            }
        }));

        (status, body).into_response()
    }
}

/// Malformed bodies and unknown enum values are reported against the field
/// serde names in its path, or against `body` when there is none
impl From<JsonRejection> for BusinessError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        let field = message
            .split("target type: ")
            .nth(1)
            .and_then(|rest| rest.split(':').next())
            .filter(|path| !path.is_empty() && !path.contains(char::is_whitespace))
            .unwrap_or("body")
            .to_string();
        BusinessError::ValidationError { field, message }
    }
}

impl From<DbErr> for BusinessError {
    fn from(err: DbErr) -> Self {
        ErrorMapper::map_db_error(err, "resource")
    }
}

/// Maps database errors, including the ones crudcrate hooks raise, onto `BusinessError`
pub struct ErrorMapper;

impl ErrorMapper {
    pub fn map_db_error(err: DbErr, context: &str) -> BusinessError {
        match err {
            DbErr::RecordNotFound(msg) => BusinessError::NotFound {
                resource: Self::extract_resource_from_context(context),
                id: Self::extract_id_from_message(&msg),
            },
            DbErr::Custom(msg) => {
                if let Some(rest) = msg.strip_prefix("Validation failed:") {
                    BusinessError::ValidationError {
                        field: Self::extract_field_from_validation(rest),
                        message: rest.trim().to_string(),
                    }
                } else if let Some(rest) = msg.strip_prefix("Protected:") {
                    BusinessError::Protected {
                        resource: Self::extract_resource_from_context(context),
                        message: rest.trim().to_string(),
                    }
                } else if msg.contains("already exists") {
                    BusinessError::Duplicate {
                        resource: Self::extract_resource_from_context(context),
                        field: Self::extract_field_from_constraint(&msg),
                    }
                } else if msg.contains("Business rule") {
                    let rule = Self::extract_rule_from_message(&msg);
                    BusinessError::BusinessRuleViolation { rule, message: msg }
                } else {
                    BusinessError::InternalError { message: msg }
                }
            }
            DbErr::Conn(conn_err) => BusinessError::ExternalServiceError {
                service: "database".to_string(),
                message: conn_err.to_string(),
            },
            DbErr::Exec(_) | DbErr::Query(_) => {
                let err_msg = err.to_string();
                if err_msg.contains("UNIQUE constraint") || err_msg.contains("duplicate key") {
                    BusinessError::Duplicate {
                        resource: Self::extract_resource_from_context(context),
                        field: Self::extract_field_from_constraint(&err_msg),
                    }
                } else if err_msg.contains("FOREIGN KEY constraint")
                    || err_msg.contains("violates foreign key constraint")
                {
                    BusinessError::Protected {
                        resource: Self::extract_resource_from_context(context),
                        message: "it is still referenced by other records".to_string(),
                    }
                } else {
                    BusinessError::InternalError { message: err_msg }
                }
            }
            _ => BusinessError::InternalError {
                message: err.to_string(),
            },
        }
    }

    /// "composite_part" becomes "composite part"
    fn extract_resource_from_context(context: &str) -> String {
        context.replace('_', " ")
    }

    fn extract_id_from_message(msg: &str) -> String {
        if let Some(start_pos) = msg.find(" id '") {
            let after_id = &msg[start_pos + 5..];
            if let Some(end_pos) = after_id.find('\'') {
                return after_id[..end_pos].to_string();
            }
        }

        msg.split_whitespace()
            .map(|word| word.trim_matches('\'').trim_matches('"'))
            .find(|cleaned| uuid::Uuid::parse_str(cleaned).is_ok())
            .map_or_else(|| "unknown".to_string(), str::to_string)
    }

    /// The first word after the "Validation failed:" prefix names the field
    fn extract_field_from_validation(rest: &str) -> String {
        rest.split_whitespace()
            .next()
            .map_or("unknown", |word| word.trim_end_matches(':'))
            .to_string()
    }

    fn extract_rule_from_message(msg: &str) -> String {
        msg.split("Business rule")
            .nth(1)
            .and_then(|part| part.split("violated").next())
            .unwrap_or("unknown")
            .trim()
            .trim_matches('\'')
            .trim_matches('"')
            .to_string()
    }

    fn extract_field_from_constraint(msg: &str) -> String {
        ["plate_vendor_id", "email", "orcid", "tag", "name"]
            .into_iter()
            .find(|field| msg.contains(field))
            .unwrap_or("field")
            .to_string()
    }
}

#[macro_export]
macro_rules! validation_error {
    ($field:expr, $message:expr) => {
        $crate::common::errors::BusinessError::ValidationError {
            field: $field.to_string(),
            message: $message.to_string(),
        }
    };
}

#[macro_export]
macro_rules! business_rule_violation {
    ($rule:expr, $message:expr) => {
        $crate::common::errors::BusinessError::BusinessRuleViolation {
            rule: $rule.to_string(),
            message: $message.to_string(),
        }
    };
}

#[macro_export]
macro_rules! not_found {
    ($resource:expr, $id:expr) => {
        $crate::common::errors::BusinessError::NotFound {
            resource: $resource.to_string(),
            id: $id.to_string(),
        }
    };
}

#[macro_export]
macro_rules! protected {
    ($resource:expr, $message:expr) => {
        $crate::common::errors::BusinessError::Protected {
            resource: $resource.to_string(),
            message: $message.to_string(),
        }
    };
}

/// Extension trait to add business error conversion to `DbErr`
pub trait DbErrorExt {
    fn to_business_error(self, context: &str) -> BusinessError;
}

impl DbErrorExt for DbErr {
    fn to_business_error(self, context: &str) -> BusinessError {
        ErrorMapper::map_db_error(self, context)
    }
}

/// Validation failures raised inside crudcrate hooks travel as `DbErr::Custom`
pub fn hook_validation_error(field: &str, message: &str) -> DbErr {
    DbErr::Custom(format!("Validation failed: {field} {message}"))
}

/// Deletions refused inside crudcrate hooks travel as `DbErr::Custom` too
pub fn hook_protected_error(message: &str) -> DbErr {
    DbErr::Custom(format!("Protected: {message}"))
}

pub type BusinessResult<T> = Result<T, BusinessError>;
