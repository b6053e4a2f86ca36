use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidEndpoint { url: String, reason: String },
    InsecureEndpoint { url: String },
    UnknownApi { name: String },
    UnknownRouting { input: String },
    LinesOutOfRange { min: u8, max: u8, actual: i64 },
    PasswordLength { min: usize, max: usize, actual: usize },
    WeakPassword { missing: &'static str },
    InvalidPhoneNumber { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidEndpoint { url, reason } => {
                write!(f, "invalid endpoint URL {url}: {reason}")
            }
            Self::InsecureEndpoint { url } => {
                write!(f, "endpoint URL must use https: {url}")
            }
            Self::UnknownApi { name } => write!(f, "unknown api: {name}"),
            Self::UnknownRouting { input } => write!(f, "unknown routing: {input}"),
            Self::LinesOutOfRange { min, max, actual } => {
                write!(f, "lines out of range: {actual} (expected {min}..={max})")
            }
            Self::PasswordLength { min, max, actual } => {
                write!(
                    f,
                    "password length out of range: {actual} (expected {min}..={max})"
                )
            }
            Self::WeakPassword { missing } => {
                write!(f, "password must contain at least one {missing}")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "login" };
        assert_eq!(err.to_string(), "login must not be empty");

        let err = ValidationError::InsecureEndpoint {
            url: "http://example.invalid/".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "endpoint URL must use https: http://example.invalid/"
        );

        let err = ValidationError::UnknownApi {
            name: "beeline".to_owned(),
        };
        assert_eq!(err.to_string(), "unknown api: beeline");

        let err = ValidationError::LinesOutOfRange {
            min: 2,
            max: 20,
            actual: 21,
        };
        assert_eq!(err.to_string(), "lines out of range: 21 (expected 2..=20)");

        let err = ValidationError::PasswordLength {
            min: 8,
            max: 20,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "password length out of range: 3 (expected 8..=20)"
        );

        let err = ValidationError::WeakPassword { missing: "digit" };
        assert_eq!(err.to_string(), "password must contain at least one digit");
    }
}
