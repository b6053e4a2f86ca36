use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// MultiFon account login (usually the SIP number).
///
/// Invariant: non-empty after trimming.
pub struct Login(String);

impl Login {
    /// Query parameter name used by the API (`login`).
    pub const FIELD: &'static str = "login";

    /// Create a validated [`Login`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated login.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// MultiFon account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Query parameter name used by the API (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

impl From<NewPassword> for Password {
    fn from(value: NewPassword) -> Self {
        Self(value.0)
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Replacement password for the `password` operation (`new_password`).
///
/// Invariant: `8..=20` characters with at least one lowercase letter, one
/// uppercase letter and one digit.
pub struct NewPassword(String);

impl NewPassword {
    /// Query parameter name used by the API (`new_password`).
    pub const FIELD: &'static str = "new_password";

    /// Minimum allowed length in characters.
    pub const MIN_LEN: usize = 8;
    /// Maximum allowed length in characters.
    pub const MAX_LEN: usize = 20;

    /// Create a validated [`NewPassword`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let len = value.chars().count();
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&len) {
            return Err(ValidationError::PasswordLength {
                min: Self::MIN_LEN,
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        if !value.chars().any(char::is_lowercase) {
            return Err(ValidationError::WeakPassword {
                missing: "lowercase letter",
            });
        }
        if !value.chars().any(char::is_uppercase) {
            return Err(ValidationError::WeakPassword {
                missing: "uppercase letter",
            });
        }
        if !value.chars().any(|c| c.is_ascii_digit()) {
            return Err(ValidationError::WeakPassword { missing: "digit" });
        }

        Ok(Self(value))
    }

    /// Borrow the new password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("NewPassword(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Number of parallel outbound SIP lines (`lines`).
///
/// Invariant: `2..=20`.
pub struct LineCount(u8);

impl LineCount {
    /// Query parameter name used by the API (`lines`).
    pub const FIELD: &'static str = "lines";

    /// Minimum allowed line count.
    pub const MIN: u8 = 2;
    /// Maximum allowed line count.
    pub const MAX: u8 = 20;

    /// Create a validated line count.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|n| (Self::MIN..=Self::MAX).contains(n))
            .map(Self)
            .ok_or(ValidationError::LinesOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            })
    }

    /// Get the underlying line count.
    pub fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Subscriber number reported by the `profile` operation.
///
/// The value is kept as returned by the server; use [`Msisdn::parse`] for a
/// normalized phone number.
pub struct Msisdn(String);

impl Msisdn {
    /// XML element name used by the API (`msisdn`).
    pub const FIELD: &'static str = "msisdn";

    /// Create a validated (non-empty) MSISDN.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as returned by the server.
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Parse the number, assuming Russia when no country prefix is present.
    pub fn parse(&self) -> Result<phonenumber::PhoneNumber, ValidationError> {
        self.parse_with_region(Some(country::Id::RU))
    }

    /// Parse the number with an explicit default region.
    pub fn parse_with_region(
        &self,
        default_region: Option<country::Id>,
    ) -> Result<phonenumber::PhoneNumber, ValidationError> {
        phonenumber::parse(default_region, &self.0).map_err(|_| {
            ValidationError::InvalidPhoneNumber {
                input: self.0.clone(),
            }
        })
    }

    /// Normalized E.164 representation (`+79251234567`).
    pub fn e164(&self) -> Result<String, ValidationError> {
        let parsed = self.parse()?;
        Ok(phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string())
    }
}

impl std::fmt::Display for Msisdn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
