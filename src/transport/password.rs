use serde::Deserialize;

use super::envelope::{XmlResponse, XmlResult};
use crate::domain::{Envelope, NewPassword, StatusOnlyResponse};

pub const PASSWORD_OPERATION: &str = "password";

#[derive(Debug, Clone, Deserialize)]
pub struct PasswordXmlResponse {
    result: XmlResult,
}

impl XmlResponse for PasswordXmlResponse {
    fn envelope(&self) -> Envelope {
        self.result.to_envelope()
    }
}

impl PasswordXmlResponse {
    pub fn into_response(self) -> StatusOnlyResponse {
        StatusOnlyResponse {
            envelope: self.result.to_envelope(),
        }
    }
}

pub fn encode_set_password_params(password: &NewPassword) -> Vec<(String, String)> {
    vec![(NewPassword::FIELD.to_owned(), password.as_str().to_owned())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_password_params_use_new_password_key() {
        let password = NewPassword::new("Secret123").unwrap();
        assert_eq!(
            encode_set_password_params(&password),
            vec![("new_password".to_owned(), "Secret123".to_owned())]
        );
    }
}
