use serde::Deserialize;

use super::envelope::{DecodeError, XmlResponse, XmlResult, optional_int, required};
use crate::domain::{
    BalanceResponse, Envelope, Msisdn, ProfileResponse, Status, StatusResponse,
};

pub const BALANCE_OPERATION: &str = "balance";
pub const STATUS_OPERATION: &str = "status";
pub const PROFILE_OPERATION: &str = "profile";

#[derive(Debug, Clone, Deserialize)]
pub struct BalanceXmlResponse {
    result: XmlResult,
    #[serde(default)]
    balance: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusXmlResponse {
    result: XmlResult,
    #[serde(default, deserialize_with = "optional_int")]
    status: Option<i32>,
    #[serde(default)]
    expires: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileXmlResponse {
    result: XmlResult,
    #[serde(default)]
    msisdn: Option<String>,
}

impl XmlResponse for BalanceXmlResponse {
    fn envelope(&self) -> Envelope {
        self.result.to_envelope()
    }
}

impl XmlResponse for StatusXmlResponse {
    fn envelope(&self) -> Envelope {
        self.result.to_envelope()
    }
}

impl XmlResponse for ProfileXmlResponse {
    fn envelope(&self) -> Envelope {
        self.result.to_envelope()
    }
}

/// Read-only operations carry nothing beyond the credentials.
pub fn encode_get_params() -> Vec<(String, String)> {
    Vec::new()
}

impl BalanceXmlResponse {
    pub fn into_response(self) -> Result<BalanceResponse, DecodeError> {
        Ok(BalanceResponse {
            envelope: self.result.to_envelope(),
            balance: required(self.balance, "balance")?,
        })
    }
}

impl StatusXmlResponse {
    pub fn into_response(self) -> Result<StatusResponse, DecodeError> {
        Ok(StatusResponse {
            envelope: self.result.to_envelope(),
            status: Status::from_code(required(self.status, "status")?),
            expires: self
                .expires
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty()),
        })
    }
}

impl ProfileXmlResponse {
    pub fn into_response(self) -> Result<ProfileResponse, DecodeError> {
        let msisdn = self
            .msisdn
            .and_then(|value| Msisdn::new(value).ok());
        Ok(ProfileResponse {
            envelope: self.result.to_envelope(),
            msisdn: required(msisdn, Msisdn::FIELD)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::decode_xml;

    #[test]
    fn get_params_are_empty() {
        assert!(encode_get_params().is_empty());
    }

    #[test]
    fn decode_balance_maps_payload() {
        let xml = r#"
        <response>
          <result><code>200</code><description>OK</description></result>
          <balance>12.50</balance>
        </response>
        "#;

        let parsed = decode_xml::<BalanceXmlResponse>(xml.as_bytes())
            .unwrap()
            .into_response()
            .unwrap();
        assert!(parsed.envelope.is_ok());
        assert_eq!(parsed.balance, 12.5);
    }

    #[test]
    fn decode_balance_accepts_negative_amounts() {
        let xml = "<response><result><code>200</code></result><balance>-3.75</balance></response>";
        let parsed = decode_xml::<BalanceXmlResponse>(xml.as_bytes())
            .unwrap()
            .into_response()
            .unwrap();
        assert_eq!(parsed.balance, -3.75);
    }

    #[test]
    fn decode_balance_requires_balance_element() {
        let xml = "<response><result><code>200</code></result></response>";
        let err = decode_xml::<BalanceXmlResponse>(xml.as_bytes())
            .unwrap()
            .into_response()
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MissingElement { element: "balance" }
        ));
    }

    #[test]
    fn decode_status_keeps_expiration_marker() {
        let xml = r#"
        <response>
          <result><code>200</code><description>OK</description></result>
          <status>1</status>
          <expires>2026-12-31</expires>
        </response>
        "#;

        let parsed = decode_xml::<StatusXmlResponse>(xml.as_bytes())
            .unwrap()
            .into_response()
            .unwrap();
        assert_eq!(parsed.status, Status::Blocked);
        assert_eq!(parsed.expires.as_deref(), Some("2026-12-31"));
    }

    #[test]
    fn decode_status_without_expiration() {
        let xml = "<response><result><code>200</code></result><status>0</status></response>";
        let parsed = decode_xml::<StatusXmlResponse>(xml.as_bytes())
            .unwrap()
            .into_response()
            .unwrap();
        assert_eq!(parsed.status, Status::Active);
        assert_eq!(parsed.expires, None);
    }

    #[test]
    fn decode_profile_maps_msisdn() {
        let xml = r#"
        <response>
          <result><code>200</code><description>OK</description></result>
          <msisdn>79251234567</msisdn>
        </response>
        "#;

        let parsed = decode_xml::<ProfileXmlResponse>(xml.as_bytes())
            .unwrap()
            .into_response()
            .unwrap();
        assert_eq!(parsed.msisdn.raw(), "79251234567");
    }
}
