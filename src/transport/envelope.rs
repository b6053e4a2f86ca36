use serde::de::{DeserializeOwned, Error as DeError};
use serde::{Deserialize, Deserializer};

use crate::domain::Envelope;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid XML response: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("response is missing the <{element}> element")]
    MissingElement { element: &'static str },
}

/// `<result><code>..</code><description>..</description></result>`
#[derive(Debug, Clone, Deserialize)]
pub(super) struct XmlResult {
    code: i32,
    #[serde(default)]
    description: String,
}

impl XmlResult {
    pub(super) fn to_envelope(&self) -> Envelope {
        Envelope {
            code: self.code,
            description: self.description.trim().to_owned(),
        }
    }
}

/// A decoded response body that carries the result envelope.
pub trait XmlResponse: DeserializeOwned {
    fn envelope(&self) -> Envelope;
}

pub fn decode_xml<T: XmlResponse>(body: &[u8]) -> Result<T, DecodeError> {
    Ok(quick_xml::de::from_reader(body)?)
}

/// Optional integer element. An empty element such as `<routing/>` counts as absent.
pub(super) fn optional_int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let text: Option<String> = Deserialize::deserialize(deserializer)?;
    match text.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(D::Error::custom),
    }
}

pub(super) fn required<T>(value: Option<T>, element: &'static str) -> Result<T, DecodeError> {
    value.ok_or(DecodeError::MissingElement { element })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Bare {
        result: XmlResult,
    }

    impl XmlResponse for Bare {
        fn envelope(&self) -> Envelope {
            self.result.to_envelope()
        }
    }

    #[test]
    fn decodes_envelope_with_surrounding_whitespace() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
        <response>
          <result>
            <code>401</code>
            <description>Wrong login or password</description>
          </result>
        </response>
        "#;

        let parsed: Bare = decode_xml(xml.as_bytes()).unwrap();
        assert_eq!(
            parsed.envelope(),
            Envelope {
                code: 401,
                description: "Wrong login or password".to_owned(),
            }
        );
    }

    #[test]
    fn missing_description_defaults_to_empty() {
        let xml = "<response><result><code>200</code></result></response>";
        let parsed: Bare = decode_xml(xml.as_bytes()).unwrap();
        assert!(parsed.envelope().is_ok());
        assert_eq!(parsed.envelope().description, "");
    }

    #[test]
    fn malformed_code_is_a_decode_error() {
        let xml = "<response><result><code>oops</code></result></response>";
        assert!(matches!(
            decode_xml::<Bare>(xml.as_bytes()),
            Err(DecodeError::Xml(_))
        ));
    }

    #[test]
    fn missing_result_is_a_decode_error() {
        let xml = "<response><balance>1.00</balance></response>";
        assert!(decode_xml::<Bare>(xml.as_bytes()).is_err());
    }
}
