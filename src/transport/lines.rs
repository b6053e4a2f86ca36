use serde::Deserialize;

use super::envelope::{DecodeError, XmlResponse, XmlResult, optional_int, required};
use crate::domain::{Envelope, LineCount, LinesResponse};

pub const LINES_OPERATION: &str = "lines";

/// The live server names the element `ParallelCallsSipOut`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinesXmlResponse {
    result: XmlResult,
    #[serde(
        rename = "ParallelCallsSipOut",
        alias = "lines",
        default,
        deserialize_with = "optional_int"
    )]
    lines: Option<i32>,
}

impl XmlResponse for LinesXmlResponse {
    fn envelope(&self) -> Envelope {
        self.result.to_envelope()
    }
}

impl LinesXmlResponse {
    pub fn into_response(self) -> Result<LinesResponse, DecodeError> {
        Ok(LinesResponse {
            envelope: self.result.to_envelope(),
            lines: required(self.lines, LineCount::FIELD)?,
        })
    }

    pub fn echoed(&self) -> Option<i32> {
        self.lines
    }
}

pub fn encode_set_lines_params(lines: LineCount) -> Vec<(String, String)> {
    vec![(LineCount::FIELD.to_owned(), lines.value().to_string())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::decode_xml;

    #[test]
    fn set_lines_params_encode_count() {
        assert_eq!(
            encode_set_lines_params(LineCount::new(5).unwrap()),
            vec![("lines".to_owned(), "5".to_owned())]
        );
    }

    #[test]
    fn decode_lines_reads_server_element_name() {
        let xml = r#"
        <response>
          <result><code>200</code><description>OK</description></result>
          <ParallelCallsSipOut>4</ParallelCallsSipOut>
        </response>
        "#;
        let parsed = decode_xml::<LinesXmlResponse>(xml.as_bytes())
            .unwrap()
            .into_response()
            .unwrap();
        assert_eq!(parsed.lines, 4);
    }

    #[test]
    fn decode_lines_accepts_plain_lines_element() {
        let xml = "<response><result><code>200</code></result><lines>3</lines></response>";
        let parsed = decode_xml::<LinesXmlResponse>(xml.as_bytes()).unwrap();
        assert_eq!(parsed.echoed(), Some(3));
    }

    #[test]
    fn empty_lines_element_is_not_an_echo() {
        let xml = "<response><result><code>200</code></result>\
                   <ParallelCallsSipOut> </ParallelCallsSipOut></response>";
        let parsed = decode_xml::<LinesXmlResponse>(xml.as_bytes()).unwrap();
        assert_eq!(parsed.echoed(), None);
        assert!(matches!(
            parsed.into_response(),
            Err(DecodeError::MissingElement { element: "lines" })
        ));
    }
}
