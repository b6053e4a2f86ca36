use serde::Deserialize;

use super::envelope::{DecodeError, XmlResponse, XmlResult, optional_int, required};
use crate::domain::{Envelope, Routing, RoutingResponse};

pub const ROUTING_OPERATION: &str = "routing";

#[derive(Debug, Clone, Deserialize)]
pub struct RoutingXmlResponse {
    result: XmlResult,
    #[serde(default, deserialize_with = "optional_int")]
    routing: Option<i32>,
}

impl XmlResponse for RoutingXmlResponse {
    fn envelope(&self) -> Envelope {
        self.result.to_envelope()
    }
}

impl RoutingXmlResponse {
    pub fn into_response(self) -> Result<RoutingResponse, DecodeError> {
        Ok(RoutingResponse {
            envelope: self.result.to_envelope(),
            routing: Routing::from_code(required(self.routing, Routing::FIELD)?),
        })
    }

    /// Routing code echoed by a set request; `None` when the server omitted it.
    pub fn echoed(&self) -> Option<i32> {
        self.routing
    }
}

pub fn encode_set_routing_params(routing: Routing) -> Vec<(String, String)> {
    vec![(Routing::FIELD.to_owned(), routing.code().to_string())]
}
