//! Transport layer: query parameters and XML decoding for each operation.

mod account;
mod envelope;
mod lines;
mod password;
mod routing;

pub use account::{
    BALANCE_OPERATION, BalanceXmlResponse, PROFILE_OPERATION, ProfileXmlResponse,
    STATUS_OPERATION, StatusXmlResponse, encode_get_params,
};
pub use envelope::{DecodeError, XmlResponse, decode_xml};
pub use lines::{LINES_OPERATION, LinesXmlResponse, encode_set_lines_params};
pub use password::{PASSWORD_OPERATION, PasswordXmlResponse, encode_set_password_params};
pub use routing::{ROUTING_OPERATION, RoutingXmlResponse, encode_set_routing_params};
