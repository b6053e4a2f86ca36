//! Domain layer: strong types with validation and invariants (no I/O).

mod endpoint;
mod response;
mod validation;
mod value;

pub use endpoint::{Api, Endpoint, EndpointTable};
pub use response::{
    BalanceResponse, Envelope, LinesResponse, ProfileResponse, Routing, RoutingResponse, Status,
    StatusOnlyResponse, StatusResponse,
};
pub use validation::ValidationError;
pub use value::{LineCount, Login, Msisdn, NewPassword, Password};
