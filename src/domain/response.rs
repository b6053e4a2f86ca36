use std::fmt;
use std::str::FromStr;

use crate::domain::validation::ValidationError;
use crate::domain::value::Msisdn;

/// Result code/description pair embedded in every XML response.
///
/// A 200 HTTP response is not a success by itself: only `code == 200` is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub code: i32,
    pub description: String,
}

impl Envelope {
    /// Embedded code meaning success.
    pub const OK: i32 = 200;

    pub fn is_ok(&self) -> bool {
        self.code == Self::OK
    }
}

/// Call routing mode.
///
/// Codes the crate does not know are preserved in [`Routing::Unrecognized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Routing {
    /// Mobile network only.
    Gsm,
    /// VoIP only.
    Sip,
    /// VoIP with mobile fallback.
    SipGsm,
    Unrecognized(i32),
}

impl Routing {
    /// Query parameter / XML element name (`routing`).
    pub const FIELD: &'static str = "routing";

    /// Known modes in code order.
    pub const KNOWN: [Routing; 3] = [Routing::Gsm, Routing::Sip, Routing::SipGsm];

    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Gsm,
            1 => Self::Sip,
            2 => Self::SipGsm,
            other => Self::Unrecognized(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Gsm => 0,
            Self::Sip => 1,
            Self::SipGsm => 2,
            Self::Unrecognized(code) => code,
        }
    }

    /// Display name, or `None` for unrecognized codes.
    pub fn description(self) -> Option<&'static str> {
        match self {
            Self::Gsm => Some("GSM"),
            Self::Sip => Some("SIP"),
            Self::SipGsm => Some("SIP+GSM"),
            Self::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for Routing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description() {
            Some(description) => f.write_str(description),
            None => write!(f, "{}", self.code()),
        }
    }
}

impl FromStr for Routing {
    type Err = ValidationError;

    /// Parse a known mode from its description (`GSM`, `SIP`, `SIP+GSM`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::KNOWN
            .into_iter()
            .find(|it| {
                it.description()
                    .is_some_and(|description| description.eq_ignore_ascii_case(s))
            })
            .ok_or_else(|| ValidationError::UnknownRouting {
                input: s.to_owned(),
            })
    }
}

/// Subscription status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Active,
    Blocked,
    Unrecognized(i32),
}

impl Status {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Active,
            1 => Self::Blocked,
            other => Self::Unrecognized(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Active => 0,
            Self::Blocked => 1,
            Self::Unrecognized(code) => code,
        }
    }

    pub fn description(self) -> Option<&'static str> {
        match self {
            Self::Active => Some("active"),
            Self::Blocked => Some("blocked"),
            Self::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description() {
            Some(description) => f.write_str(description),
            None => write!(f, "{}", self.code()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusOnlyResponse {
    pub envelope: Envelope,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceResponse {
    pub envelope: Envelope,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingResponse {
    pub envelope: Envelope,
    pub routing: Routing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusResponse {
    pub envelope: Envelope,
    pub status: Status,
    /// Expiration marker exactly as sent by the server, if any.
    pub expires: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileResponse {
    pub envelope: Envelope,
    pub msisdn: Msisdn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinesResponse {
    pub envelope: Envelope,
    pub lines: i32,
}
