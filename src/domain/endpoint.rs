use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::validation::ValidationError;

const MULTIFON_URL: &str = "https://sm.megafon.ru/sm/client/";
const EMOTION_URL: &str = "https://emotion.megalabs.ru/sm/client/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// The two stock deployments of the API.
pub enum Api {
    /// `https://sm.megafon.ru/sm/client/`
    #[default]
    Multifon,
    /// `https://emotion.megalabs.ru/sm/client/`
    Emotion,
}

impl Api {
    /// All stock deployments, default first.
    pub const ALL: [Api; 2] = [Api::Multifon, Api::Emotion];

    /// Symbolic name used in endpoint tables, config files and CLI flags.
    pub fn name(self) -> &'static str {
        match self {
            Self::Multifon => "multifon",
            Self::Emotion => "emotion",
        }
    }

    fn base_url(self) -> &'static str {
        match self {
            Self::Multifon => MULTIFON_URL,
            Self::Emotion => EMOTION_URL,
        }
    }
}

impl FromStr for Api {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|api| api.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownApi { name: s.to_owned() })
    }
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Named API base URL.
///
/// Invariant: absolute `https` URL whose path ends with `/`, so that joining a
/// bare operation name yields `base/operation`.
pub struct Endpoint {
    name: String,
    base: Url,
}

impl Endpoint {
    /// Create a validated endpoint.
    pub fn new(name: impl Into<String>, url: &str) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "api" });
        }

        let mut base = Url::parse(url).map_err(|err| ValidationError::InvalidEndpoint {
            url: url.to_owned(),
            reason: err.to_string(),
        })?;
        if base.scheme() != "https" {
            return Err(ValidationError::InsecureEndpoint {
                url: url.to_owned(),
            });
        }
        if base.cannot_be_a_base() {
            return Err(ValidationError::InvalidEndpoint {
                url: url.to_owned(),
                reason: "not a base URL".to_owned(),
            });
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);

        Ok(Self { name, base })
    }

    /// Symbolic name of the deployment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base URL that operation names are resolved against.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve an operation name relative to the base URL.
    pub(crate) fn resolve(&self, operation: &str) -> Result<Url, ValidationError> {
        self.base
            .join(operation)
            .map_err(|err| ValidationError::InvalidEndpoint {
                url: format!("{}{operation}", self.base),
                reason: err.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Name → endpoint lookup table used when building a client.
///
/// Names are matched case-insensitively. [`EndpointTable::default`] contains
/// the stock `multifon` and `emotion` deployments.
pub struct EndpointTable {
    entries: Vec<Endpoint>,
}

impl EndpointTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add (or replace) an entry, validating the URL.
    pub fn with(mut self, name: impl Into<String>, url: &str) -> Result<Self, ValidationError> {
        self.insert(Endpoint::new(name, url)?);
        Ok(self)
    }

    /// Add (or replace) an already validated endpoint.
    pub fn insert(&mut self, endpoint: Endpoint) {
        self.entries
            .retain(|it| !it.name.eq_ignore_ascii_case(&endpoint.name));
        self.entries.push(endpoint);
    }

    /// Look up an endpoint by name.
    pub fn get(&self, name: &str) -> Result<&Endpoint, ValidationError> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|it| it.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ValidationError::UnknownApi {
                name: name.to_owned(),
            })
    }

    /// Registered names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|it| it.name.as_str())
    }
}

impl Default for EndpointTable {
    fn default() -> Self {
        let mut table = Self::new();
        for api in Api::ALL {
            // Stock URLs are valid https constants.
            if let Ok(endpoint) = Endpoint::new(api.name(), api.base_url()) {
                table.insert(endpoint);
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_contains_both_deployments() {
        let table = EndpointTable::default();
        assert_eq!(table.names().collect::<Vec<_>>(), ["multifon", "emotion"]);
        assert_eq!(
            table.get("multifon").unwrap().base().as_str(),
            "https://sm.megafon.ru/sm/client/"
        );
        assert_eq!(
            table.get("EMOTION").unwrap().base().as_str(),
            "https://emotion.megalabs.ru/sm/client/"
        );
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = EndpointTable::default().get("beeline").unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownApi {
                name: "beeline".to_owned()
            }
        );
    }

    #[test]
    fn endpoint_requires_https() {
        assert!(matches!(
            Endpoint::new("plain", "http://example.invalid/api/"),
            Err(ValidationError::InsecureEndpoint { .. })
        ));
        assert!(matches!(
            Endpoint::new("broken", "not a url"),
            Err(ValidationError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn resolve_appends_operation_to_base_path() {
        let endpoint = Endpoint::new("test", "https://example.invalid/sm/client").unwrap();
        assert_eq!(endpoint.base().as_str(), "https://example.invalid/sm/client/");
        assert_eq!(
            endpoint.resolve("balance").unwrap().as_str(),
            "https://example.invalid/sm/client/balance"
        );
    }

    #[test]
    fn custom_entries_replace_by_name() {
        let table = EndpointTable::default()
            .with("Emotion", "https://staging.example.invalid/")
            .unwrap();
        assert_eq!(table.names().count(), 2);
        assert_eq!(
            table.get("emotion").unwrap().base().as_str(),
            "https://staging.example.invalid/"
        );
    }

    #[test]
    fn api_parses_case_insensitively() {
        assert_eq!("Emotion".parse::<Api>().unwrap(), Api::Emotion);
        assert_eq!(" multifon ".parse::<Api>().unwrap(), Api::Multifon);
        assert!("megafon".parse::<Api>().is_err());
        assert_eq!(Api::default().to_string(), "multifon");
    }
}
