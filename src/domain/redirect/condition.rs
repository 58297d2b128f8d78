//! Redirect conditions and the predicate that evaluates them.

use std::fmt;
use std::str::FromStr;

use super::context::RequestContext;

/// Device classes a request can be detected as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceType {
    pub const ALL: [DeviceType; 3] = [DeviceType::Mobile, DeviceType::Tablet, DeviceType::Desktop];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Mobile => "mobile",
            DeviceType::Tablet => "tablet",
            DeviceType::Desktop => "desktop",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mobile" => Ok(DeviceType::Mobile),
            "tablet" => Ok(DeviceType::Tablet),
            "desktop" => Ok(DeviceType::Desktop),
            other => Err(format!("Unknown device type '{other}'")),
        }
    }
}

/// One atomic predicate of a redirect rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectCondition {
    Device(DeviceType),
    Language(String),
    /// `value: None` matches on presence alone.
    QueryParam { name: String, value: Option<String> },
}

impl RedirectCondition {
    pub fn device(device: DeviceType) -> Self {
        Self::Device(device)
    }

    pub fn language(code: impl Into<String>) -> Self {
        Self::Language(code.into())
    }

    pub fn query_param(name: impl Into<String>, value: Option<&str>) -> Self {
        Self::QueryParam {
            name: name.into(),
            value: value.map(str::to_string),
        }
    }

    /// Evaluates the condition against a request. Missing attributes never match.
    pub fn matches(&self, context: &RequestContext) -> bool {
        match self {
            RedirectCondition::Device(device) => context.device() == Some(*device),
            RedirectCondition::Language(code) => context
                .language()
                .is_some_and(|language| language.eq_ignore_ascii_case(code)),
            RedirectCondition::QueryParam { name, value } => match context.query().get(name) {
                None => false,
                Some(present) => match value {
                    None => true,
                    Some(required) => present == Some(required.as_str()),
                },
            },
        }
    }

    /// Storage discriminator.
    pub fn kind(&self) -> &'static str {
        match self {
            RedirectCondition::Device(_) => "device",
            RedirectCondition::Language(_) => "language",
            RedirectCondition::QueryParam { .. } => "query-param",
        }
    }

    /// Storage `(match_key, match_value)` columns.
    pub fn to_parts(&self) -> (Option<&str>, Option<&str>) {
        match self {
            RedirectCondition::Device(device) => (None, Some(device.as_str())),
            RedirectCondition::Language(code) => (None, Some(code.as_str())),
            RedirectCondition::QueryParam { name, value } => {
                (Some(name.as_str()), value.as_deref())
            }
        }
    }

    /// Rebuilds a condition from its stored representation.
    pub fn from_parts(kind: &str, key: Option<&str>, value: Option<&str>) -> Option<Self> {
        match kind {
            "device" => value?.parse().ok().map(RedirectCondition::Device),
            "language" => value.map(RedirectCondition::language),
            "query-param" => key.map(|name| RedirectCondition::query_param(name, value)),
            _ => None,
        }
    }
}

impl fmt::Display for RedirectCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirectCondition::Device(device) => write!(f, "device is {device}"),
            RedirectCondition::Language(code) => write!(f, "language is {code}"),
            RedirectCondition::QueryParam { name, value: None } => {
                write!(f, "query param '{name}' is present")
            }
            RedirectCondition::QueryParam {
                name,
                value: Some(value),
            } => write!(f, "query param '{name}' is '{value}'"),
        }
    }
}
