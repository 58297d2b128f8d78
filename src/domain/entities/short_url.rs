//! Short URL aggregate and its lookup identifier.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::domain::redirect::{RedirectRule, RequestContext, resolve_destination};

/// The `(short code, domain)` pair used to look up a short URL.
///
/// A domain-less identifier never equals a domain-qualified one with the same code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortUrlIdentifier {
    short_code: String,
    domain: Option<String>,
}

impl ShortUrlIdentifier {
    pub fn new(short_code: impl Into<String>, domain: Option<&str>) -> Self {
        Self {
            short_code: short_code.into(),
            domain: domain.map(str::to_string),
        }
    }

    /// Builds an identifier from a request host.
    ///
    /// A host equal to `default_domain` (case-insensitive) maps to a domain-less
    /// identifier, since links on the default domain are stored without one.
    pub fn from_host(short_code: impl Into<String>, host: &str, default_domain: Option<&str>) -> Self {
        let domain = match default_domain {
            Some(default) if default.eq_ignore_ascii_case(host) => None,
            _ if host.is_empty() => None,
            _ => Some(host.to_ascii_lowercase()),
        };

        Self {
            short_code: short_code.into(),
            domain,
        }
    }

    pub fn short_code(&self) -> &str {
        &self.short_code
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }
}

impl fmt::Display for ShortUrlIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.domain {
            Some(domain) => write!(f, "{}/{}", domain, self.short_code),
            None => write!(f, "{}", self.short_code),
        }
    }
}

/// A short link with its default target and conditional redirect rules.
///
/// The rule list is owned by the aggregate and only ever replaced as a whole,
/// which keeps priorities dense and unique.
#[derive(Debug, Clone)]
pub struct ShortUrl {
    pub id: i64,
    pub short_code: String,
    pub domain: Option<String>,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub valid_since: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub max_visits: Option<i64>,
    pub visits_count: i64,
    /// Append the incoming query string to the resolved destination.
    pub forward_query: bool,
    rules: Vec<RedirectRule>,
}

impl ShortUrl {
    /// Creates an unrestricted short URL without rules.
    pub fn new(
        id: i64,
        short_code: impl Into<String>,
        domain: Option<&str>,
        long_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            short_code: short_code.into(),
            domain: domain.map(str::to_string),
            long_url: long_url.into(),
            created_at: Utc::now(),
            valid_since: None,
            valid_until: None,
            max_visits: None,
            visits_count: 0,
            forward_query: true,
            rules: Vec::new(),
        }
    }

    pub fn with_validity(
        mut self,
        valid_since: Option<DateTime<Utc>>,
        valid_until: Option<DateTime<Utc>>,
    ) -> Self {
        self.valid_since = valid_since;
        self.valid_until = valid_until;
        self
    }

    pub fn with_max_visits(mut self, max_visits: Option<i64>, visits_count: i64) -> Self {
        self.max_visits = max_visits;
        self.visits_count = visits_count;
        self
    }

    pub fn with_forward_query(mut self, forward_query: bool) -> Self {
        self.forward_query = forward_query;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Replaces the whole rule list.
    pub fn with_rules(mut self, rules: Vec<RedirectRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &[RedirectRule] {
        &self.rules
    }

    pub fn identifier(&self) -> ShortUrlIdentifier {
        ShortUrlIdentifier::new(&self.short_code, self.domain.as_deref())
    }

    /// Returns true if the link may currently be used for redirection.
    pub fn is_enabled(&self) -> bool {
        self.is_enabled_at(Utc::now())
    }

    /// Validity window and visit limit check at an explicit instant.
    pub fn is_enabled_at(&self, now: DateTime<Utc>) -> bool {
        if self.valid_since.is_some_and(|since| now < since) {
            return false;
        }
        if self.valid_until.is_some_and(|until| now > until) {
            return false;
        }
        !self.max_visits.is_some_and(|max| self.visits_count >= max)
    }

    /// Destination for a request: first matching rule, otherwise the default long URL.
    pub fn destination_for(&self, context: &RequestContext) -> &str {
        resolve_destination(&self.rules, &self.long_url, context)
    }
}
