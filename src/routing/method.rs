//! The closed set of HTTP methods a route can be registered under.
//!
//! # Design Decisions
//! - Exactly seven methods; anything else is "not allowed"
//! - Parsing is case-insensitive, storage is the upper-case variant
//! - No fallthrough: HEAD is a distinct key, never an alias of GET

use std::fmt;
use std::str::FromStr;

use axum::http::Method;

use crate::error::RouterError;

/// A method the route table has a slot for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RouteMethod {
    Get,
    Post,
    Put,
    Delete,
    Options,
    Patch,
    Head,
}

impl RouteMethod {
    /// Every routable method, in registration order for `any`.
    pub const ALL: [RouteMethod; 7] = [
        RouteMethod::Get,
        RouteMethod::Post,
        RouteMethod::Put,
        RouteMethod::Delete,
        RouteMethod::Options,
        RouteMethod::Head,
        RouteMethod::Patch,
    ];

    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteMethod::Get => "GET",
            RouteMethod::Post => "POST",
            RouteMethod::Put => "PUT",
            RouteMethod::Delete => "DELETE",
            RouteMethod::Options => "OPTIONS",
            RouteMethod::Patch => "PATCH",
            RouteMethod::Head => "HEAD",
        }
    }

    /// Resolve a request method, ignoring ASCII case.
    ///
    /// Returns `None` for methods outside the routable set (TRACE, CONNECT,
    /// extension methods).
    pub fn from_http(method: &Method) -> Option<Self> {
        Self::lookup(method.as_str())
    }

    fn lookup(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(raw))
    }
}

impl FromStr for RouteMethod {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| RouterError::InvalidMethod {
            method: s.to_ascii_uppercase(),
        })
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RouteMethod> for Method {
    fn from(method: RouteMethod) -> Self {
        match method {
            RouteMethod::Get => Method::GET,
            RouteMethod::Post => Method::POST,
            RouteMethod::Put => Method::PUT,
            RouteMethod::Delete => Method::DELETE,
            RouteMethod::Options => Method::OPTIONS,
            RouteMethod::Patch => Method::PATCH,
            RouteMethod::Head => Method::HEAD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("get".parse::<RouteMethod>().unwrap(), RouteMethod::Get);
        assert_eq!("PoSt".parse::<RouteMethod>().unwrap(), RouteMethod::Post);
        assert_eq!("HEAD".parse::<RouteMethod>().unwrap(), RouteMethod::Head);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "trace".parse::<RouteMethod>().unwrap_err();
        assert!(matches!(err, RouterError::InvalidMethod { ref method } if method == "TRACE"));
        assert_eq!(
            err.to_string(),
            "The method [TRACE] is unknown or not authorized."
        );
    }

    #[test]
    fn test_from_http() {
        assert_eq!(RouteMethod::from_http(&Method::OPTIONS), Some(RouteMethod::Options));
        assert_eq!(RouteMethod::from_http(&Method::TRACE), None);
        assert_eq!(RouteMethod::from_http(&Method::CONNECT), None);

        let lowercase = Method::from_bytes(b"patch").unwrap();
        assert_eq!(RouteMethod::from_http(&lowercase), Some(RouteMethod::Patch));
    }

    #[test]
    fn test_all_is_exhaustive_and_distinct() {
        let mut names: Vec<_> = RouteMethod::ALL.iter().map(|m| m.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 7);
        for m in RouteMethod::ALL {
            assert_eq!(Method::from(m).as_str(), m.as_str());
        }
    }
}
