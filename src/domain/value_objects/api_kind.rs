//! API kind and visibility value objects
//!
//! - `ApiKind` - which protocol an endpoint speaks
//! - `Visibility` - who may reach it

use serde::{Deserialize, Serialize};

/// Protocol family of a declared endpoint.
///
/// Unknown kinds are kept verbatim in `Other` so that newer service files
/// still load; the resolver skips them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApiKind {
    Rest,
    Grpc,
    Http,
    Tcp,
    Other(String),
}

impl ApiKind {
    pub fn as_str(&self) -> &str {
        match self {
            ApiKind::Rest => "rest",
            ApiKind::Grpc => "grpc",
            ApiKind::Http => "http",
            ApiKind::Tcp => "tcp",
            ApiKind::Other(name) => name,
        }
    }
}

impl From<String> for ApiKind {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "rest" => ApiKind::Rest,
            "grpc" => ApiKind::Grpc,
            "http" => ApiKind::Http,
            "tcp" => ApiKind::Tcp,
            _ => ApiKind::Other(s),
        }
    }
}

impl From<&str> for ApiKind {
    fn from(s: &str) -> Self {
        ApiKind::from(s.to_string())
    }
}

impl From<ApiKind> for String {
    fn from(kind: ApiKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for ApiKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reachability of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Only reachable from inside the application
    #[default]
    Private,
    /// Reachable from other applications
    Application,
    /// Exposed outside the platform
    Public,
}

impl Visibility {
    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Private => write!(f, "private"),
            Visibility::Application => write!(f, "application"),
            Visibility::Public => write!(f, "public"),
        }
    }
}
