//! Endpoint entities
//!
//! - `EndpointDeclaration` - what the service file says exists
//! - `Endpoint` - the normalized record derived from the API description

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ApiKind, ServiceIdentity, Visibility};

/// Endpoint as declared in the service file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDeclaration {
    pub name: String,
    pub api: ApiKind,
    #[serde(default)]
    pub visibility: Visibility,
}

impl EndpointDeclaration {
    pub fn new(name: impl Into<String>, api: ApiKind) -> Self {
        Self {
            name: name.into(),
            api,
            visibility: Visibility::default(),
        }
    }

    /// The default endpoint for an API kind, named after it
    pub fn base(api: ApiKind) -> Self {
        let name = api.as_str().to_string();
        Self::new(name, api)
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

/// One route of a REST API
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RestRoute {
    pub path: String,
    /// Upper-case HTTP methods, sorted
    pub methods: Vec<String>,
}

/// REST details of an endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestApi {
    pub openapi_version: String,
    /// Sorted by path
    pub routes: Vec<RestRoute>,
}

/// Normalized endpoint record consumed by the routing layer.
///
/// Derived only; a new derivation replaces the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub application: String,
    pub service: String,
    pub name: String,
    pub api: ApiKind,
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<RestApi>,
}

impl Endpoint {
    pub fn new(identity: &ServiceIdentity, declaration: &EndpointDeclaration) -> Self {
        Self {
            application: identity.application().to_string(),
            service: identity.service().to_string(),
            name: declaration.name.clone(),
            api: declaration.api.clone(),
            visibility: declaration.visibility,
            rest: None,
        }
    }

    /// `application/service/name`
    pub fn unique(&self) -> String {
        format!("{}/{}/{}", self.application, self.service, self.name)
    }

    pub fn declaration(&self) -> EndpointDeclaration {
        EndpointDeclaration {
            name: self.name.clone(),
            api: self.api.clone(),
            visibility: self.visibility,
        }
    }

    pub fn route_count(&self) -> usize {
        self.rest.as_ref().map(|r| r.routes.len()).unwrap_or(0)
    }
}
