//! Endpoint Resolver
//!
//! Derives normalized `Endpoint` records from endpoint declarations and the
//! service's OpenAPI document.
//!
//! Only REST is supported today. Other API kinds are skipped, not rejected,
//! so service files can declare kinds this agent does not know yet.

use std::path::Path;

use serde_json::Value;

use crate::domain::entities::{Endpoint, EndpointDeclaration, RestApi, RestRoute};
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{ApiKind, ServiceIdentity, Visibility};
use crate::error::{AgentError, AgentResult};

/// Location of the generated OpenAPI document, relative to the service root
pub const OPENAPI_DOCUMENT: &str = "openapi/api.json";

const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Resolves declarations against an API description
pub struct EndpointResolver<'a, FS: FileSystem> {
    fs: &'a FS,
}

impl<'a, FS: FileSystem> EndpointResolver<'a, FS> {
    pub fn new(fs: &'a FS) -> Self {
        Self { fs }
    }

    /// Resolve one declaration.
    ///
    /// Returns `Ok(None)` for API kinds this agent does not handle.
    pub fn resolve(
        &self,
        identity: &ServiceIdentity,
        declaration: &EndpointDeclaration,
        document: &Path,
        make_public: bool,
    ) -> AgentResult<Option<Endpoint>> {
        let mut endpoint = Endpoint::new(identity, declaration);
        if make_public {
            endpoint.visibility = Visibility::Public;
        }

        match &declaration.api {
            ApiKind::Rest => {
                endpoint.rest = Some(self.load_rest(document)?);
                Ok(Some(endpoint))
            }
            other => {
                tracing::debug!(
                    endpoint = %declaration.name,
                    api = %other,
                    "skipping unsupported API kind"
                );
                Ok(None)
            }
        }
    }

    /// Resolve every declaration, in order, skipping unsupported kinds
    pub fn resolve_all(
        &self,
        identity: &ServiceIdentity,
        declarations: &[EndpointDeclaration],
        document: &Path,
        make_public: bool,
    ) -> AgentResult<Vec<Endpoint>> {
        let mut endpoints = Vec::new();
        for declaration in declarations {
            if let Some(endpoint) = self.resolve(identity, declaration, document, make_public)? {
                endpoints.push(endpoint);
            }
        }
        Ok(endpoints)
    }

    fn load_rest(&self, document: &Path) -> AgentResult<RestApi> {
        let content = self.fs.read(document).map_err(|e| {
            let reason = if e.is_not_found() {
                "document is missing".to_string()
            } else {
                e.to_string()
            };
            AgentError::EndpointResolution {
                path: document.to_path_buf(),
                reason,
            }
        })?;
        parse_openapi(document, &content)
    }
}

/// Parse an OpenAPI (or Swagger 2) JSON document into sorted routes
pub fn parse_openapi(document: &Path, content: &str) -> AgentResult<RestApi> {
    let malformed = |reason: &str| AgentError::EndpointResolution {
        path: document.to_path_buf(),
        reason: format!("malformed document: {}", reason),
    };

    let value: Value =
        serde_json::from_str(content).map_err(|e| malformed(&e.to_string()))?;

    let openapi_version = value
        .get("openapi")
        .or_else(|| value.get("swagger"))
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("no 'openapi' or 'swagger' version"))?
        .to_string();

    let paths = value
        .get("paths")
        .and_then(Value::as_object)
        .ok_or_else(|| malformed("no 'paths' object"))?;

    let mut routes = Vec::with_capacity(paths.len());
    for (path, item) in paths {
        let item = item
            .as_object()
            .ok_or_else(|| malformed(&format!("path '{}' is not an object", path)))?;
        let mut methods: Vec<String> = item
            .keys()
            .filter(|k| HTTP_METHODS.contains(&k.to_lowercase().as_str()))
            .map(|k| k.to_uppercase())
            .collect();
        if methods.is_empty() {
            continue;
        }
        methods.sort();
        methods.dedup();
        routes.push(RestRoute {
            path: path.clone(),
            methods,
        });
    }
    routes.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(RestApi {
        openapi_version,
        routes,
    })
}
