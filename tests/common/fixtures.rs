//! Test fixtures - reusable content constants for tests.

/// Minimal service managed by the agent, one REST endpoint
pub const SERVICE_YAML: &str = r#"name: api
application: orders
version: 0.3.0
agent: python-fastapi
endpoints:
  - name: rest
    api: rest
"#;

/// Service without declared endpoints (state before Create)
pub const FRESH_SERVICE_YAML: &str = r#"name: api
application: orders
version: 0.3.0
agent: dockyard/python-fastapi:1.0
"#;

/// Service managed by some other agent
pub const FOREIGN_SERVICE_YAML: &str = r#"name: api
application: orders
agent: node-express
"#;

/// OpenAPI document with three routes
pub const ORDERS_API: &str = r#"{
  "openapi": "3.1.0",
  "info": {"title": "api", "version": "0.3.0"},
  "paths": {
    "/orders": {"get": {}, "post": {}},
    "/orders/{id}": {"get": {}, "delete": {}},
    "/version": {"get": {}}
  }
}"#;

/// Provider information for a database
pub const POSTGRES_PROVIDER: &str = r#"name: postgres
origin: store
data:
  connection: postgres://db:5432/orders
"#;

pub const MAIN_PY: &str = "from fastapi import FastAPI\n\napp = FastAPI()\n";
