//! Domain Services
//!
//! Stateless logic used by the lifecycle:
//! - `EndpointResolver` - API description to endpoint records
//! - `templates` - factory, builder and getting-started renderers

pub mod endpoint_resolver;
pub mod templates;

pub use endpoint_resolver::{parse_openapi, EndpointResolver, OPENAPI_DOCUMENT};
pub use templates::{
    agent_readme, builder_templates, factory_templates, getting_started, DescriptorInput,
};
