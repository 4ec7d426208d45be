//! Output Rendering
//!
//! Human-readable summaries of phase responses. In JSON mode the event
//! stream is the output, so these are only used for text.

use std::fmt::Write as _;

use crate::application::{BuildResponse, CreateResponse, DeployResponse, UpdateResponse};
use crate::domain::entities::Endpoint;
use crate::domain::value_objects::{AgentInformation, Capability};

/// Icons for output rendering
struct Icons {
    check: &'static str,
    write: &'static str,
    bullet: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            write: "→",
            bullet: "•",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            write: "->",
            bullet: "-",
        }
    }
}

/// Text renderer for phase responses
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    /// Whether to use unicode
    pub unicode: bool,
    /// Verbosity level
    pub verbose: u8,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            unicode: true,
            verbose: 0,
        }
    }
}

impl TextRenderer {
    fn icons(&self) -> Icons {
        if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        }
    }

    pub fn endpoints(&self, endpoints: &[Endpoint]) -> String {
        let icons = self.icons();
        if endpoints.is_empty() {
            return "No endpoints.\n".to_string();
        }
        let mut out = String::new();
        for endpoint in endpoints {
            let _ = writeln!(
                out,
                "{} {} ({}, {})",
                icons.bullet, endpoint.name, endpoint.api, endpoint.visibility
            );
            let Some(rest) = &endpoint.rest else {
                continue;
            };
            if self.verbose == 0 {
                let _ = writeln!(
                    out,
                    "    OpenAPI {}, {} routes",
                    rest.openapi_version,
                    rest.routes.len()
                );
                continue;
            }
            for route in &rest.routes {
                let _ = writeln!(out, "    {:<24} {}", route.path, route.methods.join(", "));
            }
        }
        out
    }

    pub fn create(&self, response: &CreateResponse) -> String {
        let icons = self.icons();
        let mut out = format!("{} Service created\n", icons.check);
        let _ = writeln!(out, "    hot reload: {}", on_off(response.settings.watch));
        out.push_str(&self.endpoints(&response.endpoints));
        out
    }

    pub fn update(&self, response: &UpdateResponse) -> String {
        let icons = self.icons();
        let mut out = String::new();
        for path in &response.written {
            let _ = writeln!(out, "{} {}", icons.write, path.display());
        }
        let _ = writeln!(out, "{} Descriptor updated", icons.check);
        out
    }

    pub fn build(&self, response: &BuildResponse) -> String {
        let icons = self.icons();
        let mut out = format!("{} Built {}\n", icons.check, response.image);
        if self.verbose > 0 {
            let _ = writeln!(out, "    descriptor:  {}", response.descriptor.display());
            let _ = writeln!(out, "    fingerprint: {}", response.fingerprint);
        } else {
            let _ = writeln!(out, "    fingerprint: {}", response.fingerprint.short());
        }
        out
    }

    /// Agent summary; the README follows with `-v`
    pub fn info(&self, information: &AgentInformation) -> String {
        let icons = self.icons();
        let capabilities: Vec<&str> = information
            .capabilities
            .iter()
            .map(Capability::as_str)
            .collect();
        let rows = [
            ("requires", information.runtime_requirements.join(", ")),
            ("capabilities", capabilities.join(", ")),
            ("languages", information.languages.join(", ")),
            ("protocols", information.protocols.join(", ")),
        ];
        let mut out = format!("{}\n", information.agent.reference());
        for (label, value) in rows {
            let _ = writeln!(out, "{} {:<14}{}", icons.bullet, format!("{label}:"), value);
        }
        if self.verbose > 0 {
            out.push('\n');
            out.push_str(&information.readme);
        }
        out
    }

    pub fn deploy(&self, response: &DeployResponse, namespace: &str) -> String {
        let icons = self.icons();
        format!(
            "{} Deployed {} to '{}' ({} replica{})\n",
            icons.check,
            response.image,
            namespace,
            response.replicas,
            if response.replicas == 1 { "" } else { "s" }
        )
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
