//! Template sets
//!
//! - factory: scaffold written once at Create
//! - builder: build descriptor (`builder/Dockerfile`) and `.dockerignore`
//! - getting started text returned by Load
//! - agent README returned by Info
//!
//! Rendering is pure: identical input gives byte-identical output.

use std::fmt::Write;

use crate::domain::entities::RenderedFile;
use crate::domain::value_objects::{AgentInfo, ServiceIdentity};

/// Descriptor location relative to the service root
pub const DESCRIPTOR: &str = "builder/Dockerfile";

/// Ignore file next to the descriptor
pub const DOCKERIGNORE: &str = "builder/Dockerfile.dockerignore";

/// Python base image used by generated descriptors
pub const PYTHON_IMAGE: &str = "python:3.11-slim";

/// Port the generated service listens on
pub const SERVICE_PORT: u16 = 8080;

/// Input of the builder template set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorInput {
    /// Paths copied into the image, in order
    pub components: Vec<String>,
    /// System packages installed in the runtime stage
    pub runtime_packages: Vec<String>,
}

/// Render the builder template set
pub fn builder_templates(input: &DescriptorInput) -> Vec<RenderedFile> {
    vec![
        RenderedFile::new(DESCRIPTOR, render_dockerfile(input)),
        RenderedFile::new(DOCKERIGNORE, render_dockerignore()),
    ]
}

fn render_dockerfile(input: &DescriptorInput) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Generated by dockyard: regenerated on every build");
    let _ = writeln!(out, "FROM {} AS builder", PYTHON_IMAGE);
    out.push_str("ENV POETRY_VIRTUALENVS_IN_PROJECT=true PIP_NO_CACHE_DIR=1\n");
    out.push_str("RUN pip install poetry\n");
    out.push_str("WORKDIR /app/src\n");
    out.push_str("COPY src/pyproject.toml src/poetry.lock* ./\n");
    out.push_str("RUN poetry install --only main --no-root\n");
    out.push('\n');

    let _ = writeln!(out, "FROM {}", PYTHON_IMAGE);
    let packages: Vec<&str> = input
        .runtime_packages
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    if !packages.is_empty() {
        let _ = writeln!(
            out,
            "RUN apt-get update && apt-get install -y --no-install-recommends {} && rm -rf /var/lib/apt/lists/*",
            packages.join(" ")
        );
    }
    out.push_str("WORKDIR /app\n");
    out.push_str("COPY --from=builder /app/src/.venv /app/.venv\n");
    out.push_str("ENV PATH=\"/app/.venv/bin:$PATH\"\n");
    for component in &input.components {
        let _ = writeln!(out, "COPY {0} {0}", component);
    }
    out.push_str("WORKDIR /app/src\n");
    let _ = writeln!(out, "EXPOSE {}", SERVICE_PORT);
    let _ = writeln!(
        out,
        "CMD [\"uvicorn\", \"main:app\", \"--host\", \"0.0.0.0\", \"--port\", \"{}\"]",
        SERVICE_PORT
    );
    out
}

fn render_dockerignore() -> String {
    ["**/__pycache__", "**/*.pyc", "**/.venv", ".git", "builder", "deployment"]
        .iter()
        .map(|line| format!("{}\n", line))
        .collect()
}

/// Render the factory (scaffold) template set
pub fn factory_templates(identity: &ServiceIdentity) -> Vec<RenderedFile> {
    vec![
        RenderedFile::new("README.md", render_readme(identity)),
        RenderedFile::new("src/pyproject.toml", render_pyproject(identity)),
        RenderedFile::new("src/main.py", render_main(identity)),
        RenderedFile::new("src/openapi.py", render_openapi_script(identity)),
    ]
}

fn render_readme(identity: &ServiceIdentity) -> String {
    format!(
        "# {service}\n\nPython service `{unique}` managed by the `{agent}` agent.\n\n\
         - `src/main.py`: application entry point\n\
         - `src/openapi.py`: writes `openapi/api.json`\n\
         - `builder/Dockerfile`: regenerated on every build\n",
        service = identity.service(),
        unique = identity.unique(),
        agent = identity.agent(),
    )
}

fn render_pyproject(identity: &ServiceIdentity) -> String {
    format!(
        "[tool.poetry]\n\
         name = \"{name}\"\n\
         version = \"{version}\"\n\
         description = \"{unique}\"\n\
         authors = []\n\
         package-mode = false\n\
         \n\
         [tool.poetry.dependencies]\n\
         python = \"^3.11\"\n\
         fastapi = \"^0.110\"\n\
         uvicorn = \"^0.29\"\n\
         \n\
         [build-system]\n\
         requires = [\"poetry-core\"]\n\
         build-backend = \"poetry.core.masonry.api\"\n",
        name = identity.dns_name(),
        version = identity.version(),
        unique = identity.unique(),
    )
}

fn render_main(identity: &ServiceIdentity) -> String {
    format!(
        "from fastapi import FastAPI\n\
         \n\
         app = FastAPI(title=\"{service}\")\n\
         \n\
         \n\
         @app.get(\"/version\")\n\
         def version():\n\
         \x20   return {{\"version\": \"{version}\"}}\n",
        service = identity.service(),
        version = identity.version(),
    )
}

fn render_openapi_script(identity: &ServiceIdentity) -> String {
    format!(
        "import json\n\
         import os\n\
         \n\
         from fastapi.openapi.utils import get_openapi\n\
         \n\
         from main import app\n\
         \n\
         if __name__ == \"__main__\":\n\
         \x20   schema = get_openapi(title=\"{service}\", version=\"{version}\", routes=app.routes)\n\
         \x20   os.makedirs(\"../openapi\", exist_ok=True)\n\
         \x20   with open(\"../openapi/api.json\", \"w\") as f:\n\
         \x20       f.write(json.dumps(schema))\n",
        service = identity.service(),
        version = identity.version(),
    )
}

/// Text shown to the user after Load
pub fn getting_started(identity: &ServiceIdentity) -> String {
    format!(
        "Service {unique} is managed by {agent}.\n\
         Edit src/main.py, then run `dockyard build` to produce {name} and `dockyard deploy` to roll it out.\n",
        unique = identity.unique(),
        agent = identity.agent(),
        name = identity.dns_name(),
    )
}

/// Markdown README of the agent itself
pub fn agent_readme(agent: &AgentInfo) -> String {
    format!(
        "# {name}\n\n\
         Published by {publisher}, version {version}.\n\n\
         Builds FastAPI services into `{python}` images and deploys them to Kubernetes.\n\n\
         ## Service layout\n\n\
         - `service.yaml`: name, application, version and `agent: {name}`\n\
         - `src/`: Poetry project with `main.py` and `openapi.py`\n\
         - `openapi/api.json`: generated OpenAPI document\n\
         - `{descriptor}`: rendered build descriptor\n\n\
         The service listens on port {port}. With hot reload on, source changes restart it.\n",
        name = agent.name,
        publisher = agent.publisher,
        version = agent.version,
        python = PYTHON_IMAGE,
        descriptor = DESCRIPTOR,
        port = SERVICE_PORT,
    )
}
