//! Kubernetes Deployment Applier
//!
//! Renders `deployment/kubernetes/{configmap,deployment}.yaml` under the
//! service root, then runs `kubectl apply -n <namespace> -f <dir>`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::ports::{
    CommandRunner, CommandSpec, Deployment, DeploymentApplier, FileSystem,
};
use crate::error::AgentResult;

/// Manifest directory relative to the service root
pub const MANIFEST_DIR: &str = "deployment/kubernetes";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata {
    name: String,
    namespace: String,
    labels: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigMapManifest {
    api_version: &'static str,
    kind: &'static str,
    metadata: Metadata,
    data: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeploymentManifest {
    api_version: &'static str,
    kind: &'static str,
    metadata: Metadata,
    spec: DeploymentSpec,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeploymentSpec {
    replicas: u32,
    selector: Selector,
    template: PodTemplate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Selector {
    match_labels: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct PodTemplate {
    metadata: PodMetadata,
    spec: PodSpec,
}

#[derive(Debug, Serialize)]
struct PodMetadata {
    labels: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct PodSpec {
    containers: Vec<Container>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Container {
    name: String,
    image: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ports: Vec<ContainerPort>,
    env_from: Vec<EnvFrom>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContainerPort {
    name: String,
    container_port: u16,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvFrom {
    config_map_ref: ConfigMapRef,
}

#[derive(Debug, Serialize)]
struct ConfigMapRef {
    name: String,
}

/// Deployment applier backed by kubectl
pub struct KubectlApplier<FS: FileSystem> {
    program: String,
    fs: FS,
    runner: Box<dyn CommandRunner>,
}

impl<FS: FileSystem> KubectlApplier<FS> {
    pub fn new(program: impl Into<String>, fs: FS, runner: Box<dyn CommandRunner>) -> Self {
        Self {
            program: program.into(),
            fs,
            runner,
        }
    }

    /// Render the manifests for `deployment`, keyed by file name
    pub fn render(&self, deployment: &Deployment) -> AgentResult<Vec<(&'static str, String)>> {
        let name = deployment.identity.dns_name();
        let config_name = format!("{}-config", name);
        let labels = labels(deployment);
        let metadata = |name: &str| Metadata {
            name: name.to_string(),
            namespace: deployment.namespace.clone(),
            labels: labels.clone(),
        };

        let config_map = ConfigMapManifest {
            api_version: "v1",
            kind: "ConfigMap",
            metadata: metadata(&config_name),
            data: deployment.config_map.clone(),
        };

        let manifest = DeploymentManifest {
            api_version: "apps/v1",
            kind: "Deployment",
            metadata: metadata(&name),
            spec: DeploymentSpec {
                replicas: deployment.replicas,
                selector: Selector {
                    match_labels: labels.clone(),
                },
                template: PodTemplate {
                    metadata: PodMetadata {
                        labels: labels.clone(),
                    },
                    spec: PodSpec {
                        containers: vec![Container {
                            name: name.clone(),
                            image: deployment.image.full_name(),
                            ports: deployment
                                .ports
                                .iter()
                                .map(|p| ContainerPort {
                                    name: p.endpoint.clone(),
                                    container_port: p.port,
                                })
                                .collect(),
                            env_from: vec![EnvFrom {
                                config_map_ref: ConfigMapRef { name: config_name },
                            }],
                        }],
                    },
                },
            },
        };

        Ok(vec![
            ("configmap.yaml", serde_yaml_ng::to_string(&config_map)?),
            ("deployment.yaml", serde_yaml_ng::to_string(&manifest)?),
        ])
    }

    fn manifest_dir(root: &Path) -> PathBuf {
        root.join(MANIFEST_DIR)
    }
}

fn labels(deployment: &Deployment) -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "app.kubernetes.io/name".to_string(),
            deployment.identity.dns_name(),
        ),
        (
            "app.kubernetes.io/part-of".to_string(),
            deployment.identity.application().to_string(),
        ),
        (
            "app.kubernetes.io/managed-by".to_string(),
            deployment.identity.agent().to_string(),
        ),
    ])
}

impl<FS: FileSystem> DeploymentApplier for KubectlApplier<FS> {
    fn apply(&self, deployment: &Deployment) -> AgentResult<()> {
        let dir = Self::manifest_dir(&deployment.root);
        for (file, content) in self.render(deployment)? {
            self.fs.write(&dir.join(file), &content)?;
        }

        let command = CommandSpec::new(&self.program, &deployment.root)
            .arg("apply")
            .arg("-n")
            .arg(&deployment.namespace)
            .arg("-f")
            .arg(dir.display().to_string());
        self.runner.run(&command)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "kubectl"
    }
}
