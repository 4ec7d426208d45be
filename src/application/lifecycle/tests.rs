//! Lifecycle Controller Tests

use super::*;
use crate::application::artifact::ArtifactBuilder;
use crate::application::session::SessionId;
use crate::domain::entities::{EndpointDeclaration, ServiceConfiguration, SERVICE_FILE};
use crate::domain::ports::{
    CommandError, CommandRunner, CommandSpec, Deployment, DeploymentApplier, ImageBuildOutput,
    ImageBuildRequest, ImageBuilder, LifecycleEvent, LifecycleEventSink, ServiceRepository,
};
use crate::domain::services::templates::DESCRIPTOR;
use crate::domain::services::OPENAPI_DOCUMENT;
use crate::domain::value_objects::{
    AgentInfo, ApiKind, BuildTarget, NetworkMapping, ProviderInformation, Visibility,
};
use crate::error::{AgentError, AgentResult};
use crate::infrastructure::fs::LocalFs;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::{tempdir, TempDir};

const DOCUMENT: &str = r#"{
  "openapi": "3.1.0",
  "paths": {
    "/version": {"get": {}},
    "/orders": {"post": {}, "get": {}}
  }
}"#;

// Mock implementations for testing

struct MockServiceRepository {
    config: RefCell<Option<ServiceConfiguration>>,
    saved: Arc<Mutex<Vec<ServiceConfiguration>>>,
}

impl ServiceRepository for MockServiceRepository {
    fn load(&self, location: &Path) -> AgentResult<ServiceConfiguration> {
        self.config
            .borrow()
            .clone()
            .ok_or_else(|| AgentError::Configuration {
                path: location.join(SERVICE_FILE),
                message: "file not found".to_string(),
            })
    }

    fn save(&self, _location: &Path, config: &ServiceConfiguration) -> AgentResult<()> {
        *self.config.borrow_mut() = Some(config.clone());
        self.saved.lock().unwrap().push(config.clone());
        Ok(())
    }
}

/// Records every command; the generator writes `document` next to `src/`
struct RecordingRunner {
    commands: Arc<Mutex<Vec<CommandSpec>>>,
    document: Option<String>,
    fail_on: Option<String>,
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &CommandSpec) -> Result<(), CommandError> {
        self.commands.lock().unwrap().push(command.clone());
        if self.fail_on.as_deref() == Some(command.program()) {
            return Err(CommandError::Failed {
                command: command.display(),
                code: Some(1),
                stderr: "boom".to_string(),
            });
        }
        if command.args().iter().any(|a| a == "openapi.py") {
            if let Some(document) = &self.document {
                let target = command.dir().join("..").join(OPENAPI_DOCUMENT);
                std::fs::create_dir_all(target.parent().unwrap()).unwrap();
                std::fs::write(target, document).unwrap();
            }
        }
        Ok(())
    }
}

struct RecordingImageBuilder {
    descriptors: Arc<Mutex<Vec<String>>>,
}

impl ImageBuilder for RecordingImageBuilder {
    fn build(&self, request: &ImageBuildRequest) -> Result<ImageBuildOutput, String> {
        let content =
            std::fs::read_to_string(request.descriptor_path()).map_err(|e| e.to_string())?;
        self.descriptors.lock().unwrap().push(content);
        Ok(ImageBuildOutput::default())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

struct RecordingApplier {
    deployments: Arc<Mutex<Vec<Deployment>>>,
}

impl DeploymentApplier for RecordingApplier {
    fn apply(&self, deployment: &Deployment) -> AgentResult<()> {
        self.deployments.lock().unwrap().push(deployment.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

struct RecordingEventSink {
    events: Arc<Mutex<Vec<LifecycleEvent>>>,
}

impl LifecycleEventSink for RecordingEventSink {
    fn on_event(&self, event: LifecycleEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[derive(Default)]
struct Recorded {
    commands: Arc<Mutex<Vec<CommandSpec>>>,
    descriptors: Arc<Mutex<Vec<String>>>,
    deployments: Arc<Mutex<Vec<Deployment>>>,
    saved: Arc<Mutex<Vec<ServiceConfiguration>>>,
    events: Arc<Mutex<Vec<LifecycleEvent>>>,
}

struct Fixture {
    dir: TempDir,
    controller: LifecycleController<LocalFs, MockServiceRepository>,
    recorded: Recorded,
    session: SessionId,
}

impl Fixture {
    fn new(config: ServiceConfiguration) -> Self {
        Self::with_runner(config, Some(DOCUMENT.to_string()), None)
    }

    fn with_runner(
        config: ServiceConfiguration,
        document: Option<String>,
        fail_on: Option<&str>,
    ) -> Self {
        let recorded = Recorded::default();
        let controller = LifecycleController::new(
            LocalFs::new(),
            MockServiceRepository {
                config: RefCell::new(Some(config)),
                saved: recorded.saved.clone(),
            },
            Box::new(RecordingRunner {
                commands: recorded.commands.clone(),
                document,
                fail_on: fail_on.map(str::to_string),
            }),
            ArtifactBuilder::new(Box::new(RecordingImageBuilder {
                descriptors: recorded.descriptors.clone(),
            })),
            Box::new(RecordingApplier {
                deployments: recorded.deployments.clone(),
            }),
        )
        .with_events(Arc::new(RecordingEventSink {
            events: recorded.events.clone(),
        }));

        Self {
            dir: tempdir().unwrap(),
            controller,
            recorded,
            session: SessionId::new("session-1"),
        }
    }

    fn root(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    fn load(&mut self) -> AgentResult<LoadResponse> {
        let request = LoadRequest::new(self.root(), self.session.clone());
        self.controller.load(request)
    }

    fn create(&mut self, watch: bool) -> AgentResult<CreateResponse> {
        self.load()?;
        self.controller
            .answer(&self.session, WATCH_QUESTION, watch)?;
        self.controller.create(CreateRequest {
            session: self.session.clone(),
        })
    }

    fn write(&self, relative: &str, content: &str) {
        let path = self.dir.path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
}

fn orders_api() -> ServiceConfiguration {
    ServiceConfiguration::new("orders", "api", "python-fastapi")
}

// Info

#[test]
fn information_is_available_before_load() {
    let fixture = Fixture::new(orders_api());
    let info = fixture.controller.information();

    assert_eq!(info.agent, AgentInfo::current());
    assert_eq!(info.protocols, vec!["http"]);
    assert!(info.readme.contains("# python-fastapi"));
    assert_eq!(fixture.controller.phase(), Phase::Unloaded);
}

// Load

#[test]
fn load_without_endpoints_returns_empty_list() {
    let mut fixture = Fixture::new(orders_api());
    let response = fixture.load().unwrap();

    assert_eq!(response.identity.unique(), "orders/api");
    assert!(response.endpoints.is_empty());
    assert_eq!(response.questions.len(), 1);
    assert_eq!(response.questions[0].name, WATCH_QUESTION);
    assert!(response.questions[0].default);
    assert!(response.getting_started.contains("orders/api"));
    assert_eq!(fixture.controller.phase(), Phase::Loaded);
}

#[test]
fn load_resolves_existing_document() {
    let config = orders_api().with_endpoint(EndpointDeclaration::base(ApiKind::Rest));
    let mut fixture = Fixture::new(config);
    fixture.write(OPENAPI_DOCUMENT, DOCUMENT);

    let response = fixture.load().unwrap();
    assert_eq!(response.endpoints.len(), 1);
    assert_eq!(response.endpoints[0].route_count(), 2);
    assert_eq!(response.endpoints[0].visibility, Visibility::Private);
}

#[test]
fn load_with_malformed_document_is_configuration_error() {
    let config = orders_api().with_endpoint(EndpointDeclaration::base(ApiKind::Rest));
    let mut fixture = Fixture::new(config);
    fixture.write(OPENAPI_DOCUMENT, "{ not json");

    let err = fixture.load().unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("api.json"));
    assert_eq!(fixture.controller.phase(), Phase::Unloaded);
}

#[test]
fn load_skips_unsupported_api_kinds() {
    let config = orders_api().with_endpoint(EndpointDeclaration::new("events", ApiKind::Grpc));
    let mut fixture = Fixture::new(config);

    let response = fixture.load().unwrap();
    assert!(response.endpoints.is_empty());
}

#[test]
fn load_rejects_foreign_agent() {
    let mut fixture = Fixture::new(ServiceConfiguration::new("orders", "api", "go-grpc"));
    let err = fixture.load().unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn load_accepts_agent_reference() {
    let config = ServiceConfiguration::new("orders", "api", "dockyard/python-fastapi:0.0.1");
    let mut fixture = Fixture::new(config);
    let response = fixture.load().unwrap();
    assert_eq!(response.identity.agent(), "python-fastapi");

    let built = fixture.controller.build(BuildRequest::default()).unwrap();
    assert_eq!(built.image.full_name(), "python-fastapi/orders-api:latest");
    let descriptors = fixture.recorded.descriptors.lock().unwrap();
    assert!(!descriptors[0].contains("dockyard/python-fastapi:0.0.1"));
}

#[test]
fn load_twice_is_invalid_phase() {
    let mut fixture = Fixture::new(orders_api());
    fixture.load().unwrap();
    let err = fixture.load().unwrap_err();
    assert!(matches!(err, AgentError::InvalidPhase { operation: "load", .. }));
}

// Init

#[test]
fn init_records_mappings_and_provider_environment() {
    let mut fixture = Fixture::new(orders_api());
    fixture.load().unwrap();

    let response = fixture
        .controller
        .init(InitRequest {
            provider_infos: vec![ProviderInformation::new("postgres", "store/db")
                .with("connection", "postgres://db:5432")],
            proposed_network_mappings: vec![NetworkMapping::new("rest", 8080)],
        })
        .unwrap();

    assert_eq!(response.environment_count, 1);
    assert_eq!(fixture.controller.network_mappings()[0].port, 8080);
    let env = fixture.controller.environment().unwrap();
    assert_eq!(env.get()[0].key, "PROVIDER__STORE_DB__POSTGRES__CONNECTION");
    assert_eq!(fixture.controller.phase(), Phase::Loaded);
}

#[test]
fn init_rejects_malformed_provider() {
    let mut fixture = Fixture::new(orders_api());
    fixture.load().unwrap();

    let err = fixture
        .controller
        .init(InitRequest {
            provider_infos: vec![ProviderInformation::new("", "store")],
            proposed_network_mappings: vec![],
        })
        .unwrap_err();
    assert!(err.is_configuration());
}

// Create

#[test]
fn create_without_answer_is_session_error() {
    let mut fixture = Fixture::new(orders_api());
    fixture.load().unwrap();

    let err = fixture
        .controller
        .create(CreateRequest {
            session: fixture.session.clone(),
        })
        .unwrap_err();

    assert!(matches!(err, AgentError::Create(_)));
    assert!(err.is_session());
    assert!(fixture.recorded.commands.lock().unwrap().is_empty());
    assert_eq!(fixture.controller.phase(), Phase::Loaded);
}

#[test]
fn create_with_unknown_session_is_session_error() {
    let mut fixture = Fixture::new(orders_api());
    fixture.load().unwrap();

    let err = fixture
        .controller
        .create(CreateRequest {
            session: SessionId::new("other"),
        })
        .unwrap_err();
    assert!(err.is_session());
}

#[test]
fn create_scaffolds_installs_then_resolves() {
    let mut fixture = Fixture::new(orders_api());
    let response = fixture.create(true).unwrap();

    assert!(response.settings.watch);
    assert_eq!(response.endpoints.len(), 1);
    assert_eq!(response.endpoints[0].name, "rest");
    assert_eq!(response.endpoints[0].route_count(), 2);
    assert!(fixture.dir.path().join("src/main.py").exists());

    let commands = fixture.recorded.commands.lock().unwrap();
    let lines: Vec<String> = commands.iter().map(CommandSpec::display).collect();
    assert_eq!(lines, vec!["poetry install", "poetry run python openapi.py"]);
    assert!(commands.iter().all(|c| c.dir() == fixture.dir.path().join("src")));

    let saved = fixture.recorded.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].spec.watch);
    assert_eq!(saved[0].endpoints, vec![EndpointDeclaration::base(ApiKind::Rest)]);
    assert_eq!(fixture.controller.phase(), Phase::Created);
}

#[test]
fn create_event_order_puts_install_before_resolution() {
    let mut fixture = Fixture::new(orders_api());
    fixture.create(false).unwrap();

    let events = fixture.recorded.events.lock().unwrap();
    let install = events
        .iter()
        .position(|e| matches!(e, LifecycleEvent::CommandStarted { command, .. } if command == "poetry install"))
        .unwrap();
    let scaffold = events
        .iter()
        .position(|e| matches!(e, LifecycleEvent::FileWritten { path } if path.ends_with("src/main.py")))
        .unwrap();
    let resolved = events
        .iter()
        .rposition(|e| matches!(e, LifecycleEvent::EndpointsResolved { count: 1 }))
        .unwrap();
    assert!(scaffold < install);
    assert!(install < resolved);
    assert!(matches!(
        events.last(),
        Some(LifecycleEvent::PhaseCompleted { phase: "create" })
    ));
}

#[test]
fn create_skips_generator_when_document_exists() {
    let mut fixture = Fixture::new(orders_api());
    fixture.write(OPENAPI_DOCUMENT, DOCUMENT);
    fixture.create(true).unwrap();

    let commands = fixture.recorded.commands.lock().unwrap();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].display(), "poetry install");
}

#[test]
fn create_fails_when_generator_leaves_no_document() {
    let mut fixture = Fixture::with_runner(orders_api(), None, None);
    let err = fixture.create(true).unwrap_err();

    assert!(matches!(
        err.root(),
        AgentError::EndpointResolution { .. }
    ));
    // No rollback: the scaffold stays behind.
    assert!(fixture.dir.path().join("src/main.py").exists());
    assert!(fixture.recorded.saved.lock().unwrap().is_empty());
}

#[test]
fn create_wraps_installer_failure() {
    let mut fixture = Fixture::with_runner(orders_api(), Some(DOCUMENT.to_string()), Some("poetry"));
    let err = fixture.create(true).unwrap_err();

    assert!(matches!(err, AgentError::Create(_)));
    assert!(matches!(err.root(), AgentError::Command(CommandError::Failed { .. })));
    assert_eq!(fixture.recorded.commands.lock().unwrap().len(), 1);
    let events = fixture.recorded.events.lock().unwrap();
    assert!(matches!(
        events.last(),
        Some(LifecycleEvent::PhaseFailed { phase: "create", .. })
    ));
}

#[test]
fn create_keeps_other_declarations() {
    let config = orders_api().with_endpoint(EndpointDeclaration::new("events", ApiKind::Grpc));
    let mut fixture = Fixture::new(config);
    fixture.create(true).unwrap();

    let saved = fixture.recorded.saved.lock().unwrap();
    let names: Vec<&str> = saved[0].endpoints.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["rest", "events"]);
}

#[test]
fn create_runs_only_once() {
    let mut fixture = Fixture::new(orders_api());
    fixture.create(true).unwrap();
    let err = fixture
        .controller
        .create(CreateRequest {
            session: fixture.session.clone(),
        })
        .unwrap_err();
    assert!(matches!(err, AgentError::InvalidPhase { .. }));
}

// Update

#[test]
fn update_renders_descriptor_without_touching_endpoints() {
    let mut fixture = Fixture::new(orders_api());
    fixture.load().unwrap();

    let first = fixture.controller.update(UpdateRequest).unwrap();
    let content = std::fs::read_to_string(fixture.dir.path().join(DESCRIPTOR)).unwrap();
    let second = fixture.controller.update(UpdateRequest).unwrap();
    let again = std::fs::read_to_string(fixture.dir.path().join(DESCRIPTOR)).unwrap();

    assert_eq!(first.written, second.written);
    assert_eq!(content, again);
    assert!(fixture.controller.endpoints().is_empty());
    assert!(fixture.recorded.commands.lock().unwrap().is_empty());
    assert_eq!(fixture.controller.phase(), Phase::Updated);
}

// Build

#[test]
fn build_twice_gives_same_image_and_descriptor() {
    let mut fixture = Fixture::new(orders_api());
    fixture.create(true).unwrap();

    let first = fixture.controller.build(BuildRequest::default()).unwrap();
    let second = fixture.controller.build(BuildRequest::default()).unwrap();

    assert_eq!(first.image, second.image);
    assert_eq!(first.fingerprint, second.fingerprint);
    assert_eq!(first.image.full_name(), "python-fastapi/orders-api:latest");
    let descriptors = fixture.recorded.descriptors.lock().unwrap();
    assert_eq!(descriptors.len(), 2);
    assert_eq!(descriptors[0], descriptors[1]);
    assert_eq!(fixture.controller.phase(), Phase::Built);
}

#[test]
fn build_fingerprint_follows_source_changes() {
    let mut fixture = Fixture::new(orders_api());
    fixture.create(true).unwrap();

    let before = fixture.controller.build(BuildRequest::default()).unwrap();
    fixture.write("src/extra.py", "X = 1\n");
    let after = fixture.controller.build(BuildRequest::default()).unwrap();

    assert_ne!(before.fingerprint, after.fingerprint);
    // Still rebuilt both times.
    assert_eq!(fixture.recorded.descriptors.lock().unwrap().len(), 2);
}

#[test]
fn build_uses_requested_target() {
    let mut fixture = Fixture::new(orders_api());
    fixture.load().unwrap();

    let target = BuildTarget::new()
        .with_repository("registry.local/team/")
        .with_tag("1.2.3");
    let response = fixture.controller.build(BuildRequest { target }).unwrap();
    assert_eq!(
        response.image.full_name(),
        "registry.local/team/orders-api:1.2.3"
    );
    assert_eq!(response.descriptor, PathBuf::from(DESCRIPTOR));
}

// Deploy and Sync

#[test]
fn deploy_requires_build() {
    let mut fixture = Fixture::new(orders_api());
    fixture.load().unwrap();
    let err = fixture.controller.deploy(DeployRequest::default()).unwrap_err();
    assert!(matches!(
        err,
        AgentError::InvalidPhase {
            operation: "deploy",
            phase: "loaded"
        }
    ));
}

#[test]
fn deploy_applies_config_map_and_single_replica() {
    let mut fixture = Fixture::new(orders_api());
    fixture.load().unwrap();
    fixture
        .controller
        .init(InitRequest {
            provider_infos: vec![ProviderInformation::new("redis", "cache").with("url", "redis://r")],
            proposed_network_mappings: vec![NetworkMapping::new("rest", 8080)],
        })
        .unwrap();
    fixture.controller.build(BuildRequest::default()).unwrap();

    let response = fixture
        .controller
        .deploy(DeployRequest {
            target: BuildTarget::default(),
            namespace: "staging".to_string(),
        })
        .unwrap();

    assert_eq!(response.replicas, DEFAULT_REPLICAS);
    let deployments = fixture.recorded.deployments.lock().unwrap();
    assert_eq!(deployments.len(), 1);
    assert_eq!(deployments[0].namespace, "staging");
    assert_eq!(
        deployments[0].config_map.get("PROVIDER__CACHE__REDIS__URL"),
        Some(&"redis://r".to_string())
    );
    assert_eq!(deployments[0].ports, vec![NetworkMapping::new("rest", 8080)]);
    assert_eq!(fixture.controller.phase(), Phase::Deployed);
}

#[test]
fn deploy_rejects_conflicting_environment_keys() {
    let mut fixture = Fixture::new(orders_api());
    fixture.load().unwrap();
    fixture
        .controller
        .init(InitRequest {
            provider_infos: vec![
                ProviderInformation::new("redis", "cache").with("url", "redis://a"),
                ProviderInformation::new("redis", "cache").with("url", "redis://b"),
            ],
            proposed_network_mappings: vec![],
        })
        .unwrap();
    fixture.controller.build(BuildRequest::default()).unwrap();

    let err = fixture.controller.deploy(DeployRequest::default()).unwrap_err();
    assert!(matches!(err, AgentError::Deploy(_)));
    assert!(err.is_configuration());
    assert!(fixture.recorded.deployments.lock().unwrap().is_empty());
}

#[test]
fn repeated_init_with_same_provider_still_deploys() {
    let mut fixture = Fixture::new(orders_api());
    fixture.load().unwrap();
    for url in ["redis://r", "redis://r", "redis://replica"] {
        fixture
            .controller
            .init(InitRequest {
                provider_infos: vec![ProviderInformation::new("redis", "cache").with("url", url)],
                proposed_network_mappings: vec![],
            })
            .unwrap();
    }
    assert_eq!(fixture.controller.environment().unwrap().len(), 1);
    fixture.controller.build(BuildRequest::default()).unwrap();

    fixture.controller.deploy(DeployRequest::default()).unwrap();
    let deployments = fixture.recorded.deployments.lock().unwrap();
    assert_eq!(deployments[0].config_map.len(), 1);
    assert_eq!(
        deployments[0].config_map.get("PROVIDER__CACHE__REDIS__URL"),
        Some(&"redis://replica".to_string())
    );
}

#[test]
fn sync_requires_build_then_always_succeeds() {
    let mut fixture = Fixture::new(orders_api());
    fixture.load().unwrap();
    assert!(fixture.controller.sync(SyncRequest).is_err());

    fixture.controller.build(BuildRequest::default()).unwrap();
    fixture.controller.sync(SyncRequest).unwrap();
    fixture.controller.sync(SyncRequest).unwrap();
    assert_eq!(fixture.controller.phase(), Phase::Built);
}

#[test]
fn operations_before_load_are_rejected() {
    let mut fixture = Fixture::new(orders_api());
    assert!(fixture.controller.init(InitRequest::default()).is_err());
    assert!(fixture.controller.update(UpdateRequest).is_err());
    assert!(fixture.controller.build(BuildRequest::default()).is_err());
    assert!(fixture.recorded.events.lock().unwrap().is_empty());
}
