//! Lifecycle Controller
//!
//! Drives one service instance through Load, Init, Create, Update, Build,
//! Deploy and Sync. Each phase:
//! 1. Checks the phase transition
//! 2. Runs against the collaborators (ports)
//! 3. Wraps the first failure with phase context
//! 4. Reports progress through the event sink and `tracing`
//!
//! Nothing is retried and nothing is rolled back. A failed Create leaves
//! whatever scaffold files it had already written.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::application::artifact::{ArtifactBuilder, BuildContext};
use crate::application::session::{SessionId, SessionStore};
use crate::domain::entities::{
    provider_environment_variables, requirements, DependencySet, Endpoint, EndpointDeclaration,
    EnvironmentVariables, ServiceConfiguration, Settings, SERVICE_FILE,
};
use crate::domain::ports::{
    CommandRunner, CommandSpec, Deployment, DeploymentApplier, FileSystem, LifecycleEvent,
    LifecycleEventSink, NoopEventSink, Prompter, Question, ServiceRepository,
};
use crate::domain::services::templates::{
    agent_readme, factory_templates, getting_started, DESCRIPTOR,
};
use crate::domain::services::{EndpointResolver, OPENAPI_DOCUMENT};
use crate::domain::value_objects::{
    AgentInfo, AgentInformation, ApiKind, BuildTarget, NetworkMapping, ServiceIdentity,
};
use crate::error::{AgentError, AgentResult};

use super::phase::{Operation, Phase};
use super::requests::*;

/// Name of the watch-mode confirmation registered at Load
pub const WATCH_QUESTION: &str = "with-hot-reload";

/// Replica count of every deployment
pub const DEFAULT_REPLICAS: u32 = 1;

/// Directory (relative to the service root) the source-level tools run in
pub const SOURCE_DIR: &str = "src";

/// Command lines of the source-level tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommands {
    pub installer: Vec<String>,
    pub openapi_generator: Vec<String>,
}

impl Default for ToolCommands {
    fn default() -> Self {
        Self {
            installer: argv(&["poetry", "install"]),
            openapi_generator: argv(&["poetry", "run", "python", "openapi.py"]),
        }
    }
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

/// Per-instance state bound at Load
#[derive(Debug, Clone)]
struct Instance {
    location: PathBuf,
    configuration: ServiceConfiguration,
    identity: ServiceIdentity,
    settings: Settings,
    endpoints: Vec<Endpoint>,
    environment: EnvironmentVariables,
    network_mappings: Vec<NetworkMapping>,
    dependencies: DependencySet,
}

/// A phase in flight
struct PhaseRun {
    operation: Operation,
    next: Phase,
    started: Instant,
}

/// Lifecycle state machine for one service instance
///
/// Parameterized by its file system and service repository; process
/// backed collaborators are trait objects so they can be swapped at
/// runtime.
pub struct LifecycleController<FS, SR>
where
    FS: FileSystem,
    SR: ServiceRepository,
{
    agent: AgentInfo,
    tools: ToolCommands,
    extra_packages: Vec<String>,
    fs: FS,
    services: SR,
    runner: Box<dyn CommandRunner>,
    artifacts: ArtifactBuilder,
    applier: Box<dyn DeploymentApplier>,
    events: Arc<dyn LifecycleEventSink>,
    sessions: SessionStore,
    phase: Phase,
    instance: Option<Instance>,
}

impl<FS, SR> LifecycleController<FS, SR>
where
    FS: FileSystem,
    SR: ServiceRepository,
{
    pub fn new(
        fs: FS,
        services: SR,
        runner: Box<dyn CommandRunner>,
        artifacts: ArtifactBuilder,
        applier: Box<dyn DeploymentApplier>,
    ) -> Self {
        Self {
            agent: AgentInfo::current(),
            tools: ToolCommands::default(),
            extra_packages: Vec::new(),
            fs,
            services,
            runner,
            artifacts,
            applier,
            events: Arc::new(NoopEventSink),
            sessions: SessionStore::new(),
            phase: Phase::Unloaded,
            instance: None,
        }
    }

    pub fn with_tools(mut self, tools: ToolCommands) -> Self {
        self.tools = tools;
        self
    }

    /// System packages added to every runtime image, after the service's own
    pub fn with_runtime_packages(mut self, packages: Vec<String>) -> Self {
        self.extra_packages = packages;
        self
    }

    pub fn with_events(mut self, events: Arc<dyn LifecycleEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn agent(&self) -> &AgentInfo {
        &self.agent
    }

    /// Discovery record of the agent. Allowed in any phase.
    pub fn information(&self) -> AgentInformation {
        AgentInformation::python_fastapi(self.agent.clone(), agent_readme(&self.agent))
    }

    pub fn identity(&self) -> Option<&ServiceIdentity> {
        self.instance.as_ref().map(|i| &i.identity)
    }

    pub fn location(&self) -> Option<&Path> {
        self.instance.as_ref().map(|i| i.location.as_path())
    }

    pub fn settings(&self) -> Option<&Settings> {
        self.instance.as_ref().map(|i| &i.settings)
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        self.instance
            .as_ref()
            .map(|i| i.endpoints.as_slice())
            .unwrap_or_default()
    }

    pub fn environment(&self) -> Option<&EnvironmentVariables> {
        self.instance.as_ref().map(|i| &i.environment)
    }

    pub fn network_mappings(&self) -> &[NetworkMapping] {
        self.instance
            .as_ref()
            .map(|i| i.network_mappings.as_slice())
            .unwrap_or_default()
    }

    pub fn dependencies(&self) -> Option<&DependencySet> {
        self.instance.as_ref().map(|i| &i.dependencies)
    }

    /// Questions of `session` that still need an answer
    pub fn pending_questions(&self, session: &SessionId) -> AgentResult<Vec<Question>> {
        self.sessions.pending(session)
    }

    /// Record the orchestrator's answer to one question
    pub fn answer(&mut self, session: &SessionId, name: &str, value: bool) -> AgentResult<()> {
        self.sessions.answer(session, name, value)
    }

    /// Answer every pending question of `session` with `prompter`
    pub fn answer_with(&mut self, session: &SessionId, prompter: &dyn Prompter) -> AgentResult<()> {
        self.sessions.answer_with(session, prompter)
    }

    // ------------------------------------------------------------------
    // Phases
    // ------------------------------------------------------------------

    /// Bind the persisted service at `location` to this instance
    pub fn load(&mut self, request: LoadRequest) -> AgentResult<LoadResponse> {
        let run = self.begin(Operation::Load)?;
        let result = self.load_instance(&request);
        self.finish(run, result)
    }

    /// Record network mappings and provider environment
    pub fn init(&mut self, request: InitRequest) -> AgentResult<InitResponse> {
        let run = self.begin(Operation::Init)?;
        let result = self.init_instance(request);
        self.finish(run, result)
    }

    /// One-time scaffold, install and endpoint generation
    pub fn create(&mut self, request: CreateRequest) -> AgentResult<CreateResponse> {
        let run = self.begin(Operation::Create)?;
        let result = self.create_instance(&request).map_err(AgentError::create);
        self.finish(run, result)
    }

    /// Re-render the build descriptor only
    pub fn update(&mut self, _request: UpdateRequest) -> AgentResult<UpdateResponse> {
        let run = self.begin(Operation::Update)?;
        let result = self.update_instance().map_err(AgentError::update);
        self.finish(run, result)
    }

    /// Regenerate the descriptor and build the image
    pub fn build(&mut self, request: BuildRequest) -> AgentResult<BuildResponse> {
        let run = self.begin(Operation::Build)?;
        let result = self.build_instance(&request).map_err(AgentError::build);
        self.finish(run, result)
    }

    /// Apply a deployment of the built image
    pub fn deploy(&mut self, request: DeployRequest) -> AgentResult<DeployResponse> {
        let run = self.begin(Operation::Deploy)?;
        let result = self.deploy_instance(&request).map_err(AgentError::deploy);
        self.finish(run, result)
    }

    /// Acknowledge a sync
    pub fn sync(&mut self, _request: SyncRequest) -> AgentResult<SyncResponse> {
        let run = self.begin(Operation::Sync)?;
        self.finish(run, Ok(SyncResponse))
    }

    // ------------------------------------------------------------------
    // Phase bodies
    // ------------------------------------------------------------------

    fn load_instance(&mut self, request: &LoadRequest) -> AgentResult<LoadResponse> {
        let location = request.location.clone();
        let configuration = self.services.load(&location)?;
        if !manages(&self.agent, &configuration.agent) {
            return Err(AgentError::Configuration {
                path: location.join(SERVICE_FILE),
                message: format!(
                    "service is managed by '{}', not '{}'",
                    configuration.agent, self.agent.name
                ),
            });
        }

        // `agent` may be a reference; images are named after the bare agent.
        let identity = ServiceIdentity::new(
            &configuration.application,
            &configuration.name,
            &self.agent.name,
        )
        .with_version(&configuration.version);
        let mut dependencies = requirements(&self.agent.name);
        dependencies.localize(&location);

        let document = location.join(OPENAPI_DOCUMENT);
        let endpoints = EndpointResolver::new(&self.fs)
            .resolve_all(&identity, &configuration.endpoints, &document, false)
            .map_err(|e| match e {
                AgentError::EndpointResolution { path, reason } => {
                    AgentError::Configuration { path, message: reason }
                }
                other => other,
            })?;
        self.events.on_event(LifecycleEvent::EndpointsResolved {
            count: endpoints.len(),
        });

        let questions = vec![Question::confirm(
            WATCH_QUESTION,
            "Code hot-reload (Recommended)?",
            true,
        )
        .with_description("restart the service when its code changes")];
        self.sessions
            .register(request.session.clone(), questions.clone());

        tracing::debug!(
            service = %identity.unique(),
            session = %request.session,
            endpoints = endpoints.len(),
            "service loaded"
        );

        let response = LoadResponse {
            identity: identity.clone(),
            endpoints: endpoints.clone(),
            getting_started: getting_started(&identity),
            questions,
        };

        self.instance = Some(Instance {
            location,
            settings: configuration.spec.clone(),
            configuration,
            identity,
            endpoints,
            environment: EnvironmentVariables::new(),
            network_mappings: Vec::new(),
            dependencies,
        });
        Ok(response)
    }

    fn init_instance(&mut self, request: InitRequest) -> AgentResult<InitResponse> {
        let instance = loaded(&mut self.instance, Operation::Init)?;

        let mut derived = Vec::new();
        for info in &request.provider_infos {
            derived.extend(provider_environment_variables(info)?);
        }
        instance.environment.add(derived);
        instance.network_mappings = request.proposed_network_mappings;

        Ok(InitResponse {
            environment_count: instance.environment.len(),
        })
    }

    fn create_instance(&mut self, request: &CreateRequest) -> AgentResult<CreateResponse> {
        let instance = loaded(&mut self.instance, Operation::Create)?;

        let watch = self.sessions.get(&request.session)?.confirm(WATCH_QUESTION)?;
        instance.settings.watch = watch;

        let root = instance.location.clone();
        for file in factory_templates(&instance.identity) {
            let path = file.destination(&root);
            self.fs.write(&path, file.content())?;
            self.events.on_event(LifecycleEvent::FileWritten { path });
        }

        let source = root.join(SOURCE_DIR);
        run_tool(
            self.runner.as_ref(),
            self.events.as_ref(),
            &self.tools.installer,
            &source,
        )?;

        let document = root.join(OPENAPI_DOCUMENT);
        if !self.fs.exists(&document) {
            run_tool(
                self.runner.as_ref(),
                self.events.as_ref(),
                &self.tools.openapi_generator,
                &source,
            )?;
        }
        if !self.fs.exists(&document) {
            return Err(AgentError::EndpointResolution {
                path: document,
                reason: "document is missing after running the generator".to_string(),
            });
        }

        let declaration = instance
            .configuration
            .endpoints
            .iter()
            .find(|d| d.api == ApiKind::Rest)
            .cloned()
            .unwrap_or_else(|| EndpointDeclaration::base(ApiKind::Rest));
        let endpoints: Vec<Endpoint> = EndpointResolver::new(&self.fs)
            .resolve(&instance.identity, &declaration, &document, false)?
            .into_iter()
            .collect();
        self.events.on_event(LifecycleEvent::EndpointsResolved {
            count: endpoints.len(),
        });

        let mut declarations: Vec<EndpointDeclaration> = instance
            .configuration
            .endpoints
            .iter()
            .filter(|d| d.api != ApiKind::Rest)
            .cloned()
            .collect();
        declarations.insert(0, declaration);
        instance.configuration.endpoints = declarations;
        instance.configuration.spec = instance.settings.clone();
        self.services.save(&root, &instance.configuration)?;
        self.events.on_event(LifecycleEvent::FileWritten {
            path: root.join(SERVICE_FILE),
        });

        instance.endpoints = endpoints.clone();
        // Answers are only consumed once Create went through.
        self.sessions.take(&request.session)?;

        Ok(CreateResponse {
            settings: instance.settings.clone(),
            endpoints,
        })
    }

    fn update_instance(&mut self) -> AgentResult<UpdateResponse> {
        let instance = loaded(&mut self.instance, Operation::Update)?;
        let context = build_context(instance, &BuildTarget::default(), &self.extra_packages);

        let written = self.artifacts.write_descriptor(
            &self.fs,
            &instance.location,
            &context,
            &instance.dependencies.all(),
        )?;
        for path in &written {
            self.events.on_event(LifecycleEvent::FileWritten {
                path: instance.location.join(path),
            });
        }
        Ok(UpdateResponse { written })
    }

    fn build_instance(&mut self, request: &BuildRequest) -> AgentResult<BuildResponse> {
        let instance = loaded(&mut self.instance, Operation::Build)?;

        // Reported only: every Build rebuilds.
        let fingerprint = instance.dependencies.fingerprint(&self.fs)?;
        self.events.on_event(LifecycleEvent::FingerprintComputed {
            fingerprint: fingerprint.to_string(),
        });

        let context = build_context(instance, &request.target, &self.extra_packages);
        let started = Instant::now();
        self.artifacts.build(
            &self.fs,
            &instance.location,
            &context,
            &instance.dependencies.all(),
        )?;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            image = %context.image,
            fingerprint = fingerprint.short(),
            elapsed_ms,
            "image built"
        );
        self.events.on_event(LifecycleEvent::ImageBuilt {
            image: context.image.full_name(),
        });

        Ok(BuildResponse {
            image: context.image,
            descriptor: PathBuf::from(DESCRIPTOR),
            fingerprint,
        })
    }

    fn deploy_instance(&mut self, request: &DeployRequest) -> AgentResult<DeployResponse> {
        let instance = loaded(&mut self.instance, Operation::Deploy)?;

        let image = ArtifactBuilder::image_reference(&instance.identity, &request.target);
        let deployment = Deployment {
            identity: instance.identity.clone(),
            image: image.clone(),
            config_map: instance.environment.as_config_map()?,
            replicas: DEFAULT_REPLICAS,
            ports: instance.network_mappings.clone(),
            namespace: request.namespace.clone(),
            root: instance.location.clone(),
        };

        tracing::debug!(applier = self.applier.name(), image = %image, "applying deployment");
        self.applier.apply(&deployment)?;
        self.events.on_event(LifecycleEvent::DeploymentApplied {
            image: image.full_name(),
            replicas: deployment.replicas,
        });

        Ok(DeployResponse {
            image,
            replicas: deployment.replicas,
        })
    }

    // ------------------------------------------------------------------
    // Bookkeeping
    // ------------------------------------------------------------------

    fn begin(&self, operation: Operation) -> AgentResult<PhaseRun> {
        let next = self.phase.transition(operation)?;
        let service = self
            .identity()
            .map(ServiceIdentity::unique)
            .unwrap_or_default();
        self.events.on_event(LifecycleEvent::PhaseStarted {
            phase: operation.as_str(),
            service,
        });
        Ok(PhaseRun {
            operation,
            next,
            started: Instant::now(),
        })
    }

    fn finish<T>(&mut self, run: PhaseRun, result: AgentResult<T>) -> AgentResult<T> {
        let phase = run.operation.as_str();
        let elapsed_ms = run.started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => {
                self.phase = run.next;
                self.events.on_event(LifecycleEvent::PhaseCompleted { phase });
                tracing::info!(phase, state = %self.phase, elapsed_ms, "phase completed");
            }
            Err(err) => {
                self.events.on_event(LifecycleEvent::PhaseFailed {
                    phase,
                    error: err.to_string(),
                });
                tracing::warn!(phase, elapsed_ms, error = %err, "phase failed");
            }
        }
        result
    }
}

/// `agent` is either the bare agent name or its `publisher/name[:version]`
/// reference.
fn manages(agent: &AgentInfo, declared: &str) -> bool {
    let unversioned = declared.split(':').next().unwrap_or_default();
    declared == agent.name || unversioned == format!("{}/{}", agent.publisher, agent.name)
}

fn loaded(instance: &mut Option<Instance>, operation: Operation) -> AgentResult<&mut Instance> {
    instance.as_mut().ok_or(AgentError::InvalidPhase {
        operation: operation.as_str(),
        phase: Phase::Unloaded.as_str(),
    })
}

fn build_context(instance: &Instance, target: &BuildTarget, extra: &[String]) -> BuildContext {
    let mut runtime_packages = instance.settings.runtime_packages.clone();
    for package in extra {
        if !runtime_packages.contains(package) {
            runtime_packages.push(package.clone());
        }
    }
    BuildContext {
        image: ArtifactBuilder::image_reference(&instance.identity, target),
        runtime_packages,
        environment: instance.environment.get().to_vec(),
    }
}

fn run_tool(
    runner: &dyn CommandRunner,
    events: &dyn LifecycleEventSink,
    argv: &[String],
    dir: &Path,
) -> AgentResult<()> {
    let command = CommandSpec::from_argv(argv, dir)?;
    events.on_event(LifecycleEvent::CommandStarted {
        command: command.display(),
        dir: dir.to_path_buf(),
    });
    runner.run(&command)?;
    Ok(())
}
