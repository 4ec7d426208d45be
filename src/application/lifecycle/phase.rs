//! Lifecycle phases
//!
//! `Unloaded → Loaded → {Created | Updated} → Built → Deployed`

use crate::error::{AgentError, AgentResult};

/// Where a service instance is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Phase {
    #[default]
    Unloaded,
    Loaded,
    Created,
    Updated,
    Built,
    Deployed,
}

/// One lifecycle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Load,
    Init,
    Create,
    Update,
    Build,
    Deploy,
    Sync,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Load => "load",
            Operation::Init => "init",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Build => "build",
            Operation::Deploy => "deploy",
            Operation::Sync => "sync",
        }
    }
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Unloaded => "unloaded",
            Phase::Loaded => "loaded",
            Phase::Created => "created",
            Phase::Updated => "updated",
            Phase::Built => "built",
            Phase::Deployed => "deployed",
        }
    }

    /// Phase after `operation` succeeds, or `InvalidPhase` if it may not
    /// run now. Phases never move backwards.
    pub fn transition(self, operation: Operation) -> AgentResult<Phase> {
        use Operation as Op;
        use Phase as P;

        let next = match (operation, self) {
            (Op::Load, P::Unloaded) => Some(P::Loaded),
            (Op::Init, P::Unloaded) => None,
            (Op::Init, current) => Some(current),
            (Op::Create, P::Loaded) => Some(P::Created),
            (Op::Update, P::Unloaded) => None,
            (Op::Update, current) => Some(current.max(P::Updated)),
            (Op::Build, P::Unloaded) => None,
            (Op::Build, current) => Some(current.max(P::Built)),
            (Op::Deploy, P::Built | P::Deployed) => Some(P::Deployed),
            (Op::Sync, current @ (P::Built | P::Deployed)) => Some(current),
            _ => None,
        };

        next.ok_or(AgentError::InvalidPhase {
            operation: operation.as_str(),
            phase: self.as_str(),
        })
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
