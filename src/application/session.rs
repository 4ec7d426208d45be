//! Confirmation sessions
//!
//! Load registers questions under a session id; the orchestrator answers
//! them; Create consumes the answers. Sessions are looked up explicitly by
//! id, never captured implicitly between calls.

use std::collections::{BTreeMap, HashMap};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::ports::{Prompter, Question};
use crate::error::{AgentError, AgentResult};

/// Identifier of one confirmation session
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Process-unique id for one CLI invocation
    pub fn generate() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        Self(format!("{}-{:x}", std::process::id(), nanos))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Questions and answers of one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    questions: Vec<Question>,
    answers: BTreeMap<String, bool>,
}

impl Session {
    pub fn new(id: SessionId, questions: Vec<Question>) -> Self {
        Self {
            id,
            questions,
            answers: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Questions still waiting for an answer, in registration order
    pub fn pending(&self) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| !self.answers.contains_key(&q.name))
            .collect()
    }

    pub fn is_done(&self) -> bool {
        self.pending().is_empty()
    }

    /// Record an answer for a registered question
    pub fn answer(&mut self, name: &str, value: bool) -> AgentResult<()> {
        if !self.questions.iter().any(|q| q.name == name) {
            return Err(self.error(format!("no question named '{}'", name)));
        }
        self.answers.insert(name.to_string(), value);
        Ok(())
    }

    /// The recorded answer to `name`.
    ///
    /// Asking for an unregistered or unanswered question is a protocol
    /// violation, not a default.
    pub fn confirm(&self, name: &str) -> AgentResult<bool> {
        if !self.questions.iter().any(|q| q.name == name) {
            return Err(self.error(format!("no question named '{}'", name)));
        }
        self.answers
            .get(name)
            .copied()
            .ok_or_else(|| self.error(format!("question '{}' was not answered", name)))
    }

    fn error(&self, message: String) -> AgentError {
        AgentError::Session {
            session: self.id.to_string(),
            message,
        }
    }
}

/// All open sessions of a controller
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<SessionId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or reopen) a session with `questions`
    pub fn register(&mut self, id: SessionId, questions: Vec<Question>) {
        self.sessions.insert(id.clone(), Session::new(id, questions));
    }

    pub fn get(&self, id: &SessionId) -> AgentResult<&Session> {
        self.sessions.get(id).ok_or_else(|| unknown(id))
    }

    pub fn pending(&self, id: &SessionId) -> AgentResult<Vec<Question>> {
        Ok(self.get(id)?.pending().into_iter().cloned().collect())
    }

    pub fn answer(&mut self, id: &SessionId, name: &str, value: bool) -> AgentResult<()> {
        self.sessions
            .get_mut(id)
            .ok_or_else(|| unknown(id))?
            .answer(name, value)
    }

    /// Answer every pending question with `prompter`
    pub fn answer_with(&mut self, id: &SessionId, prompter: &dyn Prompter) -> AgentResult<()> {
        let session = self.sessions.get_mut(id).ok_or_else(|| unknown(id))?;
        let answers: Vec<(String, bool)> = session
            .pending()
            .into_iter()
            .map(|q| (q.name.clone(), prompter.confirm(q)))
            .collect();
        for (name, value) in answers {
            session.answer(&name, value)?;
        }
        Ok(())
    }

    /// Remove and return a finished session
    pub fn take(&mut self, id: &SessionId) -> AgentResult<Session> {
        self.sessions.remove(id).ok_or_else(|| unknown(id))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

fn unknown(id: &SessionId) -> AgentError {
    AgentError::Session {
        session: id.to_string(),
        message: "no such session; was Load called with this id?".to_string(),
    }
}
