use crate::domain::model::{CastArticleVoteResult, OutcomeKind};
use std::collections::HashMap;

pub type OutcomeHandler = Box<dyn Fn(&CastArticleVoteResult) + Send + Sync>;

/// Routes cast-vote outcomes to the handlers registered for their kind.
///
/// Built once at composition time and handed to the service; there is no
/// global registry.
#[derive(Default)]
pub struct OutcomeDispatcher {
    handlers: HashMap<OutcomeKind, Vec<OutcomeHandler>>,
}

impl OutcomeDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_handler<F>(&mut self, kind: OutcomeKind, handler: F)
    where
        F: Fn(&CastArticleVoteResult) + Send + Sync + 'static,
    {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    pub fn with_handler<F>(mut self, kind: OutcomeKind, handler: F) -> Self
    where
        F: Fn(&CastArticleVoteResult) + Send + Sync + 'static,
    {
        self.register_handler(kind, handler);
        self
    }

    /// Runs the handlers for `outcome.kind()` in registration order.
    pub fn dispatch(&self, outcome: &CastArticleVoteResult) {
        if let Some(handlers) = self.handlers.get(&outcome.kind()) {
            for handler in handlers {
                handler(outcome);
            }
        }
    }

    pub fn handlers_for(&self, kind: OutcomeKind) -> usize {
        self.handlers.get(&kind).map(Vec::len).unwrap_or(0)
    }
}

impl std::fmt::Debug for OutcomeDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<&OutcomeKind, usize> =
            self.handlers.iter().map(|(k, v)| (k, v.len())).collect();
        f.debug_struct("OutcomeDispatcher")
            .field("handlers", &counts)
            .finish()
    }
}
