use std::sync::Arc;

use tracing::{debug, info};

use crate::{HandlerError, IntentRegistry, MatchResult, Response, Services, Utterance, fallback};

/// Matches an utterance against the registry and dispatches it, or hands it to
/// the fallback chain when nothing matches.
#[derive(Clone)]
pub struct Interpreter {
    registry: Arc<IntentRegistry>,
    services: Services,
}

impl Interpreter {
    #[must_use]
    pub fn new(registry: IntentRegistry, services: Services) -> Self {
        Self {
            registry: Arc::new(registry),
            services,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &IntentRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn services(&self) -> &Services {
        &self.services
    }

    pub async fn interpret(&self, utterance: &Utterance) -> Result<Response, HandlerError> {
        if utterance.raw().is_empty() {
            return Ok(Response::speech("I didn't understand that command."));
        }

        match self.registry.find(utterance) {
            Some(matched) => self.dispatch(matched).await,
            None => {
                info!("No command matched, falling back to lookup");
                Ok(fallback::respond(utterance, self.services.lookup.as_ref()).await)
            }
        }
    }

    /// Invokes the matched handler once and returns whatever it produced.
    pub async fn dispatch(&self, matched: MatchResult<'_>) -> Result<Response, HandlerError> {
        let MatchResult {
            index,
            intent,
            args,
        } = matched;
        debug!("Dispatching intent #{index} '{}'", intent.name());
        intent.handler().handle(args, self).await
    }
}
