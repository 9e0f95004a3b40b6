use std::fmt;
use std::sync::Arc;

use regex::Regex;
use tracing::info;

use crate::{Handler, RegistryError};

/// One recognizable command: an unanchored pattern and the handler it routes to.
pub struct Intent {
    name: &'static str,
    pattern: Regex,
    handler: Arc<dyn Handler>,
}

impl Intent {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn pattern(&self) -> &Regex {
        &self.pattern
    }

    #[must_use]
    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intent")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("arity", &self.handler.arity())
            .finish()
    }
}

/// Ordered, immutable list of intents. Position in the list is precedence:
/// the first intent whose pattern matches wins.
#[derive(Debug)]
pub struct IntentRegistry {
    intents: Vec<Intent>,
}

impl IntentRegistry {
    #[must_use]
    pub fn builder() -> IntentRegistryBuilder {
        IntentRegistryBuilder::default()
    }

    /// The built-in command set in its documented precedence order.
    pub fn standard() -> Result<Self, RegistryError> {
        crate::handlers::standard_registry()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Intent> {
        self.intents.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Intent> {
        self.intents.iter()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.intents.iter().map(Intent::name).collect()
    }
}

/// Collects `(name, pattern, handler)` entries in precedence order and validates
/// them all at once in [`build`](Self::build).
#[derive(Default)]
pub struct IntentRegistryBuilder {
    entries: Vec<(&'static str, String, Arc<dyn Handler>)>,
}

impl IntentRegistryBuilder {
    #[must_use]
    pub fn intent<H>(self, name: &'static str, pattern: impl Into<String>, handler: H) -> Self
    where
        H: Handler + 'static,
    {
        self.shared_intent(name, pattern, Arc::new(handler))
    }

    /// Like [`intent`](Self::intent) but for a handler shared between entries.
    #[must_use]
    pub fn shared_intent(
        mut self,
        name: &'static str,
        pattern: impl Into<String>,
        handler: Arc<dyn Handler>,
    ) -> Self {
        self.entries.push((name, pattern.into(), handler));
        self
    }

    pub fn build(self) -> Result<IntentRegistry, RegistryError> {
        let mut intents: Vec<Intent> = Vec::with_capacity(self.entries.len());

        for (name, source, handler) in self.entries {
            if intents.iter().any(|intent| intent.name == name) {
                return Err(RegistryError::DuplicateName(name));
            }

            let pattern = Regex::new(&source).map_err(|source| RegistryError::InvalidPattern {
                name,
                source: Box::new(source),
            })?;

            // Group 0 is the whole match, not an argument.
            let captures = pattern.captures_len() - 1;
            let expected = handler.arity().total();
            if captures != expected {
                return Err(RegistryError::ArityMismatch {
                    name,
                    captures,
                    expected,
                });
            }

            intents.push(Intent {
                name,
                pattern,
                handler,
            });
        }

        info!("Built intent registry with {} intents", intents.len());
        Ok(IntentRegistry { intents })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{Args, Arity, HandlerError, Interpreter, Response};

    struct Fixed(Arity);

    #[async_trait]
    impl Handler for Fixed {
        fn arity(&self) -> Arity {
            self.0
        }

        async fn handle(&self, _args: Args, _cx: &Interpreter) -> Result<Response, HandlerError> {
            Ok(Response::Silence)
        }
    }

    #[test]
    fn keeps_insertion_order() {
        let registry = IntentRegistry::builder()
            .intent("zeta", "z", Fixed(Arity::NONE))
            .intent("alpha", "a", Fixed(Arity::NONE))
            .intent("mid", "m", Fixed(Arity::NONE))
            .build();

        let Ok(registry) = registry else {
            panic!("registry should build");
        };
        assert_eq!(registry.names(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn rejects_invalid_pattern() {
        let result = IntentRegistry::builder()
            .intent("date", r"(what\s+(?:is\s+)?today'?s?\s+date", Fixed(Arity::NONE))
            .build();

        assert!(matches!(
            result,
            Err(RegistryError::InvalidPattern { name: "date", .. })
        ));
    }

    #[test]
    fn rejects_capture_count_that_disagrees_with_handler() {
        let result = IntentRegistry::builder()
            .intent("play", r"play\s+(music|song)(?:\s+by\s+(.+))?", Fixed(Arity::required(1)))
            .build();

        assert!(matches!(
            result,
            Err(RegistryError::ArityMismatch {
                name: "play",
                captures: 2,
                expected: 1,
            })
        ));
    }

    #[test]
    fn rejects_duplicate_names() {
        let result = IntentRegistry::builder()
            .intent("help", "help", Fixed(Arity::NONE))
            .intent("help", "assist", Fixed(Arity::NONE))
            .build();

        assert!(matches!(result, Err(RegistryError::DuplicateName("help"))));
    }
}
