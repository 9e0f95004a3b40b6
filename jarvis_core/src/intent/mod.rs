mod matcher;
mod registry;

pub use matcher::{Args, MatchResult};
pub use registry::{Intent, IntentRegistry, IntentRegistryBuilder};
