use crate::config::ResolveConfig;
use crate::protocols::ParsedInstruction;

use super::{Resolve, Resolver};

/// Terminal resolver. Always matches.
pub struct UnknownResolver;

impl Resolver for UnknownResolver {
    fn name(&self) -> &'static str {
        "unknown"
    }

    fn resolve(
        &self,
        instructions: &[ParsedInstruction],
        _config: &ResolveConfig,
    ) -> Option<Resolve> {
        tracing::trace!(instructions = instructions.len(), "no semantic pattern matched");
        Some(Resolve::Unknown)
    }
}
