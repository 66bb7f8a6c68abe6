use crate::pipeline::{DataService, ExecutionContext, PluginError};

/// A synchronous event handler registered in the host's message pipeline.
///
/// # Contract
/// `execute` runs to completion on the host's pipeline thread. A plugin that
/// decides the invocation is not its business returns `Ok(())` without
/// touching the context — a filter miss is not an error. Collaborator
/// failures propagate as [`PluginError`]; the pipeline aborts the invocation
/// on the first error.
pub trait Plugin {
    /// Stable handler name, used for tracing spans.
    fn name(&self) -> &'static str;

    /// Runs the handler against one invocation.
    fn execute(
        &self,
        context: &mut ExecutionContext,
        service: &dyn DataService,
    ) -> Result<(), PluginError>;
}
