use tracing::{debug, info_span};

use crate::locale_plugin::LocalizedNamePlugin;
use crate::pipeline::{DataService, ExecutionContext, Plugin, PluginError};
use crate::richtext_plugin::RichTextExportPlugin;

/// An ordered set of registered plugins, dispatched per invocation.
///
/// # Architecture
///
/// The real host owns registration and dispatch; this runner reproduces the
/// part the plugins can observe — synchronous, in-order execution against a
/// shared mutable context, aborting on the first error. Embedding hosts and
/// integration tests drive it the same way:
///
/// ```ignore
/// let pipeline = PluginPipeline::standard();
/// pipeline.execute(&mut context, &service)?;
/// ```
pub struct PluginPipeline {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginPipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Creates a pipeline with both shipped plugins registered: rich-text
    /// export cleanup first, then localized-name substitution.
    pub fn standard() -> Self {
        let mut pipeline = Self::new();
        pipeline.register(RichTextExportPlugin);
        pipeline.register(LocalizedNamePlugin);
        pipeline
    }

    /// Appends a plugin to the dispatch order.
    pub fn register(&mut self, plugin: impl Plugin + 'static) -> &mut Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Runs every registered plugin against one invocation, in registration
    /// order. The first error aborts the run and propagates to the caller.
    pub fn execute(
        &self,
        context: &mut ExecutionContext,
        service: &dyn DataService,
    ) -> Result<(), PluginError> {
        for plugin in &self.plugins {
            let span = info_span!("plugin", name = plugin.name());
            let _entered = span.enter();
            debug!(message = %context.message_name, "Dispatching");
            plugin.execute(context, service)?;
        }
        Ok(())
    }
}

impl Default for PluginPipeline {
    fn default() -> Self {
        Self::new()
    }
}
