use std::sync::Arc;

use pagesmith_config::EffectiveConfig;
use pagesmith_plugins::Transformers;

use crate::reload::{ReloadEvent, ReloadSink};

/// Everything a task needs, fixed at construction time.
#[derive(Clone)]
pub struct BuildContext {
    pub config: Arc<EffectiveConfig>,
    pub transformers: Transformers,
    pub reload: Option<Arc<dyn ReloadSink>>,
}

impl BuildContext {
    pub fn new(config: impl Into<Arc<EffectiveConfig>>, transformers: Transformers) -> Self {
        Self {
            config: config.into(),
            transformers,
            reload: None,
        }
    }

    /// Context with the default collaborators for `config`.
    pub fn with_defaults(config: impl Into<Arc<EffectiveConfig>>) -> Self {
        let config = config.into();
        let transformers = Transformers::with_defaults(&config.source_dir);
        Self::new(config, transformers)
    }

    /// Attach a reload sink. Compile tasks notify it after every run.
    pub fn with_reload(mut self, sink: Arc<dyn ReloadSink>) -> Self {
        self.reload = Some(sink);
        self
    }

    pub(crate) fn notify(&self, event: ReloadEvent) {
        if let Some(sink) = &self.reload {
            sink.reload(event);
        }
    }
}

impl std::fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildContext")
            .field("root", &self.config.root)
            .field("transformers", &self.transformers)
            .field("reload", &self.reload.is_some())
            .finish()
    }
}
