use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};

use crate::{Config, Engine, Result};

#[derive(Default)]
pub struct EngineBuilder {
    config: Config,
    rt: Option<Arc<Runtime>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(
        mut self,
        config: Config,
    ) -> Self {
        self.config = config;
        self
    }

    /// Runtime used by [`Engine::execute`]; a current-thread runtime is created when unset.
    pub fn runtime(
        mut self,
        runtime: Arc<Runtime>,
    ) -> Self {
        self.rt = Some(runtime);
        self
    }

    pub fn build(&self) -> Result<Engine> {
        let runtime = match &self.rt {
            Some(rt) => rt.clone(),
            None => Arc::new(Builder::new_current_thread().enable_all().build()?),
        };
        Engine::new(self.config.clone(), runtime)
    }
}
