//! The [`LexOps`] handle every lifecycle operation hangs off.

use lexops_bundle::BotWorkspace;
use lexops_service::Services;

use crate::config::WorkflowConfig;
use crate::waiter::Waiters;

/// Services, configuration and the local workspace, bundled for the
/// export / import / version / create / delete operations.
///
/// Operations run strictly in sequence and never roll back: a failure
/// leaves whatever the previous steps created in place.
#[derive(Debug, Clone)]
pub struct LexOps {
    pub(crate) services: Services,
    pub(crate) config: WorkflowConfig,
    pub(crate) workspace: BotWorkspace,
    pub(crate) waiters: Waiters,
}

impl LexOps {
    pub fn new(services: Services, config: WorkflowConfig) -> Self {
        let workspace = BotWorkspace::new(config.root_dir.clone());
        let waiters = Waiters::new(services.lex.clone(), config.waiters);
        Self {
            services,
            config,
            workspace,
            waiters,
        }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn workspace(&self) -> &BotWorkspace {
        &self.workspace
    }

    pub fn services(&self) -> &Services {
        &self.services
    }
}
