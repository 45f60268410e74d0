//! Test doubles for the lexops service seam.
//!
//! [`FakeServices`] keeps a typed handle on every fake so tests can seed
//! state, run a workflow against [`FakeServices::services`], then inspect
//! what was called.
//!
//! ```
//! use lexops_testing::{FakeLex, FakeServices};
//!
//! let fakes = FakeServices::new().with_lex(FakeLex::new().with_bot("B1", "dev-Bot", None));
//! let services = fakes.services();
//! # let _ = services;
//! assert!(fakes.lex.has_bot("B1"));
//! ```

pub mod collaborators;
pub mod lex;

use std::sync::Arc;

use lexops_service::Services;

pub use collaborators::{FakeRoles, FakeStacks, FakeTransfer};
pub use lex::{DEFAULT_ROLE_ARN, FakeLex, LexCall};

/// One fake per service seam.
#[derive(Debug, Clone, Default)]
pub struct FakeServices {
    pub lex: Arc<FakeLex>,
    pub stacks: Arc<FakeStacks>,
    pub roles: Arc<FakeRoles>,
    pub transfer: Arc<FakeTransfer>,
}

impl FakeServices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lex(mut self, lex: FakeLex) -> Self {
        self.lex = Arc::new(lex);
        self
    }

    pub fn with_stacks(mut self, stacks: FakeStacks) -> Self {
        self.stacks = Arc::new(stacks);
        self
    }

    pub fn with_roles(mut self, roles: FakeRoles) -> Self {
        self.roles = Arc::new(roles);
        self
    }

    pub fn with_transfer(mut self, transfer: FakeTransfer) -> Self {
        self.transfer = Arc::new(transfer);
        self
    }

    /// A [`Services`] bundle backed by these fakes.
    pub fn services(&self) -> Services {
        Services::new(
            self.lex.clone(),
            self.stacks.clone(),
            self.roles.clone(),
            self.transfer.clone(),
        )
    }
}
