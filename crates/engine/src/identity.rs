//! The identity provider contract.
//!
//! Authentication and role storage are external; the engine only needs
//! to resolve an actor ID to a role and to know who is acting.

use std::collections::HashMap;

use kasira_core::workflow::StaffRole;
use kasira_shared::types::ActorId;

/// An acting staff identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// The actor's ID.
    pub id: ActorId,
    /// The actor's role.
    pub role: StaffRole,
}

/// Identity lookup contract consumed by the engine.
pub trait IdentityProvider {
    /// Resolves an actor by ID.
    fn actor(&self, id: ActorId) -> Option<Actor>;

    /// The identity on whose behalf unattributed operations (e.g. quick
    /// actions) run, if any.
    fn current_actor(&self) -> Option<Actor>;
}

/// Map-backed identity provider for tests and the demo binary.
#[derive(Debug, Default)]
pub struct StaticIdentity {
    actors: HashMap<ActorId, StaffRole>,
    current: Option<ActorId>,
}

impl StaticIdentity {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an actor, returning `self` for chaining.
    #[must_use]
    pub fn with_actor(mut self, id: ActorId, role: StaffRole) -> Self {
        self.actors.insert(id, role);
        self
    }

    /// Sets the current acting identity, returning `self` for chaining.
    #[must_use]
    pub fn acting_as(mut self, id: ActorId) -> Self {
        self.current = Some(id);
        self
    }
}

impl IdentityProvider for StaticIdentity {
    fn actor(&self, id: ActorId) -> Option<Actor> {
        self.actors.get(&id).map(|role| Actor { id, role: *role })
    }

    fn current_actor(&self) -> Option<Actor> {
        self.current.and_then(|id| self.actor(id))
    }
}
