// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener bookkeeping keyed by dependency sets.
//!
//! Components that need document- or window-level events (outside clicks, pointer moves,
//! scroll) declare them here instead of registering callbacks with the host directly. Each
//! binding records:
//!
//! - the [`EventKinds`] the owner needs forwarded, and
//! - a fingerprint of the *dependency set* the owner's handler reads.
//!
//! Handlers themselves are plain methods on the owning component that receive the host and
//! current state at call time, so nothing is captured and nothing can go stale. What the
//! registry guarantees is the lifecycle half of the contract:
//!
//! - Rebinding on a dependency change replaces the binding in a single map operation; an
//!   owner never has zero bindings in the middle of a rebind, and never two.
//! - Binding with unchanged kinds and dependencies is a no-op.
//! - [`ListenerRegistry::unbind`] tolerates owners that are not bound.
//! - [`ListenerRegistry::len`] lets hosts and tests verify that repeated mount/unmount and
//!   open/close cycles do not leak.
//!
//! The host forwards the events in [`ListenerRegistry::kinds`] and routes each one to the
//! owners returned by [`ListenerRegistry::owners_for`].

use core::hash::{BuildHasher, Hash};

use hashbrown::HashMap;

use crate::event::{EventKinds, OwnerId};

/// A live binding for one owner.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    /// Event kinds forwarded to the owner.
    pub kinds: EventKinds,
    /// Fingerprint of the dependency set the binding was made with.
    pub fingerprint: u64,
    /// Number of times this owner's binding has been replaced.
    pub generation: u32,
}

/// Result of [`ListenerRegistry::bind`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BindOutcome {
    /// The owner had no binding; one was added.
    Bound,
    /// The owner's binding was replaced because its kinds or dependencies changed.
    Rebound,
    /// Kinds and dependencies are unchanged; nothing happened.
    Unchanged,
    /// Empty kinds were requested; any binding was removed.
    Unbound,
}

/// Registry of document/window listeners for a component subtree.
#[derive(Clone, Debug, Default)]
pub struct ListenerRegistry {
    bindings: HashMap<OwnerId, Binding>,
    next_owner: u32,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh owner id. Ids are never reused by the same registry.
    pub fn allocate_owner(&mut self) -> OwnerId {
        let id = OwnerId(self.next_owner);
        self.next_owner = self.next_owner.wrapping_add(1);
        id
    }

    /// Bind `owner` to `kinds` with the dependency set `deps`.
    ///
    /// When the owner is already bound with the same kinds and an equal dependency set the
    /// call is a no-op. Otherwise the binding is replaced atomically.
    pub fn bind<D: Hash + ?Sized>(
        &mut self,
        owner: OwnerId,
        kinds: EventKinds,
        deps: &D,
    ) -> BindOutcome {
        if kinds.is_empty() {
            return if self.unbind(owner) {
                BindOutcome::Unbound
            } else {
                BindOutcome::Unchanged
            };
        }

        let fingerprint = self.bindings.hasher().hash_one(deps);
        match self.bindings.get_mut(&owner) {
            Some(binding) if binding.kinds == kinds && binding.fingerprint == fingerprint => {
                BindOutcome::Unchanged
            }
            Some(binding) => {
                *binding = Binding {
                    kinds,
                    fingerprint,
                    generation: binding.generation.wrapping_add(1),
                };
                tracing::debug!(
                    owner = owner.get(),
                    ?kinds,
                    generation = binding.generation,
                    "listener rebound"
                );
                BindOutcome::Rebound
            }
            None => {
                self.bindings.insert(
                    owner,
                    Binding {
                        kinds,
                        fingerprint,
                        generation: 0,
                    },
                );
                tracing::debug!(owner = owner.get(), ?kinds, "listener bound");
                BindOutcome::Bound
            }
        }
    }

    /// Remove the owner's binding. Returns `false` if it had none.
    pub fn unbind(&mut self, owner: OwnerId) -> bool {
        let removed = self.bindings.remove(&owner).is_some();
        if removed {
            tracing::debug!(owner = owner.get(), "listener unbound");
        }
        removed
    }

    /// Current binding of `owner`, if any.
    pub fn binding(&self, owner: OwnerId) -> Option<&Binding> {
        self.bindings.get(&owner)
    }

    /// Whether `owner` currently listens to any kind in `kinds`.
    pub fn is_listening(&self, owner: OwnerId, kinds: EventKinds) -> bool {
        self.bindings
            .get(&owner)
            .is_some_and(|b| b.kinds.intersects(kinds))
    }

    /// Owners that listen to `kind`, in ascending id order.
    pub fn owners_for(&self, kind: EventKinds) -> impl Iterator<Item = OwnerId> + use<> {
        let mut owners: Vec<OwnerId> = self
            .bindings
            .iter()
            .filter(|(_, b)| b.kinds.intersects(kind))
            .map(|(owner, _)| *owner)
            .collect();
        owners.sort_unstable();
        owners.into_iter()
    }

    /// Union of every bound kind: the event streams the host must forward.
    pub fn kinds(&self) -> EventKinds {
        self.bindings
            .values()
            .fold(EventKinds::empty(), |acc, b| acc | b.kinds)
    }

    /// Number of bound owners.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no owner is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_then_unchanged_then_rebound() {
        let mut reg = ListenerRegistry::new();
        let owner = reg.allocate_owner();

        assert_eq!(reg.bind(owner, EventKinds::CLICK, &(1, "a")), BindOutcome::Bound);
        assert_eq!(reg.bind(owner, EventKinds::CLICK, &(1, "a")), BindOutcome::Unchanged);
        assert_eq!(reg.bind(owner, EventKinds::CLICK, &(2, "a")), BindOutcome::Rebound);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.binding(owner).map(|b| b.generation), Some(1));
    }

    #[test]
    fn kind_change_is_a_rebind() {
        let mut reg = ListenerRegistry::new();
        let owner = reg.allocate_owner();
        reg.bind(owner, EventKinds::CLICK, &());
        assert_eq!(
            reg.bind(owner, EventKinds::CLICK | EventKinds::SCROLL, &()),
            BindOutcome::Rebound
        );
        assert_eq!(reg.kinds(), EventKinds::CLICK | EventKinds::SCROLL);
    }

    #[test]
    fn empty_kinds_unbinds() {
        let mut reg = ListenerRegistry::new();
        let owner = reg.allocate_owner();
        reg.bind(owner, EventKinds::POINTER_MOVE, &());
        assert_eq!(reg.bind(owner, EventKinds::empty(), &()), BindOutcome::Unbound);
        assert!(reg.is_empty());
        assert_eq!(reg.bind(owner, EventKinds::empty(), &()), BindOutcome::Unchanged);
    }

    #[test]
    fn unbind_is_tolerant() {
        let mut reg = ListenerRegistry::new();
        let owner = reg.allocate_owner();
        assert!(!reg.unbind(owner));
        reg.bind(owner, EventKinds::CLICK, &());
        assert!(reg.unbind(owner));
        assert!(!reg.unbind(owner));
    }

    #[test]
    fn owners_for_filters_by_kind_in_order() {
        let mut reg = ListenerRegistry::new();
        let a = reg.allocate_owner();
        let b = reg.allocate_owner();
        let c = reg.allocate_owner();
        reg.bind(c, EventKinds::CLICK, &());
        reg.bind(a, EventKinds::CLICK | EventKinds::SCROLL, &());
        reg.bind(b, EventKinds::POINTER_MOVE, &());

        let clicks: Vec<_> = reg.owners_for(EventKinds::CLICK).collect();
        assert_eq!(clicks, vec![a, c]);
        let moves: Vec<_> = reg.owners_for(EventKinds::POINTER_MOVE).collect();
        assert_eq!(moves, vec![b]);
        assert!(reg.is_listening(a, EventKinds::SCROLL));
        assert!(!reg.is_listening(b, EventKinds::SCROLL));
    }

    #[test]
    fn repeated_cycles_do_not_leak() {
        let mut reg = ListenerRegistry::new();
        let base = reg.allocate_owner();
        reg.bind(base, EventKinds::CLICK, &());
        let popup = reg.allocate_owner();
        for i in 0..100_u32 {
            reg.bind(popup, EventKinds::POINTER_DOWN, &i);
            assert_eq!(reg.len(), 2);
            reg.unbind(popup);
            assert_eq!(reg.len(), 1);
        }
    }

    #[test]
    fn owner_ids_are_unique() {
        let mut reg = ListenerRegistry::new();
        let a = reg.allocate_owner();
        let b = reg.allocate_owner();
        assert_ne!(a, b);
    }
}
