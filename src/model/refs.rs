//! Dual-state entity references
//!
//! Every cross-reference in the document model is an [`EntityRef`]: an
//! explicit tagged union of an identifier string (the serialized half) and a
//! resolved entity handle (the in-memory half). Resolution is a plain
//! transition `(state, context) -> state` callable repeatedly, so a deferred
//! forward reference is an ordinary, retryable state rather than a getter
//! side effect.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Shared handle to an entity owned by a document collection.
pub type Handle<E> = Rc<RefCell<E>>;

/// Wrap an entity in a fresh shared handle.
pub fn handle<E>(entity: E) -> Handle<E> {
    Rc::new(RefCell::new(entity))
}

/// An entity that owns an identifier string.
pub trait Identified {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

/// A resolution context that can find entities of type `E` by identifier.
///
/// The document context implements this per referenced entity type; passing
/// it explicitly to [`EntityRef::resolve`] is what wires references to their
/// targets; entities hold no back-link to their document.
pub trait DocLookup<E> {
    /// Find an entity by identifier. `None` for a blank identifier, a
    /// missing entity, or a partially-populated graph; never an error.
    fn find(&self, id: &str) -> Option<Handle<E>>;
}

macro_rules! impl_identified {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::model::refs::Identified for $ty {
                fn id(&self) -> &str {
                    &self.id
                }
                fn set_id(&mut self, id: String) {
                    self.id = id;
                }
            }
        )+
    };
}
pub(crate) use impl_identified;

/// A cross-entity reference in one of three states.
pub enum EntityRef<E> {
    /// No reference held (default-constructed)
    Empty,
    /// Identifier known, target not yet resolved (e.g. a forward reference
    /// read before the referenced collection was populated)
    ById(String),
    /// Target resolved; the identifier is always read from the entity itself
    Resolved(Handle<E>),
}

impl<E: Identified> EntityRef<E> {
    /// Reference by identifier, to be resolved later.
    pub fn by_id(id: impl Into<String>) -> Self {
        EntityRef::ById(id.into())
    }

    /// Reference an already-held entity.
    pub fn resolved(entity: Handle<E>) -> Self {
        EntityRef::Resolved(entity)
    }

    /// The identifier string.
    ///
    /// For a resolved reference this is the entity's own current identifier
    /// (single source of truth after resolution), so renumbering the entity
    /// is observed here immediately.
    pub fn id(&self) -> Option<String> {
        match self {
            EntityRef::Empty => None,
            EntityRef::ById(id) => Some(id.clone()),
            EntityRef::Resolved(entity) => Some(entity.borrow().id().to_string()),
        }
    }

    /// The resolved entity handle, without attempting resolution.
    pub fn entity(&self) -> Option<Handle<E>> {
        match self {
            EntityRef::Resolved(entity) => Some(entity.clone()),
            _ => None,
        }
    }

    /// Point the reference at an entity. Always succeeds; this is the
    /// preferred write path.
    pub fn set_entity(&mut self, entity: Handle<E>) {
        *self = EntityRef::Resolved(entity);
    }

    /// Set the identifier.
    ///
    /// Only meaningful while unresolved; once resolved, the last successful
    /// resolution wins and the call is ignored.
    pub fn set_id(&mut self, id: impl Into<String>) {
        match self {
            EntityRef::Resolved(_) => {}
            _ => *self = EntityRef::ById(id.into()),
        }
    }

    /// Attempt resolution against a context.
    ///
    /// `ById` transitions to `Resolved` when the context finds the target; a
    /// failed lookup leaves the state unchanged and is not an error: the
    /// reference stays retryable once the context is fully populated.
    /// Returns the entity handle held after the attempt.
    pub fn resolve<C: DocLookup<E>>(&mut self, context: &C) -> Option<Handle<E>> {
        if let EntityRef::ById(id) = self {
            if let Some(entity) = context.find(id) {
                *self = EntityRef::Resolved(entity);
            }
        }
        self.entity()
    }

    /// True when the reference holds a resolved entity.
    pub fn is_resolved(&self) -> bool {
        matches!(self, EntityRef::Resolved(_))
    }

    /// True when no identifier and no entity are held.
    pub fn is_empty(&self) -> bool {
        matches!(self, EntityRef::Empty)
    }
}

// Manual impls: the derived versions would bound `E: Clone` / `E: Default`.
impl<E> Clone for EntityRef<E> {
    fn clone(&self) -> Self {
        match self {
            EntityRef::Empty => EntityRef::Empty,
            EntityRef::ById(id) => EntityRef::ById(id.clone()),
            EntityRef::Resolved(entity) => EntityRef::Resolved(entity.clone()),
        }
    }
}

impl<E> Default for EntityRef<E> {
    fn default() -> Self {
        EntityRef::Empty
    }
}

/// Equality is defined purely over the resolved entities, ignoring the raw
/// identifier spelling: two references are equal iff both are resolved to
/// the same or content-equal entities (or both are empty). Unresolved
/// references compare unequal even with identical identifier strings.
impl<E: PartialEq> PartialEq for EntityRef<E> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EntityRef::Empty, EntityRef::Empty) => true,
            (EntityRef::Resolved(a), EntityRef::Resolved(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            _ => false,
        }
    }
}

impl<E: Identified> fmt::Debug for EntityRef<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Empty => write!(f, "EntityRef::Empty"),
            EntityRef::ById(id) => write!(f, "EntityRef::ById({id:?})"),
            EntityRef::Resolved(entity) => {
                write!(f, "EntityRef::Resolved({:?})", entity.borrow().id())
            }
        }
    }
}

/// Serializes as the identifier string: the exchange format stores
/// references as identifiers, and a resolved reference's identifier is read
/// from the entity itself.
impl<E: Identified> Serialize for EntityRef<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.id() {
            Some(id) => serializer.serialize_some(&id),
            None => serializer.serialize_none(),
        }
    }
}

/// Deserializes into the unresolved state; resolution happens lazily against
/// the owning document once its collections are populated.
impl<'de, E> Deserialize<'de> for EntityRef<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id: Option<String> = Option::deserialize(deserializer)?;
        Ok(match id {
            Some(id) => EntityRef::ById(id),
            None => EntityRef::Empty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Probe {
        id: String,
        payload: u32,
    }

    impl Identified for Probe {
        fn id(&self) -> &str {
            &self.id
        }
        fn set_id(&mut self, id: String) {
            self.id = id;
        }
    }

    struct Bag {
        probes: Vec<Handle<Probe>>,
    }

    impl DocLookup<Probe> for Bag {
        fn find(&self, id: &str) -> Option<Handle<Probe>> {
            if id.trim().is_empty() {
                return None;
            }
            self.probes.iter().find(|p| p.borrow().id == id).cloned()
        }
    }

    fn probe(id: &str, payload: u32) -> Handle<Probe> {
        handle(Probe {
            id: id.to_string(),
            payload,
        })
    }

    #[test]
    fn default_is_empty() {
        let r: EntityRef<Probe> = EntityRef::default();
        assert!(r.is_empty());
        assert_eq!(r.id(), None);
        assert_eq!(r.entity(), None);
    }

    #[test]
    fn resolve_transitions_by_id_to_resolved() {
        let bag = Bag {
            probes: vec![probe("P1", 7)],
        };
        let mut r = EntityRef::by_id("P1");
        let found = r.resolve(&bag);
        assert!(found.is_some());
        assert!(r.is_resolved());
        assert_eq!(r.id(), Some("P1".to_string()));
    }

    #[test]
    fn failed_resolution_is_retryable() {
        let mut bag = Bag { probes: Vec::new() };
        let mut r = EntityRef::by_id("P9");

        // Forward reference: target not yet in the collection
        assert!(r.resolve(&bag).is_none());
        assert!(!r.is_resolved());
        assert_eq!(r.id(), Some("P9".to_string()));

        // Target arrives later; the same reference now resolves
        bag.probes.push(probe("P9", 1));
        assert!(r.resolve(&bag).is_some());
        assert!(r.is_resolved());
    }

    #[test]
    fn set_id_ignored_once_resolved() {
        let mut r = EntityRef::resolved(probe("P1", 0));
        r.set_id("P2");
        assert_eq!(r.id(), Some("P1".to_string()));
    }

    #[test]
    fn resolved_id_tracks_entity_renumbering() {
        let p = probe("old", 0);
        let r = EntityRef::resolved(p.clone());
        p.borrow_mut().set_id("new".to_string());
        assert_eq!(r.id(), Some("new".to_string()));
    }

    #[test]
    fn equality_over_resolved_entities_only() {
        let shared = probe("P1", 3);
        let same_content = probe("P1", 3);
        let other = probe("P2", 4);

        assert_eq!(EntityRef::resolved(shared.clone()), EntityRef::resolved(shared.clone()));
        assert_eq!(EntityRef::resolved(shared.clone()), EntityRef::resolved(same_content));
        assert_ne!(EntityRef::resolved(shared), EntityRef::resolved(other));

        // Identifier spelling alone never makes references equal
        let a: EntityRef<Probe> = EntityRef::by_id("P1");
        let b: EntityRef<Probe> = EntityRef::by_id("P1");
        assert_ne!(a, b);
        assert_eq!(EntityRef::<Probe>::Empty, EntityRef::<Probe>::Empty);
    }

    #[test]
    fn blank_id_never_resolves() {
        let bag = Bag {
            probes: vec![probe("P1", 7)],
        };
        let mut r: EntityRef<Probe> = EntityRef::by_id("   ");
        assert!(r.resolve(&bag).is_none());
    }
}
