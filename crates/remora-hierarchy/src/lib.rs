//! Static class-hierarchy analysis for consistent member renaming.
//!
//! Renaming a method on one class silently breaks overrides unless every
//! class in the same override/access chain renames it the same way. This
//! crate groups the (class, name, descriptor) triples of a closed world of
//! classes into *member realms* (equivalence classes that must share one
//! renaming decision) and provides [`HierarchyAwareDelegator`], a
//! [`MappingLookup`](remora_mapping::MappingLookup) wrapper that
//! canonicalizes every member operation to its realm's root definition so a
//! single recorded rename covers the whole realm.
//!
//! The realm computation covers the subtleties of JVM access: `static` and
//! `private` members never participate in inheritance; `public`/`protected`
//! members extend to all descendants; package-private members extend only to
//! same-package descendants, except where a subclass widens the access to
//! `public`/`protected`, which re-opens the realm to that subclass's own
//! descendants.

mod delegator;
mod realm;

pub use delegator::{HierarchyAwareDelegator, SimpleHierarchyAwareLookup, TopLevelMemberLookup};
pub use realm::{realms_of, MemberRealm, RealmLookup};
