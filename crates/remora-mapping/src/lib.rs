//! Name-mapping contracts for remapping JVM classfiles between namespaces.
//!
//! A mapping goes from a *source* namespace (the names found in the input
//! classes, typically obfuscated) to a *destination* namespace. Reading goes
//! through [`MappingLookup`], writing through [`MappingSink`];
//! [`SimpleMappingLookup`] implements both on top of two hash maps. Absent
//! entries are never an error: a name that has no mapping simply keeps its
//! source form.
//!
//! Class names are JVM internal names (`java/lang/Object`). Members are
//! identified by [`MemberRef`] triples; whether a ref denotes a field or a
//! method is decided by the first byte of its descriptor (`(` starts a method
//! descriptor, everything else is a field descriptor).

mod dictionary;
mod error;
mod lookup;
mod member;
mod simple;

pub use dictionary::{MappingDictionary, DICTIONARY_SCHEMA_VERSION};
pub use error::MappingError;
pub use lookup::{MappingLookup, MappingSink};
pub use member::MemberRef;
pub use simple::SimpleMappingLookup;
