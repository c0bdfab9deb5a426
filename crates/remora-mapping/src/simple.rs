use std::collections::HashMap;

use crate::dictionary::MappingDictionary;
use crate::error::MappingError;
use crate::lookup::{MappingLookup, MappingSink};
use crate::member::MemberRef;

/// A [`MappingLookup`] + [`MappingSink`] backed by two hash maps.
///
/// Inheritance is not resolved: every member entry stands on its own, so a
/// rename must be recorded for each declaring class it should apply to (or
/// the lookup should be wrapped in a hierarchy-aware delegator, which does
/// that canonicalization for you).
///
/// Instances can be shared across threads once the build phase is over, as
/// the lookup side never mutates. Mutating concurrently with queries is a
/// data race, same as for the underlying `HashMap`s.
#[derive(Debug, Default, Clone)]
pub struct SimpleMappingLookup {
    class_names: HashMap<String, String>,
    member_names: HashMap<MemberRef, String>,
}

impl SimpleMappingLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the current state into a serializable dictionary value.
    pub fn snapshot(&self) -> MappingDictionary {
        MappingDictionary::from_maps(&self.class_names, &self.member_names)
    }

    /// Rebuild a lookup from a dictionary snapshot.
    pub fn from_dictionary(dictionary: MappingDictionary) -> Self {
        let (class_names, member_names) = dictionary.into_maps();
        Self {
            class_names,
            member_names,
        }
    }
}

impl MappingLookup for SimpleMappingLookup {
    fn remapped_class_name_fast(&self, src_name: &str) -> Option<&str> {
        self.class_names.get(src_name).map(String::as_str)
    }

    fn remapped_field_name(&self, src_owner: &str, src_name: &str, src_desc: &str) -> String {
        self.member_names
            .get(&MemberRef::new(src_owner, src_name, src_desc))
            .cloned()
            .unwrap_or_else(|| src_name.to_owned())
    }

    fn remapped_method_name(&self, src_owner: &str, src_name: &str, src_desc: &str) -> String {
        self.member_names
            .get(&MemberRef::new(src_owner, src_name, src_desc))
            .cloned()
            .unwrap_or_else(|| src_name.to_owned())
    }
}

impl MappingSink for SimpleMappingLookup {
    fn remap_class(&mut self, src_name: &str, dst_name: &str) -> &mut Self {
        self.class_names
            .insert(src_name.to_owned(), dst_name.to_owned());
        self
    }

    fn remap_member(
        &mut self,
        src_ref: MemberRef,
        dst_name: &str,
    ) -> Result<&mut Self, MappingError> {
        if src_ref.is_method() {
            if dst_name == "<init>" || dst_name == "<clinit>" {
                if dst_name == src_ref.name() {
                    // A no-op mapping; accepted to keep bridging from other
                    // mapping producers painless.
                    return Ok(self);
                }
                return Err(MappingError::ReservedDestinationName {
                    src: src_ref,
                    dst: dst_name.to_owned(),
                });
            }
            if src_ref.name() == "<init>" || src_ref.name() == "<clinit>" {
                return Err(MappingError::InitializerRename {
                    src: src_ref,
                    dst: dst_name.to_owned(),
                });
            }
        }
        self.member_names.insert(src_ref, dst_name.to_owned());
        Ok(self)
    }
}
