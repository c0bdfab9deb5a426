use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::member::MemberRef;

/// Bumped whenever the serialized shape changes incompatibly.
pub const DICTIONARY_SCHEMA_VERSION: u32 = 1;

/// A serializable snapshot of a mapping dictionary: the class map plus the
/// member map, both keyed in the source namespace.
///
/// This is the interchange/persistence form of a lookup's state, e.g. for
/// caching a computed dictionary between runs. Parsers for external mapping
/// file formats are deliberately not part of this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDictionary {
    pub schema_version: u32,
    /// Internal name → internal name.
    pub classes: Vec<(String, String)>,
    /// Member reference → destination simple name.
    pub members: Vec<(MemberRef, String)>,
}

impl MappingDictionary {
    pub(crate) fn from_maps(
        class_names: &HashMap<String, String>,
        member_names: &HashMap<MemberRef, String>,
    ) -> Self {
        let mut classes: Vec<_> = class_names
            .iter()
            .map(|(src, dst)| (src.clone(), dst.clone()))
            .collect();
        let mut members: Vec<_> = member_names
            .iter()
            .map(|(src, dst)| (src.clone(), dst.clone()))
            .collect();
        // Deterministic output regardless of hash-map iteration order.
        classes.sort();
        members.sort();
        Self {
            schema_version: DICTIONARY_SCHEMA_VERSION,
            classes,
            members,
        }
    }

    pub(crate) fn into_maps(self) -> (HashMap<String, String>, HashMap<MemberRef, String>) {
        (
            self.classes.into_iter().collect(),
            self.members.into_iter().collect(),
        )
    }
}
