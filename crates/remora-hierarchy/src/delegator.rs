use remora_classfile::ClassNode;
use remora_mapping::{MappingError, MappingLookup, MappingSink, MemberRef, SimpleMappingLookup};

use crate::realm::RealmLookup;

/// Resolves a member reference to its root definition.
///
/// The root definition is the canonical representative of a member's realm;
/// a hierarchy-aware lookup funnels every realm participant through it so
/// they all share one dictionary entry. Implementations must return the input
/// reference unchanged for members they do not know, and must never flip the
/// field/method kind of the descriptor.
///
/// Queries are expected to be pure, non-blocking and cheap: the rewriter
/// calls this for every member reference it encounters, often repeatedly
/// with the same argument.
pub trait TopLevelMemberLookup {
    /// The root-level definition of `reference`, or `reference` itself when
    /// unknown.
    fn definition<'a>(&'a self, reference: &'a MemberRef) -> &'a MemberRef;
}

/// A [`MappingLookup`] + [`MappingSink`] that canonicalizes member
/// operations to their realm root before delegating storage to a simpler
/// lookup.
///
/// The practical effect: one `remap_member` call against *any* participant
/// of a realm renames the member consistently across the entire realm,
/// because every participant's queries resolve to the same root definition.
/// Class operations pass through untouched.
///
/// Mappings are stored under the source reference as supplied; the read side
/// canonicalizes before querying. Entries recorded against a non-root
/// participant are therefore only reachable through the bare delegate, not
/// through this wrapper; record renames against the realm root (or any ref
/// whose definition resolves to it) for them to take effect.
///
/// Thread safety is inherited from the components: immutable realm tables
/// are shareable, so sharing an instance is safe exactly when the delegate
/// is no longer being written to.
#[derive(Debug, Clone)]
pub struct HierarchyAwareDelegator<T, D> {
    definitions: T,
    delegate: D,
}

impl<T: TopLevelMemberLookup, D> HierarchyAwareDelegator<T, D> {
    pub fn new(delegate: D, definitions: T) -> Self {
        Self {
            definitions,
            delegate,
        }
    }

    /// The wrapped storage lookup.
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// The wrapped definition lookup.
    pub fn definitions(&self) -> &T {
        &self.definitions
    }

    fn check_member_kind(&self, reference: &MemberRef) -> Result<(), MappingError> {
        let top = self.definitions.definition(reference);
        if reference.is_method() != top.is_method() {
            return Err(MappingError::RealmKindMismatch {
                src_desc: reference.desc().to_owned(),
                root_desc: top.desc().to_owned(),
            });
        }
        Ok(())
    }

    /// Resolve `reference` to its root definition, panicking if the lookup
    /// broke its contract by flipping the field/method kind.
    fn checked_definition<'a>(&'a self, reference: &'a MemberRef) -> &'a MemberRef {
        let top = self.definitions.definition(reference);
        if reference.is_method() != top.is_method() {
            panic!(
                "definition lookup altered the type of member from {} to {}, which is not permitted",
                reference.desc(),
                top.desc()
            );
        }
        top
    }
}

impl<T: TopLevelMemberLookup, D: MappingLookup> MappingLookup for HierarchyAwareDelegator<T, D> {
    fn remapped_class_name_fast(&self, src_name: &str) -> Option<&str> {
        self.delegate.remapped_class_name_fast(src_name)
    }

    fn remapped_field_name(&self, src_owner: &str, src_name: &str, src_desc: &str) -> String {
        let reference = MemberRef::new(src_owner, src_name, src_desc);
        let top = self.checked_definition(&reference);
        self.delegate
            .remapped_field_name(top.owner(), top.name(), top.desc())
    }

    fn remapped_method_name(&self, src_owner: &str, src_name: &str, src_desc: &str) -> String {
        let reference = MemberRef::new(src_owner, src_name, src_desc);
        let top = self.checked_definition(&reference);
        self.delegate
            .remapped_method_name(top.owner(), top.name(), top.desc())
    }
}

impl<T: TopLevelMemberLookup, D: MappingLookup + MappingSink> MappingSink
    for HierarchyAwareDelegator<T, D>
{
    fn remap_class(&mut self, src_name: &str, dst_name: &str) -> &mut Self {
        self.delegate.remap_class(src_name, dst_name);
        self
    }

    fn remap_member(
        &mut self,
        src_ref: MemberRef,
        dst_name: &str,
    ) -> Result<&mut Self, MappingError> {
        self.check_member_kind(&src_ref)?;
        self.delegate.remap_member(src_ref, dst_name)?;
        Ok(self)
    }
}

/// The everyday composition: a [`SimpleMappingLookup`] behind a
/// [`RealmLookup`]-driven delegator.
pub type SimpleHierarchyAwareLookup = HierarchyAwareDelegator<RealmLookup, SimpleMappingLookup>;

impl SimpleHierarchyAwareLookup {
    /// Build an empty hierarchy-aware lookup whose realms are computed from
    /// `nodes`. Leave JDK and other out-of-scope library classes out of the
    /// list.
    pub fn from_classes(nodes: &[ClassNode]) -> Self {
        Self::new(SimpleMappingLookup::new(), RealmLookup::from_classes(nodes))
    }
}
