use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::Arc;

use remora_classfile::{flags, ClassNode};
use remora_mapping::MemberRef;

use crate::delegator::TopLevelMemberLookup;

/// A group of class members that must be renamed as one unit.
///
/// A realm spans every class where a member with the realm's (name,
/// descriptor) is reachable through the same override/access chain. Renaming
/// any participant without the others disjoints the hierarchy, so a realm
/// carries a single canonical [`root_definition`](Self::root_definition) all
/// renaming decisions attach to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRealm {
    /// The shallowest declaration of the member, in the source namespace.
    pub root_definition: MemberRef,
    /// Internal names of every class the realm's renaming applies to.
    pub realm_members: BTreeSet<String>,
}

/// Compute the realm table for a closed world of classes.
///
/// `nodes` should contain everything relevant to the remapping process: the
/// obfuscated application plus any libraries considered in scope. JDK classes
/// are conventionally omitted; a hierarchy edge to an absent class simply
/// contributes no members.
///
/// The returned table maps *every* participating (owner, name, desc) triple
/// to its realm: querying with any realm member's owner yields the same
/// shared [`MemberRealm`].
///
/// Known limitation, kept deliberately: when two unrelated interfaces declare
/// the same (name, desc) and a common class implements both, the two realms
/// stay separate rather than being merged.
pub fn realms_of(nodes: &[ClassNode]) -> HashMap<MemberRef, Arc<MemberRealm>> {
    let mut node_lookup: HashMap<&str, &ClassNode> = HashMap::new();
    let mut immediate_children: HashMap<String, BTreeSet<String>> = HashMap::new();
    for node in nodes {
        node_lookup.insert(node.name.as_str(), node);
        if let Some(super_name) = &node.super_name {
            immediate_children
                .entry(super_name.clone())
                .or_default()
                .insert(node.name.clone());
        }
        for interface in &node.interfaces {
            immediate_children
                .entry(interface.clone())
                .or_default()
                .insert(node.name.clone());
        }
    }

    let all_children = transitive_closure(&immediate_children);
    let empty = BTreeSet::new();

    // Supertypes first: a class's descendant set strictly contains every
    // descendant's, so ordering by descending descendant count puts parents
    // before their children. Ties (hierarchy-unrelated classes) break
    // reverse-lexicographically to keep the table reproducible.
    let mut apply_order: Vec<&str> = node_lookup.keys().copied().collect();
    apply_order.sort_by(|a, b| {
        let children_a = all_children.get(*a).map_or(0, BTreeSet::len);
        let children_b = all_children.get(*b).map_or(0, BTreeSet::len);
        children_b.cmp(&children_a).then_with(|| b.cmp(a))
    });

    let mut realms: HashMap<MemberRef, Arc<MemberRealm>> = HashMap::new();
    for super_type in apply_order {
        let super_node = node_lookup[super_type];
        let children = all_children.get(super_type).unwrap_or(&empty);

        for (name, desc, access) in declared_members(super_node) {
            let self_ref = MemberRef::new(super_type, name, desc);
            if realms.contains_key(&self_ref) {
                // A supertype already resolved this realm; this declaration
                // is an override within it.
                continue;
            }

            if access & (flags::ACC_STATIC | flags::ACC_PRIVATE) != 0 {
                // Never inherited: the realm is the declaring class alone.
                let realm = Arc::new(MemberRealm {
                    root_definition: self_ref.clone(),
                    realm_members: BTreeSet::from([super_type.to_owned()]),
                });
                realms.insert(self_ref.clone(), realm);
            } else if access & (flags::ACC_PUBLIC | flags::ACC_PROTECTED) != 0 {
                // Visible to every descendant; ACC_FINAL changes nothing
                // about naming.
                let mut realm_members = children.clone();
                realm_members.insert(super_type.to_owned());
                let realm = Arc::new(MemberRealm {
                    root_definition: self_ref.clone(),
                    realm_members,
                });
                for child in children {
                    realms.insert(
                        MemberRef::new(child.clone(), name, desc),
                        Arc::clone(&realm),
                    );
                }
                realms.insert(self_ref.clone(), realm);
            } else {
                // Package-private. Only same-package descendants can see the
                // member, but any of them may widen the access to
                // public/protected, re-exposing it to their own descendants.
                let package = package_of(super_type);
                let mut realm_access: BTreeSet<String> = BTreeSet::new();
                realm_access.insert(super_type.to_owned());
                for child in children {
                    if package_of(child) != package {
                        continue;
                    }
                    realm_access.insert(child.clone());
                    let Some(child_node) = node_lookup.get(child.as_str()) else {
                        continue;
                    };
                    for (child_name, child_desc, child_access) in declared_members(child_node) {
                        if child_name != name || child_desc != desc {
                            continue;
                        }
                        if child_access & (flags::ACC_PUBLIC | flags::ACC_PROTECTED) != 0 {
                            if let Some(grandchildren) = all_children.get(child) {
                                realm_access.extend(grandchildren.iter().cloned());
                            }
                        }
                    }
                }
                let realm = Arc::new(MemberRealm {
                    root_definition: self_ref.clone(),
                    realm_members: realm_access.clone(),
                });
                for realm_type in &realm_access {
                    realms.insert(
                        MemberRef::new(realm_type.clone(), name, desc),
                        Arc::clone(&realm),
                    );
                }
            }

            assert!(
                realms.contains_key(&self_ref),
                "reference not in list of realms: {self_ref}"
            );
        }
    }

    tracing::debug!(
        classes = nodes.len(),
        realm_entries = realms.len(),
        "computed member realms"
    );

    realms
}

/// Fields and methods of a class, flattened to (name, desc, access) views.
/// The descriptor keeps the two member kinds apart, so one realm routine
/// serves both.
fn declared_members(node: &ClassNode) -> impl Iterator<Item = (&str, &str, u16)> {
    node.methods
        .iter()
        .map(|m| (m.name.as_str(), m.desc.as_str(), m.access))
        .chain(
            node.fields
                .iter()
                .map(|f| (f.name.as_str(), f.desc.as_str(), f.access)),
        )
}

/// Expand a child-relation map into its transitive closure: each key maps to
/// everything reachable through any number of hops.
///
/// Completed entries are reused when a later key reaches them, so shared
/// subtrees are only walked once.
fn transitive_closure(
    input: &HashMap<String, BTreeSet<String>>,
) -> HashMap<String, BTreeSet<String>> {
    let mut out: HashMap<String, BTreeSet<String>> = HashMap::new();
    let mut queue: VecDeque<String> = VecDeque::new();
    for (key, direct) in input {
        let mut collected = BTreeSet::new();
        queue.extend(direct.iter().cloned());
        while let Some(queued) = queue.pop_front() {
            if !collected.insert(queued.clone()) {
                continue;
            }
            if let Some(done) = out.get(&queued) {
                collected.extend(done.iter().cloned());
                continue;
            }
            if let Some(next) = input.get(&queued) {
                collected.extend(next.iter().cloned());
                queue.extend(next.iter().cloned());
            }
        }
        out.insert(key.clone(), collected);
    }
    out
}

/// The package prefix of an internal name, up to the last `/`; empty for the
/// default package.
fn package_of(internal_name: &str) -> &str {
    internal_name
        .rsplit_once('/')
        .map_or("", |(package, _)| package)
}

/// A realm table wrapped up as a [`TopLevelMemberLookup`].
///
/// Immutable once built and cheap to share; queries are single hash lookups.
#[derive(Debug, Clone, Default)]
pub struct RealmLookup {
    realms: HashMap<MemberRef, Arc<MemberRealm>>,
}

impl RealmLookup {
    /// Build the realm table from a closed world of classes. See
    /// [`realms_of`].
    pub fn from_classes(nodes: &[ClassNode]) -> Self {
        Self {
            realms: realms_of(nodes),
        }
    }

    /// Wrap an already-computed realm table.
    pub fn from_realms(realms: HashMap<MemberRef, Arc<MemberRealm>>) -> Self {
        Self { realms }
    }

    /// The realm a member participates in, if any.
    pub fn realm_of(&self, reference: &MemberRef) -> Option<&MemberRealm> {
        self.realms.get(reference).map(Arc::as_ref)
    }

    /// Number of (owner, name, desc) keys in the table (not distinct realms).
    pub fn len(&self) -> usize {
        self.realms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.realms.is_empty()
    }
}

impl TopLevelMemberLookup for RealmLookup {
    fn definition<'a>(&'a self, reference: &'a MemberRef) -> &'a MemberRef {
        match self.realms.get(reference) {
            Some(realm) => &realm.root_definition,
            None => reference,
        }
    }
}
