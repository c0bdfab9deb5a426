use std::fmt;

use serde::{Deserialize, Serialize};

/// A reference to a class member: the owning class's internal name, the
/// member's name, and its descriptor.
///
/// The descriptor doubles as the field/method discriminator: no field
/// descriptor can start with `(`, so [`MemberRef::is_method`] is a single
/// byte comparison. No validation is performed; callers are expected to pass
/// well-formed JVM strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberRef {
    owner: String,
    name: String,
    desc: String,
}

impl MemberRef {
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        desc: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            desc: desc.into(),
        }
    }

    /// Internal name of the declaring class.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    /// Whether this reference denotes a method rather than a field.
    pub fn is_method(&self) -> bool {
        self.desc.as_bytes().first() == Some(&b'(')
    }
}

impl fmt::Display for MemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} {}", self.owner, self.name, self.desc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_componentwise() {
        let a = MemberRef::new("p/Foo", "bar", "(I)V");
        let b = MemberRef::new("p/Foo", "bar", "(I)V");
        let c = MemberRef::new("p/Foo", "bar", "(J)V");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn method_refs_are_told_apart_by_descriptor() {
        assert!(MemberRef::new("p/Foo", "bar", "()V").is_method());
        assert!(!MemberRef::new("p/Foo", "bar", "Lp/Bar;").is_method());
        assert!(!MemberRef::new("p/Foo", "bar", "[I").is_method());
    }
}
