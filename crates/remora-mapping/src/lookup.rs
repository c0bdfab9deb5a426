use crate::error::MappingError;
use crate::member::MemberRef;

/// Read access to a source→destination name dictionary.
///
/// All four operations are pure, non-blocking and infallible: querying a name
/// with no mapping returns the source name (or `None` on the fast path).
/// Implementations are free to resolve inheritance before answering (the
/// hierarchy-aware delegator does), but the plain contract is a direct
/// dictionary lookup.
pub trait MappingLookup {
    /// The destination class name, or `None` when the class keeps its source
    /// name.
    ///
    /// The `None` case is what lets hot paths skip rebuilding descriptor and
    /// signature strings whose embedded names are all unmapped.
    fn remapped_class_name_fast(&self, src_name: &str) -> Option<&str>;

    /// The destination class name, falling back to the source name.
    fn remapped_class_name<'a>(&'a self, src_name: &'a str) -> &'a str {
        self.remapped_class_name_fast(src_name).unwrap_or(src_name)
    }

    /// The destination simple name of a field, falling back to the source
    /// name. `src_owner` and all class names inside `src_desc` are in the
    /// source namespace.
    fn remapped_field_name(&self, src_owner: &str, src_name: &str, src_desc: &str) -> String;

    /// The destination simple name of a method, falling back to the source
    /// name. Callers routinely pass `<init>`/`<clinit>` here; implementations
    /// must hand those back unchanged rather than reject them.
    fn remapped_method_name(&self, src_owner: &str, src_name: &str, src_desc: &str) -> String;
}

/// Write access to a name dictionary.
///
/// A sink is strictly write-only; implementations may feed a
/// [`MappingLookup`], serialize to a file, or fan out to several other sinks.
/// Writes overwrite silently; collision detection between two sources
/// mapping to one destination is the caller's concern.
pub trait MappingSink {
    /// Record a class rename. `src_name` and `dst_name` are internal names;
    /// dots and semicolons are forbidden by the classfile format and are not
    /// checked here.
    fn remap_class(&mut self, src_name: &str, dst_name: &str) -> &mut Self;

    /// Record a member rename.
    ///
    /// For method refs (`desc` starting with `(`) the initializer names are
    /// off limits: renaming to `<init>`/`<clinit>` is rejected unless the
    /// name is unchanged (accepted as a no-op), and renaming from them is
    /// rejected outright. Field refs carry no name restrictions.
    fn remap_member(&mut self, src_ref: MemberRef, dst_name: &str)
        -> Result<&mut Self, MappingError>;
}
