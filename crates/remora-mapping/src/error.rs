use thiserror::Error;

use crate::member::MemberRef;

/// Errors raised when recording mappings.
///
/// Lookups never produce errors (a missing entry yields the source name);
/// only writes and hierarchy canonicalization can fail, and every variant
/// indicates invalid caller input rather than a recoverable condition.
#[derive(Debug, Error)]
pub enum MappingError {
    /// A method may not be renamed *to* `<init>` or `<clinit>` unless the
    /// source already carries that name.
    #[error("illegal destination name for src member {src}: {dst}")]
    ReservedDestinationName { src: MemberRef, dst: String },

    /// `<init>` and `<clinit>` may not be renamed away from.
    #[error("illegal attempt at renaming src member {src} to {dst}")]
    InitializerRename { src: MemberRef, dst: String },

    /// A definition lookup returned a root whose descriptor flips the
    /// field/method kind of the queried member.
    #[error("definition lookup altered the type of member from {src_desc} to {root_desc}, which is not permitted")]
    RealmKindMismatch { src_desc: String, root_desc: String },
}
