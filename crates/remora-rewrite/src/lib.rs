//! In-place remapping of parsed classfile trees.
//!
//! [`ClassRewriter`] walks every location in a [`ClassNode`] that can
//! textually name a class or member (headers, member declarations,
//! instruction operands, descriptors, generic signatures, annotation value
//! trees, stack map frames, record components, nest/module tables) and
//! substitutes destination names obtained from a
//! [`MappingLookup`](remora_mapping::MappingLookup). Everything else is left
//! byte-for-byte as it was: no access flags change, no attributes are added
//! or dropped, and names without a mapping stay untouched.
//!
//! The [`signature`] module houses the string-level machinery: a streaming
//! rewriter over the descriptor and signature grammars (JVMS §4.3 and
//! §4.7.9.1) that substitutes class names token by token while reconstructing
//! the surrounding text.
//!
//! A rewrite is a plain synchronous traversal; one rewriter may be shared
//! across threads as long as the lookup behind it is no longer being mutated.
//!
//! [`ClassNode`]: remora_classfile::ClassNode

mod error;
mod rewriter;
pub mod signature;

pub use error::RewriteError;
pub use rewriter::ClassRewriter;
