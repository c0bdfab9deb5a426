use remora_classfile::Sort;
use thiserror::Error;

/// Errors raised while rewriting a class tree.
///
/// Both variants indicate a malformed bootstrap-method specifier (or a
/// classfile feature newer than this engine understands). The tree is left in
/// a partially rewritten state; recovery is the caller's responsibility.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// A bootstrap-method `Type` argument that is neither a method type nor
    /// an object type.
    #[error("unexpected bootstrap argument type sort {sort:?} for {descriptor}")]
    UnexpectedBsmTypeSort { sort: Sort, descriptor: String },

    /// A bootstrap-method argument that is not a type, method handle or
    /// string constant.
    #[error("unexpected bootstrap argument shape: {shape} constant")]
    UnexpectedBsmArg { shape: &'static str },
}
