//! In-memory tree model for JVM classfiles (JVMS §4).
//!
//! The types in this crate mirror the attribute and instruction surface of a
//! parsed classfile: a [`ClassNode`] owns its members, attributes and
//! instruction lists as plain mutable data. Producing a tree from classfile
//! bytes (and writing one back out) is the job of a front-end; this crate is
//! the contract that rewriting passes operate on.
//!
//! Naming follows the JVM conventions throughout: class names are *internal
//! names* (`java/lang/Object`), field and method types are *descriptors*
//! (`Ljava/lang/String;`, `(I)V`), and generic type information lives in
//! *signatures* (JVMS §4.7.9.1).

mod annotation;
mod insn;
mod tree;
mod ty;

pub mod flags;
pub mod opcodes;

pub use annotation::{descriptor_to_internal_name, AnnotationNode, AnnotationValue, ConstValue};
pub use insn::{
    BsmArg, FieldInsn, FrameEntry, FrameInsn, Insn, InvokeDynamicInsn, LdcConst, LdcInsn,
    MethodInsn, MultiANewArrayInsn, TypeInsn, F_APPEND, F_CHOP, F_FULL, F_NEW, F_SAME, F_SAME1,
};
pub use tree::{
    ClassNode, FieldNode, FieldValue, InnerClassNode, LabelId, LocalVariableNode, MethodNode,
    ModuleExport, ModuleNode, ModuleProvide, ModuleRequire, RecordComponentNode, TryCatchBlockNode,
};
pub use ty::{Handle, Sort, Type};
