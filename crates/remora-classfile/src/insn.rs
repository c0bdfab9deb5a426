use crate::tree::LabelId;
use crate::ty::{Handle, Type};

// Stack map frame types, mirroring the compressed frame encoding.
pub const F_NEW: i8 = -1;
pub const F_FULL: i8 = 0;
pub const F_APPEND: i8 = 1;
pub const F_CHOP: i8 = 2;
pub const F_SAME: i8 = 3;
pub const F_SAME1: i8 = 4;

/// One instruction (or pseudo-instruction) of a method body.
///
/// Only the variants carrying symbolic references (`Field`, `Method`,
/// `InvokeDynamic`, `Ldc`, `Type`, `MultiANewArray`, `Frame`) are of interest
/// to renaming passes; the remaining variants exist so a method body can be
/// represented losslessly.
#[derive(Debug, Clone, PartialEq)]
pub enum Insn {
    /// An opcode without operands (`nop`, `return`, `dup`, arithmetic, ...).
    Simple { opcode: u8 },
    Int { opcode: u8, operand: i32 },
    Var { opcode: u8, var: u16 },
    Iinc { var: u16, incr: i16 },
    Jump { opcode: u8, label: LabelId },
    Label(LabelId),
    LineNumber { line: u32, start: LabelId },
    TableSwitch {
        min: i32,
        max: i32,
        dflt: LabelId,
        labels: Vec<LabelId>,
    },
    LookupSwitch {
        dflt: LabelId,
        keys: Vec<i32>,
        labels: Vec<LabelId>,
    },
    Field(FieldInsn),
    Method(MethodInsn),
    InvokeDynamic(InvokeDynamicInsn),
    Ldc(LdcInsn),
    Type(TypeInsn),
    MultiANewArray(MultiANewArrayInsn),
    Frame(FrameInsn),
}

/// `getfield`/`putfield`/`getstatic`/`putstatic`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInsn {
    pub opcode: u8,
    /// Internal name of the class declaring the field.
    pub owner: String,
    pub name: String,
    /// Field descriptor.
    pub desc: String,
}

/// `invokevirtual`/`invokespecial`/`invokestatic`/`invokeinterface`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInsn {
    pub opcode: u8,
    /// Internal name of the target class, or an array descriptor for calls
    /// dispatched on array receivers (e.g. `clone()` on `[Lp/Foo;`).
    pub owner: String,
    pub name: String,
    /// Method descriptor.
    pub desc: String,
    pub is_interface: bool,
}

/// `invokedynamic`: the dynamic call site plus its bootstrap specifier.
#[derive(Debug, Clone, PartialEq)]
pub struct InvokeDynamicInsn {
    /// Name of the dynamic call site's method.
    pub name: String,
    /// Descriptor of the call site; its return type names the functional
    /// interface the bootstrap instantiates.
    pub desc: String,
    pub bsm: Handle,
    pub bsm_args: Vec<BsmArg>,
}

/// A static bootstrap-method argument (a loadable constant-pool entry).
#[derive(Debug, Clone, PartialEq)]
pub enum BsmArg {
    Type(Type),
    Handle(Handle),
    String(String),
    Int(i32),
    Float(f32),
    Long(i64),
    Double(f64),
}

/// `ldc`/`ldc_w`/`ldc2_w`.
#[derive(Debug, Clone, PartialEq)]
pub struct LdcInsn {
    pub cst: LdcConst,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LdcConst {
    Int(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    String(String),
    /// A class or method-type constant.
    Type(Type),
    Handle(Handle),
}

/// `new`/`anewarray`/`checkcast`/`instanceof`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInsn {
    pub opcode: u8,
    /// An internal name, or an array descriptor for array-typed operands.
    pub desc: String,
}

/// `multianewarray`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiANewArrayInsn {
    /// Array type descriptor.
    pub desc: String,
    pub dims: u8,
}

/// An explicit stack map frame (JVMS §4.7.4).
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInsn {
    pub frame_type: i8,
    pub local: Vec<FrameEntry>,
    pub stack: Vec<FrameEntry>,
}

/// One verification-type entry of a stack map frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameEntry {
    Top,
    Integer,
    Float,
    Double,
    Long,
    Null,
    UninitializedThis,
    /// A reference type: an internal name or an array descriptor.
    Object(String),
    /// A `new` result whose constructor has not run yet, identified by the
    /// label of its allocation site.
    Uninitialized(LabelId),
}
