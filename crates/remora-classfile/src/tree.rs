use crate::annotation::{AnnotationNode, AnnotationValue};
use crate::insn::Insn;

/// Identifier of a position in an instruction list. Labels give try/catch
/// ranges, local-variable scopes and jump targets something stable to point
/// at.
pub type LabelId = u32;

/// A parsed class, one per classfile. All attribute tables the classfile
/// format can carry symbolic names in are represented; absent optional
/// attributes are `None` or empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassNode {
    pub access: u16,
    /// Internal name of this class.
    pub name: String,
    /// Internal name of the superclass; `None` only for `java/lang/Object`
    /// and module-info classes.
    pub super_name: Option<String>,
    pub interfaces: Vec<String>,
    pub signature: Option<String>,
    pub fields: Vec<FieldNode>,
    pub methods: Vec<MethodNode>,
    pub inner_classes: Vec<InnerClassNode>,
    /// EnclosingMethod attribute: the immediately enclosing class...
    pub outer_class: Option<String>,
    /// ...and, when enclosed in a method body, that method's name and
    /// descriptor.
    pub outer_method: Option<String>,
    pub outer_method_desc: Option<String>,
    pub nest_host_class: Option<String>,
    pub nest_members: Vec<String>,
    pub permitted_subclasses: Vec<String>,
    pub record_components: Vec<RecordComponentNode>,
    pub module: Option<ModuleNode>,
    pub visible_annotations: Vec<AnnotationNode>,
    pub invisible_annotations: Vec<AnnotationNode>,
    pub visible_type_annotations: Vec<AnnotationNode>,
    pub invisible_type_annotations: Vec<AnnotationNode>,
}

impl ClassNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldNode {
    pub access: u16,
    pub name: String,
    /// Field descriptor.
    pub desc: String,
    pub signature: Option<String>,
    /// ConstantValue attribute for `static final` fields.
    pub value: Option<FieldValue>,
    pub visible_annotations: Vec<AnnotationNode>,
    pub invisible_annotations: Vec<AnnotationNode>,
    pub visible_type_annotations: Vec<AnnotationNode>,
    pub invisible_type_annotations: Vec<AnnotationNode>,
}

impl FieldNode {
    pub fn new(access: u16, name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            access,
            name: name.into(),
            desc: desc.into(),
            ..Self::default()
        }
    }
}

/// A `ConstantValue` attribute payload.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    String(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodNode {
    pub access: u16,
    pub name: String,
    /// Method descriptor.
    pub desc: String,
    pub signature: Option<String>,
    /// Internal names of the declared thrown exception classes.
    pub exceptions: Vec<String>,
    pub visible_annotations: Vec<AnnotationNode>,
    pub invisible_annotations: Vec<AnnotationNode>,
    pub visible_type_annotations: Vec<AnnotationNode>,
    pub invisible_type_annotations: Vec<AnnotationNode>,
    pub visible_local_variable_annotations: Vec<AnnotationNode>,
    pub invisible_local_variable_annotations: Vec<AnnotationNode>,
    /// Per-parameter annotation lists, indexed by parameter position.
    pub visible_parameter_annotations: Vec<Vec<AnnotationNode>>,
    pub invisible_parameter_annotations: Vec<Vec<AnnotationNode>>,
    /// AnnotationDefault attribute of annotation-interface members.
    pub annotation_default: Option<AnnotationValue>,
    pub instructions: Vec<Insn>,
    pub try_catch_blocks: Vec<TryCatchBlockNode>,
    pub local_variables: Vec<LocalVariableNode>,
    pub max_stack: u16,
    pub max_locals: u16,
}

impl MethodNode {
    pub fn new(access: u16, name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            access,
            name: name.into(),
            desc: desc.into(),
            ..Self::default()
        }
    }
}

/// One entry of the InnerClasses attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerClassNode {
    /// Internal name of the inner class itself.
    pub name: String,
    /// Internal name of the enclosing class; `None` for local and anonymous
    /// classes.
    pub outer_name: Option<String>,
    /// Simple display name; `None` for anonymous classes.
    pub inner_name: Option<String>,
    pub access: u16,
}

/// One entry of the Record attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordComponentNode {
    pub name: String,
    /// Field descriptor of the component.
    pub descriptor: String,
    pub signature: Option<String>,
    pub visible_annotations: Vec<AnnotationNode>,
    pub invisible_annotations: Vec<AnnotationNode>,
    pub visible_type_annotations: Vec<AnnotationNode>,
    pub invisible_type_annotations: Vec<AnnotationNode>,
}

/// The Module attribute of a `module-info` class (JVMS §4.7.25), together
/// with ModuleMainClass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleNode {
    /// Module name (dot-separated, not an internal name).
    pub name: String,
    pub access: u16,
    pub version: Option<String>,
    /// Internal name of the class named by ModuleMainClass.
    pub main_class: Option<String>,
    pub requires: Vec<ModuleRequire>,
    pub exports: Vec<ModuleExport>,
    pub opens: Vec<ModuleExport>,
    /// Internal names of the service interfaces named in `uses` directives.
    pub uses: Vec<String>,
    pub provides: Vec<ModuleProvide>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRequire {
    pub module: String,
    pub access: u16,
    pub version: Option<String>,
}

/// An `exports` or `opens` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleExport {
    /// Package name in internal form (`com/example/api`).
    pub package: String,
    pub access: u16,
    /// Qualified target modules; empty for unqualified directives.
    pub modules: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleProvide {
    pub service: String,
    pub providers: Vec<String>,
}

/// One entry of the LocalVariableTable/LocalVariableTypeTable attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVariableNode {
    pub name: String,
    /// Field descriptor of the variable's type.
    pub desc: String,
    pub signature: Option<String>,
    pub start: LabelId,
    pub end: LabelId,
    pub index: u16,
}

/// One exception-table entry of a Code attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TryCatchBlockNode {
    pub start: LabelId,
    pub end: LabelId,
    pub handler: LabelId,
    /// Internal name of the caught exception class; `None` for
    /// catch-all/finally handlers.
    pub type_name: Option<String>,
    pub visible_type_annotations: Vec<AnnotationNode>,
    pub invisible_type_annotations: Vec<AnnotationNode>,
}
