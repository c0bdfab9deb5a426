use remora_classfile::{
    AnnotationNode, AnnotationValue, BsmArg, ClassNode, FieldNode, FrameEntry, Insn, LdcConst,
    MethodNode, Sort, Type,
};
use remora_mapping::MappingLookup;

use crate::error::RewriteError;
use crate::signature;

/// Rewrites parsed class trees in place against a [`MappingLookup`].
///
/// The rewriter itself is stateless beyond the borrowed lookup, so one
/// instance can serve any number of classes (and, as long as the lookup is no
/// longer mutated, any number of threads). Each rewrite method takes a
/// caller-owned scratch `String` so repeated calls can reuse one allocation;
/// the buffer's contents before and after a call are unspecified, and it must
/// not be shared between concurrent rewrites.
///
/// Inheritance is not consulted here: every member lookup is keyed on the
/// owner the classfile names, exactly as written. A lookup that resolves
/// hierarchies (see the hierarchy-aware delegator) slots in transparently.
#[derive(Debug)]
pub struct ClassRewriter<'l, L: ?Sized> {
    lookup: &'l L,
}

impl<'l, L: MappingLookup + ?Sized> ClassRewriter<'l, L> {
    pub fn new(lookup: &'l L) -> Self {
        Self { lookup }
    }

    /// Rewrite a whole class.
    ///
    /// Members and attributes are processed before the class's own name:
    /// member lookups are keyed on the owner's *source* name, so renaming
    /// `node.name` has to come after everything that reads it.
    pub fn rewrite_class(
        &self,
        node: &mut ClassNode,
        scratch: &mut String,
    ) -> Result<(), RewriteError> {
        for field in &mut node.fields {
            self.rewrite_field(&node.name, field, scratch);
        }

        for inner in &mut node.inner_classes {
            // The short display name is deliberately not touched.
            self.remap_opt_class_name(&mut inner.outer_name);
            self.remap_class_name(&mut inner.name);
        }

        for interface in &mut node.interfaces {
            self.remap_class_name(interface);
        }

        self.rewrite_annotations(&mut node.invisible_type_annotations, scratch);
        self.rewrite_annotations(&mut node.invisible_annotations, scratch);
        self.rewrite_annotations(&mut node.visible_type_annotations, scratch);
        self.rewrite_annotations(&mut node.visible_annotations, scratch);

        for method in &mut node.methods {
            self.rewrite_method(&node.name, method, scratch)?;
        }

        if let Some(module) = &mut node.module {
            if let Some(main_class) = &mut module.main_class {
                self.remap_class_name(main_class);
            }
            for service in &mut module.uses {
                if let Some(new_name) = signature::remap_internal_name(self.lookup, service) {
                    *service = new_name;
                }
            }
        }

        self.remap_opt_class_name(&mut node.nest_host_class);
        for member in &mut node.nest_members {
            self.remap_class_name(member);
        }

        if let Some(outer_class) = node.outer_class.as_deref() {
            // The enclosing method is looked up against the *unmapped* outer
            // class.
            if let (Some(outer_method), Some(outer_method_desc)) =
                (node.outer_method.as_deref(), node.outer_method_desc.as_deref())
            {
                node.outer_method = Some(self.lookup.remapped_method_name(
                    outer_class,
                    outer_method,
                    outer_method_desc,
                ));
            }
        }
        self.remap_opt_class_name(&mut node.outer_class);
        self.remap_opt_signature(&mut node.outer_method_desc, scratch);

        for subclass in &mut node.permitted_subclasses {
            self.remap_class_name(subclass);
        }

        for component in &mut node.record_components {
            if let Some(new_desc) =
                signature::remap_signature(self.lookup, &component.descriptor, scratch)
            {
                component.descriptor = new_desc;
            }
            self.rewrite_annotations(&mut component.invisible_annotations, scratch);
            self.rewrite_annotations(&mut component.invisible_type_annotations, scratch);
            self.rewrite_annotations(&mut component.visible_annotations, scratch);
            self.rewrite_annotations(&mut component.visible_type_annotations, scratch);
            self.remap_opt_signature(&mut component.signature, scratch);
        }

        // Class signatures have a grammar of their own, but the signature
        // rewriter copies its extra tokens through untouched, so one routine
        // serves.
        self.remap_opt_signature(&mut node.signature, scratch);

        self.remap_opt_class_name(&mut node.super_name);
        self.remap_class_name(&mut node.name);
        Ok(())
    }

    /// Rewrite a field declaration. `owner` is the declaring class's internal
    /// name in the source namespace.
    pub fn rewrite_field(&self, owner: &str, field: &mut FieldNode, scratch: &mut String) {
        field.name = self
            .lookup
            .remapped_field_name(owner, &field.name, &field.desc);

        // Primitive fields carry nothing renameable in their descriptor.
        let first = field.desc.as_bytes().first().copied();
        if first == Some(b'[') || first == Some(b'L') {
            if let Some(new_desc) = signature::remap_field_descriptor(self.lookup, &field.desc) {
                field.desc = new_desc;
            }
            self.remap_opt_signature(&mut field.signature, scratch);
        }

        self.rewrite_annotations(&mut field.invisible_type_annotations, scratch);
        self.rewrite_annotations(&mut field.invisible_annotations, scratch);
        self.rewrite_annotations(&mut field.visible_annotations, scratch);
        self.rewrite_annotations(&mut field.visible_type_annotations, scratch);
    }

    /// Rewrite a method declaration and its body. `owner` is the declaring
    /// class's internal name in the source namespace.
    pub fn rewrite_method(
        &self,
        owner: &str,
        method: &mut MethodNode,
        scratch: &mut String,
    ) -> Result<(), RewriteError> {
        method.name = self
            .lookup
            .remapped_method_name(owner, &method.name, &method.desc);

        for exception in &mut method.exceptions {
            self.remap_class_name(exception);
        }

        self.rewrite_annotations(&mut method.invisible_type_annotations, scratch);
        self.rewrite_annotations(&mut method.invisible_local_variable_annotations, scratch);
        self.rewrite_annotations(&mut method.invisible_annotations, scratch);
        self.rewrite_annotations(&mut method.visible_annotations, scratch);
        self.rewrite_annotations(&mut method.visible_type_annotations, scratch);
        self.rewrite_annotations(&mut method.visible_local_variable_annotations, scratch);
        for annotations in &mut method.invisible_parameter_annotations {
            self.rewrite_annotations(annotations, scratch);
        }
        for annotations in &mut method.visible_parameter_annotations {
            self.rewrite_annotations(annotations, scratch);
        }

        for local in &mut method.local_variables {
            if let Some(new_desc) = signature::remap_field_descriptor(self.lookup, &local.desc) {
                local.desc = new_desc;
            }
            self.remap_opt_signature(&mut local.signature, scratch);
        }

        for block in &mut method.try_catch_blocks {
            if let Some(type_name) = &mut block.type_name {
                self.remap_class_name(type_name);
            }
            self.rewrite_annotations(&mut block.visible_type_annotations, scratch);
            self.rewrite_annotations(&mut block.invisible_type_annotations, scratch);
        }

        // Method descriptors parse under the signature grammar, so the same
        // routine rewrites both.
        if let Some(new_desc) = signature::remap_signature(self.lookup, &method.desc, scratch) {
            method.desc = new_desc;
        }
        self.remap_opt_signature(&mut method.signature, scratch);

        if let Some(default) = &mut method.annotation_default {
            self.rewrite_annotation_value(default, scratch);
        }

        for insn in &mut method.instructions {
            match insn {
                Insn::Field(field_insn) => {
                    // Name first: the lookup is keyed on the unmapped owner.
                    field_insn.name = self.lookup.remapped_field_name(
                        &field_insn.owner,
                        &field_insn.name,
                        &field_insn.desc,
                    );
                    if let Some(new_desc) =
                        signature::remap_field_descriptor(self.lookup, &field_insn.desc)
                    {
                        field_insn.desc = new_desc;
                    }
                    self.remap_class_name(&mut field_insn.owner);
                }
                Insn::Frame(frame) => {
                    for entry in frame.stack.iter_mut().chain(frame.local.iter_mut()) {
                        if let FrameEntry::Object(name) = entry {
                            if let Some(new_name) =
                                signature::remap_internal_name(self.lookup, name)
                            {
                                *name = new_name;
                            }
                        }
                    }
                }
                Insn::InvokeDynamic(indy) => {
                    // For the metafactory shape the call-site name is the
                    // method of the functional interface named by the
                    // descriptor's return type, keyed by the erased method
                    // type in the first bootstrap argument.
                    let sam_key = match indy.bsm_args.first() {
                        Some(BsmArg::Type(ty)) if ty.sort() == Sort::Method => {
                            interface_owner_of(&indy.desc)
                                .map(|owner| (owner.to_owned(), ty.descriptor().to_owned()))
                        }
                        _ => None,
                    };
                    if let Some((sam_owner, sam_desc)) = sam_key {
                        indy.name =
                            self.lookup
                                .remapped_method_name(&sam_owner, &indy.name, &sam_desc);
                    }
                    for arg in &mut indy.bsm_args {
                        self.rewrite_bsm_arg(arg, scratch)?;
                    }
                    if let Some(new_desc) =
                        signature::remap_signature(self.lookup, &indy.desc, scratch)
                    {
                        indy.desc = new_desc;
                    }
                }
                Insn::Ldc(ldc) => {
                    if let LdcConst::Type(ty) = &mut ldc.cst {
                        if let Some(new_desc) =
                            signature::remap_field_descriptor(self.lookup, ty.descriptor())
                        {
                            *ty = Type::from_descriptor(new_desc);
                        }
                    }
                }
                Insn::Method(method_insn) => {
                    if method_insn.owner.starts_with('[') {
                        // Calls dispatched on arrays (clone, and Object
                        // methods) keep their name; only the array type
                        // itself can be renamed.
                        if let Some(new_owner) =
                            signature::remap_field_descriptor(self.lookup, &method_insn.owner)
                        {
                            method_insn.owner = new_owner;
                        }
                    } else {
                        method_insn.name = self.lookup.remapped_method_name(
                            &method_insn.owner,
                            &method_insn.name,
                            &method_insn.desc,
                        );
                        self.remap_class_name(&mut method_insn.owner);
                    }
                    if let Some(new_desc) =
                        signature::remap_signature(self.lookup, &method_insn.desc, scratch)
                    {
                        method_insn.desc = new_desc;
                    }
                }
                Insn::MultiANewArray(array_insn) => {
                    if let Some(new_desc) =
                        signature::remap_field_descriptor(self.lookup, &array_insn.desc)
                    {
                        array_insn.desc = new_desc;
                    }
                }
                Insn::Type(type_insn) => {
                    if let Some(new_desc) =
                        signature::remap_internal_name(self.lookup, &type_insn.desc)
                    {
                        type_insn.desc = new_desc;
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn rewrite_annotations(&self, annotations: &mut [AnnotationNode], scratch: &mut String) {
        for annotation in annotations {
            self.rewrite_annotation(annotation, scratch);
        }
    }

    fn rewrite_annotation(&self, annotation: &mut AnnotationNode, scratch: &mut String) {
        let internal_name = &annotation.desc[1..annotation.desc.len() - 1];
        if let Some(new_name) = self.lookup.remapped_class_name_fast(internal_name) {
            annotation.desc = format!("L{new_name};");
        }
        for (_, value) in &mut annotation.values {
            self.rewrite_annotation_value(value, scratch);
        }
    }

    fn rewrite_annotation_value(&self, value: &mut AnnotationValue, scratch: &mut String) {
        match value {
            AnnotationValue::Class(ty) => {
                if let Some(new_desc) =
                    signature::remap_signature(self.lookup, ty.descriptor(), scratch)
                {
                    *ty = Type::from_descriptor(new_desc);
                }
            }
            AnnotationValue::Enum {
                type_descriptor,
                const_name,
            } => {
                // Enum constants are fields of the enum type; the field
                // lookup is keyed by the enum type's descriptor.
                let owner_name = &type_descriptor[1..type_descriptor.len() - 1];
                *const_name =
                    self.lookup
                        .remapped_field_name(owner_name, const_name, type_descriptor);
                if let Some(new_name) = self.lookup.remapped_class_name_fast(owner_name) {
                    *type_descriptor = format!("L{new_name};");
                }
            }
            AnnotationValue::Annotation(nested) => self.rewrite_annotation(nested, scratch),
            AnnotationValue::Array(values) => {
                for value in values {
                    self.rewrite_annotation_value(value, scratch);
                }
            }
            AnnotationValue::Const(_) => {}
        }
    }

    fn rewrite_bsm_arg(&self, arg: &mut BsmArg, scratch: &mut String) -> Result<(), RewriteError> {
        match arg {
            BsmArg::Type(ty) => match ty.sort() {
                Sort::Method => {
                    if let Some(new_desc) =
                        signature::remap_signature(self.lookup, ty.descriptor(), scratch)
                    {
                        *ty = Type::method(new_desc);
                    }
                }
                Sort::Object => {
                    if let Some(new_name) =
                        signature::remap_internal_name(self.lookup, ty.internal_name())
                    {
                        *ty = Type::object(&new_name);
                    }
                }
                sort => {
                    return Err(RewriteError::UnexpectedBsmTypeSort {
                        sort,
                        descriptor: ty.descriptor().to_owned(),
                    })
                }
            },
            BsmArg::Handle(handle) => {
                // Name first, against the unmapped owner and descriptor.
                handle.name =
                    self.lookup
                        .remapped_method_name(&handle.owner, &handle.name, &handle.desc);
                self.remap_class_name(&mut handle.owner);
                if let Some(new_desc) =
                    signature::remap_signature(self.lookup, &handle.desc, scratch)
                {
                    handle.desc = new_desc;
                }
            }
            BsmArg::String(_) => {}
            BsmArg::Int(_) => return Err(RewriteError::UnexpectedBsmArg { shape: "int" }),
            BsmArg::Float(_) => return Err(RewriteError::UnexpectedBsmArg { shape: "float" }),
            BsmArg::Long(_) => return Err(RewriteError::UnexpectedBsmArg { shape: "long" }),
            BsmArg::Double(_) => return Err(RewriteError::UnexpectedBsmArg { shape: "double" }),
        }
        Ok(())
    }

    fn remap_class_name(&self, name: &mut String) {
        if let Some(new_name) = self.lookup.remapped_class_name_fast(name) {
            *name = new_name.to_owned();
        }
    }

    fn remap_opt_class_name(&self, name: &mut Option<String>) {
        if let Some(name) = name {
            self.remap_class_name(name);
        }
    }

    fn remap_opt_signature(&self, sig: &mut Option<String>, scratch: &mut String) {
        if let Some(sig) = sig {
            if let Some(new_sig) = signature::remap_signature(self.lookup, sig, scratch) {
                *sig = new_sig;
            }
        }
    }
}

/// The internal name of the functional interface an `invokedynamic` call
/// site instantiates: the object return type of the call-site descriptor.
fn interface_owner_of(call_site_desc: &str) -> Option<&str> {
    let ret = &call_site_desc[call_site_desc.find(')')? + 1..];
    ret.strip_prefix('L')?.strip_suffix(';')
}

#[cfg(test)]
mod tests {
    use super::interface_owner_of;

    #[test]
    fn interface_owner_is_the_return_type() {
        assert_eq!(
            interface_owner_of("(La/Capture;)La/Function;"),
            Some("a/Function")
        );
        assert_eq!(interface_owner_of("()V"), None);
        assert_eq!(interface_owner_of("()[La/Function;"), None);
    }
}
