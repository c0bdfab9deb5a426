//! End-to-end: realm analysis driving a whole-tree rewrite.

use pretty_assertions::assert_eq;
use remora_classfile::{flags, ClassNode, Insn, MethodInsn, MethodNode};
use remora_hierarchy::SimpleHierarchyAwareLookup;
use remora_mapping::{MappingSink, MemberRef};
use remora_rewrite::ClassRewriter;

fn class(name: &str, super_name: &str) -> ClassNode {
    let mut node = ClassNode::new(name);
    node.super_name = Some(super_name.to_owned());
    node
}

#[test]
fn an_override_chain_is_renamed_consistently() {
    let mut base = class("a/Base", "java/lang/Object");
    base.methods
        .push(MethodNode::new(flags::ACC_PUBLIC, "tick", "()V"));

    let mut middle = class("a/Middle", "a/Base");
    middle
        .methods
        .push(MethodNode::new(flags::ACC_PUBLIC, "tick", "()V"));

    let mut caller = class("a/Caller", "java/lang/Object");
    let mut run = MethodNode::new(flags::ACC_PUBLIC, "run", "(La/Leaf;)V");
    run.instructions.push(Insn::Method(MethodInsn {
        opcode: remora_classfile::opcodes::INVOKEVIRTUAL,
        owner: "a/Leaf".to_owned(),
        name: "tick".to_owned(),
        desc: "()V".to_owned(),
        is_interface: false,
    }));
    caller.methods.push(run);

    let mut classes = vec![base, middle, class("a/Leaf", "a/Middle"), caller];

    let mut lookup = SimpleHierarchyAwareLookup::from_classes(&classes);
    lookup.remap_class("a/Base", "b/Base");
    lookup.remap_class("a/Middle", "b/Middle");
    lookup.remap_class("a/Leaf", "b/Leaf");
    // One rename, recorded against the root declaration.
    lookup
        .remap_member(MemberRef::new("a/Base", "tick", "()V"), "advance")
        .unwrap();

    let rewriter = ClassRewriter::new(&lookup);
    let mut scratch = String::new();
    for node in &mut classes {
        rewriter.rewrite_class(node, &mut scratch).unwrap();
    }

    // Declarations in both the root and the override renamed in lockstep.
    assert_eq!(classes[0].name, "b/Base");
    assert_eq!(classes[0].methods[0].name, "advance");
    assert_eq!(classes[1].name, "b/Middle");
    assert_eq!(classes[1].methods[0].name, "advance");
    assert_eq!(classes[2].name, "b/Leaf");
    assert_eq!(classes[2].super_name.as_deref(), Some("b/Middle"));

    // The call site against the leaf subclass follows the realm.
    assert_eq!(classes[3].methods[0].desc, "(Lb/Leaf;)V");
    match &classes[3].methods[0].instructions[0] {
        Insn::Method(insn) => {
            assert_eq!(insn.owner, "b/Leaf");
            assert_eq!(insn.name, "advance");
            assert_eq!(insn.desc, "()V");
        }
        other => panic!("expected a method instruction, got {other:?}"),
    }
}
