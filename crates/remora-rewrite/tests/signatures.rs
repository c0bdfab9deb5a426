use pretty_assertions::assert_eq;
use remora_mapping::{MappingSink, SimpleMappingLookup};
use remora_rewrite::signature::{remap_field_descriptor, remap_internal_name, remap_signature};

fn lookup(pairs: &[(&str, &str)]) -> SimpleMappingLookup {
    let mut lookup = SimpleMappingLookup::new();
    for (src, dst) in pairs {
        lookup.remap_class(src, dst);
    }
    lookup
}

#[test]
fn field_descriptor_object() {
    let lookup = lookup(&[("a/X", "b/Y")]);
    assert_eq!(
        remap_field_descriptor(&lookup, "La/X;").as_deref(),
        Some("Lb/Y;")
    );
    assert_eq!(remap_field_descriptor(&lookup, "La/Other;"), None);
}

#[test]
fn field_descriptor_preserves_array_dimensions() {
    let lookup = lookup(&[("a/X", "b/Y")]);
    assert_eq!(
        remap_field_descriptor(&lookup, "[[La/X;").as_deref(),
        Some("[[Lb/Y;")
    );
}

#[test]
fn field_descriptor_primitives_are_untouched() {
    let lookup = lookup(&[("a/X", "b/Y")]);
    assert_eq!(remap_field_descriptor(&lookup, "I"), None);
    assert_eq!(remap_field_descriptor(&lookup, "[[J"), None);
}

#[test]
fn internal_name_routes_arrays_through_the_descriptor_path() {
    let lookup = lookup(&[("a/X", "b/Y")]);
    assert_eq!(remap_internal_name(&lookup, "a/X").as_deref(), Some("b/Y"));
    assert_eq!(
        remap_internal_name(&lookup, "[La/X;").as_deref(),
        Some("[Lb/Y;")
    );
    assert_eq!(remap_internal_name(&lookup, "a/Other"), None);
    assert_eq!(remap_internal_name(&lookup, "[I"), None);
}

#[test]
fn generic_signature_rewrites_nested_occurrences() {
    let lookup = lookup(&[("a/X", "b/Y")]);
    let mut scratch = String::new();
    assert_eq!(
        remap_signature(&lookup, "La/X<La/X;>;", &mut scratch).as_deref(),
        Some("Lb/Y<Lb/Y;>;")
    );
}

#[test]
fn unmapped_method_descriptor_reports_unchanged() {
    let lookup = SimpleMappingLookup::new();
    let mut scratch = String::new();
    assert_eq!(
        remap_signature(&lookup, "(Ljava/lang/String;I)V", &mut scratch),
        None
    );
}

#[test]
fn method_descriptor_parameters_and_return_are_rewritten() {
    let lookup = lookup(&[("a/X", "b/Y"), ("a/Z", "b/W")]);
    let mut scratch = String::new();
    assert_eq!(
        remap_signature(&lookup, "(ILa/X;[La/Z;)La/X;", &mut scratch).as_deref(),
        Some("(ILb/Y;[Lb/W;)Lb/Y;")
    );
}

#[test]
fn wildcards_and_type_variables_pass_through() {
    let lookup = lookup(&[("a/X", "b/Y")]);
    let mut scratch = String::new();
    assert_eq!(
        remap_signature(&lookup, "Ljava/util/List<*>;", &mut scratch),
        None
    );
    assert_eq!(
        remap_signature(&lookup, "La/X<+La/X;-Ljava/lang/Number;TE;>;", &mut scratch).as_deref(),
        Some("Lb/Y<+Lb/Y;-Ljava/lang/Number;TE;>;")
    );
}

#[test]
fn deeply_nested_type_arguments() {
    let lookup = lookup(&[("a/X", "b/Y")]);
    let mut scratch = String::new();
    assert_eq!(
        remap_signature(
            &lookup,
            "Ljava/util/Map<La/X;Ljava/util/List<La/X<TT;>;>;>;",
            &mut scratch
        )
        .as_deref(),
        Some("Ljava/util/Map<Lb/Y;Ljava/util/List<Lb/Y<TT;>;>;>;")
    );
}

#[test]
fn inner_class_continuation_after_type_arguments() {
    // The byte after a closing `>` is usually `;` but can be `.` when the
    // signature continues into an inner class type; it must pass through
    // untouched either way.
    let lookup = lookup(&[("a/Outer", "b/Outer")]);
    let mut scratch = String::new();
    assert_eq!(
        remap_signature(&lookup, "La/Outer<TT;>.Inner;", &mut scratch).as_deref(),
        Some("Lb/Outer<TT;>.Inner;")
    );
}

#[test]
fn method_signature_with_formal_type_parameters() {
    let lookup = lookup(&[("a/X", "b/Y")]);
    let mut scratch = String::new();
    assert_eq!(
        remap_signature(
            &lookup,
            "<E:Ljava/lang/Object;>(TE;La/X;)TE;",
            &mut scratch
        )
        .as_deref(),
        Some("<E:Ljava/lang/Object;>(TE;Lb/Y;)TE;")
    );
    // Fully unmapped signatures report unchanged, whatever their shape.
    assert_eq!(
        remap_signature(&lookup, "<E:Ljava/lang/Object;>(TE;)TE;", &mut scratch),
        None
    );
}

#[test]
fn class_signature_tokens_outside_the_grammar_survive() {
    let lookup = lookup(&[("a/Base", "b/Base"), ("a/Iface", "b/Iface")]);
    let mut scratch = String::new();
    assert_eq!(
        remap_signature(
            &lookup,
            "<E:Ljava/lang/Object;>La/Base;La/Iface<TE;>;",
            &mut scratch
        )
        .as_deref(),
        Some("<E:Ljava/lang/Object;>Lb/Base;Lb/Iface<TE;>;")
    );
}
