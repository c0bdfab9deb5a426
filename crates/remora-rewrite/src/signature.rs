//! Streaming rewriters for descriptors and generic signatures.
//!
//! These functions substitute class names inside descriptor and signature
//! strings while reconstructing the surrounding text, using the fast lookup
//! path so an input whose names are all unmapped costs no allocation: every
//! function reports "unchanged" (`None`/`false`) instead of handing back a
//! copy of its input.
//!
//! Inputs are assumed well-formed per JVMS §4.3 / §4.7.9.1; the behavior on
//! truncated or otherwise malformed strings is unspecified (the scan will
//! panic on an out-of-bounds index rather than produce corrupt output).

use remora_mapping::MappingLookup;

/// Remap the class name inside a field descriptor.
///
/// Accepts primitives (`I`), object types (`La/B;`) and arrays of either
/// (`[[La/B;`). Returns `None` when the descriptor contains no object type or
/// its class name has no mapping.
pub fn remap_field_descriptor<L: MappingLookup + ?Sized>(
    lookup: &L,
    desc: &str,
) -> Option<String> {
    let index_of_l = desc.find('L')?;
    let internal_name = &desc[index_of_l + 1..desc.len() - 1];
    let new_name = lookup.remapped_class_name_fast(internal_name)?;
    let mut out = String::with_capacity(index_of_l + new_name.len() + 2);
    for _ in 0..index_of_l {
        out.push('[');
    }
    out.push('L');
    out.push_str(new_name);
    out.push(';');
    Some(out)
}

/// Remap an internal name, or an array descriptor standing in for one.
///
/// Several attributes (stack map frames, `checkcast`/`instanceof`/`new`
/// operands, module `uses` tables) store either shape in the same slot; the
/// leading `[` tells them apart. Returns `None` when unchanged.
pub fn remap_internal_name<L: MappingLookup + ?Sized>(
    lookup: &L,
    internal_name: &str,
) -> Option<String> {
    if internal_name.as_bytes().first() == Some(&b'[') {
        remap_field_descriptor(lookup, internal_name)
    } else {
        lookup
            .remapped_class_name_fast(internal_name)
            .map(str::to_owned)
    }
}

/// Remap every class name inside a signature, returning `None` when nothing
/// changed.
///
/// `scratch` is a reuse buffer: its prior contents are discarded and its
/// contents on return are unspecified.
///
/// One routine covers field descriptors, method descriptors, field and method
/// signatures, and class signatures alike: tokens outside the class-type
/// grammar (primitives, `(`/`)`, wildcards, the formal-type-parameter
/// headers of class signatures) pass through verbatim.
pub fn remap_signature<L: MappingLookup + ?Sized>(
    lookup: &L,
    signature: &str,
    scratch: &mut String,
) -> Option<String> {
    scratch.clear();
    if remap_signature_into(lookup, scratch, signature, 0, signature.len()) {
        Some(scratch.clone())
    } else {
        None
    }
}

/// Rewrite the slice `[start, end)` of `signature` onto the end of `out`,
/// returning whether any class name was substituted.
pub fn remap_signature_into<L: MappingLookup + ?Sized>(
    lookup: &L,
    out: &mut String,
    signature: &str,
    start: usize,
    end: usize,
) -> bool {
    if start == end {
        return false;
    }
    let bytes = signature.as_bytes();
    let token = bytes[start];
    match token {
        // Class types and type variables share a shape: the token, a name,
        // and a `;` terminator, unless a type-argument list interrupts the
        // class name.
        b'L' | b'T' => {
            let name_start = start + 1;
            // Names are at least one byte long, so the scan may skip one.
            let mut end_object = name_start;
            loop {
                end_object += 1;
                match bytes[end_object] {
                    b';' => {
                        let mut modified = emit_name(
                            lookup,
                            out,
                            token,
                            &signature[name_start..end_object],
                        );
                        out.push(';');
                        modified |=
                            remap_signature_into(lookup, out, signature, end_object + 1, end);
                        return modified;
                    }
                    b'<' => {
                        // A type-argument list; find its matching `>`,
                        // tracking nesting.
                        let mut depth = 1usize;
                        let mut end_generics = end_object;
                        loop {
                            end_generics += 1;
                            match bytes[end_generics] {
                                b'>' => {
                                    depth -= 1;
                                    if depth == 0 {
                                        break;
                                    }
                                }
                                b'<' => depth += 1,
                                _ => {}
                            }
                        }
                        let mut modified = emit_name(
                            lookup,
                            out,
                            b'L',
                            &signature[name_start..end_object],
                        );
                        out.push('<');
                        modified |= remap_signature_into(
                            lookup,
                            out,
                            signature,
                            end_object + 1,
                            end_generics,
                        );
                        out.push('>');
                        // The byte after the argument list is normally `;`,
                        // but a `.` continues into an inner class type; both
                        // are forwarded verbatim.
                        let after = end_generics + 1;
                        out.push(bytes[after] as char);
                        modified |= remap_signature_into(lookup, out, signature, after + 1, end);
                        return modified;
                    }
                    _ => {}
                }
            }
        }
        // Primitives, arrays, method delimiters, wildcards, and anything the
        // class-signature grammar adds on top: copied through unchanged.
        _ => {
            let width = utf8_width(token);
            out.push_str(&signature[start..start + width]);
            remap_signature_into(lookup, out, signature, start + width, end)
        }
    }
}

fn emit_name<L: MappingLookup + ?Sized>(
    lookup: &L,
    out: &mut String,
    token: u8,
    name: &str,
) -> bool {
    out.push(token as char);
    match lookup.remapped_class_name_fast(name) {
        Some(new_name) => {
            out.push_str(new_name);
            true
        }
        None => {
            out.push_str(name);
            false
        }
    }
}

fn utf8_width(first_byte: u8) -> usize {
    match first_byte {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}
