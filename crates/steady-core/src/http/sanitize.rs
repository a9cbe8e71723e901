//! Repair of malformed JSON payloads before decoding
//!
//! Some backends emit raw control characters (newlines, tabs, ...) inside
//! string values. Strict JSON parsers reject those, so they are rewritten to
//! their escaped form. Bytes outside string literals are never touched.

use std::borrow::Cow;

/// Escape raw control bytes (0x00-0x1F) found inside JSON string literals.
///
/// Clean input comes back borrowed and byte-identical, which makes the
/// function idempotent.
pub fn sanitize_json(input: &[u8]) -> Cow<'_, [u8]> {
    let mut repaired: Option<Vec<u8>> = None;
    let mut in_string = false;
    let mut escaped = false;

    for (index, &byte) in input.iter().enumerate() {
        if in_string && byte < 0x20 {
            let out = repaired.get_or_insert_with(|| {
                let mut out = Vec::with_capacity(input.len() + 16);
                out.extend_from_slice(&input[..index]);
                out
            });
            // after a lone backslash only the escape letter is missing
            if !escaped {
                out.push(b'\\');
            }
            push_escape_suffix(out, byte);
            escaped = false;
            continue;
        }

        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
        } else if byte == b'"' {
            in_string = true;
        }

        if let Some(out) = repaired.as_mut() {
            out.push(byte);
        }
    }

    match repaired {
        Some(out) => Cow::Owned(out),
        None => Cow::Borrowed(input),
    }
}

fn push_escape_suffix(out: &mut Vec<u8>, byte: u8) {
    match byte {
        b'\n' => out.push(b'n'),
        b'\r' => out.push(b'r'),
        b'\t' => out.push(b't'),
        0x08 => out.push(b'b'),
        0x0C => out.push(b'f'),
        other => {
            const HEX: &[u8; 16] = b"0123456789abcdef";
            out.extend_from_slice(b"u00");
            out.push(HEX[(other >> 4) as usize]);
            out.push(HEX[(other & 0x0F) as usize]);
        }
    }
}
