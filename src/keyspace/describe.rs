//! Human-readable key rendering for diagnostics

use crate::codec::{InputBuffer, KeyCodec, Symbol};

use super::tag::KeyTag;

/// Renders a key as `tag [block tag [table ...]]` followed by leftover hex.
///
/// Never fails: undecodable tails are reported inline.
pub fn describe_key(key: &[u8]) -> String {
    let mut input = InputBuffer::new(key);
    let first = match input.read_u8() {
        Ok(byte) => byte,
        Err(_) => return "(empty)".to_string(),
    };
    let Some(tag) = KeyTag::from_u8(first) else {
        return format!("? {}", hex::encode(key));
    };
    let mut out = tag.to_string();
    if tag != KeyTag::Block {
        if !input.is_empty() {
            out.push_str(" ...");
        }
        return out;
    }
    match describe_block_tail(&mut input, &mut out) {
        Some(()) => out,
        None => out + " (deserialize error)",
    }
}

fn describe_block_tail(input: &mut InputBuffer<'_>, out: &mut String) -> Option<()> {
    let block = u32::read_key(input).ok()?;
    out.push_str(&format!(" {block}"));
    let inner = input.read_u8().ok()?;
    let inner_tag = KeyTag::from_u8(inner);
    out.push(' ');
    out.push_str(inner_tag.map_or("?", |t| t.as_str()));
    match inner_tag {
        Some(KeyTag::TableRow) => {
            let table = Symbol::read_key(input).ok()?;
            out.push_str(&format!(" '{table}' {}", hex::encode(input.rest())));
        }
        Some(KeyTag::TableDelta) => {
            let table = Symbol::read_key(input).ok()?;
            let present = bool::read_key(input).ok()?;
            out.push_str(&format!(
                " '{table}' present: {present} {}",
                hex::encode(input.rest())
            ));
        }
        _ => {
            if !input.is_empty() {
                out.push_str(" ...");
            }
        }
    }
    Some(())
}
