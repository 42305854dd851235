//! Enum cooking: rewriting enumerator initializers into literals.
//!
//! Scans preprocessed C source for `enum` bodies and replaces every
//! initializer the evaluator can resolve with its decimal literal. Within
//! one enum, enumerators resolved earlier are visible to later initializers,
//! so `Y = 3, X = 1 << (Y - 1)` cooks to `Y = 3, X = 4`.
//!
//! Enumerators without an initializer, and initializers the evaluator cannot
//! resolve, pass through byte-for-byte.

use std::ops::Range;

use log::warn;
use rustc_hash::FxHashMap;

use crate::expr;

/// Rewrite all evaluable enum initializers in `src` to decimal literals.
pub fn cook_enums(src: &str) -> String {
    let mut replacements: Vec<(Range<usize>, String)> = Vec::new();

    let mut search_from = 0;
    while let Some(keyword) = find_word(src, "enum", search_from) {
        search_from = keyword + "enum".len();

        // Skip an optional tag name; anything but a brace next means this is
        // a forward declaration or a type use, not a definition.
        let mut pos = skip_whitespace(src, search_from);
        pos = skip_identifier(src, pos);
        pos = skip_whitespace(src, pos);
        if src.as_bytes().get(pos) != Some(&b'{') {
            continue;
        }

        // Enum bodies do not nest.
        let Some(close) = src[pos..].find('}') else {
            warn!("unterminated enum body at byte {pos}");
            break;
        };
        cook_body(src, pos + 1..pos + close, &mut replacements);
        search_from = pos + close + 1;
    }

    apply_replacements(src, replacements)
}

/// Cook one enum body, accumulating initializer replacements.
fn cook_body(src: &str, body: Range<usize>, replacements: &mut Vec<(Range<usize>, String)>) {
    let mut env: FxHashMap<String, i64> = FxHashMap::default();

    for item in split_enumerators(src, body) {
        let text = &src[item.clone()];
        let Some(eq) = top_level_eq(text) else {
            // Implicit value; the engine headers never reference these from
            // later initializers, so it stays out of the environment.
            continue;
        };

        let name = text[..eq].trim();
        if name.is_empty() {
            continue;
        }

        let value_range = trim_range(src, item.start + eq + 1..item.end);
        let value_src = &src[value_range.clone()];

        match expr::eval(value_src, &env) {
            Some(value) => {
                env.insert(name.to_string(), value);
                let literal = value.to_string();
                if literal != value_src {
                    replacements.push((value_range, literal));
                }
            }
            None => warn!("leaving enumerator `{name}` uncooked: `{value_src}`"),
        }
    }
}

/// Split an enum body into enumerator ranges at top-level commas.
fn split_enumerators(src: &str, body: Range<usize>) -> Vec<Range<usize>> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = body.start;

    for (offset, c) in src[body.clone()].char_indices() {
        let at = body.start + offset;
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                items.push(start..at);
                start = at + 1;
            }
            _ => {}
        }
    }
    items.push(start..body.end);

    items
        .into_iter()
        .map(|r| trim_range(src, r))
        .filter(|r| !r.is_empty())
        .collect()
}

/// Byte offset of the first top-level `=` in an enumerator, if any.
fn top_level_eq(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '=' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn trim_range(src: &str, range: Range<usize>) -> Range<usize> {
    let text = &src[range.clone()];
    let start = range.start + (text.len() - text.trim_start().len());
    let end = range.end - (text.len() - text.trim_end().len());
    if start <= end { start..end } else { range.start..range.start }
}

/// Find `word` at identifier boundaries, starting at `from`.
fn find_word(src: &str, word: &str, from: usize) -> Option<usize> {
    let mut search = from;
    while let Some(rel) = src.get(search..)?.find(word) {
        let at = search + rel;
        let before_ok = at == 0
            || !src[..at]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        let after_ok = !src[at + word.len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        if before_ok && after_ok {
            return Some(at);
        }
        search = at + word.len();
    }
    None
}

fn skip_whitespace(src: &str, mut pos: usize) -> usize {
    while src[pos..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_whitespace())
    {
        pos += 1;
    }
    pos
}

fn skip_identifier(src: &str, mut pos: usize) -> usize {
    while src[pos..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        pos += 1;
    }
    pos
}

fn apply_replacements(src: &str, mut replacements: Vec<(Range<usize>, String)>) -> String {
    replacements.sort_by_key(|(r, _)| r.start);

    let mut out = String::with_capacity(src.len());
    let mut cursor = 0;
    for (range, text) in replacements {
        out.push_str(&src[cursor..range.start]);
        out.push_str(&text);
        cursor = range.end;
    }
    out.push_str(&src[cursor..]);
    out
}
