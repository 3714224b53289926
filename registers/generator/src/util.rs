// Licensed under the Apache-2.0 license

//! Name conversion and literal formatting helpers shared by the emitters.

use std::collections::{HashMap, HashSet};

/// Converts a name to snake_case.
///
/// - Leading digits get an underscore prefix
/// - Punctuation and whitespace become underscores
/// - lower-to-upper transitions get an underscore separator
/// - Rust keywords get an underscore suffix
///
/// # Examples
/// ```
/// use regmap_generator::util::snake_case;
/// assert_eq!(snake_case("CtrlReg"), "ctrl_reg");
/// assert_eq!(snake_case("IRQ_STATUS"), "irq_status");
/// ```
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        out.push('_');
    }
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if is_separator(c) {
            if !out.ends_with('_') {
                out.push('_');
            }
            prev = None;
            continue;
        }
        let boundary = matches!(prev, Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit());
        if boundary && c.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(c.to_ascii_lowercase());
        prev = Some(c);
    }
    let trimmed = out.trim_end_matches('_');
    escape_keyword(if trimmed.is_empty() { "_" } else { trimmed })
}

/// Converts a name to CamelCase, one capital per separated word.
///
/// # Examples
/// ```
/// use regmap_generator::util::camel_case;
/// assert_eq!(camel_case("CTRL_REG"), "CtrlReg");
/// assert_eq!(camel_case("irq status"), "IrqStatus");
/// ```
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 1);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        out.push('_');
    }
    for word in name.split(is_separator) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }
    if out.is_empty() {
        out.push('_');
    }
    escape_keyword(&out)
}

fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c.is_ascii_punctuation()
}

/// Strict and reserved Rust keywords.
const RUST_KEYWORDS: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Appends an underscore to identifiers that are Rust keywords.
fn escape_keyword(ident: &str) -> String {
    if RUST_KEYWORDS.contains(&ident) {
        format!("{ident}_")
    } else {
        ident.to_string()
    }
}

/// Formats a field mask as a hexadecimal literal.
///
/// # Examples
/// ```
/// use regmap_generator::util::mask_literal;
/// assert_eq!(mask_literal(0x1), "0x1");
/// assert_eq!(mask_literal(0x7), "0x7");
/// assert_eq!(mask_literal(0xffff), "0xffff");
/// ```
pub fn mask_literal(mask: u64) -> String {
    format!("{mask:#x}")
}

/// Converts a name to an upper-case C preprocessor style identifier.
pub fn macro_case(name: &str) -> String {
    snake_case(name).trim_start_matches('_').to_ascii_uppercase()
}

/// Makes identifiers unique by numbering repeats.
///
/// A name that occurs more than once, or that is one of `reserved`, gets the
/// lowest index suffix not already in use, so two reserved fillers become
/// `RESERVED0` and `RESERVED1`. Names that occur once are returned unchanged
/// and a numbered name never takes one of them.
pub fn unique_names(names: impl IntoIterator<Item = String>, reserved: &[&str]) -> Vec<String> {
    let names: Vec<String> = names.into_iter().collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in &names {
        *counts.entry(name.as_str()).or_default() += 1;
    }
    let keep = |name: &str| counts[name] == 1 && !reserved.contains(&name);

    let mut taken: HashSet<String> = reserved.iter().map(|s| s.to_string()).collect();
    taken.extend(names.iter().filter(|n| keep(n)).cloned());

    let mut next: HashMap<&str, usize> = HashMap::new();
    let mut result = Vec::with_capacity(names.len());
    for name in &names {
        if keep(name) {
            result.push(name.clone());
            continue;
        }
        let index = next.entry(name.as_str()).or_default();
        loop {
            let candidate = format!("{name}{index}");
            *index += 1;
            if taken.insert(candidate.clone()) {
                result.push(candidate);
                break;
            }
        }
    }
    result
}

/// Length of the longest name, used to align declarations.
pub fn max_len<'a>(names: impl IntoIterator<Item = &'a String>) -> usize {
    names.into_iter().map(String::len).max().unwrap_or(0)
}
