//! template.rs - Replacement template expansion.
//!
//! A template is literal text with group references:
//!
//! * `$n` inserts capture group `n`. The first digit always names a group; further
//!   digits are consumed only while the number still names an existing group, so with
//!   two groups `$12` means group 1 followed by a literal `2`.
//! * `${name}` inserts a named capture group.
//! * `\x` inserts `x` literally, which is how a template spells a literal `$` or `\`.
//!
//! Unlike `regex::Captures::expand`, a reference that cannot be satisfied is an error,
//! not an empty string. The error is only raised when the pattern actually matches.
//!
//! License: MIT OR APACHE 2.0

use regex::{Captures, Regex};
use std::iter::Peekable;
use std::str::Chars;

use crate::errors::SubstitutionError;

/// Replaces every non-overlapping match of `regex` in `value` with `template`.
///
/// A value the pattern does not match is returned unchanged. An empty match is
/// accepted right where a non-empty match ended, so `a*` over `baaac` yields five
/// matches (`""`, `"aaa"`, `""`, `""`, `""`); only after an empty match does the
/// search step past one character.
pub fn replace_all(regex: &Regex, value: &str, template: &str) -> Result<String, SubstitutionError> {
    let mut out = String::with_capacity(value.len());
    let mut last_end = 0usize;
    let mut search_at = 0usize;

    while search_at <= value.len() {
        let Some(caps) = regex.captures_at(value, search_at) else { break };
        let Some(whole) = caps.get(0) else { break };
        out.push_str(&value[last_end..whole.start()]);
        expand_into(regex, template, Some(&caps), &mut out)?;
        last_end = whole.end();
        search_at = if whole.is_empty() {
            value[last_end..]
                .chars()
                .next()
                .map_or(last_end + 1, |c| last_end + c.len_utf8())
        } else {
            last_end
        };
    }
    out.push_str(&value[last_end..]);
    Ok(out)
}

/// Checks that `template` would expand cleanly for any match of `regex`.
///
/// Used for linting rule files; the engine itself never calls this because a bad
/// template is only a problem once it meets a matching value.
pub fn validate(regex: &Regex, template: &str) -> Result<(), SubstitutionError> {
    let mut sink = String::new();
    expand_into(regex, template, None, &mut sink)
}

fn expand_into(
    regex: &Regex,
    template: &str,
    caps: Option<&Captures<'_>>,
    out: &mut String,
) -> Result<(), SubstitutionError> {
    let group_count = regex.captures_len() - 1;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => out.push(escaped),
                None => return Err(SubstitutionError::DanglingEscape),
            },
            '$' => match chars.next() {
                Some('{') => {
                    let name = read_group_name(&mut chars)?;
                    if !regex.capture_names().flatten().any(|n| n == name) {
                        return Err(SubstitutionError::NoSuchNamedGroup(name));
                    }
                    if let Some(m) = caps.and_then(|c| c.name(&name)) {
                        out.push_str(m.as_str());
                    }
                }
                Some(d) if d.is_ascii_digit() => {
                    let group = read_group_number(d, &mut chars, group_count)?;
                    if let Some(m) = caps.and_then(|c| c.get(group)) {
                        out.push_str(m.as_str());
                    }
                }
                Some(_) | None => {
                    return Err(SubstitutionError::InvalidGroupReference(
                        "group index is missing".to_string(),
                    ))
                }
            },
            _ => out.push(c),
        }
    }
    Ok(())
}

fn read_group_number(
    first: char,
    chars: &mut Peekable<Chars<'_>>,
    group_count: usize,
) -> Result<usize, SubstitutionError> {
    let mut group = first.to_digit(10).unwrap_or(0) as usize;
    if group > group_count {
        return Err(SubstitutionError::NoSuchGroup(group));
    }
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        let candidate = match group.checked_mul(10).and_then(|g| g.checked_add(digit as usize)) {
            Some(n) if n <= group_count => n,
            _ => break,
        };
        group = candidate;
        chars.next();
    }
    Ok(group)
}

fn read_group_name(chars: &mut Peekable<Chars<'_>>) -> Result<String, SubstitutionError> {
    let mut name = String::new();
    loop {
        match chars.next() {
            Some('}') => break,
            Some(c) => name.push(c),
            None => {
                return Err(SubstitutionError::InvalidGroupReference(
                    "named capturing group is missing trailing '}'".to_string(),
                ))
            }
        }
    }
    if name.is_empty() {
        return Err(SubstitutionError::InvalidGroupReference(
            "named capturing group has 0 length name".to_string(),
        ));
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(SubstitutionError::InvalidGroupReference(format!(
            "capturing group name {{{}}} starts with digit character",
            name
        )));
    }
    Ok(name)
}
