//! Markup stripping.
//!
//! Documents arrive with whatever markup their format left behind (inline
//! HTML in markdown, pasted web pages in `.txt`). Each tag or comment becomes a
//! single space so the words on either side never fuse, then the common
//! character entities are decoded.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|</?[A-Za-z][^<>]*>|<[!?][^<>]*>")
        .expect("tag pattern is valid")
});

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z]{2,8});")
        .expect("entity pattern is valid")
});

/// Replace every tag with one space and decode entities.
///
/// ```rust
/// use canonical::strip_markup;
///
/// assert_eq!(strip_markup("<p>Hello, <b>world</b>!</p>"), " Hello,  world ! ");
/// assert_eq!(strip_markup("fish &amp; chips"), "fish & chips");
/// ```
///
/// Text without `<` or `&` is returned borrowed.
pub fn strip_markup(text: &str) -> Cow<'_, str> {
    let stripped = TAG_RE.replace_all(text, " ");
    if !ENTITY_RE.is_match(&stripped) {
        return stripped;
    }
    Cow::Owned(ENTITY_RE.replace_all(&stripped, decode_entity).into_owned())
}

fn decode_entity(caps: &Captures<'_>) -> String {
    let body = &caps[1];
    let decoded = match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => numeric_entity(body),
    };
    decoded.map_or_else(|| caps[0].to_string(), String::from)
}

fn numeric_entity(body: &str) -> Option<char> {
    let digits = body.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}
