//! # HTML Normalizer
//!
//! Converts a string containing HTML markup and entities into readable plain
//! text, preserving paragraph and line-break structure heuristically.
//!
//! This is a best-effort textual cleanup, not a parser: there is no DOM, no
//! nesting validation, and no general entity table. Excel cells and plain
//! lookups only need the text a user would have seen, so the routine favors
//! predictable scanning semantics over completeness.
//!
//! # Pipeline order
//!
//! [`normalize`] applies its steps in a fixed order, and the order is load
//! bearing: line-break markers are inserted *after* entity decoding so that
//! decoded `<` / `>` characters participate in tag scanning, and the final
//! tag strip runs last so that every earlier step still sees the markup it
//! keys on.
//!
//! # Known limitation
//!
//! A literal unescaped `<` with no matching `>` is left alone, and a later
//! `>` anywhere in the string will close it, swallowing the text in between.
//! Callers that need lossless output must escape their angle brackets.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximal whitespace runs, collapsed to a single space early in the pipeline.
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// A `<head>...</head>` block. Non-greedy: stops at the first closing tag.
static HEAD_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<head>.*?</head>").unwrap());

/// A `<script>...</script>` block, same matching rules as [`HEAD_BLOCK`].
static SCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<script>.*?</script>").unwrap());

/// Markup boundaries that correspond to a visual line break: `<br>`, an
/// opening break tag with attributes, or an opening paragraph tag with
/// attributes.
static LINE_BREAK_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(<br>|<br |<p )").unwrap());

/// Any remaining markup tag: `<` up to the next `>`, non-greedy, across the
/// whole string.
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<.*?>").unwrap());

/// The fixed entity table, in application order.
///
/// Each spelling is decoded by literal substring substitution, left to right
/// over this list. Both the named and the numeric spelling of an entity map
/// to the same single character. This is deliberately not an SGML decoder;
/// spellings outside this list pass through untouched.
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&#160;", " "),
    ("&amp;", "&"),
    ("&#38;", "&"),
    ("&lt;", "<"),
    ("&#60;", "<"),
    ("&gt;", ">"),
    ("&#62;", ">"),
    ("&quot;", "\""),
    ("&#34;", "\""),
    ("&apos;", "'"),
    ("&#39;", "'"),
    ("&cent;", "¢"),
    ("&#162;", "¢"),
    ("&pound;", "£"),
    ("&#163;", "£"),
    ("&yen;", "¥"),
    ("&#165;", "¥"),
    ("&euro;", "€"),
    ("&#8364;", "€"),
    ("&copy;", "©"),
    ("&#169;", "©"),
    ("&reg;", "®"),
    ("&#174;", "®"),
    ("&trade;", "™"),
    ("&#8482;", "™"),
    ("&bull;", "•"),
    ("&#8226;", "•"),
];

/// The reduced table used by [`normalize_legacy`]: no bullet support.
const LEGACY_ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&#160;", " "),
    ("&amp;", "&"),
    ("&#38;", "&"),
    ("&lt;", "<"),
    ("&#60;", "<"),
    ("&gt;", ">"),
    ("&#62;", ">"),
    ("&quot;", "\""),
    ("&#34;", "\""),
    ("&apos;", "'"),
    ("&#39;", "'"),
    ("&cent;", "¢"),
    ("&#162;", "¢"),
    ("&pound;", "£"),
    ("&#163;", "£"),
    ("&yen;", "¥"),
    ("&#165;", "¥"),
    ("&euro;", "€"),
    ("&#8364;", "€"),
    ("&copy;", "©"),
    ("&#169;", "©"),
    ("&reg;", "®"),
    ("&#174;", "®"),
    ("&trade;", "™"),
    ("&#8482;", "™"),
];

fn decode_entities(input: &str, table: &[(&str, &str)]) -> String {
    table
        .iter()
        .fold(input.to_owned(), |text, (entity, replacement)| {
            text.replace(entity, replacement)
        })
}

/// Converts HTML to plain text.
///
/// Pure and total: never fails, and empty input yields empty output. The
/// transformation steps, in order:
///
/// 1. Replace every newline and tab with a single space.
/// 2. Collapse every maximal whitespace run into a single space.
/// 3. Remove a `<head>...</head>` block (case-insensitive, non-greedy).
/// 4. Remove a `<script>...</script>` block (same rules).
/// 5. Decode the fixed entity table, named and numeric spellings alike.
/// 6. Insert a newline immediately before `<br>`, `<br ` and `<p ` so the
///    output still reflects the visual paragraph structure.
/// 7. Strip every remaining tag with no replacement.
///
/// ```
/// use xrm_plugins::html::normalize;
///
/// assert_eq!(normalize("<p>Hello &amp; welcome</p>"), "Hello & welcome");
/// ```
pub fn normalize(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let flattened = input.replace(['\n', '\t'], " ");
    let collapsed = WHITESPACE_RUN.replace_all(&flattened, " ");
    let without_head = HEAD_BLOCK.replace_all(&collapsed, "");
    let without_script = SCRIPT_BLOCK.replace_all(&without_head, "");
    let decoded = decode_entities(&without_script, ENTITIES);
    let with_breaks = LINE_BREAK_TAG.replace_all(&decoded, "\n${1}");
    TAG.replace_all(&with_breaks, "").into_owned()
}

/// The historical variant of [`normalize`], kept for callers that depend on
/// its narrower behavior: tags are stripped first, then the reduced entity
/// table is decoded. No whitespace normalization, no head/script removal,
/// and no line-break insertion.
///
/// [`normalize`] strictly dominates this variant; new callers should not
/// reach for it.
pub fn normalize_legacy(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let stripped = TAG.replace_all(input, "");
    decode_entities(&stripped, LEGACY_ENTITIES)
}
