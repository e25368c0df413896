//! Entity codec for the three reserved markup characters.
//!
//! Only `<`, `>` and `&` are ever encoded or decoded. Quotes, apostrophes
//! and numeric character references pass through untouched in both
//! directions: attribute values are always written inside double quotes by
//! the serializer, and the parser ends a value at the first `"` regardless.

use std::borrow::Cow;

const RESERVED: [char; 3] = ['<', '>', '&'];

/// Encodes `<`, `>` and `&` as `&lt;`, `&gt;` and `&amp;`.
///
/// Each character is replaced exactly once, so an `&` produced by encoding
/// `<` or `>` is never re-encoded. Returns the input unchanged (borrowed)
/// when it contains none of the reserved characters.
///
/// # Examples
///
/// ```
/// use ssmloxide::util::escape;
///
/// assert_eq!(escape("fish & chips"), "fish &amp; chips");
/// assert_eq!(escape("a<b>c"), "a&lt;b&gt;c");
/// assert_eq!(escape("&lt;"), "&amp;lt;");
/// ```
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(RESERVED) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    write_escaped(&mut out, text);
    Cow::Owned(out)
}

/// Appends `text` to `out` with the reserved characters encoded.
pub(crate) fn write_escaped(out: &mut String, text: &str) {
    let mut last = 0;
    for (i, ch) in text.match_indices(RESERVED) {
        out.push_str(&text[last..i]);
        out.push_str(match ch {
            "<" => "&lt;",
            ">" => "&gt;",
            _ => "&amp;",
        });
        last = i + ch.len();
    }
    out.push_str(&text[last..]);
}

/// Decodes `&lt;`, `&gt;` and `&amp;` back to `<`, `>` and `&`.
///
/// The three substitutions run as independent whole-string passes in the
/// order `&lt;`, `&gt;`, `&amp;`. Consequently a doubly-escaped sequence
/// such as `&amp;lt;` decodes to `&lt;` and not to `<`: only the `&amp;`
/// pass matches it, and it runs last. Any other `&` sequence (`&quot;`,
/// `&#65;`, a bare `&`) is left as-is.
///
/// # Examples
///
/// ```
/// use ssmloxide::util::unescape;
///
/// assert_eq!(unescape("a &lt; b &amp;&amp; c"), "a < b && c");
/// assert_eq!(unescape("&amp;lt;"), "&lt;");
/// assert_eq!(unescape("&quot;as is&quot;"), "&quot;as is&quot;");
/// ```
#[must_use]
pub fn unescape(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    let decoded = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    Cow::Owned(decoded)
}
