//! XML Entity Decoding
//!
//! Handles:
//! - Built-in entities: &lt; &gt; &amp; &quot; &apos;
//! - Numeric character references: &#123; &#x7B;
//! - A few common HTML named entities (lenient mode only)
//!
//! Returns Cow so text without any '&' is never copied.

use memchr::memchr;
use std::borrow::Cow;

/// Decode entity references, leaving anything unrecognised verbatim.
#[inline]
pub fn decode_text(input: &[u8]) -> Cow<'_, [u8]> {
    if memchr(b'&', input).is_none() {
        return Cow::Borrowed(input);
    }
    match decode_entities(input, false) {
        Ok(decoded) => Cow::Owned(decoded),
        // Lenient decoding never reports an error
        Err(_) => Cow::Borrowed(input),
    }
}

/// Decode entity references, rejecting bare '&', unknown entities and bad character references.
pub fn decode_text_strict(input: &[u8]) -> Result<Cow<'_, [u8]>, &'static str> {
    if memchr(b'&', input).is_none() {
        return Ok(Cow::Borrowed(input));
    }
    decode_entities(input, true).map(Cow::Owned)
}

fn decode_entities(input: &[u8], strict: bool) -> Result<Vec<u8>, &'static str> {
    let mut result = Vec::with_capacity(input.len());
    let mut pos = 0;

    while let Some(amp) = memchr(b'&', &input[pos..]) {
        result.extend_from_slice(&input[pos..pos + amp]);
        pos += amp;

        let Some(semi) = memchr(b';', &input[pos..]) else {
            if strict {
                return Err("Bare '&' not allowed");
            }
            result.push(b'&');
            pos += 1;
            continue;
        };

        let entity = &input[pos + 1..pos + semi];
        match decode_entity(entity, strict) {
            Some(c) => {
                let mut buf = [0u8; 4];
                result.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                pos += semi + 1;
            }
            None if strict => {
                return Err(if entity.first() == Some(&b'#') {
                    "Invalid character reference"
                } else {
                    "Undefined entity"
                });
            }
            None => {
                result.push(b'&');
                pos += 1;
            }
        }
    }

    result.extend_from_slice(&input[pos..]);
    Ok(result)
}

/// Decode a single entity body (without '&' and ';')
fn decode_entity(entity: &[u8], strict: bool) -> Option<char> {
    if let Some(numeric) = entity.strip_prefix(b"#") {
        return decode_numeric(numeric, strict);
    }

    let predefined = match entity {
        b"lt" => Some('<'),
        b"gt" => Some('>'),
        b"amp" => Some('&'),
        b"quot" => Some('"'),
        b"apos" => Some('\''),
        _ => None,
    };
    if predefined.is_some() || strict {
        return predefined;
    }

    match entity {
        b"nbsp" => Some('\u{00A0}'),
        b"copy" => Some('\u{00A9}'),
        b"reg" => Some('\u{00AE}'),
        b"trade" => Some('\u{2122}'),
        b"mdash" => Some('\u{2014}'),
        b"ndash" => Some('\u{2013}'),
        b"hellip" => Some('\u{2026}'),
        _ => None,
    }
}

fn decode_numeric(digits: &[u8], strict: bool) -> Option<char> {
    let codepoint = match digits.split_first() {
        Some((b'x' | b'X', hex)) => u32::from_str_radix(std::str::from_utf8(hex).ok()?, 16).ok()?,
        Some(_) => std::str::from_utf8(digits).ok()?.parse::<u32>().ok()?,
        None => return None,
    };

    if strict && !is_valid_xml_char(codepoint) {
        return None;
    }
    char::from_u32(codepoint)
}

/// XML 1.0 Char production
/// Char ::= #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
#[inline]
pub fn is_valid_xml_char(codepoint: u32) -> bool {
    matches!(codepoint,
        0x9 | 0xA | 0xD |
        0x20..=0xD7FF |
        0xE000..=0xFFFD |
        0x10000..=0x10FFFF
    )
}
