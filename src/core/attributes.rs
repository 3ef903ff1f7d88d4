//! XML Attribute Parsing
//!
//! Parses the attribute list found between an element name and '>' or '/>'.

use super::entities::{decode_text, decode_text_strict};
use super::scanner::{is_name_char, is_name_start_char, is_whitespace};
use std::borrow::Cow;

/// A parsed attribute; the value has entities decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub name: Cow<'a, [u8]>,
    pub value: Cow<'a, [u8]>,
}

impl<'a> Attribute<'a> {
    pub fn new(name: &'a [u8], value: Cow<'a, [u8]>) -> Self {
        Attribute {
            name: Cow::Borrowed(name),
            value,
        }
    }
}

/// Lenient parse: tolerates unquoted and valueless attributes, skips junk bytes.
pub fn parse_attributes(input: &[u8]) -> Vec<Attribute<'_>> {
    match parse_attributes_impl(input, false) {
        Ok(attrs) => attrs,
        // Lenient parsing never reports an error
        Err(_) => Vec::new(),
    }
}

/// Strict parse: every attribute must be `name="value"` or `name='value'`,
/// names must be unique and values must decode cleanly.
pub fn parse_attributes_strict(input: &[u8]) -> Result<Vec<Attribute<'_>>, &'static str> {
    parse_attributes_impl(input, true)
}

fn parse_attributes_impl(input: &[u8], strict: bool) -> Result<Vec<Attribute<'_>>, &'static str> {
    let mut attrs: Vec<Attribute<'_>> = Vec::new();
    let mut pos = 0;

    loop {
        let had_space = pos < input.len() && is_whitespace(input[pos]);
        while pos < input.len() && is_whitespace(input[pos]) {
            pos += 1;
        }
        if pos >= input.len() {
            break;
        }

        if !is_name_start_char(input[pos]) {
            if strict {
                return Err("Attribute name must start with letter, underscore, or colon");
            }
            pos += 1;
            continue;
        }
        if strict && !attrs.is_empty() && !had_space {
            return Err("Attributes must be separated by whitespace");
        }

        let name_start = pos;
        while pos < input.len() && is_name_char(input[pos]) {
            pos += 1;
        }
        let name = &input[name_start..pos];

        while pos < input.len() && is_whitespace(input[pos]) {
            pos += 1;
        }

        if pos >= input.len() || input[pos] != b'=' {
            if strict {
                return Err("Attribute value required");
            }
            // HTML-style boolean attribute
            attrs.push(Attribute::new(name, Cow::Borrowed(b"" as &[u8])));
            continue;
        }
        pos += 1;

        while pos < input.len() && is_whitespace(input[pos]) {
            pos += 1;
        }
        if pos >= input.len() {
            if strict {
                return Err("Attribute value required");
            }
            attrs.push(Attribute::new(name, Cow::Borrowed(b"" as &[u8])));
            break;
        }

        let quote = input[pos];
        let value_bytes = if quote == b'"' || quote == b'\'' {
            pos += 1;
            let value_start = pos;
            while pos < input.len() && input[pos] != quote {
                if strict && input[pos] == b'<' {
                    return Err("Attribute value cannot contain '<'");
                }
                pos += 1;
            }
            if pos >= input.len() && strict {
                return Err("Attribute value has mismatched quotes");
            }
            let value = &input[value_start..pos];
            pos = (pos + 1).min(input.len());
            value
        } else {
            if strict {
                return Err("Attribute value must be quoted");
            }
            let value_start = pos;
            while pos < input.len() && !is_whitespace(input[pos]) {
                pos += 1;
            }
            &input[value_start..pos]
        };

        let value = if strict {
            decode_text_strict(value_bytes)?
        } else {
            decode_text(value_bytes)
        };

        if strict && attrs.iter().any(|a| a.name.as_ref() == name) {
            return Err("Duplicate attribute name");
        }
        attrs.push(Attribute::new(name, value));
    }

    Ok(attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr<'a>(name: &'a [u8], value: &'a [u8]) -> Attribute<'a> {
        Attribute::new(name, Cow::Borrowed(value))
    }

    #[test]
    fn test_simple_attributes() {
        let attrs = parse_attributes(b" id=\"test\" class='foo'");
        assert_eq!(attrs, [attr(b"id", b"test"), attr(b"class", b"foo")]);
    }

    #[test]
    fn test_entity_in_value() {
        let attrs = parse_attributes(b" title=\"&lt;hello&gt;\"");
        assert_eq!(attrs[0].value.as_ref(), b"<hello>");
        assert!(matches!(attrs[0].value, Cow::Owned(_)));
    }

    #[test]
    fn test_whitespace_around_equals() {
        let attrs = parse_attributes(b"  id  =  \"test\"  ");
        assert_eq!(attrs, [attr(b"id", b"test")]);
    }

    #[test]
    fn test_lenient_boolean_and_unquoted() {
        let attrs = parse_attributes(b" checked size=10");
        assert_eq!(attrs, [attr(b"checked", b""), attr(b"size", b"10")]);
    }

    #[test]
    fn test_strict_errors() {
        assert_eq!(parse_attributes_strict(b" a=1"), Err("Attribute value must be quoted"));
        assert_eq!(parse_attributes_strict(b" a"), Err("Attribute value required"));
        assert_eq!(parse_attributes_strict(b" a='1' a='2'"), Err("Duplicate attribute name"));
        assert_eq!(
            parse_attributes_strict(b" a='1"),
            Err("Attribute value has mismatched quotes")
        );
        assert_eq!(
            parse_attributes_strict(b" a='1'b='2'"),
            Err("Attributes must be separated by whitespace")
        );
    }

    #[test]
    fn test_strict_ok() {
        let attrs = parse_attributes_strict(b" a=\"1\" b='&amp;'").unwrap();
        assert_eq!(attrs, [attr(b"a", b"1"), attr(b"b", b"&")]);
    }
}
