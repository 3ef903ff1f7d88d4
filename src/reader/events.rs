//! XML Event Types
//!
//! Event types for pull-parser style XML processing.

use crate::core::attributes::Attribute;
use std::borrow::Cow;

/// XML parsing event
#[derive(Debug, Clone)]
pub enum XmlEvent<'a> {
    /// Start of an element: <name attrs...>
    StartElement(StartElement<'a>),
    /// End of an element: </name>
    EndElement(EndElement<'a>),
    /// Empty element: <name attrs.../>
    EmptyElement(StartElement<'a>),
    /// Text content between tags, entities decoded
    Text(Cow<'a, [u8]>),
    /// CDATA section content
    CData(Cow<'a, [u8]>),
    /// <!-- ... -->
    Comment,
    /// <?target data?>
    ProcessingInstruction,
    /// <?xml version="1.0"?>, attributes validated in strict mode
    XmlDeclaration,
    /// <!DOCTYPE ...>
    DocType,
}

/// Start element event data
#[derive(Debug, Clone)]
pub struct StartElement<'a> {
    /// Full element name, prefix included
    pub name: Cow<'a, [u8]>,
    /// Attributes in document order
    pub attributes: Vec<Attribute<'a>>,
}

impl<'a> StartElement<'a> {
    pub fn new(name: &'a [u8], attributes: Vec<Attribute<'a>>) -> Self {
        StartElement {
            name: Cow::Borrowed(name),
            attributes,
        }
    }
}

/// End element event data
#[derive(Debug, Clone)]
pub struct EndElement<'a> {
    pub name: Cow<'a, [u8]>,
}

impl<'a> EndElement<'a> {
    pub fn new(name: &'a [u8]) -> Self {
        EndElement {
            name: Cow::Borrowed(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_element_borrows_name() {
        let elem = StartElement::new(
            b"svg:rect",
            vec![Attribute::new(b"width", Cow::Borrowed(b"10" as &[u8]))],
        );
        assert!(matches!(elem.name, Cow::Borrowed(b"svg:rect")));
        assert_eq!(elem.attributes.len(), 1);
        assert!(matches!(EndElement::new(b"svg:rect").name, Cow::Borrowed(_)));
    }
}
