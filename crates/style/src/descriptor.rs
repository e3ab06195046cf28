//! Descriptors of an element and its ancestry, the input side of style
//! resolution.

use markflow_types::ElementType;

use crate::attributes::ElementAttributes;

/// Position of an element within its parent container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementPosition {
    pub is_first: bool,
    pub is_last: bool,
    /// Zero-based index in the parent container.
    pub index: usize,
    /// Number of elements in the parent container.
    pub count: usize,
}

impl ElementPosition {
    pub fn new(index: usize, count: usize) -> Self {
        Self {
            is_first: index == 0,
            is_last: count > 0 && index + 1 == count,
            index,
            count,
        }
    }
}

/// Descriptor of a single element: its type, attributes and position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SingleElementDescriptor {
    pub element_type: ElementType,
    pub attributes: ElementAttributes,
    pub position: ElementPosition,
    /// Text of a leaf block and its children as plain text. `None` for
    /// container elements.
    pub plain_text: Option<String>,
}

/// Descriptor chain for an element and all its ancestors, innermost
/// first. The document root sentinel is not part of the chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylingDescriptor {
    descriptors: Vec<SingleElementDescriptor>,
}

impl StylingDescriptor {
    pub fn new(descriptors: Vec<SingleElementDescriptor>) -> Self {
        Self { descriptors }
    }

    /// Descriptor of the element itself.
    pub fn current(&self) -> Option<&SingleElementDescriptor> {
        self.descriptors.first()
    }

    pub fn get(&self, index: usize) -> Option<&SingleElementDescriptor> {
        self.descriptors.get(index)
    }

    pub fn descriptors(&self) -> &[SingleElementDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// True when the direct parent has the given type, and the given
    /// style name when one is passed.
    pub fn has_parent(&self, element_type: ElementType, style: Option<&str>) -> bool {
        match self.descriptors.get(1) {
            Some(parent) => {
                parent.element_type == element_type
                    && match style {
                        Some(name) => parent.attributes.style.as_deref() == Some(name),
                        None => true,
                    }
            }
            None => false,
        }
    }

    /// True when any ancestor has the given type, and the given style
    /// name when one is passed.
    pub fn has_ancestor(&self, element_type: ElementType, style: Option<&str>) -> bool {
        self.descriptors.iter().skip(1).any(|ancestor| {
            ancestor.element_type == element_type
                && match style {
                    Some(name) => ancestor.attributes.style.as_deref() == Some(name),
                    None => true,
                }
        })
    }

    pub fn has_parent_with_id(&self, id: &str) -> bool {
        match self.descriptors.get(1) {
            Some(parent) => parent.attributes.id.as_deref() == Some(id),
            None => false,
        }
    }

    pub fn has_ancestor_with_id(&self, id: &str) -> bool {
        self.descriptors
            .iter()
            .skip(1)
            .any(|ancestor| ancestor.attributes.id.as_deref() == Some(id))
    }
}
