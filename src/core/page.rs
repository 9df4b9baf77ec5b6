// Injectable page abstraction. Owns the rendered elements; the dismisser
// only queries structure and flips visibility forward.

use super::model::{Element, ElementId};

/// A rendered page as a flat collection of elements in document order.
/// Handles are stable indices into that order; elements are never created
/// or destroyed once the page exists, only hidden.
#[derive(Debug, Default)]
pub struct Page {
    elements: Vec<Element>,
}

impl Page {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Append an element, returning its handle.
    pub fn push(&mut self, element: Element) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, handle: usize) -> Option<&Element> {
        self.elements.get(handle)
    }

    /// Enumerate every element carrying the given marker class, in
    /// document order.
    pub fn find_by_class(&self, class: &str) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.has_class(class))
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Resolve an identifier to an element handle. First match in document
    /// order wins; ids are expected to be unique within the page.
    pub fn resolve(&self, id: &ElementId) -> Option<usize> {
        self.elements
            .iter()
            .position(|e| e.id.as_ref() == Some(id))
    }

    /// Set an element's visibility to hidden. Returns true only when a
    /// visible -> hidden transition actually occurred; hiding an already
    /// hidden element (or an out-of-range handle) is a no-op.
    pub fn hide(&mut self, handle: usize) -> bool {
        match self.elements.get_mut(handle) {
            Some(element) if !element.visibility.is_hidden() => {
                element.visibility = super::model::Visibility::Hidden;
                true
            }
            _ => false,
        }
    }

    pub fn is_hidden(&self, handle: usize) -> bool {
        self.elements
            .get(handle)
            .map(|e| e.visibility.is_hidden())
            .unwrap_or(false)
    }
}
