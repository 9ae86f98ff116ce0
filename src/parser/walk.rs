//! Document tree traversal.

use super::Node;

/// Pre-order iterator over every descendant of a node.
///
/// Yields nodes in document order and never yields the starting node itself.
/// Uses an explicit stack, so deeply nested lists and block quotes cannot
/// overflow the call stack.
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Descendants<'a> {
    pub fn new(root: &'a Node) -> Self {
        Self {
            stack: root.children().iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
