#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("stack is empty")]
pub struct EmptyStack;

/// A last-in first-out stack.
/// Items are stored bottom to top, so index 0 is the first item ever pushed that is still present.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundedStack<T> {
    items: Vec<T>,
}

impl<T> BoundedStack<T> {
    pub fn new() -> Self {
        BoundedStack { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Result<T, EmptyStack> {
        self.items.pop().ok_or(EmptyStack)
    }

    pub fn peek(&self) -> Result<&T, EmptyStack> {
        self.items.last().ok_or(EmptyStack)
    }

    /// Returns the item directly beneath the top.
    /// Fails with [`EmptyStack`] unless at least two items are stacked.
    pub fn peek_below_top(&self) -> Result<&T, EmptyStack> {
        let len = self.items.len();
        if len < 2 {
            return Err(EmptyStack);
        }
        Ok(&self.items[len - 2])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates from the bottom of the stack to the top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> Default for BoundedStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_order() {
        let mut stack = BoundedStack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop(), Ok(3));
        assert_eq!(stack.pop(), Ok(2));
        assert_eq!(stack.pop(), Ok(1));
        assert_eq!(stack.pop(), Err(EmptyStack));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_peek() {
        let mut stack = BoundedStack::new();
        assert_eq!(stack.peek(), Err(EmptyStack));
        assert_eq!(stack.peek_below_top(), Err(EmptyStack));

        stack.push('a');
        assert_eq!(stack.peek(), Ok(&'a'));
        assert_eq!(stack.peek_below_top(), Err(EmptyStack));

        stack.push('b');
        assert_eq!(stack.peek(), Ok(&'b'));
        assert_eq!(stack.peek_below_top(), Ok(&'a'));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_iter_bottom_to_top() {
        let mut stack = BoundedStack::default();
        for i in 0..4 {
            stack.push(i);
        }
        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(stack.iter().rev().next(), Some(&3));
    }
}
