//! Fixed-length, most-recent-first sliding windows.

use std::collections::VecDeque;
use std::ops::Index;

/// A window of the last `len` values, newest at index 0.
///
/// The window is filled with a sentinel at construction and never changes
/// length: every [`push`](Window::push) evicts the oldest entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Window<T> {
    slots: VecDeque<T>,
}

impl<T: Clone> Window<T> {
    /// Create a window of `len` copies of `fill`.
    pub fn filled(len: usize, fill: T) -> Self {
        Self {
            slots: std::iter::repeat(fill).take(len).collect(),
        }
    }

    /// Insert `value` as the newest entry, dropping the oldest.
    pub fn push(&mut self, value: T) {
        if self.slots.is_empty() {
            return;
        }
        self.slots.pop_back();
        self.slots.push_front(value);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, age: usize) -> Option<&T> {
        self.slots.get(age)
    }

    /// Iterate newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.slots.iter().cloned().collect()
    }
}

impl<T> Index<usize> for Window<T> {
    type Output = T;

    fn index(&self, age: usize) -> &T {
        &self.slots[age]
    }
}
