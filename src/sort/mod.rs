//! In-place sorting with a pluggable ordering.
//!
//! A [`Sorter`] rearranges a slice from smallest to largest according to a
//! [`Comparator`]. Closures `Fn(&T, &T) -> Ordering` are comparators, and
//! [`NaturalOrder`] supplies the default ordering for `T: Ord`.

use std::cmp::Ordering;
use std::fmt;

/// A total ordering over `T`.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}

/// Orders elements by their own `Ord` implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

/// Rearranges a slice so its elements are in order from smallest to largest.
pub trait Sorter<T> {
    fn sort(&self, items: &mut [T]);
}

/// Heap sort: `Θ(n log n)` in every case, constant extra space, not stable.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapSorter<C = NaturalOrder> {
    comparator: C,
}

impl HeapSorter<NaturalOrder> {
    /// A heap sorter using the elements' natural order.
    pub fn natural() -> Self {
        Self {
            comparator: NaturalOrder,
        }
    }
}

impl<C> HeapSorter<C> {
    pub fn new(comparator: C) -> Self {
        Self { comparator }
    }

    /// Rearrange `items` into a max heap.
    pub fn build_max_heap<T>(&self, items: &mut [T])
    where
        C: Comparator<T>,
    {
        let len = items.len();
        for start in (0..len / 2).rev() {
            self.sift_down_from(items, len, start);
        }
    }

    /// Restore the heap property for `items[..range]`, assuming only the root
    /// may be out of place. Elements at `range` and beyond are not moved.
    pub fn sift_down<T>(&self, items: &mut [T], range: usize)
    where
        C: Comparator<T>,
    {
        self.sift_down_from(items, range, 0);
    }

    fn sift_down_from<T>(&self, items: &mut [T], range: usize, mut start: usize)
    where
        C: Comparator<T>,
    {
        loop {
            let left = 2 * start + 1;
            let right = left + 1;
            let mut largest = start;

            if left < range && self.comparator.compare(&items[largest], &items[left]).is_lt() {
                largest = left;
            }
            if right < range && self.comparator.compare(&items[largest], &items[right]).is_lt() {
                largest = right;
            }
            if largest == start {
                return;
            }

            items.swap(start, largest);
            start = largest;
        }
    }
}

impl<T, C: Comparator<T>> Sorter<T> for HeapSorter<C> {
    fn sort(&self, items: &mut [T]) {
        self.build_max_heap(items);
        for end in (1..items.len()).rev() {
            items.swap(0, end);
            self.sift_down(items, end);
        }
    }
}

/// Render a slice as `[a, b, c]` for debugging.
pub fn format_slice<T: fmt::Display>(items: &[T]) -> String {
    let inner = items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", inner)
}
