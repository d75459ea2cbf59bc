//! Memory accounting
//!
//! The checker keeps all clauses in standard collections; this module only
//! provides a way to report how much heap memory they occupy.

use std::{
    collections::{HashMap, HashSet},
    mem::size_of,
};

/// Trait for types that can be used as an array index.
pub trait Offset {
    fn as_offset(&self) -> usize;
}

impl Offset for usize {
    fn as_offset(&self) -> usize {
        *self
    }
}

/// A trait for objects that can report their memory usage on the heap
pub trait HeapSpace {
    /// The number of bytes allocated on the heap that this owns.
    fn heap_space(&self) -> usize;
}

impl HeapSpace for usize {
    fn heap_space(&self) -> usize {
        0
    }
}

impl HeapSpace for bool {
    fn heap_space(&self) -> usize {
        0
    }
}

impl<T: HeapSpace> HeapSpace for Vec<T> {
    fn heap_space(&self) -> usize {
        self.capacity() * size_of::<T>()
            + self.iter().map(HeapSpace::heap_space).sum::<usize>()
    }
}

impl<K: HeapSpace, V: HeapSpace, S> HeapSpace for HashMap<K, V, S> {
    /// An estimate; the table layout is an implementation detail of `std`.
    fn heap_space(&self) -> usize {
        self.capacity() * (size_of::<K>() + size_of::<V>())
            + self
                .iter()
                .map(|(key, value)| key.heap_space() + value.heap_space())
                .sum::<usize>()
    }
}

impl<T: HeapSpace, S> HeapSpace for HashSet<T, S> {
    fn heap_space(&self) -> usize {
        self.capacity() * size_of::<T>() + self.iter().map(HeapSpace::heap_space).sum::<usize>()
    }
}

/// Convert bytes to  megabytes for readability.
pub fn format_memory_usage(bytes: usize) -> String {
    format!("{:12}", bytes >> 20) // MB
}
