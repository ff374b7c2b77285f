//! A doubly linked sequence bounded by two sentinel nodes.
//!
//! Nodes live in an arena owned by the [`Sequence`] and refer to their
//! neighbours by [`NodeId`], so links never own anything. The sentinels
//! sit at fixed slots and are never exposed as values, which keeps every
//! insertion and removal a splice between two existing nodes.

use std::fmt;
use thiserror::Error;

const HEAD: NodeId = NodeId { index: 0, generation: 0 };
const TAIL: NodeId = NodeId { index: 1, generation: 0 };

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SequenceError {
    #[error("the sequence is empty")]
    EmptyContainer,
    #[error("the given nodes are not linked as required")]
    InvalidLink,
    #[error("index {index} is out of range for a sequence of size {size}")]
    IndexOutOfRange { index: usize, size: usize },
}

pub type Result<T> = std::result::Result<T, SequenceError>;

/// Handle to a node owned by a [`Sequence`].
///
/// A slot's generation is bumped every time its node is removed, so a
/// handle kept past removal never matches whatever reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

#[derive(Debug)]
struct Node<E> {
    value: Option<E>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    generation: u32,
}

impl<E> Node<E> {
    fn sentinel() -> Self {
        Node { value: None, prev: None, next: None, generation: 0 }
    }
}

#[derive(Debug)]
pub struct Sequence<E> {
    nodes: Vec<Node<E>>,
    free: Vec<usize>,
    size: usize,
}

impl<E> Default for Sequence<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Sequence<E> {
    pub fn new() -> Self {
        let mut head = Node::sentinel();
        let mut tail = Node::sentinel();
        head.next = Some(TAIL);
        tail.prev = Some(HEAD);

        Sequence { nodes: vec![head, tail], free: vec![], size: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn len(&self) -> usize {
        self.size
    }

    /// The front sentinel. Never holds a value.
    pub fn head(&self) -> NodeId {
        HEAD
    }

    /// The back sentinel. Never holds a value.
    pub fn tail(&self) -> NodeId {
        TAIL
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.next)
    }

    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.prev)
    }

    /// Value stored at `id`, `None` for sentinels and stale ids.
    pub fn value(&self, id: NodeId) -> Option<&E> {
        self.node(id).and_then(|n| n.value.as_ref())
    }

    pub fn first(&self) -> Result<&E> {
        self.next(HEAD).and_then(|id| self.value(id)).ok_or(SequenceError::EmptyContainer)
    }

    pub fn last(&self) -> Result<&E> {
        self.prev(TAIL).and_then(|id| self.value(id)).ok_or(SequenceError::EmptyContainer)
    }

    /// Splices `value` in between `n1` and `n2`, which must be adjacent
    /// with `n1` in front.
    pub fn insert_between(&mut self, value: E, n1: NodeId, n2: NodeId) -> Result<NodeId> {
        if n1 == TAIL || self.node(n2).is_none() || self.next(n1) != Some(n2) {
            return Err(SequenceError::InvalidLink);
        }

        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.nodes[index];
                slot.value = Some(value);
                slot.prev = Some(n1);
                slot.next = Some(n2);
                NodeId { index, generation: slot.generation }
            }
            None => {
                self.nodes.push(Node { value: Some(value), prev: Some(n1), next: Some(n2), generation: 0 });
                NodeId { index: self.nodes.len() - 1, generation: 0 }
            }
        };

        self.nodes[n1.index].next = Some(id);
        self.nodes[n2.index].prev = Some(id);
        self.size += 1;

        Ok(id)
    }

    pub fn insert_front(&mut self, value: E) -> NodeId {
        let after = self.nodes[HEAD.index].next.unwrap_or(TAIL);
        self.link_unchecked(value, HEAD, after)
    }

    pub fn insert_back(&mut self, value: E) -> NodeId {
        let before = self.nodes[TAIL.index].prev.unwrap_or(HEAD);
        self.link_unchecked(value, before, TAIL)
    }

    /// Unlinks the single node lying between `n1` and `n2` and returns its
    /// value.
    pub fn remove_between(&mut self, n1: NodeId, n2: NodeId) -> Result<E> {
        let middle = match self.next(n1) {
            Some(id) if id != TAIL && self.next(id) == Some(n2) => id,
            _ => return Err(SequenceError::InvalidLink),
        };

        let slot = &mut self.nodes[middle.index];
        let value = slot.value.take().ok_or(SequenceError::InvalidLink)?;
        slot.prev = None;
        slot.next = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(middle.index);

        self.nodes[n1.index].next = Some(n2);
        self.nodes[n2.index].prev = Some(n1);
        self.size -= 1;

        Ok(value)
    }

    pub fn remove_front(&mut self) -> Result<E> {
        if self.is_empty() {
            return Err(SequenceError::EmptyContainer);
        }
        let after = self.next(HEAD).and_then(|id| self.next(id)).ok_or(SequenceError::InvalidLink)?;
        self.remove_between(HEAD, after)
    }

    pub fn remove_back(&mut self) -> Result<E> {
        if self.is_empty() {
            return Err(SequenceError::EmptyContainer);
        }
        let before = self.prev(TAIL).and_then(|id| self.prev(id)).ok_or(SequenceError::InvalidLink)?;
        self.remove_between(before, TAIL)
    }

    pub fn get(&self, index: usize) -> Result<&E> {
        if index >= self.size {
            return Err(SequenceError::IndexOutOfRange { index, size: self.size });
        }
        self.iter().nth(index).ok_or(SequenceError::IndexOutOfRange { index, size: self.size })
    }

    pub fn iter(&self) -> Iter<'_, E> {
        Iter { seq: self, front: self.next(HEAD), back: self.prev(TAIL), remaining: self.size }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn node(&self, id: NodeId) -> Option<&Node<E>> {
        // Sentinels are always live; other slots only while they hold a
        // value of the same generation as the handle
        self.nodes
            .get(id.index)
            .filter(|n| n.generation == id.generation)
            .filter(|n| id == HEAD || id == TAIL || n.value.is_some())
    }

    fn link_unchecked(&mut self, value: E, n1: NodeId, n2: NodeId) -> NodeId {
        match self.insert_between(value, n1, n2) {
            Ok(id) => id,
            // Sentinel neighbours are adjacent by construction
            Err(e) => unreachable!("sentinel links broken: {}", e),
        }
    }
}

impl<E: PartialEq> Sequence<E> {
    /// Position of the first element equal to `value`, scanning from the
    /// front.
    pub fn find(&self, value: &E) -> Option<usize> {
        self.iter().position(|v| v == value)
    }
}

impl<E: fmt::Display> fmt::Display for Sequence<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}

pub struct Iter<'a, E> {
    seq: &'a Sequence<E>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.front = self.seq.next(id);
        self.remaining -= 1;
        self.seq.value(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, E> DoubleEndedIterator for Iter<'a, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.back = self.seq.prev(id);
        self.remaining -= 1;
        self.seq.value(id)
    }
}

impl<'a, E> ExactSizeIterator for Iter<'a, E> {}

impl<'a, E> IntoIterator for &'a Sequence<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
