//! Ordered, mutable collection of field pairs
//!
//! The store is the single write path for the form's state. Views subscribe
//! for change notifications and re-read the collection afterwards; the store
//! never pushes state, only events.

use std::fmt;

use crate::form::errors::FormError;
use crate::models::{FieldPair, PairField};

/// Change notification emitted after each successful mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Added { index: usize },
    Removed { index: usize },
    Updated { index: usize, field: PairField },
}

type Subscriber = Box<dyn FnMut(&StoreEvent) + Send>;

/// Ordered collection of field pairs, never shorter than one during editing
pub struct PairStore {
    pairs: Vec<FieldPair>,
    subscribers: Vec<Subscriber>,
}

impl Default for PairStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PairStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairStore")
            .field("pairs", &self.pairs)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl PairStore {
    /// A store starts with exactly one empty pair
    pub fn new() -> Self {
        Self {
            pairs: vec![FieldPair::empty()],
            subscribers: Vec::new(),
        }
    }

    pub fn from_pairs(pairs: Vec<FieldPair>) -> Self {
        Self {
            pairs,
            subscribers: Vec::new(),
        }
    }

    pub fn pairs(&self) -> &[FieldPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Register a change listener; called after every successful mutation
    pub fn subscribe(&mut self, subscriber: impl FnMut(&StoreEvent) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    fn notify(&mut self, event: StoreEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
    }

    /// Append a new empty pair with a fresh id. Returns the new pair's index.
    pub fn add(&mut self) -> usize {
        self.pairs.push(FieldPair::empty());
        let index = self.pairs.len() - 1;
        self.notify(StoreEvent::Added { index });
        index
    }

    /// Remove the pair at `index`, shifting later pairs down.
    ///
    /// Refused when only one pair remains; the last pair can never be
    /// removed.
    pub fn remove_at(&mut self, index: usize) -> Result<FieldPair, FormError> {
        if self.pairs.len() <= 1 {
            return Err(FormError::RemovalRefused);
        }
        if index >= self.pairs.len() {
            return Err(FormError::IndexOutOfRange {
                index,
                len: self.pairs.len(),
            });
        }
        let removed = self.pairs.remove(index);
        self.notify(StoreEvent::Removed { index });
        Ok(removed)
    }

    /// Set one field of the pair at `index`. No validation happens at write
    /// time; validity is computed separately on demand.
    pub fn update(
        &mut self,
        index: usize,
        field: PairField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let len = self.pairs.len();
        let pair = self
            .pairs
            .get_mut(index)
            .ok_or(FormError::IndexOutOfRange { index, len })?;
        match field {
            PairField::Input => pair.input_value = value.into(),
            PairField::Select => pair.select_value = value.into(),
        }
        self.notify(StoreEvent::Updated { index, field });
        Ok(())
    }
}
