use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use crate::{BlackboardError, Result};

/// Typed handle to a blackboard entry.
///
/// The type parameter is the entry's declared type. Two keys with the same
/// name but different `T` address the same slot; reading through the wrong one
/// is reported as [`BlackboardError::TypeMismatch`].
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BbKey<T: 'static> {
    name: &'static str,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Copy for BbKey<T> {}

impl<T: 'static> Clone for BbKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> fmt::Debug for BbKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BbKey({}: {})", self.name, type_name::<T>())
    }
}

impl<T: 'static> BbKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _phantom: PhantomData,
        }
    }

    pub const fn name(self) -> &'static str {
        self.name
    }
}

struct Entry {
    value: Box<dyn Any>,
    type_name: &'static str,
}

/// Type-erased fact store shared by perception, decision nodes and output.
///
/// Keys are created once with [`Blackboard::add`] and afterwards only read or
/// overwritten in place; there is no removal. Iteration order over key names
/// is stable.
#[derive(Default)]
pub struct Blackboard {
    entries: BTreeMap<&'static str, Entry>,
}

impl fmt::Debug for Blackboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, e)| (k, e.type_name)))
            .finish()
    }
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Create `key` with its initial value.
    pub fn add<T: 'static>(&mut self, key: BbKey<T>, value: T) -> Result<()> {
        if self.entries.contains_key(key.name) {
            return Err(BlackboardError::DuplicateKey(key.name));
        }
        self.entries.insert(
            key.name,
            Entry {
                value: Box::new(value),
                type_name: type_name::<T>(),
            },
        );
        Ok(())
    }

    /// `true` when `key` exists and was created with type `T`.
    pub fn contains<T: 'static>(&self, key: BbKey<T>) -> bool {
        self.entries
            .get(key.name)
            .is_some_and(|e| e.value.is::<T>())
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn key_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn get<T: 'static>(&self, key: BbKey<T>) -> Result<&T> {
        let entry = self
            .entries
            .get(key.name)
            .ok_or(BlackboardError::MissingKey(key.name))?;
        entry
            .value
            .downcast_ref::<T>()
            .ok_or_else(|| mismatch::<T>(key.name, entry))
    }

    pub fn get_mut<T: 'static>(&mut self, key: BbKey<T>) -> Result<&mut T> {
        let entry = self
            .entries
            .get_mut(key.name)
            .ok_or(BlackboardError::MissingKey(key.name))?;
        let stored = entry.type_name;
        entry
            .value
            .downcast_mut::<T>()
            .ok_or(BlackboardError::TypeMismatch {
                key: key.name,
                stored,
                requested: type_name::<T>(),
            })
    }

    /// Overwrite an existing entry in place.
    ///
    /// Fails without touching the store when the key is absent or was created
    /// with a different type.
    pub fn change<T: 'static>(&mut self, key: BbKey<T>, value: T) -> Result<()> {
        *self.get_mut(key)? = value;
        Ok(())
    }
}

fn mismatch<T: 'static>(key: &'static str, entry: &Entry) -> BlackboardError {
    BlackboardError::TypeMismatch {
        key,
        stored: entry.type_name,
        requested: type_name::<T>(),
    }
}
