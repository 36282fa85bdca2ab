use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use straysands_common::Address;

use crate::{StraySandsHubError, TagHash};

/// The free-form metadata fields of a relay, addressed by index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetadataField {
    /// Index 0
    Name,
    /// Index 1
    Description,
    /// Index 2
    Image,
}

impl MetadataField {
    /// Every field, in index order.
    pub const ALL: [MetadataField; 3] = [Self::Name, Self::Description, Self::Image];

    /// The numeric index of this field.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for MetadataField {
    type Error = StraySandsHubError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value)
            .copied()
            .ok_or(StraySandsHubError::InvalidMetadataField(value))
    }
}

/// The tags attached to a relay: an ordered sequence with set semantics.
///
/// A position index sits alongside the sequence so membership checks are
/// O(1). Removal swaps the removed entry with the last one, so it is O(1)
/// too but does not preserve the order of the remaining tags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TagHash>", into = "Vec<TagHash>")]
pub struct TagSet {
    order: Vec<TagHash>,
    positions: HashMap<TagHash, usize>,
}

impl TagSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `tag`. Returns `false` if it was already present.
    pub fn insert(&mut self, tag: TagHash) -> bool {
        if self.positions.contains_key(&tag) {
            return false;
        }
        self.positions.insert(tag, self.order.len());
        self.order.push(tag);
        true
    }

    /// Remove `tag`. Returns `false` if it was absent.
    pub fn remove(&mut self, tag: &TagHash) -> bool {
        let Some(position) = self.positions.remove(tag) else {
            return false;
        };
        self.order.swap_remove(position);
        if let Some(moved) = self.order.get(position) {
            self.positions.insert(*moved, position);
        }
        true
    }

    /// Whether `tag` is present.
    pub fn contains(&self, tag: &TagHash) -> bool {
        self.positions.contains_key(tag)
    }

    /// The tag at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&TagHash> {
        self.order.get(index)
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether there are no tags.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Tags in storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, TagHash> {
        self.order.iter()
    }
}

impl From<Vec<TagHash>> for TagSet {
    fn from(value: Vec<TagHash>) -> Self {
        let mut set = TagSet::new();
        for tag in value {
            set.insert(tag);
        }
        set
    }
}

impl From<TagSet> for Vec<TagHash> {
    fn from(value: TagSet) -> Self {
        value.order
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a TagHash;
    type IntoIter = std::slice::Iter<'a, TagHash>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

/// Descriptive state of a registered relay.
///
/// The owner is deliberately absent: it lives in the identity ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Relay {
    /// Display name (metadata field 0).
    pub name: String,
    /// Description (metadata field 1).
    pub description: String,
    /// Image URL (metadata field 2).
    pub image: String,
    /// Where the relay is reachable.
    pub url: String,
    /// The key the relay signs with.
    pub signing_address: Address,
    /// Attached tags.
    pub tags: TagSet,
}

impl Relay {
    /// A freshly registered relay with empty description and image.
    pub fn new(name: impl Into<String>, url: impl Into<String>, signing_address: Address) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            signing_address,
            ..Default::default()
        }
    }

    /// The value of a metadata field.
    pub fn metadata(&self, field: MetadataField) -> &str {
        match field {
            MetadataField::Name => &self.name,
            MetadataField::Description => &self.description,
            MetadataField::Image => &self.image,
        }
    }

    /// Overwrite a metadata field.
    pub fn set_metadata(&mut self, field: MetadataField, value: impl Into<String>) {
        let slot = match field {
            MetadataField::Name => &mut self.name,
            MetadataField::Description => &mut self.description,
            MetadataField::Image => &mut self.image,
        };
        *slot = value.into();
    }
}
