use serde::{Deserialize, Serialize};
use straysands_common::Address;
use straysands_identity::{RelayId, Transfer};

use crate::{MAX_JOURNAL_CAPACITY, PermissionKey, StraySandsHubError, TagHash};

/// A tag was added to the dictionary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRegistered {
    /// Digest of the tag name.
    pub hash: TagHash,
    /// The tag name as registered.
    pub name: String,
}

/// A permission grant changed value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionChanged {
    /// The relay the grant is scoped to.
    pub relay: RelayId,
    /// The permission that changed.
    pub key: PermissionKey,
    /// The account the permission applies to.
    pub subject: Address,
    /// The new value.
    pub granted: bool,
}

/// Everything the hub reports to indexers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HubEvent {
    /// See [`TagRegistered`].
    Tag(TagRegistered),
    /// Ownership assignment of a newly registered relay.
    Transfer(Transfer),
    /// See [`PermissionChanged`].
    Permission(PermissionChanged),
}

impl From<TagRegistered> for HubEvent {
    fn from(value: TagRegistered) -> Self {
        Self::Tag(value)
    }
}

impl From<Transfer> for HubEvent {
    fn from(value: Transfer) -> Self {
        Self::Transfer(value)
    }
}

impl From<PermissionChanged> for HubEvent {
    fn from(value: PermissionChanged) -> Self {
        Self::Permission(value)
    }
}

/// Append-only event log.
///
/// Positions in the journal are stable: an indexer keeps the length it last
/// saw as a cursor and asks for everything [`since`](Journal::since) then.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Journal {
    events: Vec<HubEvent>,
}

impl Journal {
    /// Creates an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty journal with room for `capacity` events, capped at
    /// [`MAX_JOURNAL_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity.min(MAX_JOURNAL_CAPACITY)),
        }
    }

    /// Append an event.
    pub fn record(&mut self, event: impl Into<HubEvent>) {
        self.events.push(event.into());
    }

    /// All events, oldest first.
    pub fn events(&self) -> &[HubEvent] {
        &self.events
    }

    /// Events recorded at or after `cursor`.
    pub fn since(&self, cursor: usize) -> &[HubEvent] {
        self.events.get(cursor..).unwrap_or_default()
    }

    /// The cursor that [`since`](Journal::since) accepts to see only events
    /// recorded from now on.
    pub fn cursor(&self) -> usize {
        self.events.len()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Permission changes only, oldest first.
    pub fn permission_changes(&self) -> impl Iterator<Item = &PermissionChanged> {
        self.events.iter().filter_map(|event| match event {
            HubEvent::Permission(change) => Some(change),
            _ => None,
        })
    }

    /// Encode as JSON lines, one event per line.
    pub fn to_json_lines(&self) -> Result<String, StraySandsHubError> {
        let mut output = String::new();
        for event in &self.events {
            output.push_str(&serde_json::to_string(event)?);
            output.push('\n');
        }
        Ok(output)
    }

    /// Decode a journal from JSON lines. Blank lines are skipped.
    pub fn from_json_lines(input: &str) -> Result<Self, StraySandsHubError> {
        let events = input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str)
            .collect::<Result<Vec<HubEvent>, _>>()?;
        Ok(Self { events })
    }
}

impl<'a> IntoIterator for &'a Journal {
    type Item = &'a HubEvent;
    type IntoIter = std::slice::Iter<'a, HubEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
