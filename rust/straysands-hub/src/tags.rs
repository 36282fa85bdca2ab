use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use straysands_common::{Address, Digest};

use crate::{HubEvent, StraySandsHubError, TagRegistered, digest::digest_type};

/// Digest of a tag's display name; the canonical key of a tag.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TagHash(Digest);

digest_type!(TagHash);

impl TagHash {
    /// The hash under which a tag named `name` is registered.
    pub fn of(name: &str) -> Self {
        Self(Digest::hash(name.as_bytes()))
    }
}

/// The global tag dictionary.
///
/// Tags are registered once by the administrator and are permanent: there is
/// no rename and no removal. The dictionary answers point lookups only; the
/// full set of tags is recovered by replaying [`TagRegistered`] events with
/// [`TagDictionary::replay`].
#[derive(Clone, Debug)]
pub struct TagDictionary {
    administrator: Address,
    names: HashMap<TagHash, String>,
}

impl TagDictionary {
    /// Creates an empty dictionary administered by `administrator`.
    pub fn new(administrator: Address) -> Self {
        Self {
            administrator,
            names: HashMap::new(),
        }
    }

    /// The account allowed to register tags.
    pub fn administrator(&self) -> &Address {
        &self.administrator
    }

    /// Register a tag named `name` on behalf of `caller`.
    ///
    /// Checks run in order: caller, then name, then duplicate hash. Nothing
    /// is stored unless every check passes.
    pub fn register(
        &mut self,
        caller: Address,
        name: &str,
    ) -> Result<TagRegistered, StraySandsHubError> {
        if caller != self.administrator {
            tracing::warn!(caller = %caller, "Rejected tag registration from non-administrator");
            return Err(StraySandsHubError::UnauthorizedAccount { caller });
        }
        if name.is_empty() {
            return Err(StraySandsHubError::EmptyTagName);
        }

        let hash = TagHash::of(name);
        if self.names.contains_key(&hash) {
            return Err(StraySandsHubError::DuplicateTag(hash));
        }

        self.names.insert(hash, name.to_owned());
        tracing::info!(hash = %hash, name, "Registered tag");
        Ok(TagRegistered {
            hash,
            name: name.to_owned(),
        })
    }

    /// The name registered under `hash`, if any.
    pub fn name_of(&self, hash: &TagHash) -> Option<&str> {
        self.names.get(hash).map(String::as_str)
    }

    /// Whether `hash` is registered.
    pub fn contains(&self, hash: &TagHash) -> bool {
        self.names.contains_key(hash)
    }

    /// Rebuild the full `hash → name` view from an event stream.
    pub fn replay<'a, I>(events: I) -> BTreeMap<TagHash, String>
    where
        I: IntoIterator<Item = &'a HubEvent>,
    {
        events
            .into_iter()
            .filter_map(|event| match event {
                HubEvent::Tag(TagRegistered { hash, name }) => Some((*hash, name.clone())),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testresult::TestResult;

    fn admin() -> Address {
        Address::from([1; 20])
    }

    #[test]
    fn it_registers_tags_for_the_administrator() -> TestResult {
        let mut tags = TagDictionary::new(admin());
        let event = tags.register(admin(), "Games")?;

        assert_eq!(event.hash, TagHash::of("Games"));
        assert_eq!(event.name, "Games");
        assert_eq!(tags.name_of(&event.hash), Some("Games"));
        Ok(())
    }

    #[test]
    fn it_rejects_other_callers_by_name() {
        let mut tags = TagDictionary::new(admin());
        let intruder = Address::from([2; 20]);

        assert_eq!(
            tags.register(intruder, "Gaming"),
            Err(StraySandsHubError::UnauthorizedAccount { caller: intruder })
        );
        assert!(!tags.contains(&TagHash::of("Gaming")));
    }

    #[test]
    fn it_checks_the_caller_before_the_name() {
        let mut tags = TagDictionary::new(admin());
        assert_eq!(
            tags.register(Address::ZERO, ""),
            Err(StraySandsHubError::UnauthorizedAccount {
                caller: Address::ZERO
            })
        );
    }

    #[test]
    fn it_rejects_empty_and_duplicate_names() -> TestResult {
        let mut tags = TagDictionary::new(admin());
        tags.register(admin(), "Games")?;

        assert_eq!(
            tags.register(admin(), "Games"),
            Err(StraySandsHubError::DuplicateTag(TagHash::of("Games")))
        );
        assert_eq!(
            tags.register(admin(), ""),
            Err(StraySandsHubError::EmptyTagName)
        );
        Ok(())
    }

    #[test]
    fn it_treats_names_as_case_sensitive() -> TestResult {
        let mut tags = TagDictionary::new(admin());
        tags.register(admin(), "Games")?;
        tags.register(admin(), "games")?;
        assert!(tags.contains(&TagHash::of("games")));
        Ok(())
    }

    #[test]
    fn it_replays_registrations_from_events() -> TestResult {
        let mut tags = TagDictionary::new(admin());
        let events: Vec<HubEvent> = ["Games", "Documents", "Audio & Video"]
            .into_iter()
            .map(|name| tags.register(admin(), name).map(HubEvent::from))
            .collect::<Result<_, _>>()?;

        let replayed = TagDictionary::replay(&events);
        assert_eq!(replayed.len(), 3);
        for (hash, name) in &replayed {
            assert_eq!(tags.name_of(hash), Some(name.as_str()));
        }
        Ok(())
    }

    #[test]
    fn it_parses_tag_hashes_from_display() -> TestResult {
        let hash = TagHash::of("Documents");
        assert_eq!(hash.to_string().parse::<TagHash>()?, hash);
        Ok(())
    }
}
