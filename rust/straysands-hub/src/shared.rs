use std::sync::Arc;

use parking_lot::RwLock;
use straysands_common::Address;
use straysands_identity::{IdentityLedger, RelayId};

use crate::{Hub, HubEvent, HubSettings, PermissionKey, StraySandsHubError};

/// A [`Hub`] shared between threads.
///
/// All writers go through one lock, so operations keep the total order the
/// hub relies on for its read-before-write checks. Clones share the same hub.
///
/// ```rust
/// use straysands_common::Address;
/// use straysands_hub::{HubSettings, SharedHub};
/// use straysands_identity::VolatileIdentityLedger;
///
/// # fn main() -> Result<(), straysands_hub::StraySandsHubError> {
/// let hub = SharedHub::new(HubSettings::new(Address::from([1; 20])), VolatileIdentityLedger::new());
/// let relay = hub.write(|hub| {
///     hub.register_relay(Address::from([2; 20]), "Relay #1", "https://relay1.example.org", Address::from([9; 20]))
/// })?;
/// assert_eq!(hub.read(|hub| hub.relay_url(relay).to_owned()), "https://relay1.example.org");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SharedHub<L> {
    inner: Arc<RwLock<Hub<L>>>,
}

impl<L> Clone for SharedHub<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L: IdentityLedger> SharedHub<L> {
    /// Creates a shared hub backed by `identity`.
    pub fn new(settings: HubSettings, identity: L) -> Self {
        Self::from(Hub::new(settings, identity))
    }

    /// Grant or revoke a permission under the write lock.
    pub fn set_permission(
        &self,
        caller: Address,
        relay: RelayId,
        key: PermissionKey,
        subject: Address,
        granted: bool,
    ) -> Result<bool, StraySandsHubError> {
        self.inner
            .write()
            .set_permission(caller, relay, key, subject, granted)
    }

    /// Whether `subject` holds `key` on `relay`.
    pub fn has_permission(&self, relay: RelayId, key: PermissionKey, subject: Address) -> bool {
        self.inner.read().has_permission(relay, key, subject)
    }
}

impl<L> SharedHub<L> {
    /// Run `f` with shared access. Concurrent readers do not block each other.
    pub fn read<R>(&self, f: impl FnOnce(&Hub<L>) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` with exclusive access. Everything `f` does is applied before
    /// any other reader or writer observes the hub.
    pub fn write<R>(&self, f: impl FnOnce(&mut Hub<L>) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Events recorded at or after `cursor`.
    pub fn events_since(&self, cursor: usize) -> Vec<HubEvent> {
        self.inner.read().journal().since(cursor).to_vec()
    }
}

impl<L> From<Hub<L>> for SharedHub<L> {
    fn from(value: Hub<L>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use straysands_identity::VolatileIdentityLedger;
    use testresult::TestResult;

    fn account(seed: u8) -> Address {
        Address::from([seed; 20])
    }

    #[test]
    fn it_reports_a_contended_grant_once() -> TestResult {
        let hub = SharedHub::new(HubSettings::new(account(1)), VolatileIdentityLedger::new());
        let relay = hub.write(|hub| {
            hub.register_relay(account(2), "Relay #1", "https://relay1.example.org", account(90))
        })?;
        let key = PermissionKey::named("Can do Foo");
        let cursor = hub.read(|hub| hub.journal().cursor());

        let changed = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    let hub = hub.clone();
                    scope.spawn(move || {
                        hub.set_permission(account(2), relay, key, account(5), true)
                    })
                })
                .collect();
            workers
                .into_iter()
                .map(|worker| worker.join().expect("worker panicked"))
                .collect::<Result<Vec<bool>, _>>()
        })?;

        assert_eq!(changed.iter().filter(|changed| **changed).count(), 1);
        assert_eq!(hub.events_since(cursor).len(), 1);
        assert!(hub.has_permission(relay, key, account(5)));
        Ok(())
    }

    #[test]
    fn it_shares_state_between_clones() -> TestResult {
        let hub = SharedHub::new(HubSettings::new(account(1)), VolatileIdentityLedger::new());
        let other = hub.clone();

        other.write(|hub| hub.register_tag(account(1), "Games"))?;
        assert_eq!(hub.read(|hub| hub.journal().len()), 1);
        Ok(())
    }
}
