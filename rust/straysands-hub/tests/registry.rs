//! Tag registration and relay lifecycle through the hub.
mod registry {
    use pretty_assertions::assert_eq;
    use straysands_common::Address;
    use straysands_hub::{
        ErrorKind, Hub, HubEvent, HubSettings, Journal, MetadataField, RelayId,
        StraySandsHubError, TagDictionary, TagHash, Transfer,
    };
    use straysands_identity::VolatileIdentityLedger;
    use testresult::TestResult;

    fn account(seed: u8) -> Address {
        Address::from([seed; 20])
    }

    fn hub() -> Hub<VolatileIdentityLedger> {
        Hub::new(HubSettings::new(account(8)), VolatileIdentityLedger::new())
    }

    #[test_log::test]
    fn it_gates_tag_registration_on_the_administrator() -> TestResult {
        let mut hub = hub();

        assert_eq!(
            hub.register_tag(account(1), "Gaming"),
            Err(StraySandsHubError::UnauthorizedAccount { caller: account(1) })
        );

        for name in ["Games", "Documents", "Audio & Video"] {
            hub.register_tag(account(8), name)?;
        }

        let tags = TagDictionary::replay(hub.journal());
        assert_eq!(
            tags.values().map(String::as_str).collect::<std::collections::BTreeSet<_>>(),
            ["Audio & Video", "Documents", "Games"]
                .into_iter()
                .collect::<std::collections::BTreeSet<_>>()
        );
        Ok(())
    }

    #[test_log::test]
    fn it_rejects_empty_and_duplicate_tags() -> TestResult {
        let mut hub = hub();
        hub.register_tag(account(8), "Games")?;

        let duplicate = hub.register_tag(account(8), "Games").unwrap_err();
        assert_eq!(duplicate.kind(), ErrorKind::Duplicate);
        assert_eq!(
            duplicate.to_string(),
            format!("Tag already registered: {}", TagHash::of("Games"))
        );

        let empty = hub.register_tag(account(8), "").unwrap_err();
        assert_eq!(empty, StraySandsHubError::EmptyTagName);
        assert_eq!(empty.kind(), ErrorKind::InvalidInput);
        Ok(())
    }

    #[test_log::test]
    fn it_registers_relays_with_the_caller_as_owner() -> TestResult {
        let mut hub = hub();
        let signing = Address::from([0xAA; 20]);
        let relay = hub.register_relay(account(1), "Relay", "https://r.example", signing)?;

        assert_eq!(relay, RelayId(1));
        assert_eq!(hub.owner_of(relay)?, account(1));
        assert_eq!(hub.relay_url(relay), "https://r.example");
        assert_eq!(hub.relay_signing_address(relay), signing);
        assert_eq!(hub.relay_metadata_field(relay, MetadataField::Name), "Relay");
        assert_eq!(hub.relay_metadata_field(relay, MetadataField::Description), "");
        assert_eq!(hub.relay_metadata_field(relay, MetadataField::Image), "");
        assert_eq!(
            hub.journal().events(),
            &[HubEvent::Transfer(Transfer {
                from: None,
                to: account(1),
                relay
            })]
        );
        Ok(())
    }

    #[test_log::test]
    fn it_refuses_relays_for_the_zero_account() {
        let mut hub = hub();
        let error = hub
            .register_relay(Address::ZERO, "Relay", "https://r.example", account(9))
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        assert_eq!(hub.relay_count(), 0);
        assert!(hub.journal().is_empty());
    }

    #[test_log::test]
    fn it_creates_a_new_relay_on_every_registration() -> TestResult {
        let mut hub = hub();
        let first = hub.register_relay(account(1), "Relay", "https://r.example", account(9))?;
        let second = hub.register_relay(account(1), "Relay", "https://r.example", account(9))?;

        assert_eq!((first, second), (RelayId(1), RelayId(2)));
        assert_eq!(hub.relay_count(), 2);
        assert_eq!(hub.identity().balance_of(&account(1)), 2);
        Ok(())
    }

    #[test_log::test]
    fn it_keeps_relay_tags_a_set() -> TestResult {
        let mut hub = hub();
        let relay = hub.register_relay(account(1), "Relay", "https://r.example", account(9))?;
        let tag = TagHash::of("Games");

        hub.add_relay_tag(account(1), relay, tag)?;
        hub.add_relay_tag(account(1), relay, tag)?;
        assert_eq!(hub.relay_tags_count(relay), 1);
        assert_eq!(hub.relay_tag_at(relay, 0), tag);

        hub.remove_relay_tag(account(1), relay, &tag)?;
        assert_eq!(hub.relay_tags_count(relay), 0);
        hub.remove_relay_tag(account(1), relay, &tag)?;
        assert_eq!(hub.relay_tags_count(relay), 0);
        Ok(())
    }

    #[test_log::test]
    fn it_gates_every_relay_mutator_on_the_owner() -> TestResult {
        let mut hub = hub();
        let relay = hub.register_relay(account(1), "Relay", "https://r.example", account(9))?;
        let intruder = account(2);
        let tag = TagHash::of("Games");

        let results = [
            hub.set_relay_metadata_field(intruder, relay, MetadataField::Description, "x"),
            hub.set_relay_url(intruder, relay, "https://evil.example"),
            hub.set_relay_signing_address(intruder, relay, intruder),
            hub.add_relay_tag(intruder, relay, tag).map(|_| ()),
            hub.remove_relay_tag(intruder, relay, &tag).map(|_| ()),
        ];
        for result in results {
            assert_eq!(
                result,
                Err(StraySandsHubError::NotRelayOwner {
                    caller: intruder,
                    relay
                })
            );
        }

        assert_eq!(hub.relay_url(relay), "https://r.example");
        assert_eq!(hub.relay_signing_address(relay), account(9));
        assert_eq!(hub.relay_metadata_field(relay, MetadataField::Description), "");
        assert_eq!(hub.relay_tags_count(relay), 0);
        Ok(())
    }

    #[test_log::test]
    fn it_fails_every_mutator_on_unregistered_relays() {
        let mut hub = hub();
        let tag = TagHash::of("Games");

        for relay in [RelayId(0), RelayId(1), RelayId(42)] {
            let results = [
                hub.set_relay_metadata_field(account(1), relay, MetadataField::Name, "x"),
                hub.set_relay_url(account(1), relay, "https://r.example"),
                hub.set_relay_signing_address(account(1), relay, account(9)),
                hub.add_relay_tag(account(1), relay, tag).map(|_| ()),
                hub.remove_relay_tag(account(1), relay, &tag).map(|_| ()),
                hub.set_permission(account(1), relay, Default::default(), account(5), true)
                    .map(|_| ()),
            ];
            for result in results {
                assert_eq!(result, Err(StraySandsHubError::RelayNotFound(relay)));
            }

            assert_eq!(hub.relay_url(relay), "");
            assert_eq!(hub.relay_signing_address(relay), Address::ZERO);
            assert_eq!(hub.relay_tags_count(relay), 0);
            assert_eq!(hub.relay_tag_at(relay, 0), TagHash::default());
        }
    }

    #[test_log::test]
    fn it_accepts_raw_metadata_indexes() -> TestResult {
        let mut hub = hub();
        let relay = hub.register_relay(account(1), "Relay", "https://r.example", account(9))?;

        hub.set_relay_metadata_field(
            account(1),
            relay,
            MetadataField::try_from(2usize)?,
            "https://r.example/logo.png",
        )?;
        assert_eq!(
            hub.relay_metadata_field(relay, MetadataField::Image),
            "https://r.example/logo.png"
        );
        assert_eq!(
            MetadataField::try_from(3usize).map_err(|e| e.kind()),
            Err(ErrorKind::InvalidInput)
        );
        Ok(())
    }

    #[test_log::test]
    fn it_exports_a_journal_indexers_can_replay() -> TestResult {
        let mut hub = hub();
        let games = hub.register_tag(account(8), "Games")?;
        hub.register_relay(account(1), "Relay", "https://r.example", account(9))?;

        let exported = hub.journal().to_json_lines()?;
        let imported = Journal::from_json_lines(&exported)?;

        assert_eq!(&imported, hub.journal());
        assert_eq!(
            TagDictionary::replay(&imported).get(&games).map(String::as_str),
            Some("Games")
        );
        Ok(())
    }
}
