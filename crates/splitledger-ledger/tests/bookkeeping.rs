//! Integration tests for the bookkeeping plane.
//!
//! Drives a [`Registry`] the way a host application would: configure it,
//! register parties, form groups, record activity, and read back
//! snapshots and logs.

use rand::{Rng, SeedableRng, rngs::StdRng};
use splitledger_ledger::Registry;
use splitledger_types::*;

#[test]
fn config_from_json_drives_new_groups() {
    let config = LedgerConfig::from_json(r#"{ "default_currency": "EUR" }"#).unwrap();
    assert_eq!(config.opening_balance, 0);

    let mut registry = Registry::new(config);
    let g = registry.create_group("empty", &[]).unwrap();
    assert_eq!(registry.group(g).unwrap().currency().as_str(), "EUR");

    let a = registry.create_party_default("A");
    assert_eq!(registry.party(a).unwrap().preferred_currency().as_str(), "EUR");
}

#[test]
fn invalid_config_is_rejected() {
    let err = LedgerConfig::from_json(r#"{ "default_currency": "" }"#)
        .and_then(|c| c.validate().map(|()| c))
        .unwrap_err();
    assert!(matches!(err, SplitledgerError::Configuration(_)));

    let err = LedgerConfig::from_json("not json").unwrap_err();
    assert!(matches!(err, SplitledgerError::Serialization(_)));
}

#[test]
fn group_currency_follows_members() {
    let mut registry = Registry::new(LedgerConfig::default());
    let a = registry.create_party("A", CurrencyTag::new("USD"));
    let b = registry.create_party("B", CurrencyTag::new("INR"));
    let c = registry.create_party("C", CurrencyTag::new("INR"));
    let d = registry.create_party("D", CurrencyTag::new("USD"));

    let majority = registry.create_group("majority", &[a, b, c]).unwrap();
    assert_eq!(registry.group(majority).unwrap().currency().as_str(), "INR");

    // Tie: the tag seen first wins.
    let tied = registry.create_group("tied", &[a, b, c, d]).unwrap();
    assert_eq!(registry.group(tied).unwrap().currency().as_str(), "USD");

    let records = registry.record_in_group(majority, a, b, 10).unwrap();
    let log = registry.group(majority).unwrap().log();
    let record = log.get(records).unwrap();
    assert_eq!(record.currency.as_str(), "INR");
    assert_eq!(record.group, Some(majority));
}

#[test]
fn party_membership_is_tracked() {
    let mut registry = Registry::new(LedgerConfig::default());
    let a = registry.create_party_default("A");
    let b = registry.create_party_default("B");
    let g1 = registry.create_group("one", &[a]).unwrap();
    let g2 = registry.create_group("two", &[a, b]).unwrap();

    assert_eq!(registry.party(a).unwrap().groups(), &[g1, g2]);
    assert!(registry.add_member(g1, b).unwrap());
    assert!(!registry.add_member(g1, b).unwrap());
    assert!(registry.party(b).unwrap().is_in_group(g1));
    assert_eq!(registry.group(g1).unwrap().members(), &[a, b]);
}

#[test]
fn unknown_ids_are_rejected_without_side_effects() {
    let mut registry = Registry::new(LedgerConfig::default());
    let a = registry.create_party_default("A");
    let ghost = PartyId::new();

    assert_eq!(
        registry.create_group("g", &[a, ghost]).unwrap_err(),
        SplitledgerError::PartyNotFound(ghost)
    );
    assert_eq!(registry.groups().count(), 0);
    assert!(registry.party(a).unwrap().groups().is_empty());

    let g = registry.create_group("g", &[a]).unwrap();
    assert_eq!(
        registry.add_members(g, &[ghost]).unwrap_err(),
        SplitledgerError::PartyNotFound(ghost)
    );
    assert_eq!(registry.group(g).unwrap().members(), &[a]);

    assert_eq!(
        registry.record_bilateral(a, ghost, 5).unwrap_err(),
        SplitledgerError::PartyNotFound(ghost)
    );
    assert!(registry.party(a).unwrap().log().is_empty());
}

#[test]
fn bilateral_records_mirror_each_other() {
    let mut registry = Registry::new(LedgerConfig::default());
    let a = registry.create_party("A", CurrencyTag::new("GBP"));
    let b = registry.create_party("B", CurrencyTag::new("JPY"));

    let receipt = registry.record_bilateral(a, b, 75).unwrap();

    let a_record = registry.party(a).unwrap().log().get(receipt.payer_record).unwrap();
    assert_eq!((a_record.payer, a_record.payee, a_record.amount), (a, b, 75));
    assert_eq!(a_record.currency.as_str(), "GBP");
    assert_eq!(a_record.group, None);

    let b_record = registry.party(b).unwrap().log().get(receipt.payee_record).unwrap();
    assert_eq!((b_record.payer, b_record.payee, b_record.amount), (b, a, -75));
    assert_eq!(b_record.currency.as_str(), "GBP");

    assert_eq!(
        registry.party(a).unwrap().ledger().net_position(),
        NetPosition::GetsBack(75)
    );
    assert_eq!(
        registry.party(b).unwrap().ledger().net_position(),
        NetPosition::Owes(75)
    );
}

#[test]
fn snapshots_serialize_in_insertion_order() {
    let mut registry = Registry::new(LedgerConfig::default());
    let a = registry.create_party_default("A");
    let b = registry.create_party_default("B");
    let c = registry.create_party_default("C");
    let g = registry.create_group("g", &[c, a, b]).unwrap();
    registry.record_in_group(g, a, c, 40).unwrap();

    let snapshot = registry.group_snapshot(g).unwrap();
    assert_eq!(snapshot.entries, vec![(c, -40), (a, 40), (b, 0)]);

    let json = serde_json::to_string(&snapshot).unwrap();
    let back: BalanceSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}

#[test]
fn overflow_is_refused_atomically() {
    let mut registry = Registry::new(LedgerConfig::default());
    let a = registry.create_party_default("A");
    let b = registry.create_party_default("B");
    let g = registry.create_group("g", &[a, b]).unwrap();

    registry.record_in_group(g, a, b, i64::MAX).unwrap();
    let err = registry.record_in_group(g, a, b, 1).unwrap_err();
    assert!(matches!(err, SplitledgerError::AmountOverflow { .. }));

    let group = registry.group(g).unwrap();
    assert_eq!(group.ledger().get(a), Some(i64::MAX));
    assert_eq!(group.ledger().get(b), Some(-i64::MAX));
    assert_eq!(group.log().len(), 1);

    registry.record_bilateral(a, b, i64::MAX).unwrap();
    assert!(registry.record_bilateral(a, b, 1).is_err());
    assert_eq!(registry.party(a).unwrap().log().len(), 1);
    assert_eq!(registry.party(b).unwrap().log().len(), 1);
}

/// Randomised household: bilateral and group payments interleaved, then
/// every ledger checked against a naive recomputation.
#[test]
fn random_household_matches_naive_totals() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut registry = Registry::new(LedgerConfig::default());
    let parties: Vec<PartyId> = (0..6)
        .map(|i| registry.create_party_default(format!("member-{i}")))
        .collect();
    let group = registry.create_group("house", &parties[..4]).unwrap();

    let mut pooled = [0i64; 6];
    let mut pairwise = [[0i64; 6]; 6];
    for _ in 0..500 {
        let from = rng.gen_range(0..6);
        let to = rng.gen_range(0..6);
        let amount = rng.gen_range(-500..=500);

        if rng.gen_bool(0.5) {
            let result = registry.record_in_group(group, parties[from], parties[to], amount);
            if from < 4 && to < 4 {
                result.unwrap();
                if from != to {
                    pooled[from] += amount;
                    pooled[to] -= amount;
                }
            } else {
                assert!(matches!(result, Err(SplitledgerError::NotAGroupMember { .. })));
            }
        } else if from != to {
            registry
                .record_bilateral(parties[from], parties[to], amount)
                .unwrap();
            pairwise[from][to] += amount;
            pairwise[to][from] -= amount;
        }
    }

    let g = registry.group(group).unwrap();
    for (i, party) in parties.iter().enumerate().take(4) {
        assert_eq!(g.ledger().get(*party), Some(pooled[i]));
    }
    assert_eq!(g.ledger().get(parties[4]), None);
    assert_eq!(g.ledger().total(), 0);

    for (i, a) in parties.iter().enumerate() {
        let ledger = registry.party(*a).unwrap().ledger();
        for (j, b) in parties.iter().enumerate() {
            if i != j {
                assert_eq!(ledger.get(*b).unwrap_or(0), pairwise[i][j]);
            }
        }
    }
}
