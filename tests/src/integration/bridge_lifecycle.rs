//! # Bridge Lifecycle
//!
//! The canonical end-to-end run: invoke, replay, authority rotation with an
//! era start, and rejection of stale eras, all against one live Starport.

use starport_core::{
    notice_hash, AssetClient, Instruction, InvokeOutcome, StarportError, StarportEvent,
};
use starport_crypto::CryptoError;

use crate::support::{TestWorld, BOB, STARPORT_ADDRESS, TOKEN};

#[test]
fn test_full_lifecycle_invoke_replay_rotate() {
    // Authority set of three: quorum is 2.
    let mut world = TestWorld::new(3);
    world.assets.mint(&TOKEN, &STARPORT_ADDRESS, 10_000);

    // N0, era 0, signed by two of three.
    let n0 = world.notice(
        0,
        0,
        &[0u8; 32],
        &Instruction::Unlock {
            asset: TOKEN,
            amount: 1_000,
            account: BOB,
        },
    );
    let outcome = world.invoke(&n0, &[0, 1]).unwrap();
    assert!(matches!(outcome, InvokeOutcome::Applied { .. }));
    assert_eq!(world.assets.balance_of(&TOKEN, &BOB), Ok(1_000));

    let events = world.starport.take_events();
    assert!(events.iter().any(|e| matches!(
        e,
        StarportEvent::NoticeInvoked { era_id: 0, .. }
    )));

    // Resubmitting N0 is a no-op, not a failure.
    let outcome = world.invoke(&n0, &[0, 1]).unwrap();
    assert_eq!(
        outcome,
        InvokeOutcome::Replayed {
            notice_hash: notice_hash(&n0)
        }
    );
    assert_eq!(world.assets.balance_of(&TOKEN, &BOB), Ok(1_000));
    let events = world.starport.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, StarportEvent::NoticeReplay { .. })));

    // Rotation notice N1 declares era 1 and installs a two-member set.
    // Quorum is checked against the outgoing three-member set.
    let new_set = vec![world.keys[0].1, world.keys[1].1];
    let n1 = world.notice(
        1,
        0,
        &notice_hash(&n0),
        &Instruction::ChangeAuthorities {
            authorities: new_set.clone(),
        },
    );
    world.invoke(&n1, &[0, 1, 2]).unwrap();
    assert_eq!(world.starport.current_era(), 1);
    assert_eq!(world.starport.authorities(), new_set.as_slice());

    // A notice still declaring era 0 is dead.
    let stale = world.notice(
        0,
        1,
        &notice_hash(&n1),
        &Instruction::Unlock {
            asset: TOKEN,
            amount: 1,
            account: BOB,
        },
    );
    assert_eq!(
        world.invoke(&stale, &[0, 1]),
        Err(StarportError::InvalidEra {
            declared: 0,
            current: 1
        })
    );
}

#[test]
fn test_rotated_out_authorities_lose_signing_power() {
    let mut world = TestWorld::new(3);
    world.assets.mint(&TOKEN, &STARPORT_ADDRESS, 10_000);

    // Rotate to a set containing only authority 0.
    let n0 = world.notice(
        1,
        0,
        &[0u8; 32],
        &Instruction::ChangeAuthorities {
            authorities: vec![world.keys[0].1],
        },
    );
    world.invoke(&n0, &[0, 1]).unwrap();

    // Signatures from the rotated-out members no longer authorize.
    let n1 = world.notice(
        1,
        1,
        &notice_hash(&n0),
        &Instruction::Unlock {
            asset: TOKEN,
            amount: 1,
            account: BOB,
        },
    );
    let result = world.invoke(&n1, &[1, 2]);
    assert!(matches!(
        result,
        Err(StarportError::Crypto(CryptoError::UnauthorizedSigner(_)))
    ));

    // The surviving member alone meets the new quorum of 1.
    world.invoke(&n1, &[0]).unwrap();
    assert_eq!(world.assets.balance_of(&TOKEN, &BOB), Ok(1));
}

#[test]
fn test_replay_after_rotation_stays_a_noop() {
    // A notice accepted in era 0 and re-presented in era 1 must not fail
    // era validation; replays short-circuit before it.
    let mut world = TestWorld::new(3);
    world.assets.mint(&TOKEN, &STARPORT_ADDRESS, 10_000);

    let n0 = world.notice(
        0,
        0,
        &[0u8; 32],
        &Instruction::Unlock {
            asset: TOKEN,
            amount: 500,
            account: BOB,
        },
    );
    world.invoke(&n0, &[0, 1]).unwrap();

    let rotation = world.notice(
        1,
        0,
        &notice_hash(&n0),
        &Instruction::ChangeAuthorities {
            authorities: world.keys.iter().map(|(_, a)| *a).collect(),
        },
    );
    world.invoke(&rotation, &[0, 1]).unwrap();
    assert_eq!(world.starport.current_era(), 1);

    let outcome = world.invoke(&n0, &[0, 1]).unwrap();
    assert!(matches!(outcome, InvokeOutcome::Replayed { .. }));
    assert_eq!(world.assets.balance_of(&TOKEN, &BOB), Ok(500));
}

#[test]
fn test_quorum_law_holds_across_set_sizes() {
    // Supermajority rule: floor(n/3) + 1 signatures pass, one fewer fails.
    for n in 1..=7u64 {
        let mut world = TestWorld::new(n);
        world.assets.mint(&TOKEN, &STARPORT_ADDRESS, 10_000);
        let quorum = (n as usize) / 3 + 1;

        let notice = world.notice(
            0,
            0,
            &[0u8; 32],
            &Instruction::Unlock {
                asset: TOKEN,
                amount: 1,
                account: BOB,
            },
        );
        let enough: Vec<usize> = (0..quorum).collect();
        if quorum > 1 {
            let short: Vec<usize> = (0..quorum - 1).collect();
            assert!(
                matches!(
                    world.invoke(&notice, &short),
                    Err(StarportError::Crypto(CryptoError::BelowQuorum { .. }))
                ),
                "n={n}: {} signatures should be below quorum",
                quorum - 1
            );
        }
        world
            .invoke(&notice, &enough)
            .unwrap_or_else(|e| panic!("n={n}: quorum {quorum} rejected: {e}"));
    }
}

#[test]
fn test_duplicate_signatures_never_reach_quorum() {
    let mut world = TestWorld::new(3);
    world.assets.mint(&TOKEN, &STARPORT_ADDRESS, 10_000);

    let notice = world.notice(
        0,
        0,
        &[0u8; 32],
        &Instruction::Unlock {
            asset: TOKEN,
            amount: 1,
            account: BOB,
        },
    );
    let result = world.invoke(&notice, &[0, 0]);
    assert!(matches!(
        result,
        Err(StarportError::Crypto(CryptoError::DuplicateSigner(_)))
    ));
}
