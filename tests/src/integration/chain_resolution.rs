//! # Chain Resolution
//!
//! Recovery of a notice whose signatures were lost, by exhibiting the hash
//! chain connecting it to an accepted descendant.

use starport_core::{notice_hash, AssetClient, Instruction, InvokeOutcome, StarportError};
use starport_types::Hash;

use crate::support::{TestWorld, BOB, STARPORT_ADDRESS, TOKEN};

/// Builds `count` linked unlock notices starting from `parent`, 1 unit each.
fn linked_unlocks(world: &TestWorld, parent: Hash, start_index: u64, count: u64) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    let mut parent = parent;
    for i in 0..count {
        let notice = world.notice(
            0,
            start_index + i,
            &parent,
            &Instruction::Unlock {
                asset: TOKEN,
                amount: 1,
                account: BOB,
            },
        );
        parent = notice_hash(&notice);
        out.push(notice);
    }
    out
}

#[test]
fn test_lost_head_recovered_through_descendants() {
    let mut world = TestWorld::new(3);
    world.assets.mint(&TOKEN, &STARPORT_ADDRESS, 10_000);

    let head = world.notice(
        0,
        0,
        &[0u8; 32],
        &Instruction::Unlock {
            asset: TOKEN,
            amount: 100,
            account: BOB,
        },
    );
    let descendants = linked_unlocks(&world, notice_hash(&head), 1, 3);

    // Only the tail ever got signatures through.
    world
        .invoke(&descendants.last().unwrap().clone(), &[0, 1])
        .unwrap();

    let outcome = world.invoke_chain(&head, &descendants).unwrap();
    assert!(matches!(outcome, InvokeOutcome::Applied { .. }));
    // Head applied; the intermediate links were not.
    assert_eq!(world.assets.balance_of(&TOKEN, &BOB), Ok(101));
}

#[test]
fn test_corrupted_link_rejects_whole_chain() {
    let mut world = TestWorld::new(3);
    world.assets.mint(&TOKEN, &STARPORT_ADDRESS, 10_000);

    let head = world.notice(
        0,
        0,
        &[0u8; 32],
        &Instruction::Unlock {
            asset: TOKEN,
            amount: 100,
            account: BOB,
        },
    );
    let mut descendants = linked_unlocks(&world, notice_hash(&head), 1, 3);
    world
        .invoke(&descendants.last().unwrap().clone(), &[0, 1])
        .unwrap();
    let delivered = world.assets.balance_of(&TOKEN, &BOB).unwrap();

    // Break the middle link.
    descendants[1] = world.notice(
        0,
        2,
        &[0xAA; 32],
        &Instruction::Unlock {
            asset: TOKEN,
            amount: 1,
            account: BOB,
        },
    );

    let result = world.transact(|w| w.invoke_chain(&head, &descendants));
    assert_eq!(result, Err(StarportError::NoticeHashMismatch));
    // Nothing was applied.
    assert_eq!(world.assets.balance_of(&TOKEN, &BOB), Ok(delivered));
    assert!(!world.starport.is_notice_used(&notice_hash(&head)));
}

#[test]
fn test_unaccepted_tail_rejects_chain() {
    let mut world = TestWorld::new(3);
    world.assets.mint(&TOKEN, &STARPORT_ADDRESS, 10_000);

    let head = world.notice(
        0,
        0,
        &[0u8; 32],
        &Instruction::Unlock {
            asset: TOKEN,
            amount: 100,
            account: BOB,
        },
    );
    let descendants = linked_unlocks(&world, notice_hash(&head), 1, 2);

    assert_eq!(
        world.invoke_chain(&head, &descendants),
        Err(StarportError::TailNotAccepted)
    );
    assert_eq!(world.assets.balance_of(&TOKEN, &BOB), Ok(0));
}

#[test]
fn test_recovered_head_is_replay_protected() {
    let mut world = TestWorld::new(3);
    world.assets.mint(&TOKEN, &STARPORT_ADDRESS, 10_000);

    let head = world.notice(
        0,
        0,
        &[0u8; 32],
        &Instruction::Unlock {
            asset: TOKEN,
            amount: 100,
            account: BOB,
        },
    );
    let descendants = linked_unlocks(&world, notice_hash(&head), 1, 1);
    world.invoke(&descendants[0].clone(), &[0, 1]).unwrap();

    world.invoke_chain(&head, &descendants).unwrap();
    assert_eq!(world.assets.balance_of(&TOKEN, &BOB), Ok(101));

    // Both re-presentation paths are now no-ops.
    assert!(matches!(
        world.invoke_chain(&head, &descendants).unwrap(),
        InvokeOutcome::Replayed { .. }
    ));
    assert!(matches!(
        world.invoke(&head, &[0, 1]).unwrap(),
        InvokeOutcome::Replayed { .. }
    ));
    assert_eq!(world.assets.balance_of(&TOKEN, &BOB), Ok(101));
}
