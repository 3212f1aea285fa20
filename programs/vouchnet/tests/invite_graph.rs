mod common;

use anchor_lang::prelude::Pubkey;
use common::{assert_err, codes, Network};
use vouchnet::constants::INVITE_BATCH_SIZE;
use vouchnet::errors::InviteError;
use vouchnet::state::InvitationValidity;

#[test]
fn scenario_a_activation_hands_out_twelve_codes() {
    let mut net = Network::new();
    let issuer = Pubkey::new_unique();
    let alice = Pubkey::new_unique();
    net.grant_issuer(issuer);

    net.mint_batch(issuer, &codes("C", 12)).unwrap();
    assert_eq!(net.held_by(issuer).len(), 12);
    assert_eq!(net.validate("C1"), InvitationValidity::Valid);

    net.activate(issuer, "C1", alice, &codes("A", 12)).unwrap();

    let held = net.held_by(alice);
    assert_eq!(held.len(), INVITE_BATCH_SIZE);
    assert!(held.iter().all(|i| !i.used && i.issuer == alice));
    assert!(net.activations.contains_key(&alice));
    assert_eq!(net.activations[&alice].ancestor, issuer);
    assert_eq!(net.activated, vec![alice]);
    assert_eq!(net.validate("C1"), InvitationValidity::AlreadyUsed);

    // C1 is spent for everyone
    assert_err(
        net.activate(issuer, "C1", Pubkey::new_unique(), &codes("B", 12)),
        InviteError::AlreadyUsed,
    );
}

#[test]
fn a_user_activates_at_most_once() {
    let mut net = Network::new();
    let issuer = Pubkey::new_unique();
    let user = Pubkey::new_unique();
    net.grant_issuer(issuer);
    net.mint_batch(issuer, &codes("C", 2)).unwrap();

    net.activate(issuer, "C1", user, &codes("U", 12)).unwrap();
    assert_err(
        net.activate(issuer, "C2", user, &codes("V", 12)),
        InviteError::UserAlreadyActivated,
    );
    assert_eq!(net.validate("C2"), InvitationValidity::Valid);
    assert_eq!(net.config.activated_count, 1);
}

#[test]
fn only_active_issuers_mint_or_activate() {
    let mut net = Network::new();
    let issuer = Pubkey::new_unique();
    let stranger = Pubkey::new_unique();

    assert_err(
        net.mint_batch(stranger, &codes("C", 1)),
        InviteError::Unauthorized,
    );

    net.grant_issuer(issuer);
    net.mint_batch(issuer, &codes("C", 1)).unwrap();
    net.revoke_issuer(issuer);
    assert_err(
        net.activate(issuer, "C1", Pubkey::new_unique(), &codes("U", 12)),
        InviteError::Unauthorized,
    );
}

#[test]
fn batches_must_be_fresh_and_distinct() {
    let mut net = Network::new();
    let issuer = Pubkey::new_unique();
    net.grant_issuer(issuer);
    net.mint_batch(issuer, &codes("C", 3)).unwrap();

    assert_err(
        net.mint_batch(issuer, &codes("C", 1)),
        InviteError::CodeAlreadyExists,
    );
    let dup = vec!["D1".to_string(), "D1".to_string()];
    assert_err(net.mint_batch(issuer, &dup), InviteError::DuplicateInBatch);

    // Replacement codes colliding with live ones abort the whole activation
    let user = Pubkey::new_unique();
    let mut clash = codes("U", 11);
    clash.push("C2".to_string());
    assert_err(
        net.activate(issuer, "C1", user, &clash),
        InviteError::CodeAlreadyExists,
    );
    let short = codes("U", 11);
    assert_err(
        net.activate(issuer, "C1", user, &short),
        InviteError::WrongBatchSize,
    );
    assert_eq!(net.validate("C1"), InvitationValidity::Valid);
    assert!(net.activations.is_empty());
}

#[test]
fn unknown_codes_are_not_found() {
    let mut net = Network::new();
    let issuer = Pubkey::new_unique();
    net.grant_issuer(issuer);

    assert_eq!(net.validate("NOPE"), InvitationValidity::NotFound);
    assert_err(
        net.activate(issuer, "NOPE", Pubkey::new_unique(), &codes("U", 12)),
        InviteError::NotFound,
    );
}

#[test]
fn issuers_are_indexed_on_first_batch_only() {
    let mut net = Network::new();
    let issuer = Pubkey::new_unique();
    net.grant_issuer(issuer);

    net.mint_batch(issuer, &codes("C", 2)).unwrap();
    net.mint_batch(issuer, &codes("D", 2)).unwrap();
    assert_eq!(net.issued, vec![issuer]);
    assert_eq!(net.config.issuer_count, 1);
    assert_eq!(net.members[&issuer].bundle_count, 2);
    assert_eq!(net.members[&issuer].invitations_held, 4);
}

#[test]
fn every_change_gets_the_next_event_number() {
    let mut net = Network::new();
    let issuer = Pubkey::new_unique();
    net.grant_issuer(issuer);

    // 3 minted, then the batch itself
    net.mint_batch(issuer, &codes("C", 3)).unwrap();
    assert_eq!(net.events, vec![1, 2, 3, 4]);

    // The activation, then its 12 minted codes
    net.activate(issuer, "C1", Pubkey::new_unique(), &codes("U", 12))
        .unwrap();
    assert_eq!(net.events, (1..=17).collect::<Vec<u64>>());

    // Failures emit nothing
    let _ = net.activate(issuer, "C1", Pubkey::new_unique(), &codes("V", 12));
    let _ = net.mint_batch(Pubkey::new_unique(), &codes("W", 1));
    assert_eq!(net.events.len(), 17);
    assert_eq!(net.config.event_seq, 17);
}

#[test]
fn event_numbers_stay_gap_free_across_components() {
    let mut net = Network::new();
    let issuer = Pubkey::new_unique();
    let (author, liker, seller) = (
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        Pubkey::new_unique(),
    );
    net.grant_issuer(issuer);
    net.register(seller);
    net.mint_batch(issuer, &codes("C", 2)).unwrap();
    net.activate(issuer, "C1", author, &codes("A", 12)).unwrap();
    net.activate(issuer, "C2", liker, &codes("L", 12)).unwrap();

    let post = net.create_post(author, seller).unwrap();
    net.superlike(post, liker).unwrap();
    let _ = net.superlike(post, liker);
    net.claim_utility(seller).unwrap();
    let _ = net.claim_governance(seller);

    // 3 + 13 + 13 + post + superlike and accrual + claim
    let expected: Vec<u64> = (1..=33).collect();
    assert_eq!(net.events, expected);
    assert_eq!(net.config.event_seq, 33);
}
