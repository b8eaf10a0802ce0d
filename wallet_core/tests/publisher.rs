//! Publisher and receive paths against nullable infrastructure.

use std::collections::HashSet;
use std::sync::Arc;

use dirvote_crypto::PrivateKey;
use dirvote_messages::{decode_feature, decode_vote};
use dirvote_nullables::{NullClock, NullSigner, NullTransport};
use dirvote_types::{Address, RoomId, SntAmount, TimestampMs, U256, VoteChoice};
use dirvote_typed_data::{TypedDataBuilder, VotingDomain};
use dirvote_verification::{filter_verified, Verifier};
use dirvote_wallet_core::{
    receive_features, receive_votes, PublishOutcome, Publisher, SigningAuthority, WalletError,
};

const VOTE_BASE: &str = "/dirvote/1/vote-room-";
const FEATURE_TOPIC: &str = "/dirvote/1/feature/proto";
const COMMUNITY_KEY: &str = "0x0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
const NOW_MS: u64 = 1_650_000_000_000;

fn domain() -> VotingDomain {
    VotingDomain::new(1, Address::repeat_byte(0x42))
}

fn publisher() -> Publisher {
    Publisher::new(TypedDataBuilder::new(domain()), VOTE_BASE, FEATURE_TOPIC)
        .with_clock(Arc::new(NullClock::new(NOW_MS)))
}

fn voter(seed: u8) -> NullSigner {
    NullSigner::approving(PrivateKey::from_bytes([seed; 32]).unwrap())
}

#[tokio::test]
async fn published_vote_round_trips_into_a_batch() {
    let transport = NullTransport::new();
    let signer = voter(0xAA);
    let account = signer.address();

    let outcome = publisher()
        .publish_vote(
            &transport,
            Some(account),
            Some(&signer),
            RoomId::new(3),
            SntAmount::from(1000),
            VoteChoice::For,
        )
        .await
        .unwrap();
    assert_eq!(
        outcome,
        PublishOutcome::Published {
            content_topic: "/dirvote/1/vote-room-3".into()
        }
    );

    let votes = receive_votes(&transport, VOTE_BASE, RoomId::new(3)).await;
    assert_eq!(votes.len(), 1);
    assert_eq!(votes[0].nonce, 1);

    let rows = filter_verified(&votes, &HashSet::new(), &Verifier::new(domain()));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].voter, account);
    assert_eq!(rows[0].room_id_and_type.raw(), U256::from(7));

    assert!(receive_votes(&transport, VOTE_BASE, RoomId::new(30)).await.is_empty());
}

#[tokio::test]
async fn missing_account_or_signer_fails_soft() {
    let signer = voter(1);
    let p = publisher();

    let built = p
        .build_vote_message(None, Some(&signer), RoomId::new(1), SntAmount::from(1), VoteChoice::For, None)
        .await
        .unwrap();
    assert!(built.is_none());

    let built = p
        .build_vote_message(Some(signer.address()), None, RoomId::new(1), SntAmount::from(1), VoteChoice::For, None)
        .await
        .unwrap();
    assert!(built.is_none());
    assert_eq!(signer.requests(), 0);
}

#[tokio::test]
async fn mismatched_signer_is_never_asked() {
    let signer = voter(1);
    let other = voter(2).address();
    let built = publisher()
        .build_vote_message(Some(other), Some(&signer), RoomId::new(1), SntAmount::from(1), VoteChoice::For, None)
        .await
        .unwrap();
    assert!(built.is_none());
    assert_eq!(signer.requests(), 0);
}

#[tokio::test]
async fn declined_signature_publishes_nothing() {
    let transport = NullTransport::new();
    let signer = NullSigner::declining(Address::repeat_byte(5));
    let outcome = publisher()
        .publish_vote(
            &transport,
            Some(signer.address()),
            Some(&signer),
            RoomId::new(1),
            SntAmount::from(1),
            VoteChoice::Against,
        )
        .await
        .unwrap();
    assert_eq!(outcome, PublishOutcome::NotSigned);
    assert_eq!(signer.requests(), 1);
    assert!(transport.published().is_empty());
}

#[tokio::test]
async fn unreachable_signer_is_a_hard_failure() {
    let signer = NullSigner::unreachable(Address::repeat_byte(5));
    let result = publisher()
        .build_vote_message(
            Some(signer.address()),
            Some(&signer),
            RoomId::new(1),
            SntAmount::from(1),
            VoteChoice::For,
            None,
        )
        .await;
    assert!(matches!(result, Err(WalletError::Rpc(_))));
}

#[tokio::test]
async fn publish_failure_is_reported_not_swallowed() {
    let transport = NullTransport::new();
    transport.set_publish_failure(true);
    let signer = voter(1);
    let result = publisher()
        .publish_vote(
            &transport,
            Some(signer.address()),
            Some(&signer),
            RoomId::new(1),
            SntAmount::from(1),
            VoteChoice::For,
        )
        .await;
    assert!(matches!(result, Err(WalletError::Transport(_))));
}

#[tokio::test]
async fn existing_signature_is_reused() {
    let signer = voter(1);
    let p = publisher();
    let first = p
        .build_vote_message(Some(signer.address()), Some(&signer), RoomId::new(4), SntAmount::from(9), VoteChoice::For, None)
        .await
        .unwrap()
        .unwrap();
    let signature = decode_vote(&first.payload).unwrap().signature;

    let replay = p
        .build_vote_message(
            Some(signer.address()),
            Some(&signer),
            RoomId::new(4),
            SntAmount::from(9),
            VoteChoice::For,
            Some(signature),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(signer.requests(), 1);
    assert_eq!(decode_vote(&replay.payload).unwrap().signature, signature);
}

#[tokio::test]
async fn feature_binds_one_instant_to_payload_and_envelope() {
    let transport = NullTransport::new();
    let signer = voter(7);
    let outcome = publisher()
        .publish_feature(
            &transport,
            Some(signer.address()),
            Some(&signer),
            SntAmount::from(500),
            COMMUNITY_KEY,
        )
        .await
        .unwrap();
    assert!(matches!(outcome, PublishOutcome::Published { .. }));

    let envelope = &transport.published()[0];
    assert_eq!(envelope.timestamp, Some(TimestampMs::new(NOW_MS)));
    let decoded = decode_feature(envelope).unwrap();
    assert_eq!(decoded.proposal_timestamp, decoded.transport_timestamp);

    let verified = receive_features(&transport, FEATURE_TOPIC, &Verifier::new(domain())).await;
    assert_eq!(verified.len(), 1);
    assert_eq!(verified[0].voter, signer.address());
    assert_eq!(verified[0].community_public_key, COMMUNITY_KEY);
}

#[tokio::test]
async fn restamped_feature_is_not_received() {
    let transport = NullTransport::new();
    let signer = voter(7);
    let mut envelope = publisher()
        .build_feature_message(Some(signer.address()), Some(&signer), SntAmount::from(500), COMMUNITY_KEY, None)
        .await
        .unwrap()
        .unwrap();
    envelope.timestamp = Some(TimestampMs::new(NOW_MS + 1));
    transport.enqueue(envelope);

    let verified = receive_features(&transport, FEATURE_TOPIC, &Verifier::new(domain())).await;
    assert!(verified.is_empty());
}

#[tokio::test]
async fn non_hex_community_key_is_caller_error() {
    let signer = voter(7);
    let result = publisher()
        .build_feature_message(Some(signer.address()), Some(&signer), SntAmount::from(1), "community", None)
        .await;
    assert!(matches!(result, Err(WalletError::TypedData(_))));
    assert_eq!(signer.requests(), 0);
}

#[tokio::test]
async fn unavailable_history_reads_as_empty() {
    let transport = NullTransport::new();
    let signer = voter(1);
    publisher()
        .publish_vote(
            &transport,
            Some(signer.address()),
            Some(&signer),
            RoomId::new(1),
            SntAmount::from(1),
            VoteChoice::For,
        )
        .await
        .unwrap();

    transport.set_history_failure(true);
    assert!(receive_votes(&transport, VOTE_BASE, RoomId::new(1)).await.is_empty());
    assert!(receive_features(&transport, FEATURE_TOPIC, &Verifier::new(domain()))
        .await
        .is_empty());
}

#[tokio::test]
async fn reused_feature_signature_keeps_its_instant() {
    let clock = Arc::new(NullClock::new(NOW_MS));
    let p = Publisher::new(TypedDataBuilder::new(domain()), VOTE_BASE, FEATURE_TOPIC)
        .with_clock(clock.clone());
    let signer = voter(7);

    let first = p
        .build_feature_message(Some(signer.address()), Some(&signer), SntAmount::from(500), COMMUNITY_KEY, None)
        .await
        .unwrap()
        .unwrap();
    let signed = decode_feature(&first).unwrap();

    clock.advance(1);
    let replay = p
        .build_feature_message(
            Some(signer.address()),
            Some(&signer),
            SntAmount::from(500),
            COMMUNITY_KEY,
            Some((signed.signature, signed.proposal_timestamp)),
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(signer.requests(), 1);
    assert_eq!(replay.timestamp, Some(TimestampMs::new(NOW_MS)));
    let decoded = decode_feature(&replay).unwrap();
    assert_eq!(Verifier::new(domain()).check_feature(&decoded), Ok(()));
}
