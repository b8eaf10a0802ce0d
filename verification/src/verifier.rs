//! Signer recovery and per-message verification.

use dirvote_types::{Address, FeatureProposalMessage, Signature, VoteMessage};
use dirvote_typed_data::{TypedDataBuilder, TypedPayload, VotingDomain};

use crate::error::VerificationFailure;

/// Recover the address that signed `payload`.
///
/// Returns `None` for a malformed signature. A well-formed signature over
/// different data recovers some other address, so callers always compare.
pub fn recover_signer(payload: &TypedPayload, signature: &Signature) -> Option<Address> {
    dirvote_crypto::recover_signer(&payload.signing_hash(), signature).ok()
}

/// Verifies messages of either kind against one voting domain.
///
/// The typed-data constructor is picked by message kind at each call site,
/// so the comparison logic is shared and kind-agnostic.
#[derive(Clone, Debug, Default)]
pub struct Verifier {
    typed_data: TypedDataBuilder,
}

impl Verifier {
    pub fn new(domain: VotingDomain) -> Self {
        Self {
            typed_data: TypedDataBuilder::new(domain),
        }
    }

    pub fn typed_data(&self) -> &TypedDataBuilder {
        &self.typed_data
    }

    fn check_signer(
        payload: &TypedPayload,
        signature: &Signature,
        claimed: Address,
    ) -> Result<(), VerificationFailure> {
        let recovered =
            recover_signer(payload, signature).ok_or(VerificationFailure::UnrecoverableSignature)?;
        if recovered != claimed {
            return Err(VerificationFailure::SignerMismatch { claimed, recovered });
        }
        Ok(())
    }

    /// Check that `msg` was signed by its claimed signer for exactly its
    /// room, choice and amount.
    pub fn check_vote(&self, msg: &VoteMessage) -> Result<(), VerificationFailure> {
        let payload = self.typed_data.for_vote_message(msg);
        Self::check_signer(&payload, &msg.signature, msg.signer)
    }

    pub fn verify_vote(&self, msg: &VoteMessage) -> bool {
        self.check_vote(msg).is_ok()
    }

    /// Check a feature proposal: the envelope timestamp must equal the signed
    /// timestamp to the millisecond, and the signer must be the claimed
    /// voter. Either failure rejects the message.
    pub fn check_feature(&self, msg: &FeatureProposalMessage) -> Result<(), VerificationFailure> {
        if msg.transport_timestamp != msg.proposal_timestamp {
            return Err(VerificationFailure::TimestampMismatch {
                signed: msg.proposal_timestamp,
                transport: msg.transport_timestamp,
            });
        }
        let payload = self
            .typed_data
            .for_feature_message(msg)
            .map_err(|e| VerificationFailure::TypedData(e.to_string()))?;
        Self::check_signer(&payload, &msg.signature, msg.voter)
    }

    pub fn verify_feature(&self, msg: &FeatureProposalMessage) -> bool {
        self.check_feature(msg).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirvote_crypto::{sign_digest, PrivateKey};
    use dirvote_types::{RoomId, RoomKey, SntAmount, TimestampMs, VoteChoice, B256};

    const COMMUNITY_KEY: &str = "0x0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    fn verifier() -> Verifier {
        Verifier::new(VotingDomain::new(1, Address::repeat_byte(0x42)))
    }

    fn signed_vote(key: &PrivateKey, room: u64, choice: VoteChoice, amount: u64) -> VoteMessage {
        let payload = verifier().typed_data().vote(
            key.address(),
            RoomKey::pack(RoomId::new(room), choice),
            SntAmount::from(amount),
        );
        VoteMessage {
            signer: key.address(),
            session_id: RoomId::new(room),
            choice,
            amount: SntAmount::from(amount),
            nonce: VoteMessage::CURRENT_NONCE,
            signature: sign_digest(&payload.signing_hash(), key),
        }
    }

    fn signed_feature(key: &PrivateKey, ts: u64) -> FeatureProposalMessage {
        let digest = verifier()
            .typed_data()
            .feature(key.address(), SntAmount::from(500), COMMUNITY_KEY, TimestampMs::new(ts))
            .unwrap();
        FeatureProposalMessage {
            voter: key.address(),
            amount: SntAmount::from(500),
            community_public_key: COMMUNITY_KEY.into(),
            proposal_timestamp: TimestampMs::new(ts),
            transport_timestamp: TimestampMs::new(ts),
            signature: sign_digest(&digest.signing_hash(), key),
        }
    }

    fn key(seed: u8) -> PrivateKey {
        PrivateKey::from_bytes([seed; 32]).unwrap()
    }

    #[test]
    fn valid_vote_verifies() {
        let msg = signed_vote(&key(1), 3, VoteChoice::For, 1000);
        assert_eq!(verifier().check_vote(&msg), Ok(()));
        assert!(verifier().verify_vote(&msg));
    }

    #[test]
    fn verification_is_idempotent() {
        let msg = signed_vote(&key(1), 3, VoteChoice::For, 1000);
        let v = verifier();
        assert!((0..5).all(|_| v.verify_vote(&msg)));
    }

    #[test]
    fn tampered_vote_fields_fail() {
        let original = signed_vote(&key(1), 3, VoteChoice::For, 1000);

        let mut msg = original.clone();
        msg.amount = SntAmount::from(1001);
        assert!(matches!(verifier().check_vote(&msg), Err(VerificationFailure::SignerMismatch { .. })));

        let mut msg = original.clone();
        msg.session_id = RoomId::new(4);
        assert!(!verifier().verify_vote(&msg));

        let mut msg = original.clone();
        msg.choice = VoteChoice::Against;
        assert!(!verifier().verify_vote(&msg));

        let mut msg = original;
        msg.signer = key(2).address();
        assert!(!verifier().verify_vote(&msg));
    }

    #[test]
    fn nonce_is_not_part_of_the_signature() {
        let mut msg = signed_vote(&key(1), 3, VoteChoice::For, 1000);
        msg.nonce = 99;
        assert!(verifier().verify_vote(&msg));
    }

    #[test]
    fn vote_from_other_domain_fails() {
        let msg = signed_vote(&key(1), 3, VoteChoice::For, 1000);
        let other = Verifier::new(VotingDomain::new(5, Address::repeat_byte(0x42)));
        assert!(!other.verify_vote(&msg));
    }

    #[test]
    fn malformed_signature_is_rejected_not_panicking() {
        let mut msg = signed_vote(&key(1), 3, VoteChoice::For, 1000);
        msg.signature = Signature::from_parts(B256::ZERO, B256::ZERO, false);
        assert_eq!(
            verifier().check_vote(&msg),
            Err(VerificationFailure::UnrecoverableSignature)
        );
    }

    #[test]
    fn valid_feature_verifies() {
        let msg = signed_feature(&key(3), 1_650_000_000_000);
        assert_eq!(verifier().check_feature(&msg), Ok(()));
    }

    #[test]
    fn feature_timestamp_off_by_one_ms_rejected() {
        let mut msg = signed_feature(&key(3), 1_650_000_000_000);
        msg.transport_timestamp = TimestampMs::new(1_650_000_000_001);
        assert!(matches!(
            verifier().check_feature(&msg),
            Err(VerificationFailure::TimestampMismatch { .. })
        ));
    }

    #[test]
    fn feature_with_both_timestamps_shifted_rejected() {
        let mut msg = signed_feature(&key(3), 1_650_000_000_000);
        msg.proposal_timestamp = TimestampMs::new(1_650_000_000_001);
        msg.transport_timestamp = TimestampMs::new(1_650_000_000_001);
        assert!(matches!(
            verifier().check_feature(&msg),
            Err(VerificationFailure::SignerMismatch { .. })
        ));
    }

    #[test]
    fn feature_tampered_amount_or_key_rejected() {
        let mut msg = signed_feature(&key(3), 1_650_000_000_000);
        msg.amount = SntAmount::from(501);
        assert!(!verifier().verify_feature(&msg));

        let mut msg = signed_feature(&key(3), 1_650_000_000_000);
        msg.community_public_key = "0x02".into();
        assert!(!verifier().verify_feature(&msg));

        let mut msg = signed_feature(&key(3), 1_650_000_000_000);
        msg.community_public_key = "not hex".into();
        assert!(matches!(
            verifier().check_feature(&msg),
            Err(VerificationFailure::TypedData(_))
        ));
    }

    #[test]
    fn recover_signer_returns_signing_address() {
        let k = key(7);
        let payload = TypedPayload::Vote(verifier().typed_data().vote(
            k.address(),
            RoomKey::pack(RoomId::new(1), VoteChoice::Against),
            SntAmount::from(1),
        ));
        let sig = sign_digest(&payload.signing_hash(), &k);
        assert_eq!(recover_signer(&payload, &sig), Some(k.address()));
    }
}
