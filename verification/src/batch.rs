//! What the aggregated batch is used for: calldata for the voting
//! contract's `castVotes` and the pending totals shown before submission.

use std::collections::BTreeMap;

use dirvote_crypto::keccak256;
use dirvote_types::{RoomId, SntAmount, VerifiedVote, VoteChoice, U256};
use serde::Serialize;

pub const CAST_VOTES_SIGNATURE: &str = "castVotes((address,uint256,uint256,bytes32,bytes32)[])";

const WORDS_PER_VOTE: usize = 5;

fn word(value: U256) -> [u8; 32] {
    value.to_be_bytes::<32>()
}

/// ABI-encode a `castVotes` call for `votes`, in order.
///
/// Layout: selector, offset to the array (0x20), array length, then five
/// static words per tuple.
pub fn encode_cast_votes(votes: &[VerifiedVote]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + 64 + votes.len() * WORDS_PER_VOTE * 32);
    out.extend_from_slice(&keccak256(CAST_VOTES_SIGNATURE.as_bytes())[..4]);
    out.extend_from_slice(&word(U256::from(0x20)));
    out.extend_from_slice(&word(U256::from(votes.len())));
    for vote in votes {
        let mut voter = [0u8; 32];
        voter[12..].copy_from_slice(vote.voter.as_slice());
        out.extend_from_slice(&voter);
        out.extend_from_slice(&word(vote.room_id_and_type.raw()));
        out.extend_from_slice(&word(vote.snt_amount.raw()));
        out.extend_from_slice(vote.r.as_slice());
        out.extend_from_slice(vote.vs.as_slice());
    }
    out
}

/// Pending, not-yet-submitted totals for one room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PendingTally {
    pub votes_for: usize,
    pub votes_against: usize,
    pub amount_for: SntAmount,
    pub amount_against: SntAmount,
}

impl PendingTally {
    fn add(&mut self, choice: VoteChoice, amount: SntAmount) {
        match choice {
            VoteChoice::For => {
                self.votes_for += 1;
                self.amount_for = self.amount_for.saturating_add(amount);
            }
            VoteChoice::Against => {
                self.votes_against += 1;
                self.amount_against = self.amount_against.saturating_add(amount);
            }
        }
    }
}

/// Sum an aggregated batch per room. Rows whose key does not unpack to a
/// known choice are skipped.
pub fn tally(votes: &[VerifiedVote]) -> BTreeMap<RoomId, PendingTally> {
    let mut rooms: BTreeMap<RoomId, PendingTally> = BTreeMap::new();
    for vote in votes {
        if let Some((room, choice)) = vote.room_id_and_type.unpack() {
            rooms.entry(room).or_default().add(choice, vote.snt_amount);
        }
    }
    rooms
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirvote_types::{Address, RoomKey, B256};

    fn row(voter: u8, room: u64, choice: VoteChoice, amount: u64) -> VerifiedVote {
        VerifiedVote {
            voter: Address::repeat_byte(voter),
            room_id_and_type: RoomKey::pack(RoomId::new(room), choice),
            snt_amount: SntAmount::from(amount),
            r: B256::repeat_byte(0x11),
            vs: B256::repeat_byte(0x22),
        }
    }

    #[test]
    fn empty_batch_is_selector_offset_and_zero_length() {
        let data = encode_cast_votes(&[]);
        assert_eq!(data.len(), 4 + 64);
        assert_eq!(&data[..4], &keccak256(CAST_VOTES_SIGNATURE.as_bytes())[..4]);
        assert_eq!(data[4 + 31], 0x20);
        assert!(data[4 + 32..].iter().all(|b| *b == 0));
    }

    #[test]
    fn rows_are_five_words_in_order() {
        let votes = [row(0xAA, 3, VoteChoice::For, 1000), row(0xBB, 3, VoteChoice::Against, 5)];
        let data = encode_cast_votes(&votes);
        assert_eq!(data.len(), 4 + 64 + 2 * 5 * 32);
        assert_eq!(data[4 + 63], 2);

        let first = &data[4 + 64..4 + 64 + 160];
        assert!(first[..12].iter().all(|b| *b == 0));
        assert_eq!(&first[12..32], &[0xAA; 20]);
        assert_eq!(first[63], 7);
        assert_eq!(u16::from_be_bytes([first[94], first[95]]), 1000);
        assert_eq!(&first[96..128], &[0x11; 32]);
        assert_eq!(&first[128..160], &[0x22; 32]);

        let second = &data[4 + 64 + 160..];
        assert_eq!(&second[12..32], &[0xBB; 20]);
        assert_eq!(second[63], 6);
    }

    #[test]
    fn tally_sums_per_room_and_side() {
        let votes = [
            row(1, 3, VoteChoice::For, 1000),
            row(2, 3, VoteChoice::For, 500),
            row(3, 3, VoteChoice::Against, 20),
            row(4, 9, VoteChoice::Against, 1),
        ];
        let rooms = tally(&votes);
        assert_eq!(rooms.len(), 2);

        let room3 = rooms[&RoomId::new(3)];
        assert_eq!(room3.votes_for, 2);
        assert_eq!(room3.amount_for, SntAmount::from(1500));
        assert_eq!(room3.votes_against, 1);
        assert_eq!(room3.amount_against, SntAmount::from(20));

        let room9 = rooms[&RoomId::new(9)];
        assert_eq!(room9.votes_for, 0);
        assert_eq!(room9.amount_against, SntAmount::from(1));
    }
}
