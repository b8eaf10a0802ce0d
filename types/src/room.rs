//! Voting rooms, vote choices, and the packed on-chain room key.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// Identifier of one open voting period on one proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(u64);

impl RoomId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A voter's choice in a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Against,
    For,
}

impl VoteChoice {
    /// Numeric code packed into the room key (0 = against, 1 = for).
    pub fn code(&self) -> u8 {
        match self {
            Self::Against => 0,
            Self::For => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Against),
            1 => Some(Self::For),
            _ => None,
        }
    }

    /// Discriminator carried in the wire payload.
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            Self::Against => "no",
            Self::For => "yes",
        }
    }

    pub fn from_wire_str(raw: &str) -> Option<Self> {
        match raw {
            "no" => Some(Self::Against),
            "yes" => Some(Self::For),
            _ => None,
        }
    }
}

impl FromStr for VoteChoice {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yes" | "for" | "1" => Ok(Self::For),
            "no" | "against" | "0" => Ok(Self::Against),
            _ => Err(TypesError::UnknownVoteChoice(s.to_string())),
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

/// Room id and vote choice packed into one contract parameter:
/// `room * 2 + choice`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomKey(U256);

impl RoomKey {
    pub fn pack(room: RoomId, choice: VoteChoice) -> Self {
        Self(U256::from(room.get()) * U256::from(2u8) + U256::from(choice.code()))
    }

    /// Split the key back into its room and choice. Returns `None` when the
    /// room part does not fit in 64 bits.
    pub fn unpack(&self) -> Option<(RoomId, VoteChoice)> {
        let two = U256::from(2u8);
        let room: u64 = (self.0 / two).try_into().ok()?;
        let code: u8 = (self.0 % two).try_into().ok()?;
        Some((RoomId::new(room), VoteChoice::from_code(code)?))
    }

    pub fn raw(&self) -> U256 {
        self.0
    }
}

impl From<U256> for RoomKey {
    fn from(raw: U256) -> Self {
        Self(raw)
    }
}
