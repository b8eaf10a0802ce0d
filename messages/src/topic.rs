//! Content-topic naming.
//!
//! Vote topics are the configured base topic with the room number appended,
//! with no delimiter. Deployments must pick a base topic and room numbering
//! where no topic is a prefix-ambiguous match for another at the consumer.

use dirvote_types::RoomId;

/// Topic votes for `room` are published on.
pub fn vote_topic(base_topic: &str, room: RoomId) -> String {
    format!("{base_topic}{room}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_concatenation() {
        assert_eq!(vote_topic("/dirvote/1/vote-room-", RoomId::new(3)), "/dirvote/1/vote-room-3");
        assert_eq!(vote_topic("", RoomId::new(12)), "12");
    }
}
