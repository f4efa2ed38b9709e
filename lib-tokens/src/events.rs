//! Contract event log
//!
//! An ordered, append-only log. Events are appended in the same step that
//! commits the state change they describe, so a failed operation leaves no
//! trace here. Consumers keep the sequence number of the last record they
//! processed and resume from it with [`EventLog::events_since`]; replaying a
//! record must be harmless on their side.

use serde::{Deserialize, Serialize};
use std::fmt;

use lib_types::{Address, Amount, TokenId};

use crate::errors::{IssuanceError, IssuanceResult};

/// Notifications emitted by the issuance contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssuerEvent {
    /// Ownership change. `from` is zero on issuance, `to` is zero on burn.
    Transfer {
        from: Address,
        to: Address,
        id: TokenId,
    },

    /// Identifier explicitly revoked by the principal
    IdentifierRevoked { id: TokenId },

    /// Floor moved up; every identifier below it is now unavailable
    FloorRaised { new_floor: u64 },

    /// Plain value transfer into custody
    ValueReceived { from: Address, amount: Amount },

    /// Custody balance paid out to the principal
    ValueWithdrawn { to: Address, amount: Amount },
}

impl fmt::Display for IssuerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssuerEvent::Transfer { from, to, id } => {
                write!(f, "Transfer({} {} -> {})", id, from, to)
            }
            IssuerEvent::IdentifierRevoked { id } => write!(f, "IdentifierRevoked({})", id),
            IssuerEvent::FloorRaised { new_floor } => write!(f, "FloorRaised({})", new_floor),
            IssuerEvent::ValueReceived { amount, .. } => write!(f, "ValueReceived({})", amount),
            IssuerEvent::ValueWithdrawn { amount, .. } => write!(f, "ValueWithdrawn({})", amount),
        }
    }
}

/// One entry in the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the contract's total order, starting at 1
    pub seq: u64,
    pub event: IssuerEvent,
}

#[derive(Debug, Clone, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from persisted records. Sequence numbers must start at 1
    /// and increase by one.
    pub(crate) fn from_records(records: Vec<EventRecord>) -> IssuanceResult<Self> {
        for (index, record) in records.iter().enumerate() {
            if record.seq != index as u64 + 1 {
                return Err(IssuanceError::InvariantViolated(format!(
                    "event sequence gap at position {}: found {}",
                    index, record.seq
                )));
            }
        }
        Ok(Self { records })
    }

    /// Append an event and return its sequence number
    pub(crate) fn append(&mut self, event: IssuerEvent) -> u64 {
        let seq = self.last_seq() + 1;
        self.records.push(EventRecord { seq, event });
        seq
    }

    /// Sequence number of the newest record, 0 when empty
    pub fn last_seq(&self) -> u64 {
        self.records.last().map(|r| r.seq).unwrap_or(0)
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Records with `seq > cursor`. Cursor 0 returns the whole log.
    pub fn events_since(&self, cursor: u64) -> &[EventRecord] {
        let start = self.records.partition_point(|r| r.seq <= cursor);
        &self.records[start..]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbers_are_dense() {
        let mut log = EventLog::new();
        assert_eq!(log.append(IssuerEvent::FloorRaised { new_floor: 1 }), 1);
        assert_eq!(log.append(IssuerEvent::FloorRaised { new_floor: 2 }), 2);
        assert_eq!(log.last_seq(), 2);
    }

    #[test]
    fn test_events_since_resumes_after_cursor() {
        let mut log = EventLog::new();
        for n in 1..=5 {
            log.append(IssuerEvent::IdentifierRevoked { id: TokenId::new(n) });
        }

        assert_eq!(log.events_since(0).len(), 5);
        let tail = log.events_since(3);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].seq, 4);
        assert!(log.events_since(5).is_empty());
        assert!(log.events_since(99).is_empty());
    }

    #[test]
    fn test_event_json_shape() {
        let record = EventRecord {
            seq: 1,
            event: IssuerEvent::ValueReceived {
                from: Address::new([1u8; 20]),
                amount: 10,
            },
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"ValueReceived\""));
        assert!(json.contains("\"amount\":10"));
        let back: EventRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_from_records_rejects_gaps() {
        let records = vec![
            EventRecord { seq: 1, event: IssuerEvent::FloorRaised { new_floor: 1 } },
            EventRecord { seq: 3, event: IssuerEvent::FloorRaised { new_floor: 2 } },
        ];
        assert!(matches!(
            EventLog::from_records(records),
            Err(IssuanceError::InvariantViolated(_))
        ));
    }
}
