use serde::{Deserialize, Serialize};

use stockroom_core::RegistryId;

/// Envelope for an event, carrying the registry it came from and its position
/// in that registry's change stream.
///
/// `sequence_number` starts at 1 and increases by one per published event, so a
/// subscriber can detect gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    registry_id: RegistryId,
    sequence_number: u64,
    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(registry_id: RegistryId, sequence_number: u64, payload: E) -> Self {
        Self {
            registry_id,
            sequence_number,
            payload,
        }
    }

    pub fn registry_id(&self) -> RegistryId {
        self.registry_id
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }
}
