//! Test data builders for duty and order events
//!
//! Each builder returns the event together with the far endpoint of its
//! in-memory channel, so the test can play the worker or the submitter.

use std::sync::Arc;

use roster_core::{DispatchEvent, Speciality, StaffId};
use roster_infrastructure::MemoryChannel;

/// Builder for staff on-duty events
pub struct StaffBuilder {
    id: StaffId,
    specialities: Vec<Speciality>,
}

impl StaffBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: StaffId::from(id),
            specialities: vec![],
        }
    }

    pub fn with_speciality(mut self, tag: &str) -> Self {
        self.specialities.push(Speciality::from(tag));
        self
    }

    pub fn with_specialities(mut self, tags: &[&str]) -> Self {
        self.specialities
            .extend(tags.iter().map(|tag| Speciality::from(*tag)));
        self
    }

    /// Returns the on-duty event and the worker's side of the channel
    pub fn build(self) -> (DispatchEvent, MemoryChannel) {
        let (dispatcher_side, worker_side) = MemoryChannel::pair(self.id.as_str());
        let event = DispatchEvent::staff_on_duty(
            self.id,
            self.specialities,
            Arc::new(dispatcher_side),
        );
        (event, worker_side)
    }
}

/// Builder for order events
pub struct OrderBuilder {
    speciality: Speciality,
}

impl OrderBuilder {
    pub fn new(speciality: &str) -> Self {
        Self {
            speciality: Speciality::from(speciality),
        }
    }

    /// Returns the order event and the submitter's side of the channel
    pub fn build(self) -> (DispatchEvent, MemoryChannel) {
        let (dispatcher_side, submitter_side) =
            MemoryChannel::pair(format!("order-{}", self.speciality));
        let event = DispatchEvent::order(self.speciality, Arc::new(dispatcher_side));
        (event, submitter_side)
    }
}
