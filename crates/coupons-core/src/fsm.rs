// Rust guideline compliant 2026-10-18

//! Finite State Machine module for status transitions.
//!
//! This module validates lifecycle events against the stored status of a
//! discount code. The FSM enforces the following transitions:
//!
//! - Active → Used (mark used, no guard)
//! - Active → Expired (system-detected, only once the expiry date has passed)
//! - Used → Active (restore, only while the expiry date has not passed)
//! - Expired is terminal
//!
//! Deletion and edits are not transitions and are always allowed.

use crate::{DiscountCode, Error, Result, Status};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle events that move a code between stored states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// User redeemed the code.
    MarkUsed,
    /// User undoes a previous mark-used.
    Restore,
    /// Reconciliation detected that the expiry date has passed.
    Expire,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Event::MarkUsed => "mark_used",
            Event::Restore => "restore",
            Event::Expire => "expire",
        };
        f.write_str(name)
    }
}

impl Status {
    /// Computes the status reached by applying `event`.
    ///
    /// # Arguments
    ///
    /// * `event` - The lifecycle event
    /// * `expiry_date` - Expiry date of the record
    /// * `today` - The current calendar date
    ///
    /// # Returns
    ///
    /// The target status if the transition is allowed.
    ///
    /// # Errors
    ///
    /// Returns `GuardViolation` if:
    /// - The event is not valid from the current status
    /// - Restoring a code whose expiry date has passed
    /// - Expiring a code whose expiry date has not passed
    pub fn apply(&self, event: Event, expiry_date: NaiveDate, today: NaiveDate) -> Result<Status> {
        match (self, event) {
            (Status::Active, Event::MarkUsed) => Ok(Status::Used),
            (Status::Active, Event::Expire) => {
                if expiry_date < today {
                    Ok(Status::Expired)
                } else {
                    Err(Error::GuardViolation(format!(
                        "Code is valid until {}, it cannot expire yet",
                        expiry_date
                    )))
                }
            }
            (Status::Used, Event::Restore) => {
                if expiry_date >= today {
                    Ok(Status::Active)
                } else {
                    Err(Error::GuardViolation(format!(
                        "Restore of expired code (expired on {})",
                        expiry_date
                    )))
                }
            }
            (Status::Expired, _) => Err(Error::GuardViolation(
                "Expired codes cannot change status".to_string(),
            )),
            (Status::Used, Event::MarkUsed) => Err(Error::GuardViolation(
                "Code is already marked as used".to_string(),
            )),
            (Status::Active, Event::Restore) => Err(Error::GuardViolation(
                "Only used codes can be restored".to_string(),
            )),
            (Status::Used, Event::Expire) => Err(Error::GuardViolation(
                "Used codes never expire".to_string(),
            )),
        }
    }

    /// Returns the events accepted from the current status.
    ///
    /// # Arguments
    ///
    /// * `expiry_date` - Expiry date of the record
    /// * `today` - The current calendar date
    ///
    /// # Returns
    ///
    /// Vector of events that `apply` would accept.
    pub fn valid_events(&self, expiry_date: NaiveDate, today: NaiveDate) -> Vec<Event> {
        [Event::MarkUsed, Event::Restore, Event::Expire]
            .into_iter()
            .filter(|event| self.apply(*event, expiry_date, today).is_ok())
            .collect()
    }
}

/// Validates an event against a record and returns the target status.
///
/// # Errors
///
/// Returns `GuardViolation` if the event is rejected.
pub fn transition(code: &DiscountCode, event: Event, today: NaiveDate) -> Result<Status> {
    code.status.apply(event, code.expiry_date, today)
}
