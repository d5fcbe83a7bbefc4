//! The module contains the `Member` type, a participant of the mess.

use serde::{Deserialize, Serialize};

use crate::Money;

/// Identifier of a [`Member`]. Assigned as `max + 1`, never reused for a gap.
pub type MemberId = u32;

/// A member of the mess.
///
/// Counters are cumulative for the current period: meals eaten, rice and egg
/// units taken on top of the shared menu, and money paid into the mess fund.
///
/// The serialized form is a flat record with camelCase keys, e.g.
/// `{"id":1,"name":"Member 1","meals":0,"riceCount":0,"eggCount":0,"payments":0.0,"isActive":true}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub meals: u32,
    pub rice_count: u32,
    pub egg_count: u32,
    pub payments: Money,
    /// Inactive members are left out of the meal/rice/egg totals used for the
    /// meal rate, but their payments still count.
    pub is_active: bool,
}

impl Member {
    /// A fresh, active member with every counter at zero.
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            meals: 0,
            rice_count: 0,
            egg_count: 0,
            payments: Money::ZERO,
            is_active: true,
        }
    }

    /// Value of the given counter.
    #[must_use]
    pub fn count(&self, counter: Counter) -> u32 {
        match counter {
            Counter::Meals => self.meals,
            Counter::Rice => self.rice_count,
            Counter::Eggs => self.egg_count,
        }
    }

    pub(crate) fn count_mut(&mut self, counter: Counter) -> &mut u32 {
        match counter {
            Counter::Meals => &mut self.meals,
            Counter::Rice => &mut self.rice_count,
            Counter::Eggs => &mut self.egg_count,
        }
    }
}

/// The per-member counters that can be incremented or overwritten.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Counter {
    Meals,
    Rice,
    Eggs,
}

impl Counter {
    pub const ALL: [Counter; 3] = [Counter::Meals, Counter::Rice, Counter::Eggs];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Counter::Meals => "Meals",
            Counter::Rice => "Rice",
            Counter::Eggs => "Eggs",
        }
    }
}

impl core::fmt::Display for Counter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// The five placeholder members used when no snapshot has been saved yet.
pub(crate) fn seed_members() -> Vec<Member> {
    (1..=5)
        .map(|id| Member::new(id, format!("Member {id}")))
        .collect()
}
