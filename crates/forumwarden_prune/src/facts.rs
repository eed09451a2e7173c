//! Owner facts consumed by the decision engine.

use derive_getters::Getters;
use forumwarden_core::UserId;
use std::collections::{HashMap, HashSet};

/// Membership and moderator facts for every owner in a decision input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerFacts {
    member_present: HashMap<UserId, bool>,
    moderators: HashSet<UserId>,
}

impl OwnerFacts {
    /// Facts from explicit tables.
    pub fn new(member_present: HashMap<UserId, bool>, moderators: HashSet<UserId>) -> Self {
        Self {
            member_present,
            moderators,
        }
    }

    /// Record whether an owner is still a member.
    pub fn set_present(&mut self, owner: UserId, present: bool) {
        self.member_present.insert(owner, present);
    }

    /// Record an owner as a moderator.
    pub fn add_moderator(&mut self, owner: UserId) {
        self.moderators.insert(owner);
    }

    /// Membership fact for `owner`; `None` when none was supplied.
    pub fn is_present(&self, owner: UserId) -> Option<bool> {
        self.member_present.get(&owner).copied()
    }

    /// Whether `owner` is a moderator.
    pub fn is_moderator(&self, owner: UserId) -> bool {
        self.moderators.contains(&owner)
    }
}

/// Facts gathered from the platform plus how many lookups fell back to a
/// default.
#[derive(Debug, Clone, Default, Getters)]
pub struct FactsResolution {
    /// Resolved facts.
    facts: OwnerFacts,
    /// Distinct owners looked up.
    owners_checked: usize,
    /// Lookups that failed and were defaulted to the non-destructive answer.
    lookup_failures: usize,
}

impl FactsResolution {
    pub(crate) fn new(facts: OwnerFacts, owners_checked: usize, lookup_failures: usize) -> Self {
        Self {
            facts,
            owners_checked,
            lookup_failures,
        }
    }
}
