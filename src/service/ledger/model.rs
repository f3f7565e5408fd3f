use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity(pub u64);

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub identity: UserIdentity,
    pub purchase_count: u32,
    pub first_purchase_at: Option<DateTime<Utc>>,
    pub last_purchase_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    pub fn new(identity: UserIdentity) -> Self {
        Self {
            identity,
            purchase_count: 0,
            first_purchase_at: None,
            last_purchase_at: None,
        }
    }

    /// First and last timestamps only ever widen the purchase window.
    pub fn with_purchase_at(mut self, at: DateTime<Utc>) -> Self {
        self.purchase_count = self.purchase_count.saturating_add(1);
        self.first_purchase_at = Some(self.first_purchase_at.map_or(at, |first| first.min(at)));
        self.last_purchase_at = Some(self.last_purchase_at.map_or(at, |last| last.max(at)));
        self
    }

    pub fn tier(&self) -> UserTier {
        UserTier::from_purchase_count(self.purchase_count)
    }
}

/// Loyalty classification derived from the purchase count; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Ord, PartialOrd)]
pub enum UserTier {
    New = 1,
    Regular = 2,
    Vip = 3,
}

impl UserTier {
    pub fn from_purchase_count(count: u32) -> Self {
        match count {
            0..=2 => UserTier::New,
            3..=9 => UserTier::Regular,
            _ => UserTier::Vip,
        }
    }
}
