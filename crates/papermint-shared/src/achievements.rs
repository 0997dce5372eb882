//! Achievement definitions and evaluation.
//!
//! Achievements are derived read-only from the user's stats and transaction
//! log; nothing about them is persisted separately.

use serde::Serialize;

use crate::models::{Transaction, TransactionKind, User};

/// A badge the user can unlock.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Human-readable requirement shown while locked.
    pub requirement: &'static str,
}

/// An achievement together with its unlocked state for one user.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AchievementStatus {
    pub achievement: Achievement,
    pub unlocked: bool,
}

pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "first-tool",
        name: "First Steps",
        description: "Used your first PDF tool",
        requirement: "Use 1 tool",
    },
    Achievement {
        id: "coin-collector",
        name: "Coin Collector",
        description: "Earned your first 10 coins",
        requirement: "Earn 10 coins",
    },
    Achievement {
        id: "power-user",
        name: "Power User",
        description: "Used 5 different tools",
        requirement: "Use 5 tools",
    },
    Achievement {
        id: "coin-master",
        name: "Coin Master",
        description: "Earned 100 coins",
        requirement: "Earn 100 coins",
    },
    Achievement {
        id: "daily-user",
        name: "Daily User",
        description: "Used tools for 7 days",
        requirement: "Use tools for 7 days",
    },
    Achievement {
        id: "redeemer",
        name: "First Redemption",
        description: "Redeemed your first reward",
        requirement: "Redeem 1 reward",
    },
];

/// Evaluate every achievement for `user` against their transaction log.
///
/// `power-user` unlocks at 5 tool *uses*, matching the stat it reads;
/// `daily-user` has no usage-day tracking behind it and never unlocks.
pub fn evaluate(user: &User, transactions: &[Transaction]) -> Vec<AchievementStatus> {
    ACHIEVEMENTS
        .iter()
        .map(|achievement| {
            let unlocked = match achievement.id {
                "first-tool" => user.tools_used >= 1,
                "coin-collector" => user.total_earnings >= 10,
                "power-user" => user.tools_used >= 5,
                "coin-master" => user.total_earnings >= 100,
                "daily-user" => false,
                "redeemer" => transactions
                    .iter()
                    .any(|tx| tx.kind == TransactionKind::Spent),
                _ => false,
            };
            AchievementStatus {
                achievement: *achievement,
                unlocked,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TransactionId, UserId};
    use chrono::Utc;

    fn user(total_earnings: u64, tools_used: u64) -> User {
        User {
            id: UserId::new(),
            name: "test".to_string(),
            email: "test@example.com".to_string(),
            avatar_url: String::new(),
            joined_at: Utc::now(),
            total_earnings,
            tools_used,
        }
    }

    fn unlocked(statuses: &[AchievementStatus], id: &str) -> bool {
        statuses
            .iter()
            .find(|s| s.achievement.id == id)
            .expect("known achievement id")
            .unlocked
    }

    #[test]
    fn test_fresh_user_has_nothing_unlocked() {
        let statuses = evaluate(&user(0, 0), &[]);
        assert!(statuses.iter().all(|s| !s.unlocked));
    }

    #[test]
    fn test_usage_thresholds() {
        let statuses = evaluate(&user(12, 1), &[]);
        assert!(unlocked(&statuses, "first-tool"));
        assert!(unlocked(&statuses, "coin-collector"));
        assert!(!unlocked(&statuses, "power-user"));
        assert!(!unlocked(&statuses, "coin-master"));

        let statuses = evaluate(&user(100, 5), &[]);
        assert!(unlocked(&statuses, "power-user"));
        assert!(unlocked(&statuses, "coin-master"));
    }

    #[test]
    fn test_redeemer_needs_a_spend() {
        let earn = Transaction {
            id: TransactionId(1),
            kind: TransactionKind::Earned,
            amount: 5,
            description: "Used Merge PDF".to_string(),
            timestamp: Utc::now(),
        };
        let statuses = evaluate(&user(5, 1), &[earn.clone()]);
        assert!(!unlocked(&statuses, "redeemer"));

        let spend = Transaction {
            id: TransactionId(2),
            kind: TransactionKind::Spent,
            amount: 5,
            description: "Redeemed UPI Cash (₹50)".to_string(),
            timestamp: Utc::now(),
        };
        let statuses = evaluate(&user(5, 1), &[spend, earn]);
        assert!(unlocked(&statuses, "redeemer"));
    }

    #[test]
    fn test_daily_user_never_unlocks() {
        let statuses = evaluate(&user(10_000, 10_000), &[]);
        assert!(!unlocked(&statuses, "daily-user"));
    }
}
