//! Read-only catalog listings for the tool grid and the rewards shelf.

use serde::Serialize;

use papermint_shared::catalog::{Reward, Tool, ToolCategory, REWARDS, TOOLS};

use crate::error::Result;
use crate::state::App;

/// One tool as shown in the grid.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDto {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: ToolCategory,
    pub coins: u64,
}

impl From<&Tool> for ToolDto {
    fn from(tool: &Tool) -> Self {
        Self {
            id: tool.id,
            name: tool.name,
            description: tool.description,
            category: tool.category,
            coins: tool.coins,
        }
    }
}

/// One reward as shown on the shelf, with affordability resolved against
/// the signed-in user's balance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardDto {
    pub id: &'static str,
    pub name: &'static str,
    pub value: &'static str,
    pub coins: u64,
    pub description: &'static str,
    pub affordable: bool,
}

impl RewardDto {
    pub(crate) fn resolve(reward: &Reward, balance: u64) -> Self {
        Self {
            id: reward.id,
            name: reward.name,
            value: reward.value,
            coins: reward.coins,
            description: reward.description,
            affordable: balance >= reward.coins,
        }
    }
}

/// The full tool catalog, catalog order preserved.
pub fn list_tools() -> Vec<ToolDto> {
    TOOLS.iter().map(ToolDto::from).collect()
}

/// Tools in one category, catalog order preserved.
pub fn list_tools_in_category(category: ToolCategory) -> Vec<ToolDto> {
    papermint_shared::catalog::tools_in_category(category)
        .map(ToolDto::from)
        .collect()
}

/// The reward catalog with affordability against the current balance.
/// Signed-out users see everything as unaffordable.
pub fn list_rewards(app: &App) -> Result<Vec<RewardDto>> {
    let guard = app.lock_state()?;
    let balance = guard.ledger.balance();
    Ok(REWARDS
        .iter()
        .map(|reward| RewardDto::resolve(reward, balance))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_listing_covers_catalog() {
        let tools = list_tools();
        assert_eq!(tools.len(), TOOLS.len());
        assert_eq!(tools[0].id, TOOLS[0].id);
    }

    #[test]
    fn test_category_listing_is_filtered() {
        for tool in list_tools_in_category(ToolCategory::Security) {
            assert!(matches!(tool.category, ToolCategory::Security));
        }
    }

    #[test]
    fn test_reward_affordability() {
        let reward = &REWARDS[0];
        assert!(!RewardDto::resolve(reward, reward.coins - 1).affordable);
        assert!(RewardDto::resolve(reward, reward.coins).affordable);
    }
}
