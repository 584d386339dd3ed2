//! Tunable rule constants.
//!
//! `Rules::default()` is the standard game. Drivers can load a partial
//! override from JSON; any field left out keeps its standard value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hard cap on the roster size
pub const MAX_PLAYERS: usize = 6;

/// Errors raised while loading or validating rules
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Invalid rules JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Player limit must be between 1 and {max}, got {0}", max = MAX_PLAYERS)]
    PlayerLimit(usize),

    #[error("Coup cost must be greater than zero")]
    FreeCoup,
}

/// Every coin amount and threshold used by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Maximum number of registered players
    pub max_players: usize,
    /// Coins each player starts with
    pub starting_coins: u32,
    /// Holding this many coins forces a coup
    pub forced_coup_threshold: u32,
    pub coup_cost: u32,
    pub gather_amount: u32,
    pub tax_amount: u32,
    pub governor_tax_amount: u32,
    pub bribe_cost: u32,
    pub sanction_cost: u32,
    /// Coins taken from an arrested player and paid to the arrester
    pub arrest_amount: u32,
    pub invest_cost: u32,
    pub invest_return: u32,
    pub block_coup_cost: u32,
    /// Coins a Governor removes when undoing a tax
    pub undo_amount: u32,
    /// A Merchant holding at least this many coins earns the turn bonus
    pub merchant_bonus_threshold: u32,
    pub merchant_bonus: u32,
    /// Coins a Merchant pays the bank when arrested
    pub merchant_arrest_penalty: u32,
    /// Extra coins charged to whoever sanctions a Judge
    pub judge_sanction_penalty: u32,
    pub baron_sanction_compensation: u32,
    pub general_arrest_refund: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_players: MAX_PLAYERS,
            starting_coins: 0,
            forced_coup_threshold: 10,
            coup_cost: 7,
            gather_amount: 1,
            tax_amount: 2,
            governor_tax_amount: 3,
            bribe_cost: 4,
            sanction_cost: 3,
            arrest_amount: 1,
            invest_cost: 3,
            invest_return: 6,
            block_coup_cost: 5,
            undo_amount: 2,
            merchant_bonus_threshold: 3,
            merchant_bonus: 1,
            merchant_arrest_penalty: 2,
            judge_sanction_penalty: 1,
            baron_sanction_compensation: 1,
            general_arrest_refund: 1,
        }
    }
}

impl Rules {
    /// Parse rules from JSON, filling missing fields with the standard values
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        let rules: Rules = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Reject rule sets the engine cannot run
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.max_players == 0 || self.max_players > MAX_PLAYERS {
            return Err(RulesError::PlayerLimit(self.max_players));
        }
        if self.coup_cost == 0 {
            return Err(RulesError::FreeCoup);
        }
        Ok(())
    }
}
