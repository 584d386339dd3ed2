//! Player state and coin management.
//!
//! This module contains:
//! - Player struct with coins, role and per-turn flags
//! - Role reactions to being arrested or sanctioned
//!
//! Players never touch the turn order themselves; the [`Game`](crate::Game)
//! owns every player and calls into them.

use crate::actions::{ActionTag, GameEvent};
use crate::game::GameError;
use crate::role::Role;
use crate::rules::Rules;

/// Player identifier: index into the game's player arena (0-5)
pub type PlayerId = u8;

/// A single player's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    role: Role,
    coins: u32,
    active: bool,
    /// Gather and tax are blocked until this player's turn ends
    under_sanction: bool,
    /// Arrested since this player's last turn ended
    was_arrested: bool,
    /// A Spy stopped this player from arresting
    arrest_block: bool,
    /// Next end of turn grants an extra action instead of advancing
    used_bribe: bool,
    /// A General protected this player from the pending coup
    coup_blocked: bool,
    last_action: Option<ActionTag>,
    last_arrest_target: Option<PlayerId>,
}

impl Player {
    /// Create a new player
    pub fn new(id: PlayerId, name: String, role: Role, coins: u32) -> Self {
        Self {
            id,
            name,
            role,
            coins,
            active: true,
            under_sanction: false,
            was_arrested: false,
            arrest_block: false,
            used_bribe: false,
            coup_blocked: false,
            last_action: None,
            last_arrest_target: None,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    /// False once the player has been eliminated
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_under_sanction(&self) -> bool {
        self.under_sanction
    }

    pub fn was_arrested(&self) -> bool {
        self.was_arrested
    }

    pub fn is_arrest_blocked(&self) -> bool {
        self.arrest_block
    }

    pub fn has_used_bribe(&self) -> bool {
        self.used_bribe
    }

    pub fn is_coup_blocked(&self) -> bool {
        self.coup_blocked
    }

    pub fn last_action(&self) -> Option<ActionTag> {
        self.last_action
    }

    pub fn last_arrest_target(&self) -> Option<PlayerId> {
        self.last_arrest_target
    }

    /// Check if the player holds at least `amount` coins
    pub fn can_afford(&self, amount: u32) -> bool {
        self.coins >= amount
    }

    pub(crate) fn add_coins(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Debit coins, leaving the balance untouched if it is too small
    pub(crate) fn remove_coins(&mut self, amount: u32) -> Result<(), GameError> {
        if !self.can_afford(amount) {
            return Err(GameError::NotEnoughCoins {
                needed: amount,
                available: self.coins,
            });
        }
        self.coins -= amount;
        Ok(())
    }

    /// Coins this player collects when taxing
    pub fn tax_amount(&self, rules: &Rules) -> u32 {
        match self.role {
            Role::Governor => rules.governor_tax_amount,
            _ => rules.tax_amount,
        }
    }

    /// Bonus a Merchant would receive right now (zero for everyone else)
    pub fn turn_bonus(&self, rules: &Rules) -> u32 {
        if self.role == Role::Merchant && self.coins >= rules.merchant_bonus_threshold {
            rules.merchant_bonus
        } else {
            0
        }
    }

    /// Extra coins charged to whoever sanctions this player
    pub fn sanction_fine(&self, rules: &Rules) -> u32 {
        if self.role.fines_sanctioner() {
            rules.judge_sanction_penalty
        } else {
            0
        }
    }

    /// Mark this player as arrested and run the role's reaction
    pub(crate) fn on_arrested(&mut self, rules: &Rules) -> Option<GameEvent> {
        self.was_arrested = true;
        match self.role {
            Role::General => {
                self.coins += rules.general_arrest_refund;
                Some(GameEvent::ArrestRefunded {
                    player: self.id,
                    amount: rules.general_arrest_refund,
                })
            }
            Role::Merchant => {
                // Pays what it can if short of the full penalty
                let amount = self.coins.min(rules.merchant_arrest_penalty);
                self.coins -= amount;
                Some(GameEvent::ArrestPenaltyPaid {
                    player: self.id,
                    amount,
                })
            }
            _ => None,
        }
    }

    /// Mark this player as sanctioned and run the role's reaction
    pub(crate) fn on_sanctioned(&mut self, rules: &Rules) -> Option<GameEvent> {
        self.under_sanction = true;
        match self.role {
            Role::Baron => {
                self.coins += rules.baron_sanction_compensation;
                Some(GameEvent::SanctionCompensated {
                    player: self.id,
                    amount: rules.baron_sanction_compensation,
                })
            }
            _ => None,
        }
    }

    pub(crate) fn record_action(&mut self, tag: ActionTag) {
        self.last_action = Some(tag);
    }

    /// Forget the last action once another player has reacted to it
    pub(crate) fn consume_last_action(&mut self) {
        self.last_action = None;
    }

    pub(crate) fn record_arrest_target(&mut self, target: PlayerId) {
        self.last_arrest_target = Some(target);
    }

    pub(crate) fn block_arrest(&mut self) {
        self.arrest_block = true;
    }

    pub(crate) fn set_used_bribe(&mut self, value: bool) {
        self.used_bribe = value;
    }

    pub(crate) fn set_coup_blocked(&mut self, value: bool) {
        self.coup_blocked = value;
    }

    /// Called when this player's turn ends and the cursor moves on
    pub(crate) fn clear_turn_flags(&mut self) {
        self.was_arrested = false;
        self.under_sanction = false;
        self.arrest_block = false;
    }

    pub(crate) fn eliminate(&mut self) {
        self.active = false;
    }
}
