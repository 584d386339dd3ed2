//! Game actions that players can take.
//!
//! This module defines all possible actions in the game and the events
//! that result from those actions.

use crate::player::PlayerId;
use crate::role::Role;
use serde::{Deserialize, Serialize};

/// All possible actions a player can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    // ==================== Base Actions ====================
    /// Take 1 coin from the bank
    Gather,
    /// Take 2 coins from the bank (3 for a Governor)
    Tax,
    /// Pay 4 coins for one extra action this turn
    Bribe,
    /// Take a coin from another player
    Arrest(PlayerId),
    /// Pay 3 coins to stop a player gathering or taxing on their next turn
    Sanction(PlayerId),
    /// Pay 7 coins to eliminate a player
    Coup(PlayerId),

    // ==================== Role Abilities ====================
    /// Baron: pay 3 coins, receive 6
    Invest,
    /// General: pay 5 coins to protect a player from the pending coup
    BlockCoup(PlayerId),
    /// Governor: take back 2 coins from a player whose last action was tax
    Undo(PlayerId),
    /// Judge: cancel a player's bribe
    CancelBribe(PlayerId),
    /// Spy: see a player's coins and stop them arresting
    SpyOn(PlayerId),
    /// Merchant: collect the wealthy-turn bonus
    StartTurnBonus,
}

impl GameAction {
    /// The role required to perform this action, if any
    pub fn required_role(&self) -> Option<Role> {
        match self {
            GameAction::Invest => Some(Role::Baron),
            GameAction::BlockCoup(_) => Some(Role::General),
            GameAction::Undo(_) => Some(Role::Governor),
            GameAction::CancelBribe(_) => Some(Role::Judge),
            GameAction::SpyOn(_) => Some(Role::Spy),
            GameAction::StartTurnBonus => Some(Role::Merchant),
            _ => None,
        }
    }

    /// The player this action is aimed at, if any
    pub fn target(&self) -> Option<PlayerId> {
        match self {
            GameAction::Arrest(t)
            | GameAction::Sanction(t)
            | GameAction::Coup(t)
            | GameAction::BlockCoup(t)
            | GameAction::Undo(t)
            | GameAction::CancelBribe(t)
            | GameAction::SpyOn(t) => Some(*t),
            _ => None,
        }
    }

    /// The tag recorded as the actor's last action on success
    pub fn tag(&self) -> Option<ActionTag> {
        match self {
            GameAction::Gather => Some(ActionTag::Gather),
            GameAction::Tax => Some(ActionTag::Tax),
            GameAction::Bribe => Some(ActionTag::Bribe),
            GameAction::Arrest(_) => Some(ActionTag::Arrest),
            GameAction::Sanction(_) => Some(ActionTag::Sanction),
            GameAction::Coup(_) => Some(ActionTag::Coup),
            GameAction::Invest => Some(ActionTag::Invest),
            // Reactive abilities used outside the actor's own turn leave the
            // record alone
            GameAction::BlockCoup(_)
            | GameAction::Undo(_)
            | GameAction::CancelBribe(_)
            | GameAction::SpyOn(_)
            | GameAction::StartTurnBonus => None,
        }
    }

    /// Short lowercase name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            GameAction::Gather => "gather",
            GameAction::Tax => "tax",
            GameAction::Bribe => "bribe",
            GameAction::Arrest(_) => "arrest",
            GameAction::Sanction(_) => "sanction",
            GameAction::Coup(_) => "coup",
            GameAction::Invest => "invest",
            GameAction::BlockCoup(_) => "block coup",
            GameAction::Undo(_) => "undo",
            GameAction::CancelBribe(_) => "cancel bribe",
            GameAction::SpyOn(_) => "spy on",
            GameAction::StartTurnBonus => "start turn bonus",
        }
    }
}

/// What a player last did, kept for Governor undo and Judge cancel checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionTag {
    Gather,
    Tax,
    Bribe,
    Arrest,
    Sanction,
    Coup,
    Invest,
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Coins gathered from the bank
    Gathered { player: PlayerId, amount: u32 },

    /// Coins collected as tax
    Taxed { player: PlayerId, amount: u32 },

    /// A bribe was paid for an extra action
    BribePaid { player: PlayerId, cost: u32 },

    /// A player was arrested
    Arrested {
        attacker: PlayerId,
        target: PlayerId,
        /// Coins taken directly by the arrest (zero for a Merchant)
        coins_taken: u32,
    },

    /// A player was sanctioned
    Sanctioned {
        attacker: PlayerId,
        target: PlayerId,
        cost: u32,
    },

    /// A Baron was compensated for a sanction
    SanctionCompensated { player: PlayerId, amount: u32 },

    /// The sanctioner of a Judge paid a fine
    SanctionFined { attacker: PlayerId, amount: u32 },

    /// A General recovered the coin lost to an arrest
    ArrestRefunded { player: PlayerId, amount: u32 },

    /// A Merchant paid the bank after an arrest
    ArrestPenaltyPaid { player: PlayerId, amount: u32 },

    /// A Baron invested
    Invested {
        player: PlayerId,
        cost: u32,
        returned: u32,
    },

    /// A General paid to protect a player from a coup
    CoupBlockPrepared {
        general: PlayerId,
        target: PlayerId,
        cost: u32,
    },

    /// A coup was paid for
    CoupLaunched {
        attacker: PlayerId,
        target: PlayerId,
        cost: u32,
    },

    /// The coup target survived thanks to a block
    CoupBlocked { attacker: PlayerId, target: PlayerId },

    /// A player left the roster
    PlayerEliminated { player: PlayerId },

    /// A Governor undid a tax
    TaxUndone {
        governor: PlayerId,
        target: PlayerId,
        amount: u32,
    },

    /// A Judge cancelled a bribe
    BribeCancelled { judge: PlayerId, target: PlayerId },

    /// A Spy looked at a player's coins
    SpiedOn {
        spy: PlayerId,
        target: PlayerId,
        coins: u32,
    },

    /// A Merchant collected the wealthy-turn bonus
    MerchantBonus { player: PlayerId, amount: u32 },

    /// The bribe was consumed; the same player acts again
    ExtraAction { player: PlayerId },

    /// Turn ended
    TurnEnded {
        player: PlayerId,
        next_player: PlayerId,
    },

    /// Only one player remains
    GameWon { player: PlayerId },
}
