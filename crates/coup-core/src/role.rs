//! Player roles.
//!
//! Every player holds exactly one role for the whole game. The role decides
//! which base actions are altered (Governor tax, Merchant turn bonus) and which
//! reactions fire when the player is arrested or sanctioned.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six roles a player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Collects 3 coins on tax and can undo another player's tax
    Governor,
    /// Peeks at coin counts and stops a player from arresting
    Spy,
    /// Invests 3 coins for 6 and is compensated when sanctioned
    Baron,
    /// Pays 5 coins to block a coup and recovers the coin lost to an arrest
    General,
    /// Cancels bribes and fines whoever sanctions them
    Judge,
    /// Earns a bonus coin on wealthy turns and pays the bank when arrested
    Merchant,
}

impl Role {
    /// All roles, in the order they are usually dealt
    pub const ALL: [Role; 6] = [
        Role::Governor,
        Role::Spy,
        Role::Baron,
        Role::General,
        Role::Judge,
        Role::Merchant,
    ];

    /// Display name of the role
    pub fn name(&self) -> &'static str {
        match self {
            Role::Governor => "Governor",
            Role::Spy => "Spy",
            Role::Baron => "Baron",
            Role::General => "General",
            Role::Judge => "Judge",
            Role::Merchant => "Merchant",
        }
    }

    /// Whether this role's sanction reaction fines the attacker.
    pub fn fines_sanctioner(&self) -> bool {
        matches!(self, Role::Judge)
    }

    /// Arrests take no coin directly from a Merchant; the Merchant pays the
    /// bank through its own reaction instead.
    pub fn skips_arrest_debit(&self) -> bool {
        matches!(self, Role::Merchant)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
