//! Core game state machine.
//!
//! This module contains the `Game` struct: the player arena, the roster of
//! players still in the game, the turn cursor, and every rule check.

use crate::actions::{ActionTag, GameAction, GameEvent};
use crate::player::{Player, PlayerId};
use crate::role::Role;
use crate::rules::{Rules, RulesError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Broad category of a rejected action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Wrong player, eliminated player, or a coup is forced
    Turn,
    /// Not enough coins
    Resource,
    /// The chosen target cannot be acted on
    Target,
    /// The player's role lacks the ability
    Capability,
    /// Registration or end-of-game queries
    Roster,
}

/// Errors that can occur when applying actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("It's not your turn")]
    NotYourTurn,

    #[error("Eliminated players cannot play")]
    PlayerEliminated,

    #[error("Holding {coins} coins, you must perform a coup")]
    MustCoup { coins: u32 },

    #[error("Cannot gather or tax while under sanction")]
    UnderSanction,

    #[error("A spy has blocked you from arresting")]
    ArrestBlocked,

    #[error("Not enough coins: need {needed}, have {available}")]
    NotEnoughCoins { needed: u32, available: u32 },

    #[error("No player with id {0}")]
    UnknownPlayer(PlayerId),

    #[error("Target already eliminated")]
    TargetEliminated,

    #[error("Cannot target yourself")]
    SelfTarget,

    #[error("Target already arrested this round")]
    AlreadyArrested,

    #[error("Cannot arrest the same player twice in a row")]
    RepeatedArrest,

    #[error("Target's last action was not a tax")]
    NothingToUndo,

    #[error("Target's last action was not a bribe")]
    NoBribeToCancel,

    #[error("{role} cannot {ability}")]
    NotCapable { role: Role, ability: &'static str },

    #[error("Cannot add more than {0} players")]
    RosterFull(usize),

    #[error("A player named {0:?} already exists")]
    DuplicateName(String),

    #[error("No players in game")]
    NoPlayers,

    #[error("Game is still in progress, no winner yet")]
    NoWinnerYet,

    #[error("Player is not in the roster")]
    NotInRoster,
}

impl GameError {
    /// The category this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::NotYourTurn
            | GameError::PlayerEliminated
            | GameError::MustCoup { .. }
            | GameError::UnderSanction
            | GameError::ArrestBlocked => ErrorKind::Turn,
            GameError::NotEnoughCoins { .. } => ErrorKind::Resource,
            GameError::UnknownPlayer(_)
            | GameError::TargetEliminated
            | GameError::SelfTarget
            | GameError::AlreadyArrested
            | GameError::RepeatedArrest
            | GameError::NothingToUndo
            | GameError::NoBribeToCancel => ErrorKind::Target,
            GameError::NotCapable { .. } => ErrorKind::Capability,
            GameError::RosterFull(_)
            | GameError::DuplicateName(_)
            | GameError::NoPlayers
            | GameError::NoWinnerYet
            | GameError::NotInRoster => ErrorKind::Roster,
        }
    }
}

/// Fail unless `available` covers `needed`
fn ensure_funds(needed: u32, available: u32) -> Result<(), GameError> {
    if available < needed {
        return Err(GameError::NotEnoughCoins { needed, available });
    }
    Ok(())
}

/// The complete game state
#[derive(Debug, Clone, Default)]
pub struct Game {
    /// Every registered player, indexed by `PlayerId`; never shrinks
    players: Vec<Player>,
    /// Players still in the game, in turn order
    active_players: Vec<PlayerId>,
    /// Index into `active_players` of the player whose turn it is
    current_turn_index: usize,
    rules: Rules,
}

impl Game {
    /// Create an empty game with the standard rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty game with custom rules
    pub fn with_rules(rules: Rules) -> Result<Self, RulesError> {
        rules.validate()?;
        Ok(Self {
            rules,
            ..Self::default()
        })
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Register a player. Players take turns in registration order.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        role: Role,
    ) -> Result<PlayerId, GameError> {
        let name = name.into();
        if self.players.len() >= self.rules.max_players {
            return Err(GameError::RosterFull(self.rules.max_players));
        }
        if self.players.iter().any(|p| p.name() == name) {
            return Err(GameError::DuplicateName(name));
        }

        let id = self.players.len() as PlayerId;
        debug!("Registered {} as {} (player {})", name, role, id);
        self.players
            .push(Player::new(id, name, role, self.rules.starting_coins));
        self.active_players.push(id);
        Ok(id)
    }

    // ==================== Queries ====================

    /// Names of the players still in the game, in turn order
    pub fn players(&self) -> Vec<&str> {
        self.active_players
            .iter()
            .map(|&id| self.player_ref(id).name())
            .collect()
    }

    /// Ids of the players still in the game, in turn order
    pub fn active_players(&self) -> &[PlayerId] {
        &self.active_players
    }

    /// Every registered player, eliminated or not
    pub fn all_players(&self) -> &[Player] {
        &self.players
    }

    /// Get a player by ID
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    /// Get a player by name
    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name() == name)
    }

    /// Coin count of a player
    pub fn coins(&self, id: PlayerId) -> Result<u32, GameError> {
        self.player(id)
            .map(Player::coins)
            .ok_or(GameError::UnknownPlayer(id))
    }

    pub fn current_turn_index(&self) -> usize {
        self.current_turn_index
    }

    /// The player whose turn it is
    pub fn current_player(&self) -> Result<PlayerId, GameError> {
        self.active_players
            .get(self.current_turn_index)
            .copied()
            .ok_or(GameError::NoPlayers)
    }

    /// Name of the player whose turn it is
    pub fn turn(&self) -> Result<&str, GameError> {
        let id = self.current_player()?;
        Ok(self.player_ref(id).name())
    }

    /// Name of the last player standing
    pub fn winner(&self) -> Result<&str, GameError> {
        match self.active_players.as_slice() {
            [] => Err(GameError::NoPlayers),
            [id] => Ok(self.player_ref(*id).name()),
            _ => Err(GameError::NoWinnerYet),
        }
    }

    /// Check if only one player remains
    pub fn is_finished(&self) -> bool {
        self.active_players.len() == 1
    }

    /// Get all currently valid actions for a player
    pub fn valid_actions(&self, player: PlayerId) -> Vec<GameAction> {
        let Some(p) = self.player(player) else {
            return Vec::new();
        };

        let mut candidates = vec![
            GameAction::Gather,
            GameAction::Tax,
            GameAction::Bribe,
            GameAction::Invest,
        ];
        if p.turn_bonus(&self.rules) > 0 {
            candidates.push(GameAction::StartTurnBonus);
        }
        // Self-targets are included; a Governor may undo its own tax
        for &target in &self.active_players {
            candidates.extend([
                GameAction::Arrest(target),
                GameAction::Sanction(target),
                GameAction::Coup(target),
                GameAction::BlockCoup(target),
                GameAction::Undo(target),
                GameAction::CancelBribe(target),
                GameAction::SpyOn(target),
            ]);
        }

        candidates
            .into_iter()
            .filter(|action| self.clone().apply_action(player, *action).is_ok())
            .collect()
    }

    // ==================== Turn Cursor ====================

    /// Move the cursor to the next player in the roster
    pub fn advance_turn(&mut self) {
        if self.active_players.is_empty() {
            return;
        }
        self.current_turn_index = (self.current_turn_index + 1) % self.active_players.len();
        debug!("Turn passes to player {}", self.active_players[self.current_turn_index]);
    }

    /// Remove a player from the roster.
    ///
    /// When the removed player sat at or before the cursor, the cursor steps
    /// back one seat so that the next `advance_turn` lands on the removed
    /// player's successor. A cursor at seat 0 stays put, and one left past the
    /// end of the shrunk roster wraps to 0.
    pub fn eliminate(&mut self, player: PlayerId) -> Result<Vec<GameEvent>, GameError> {
        let index = self
            .active_players
            .iter()
            .position(|&id| id == player)
            .ok_or(GameError::NotInRoster)?;

        self.player_mut(player).eliminate();
        self.active_players.remove(index);

        if index <= self.current_turn_index && self.current_turn_index > 0 {
            self.current_turn_index -= 1;
        }
        if self.current_turn_index >= self.active_players.len() {
            self.current_turn_index = 0;
        }

        info!("{} has been eliminated", self.player_ref(player).name());
        let mut events = vec![GameEvent::PlayerEliminated { player }];
        if let [last] = self.active_players.as_slice() {
            info!("{} wins the game", self.player_ref(*last).name());
            events.push(GameEvent::GameWon { player: *last });
        }
        Ok(events)
    }

    /// Pay coins from the bank to a player, outside of any action
    pub fn add_coins(&mut self, player: PlayerId, amount: u32) -> Result<(), GameError> {
        self.require_known(player)?;
        self.player_mut(player).add_coins(amount);
        Ok(())
    }

    // ==================== Actions ====================

    /// Apply an action for a player.
    ///
    /// Every check runs before any state changes, so a rejected action leaves
    /// coins, flags and the turn cursor exactly as they were.
    pub fn apply_action(
        &mut self,
        player: PlayerId,
        action: GameAction,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.require_known(player)?;
        if let Some(target) = action.target() {
            self.require_known(target)?;
        }
        if let Some(required) = action.required_role() {
            let role = self.player_ref(player).role();
            if role != required {
                return Err(GameError::NotCapable {
                    role,
                    ability: action.name(),
                });
            }
        }

        let mut events = Vec::new();

        match action {
            // ==================== Base Actions ====================
            GameAction::Gather | GameAction::Tax => {
                let bonus = self.validate_turn(player)?;
                let p = self.player_ref(player);
                if p.is_under_sanction() {
                    return Err(GameError::UnderSanction);
                }
                let amount = match action {
                    GameAction::Tax => p.tax_amount(&self.rules),
                    _ => self.rules.gather_amount,
                };

                self.grant_turn_bonus(player, bonus, &mut events);
                self.player_mut(player).add_coins(amount);
                events.push(match action {
                    GameAction::Tax => GameEvent::Taxed { player, amount },
                    _ => GameEvent::Gathered { player, amount },
                });
                self.end_turn(player, &mut events);
            }

            GameAction::Bribe => {
                let bonus = self.validate_turn(player)?;
                let cost = self.rules.bribe_cost;
                ensure_funds(cost, self.player_ref(player).coins() + bonus)?;

                self.grant_turn_bonus(player, bonus, &mut events);
                let p = self.player_mut(player);
                p.remove_coins(cost)?;
                p.set_used_bribe(true);
                events.push(GameEvent::BribePaid { player, cost });
            }

            GameAction::Arrest(target) => {
                let bonus = self.validate_turn(player)?;
                let attacker = self.player_ref(player);
                if attacker.is_arrest_blocked() {
                    return Err(GameError::ArrestBlocked);
                }
                let repeated = attacker.last_arrest_target() == Some(target);
                self.require_target(player, target)?;
                if repeated {
                    return Err(GameError::RepeatedArrest);
                }
                let victim = self.player_ref(target);
                if victim.was_arrested() {
                    return Err(GameError::AlreadyArrested);
                }
                let taken = if victim.role().skips_arrest_debit() {
                    0
                } else {
                    self.rules.arrest_amount
                };
                ensure_funds(taken, victim.coins())?;

                self.grant_turn_bonus(player, bonus, &mut events);
                let rules = self.rules.clone();
                let victim = self.player_mut(target);
                victim.remove_coins(taken)?;
                events.push(GameEvent::Arrested {
                    attacker: player,
                    target,
                    coins_taken: taken,
                });
                events.extend(victim.on_arrested(&rules));

                // The arrester is paid even when a Merchant target lost nothing
                let attacker = self.player_mut(player);
                attacker.add_coins(rules.arrest_amount);
                attacker.record_arrest_target(target);
                self.end_turn(player, &mut events);
            }

            GameAction::Sanction(target) => {
                let bonus = self.validate_turn(player)?;
                let cost = self.rules.sanction_cost;
                let available = self.player_ref(player).coins() + bonus;
                ensure_funds(cost, available)?;
                self.require_target(player, target)?;
                let fine = self.player_ref(target).sanction_fine(&self.rules);
                ensure_funds(cost + fine, available)?;

                self.grant_turn_bonus(player, bonus, &mut events);
                let rules = self.rules.clone();
                self.player_mut(player).remove_coins(cost)?;
                events.push(GameEvent::Sanctioned {
                    attacker: player,
                    target,
                    cost,
                });
                events.extend(self.player_mut(target).on_sanctioned(&rules));
                if fine > 0 {
                    self.player_mut(player).remove_coins(fine)?;
                    events.push(GameEvent::SanctionFined {
                        attacker: player,
                        amount: fine,
                    });
                }
                self.end_turn(player, &mut events);
            }

            GameAction::Coup(target) => {
                // No validate_turn: a coup is exactly what a wealthy player
                // is forced to do
                self.require_active(player)?;
                if self.current_player()? != player {
                    return Err(GameError::NotYourTurn);
                }
                self.require_target(player, target)?;
                self.resolve_coup(player, target, &mut events)?;
            }

            // ==================== Role Abilities ====================
            GameAction::Invest => {
                let bonus = self.validate_turn(player)?;
                let cost = self.rules.invest_cost;
                ensure_funds(cost, self.player_ref(player).coins() + bonus)?;

                self.grant_turn_bonus(player, bonus, &mut events);
                let returned = self.rules.invest_return;
                let p = self.player_mut(player);
                p.remove_coins(cost)?;
                p.add_coins(returned);
                events.push(GameEvent::Invested {
                    player,
                    cost,
                    returned,
                });
                self.end_turn(player, &mut events);
            }

            GameAction::BlockCoup(target) => {
                self.require_active(player)?;
                if !self.player_ref(target).is_active() {
                    return Err(GameError::TargetEliminated);
                }
                let cost = self.rules.block_coup_cost;
                ensure_funds(cost, self.player_ref(player).coins())?;

                self.player_mut(player).remove_coins(cost)?;
                self.player_mut(target).set_coup_blocked(true);
                events.push(GameEvent::CoupBlockPrepared {
                    general: player,
                    target,
                    cost,
                });
            }

            GameAction::Undo(target) => {
                self.require_active(player)?;
                let other = self.player_ref(target);
                if other.last_action() != Some(ActionTag::Tax) {
                    return Err(GameError::NothingToUndo);
                }
                if !other.is_active() {
                    return Err(GameError::TargetEliminated);
                }
                let amount = self.rules.undo_amount;
                ensure_funds(amount, other.coins())?;

                let other = self.player_mut(target);
                other.remove_coins(amount)?;
                other.consume_last_action();
                events.push(GameEvent::TaxUndone {
                    governor: player,
                    target,
                    amount,
                });
            }

            GameAction::CancelBribe(target) => {
                self.require_active(player)?;
                let other = self.player_ref(target);
                if !other.is_active() {
                    return Err(GameError::TargetEliminated);
                }
                if other.last_action() != Some(ActionTag::Bribe) {
                    return Err(GameError::NoBribeToCancel);
                }

                // The bribe cost stays spent
                self.player_mut(target).consume_last_action();
                events.push(GameEvent::BribeCancelled {
                    judge: player,
                    target,
                });
            }

            GameAction::SpyOn(target) => {
                // Usable outside the spy's own turn
                self.require_active(player)?;
                self.require_target(player, target)?;
                let other = self.player_ref(target);
                let coins = other.coins();
                info!("[Spy] {} has {} coins", other.name(), coins);

                self.player_mut(target).block_arrest();
                events.push(GameEvent::SpiedOn {
                    spy: player,
                    target,
                    coins,
                });
            }

            GameAction::StartTurnBonus => {
                self.require_active(player)?;
                let bonus = self.player_ref(player).turn_bonus(&self.rules);
                self.grant_turn_bonus(player, bonus, &mut events);
            }
        }

        if let Some(tag) = action.tag() {
            self.player_mut(player).record_action(tag);
        }
        debug!("Player {} performed {}", player, action.name());

        Ok(events)
    }

    // ==================== Named Actions ====================

    pub fn gather(&mut self, player: PlayerId) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(player, GameAction::Gather)
    }

    pub fn tax(&mut self, player: PlayerId) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(player, GameAction::Tax)
    }

    pub fn bribe(&mut self, player: PlayerId) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(player, GameAction::Bribe)
    }

    pub fn arrest(
        &mut self,
        player: PlayerId,
        target: PlayerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(player, GameAction::Arrest(target))
    }

    pub fn sanction(
        &mut self,
        player: PlayerId,
        target: PlayerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(player, GameAction::Sanction(target))
    }

    pub fn coup(
        &mut self,
        attacker: PlayerId,
        target: PlayerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(attacker, GameAction::Coup(target))
    }

    /// Baron only
    pub fn invest(&mut self, player: PlayerId) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(player, GameAction::Invest)
    }

    /// General only
    pub fn block_coup(
        &mut self,
        general: PlayerId,
        target: PlayerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(general, GameAction::BlockCoup(target))
    }

    /// Governor only; every other role fails naming itself
    pub fn undo(
        &mut self,
        governor: PlayerId,
        target: PlayerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(governor, GameAction::Undo(target))
    }

    /// Judge only
    pub fn cancel_bribe(
        &mut self,
        judge: PlayerId,
        target: PlayerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.apply_action(judge, GameAction::CancelBribe(target))
    }

    /// Spy only. Returns the target's coin count.
    pub fn spy_on(&mut self, spy: PlayerId, target: PlayerId) -> Result<u32, GameError> {
        self.apply_action(spy, GameAction::SpyOn(target))?;
        self.coins(target)
    }

    /// Merchant only. Returns whether the bonus was paid.
    pub fn start_turn_bonus(&mut self, merchant: PlayerId) -> Result<bool, GameError> {
        let events = self.apply_action(merchant, GameAction::StartTurnBonus)?;
        Ok(!events.is_empty())
    }

    // ==================== Internals ====================

    fn player_ref(&self, id: PlayerId) -> &Player {
        &self.players[id as usize]
    }

    fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id as usize]
    }

    fn require_known(&self, id: PlayerId) -> Result<(), GameError> {
        if self.player(id).is_none() {
            return Err(GameError::UnknownPlayer(id));
        }
        Ok(())
    }

    fn require_active(&self, id: PlayerId) -> Result<(), GameError> {
        if !self.player_ref(id).is_active() {
            return Err(GameError::PlayerEliminated);
        }
        Ok(())
    }

    fn require_target(&self, actor: PlayerId, target: PlayerId) -> Result<(), GameError> {
        if actor == target {
            return Err(GameError::SelfTarget);
        }
        if !self.player_ref(target).is_active() {
            return Err(GameError::TargetEliminated);
        }
        Ok(())
    }

    /// Turn checks shared by every turn-gated action.
    ///
    /// Returns the Merchant bonus the action earns; callers add it to the
    /// balance they check and only pay it out once every check has passed.
    fn validate_turn(&self, player: PlayerId) -> Result<u32, GameError> {
        self.require_active(player)?;
        if self.current_player()? != player {
            return Err(GameError::NotYourTurn);
        }
        let p = self.player_ref(player);
        if p.coins() >= self.rules.forced_coup_threshold {
            return Err(GameError::MustCoup { coins: p.coins() });
        }
        Ok(p.turn_bonus(&self.rules))
    }

    fn grant_turn_bonus(&mut self, player: PlayerId, bonus: u32, events: &mut Vec<GameEvent>) {
        if bonus == 0 {
            return;
        }
        self.player_mut(player).add_coins(bonus);
        events.push(GameEvent::MerchantBonus {
            player,
            amount: bonus,
        });
    }

    /// Finish a turn-consuming action. A pending bribe is spent instead of
    /// passing the turn.
    fn end_turn(&mut self, player: PlayerId, events: &mut Vec<GameEvent>) {
        let p = self.player_mut(player);
        if p.has_used_bribe() {
            p.set_used_bribe(false);
            events.push(GameEvent::ExtraAction { player });
            return;
        }
        p.clear_turn_flags();
        self.advance_turn();
        self.push_turn_ended(player, events);
    }

    fn push_turn_ended(&self, player: PlayerId, events: &mut Vec<GameEvent>) {
        if let Ok(next_player) = self.current_player() {
            events.push(GameEvent::TurnEnded {
                player,
                next_player,
            });
        }
    }

    /// Pay for a coup and resolve it. The attacker pays even when the target
    /// survives, and the turn always passes.
    fn resolve_coup(
        &mut self,
        attacker: PlayerId,
        target: PlayerId,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        let cost = self.rules.coup_cost;
        ensure_funds(cost, self.player_ref(attacker).coins())?;

        self.player_mut(attacker).remove_coins(cost)?;
        events.push(GameEvent::CoupLaunched {
            attacker,
            target,
            cost,
        });

        // A wealthy General protects itself, even when already blocked
        let block_cost = self.rules.block_coup_cost;
        let defender = self.player_ref(target);
        if defender.role() == Role::General && defender.can_afford(block_cost) {
            let defender = self.player_mut(target);
            defender.remove_coins(block_cost)?;
            defender.set_coup_blocked(true);
            events.push(GameEvent::CoupBlockPrepared {
                general: target,
                target,
                cost: block_cost,
            });
        }

        if self.player_ref(target).is_coup_blocked() {
            self.player_mut(target).set_coup_blocked(false);
            info!(
                "Coup by {} on {} was blocked",
                self.player_ref(attacker).name(),
                self.player_ref(target).name()
            );
            events.push(GameEvent::CoupBlocked { attacker, target });
        } else {
            events.extend(self.eliminate(target)?);
        }

        // The turn passes even if a bribe was pending
        let p = self.player_mut(attacker);
        p.set_used_bribe(false);
        p.clear_turn_flags();
        self.advance_turn();
        self.push_turn_ended(attacker, events);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_with(roles: &[Role]) -> Game {
        let mut game = Game::new();
        for (i, role) in roles.iter().enumerate() {
            game.add_player(format!("P{i}"), *role).unwrap();
        }
        game
    }

    #[test]
    fn test_new_game_is_empty() {
        let game = Game::new();
        assert!(game.players().is_empty());
        assert_eq!(game.turn(), Err(GameError::NoPlayers));
        assert_eq!(game.winner(), Err(GameError::NoPlayers));
    }

    #[test]
    fn test_roster_full_at_six() {
        let mut game = game_with(&Role::ALL);
        let err = game.add_player("Seventh", Role::Spy).unwrap_err();
        assert_eq!(err, GameError::RosterFull(6));
        assert_eq!(err.kind(), ErrorKind::Roster);
        assert_eq!(game.players().len(), 6);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut game = game_with(&[Role::Spy]);
        assert_eq!(
            game.add_player("P0", Role::Baron),
            Err(GameError::DuplicateName("P0".to_string()))
        );
    }

    #[test]
    fn test_player_by_name() {
        let game = game_with(&[Role::Spy, Role::Judge]);
        let judge = game.player_by_name("P1").unwrap();
        assert_eq!(judge.id(), 1);
        assert_eq!(judge.role(), Role::Judge);
        assert!(game.player_by_name("Nobody").is_none());
    }

    #[test]
    fn test_custom_rules_player_limit() {
        let rules = Rules {
            max_players: 2,
            starting_coins: 2,
            ..Rules::default()
        };
        let mut game = Game::with_rules(rules).unwrap();
        game.add_player("A", Role::Spy).unwrap();
        game.add_player("B", Role::Judge).unwrap();
        assert_eq!(game.coins(1), Ok(2));
        assert_eq!(
            game.add_player("C", Role::Baron),
            Err(GameError::RosterFull(2))
        );
    }

    #[test]
    fn test_advance_turn_wraps() {
        let mut game = game_with(&[Role::Spy, Role::Baron, Role::Judge]);
        assert_eq!(game.turn(), Ok("P0"));
        game.advance_turn();
        game.advance_turn();
        assert_eq!(game.turn(), Ok("P2"));
        game.advance_turn();
        assert_eq!(game.turn(), Ok("P0"));
    }

    #[test]
    fn test_eliminate_before_cursor_keeps_current_player() {
        let mut game = game_with(&[Role::Spy, Role::Baron, Role::Judge, Role::Merchant]);
        game.advance_turn();
        game.advance_turn();
        assert_eq!(game.turn(), Ok("P2"));

        game.eliminate(0).unwrap();
        assert_eq!(game.turn(), Ok("P2"));
        assert_eq!(game.current_turn_index(), 1);
        assert_eq!(game.players(), vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn test_eliminate_after_cursor() {
        let mut game = game_with(&[Role::Spy, Role::Baron, Role::Judge]);
        game.eliminate(2).unwrap();
        assert_eq!(game.turn(), Ok("P0"));
        game.advance_turn();
        assert_eq!(game.turn(), Ok("P1"));
        game.advance_turn();
        assert_eq!(game.turn(), Ok("P0"));
    }

    #[test]
    fn test_eliminate_current_player_steps_back() {
        let mut game = game_with(&[Role::Spy, Role::Baron, Role::Judge]);
        game.advance_turn();
        game.eliminate(1).unwrap();
        // Cursor sits on the predecessor, so the next advance reaches P2
        assert_eq!(game.turn(), Ok("P0"));
        game.advance_turn();
        assert_eq!(game.turn(), Ok("P2"));

    }

    #[test]
    fn test_eliminate_first_seat_on_cursor_keeps_cursor() {
        let mut game = game_with(&[Role::Spy, Role::Baron, Role::Judge]);
        game.eliminate(0).unwrap();
        assert_eq!(game.current_turn_index(), 0);
        assert_eq!(game.turn(), Ok("P1"));
        game.advance_turn();
        assert_eq!(game.turn(), Ok("P2"));
    }

    #[test]
    fn test_eliminate_current_last_seat_steps_back() {
        let mut game = game_with(&[Role::Spy, Role::Baron, Role::Judge]);
        game.advance_turn();
        game.advance_turn();
        game.eliminate(2).unwrap();
        assert_eq!(game.current_turn_index(), 1);
        assert_eq!(game.turn(), Ok("P1"));

        let mut game = game_with(&[Role::Spy, Role::Baron]);
        game.eliminate(0).unwrap();
        assert_eq!(game.current_turn_index(), 0);
        assert_eq!(game.turn(), Ok("P1"));
    }

    #[test]
    fn test_eliminate_twice_fails() {
        let mut game = game_with(&[Role::Spy, Role::Baron]);
        let events = game.eliminate(1).unwrap();
        assert_eq!(
            events,
            vec![
                GameEvent::PlayerEliminated { player: 1 },
                GameEvent::GameWon { player: 0 }
            ]
        );
        assert_eq!(game.eliminate(1), Err(GameError::NotInRoster));
        assert_eq!(game.winner(), Ok("P0"));
    }

    #[test]
    fn test_winner_requires_single_player() {
        let game = game_with(&[Role::Spy, Role::Baron]);
        assert_eq!(game.winner(), Err(GameError::NoWinnerYet));
    }

    #[test]
    fn test_gather_and_tax_amounts() {
        let mut game = game_with(&[Role::Spy, Role::Governor]);
        game.gather(0).unwrap();
        game.tax(1).unwrap();
        game.tax(0).unwrap();
        assert_eq!(game.coins(0), Ok(3));
        assert_eq!(game.coins(1), Ok(3));
    }

    #[test]
    fn test_out_of_turn_action_rejected() {
        let mut game = game_with(&[Role::Spy, Role::Baron]);
        let err = game.gather(1).unwrap_err();
        assert_eq!(err, GameError::NotYourTurn);
        assert_eq!(err.kind(), ErrorKind::Turn);
        assert_eq!(game.coins(1), Ok(0));
        assert_eq!(game.turn(), Ok("P0"));
    }

    #[test]
    fn test_bribe_grants_extra_action() {
        let mut game = game_with(&[Role::Spy, Role::Baron]);
        game.add_coins(0, 4).unwrap();

        let events = game.bribe(0).unwrap();
        assert_eq!(events, vec![GameEvent::BribePaid { player: 0, cost: 4 }]);
        assert_eq!(game.coins(0), Ok(0));
        assert_eq!(game.turn(), Ok("P0"));

        let events = game.gather(0).unwrap();
        assert!(events.contains(&GameEvent::ExtraAction { player: 0 }));
        assert_eq!(game.turn(), Ok("P0"));

        game.gather(0).unwrap();
        assert_eq!(game.turn(), Ok("P1"));
        assert_eq!(game.coins(0), Ok(2));
    }

    #[test]
    fn test_bribe_needs_four_coins() {
        let mut game = game_with(&[Role::Spy, Role::Baron]);
        game.add_coins(0, 3).unwrap();
        let err = game.bribe(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resource);
        assert_eq!(game.coins(0), Ok(3));
        assert!(!game.player(0).unwrap().has_used_bribe());
    }

    #[test]
    fn test_sanction_blocks_gather_until_turn_ends() {
        let mut game = game_with(&[Role::Spy, Role::Governor]);
        game.add_coins(0, 3).unwrap();
        game.sanction(0, 1).unwrap();
        assert_eq!(game.coins(0), Ok(0));
        assert!(game.player(1).unwrap().is_under_sanction());

        assert_eq!(game.gather(1), Err(GameError::UnderSanction));
        assert_eq!(game.tax(1), Err(GameError::UnderSanction));

        // Arresting is still allowed, and ending the turn lifts the sanction
        game.add_coins(0, 1).unwrap();
        game.arrest(1, 0).unwrap();
        assert!(!game.player(1).unwrap().is_under_sanction());
    }

    #[test]
    fn test_sanction_judge_fines_attacker() {
        let mut game = game_with(&[Role::Governor, Role::Judge]);
        game.add_coins(0, 3).unwrap();
        // 3 for the sanction plus 1 fine
        assert_eq!(
            game.sanction(0, 1),
            Err(GameError::NotEnoughCoins {
                needed: 4,
                available: 3
            })
        );
        game.add_coins(0, 1).unwrap();
        let events = game.sanction(0, 1).unwrap();
        assert!(events.contains(&GameEvent::SanctionFined {
            attacker: 0,
            amount: 1
        }));
        assert_eq!(game.coins(0), Ok(0));
    }

    #[test]
    fn test_arrest_target_rules() {
        let mut game = game_with(&[Role::Spy, Role::Baron, Role::Judge]);
        assert_eq!(game.arrest(0, 0), Err(GameError::SelfTarget));
        // Victim has nothing to take
        assert!(matches!(
            game.arrest(0, 1),
            Err(GameError::NotEnoughCoins { .. })
        ));

        game.add_coins(1, 2).unwrap();
        game.arrest(0, 1).unwrap();
        assert_eq!(game.coins(0), Ok(1));
        assert_eq!(game.coins(1), Ok(1));

        // P1 cannot be arrested again before its turn ends
        game.add_coins(2, 1).unwrap();
        game.advance_turn();
        assert_eq!(game.turn(), Ok("P2"));
        assert_eq!(game.arrest(2, 1), Err(GameError::AlreadyArrested));
    }

    #[test]
    fn test_spy_blocks_arrest() {
        let mut game = game_with(&[Role::Governor, Role::Spy]);
        game.add_coins(1, 1).unwrap();
        // Out of turn
        assert_eq!(game.spy_on(1, 0), Ok(0));
        assert!(game.player(0).unwrap().is_arrest_blocked());
        assert_eq!(game.arrest(0, 1), Err(GameError::ArrestBlocked));

        // Cleared when P0's turn ends
        game.gather(0).unwrap();
        assert!(!game.player(0).unwrap().is_arrest_blocked());
    }

    #[test]
    fn test_spy_cannot_target_itself() {
        let mut game = game_with(&[Role::Spy, Role::Baron]);
        assert_eq!(game.spy_on(0, 0), Err(GameError::SelfTarget));
        assert!(!game.player(0).unwrap().is_arrest_blocked());
    }

    #[test]
    fn test_blocked_general_still_pays_for_own_block() {
        let mut game = game_with(&[Role::Spy, Role::General]);
        game.add_coins(0, 7).unwrap();
        game.add_coins(1, 15).unwrap();
        game.block_coup(1, 1).unwrap();
        assert_eq!(game.coins(1), Ok(10));

        let events = game.coup(0, 1).unwrap();
        assert!(events.contains(&GameEvent::CoupBlockPrepared {
            general: 1,
            target: 1,
            cost: 5,
        }));
        assert!(events.contains(&GameEvent::CoupBlocked {
            attacker: 0,
            target: 1,
        }));
        assert_eq!(game.coins(1), Ok(5));
        assert!(game.player(1).unwrap().is_active());
        assert!(!game.player(1).unwrap().is_coup_blocked());
    }

    #[test]
    fn test_bank_payout_saturates() {
        let mut game = game_with(&[Role::Spy, Role::Baron]);
        game.add_coins(0, u32::MAX).unwrap();
        game.add_coins(0, 5).unwrap();
        assert_eq!(game.coins(0), Ok(u32::MAX));
    }

    #[test]
    fn test_capability_errors_name_role() {
        let mut game = game_with(&[Role::Spy, Role::Baron]);
        let err = game.undo(0, 1).unwrap_err();
        assert_eq!(
            err,
            GameError::NotCapable {
                role: Role::Spy,
                ability: "undo"
            }
        );
        assert_eq!(err.to_string(), "Spy cannot undo");
        assert_eq!(err.kind(), ErrorKind::Capability);

        assert!(matches!(
            game.invest(0),
            Err(GameError::NotCapable { role: Role::Spy, .. })
        ));
        assert!(matches!(
            game.spy_on(1, 0),
            Err(GameError::NotCapable { role: Role::Baron, .. })
        ));
    }

    #[test]
    fn test_unknown_player() {
        let mut game = game_with(&[Role::Spy]);
        assert_eq!(game.gather(4), Err(GameError::UnknownPlayer(4)));
        assert_eq!(game.arrest(0, 9), Err(GameError::UnknownPlayer(9)));
        assert!(game.valid_actions(7).is_empty());
    }

    #[test]
    fn test_merchant_bonus_counts_toward_cost() {
        let mut game = game_with(&[Role::Merchant, Role::Spy]);
        game.add_coins(0, 3).unwrap();
        // 3 coins + 1 bonus covers the bribe
        let events = game.bribe(0).unwrap();
        assert_eq!(
            events,
            vec![
                GameEvent::MerchantBonus {
                    player: 0,
                    amount: 1
                },
                GameEvent::BribePaid { player: 0, cost: 4 },
            ]
        );
        assert_eq!(game.coins(0), Ok(0));
    }

    #[test]
    fn test_merchant_bonus_not_paid_on_failure() {
        let mut game = game_with(&[Role::Merchant, Role::Spy]);
        game.add_coins(0, 3).unwrap();
        game.eliminate(1).unwrap();
        assert_eq!(game.turn(), Ok("P0"));
        assert_eq!(game.sanction(0, 1), Err(GameError::TargetEliminated));
        assert_eq!(game.coins(0), Ok(3));
    }

    #[test]
    fn test_valid_actions_at_forced_coup() {
        let mut game = game_with(&[Role::Spy, Role::Baron]);
        game.add_coins(0, 10).unwrap();
        let actions = game.valid_actions(0);
        assert!(actions.contains(&GameAction::Coup(1)));
        assert!(actions.contains(&GameAction::SpyOn(1)));
        assert!(!actions.contains(&GameAction::Gather));
        assert!(!actions.contains(&GameAction::Tax));
    }

    #[test]
    fn test_valid_actions_include_self_undo() {
        let mut game = game_with(&[Role::Governor, Role::Spy]);
        game.tax(0).unwrap();
        game.gather(1).unwrap();
        let actions = game.valid_actions(0);
        assert!(actions.contains(&GameAction::Undo(0)));
        assert!(!actions.contains(&GameAction::Arrest(0)));
    }

    #[test]
    fn test_valid_actions_are_accepted() {
        let mut game = game_with(&Role::ALL);
        for id in 0..6 {
            game.add_coins(id, 5).unwrap();
        }
        for id in 0..6u8 {
            for action in game.valid_actions(id) {
                assert!(
                    game.clone().apply_action(id, action).is_ok(),
                    "{action:?} listed for {id}"
                );
            }
        }
    }
}
