//! The engine facade.
//!
//! `Game` owns the player, the map, any battle in progress and the random
//! source. Every command runs to completion and returns a [`TurnReport`]
//! describing what happened, or a [`GameError`] with the state untouched.
//! Nothing here renders anything; a front end turns reports and
//! [`StatusSnapshot`]s into text.

use super::config::GameConfig;
use super::constants::{REST_BASE_HEAL, REST_VITALITY_DIVISOR, SOUP_BASE_HEAL, SOUP_VITALITY_DIVISOR};
use super::error::{ConfigError, GameError};
use crate::character::{Player, Position};
use crate::combat::{Battle, BattleOutcome, Monster, RoundResult};
use crate::exploration::{explore_region, ExploreOutcome};
use crate::items::{
    consumable, equipment, find_item, purchase, ConsumableId, EquipmentId, ItemRef,
};
use crate::map::{expand_map, generate_map, step, Direction, WorldMap};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Coarse state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    Exploring,
    InBattle,
    /// Waiting on `resurrect` or `give_up`
    Dead,
    GameOver,
}

/// A structured event, for front ends that want more than message text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    Moved {
        region_id: usize,
        x: usize,
        y: usize,
        distance: u32,
    },
    /// The player's position was invalid and the map was rebuilt
    PositionReset { region_id: usize },
    Explored {
        region_id: usize,
        outcome: ExploreOutcome,
        first_visit: bool,
        /// Gold credited, blessing bonus included
        gold: u64,
        xp: u64,
    },
    BattleStarted { monster: Monster },
    Round { round: u32, monster_hp: u32, player_hp: u32 },
    BattleEnded { outcome: BattleOutcome },
    LevelUp { level: u32 },
    ItemObtained { item: ItemRef },
    Healed { amount: u32 },
    Teleported { region_id: usize },
    MapExpanded { size: usize },
    Died,
    Resurrected { hp: u32 },
    RunEnded,
}

/// What a single command produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TurnReport {
    pub messages: Vec<String>,
    pub events: Vec<GameEvent>,
}

impl TurnReport {
    fn say(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn has_event(&self, predicate: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.iter().any(predicate)
    }
}

/// Read-only view of everything a status panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    pub status: GameStatus,
    pub level: u32,
    pub xp: u64,
    pub xp_to_next: u64,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub crit_chance: u32,
    pub curse_probability: f64,
    pub strength: u32,
    pub agility: u32,
    pub vitality: u32,
    pub luck: u32,
    pub currency: u64,
    pub attack_bonus: i64,
    pub gold_bonus_percent: u32,
    pub max_hp_penalty: i64,
    pub attack_penalty: i64,
    pub position: Position,
    pub region_name: Option<&'static str>,
    pub distance_from_home: Option<u32>,
    pub map_size: usize,
    pub explored_regions: usize,
    pub total_regions: usize,
    pub inventory: Vec<(&'static str, u32)>,
    pub owned_equipment: Vec<&'static str>,
    pub equipped_armors: Vec<&'static str>,
    pub equipped_weapon: Option<&'static str>,
    pub monster: Option<Monster>,
}

pub struct Game<R: Rng = StdRng> {
    config: GameConfig,
    map: WorldMap,
    player: Player,
    battle: Option<Battle>,
    game_over: bool,
    rng: R,
}

impl Game<StdRng> {
    /// Starts a new run. Seeded configs are fully reproducible.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Game<R> {
    /// Starts a new run drawing from the given random source.
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let map = generate_map(config.map_size, &mut rng);
        let mut player = Player::new();
        player.position = home_position(&map);
        info!(
            "new game on a {}x{} map, home is region {}",
            map.size(),
            map.size(),
            map.home_id()
        );
        Ok(Self {
            config,
            map,
            player,
            battle: None,
            game_over: false,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn map(&self) -> &WorldMap {
        &self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    /// Mutable access for front ends applying effects outside the command
    /// set. A position left inconsistent is repaired on the next command.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn state(&self) -> GameStatus {
        if self.game_over {
            GameStatus::GameOver
        } else if !self.player.is_alive() {
            GameStatus::Dead
        } else if self.battle.is_some() {
            GameStatus::InBattle
        } else {
            GameStatus::Exploring
        }
    }

    pub fn status(&self) -> StatusSnapshot {
        let player = &self.player;
        let region = self.map.region(player.position.region_id);
        let equipment = player.equipment();
        StatusSnapshot {
            status: self.state(),
            level: player.level,
            xp: player.xp,
            xp_to_next: player.xp_to_next,
            hp: player.hp(),
            max_hp: player.max_hp(),
            attack: player.attack(),
            defense: player.defense(),
            crit_chance: player.crit_chance(),
            curse_probability: player.curse_probability(),
            strength: player.attributes().strength(),
            agility: player.attributes().agility(),
            vitality: player.attributes().vitality(),
            luck: player.attributes().luck(),
            currency: player.currency(),
            attack_bonus: player.blessings().attack_bonus,
            gold_bonus_percent: player.blessings().gold_bonus_percent,
            max_hp_penalty: player.curses().max_hp_penalty,
            attack_penalty: player.curses().attack_penalty,
            position: player.position,
            region_name: region.map(|r| r.name),
            distance_from_home: region.map(|r| r.distance_from_home),
            map_size: self.map.size(),
            explored_regions: self.map.explored_count(),
            total_regions: self.map.region_count(),
            inventory: player
                .inventory()
                .iter()
                .map(|(&id, &count)| (consumable(id).name, count))
                .collect(),
            owned_equipment: equipment.owned().map(equipment_name).collect(),
            equipped_armors: equipment.armors().iter().map(|&id| equipment_name(id)).collect(),
            equipped_weapon: equipment.weapon().map(equipment_name),
            monster: self.battle.as_ref().map(|b| b.monster.clone()),
        }
    }

    // Movement and exploration

    /// Steps one region, wrapping at the edges.
    pub fn move_player(&mut self, direction: Direction) -> Result<TurnReport, GameError> {
        if let Some(repaired) = self.begin(false)? {
            return Ok(repaired);
        }
        let mut report = TurnReport::default();
        self.ensure_no_battle()?;

        let Position { x, y, .. } = self.player.position;
        let (nx, ny) = step(self.map.size(), x, y, direction);
        match self.map.region_at(nx, ny) {
            Some(region) => {
                self.player.position.region_id = region.id;
                self.player.position.x = nx;
                self.player.position.y = ny;
                report.say(format!(
                    "You head {} to {} ({} from home{}).",
                    direction.name(),
                    region.name,
                    region.distance_from_home,
                    if region.explored { ", explored" } else { "" }
                ));
                report.push(GameEvent::Moved {
                    region_id: region.id,
                    x: nx,
                    y: ny,
                    distance: region.distance_from_home,
                });
            }
            None => {
                report.say("That way is blocked. You stay where you are.");
            }
        }
        Ok(self.finish(report))
    }

    /// Explores the current region. A monster outcome leaves a battle
    /// pending for `attack`, `fight` or `flee`.
    pub fn explore(&mut self) -> Result<TurnReport, GameError> {
        if let Some(repaired) = self.begin(false)? {
            return Ok(repaired);
        }
        let mut report = TurnReport::default();
        self.ensure_no_battle()?;

        let region_id = self.player.position.region_id;
        let explored = explore_region(
            &mut self.map,
            &mut self.player,
            region_id,
            self.config.allow_revisits,
            &mut self.rng,
        )?;

        report.messages.extend(explored.messages);
        report.push(GameEvent::Explored {
            region_id,
            outcome: explored.outcome,
            first_visit: explored.first_visit,
            gold: explored.gold,
            xp: explored.xp,
        });
        if let Some(item) = explored.found {
            report.push(GameEvent::ItemObtained { item });
        }
        self.push_level_ups(&mut report, self.player.level - explored.levels_gained);

        if let Some(monster) = explored.encounter {
            report.push(GameEvent::BattleStarted {
                monster: monster.clone(),
            });
            self.battle = Some(Battle::new(monster, explored.multiplier));
        }

        if self.map.all_explored() {
            self.expand(&mut report);
        }
        Ok(self.finish(report))
    }

    // Combat

    /// Resolves a single combat round.
    pub fn attack(&mut self) -> Result<TurnReport, GameError> {
        if let Some(repaired) = self.begin(false)? {
            return Ok(repaired);
        }
        let mut report = TurnReport::default();
        let stalemate_rounds = self.config.stalemate_rounds;
        let level_before = self.player.level;

        let battle = self.battle.as_mut().ok_or(GameError::NoActiveBattle)?;
        let result = battle.resolve_round(&mut self.player, stalemate_rounds, &mut self.rng);

        self.apply_round(&mut report, result);
        self.push_level_ups(&mut report, level_before);
        Ok(self.finish(report))
    }

    /// Resolves the pending battle to the end.
    pub fn fight(&mut self) -> Result<TurnReport, GameError> {
        if let Some(repaired) = self.begin(false)? {
            return Ok(repaired);
        }
        let mut report = TurnReport::default();
        let stalemate_rounds = self.config.stalemate_rounds;
        let level_before = self.player.level;

        let battle = self.battle.as_mut().ok_or(GameError::NoActiveBattle)?;
        let rounds = battle.resolve_all(&mut self.player, stalemate_rounds, &mut self.rng);

        for result in rounds {
            self.apply_round(&mut report, result);
        }
        self.push_level_ups(&mut report, level_before);
        Ok(self.finish(report))
    }

    /// Runs from the pending battle. Costs more hp before the first round
    /// than once blows have been traded.
    pub fn flee(&mut self) -> Result<TurnReport, GameError> {
        if let Some(repaired) = self.begin(false)? {
            return Ok(repaired);
        }
        let mut report = TurnReport::default();
        let battle = self.battle.as_ref().ok_or(GameError::NoActiveBattle)?;
        let cost = if battle.has_started() {
            self.config.retreat_flee_cost
        } else {
            self.config.encounter_flee_cost
        };

        let result = battle.flee(&mut self.player, cost);
        self.apply_round(&mut report, result);
        Ok(self.finish(report))
    }

    // Home

    /// Rests at home for 5 + VIT/2 hp.
    pub fn rest(&mut self) -> Result<TurnReport, GameError> {
        if let Some(repaired) = self.begin(false)? {
            return Ok(repaired);
        }
        let mut report = TurnReport::default();
        self.ensure_no_battle()?;
        if !self.player.is_at_home() {
            return Err(GameError::NotAtHome);
        }
        if self.player.is_full_hp() {
            return Err(GameError::AlreadyFullHp);
        }

        let amount = REST_BASE_HEAL + self.player.attributes().vitality() / REST_VITALITY_DIVISOR;
        let healed = self.player.heal(Some(amount));
        report.say(format!(
            "You rest at home and recover {} hp ({}/{}).",
            healed,
            self.player.hp(),
            self.player.max_hp()
        ));
        report.push(GameEvent::Healed { amount: healed });
        Ok(self.finish(report))
    }

    pub fn buy(&mut self, item_name: &str) -> Result<TurnReport, GameError> {
        if let Some(repaired) = self.begin(false)? {
            return Ok(repaired);
        }
        let mut report = TurnReport::default();
        self.ensure_no_battle()?;
        let item = lookup(item_name)?;
        if !self.player.is_at_home() {
            return Err(GameError::NotAtHome);
        }

        report.say(purchase(&mut self.player, item)?);
        report.push(GameEvent::ItemObtained { item });
        Ok(self.finish(report))
    }

    // Equipment and items

    pub fn equip(&mut self, item_name: &str) -> Result<TurnReport, GameError> {
        if let Some(repaired) = self.begin(false)? {
            return Ok(repaired);
        }
        let mut report = TurnReport::default();
        self.ensure_no_battle()?;
        let id = lookup_equipment(item_name)?;

        self.player.equip(id)?;
        report.say(format!(
            "You equip the {} ({}). HP {}/{}, ATK {}.",
            equipment_name(id),
            equipment(id).slot.name().to_lowercase(),
            self.player.hp(),
            self.player.max_hp(),
            self.player.attack()
        ));
        if self.player.equipment().has_full_set() {
            report.say("The full manhole set clanks together. You feel sturdier and strangely lucky.");
        }
        Ok(self.finish(report))
    }

    pub fn unequip(&mut self, item_name: &str) -> Result<TurnReport, GameError> {
        if let Some(repaired) = self.begin(false)? {
            return Ok(repaired);
        }
        let mut report = TurnReport::default();
        self.ensure_no_battle()?;
        let id = lookup_equipment(item_name)?;

        self.player.unequip(id)?;
        report.say(format!(
            "You take off the {}. HP {}/{}, ATK {}.",
            equipment_name(id),
            self.player.hp(),
            self.player.max_hp(),
            self.player.attack()
        ));
        Ok(self.finish(report))
    }

    /// Uses one consumable. Soup works mid-battle; the hatch does not.
    pub fn use_consumable(&mut self, item_name: &str) -> Result<TurnReport, GameError> {
        if let Some(repaired) = self.begin(false)? {
            return Ok(repaired);
        }
        let mut report = TurnReport::default();
        let id = match lookup(item_name)? {
            ItemRef::Consumable(id) => id,
            ItemRef::Equipment(id) => return Err(GameError::NotConsumable(equipment_name(id))),
        };
        if self.player.consumable_count(id) == 0 {
            return Err(GameError::OutOfStock(consumable(id).name));
        }

        match id {
            ConsumableId::SpicySoup => {
                if self.player.is_full_hp() {
                    return Err(GameError::AlreadyFullHp);
                }
                self.player.take_consumable(id)?;
                let amount =
                    SOUP_BASE_HEAL + self.player.attributes().vitality() / SOUP_VITALITY_DIVISOR;
                let healed = self.player.heal(Some(amount));
                report.say(format!(
                    "The spicy soup warms you up. +{} hp ({}/{}).",
                    healed,
                    self.player.hp(),
                    self.player.max_hp()
                ));
                report.push(GameEvent::Healed { amount: healed });
            }
            ConsumableId::SewerHatch => {
                self.ensure_no_battle()?;
                self.player.take_consumable(id)?;
                self.return_home();
                report.say("You drop through the sewer hatch and climb out at home.");
                report.push(GameEvent::Teleported {
                    region_id: self.player.position.region_id,
                });
            }
        }
        Ok(self.finish(report))
    }

    // Death

    /// Pays to come back to life at home with a third of max hp.
    pub fn resurrect(&mut self) -> Result<TurnReport, GameError> {
        if let Some(repaired) = self.begin(true)? {
            return Ok(repaired);
        }
        let mut report = TurnReport::default();
        if self.player.is_alive() {
            return Err(GameError::PlayerAlive);
        }
        let cost = self.config.resurrection_cost;
        if self.player.currency() < cost {
            return Err(GameError::CannotAffordResurrection {
                cost,
                available: self.player.currency(),
            });
        }

        self.player.spend_currency(cost)?;
        let hp = (self.player.max_hp() / self.config.resurrection_hp_divisor).max(1);
        self.player.revive(hp);
        self.return_home();
        info!("player resurrected with {} hp", self.player.hp());

        report.say(format!(
            "You pay {} gold and wake up at home with {} hp.",
            cost,
            self.player.hp()
        ));
        report.push(GameEvent::Resurrected {
            hp: self.player.hp(),
        });
        Ok(self.finish(report))
    }

    /// Declines resurrection and ends the run.
    pub fn give_up(&mut self) -> Result<TurnReport, GameError> {
        if let Some(repaired) = self.begin(true)? {
            return Ok(repaired);
        }
        let mut report = TurnReport::default();
        if self.player.is_alive() {
            return Err(GameError::PlayerAlive);
        }
        self.game_over = true;
        info!("run ended at level {}", self.player.level);
        report.say(format!(
            "Your journey ends at level {} with {} gold.",
            self.player.level,
            self.player.currency()
        ));
        report.push(GameEvent::RunEnded);
        Ok(self.finish(report))
    }

    // Internals

    /// Common entry for every command: rejects commands the current state
    /// does not allow. When the player's position had to be repaired, the
    /// repair report comes back instead and the command itself does not run.
    fn begin(&mut self, while_dead: bool) -> Result<Option<TurnReport>, GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        if !self.player.is_alive() && !while_dead {
            return Err(GameError::PlayerDefeated);
        }
        Ok(self.repair_position().map(|report| self.finish(report)))
    }

    fn ensure_no_battle(&self) -> Result<(), GameError> {
        if self.battle.is_some() {
            return Err(GameError::BattleInProgress);
        }
        Ok(())
    }

    /// Rebuilds the map and sends the player home when their position does
    /// not match a region on the current map.
    fn repair_position(&mut self) -> Option<TurnReport> {
        let pos = self.player.position;
        let consistent = self
            .map
            .region(pos.region_id)
            .is_some_and(|r| r.x == pos.x && r.y == pos.y)
            && pos.home_region_id == self.map.home_id();
        if consistent {
            return None;
        }

        warn!(
            "player position {:?} is not on the {}x{} map, rebuilding",
            pos,
            self.map.size(),
            self.map.size()
        );
        self.map = generate_map(self.map.size(), &mut self.rng);
        self.battle = None;
        self.player.position = home_position(&self.map);

        let mut report = TurnReport::default();
        report.say("The world shimmers and reforms around you. You find yourself back home.");
        report.push(GameEvent::PositionReset {
            region_id: self.player.position.region_id,
        });
        Some(report)
    }

    fn expand(&mut self, report: &mut TurnReport) {
        let old_id = self.player.position.region_id;
        expand_map(&mut self.map, &mut self.rng);

        match self.map.relocate_id(old_id).and_then(|id| self.map.region(id)) {
            Some(region) => {
                self.player.position = Position {
                    region_id: region.id,
                    x: region.x,
                    y: region.y,
                    home_region_id: self.map.home_id(),
                };
            }
            None => self.player.position = home_position(&self.map),
        }

        report.say(format!(
            "Every region has been explored. The world grows to {}x{}!",
            self.map.size(),
            self.map.size()
        ));
        report.push(GameEvent::MapExpanded {
            size: self.map.size(),
        });
    }

    fn return_home(&mut self) {
        self.player.position = home_position(&self.map);
    }

    fn apply_round(&mut self, report: &mut TurnReport, result: RoundResult) {
        report.messages.extend(result.messages);
        report.push(GameEvent::Round {
            round: result.round,
            monster_hp: result.monster_hp,
            player_hp: result.player_hp,
        });

        let Some(outcome) = result.outcome else {
            return;
        };
        self.battle = None;
        report.push(GameEvent::BattleEnded { outcome });

        if let Some(item) = result.rewards.and_then(|r| r.drop) {
            report.push(GameEvent::ItemObtained {
                item: ItemRef::Equipment(item),
            });
        }
        if outcome == BattleOutcome::Defeat {
            info!("player died at level {}", self.player.level);
            report.say(format!(
                "You have fallen. Resurrect for {} gold, or give up.",
                self.config.resurrection_cost
            ));
            report.push(GameEvent::Died);
        }
    }

    fn push_level_ups(&self, report: &mut TurnReport, level_before: u32) {
        for level in level_before + 1..=self.player.level {
            report.push(GameEvent::LevelUp { level });
        }
    }

    /// Applies the wielded weapon's message prefix
    fn finish(&self, mut report: TurnReport) -> TurnReport {
        if let Some(prefix) = self.player.equipment().message_prefix() {
            for message in &mut report.messages {
                *message = format!("{} {}", prefix, message);
            }
        }
        debug!("turn produced {} messages", report.messages.len());
        report
    }
}

fn home_position(map: &WorldMap) -> Position {
    let (x, y) = map.home_position();
    Position {
        region_id: map.home_id(),
        x,
        y,
        home_region_id: map.home_id(),
    }
}

fn equipment_name(id: EquipmentId) -> &'static str {
    equipment(id).name
}

fn lookup(item_name: &str) -> Result<ItemRef, GameError> {
    find_item(item_name).ok_or_else(|| GameError::UnknownItem(item_name.trim().to_string()))
}

fn lookup_equipment(item_name: &str) -> Result<EquipmentId, GameError> {
    match lookup(item_name)? {
        ItemRef::Equipment(id) => Ok(id),
        ItemRef::Consumable(id) => Err(GameError::NotEquippable(consumable(id).name)),
    }
}
