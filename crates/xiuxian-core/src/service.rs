//! The exploration orchestrator.
//!
//! [`ExplorationService`] is the public face of the core: it loads the
//! player, drives the event engine check by check, commits each event
//! through the store, and answers the client's follow-up choices.
//!
//! Each call owns its random source. Nothing is shared between concurrent
//! calls except the store, and the service assumes a given player runs at
//! most one exploration at a time.

use std::sync::Arc;

use tracing::{debug, info, warn};
use xiuxian_types::{ChoiceRewards, ChoiceValue, EventType, ExplorationReport, RewardKind, UserId};

use crate::attributes;
use crate::config::ExplorationConfig;
use crate::engine::{EventEngine, MONSTER_NAME, check_count};
use crate::error::ExplorationError;
use crate::persist;
use crate::random::{EntropySource, RandomSource};
use crate::store::ExplorationStore;

/// Log line when an exploration produced no events.
pub const QUIET_EXPLORATION_LINE: &str = "探索了一段时间，未发生特殊事件";

/// Herb granted by the collect choice on a herb event.
pub const DEFAULT_HERB_ID: &str = "spirit_grass";

/// Runs explorations and event choices against a store.
#[derive(Debug)]
pub struct ExplorationService<S> {
    store: Arc<S>,
    engine: EventEngine,
    config: ExplorationConfig,
}

impl<S> Clone for ExplorationService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            engine: self.engine,
            config: self.config.clone(),
        }
    }
}

impl<S: ExplorationStore> ExplorationService<S> {
    /// A service over the standard catalogues.
    pub fn new(store: Arc<S>, config: ExplorationConfig) -> Self {
        Self::with_engine(store, EventEngine::default(), config)
    }

    /// A service with a custom engine.
    pub const fn with_engine(store: Arc<S>, engine: EventEngine, config: ExplorationConfig) -> Self {
        Self {
            store,
            engine,
            config,
        }
    }

    /// The underlying store.
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The event engine.
    pub const fn engine(&self) -> &EventEngine {
        &self.engine
    }

    /// The exploration settings.
    pub const fn config(&self) -> &ExplorationConfig {
        &self.config
    }

    /// Explore for `duration_ms` with a freshly seeded random source.
    pub async fn start_exploration(
        &self,
        user_id: UserId,
        duration_ms: u64,
    ) -> Result<ExplorationReport, ExplorationError> {
        let mut rng = EntropySource::from_entropy();
        self.start_exploration_with(user_id, duration_ms, &mut rng)
            .await
    }

    /// Explore for `duration_ms` drawing from `rng`.
    ///
    /// Every event is flushed before the next check runs. On a write
    /// failure the exploration stops and the error is returned; earlier
    /// writes remain. The participation reward is credited last.
    pub async fn start_exploration_with<R>(
        &self,
        user_id: UserId,
        duration_ms: u64,
        rng: &mut R,
    ) -> Result<ExplorationReport, ExplorationError>
    where
        R: RandomSource + Send,
    {
        let mut player = self
            .store
            .load_player(user_id)
            .await
            .map_err(|source| ExplorationError::PlayerLoad { user_id, source })?;

        let luck = attributes::luck(&player.attributes);
        let checks = check_count(duration_ms);
        info!(%user_id, duration_ms, checks, luck, "exploration started");

        let mut events = Vec::new();
        let mut log = String::new();
        for check in 0..checks {
            if !self.engine.gate(luck, rng) {
                continue;
            }
            let Some(kind) = self.engine.select_kind(rng) else {
                continue;
            };
            let Some(resolution) = self.engine.resolve(kind, &player, rng) else {
                continue;
            };
            let event = persist::commit(self.store.as_ref(), &self.engine, &mut player, resolution)
                .await
                .inspect_err(|e| warn!(%user_id, check, error = %e, "exploration aborted"))?;
            debug!(%user_id, check, kind = kind.as_str(), "event fired");
            push_line(&mut log, &event.description);
            events.push(event);
        }

        if events.is_empty() {
            log.push_str(QUIET_EXPLORATION_LINE);
            log.push('\n');
        }

        persist::award_participation(
            self.store.as_ref(),
            &mut player,
            self.config.participation_reward,
        )
        .await
        .inspect_err(|e| warn!(%user_id, error = %e, "participation reward not credited"))?;

        info!(
            %user_id,
            checks,
            events = events.len(),
            spirit_stones = player.spirit_stones,
            "exploration finished"
        );
        Ok(ExplorationReport {
            events,
            log,
            checks,
        })
    }

    /// Answer a choice on an event, with a freshly seeded random source.
    pub async fn handle_event_choice(
        &self,
        user_id: UserId,
        event_type: &str,
        choice: Option<ChoiceValue>,
    ) -> Result<ChoiceRewards, ExplorationError> {
        let mut rng = EntropySource::from_entropy();
        self.handle_event_choice_with(user_id, event_type, choice, &mut rng)
            .await
    }

    /// Answer a choice on an event, drawing from `rng`.
    ///
    /// Unknown event types are rejected before the store is touched.
    pub async fn handle_event_choice_with<R>(
        &self,
        user_id: UserId,
        event_type: &str,
        choice: Option<ChoiceValue>,
        rng: &mut R,
    ) -> Result<ChoiceRewards, ExplorationError>
    where
        R: RandomSource + Send,
    {
        let Some(kind) = EventType::parse(event_type) else {
            return Err(ExplorationError::UnknownEventType(event_type.to_owned()));
        };
        debug!(%user_id, event_type = kind.as_str(), ?choice, "event choice");

        let rewards = match kind {
            EventType::ItemFound => ChoiceRewards::message(RewardKind::Item, "获得了物品"),
            EventType::SpiritStoneFound => {
                ChoiceRewards::message(RewardKind::SpiritStone, "获得了灵石")
            }
            EventType::HerbFound => self.collect_default_herb(user_id).await?,
            EventType::PillRecipeFragment => {
                ChoiceRewards::message(RewardKind::PillFragment, "丹方残页已收入囊中")
            }
            EventType::BattleEncounter => self.battle(user_id, choice, rng).await?,
        };
        Ok(rewards)
    }

    /// Zero-delta upsert: makes sure the row exists without changing its count.
    async fn collect_default_herb(&self, user_id: UserId) -> Result<ChoiceRewards, ExplorationError> {
        let Some(herb) = self.engine.catalogue().herb(DEFAULT_HERB_ID) else {
            return Ok(ChoiceRewards::message(RewardKind::Herb, "灵草已收入囊中"));
        };
        let row = self
            .store
            .upsert_herb(user_id, herb.id, herb.name, 0)
            .await
            .map_err(ExplorationError::persist("herb_found choice"))?;
        Ok(ChoiceRewards::message(
            RewardKind::Herb,
            &format!("{}已收入囊中（共{}株）", row.name, row.count),
        ))
    }

    async fn battle<R>(
        &self,
        user_id: UserId,
        choice: Option<ChoiceValue>,
        rng: &mut R,
    ) -> Result<ChoiceRewards, ExplorationError>
    where
        R: RandomSource + Send,
    {
        if choice == Some(ChoiceValue::Flee) {
            return Ok(ChoiceRewards::message(
                RewardKind::Battle,
                &format!("你避开了{MONSTER_NAME}，全身而退"),
            ));
        }
        if !rng.coin_flip() {
            return Ok(ChoiceRewards::message(
                RewardKind::Battle,
                &format!("你不敌{MONSTER_NAME}，只得狼狈逃回"),
            ));
        }

        let reward = rng.next_in_range(self.config.battle_reward_min, self.config.battle_reward_max);
        let balance = self
            .store
            .credit_spirit_stones(user_id, reward)
            .await
            .map_err(ExplorationError::persist("battle reward"))?;
        info!(%user_id, reward, balance, "battle won");

        Ok(ChoiceRewards {
            kind: RewardKind::Battle,
            message: format!("你击败了{MONSTER_NAME}，获得{reward}块灵石"),
            reward: Some(reward),
        })
    }
}

fn push_line(log: &mut String, description: &str) {
    log.push_str("[事件]");
    log.push_str(description);
    log.push('\n');
}
