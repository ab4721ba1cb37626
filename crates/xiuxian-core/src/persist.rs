//! Commits resolved events through the store boundary.
//!
//! Every write happens in the order events fire, one call per event, and
//! each failure aborts the exploration with the event's id as context.
//! Writes already flushed stay flushed.

use tracing::debug;
use xiuxian_types::{ExplorationEvent, Player};

use crate::engine::{EventEngine, Resolution};
use crate::error::ExplorationError;
use crate::store::ExplorationStore;

/// Context for the end-of-exploration stone grant.
pub const PARTICIPATION_CONTEXT: &str = "participation_reward";

/// Apply `resolution` to the in-memory snapshot, flush it, and return the
/// event to report.
pub async fn commit<S: ExplorationStore>(
    store: &S,
    engine: &EventEngine,
    player: &mut Player,
    resolution: Resolution,
) -> Result<ExplorationEvent, ExplorationError> {
    match resolution {
        Resolution::Stats { event, update } => {
            update.apply_to(player);
            store
                .update_player_fields(player.id, &update)
                .await
                .map_err(ExplorationError::persist(event.kind.as_str()))?;
            debug!(user_id = %player.id, kind = event.kind.as_str(), "stats flushed");
            Ok(event)
        }
        Resolution::Herb {
            herb,
            quality,
            value,
        } => {
            let row = store
                .upsert_herb(player.id, herb.id, herb.name, 1)
                .await
                .map_err(ExplorationError::persist("herb_discovery"))?;
            debug!(user_id = %player.id, herb = herb.id, quality = quality.as_str(), count = row.count, "herb granted");
            Ok(engine.herb_event(herb, quality, value, &row))
        }
        Resolution::Fragment { recipe } => {
            let row = store
                .upsert_fragment(player.id, recipe.id, 1)
                .await
                .map_err(ExplorationError::persist("pill_recipe_fragment"))?;
            debug!(user_id = %player.id, recipe = recipe.id, count = row.count, "recipe page granted");
            Ok(engine.fragment_event(recipe, &row))
        }
    }
}

/// Credit the flat participation reward as one increment.
pub async fn award_participation<S: ExplorationStore>(
    store: &S,
    player: &mut Player,
    reward: i64,
) -> Result<(), ExplorationError> {
    player.spirit_stones = store
        .credit_spirit_stones(player.id, reward)
        .await
        .map_err(ExplorationError::persist(PARTICIPATION_CONTEXT))?;
    Ok(())
}
