use crate::error::PartrackError;
use crate::model::{GameMode, Round, now_epoch_millis};
use crate::storage::{RoundLocks, Storage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderDirection {
    Up,
    Down,
}

impl ReorderDirection {
    /// # Errors
    ///
    /// Will return `Err` if the input is neither "up" nor "down"
    pub fn parse(input: &str) -> Result<Self, PartrackError> {
        match input {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(PartrackError::Invalid(format!(
                "unknown direction '{other}'"
            ))),
        }
    }
}

/// All round mutations go through here. Each operation loads the round,
/// changes it in memory and writes the whole round back, holding the
/// round's lock for the full cycle so concurrent edits apply one at a time.
pub struct RoundScoringEngine<'a> {
    storage: &'a dyn Storage,
    locks: &'a RoundLocks,
}

impl<'a> RoundScoringEngine<'a> {
    #[must_use]
    pub fn new(storage: &'a dyn Storage, locks: &'a RoundLocks) -> Self {
        Self { storage, locks }
    }

    /// # Errors
    ///
    /// Will return `Err` when the name is blank, the hole count is 0, the
    /// roster is empty, or the write fails.
    pub async fn create_round(
        &self,
        name: &str,
        holes: u32,
        player_names: Vec<String>,
        pars: Option<Vec<u32>>,
        game_mode: GameMode,
    ) -> Result<Round, PartrackError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PartrackError::Invalid("round name is required".to_string()));
        }
        if holes < 1 {
            return Err(PartrackError::Invalid(
                "a round needs at least one hole".to_string(),
            ));
        }
        if player_names.is_empty() {
            return Err(PartrackError::Invalid(
                "a round needs at least one player".to_string(),
            ));
        }

        let mut round = Round {
            round_id: 0,
            name: name.to_string(),
            date: now_epoch_millis(),
            holes,
            player_names,
            is_finished: false,
            scores: std::collections::HashMap::new(),
            pars,
            game_mode,
        };
        round.round_id = self.storage.save_round(&round).await?;
        Ok(round)
    }

    /// Record `strokes` for a player on a hole. 0 clears the hole on the
    /// display while staying stored.
    ///
    /// # Errors
    ///
    /// Will return `Err` when the round or player is unknown, the hole is
    /// outside the round, or the write fails.
    pub async fn set_score(
        &self,
        round_id: i64,
        player: &str,
        hole: u32,
        strokes: u32,
    ) -> Result<Round, PartrackError> {
        let lock = self.locks.lock_for(round_id).await;
        let _guard = lock.lock().await;

        let mut round = self.load(round_id).await?;
        Self::check_score_target(&round, player, hole)?;

        round
            .scores
            .entry(player.to_string())
            .or_default()
            .insert(hole, strokes);
        self.storage.save_round(&round).await?;
        Ok(round)
    }

    /// Step a score up or down by one, clamping at 0. A hole with no score
    /// steps up from 0.
    ///
    /// # Errors
    ///
    /// Same failure cases as [`Self::set_score`].
    pub async fn adjust_score(
        &self,
        round_id: i64,
        player: &str,
        hole: u32,
        delta: i64,
    ) -> Result<Round, PartrackError> {
        let lock = self.locks.lock_for(round_id).await;
        let _guard = lock.lock().await;

        let mut round = self.load(round_id).await?;
        Self::check_score_target(&round, player, hole)?;

        let holes = round.scores.entry(player.to_string()).or_default();
        let current = holes.get(&hole).copied().unwrap_or(0);
        let next = i64::from(current).saturating_add(delta).max(0) as u32;
        holes.insert(hole, next);

        self.storage.save_round(&round).await?;
        Ok(round)
    }

    /// Replace the par of one hole, by 0-based index into the pars
    /// sequence. Rounds without pars and indexes past the end leave the
    /// round untouched; both come up in normal use (blank rounds, shrunk
    /// courses) and neither is worth failing over.
    ///
    /// # Errors
    ///
    /// Will return `Err` when the round is unknown or the write fails.
    pub async fn set_par(
        &self,
        round_id: i64,
        hole_index: usize,
        par: u32,
    ) -> Result<Round, PartrackError> {
        let lock = self.locks.lock_for(round_id).await;
        let _guard = lock.lock().await;

        let mut round = self.load(round_id).await?;
        let mut changed = false;
        if let Some(pars) = round.pars.as_mut() {
            if let Some(slot) = pars.get_mut(hole_index) {
                *slot = par;
                changed = true;
            }
        }
        if changed {
            self.storage.save_round(&round).await?;
        }
        Ok(round)
    }

    /// Rename the round, move its date, or resize it. Shrinking keeps any
    /// scores recorded beyond the new count; they reappear if the count
    /// grows back.
    ///
    /// # Errors
    ///
    /// Will return `Err` when the round is unknown, the name is blank, the
    /// hole count is 0, or the write fails.
    pub async fn update_details(
        &self,
        round_id: i64,
        name: &str,
        date: i64,
        holes: u32,
    ) -> Result<Round, PartrackError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PartrackError::Invalid("round name is required".to_string()));
        }
        if holes < 1 {
            return Err(PartrackError::Invalid(
                "a round needs at least one hole".to_string(),
            ));
        }

        let lock = self.locks.lock_for(round_id).await;
        let _guard = lock.lock().await;

        let mut round = self.load(round_id).await?;
        round.name = name.to_string();
        round.date = date;
        round.holes = holes;
        self.storage.save_round(&round).await?;
        Ok(round)
    }

    /// Swap a player with their neighbor in the tee order for hole 1.
    /// Already at the edge is a no-op. Scores are keyed by name and stay
    /// put.
    ///
    /// # Errors
    ///
    /// Will return `Err` when the round or player is unknown or the write
    /// fails.
    pub async fn move_player(
        &self,
        round_id: i64,
        player: &str,
        direction: ReorderDirection,
    ) -> Result<Round, PartrackError> {
        let lock = self.locks.lock_for(round_id).await;
        let _guard = lock.lock().await;

        let mut round = self.load(round_id).await?;
        let Some(idx) = round.player_names.iter().position(|name| name == player) else {
            return Err(PartrackError::NotFound(format!(
                "player '{player}' in round {round_id}"
            )));
        };

        let swap_with = match direction {
            ReorderDirection::Up if idx > 0 => Some(idx - 1),
            ReorderDirection::Down if idx + 1 < round.player_names.len() => Some(idx + 1),
            _ => None,
        };

        if let Some(other) = swap_with {
            round.player_names.swap(idx, other);
            self.storage.save_round(&round).await?;
        }
        Ok(round)
    }

    /// Mark the round finished. Idempotent.
    ///
    /// # Errors
    ///
    /// Will return `Err` when the round is unknown or the write fails.
    pub async fn finish(&self, round_id: i64) -> Result<Round, PartrackError> {
        let lock = self.locks.lock_for(round_id).await;
        let _guard = lock.lock().await;

        let mut round = self.load(round_id).await?;
        if !round.is_finished {
            round.is_finished = true;
            self.storage.save_round(&round).await?;
        }
        Ok(round)
    }

    /// # Errors
    ///
    /// Will return `Err` when the delete fails.
    pub async fn delete(&self, round_id: i64) -> Result<(), PartrackError> {
        let lock = self.locks.lock_for(round_id).await;
        let _guard = lock.lock().await;

        self.storage.delete_round(round_id).await?;
        self.locks.forget(round_id).await;
        Ok(())
    }

    fn check_score_target(round: &Round, player: &str, hole: u32) -> Result<(), PartrackError> {
        if !round.player_names.iter().any(|name| name == player) {
            return Err(PartrackError::NotFound(format!(
                "player '{player}' in round {}",
                round.round_id
            )));
        }
        if hole < 1 || hole > round.holes {
            return Err(PartrackError::Invalid(format!(
                "hole {hole} is outside this round"
            )));
        }
        Ok(())
    }

    async fn load(&self, round_id: i64) -> Result<Round, PartrackError> {
        self.storage
            .get_round(round_id)
            .await?
            .map(|stored| stored.round)
            .ok_or_else(|| PartrackError::NotFound(format!("round {round_id}")))
    }
}
