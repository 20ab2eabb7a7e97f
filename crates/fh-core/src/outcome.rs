//! Scenario outcome evaluation (game over checks)
//!
//! Run once per turn boundary, and again after player actions that can end
//! the scenario on the spot (finishing a quest, digging up the ultimate
//! artifact). Decides whether the scenario is over, for whom, and which
//! mode the host switches to next.
//!
//! Single-player and multiplayer games are handled differently:
//!
//! - with exactly one human slot, only that kingdom's conditions matter and
//!   the result is kept in [`EvaluationState`] so the host can score it;
//! - with several human slots, only the player whose turn it is gets checked,
//!   and the result is not kept because no single player owns it.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::color::{Color, ColorSet};
use crate::condition::ConditionFlags;
use crate::kingdom::{KingdomQuery, WorldLookup};
use crate::message::{defeat_message, victory_message};
use crate::presentation::PresentationSink;
use crate::scenario::ScenarioContext;
use crate::stream::{StreamError, StreamReader, StreamWriter};

/// What the host should do after a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum GameTransition {
    /// Keep playing
    Cancel,
    EndTurn,
    MainMenu,
    Highscores,
    CompleteCampaignScenario,
    NewGame,
    LoadGame,
    QuitGame,
}

/// Outcome bookkeeping that lives for one scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvaluationState {
    active_colors: ColorSet,
    last_result: ConditionFlags,
    continue_after_victory: bool,
}

impl EvaluationState {
    pub fn new(active_colors: ColorSet) -> Self {
        Self {
            active_colors,
            last_result: ConditionFlags::COND_NONE,
            continue_after_victory: false,
        }
    }

    /// Colors still in play
    pub fn active_colors(&self) -> ColorSet {
        self.active_colors
    }

    pub fn last_result(&self) -> ConditionFlags {
        self.last_result
    }

    pub fn continue_after_victory(&self) -> bool {
        self.continue_after_victory
    }

    /// Write as `(colors: u32, result: u32, continue: bool)`
    pub fn write_to(&self, stream: &mut StreamWriter) {
        stream
            .put_u32(u32::from(self.active_colors.bits()))
            .put_u32(self.last_result.bits())
            .put_bool(self.continue_after_victory);
    }

    pub fn read_from<B: bytes::Buf>(stream: &mut StreamReader<B>) -> Result<Self, StreamError> {
        let colors = stream.get_u32()?;
        let active_colors = u8::try_from(colors)
            .ok()
            .and_then(ColorSet::from_bits)
            .ok_or(StreamError::InvalidColors(colors))?;

        let result = stream.get_u32()?;
        let last_result =
            ConditionFlags::from_bits(result).ok_or(StreamError::InvalidCondition(result))?;

        let continue_after_victory = stream.get_bool()?;

        Ok(Self {
            active_colors,
            last_result,
            continue_after_victory,
        })
    }
}

/// Decides when a scenario is over
#[derive(Debug, Clone, Default)]
pub struct ScenarioOutcomeEvaluator {
    state: EvaluationState,
}

impl ScenarioOutcomeEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start of a new or loaded scenario
    pub fn reset(&mut self, initial_colors: ColorSet) {
        self.state = EvaluationState::new(initial_colors);
    }

    /// Forget the last result so it does not fire again
    pub fn reset_result(&mut self) {
        self.state.last_result = ConditionFlags::COND_NONE;
    }

    pub fn result(&self) -> ConditionFlags {
        self.state.last_result
    }

    pub fn active_colors(&self) -> ColorSet {
        self.state.active_colors
    }

    pub fn continues_after_victory(&self) -> bool {
        self.state.continue_after_victory
    }

    pub fn state(&self) -> &EvaluationState {
        &self.state
    }

    /// Replace the state with one read from a save
    pub fn restore(&mut self, state: EvaluationState) {
        self.state = state;
    }

    /// Check the scenario's win/loss conditions
    pub fn evaluate<W, P>(&mut self, world: &W, ctx: &ScenarioContext, sink: &mut P) -> GameTransition
    where
        W: KingdomQuery + WorldLookup,
        P: PresentationSink,
    {
        let single_player = ctx.is_single_player();

        let roster = self.state.active_colors;
        for color in roster.iter() {
            if world.is_active(color) {
                continue;
            }
            // A solo player's own defeat is reported by the loss dialog
            if !single_player || !ctx.human_colors.contains(color) {
                sink.announce_elimination(color);
            }
            self.state.active_colors.remove(color);
            log::debug!("{} kingdom left the scenario", color);
        }

        let active_humans = self.state.active_colors.intersection(ctx.human_colors).len();
        log::trace!(
            "{} kingdoms active, {} of them human",
            self.state.active_colors.len(),
            active_humans
        );

        match ctx.human_colors.single() {
            Some(human) => {
                debug_assert!(active_humans <= 1);
                self.evaluate_single_player(human, world, ctx, sink)
            }
            None => Self::evaluate_multiplayer(active_humans, world, ctx, sink),
        }
    }

    fn evaluate_single_player<W, P>(
        &mut self,
        human: Color,
        world: &W,
        ctx: &ScenarioContext,
        sink: &mut P,
    ) -> GameTransition
    where
        W: KingdomQuery + WorldLookup,
        P: PresentationSink,
    {
        if !world.is_human_controlled(human) {
            return GameTransition::Cancel;
        }

        let settings = &ctx.settings;

        if !self.state.continue_after_victory {
            let wins = world.check_win_condition(human);
            if !wins.is_none() {
                self.state.last_result = wins;
                log::info!("{} player won the scenario: {:?}", human, wins);
                sink.announce_victory(&victory_message(wins, settings, world));

                if settings.is_campaign() {
                    return GameTransition::CompleteCampaignScenario;
                }

                sink.play_end_of_game_media(true);

                if settings.continue_after_victory
                    && world.is_in_play(human)
                    && sink.offer_continue_after_victory()
                {
                    self.state.continue_after_victory = true;
                    sink.record_highscores();
                    self.reset_result();
                    log::info!("{} player keeps playing after victory", human);
                    return GameTransition::Cancel;
                }

                return GameTransition::Highscores;
            }
        }

        // Losing everything ends the game whatever else is configured
        let loss = if !world.is_in_play(human) {
            ConditionFlags::LOSS_ALL
        } else if self.state.continue_after_victory {
            return GameTransition::Cancel;
        } else {
            world.check_loss_condition(human)
        };

        self.state.last_result = loss;
        if loss.is_none() {
            return GameTransition::Cancel;
        }

        log::info!("{} player lost the scenario: {:?}", human, loss);

        // The host already told the player when the town-less countdown ran out
        let already_reported = loss == ConditionFlags::LOSS_ALL
            && !world.has_castles(human)
            && world.lost_town_grace_days_remaining(human) == 0;
        if !already_reported {
            sink.announce_defeat(&defeat_message(loss, settings, world));
        }

        sink.play_end_of_game_media(false);
        GameTransition::MainMenu
    }

    fn evaluate_multiplayer<W, P>(
        active_humans: usize,
        world: &W,
        ctx: &ScenarioContext,
        sink: &mut P,
    ) -> GameTransition
    where
        W: KingdomQuery + WorldLookup,
        P: PresentationSink,
    {
        if active_humans == 0 {
            log::info!("no human players left");
            sink.play_end_of_game_media(false);
            return GameTransition::MainMenu;
        }

        let result = Self::current_player_outcome(world, ctx.current_color);

        if result.is_win() {
            log::info!("{} player won the scenario: {:?}", ctx.current_color, result);
            sink.announce_victory(&victory_message(result, &ctx.settings, world));
            sink.play_end_of_game_media(true);
            GameTransition::MainMenu
        } else if result.is_loss() {
            log::info!("{} player lost the scenario: {:?}", ctx.current_color, result);
            sink.announce_defeat(&defeat_message(result, &ctx.settings, world));
            sink.play_end_of_game_media(false);
            GameTransition::MainMenu
        } else {
            GameTransition::Cancel
        }
    }

    /// Conditions that end a multiplayer game for the given player
    fn current_player_outcome<W: KingdomQuery>(world: &W, color: Color) -> ConditionFlags {
        if !world.is_active(color) || !world.is_human_controlled(color) {
            return ConditionFlags::COND_NONE;
        }

        let wins = world.check_win_condition(color);
        if !wins.is_none() {
            return wins;
        }

        // LOSS_ALL only knocks this player out; LOSS_TOWN is not used in multiplayer
        let loss = world.check_loss_condition(color);
        if loss == ConditionFlags::LOSS_HERO
            || loss == ConditionFlags::LOSS_TIME
            || loss.intersects(ConditionFlags::LOSS_ENEMY_WINS)
        {
            return loss;
        }

        ConditionFlags::COND_NONE
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::kingdom::{KingdomSnapshot, KingdomTable, TownInfo};
    use crate::presentation::{Notification, RecordingSink};
    use crate::scenario::{CampaignVictory, MapPosition, ScenarioSettings};

    fn solo_world() -> KingdomTable {
        [
            KingdomSnapshot::new(Color::Blue, true),
            KingdomSnapshot::new(Color::Red, false),
            KingdomSnapshot::new(Color::Green, false),
        ]
        .into_iter()
        .collect()
    }

    fn solo_ctx(settings: ScenarioSettings) -> ScenarioContext {
        ScenarioContext::new(settings, Color::Blue.into(), Color::Blue)
    }

    fn roster() -> ColorSet {
        [Color::Blue, Color::Red, Color::Green].into_iter().collect()
    }

    fn evaluator() -> ScenarioOutcomeEvaluator {
        let mut evaluator = ScenarioOutcomeEvaluator::new();
        evaluator.reset(roster());
        evaluator
    }

    #[test]
    fn test_reset() {
        let mut evaluator = evaluator();
        assert_eq!(evaluator.active_colors(), roster());
        assert!(evaluator.result().is_none());
        assert!(!evaluator.continues_after_victory());

        evaluator.reset(Color::Red.into());
        assert_eq!(evaluator.active_colors().len(), 1);
    }

    #[test]
    fn test_nothing_happens() {
        let mut evaluator = evaluator();
        let mut sink = RecordingSink::new();
        let result = evaluator.evaluate(&solo_world(), &solo_ctx(ScenarioSettings::default()), &mut sink);
        assert_eq!(result, GameTransition::Cancel);
        assert!(sink.notifications.is_empty());
        assert!(evaluator.result().is_none());
    }

    #[test]
    fn test_ai_elimination_is_announced() {
        let mut world = solo_world();
        world.update(KingdomSnapshot::new(Color::Red, false).vanquished());

        let mut evaluator = evaluator();
        let mut sink = RecordingSink::new();
        let result = evaluator.evaluate(&world, &solo_ctx(ScenarioSettings::default()), &mut sink);

        assert_eq!(result, GameTransition::Cancel);
        assert_eq!(sink.eliminated(), vec![Color::Red]);
        assert!(!evaluator.active_colors().contains(Color::Red));

        // Only announced once
        let mut sink = RecordingSink::new();
        evaluator.evaluate(&world, &solo_ctx(ScenarioSettings::default()), &mut sink);
        assert!(sink.eliminated().is_empty());
    }

    #[test]
    fn test_single_player_win_goes_to_highscores() {
        let mut world = solo_world();
        world.get_mut(Color::Blue).unwrap().wins = ConditionFlags::WINS_GOLD;

        let mut evaluator = evaluator();
        let mut sink = RecordingSink::new();
        let result = evaluator.evaluate(&world, &solo_ctx(ScenarioSettings::default()), &mut sink);

        assert_eq!(result, GameTransition::Highscores);
        assert_eq!(evaluator.result(), ConditionFlags::WINS_GOLD);
        assert_eq!(sink.victories(), 1);
        assert_eq!(sink.media(), vec![true]);
    }

    #[test]
    fn test_single_player_campaign_win() {
        let mut world = solo_world();
        world.get_mut(Color::Blue).unwrap().wins = ConditionFlags::WINS_GOLD;
        let settings = ScenarioSettings {
            campaign: Some(CampaignVictory::Standard),
            ..ScenarioSettings::default()
        };

        let mut evaluator = evaluator();
        let mut sink = RecordingSink::new();
        let result = evaluator.evaluate(&world, &solo_ctx(settings), &mut sink);

        assert_eq!(result, GameTransition::CompleteCampaignScenario);
        assert_eq!(evaluator.result(), ConditionFlags::WINS_GOLD);
        assert_eq!(sink.victories(), 1);
        assert!(sink.media().is_empty());
    }

    #[test]
    fn test_continue_after_victory() {
        let mut world = solo_world();
        world.get_mut(Color::Blue).unwrap().wins = ConditionFlags::WINS_TOWN;
        let ctx = solo_ctx(ScenarioSettings {
            continue_after_victory: true,
            ..ScenarioSettings::default()
        });

        let mut evaluator = evaluator();
        let mut sink = RecordingSink::continuing();
        let result = evaluator.evaluate(&world, &ctx, &mut sink);

        assert_eq!(result, GameTransition::Cancel);
        assert!(evaluator.continues_after_victory());
        assert!(evaluator.result().is_none());
        assert!(sink.notifications.contains(&Notification::Highscores));

        // Win branch is never entered again, and fine-grained loss is ignored
        world.get_mut(Color::Blue).unwrap().loss = ConditionFlags::LOSS_TIME;
        let mut sink = RecordingSink::continuing();
        assert_eq!(evaluator.evaluate(&world, &ctx, &mut sink), GameTransition::Cancel);
        assert!(sink.notifications.is_empty());

        // Losing everything still ends it
        world.get_mut(Color::Blue).unwrap().in_play = false;
        let mut sink = RecordingSink::continuing();
        assert_eq!(evaluator.evaluate(&world, &ctx, &mut sink), GameTransition::MainMenu);
        assert_eq!(evaluator.result(), ConditionFlags::LOSS_ALL);
        assert_eq!(sink.defeats(), 1);
    }

    #[test]
    fn test_continue_declined() {
        let mut world = solo_world();
        world.get_mut(Color::Blue).unwrap().wins = ConditionFlags::WINS_TOWN;
        let ctx = solo_ctx(ScenarioSettings {
            continue_after_victory: true,
            ..ScenarioSettings::default()
        });

        let mut evaluator = evaluator();
        let mut sink = RecordingSink::new();
        assert_eq!(evaluator.evaluate(&world, &ctx, &mut sink), GameTransition::Highscores);
        assert!(sink.notifications.contains(&Notification::ContinueOffered));
        assert!(!evaluator.continues_after_victory());
        assert_eq!(evaluator.result(), ConditionFlags::WINS_TOWN);
    }

    #[test]
    fn test_single_player_out_of_play_is_loss_all() {
        let mut world = solo_world();
        let blue = world.get_mut(Color::Blue).unwrap();
        blue.in_play = false;
        blue.loss = ConditionFlags::LOSS_TIME;
        blue.lost_town_days = 3;

        let mut evaluator = evaluator();
        let mut sink = RecordingSink::new();
        let result = evaluator.evaluate(&world, &solo_ctx(ScenarioSettings::default()), &mut sink);

        assert_eq!(result, GameTransition::MainMenu);
        assert_eq!(evaluator.result(), ConditionFlags::LOSS_ALL);
        assert_eq!(sink.defeats(), 1);
        assert_eq!(sink.media(), vec![false]);
    }

    #[test]
    fn test_expired_town_countdown_skips_defeat_dialog() {
        let mut world = solo_world();
        let blue = world.get_mut(Color::Blue).unwrap();
        blue.in_play = false;
        blue.has_castles = false;
        blue.lost_town_days = 0;

        let mut evaluator = evaluator();
        let mut sink = RecordingSink::new();
        let result = evaluator.evaluate(&world, &solo_ctx(ScenarioSettings::default()), &mut sink);

        assert_eq!(result, GameTransition::MainMenu);
        assert_eq!(evaluator.result(), ConditionFlags::LOSS_ALL);
        assert_eq!(sink.defeats(), 0);
        assert_eq!(sink.media(), vec![false]);
    }

    #[test]
    fn test_solo_human_elimination_not_announced() {
        let mut world = solo_world();
        world.update(KingdomSnapshot::new(Color::Blue, true).vanquished());

        let mut evaluator = evaluator();
        let mut sink = RecordingSink::new();
        let result = evaluator.evaluate(&world, &solo_ctx(ScenarioSettings::default()), &mut sink);

        assert_eq!(result, GameTransition::MainMenu);
        assert!(sink.eliminated().is_empty());
        assert!(!evaluator.active_colors().contains(Color::Blue));
    }

    #[test]
    fn test_single_player_loss_condition() {
        let mut world = solo_world();
        world.get_mut(Color::Blue).unwrap().loss = ConditionFlags::LOSS_HERO;

        let mut evaluator = evaluator();
        let mut sink = RecordingSink::new();
        let result = evaluator.evaluate(&world, &solo_ctx(ScenarioSettings::default()), &mut sink);

        assert_eq!(result, GameTransition::MainMenu);
        assert_eq!(evaluator.result(), ConditionFlags::LOSS_HERO);
        match &sink.notifications[0] {
            Notification::Defeat(msg) => assert_eq!(msg.condition, ConditionFlags::LOSS_HERO),
            other => panic!("unexpected notification {other:?}"),
        }
    }

    #[test]
    fn test_not_human_controlled_is_ignored() {
        let mut world = solo_world();
        let blue = world.get_mut(Color::Blue).unwrap();
        blue.human = false;
        blue.wins = ConditionFlags::WINS_ALL;

        let mut evaluator = evaluator();
        let mut sink = RecordingSink::new();
        let result = evaluator.evaluate(&world, &solo_ctx(ScenarioSettings::default()), &mut sink);
        assert_eq!(result, GameTransition::Cancel);
        assert!(evaluator.result().is_none());
    }

    fn hotseat_world() -> KingdomTable {
        [
            KingdomSnapshot::new(Color::Blue, true),
            KingdomSnapshot::new(Color::Red, true),
            KingdomSnapshot::new(Color::Green, false),
        ]
        .into_iter()
        .collect()
    }

    fn hotseat_ctx(current: Color) -> ScenarioContext {
        let humans: ColorSet = [Color::Blue, Color::Red].into_iter().collect();
        ScenarioContext::new(ScenarioSettings::default(), humans, current)
    }

    #[test]
    fn test_multiplayer_win_is_not_stored() {
        let mut world = hotseat_world();
        world.get_mut(Color::Red).unwrap().wins = ConditionFlags::WINS_ARTIFACT;

        let mut evaluator = evaluator();
        let mut sink = RecordingSink::new();
        let result = evaluator.evaluate(&world, &hotseat_ctx(Color::Red), &mut sink);

        assert_eq!(result, GameTransition::MainMenu);
        assert_eq!(sink.victories(), 1);
        assert_eq!(sink.media(), vec![true]);
        assert!(evaluator.result().is_none());
    }

    #[test]
    fn test_multiplayer_checks_current_player_only() {
        let mut world = hotseat_world();
        world.get_mut(Color::Red).unwrap().wins = ConditionFlags::WINS_ARTIFACT;

        let mut evaluator = evaluator();
        let mut sink = RecordingSink::new();
        let result = evaluator.evaluate(&world, &hotseat_ctx(Color::Blue), &mut sink);
        assert_eq!(result, GameTransition::Cancel);
        assert!(sink.notifications.is_empty());
    }

    #[test]
    fn test_multiplayer_loss_filter() {
        let cases = [
            (ConditionFlags::LOSS_HERO, GameTransition::MainMenu),
            (ConditionFlags::LOSS_TIME, GameTransition::MainMenu),
            (ConditionFlags::LOSS_ENEMY_WINS_GOLD, GameTransition::MainMenu),
            (ConditionFlags::LOSS_ALL, GameTransition::Cancel),
            (ConditionFlags::LOSS_TOWN, GameTransition::Cancel),
        ];

        for (loss, expected) in cases {
            let mut world = hotseat_world();
            world.get_mut(Color::Blue).unwrap().loss = loss;

            let mut evaluator = evaluator();
            let mut sink = RecordingSink::new();
            let result = evaluator.evaluate(&world, &hotseat_ctx(Color::Blue), &mut sink);
            assert_eq!(result, expected, "loss {loss:?}");
            assert_eq!(sink.defeats(), usize::from(expected == GameTransition::MainMenu));
            assert!(evaluator.result().is_none());
        }
    }

    /// Table that counts win/loss predicate calls
    struct CountingWorld {
        table: KingdomTable,
        checks: Cell<usize>,
    }

    impl KingdomQuery for CountingWorld {
        fn is_active(&self, color: Color) -> bool {
            self.table.is_active(color)
        }

        fn is_human_controlled(&self, color: Color) -> bool {
            self.table.is_human_controlled(color)
        }

        fn is_in_play(&self, color: Color) -> bool {
            self.table.is_in_play(color)
        }

        fn check_win_condition(&self, color: Color) -> ConditionFlags {
            self.checks.set(self.checks.get() + 1);
            self.table.check_win_condition(color)
        }

        fn check_loss_condition(&self, color: Color) -> ConditionFlags {
            self.checks.set(self.checks.get() + 1);
            self.table.check_loss_condition(color)
        }

        fn has_castles(&self, color: Color) -> bool {
            self.table.has_castles(color)
        }

        fn lost_town_grace_days_remaining(&self, color: Color) -> u32 {
            self.table.lost_town_grace_days_remaining(color)
        }
    }

    impl WorldLookup for CountingWorld {
        fn town_at(&self, position: MapPosition) -> Option<TownInfo> {
            self.table.town_at(position)
        }

        fn victory_hero_name(&self) -> Option<String> {
            self.table.victory_hero_name()
        }

        fn loss_hero_name(&self) -> Option<String> {
            self.table.loss_hero_name()
        }

        fn artifact_name(&self, id: u32) -> Option<String> {
            self.table.artifact_name(id)
        }
    }

    #[test]
    fn test_multiplayer_no_humans_left() {
        let mut blue = KingdomSnapshot::new(Color::Blue, true).vanquished();
        blue.wins = ConditionFlags::WINS_GOLD;
        let mut red = KingdomSnapshot::new(Color::Red, true).vanquished();
        red.loss = ConditionFlags::LOSS_TIME;
        let world = CountingWorld {
            table: [blue, red, KingdomSnapshot::new(Color::Green, false)]
                .into_iter()
                .collect(),
            checks: Cell::new(0),
        };

        let mut evaluator = evaluator();
        let mut sink = RecordingSink::new();
        let result = evaluator.evaluate(&world, &hotseat_ctx(Color::Blue), &mut sink);

        assert_eq!(result, GameTransition::MainMenu);
        assert_eq!(world.checks.get(), 0);
        assert_eq!(sink.eliminated(), vec![Color::Blue, Color::Red]);
        assert_eq!(sink.media(), vec![false]);
        assert_eq!(sink.victories() + sink.defeats(), 0);
    }

    #[test]
    fn test_multiplayer_consults_predicates_while_humans_remain() {
        let world = CountingWorld {
            table: hotseat_world(),
            checks: Cell::new(0),
        };

        let mut evaluator = evaluator();
        let result = evaluator.evaluate(&world, &hotseat_ctx(Color::Red), &mut RecordingSink::new());

        assert_eq!(result, GameTransition::Cancel);
        assert_eq!(world.checks.get(), 2);
    }

    #[test]
    fn test_reset_result() {
        let mut world = solo_world();
        world.get_mut(Color::Blue).unwrap().wins = ConditionFlags::WINS_HERO;

        let mut evaluator = evaluator();
        evaluator.evaluate(&world, &solo_ctx(ScenarioSettings::default()), &mut RecordingSink::new());
        assert_eq!(evaluator.result(), ConditionFlags::WINS_HERO);

        evaluator.reset_result();
        assert!(evaluator.result().is_none());
        assert_eq!(evaluator.active_colors(), roster());
    }

    #[test]
    fn test_state_stream_layout() {
        let mut evaluator = ScenarioOutcomeEvaluator::new();
        evaluator.restore(EvaluationState {
            active_colors: ColorSet::from_bits_truncate(0b0110),
            last_result: ConditionFlags::WINS_TOWN,
            continue_after_victory: true,
        });

        let mut writer = StreamWriter::new();
        evaluator.state().write_to(&mut writer);
        let bytes = writer.finish();
        assert_eq!(&bytes[..], &[0, 0, 0, 6, 0, 0, 0, 2, 1]);

        let mut reader = StreamReader::new(bytes);
        let state = EvaluationState::read_from(&mut reader).unwrap();
        assert_eq!(&state, evaluator.state());
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_state_stream_rejects_garbage() {
        let mut reader = StreamReader::new(&[0u8, 0, 1, 0, 0, 0, 0, 0, 0][..]);
        assert_eq!(
            EvaluationState::read_from(&mut reader),
            Err(StreamError::InvalidColors(0x100))
        );

        let mut reader = StreamReader::new(&[0u8, 0, 0, 1, 0, 0, 0, 0x40, 0][..]);
        assert_eq!(
            EvaluationState::read_from(&mut reader),
            Err(StreamError::InvalidCondition(0x40))
        );

        let mut reader = StreamReader::new(&[0u8, 0, 0, 1][..]);
        assert!(matches!(
            EvaluationState::read_from(&mut reader),
            Err(StreamError::UnexpectedEof { .. })
        ));
    }
}
