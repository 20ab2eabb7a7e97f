//! Outcome notifications
//!
//! Dialogs, music and videos belong to the host. The evaluator reports what
//! happened through [`PresentationSink`] and never depends on how it is shown.

use crate::color::Color;
use crate::message::OutcomeMessage;

/// Receiver for everything the player should see when a scenario ends
pub trait PresentationSink {
    /// "%{color} player has been vanquished!"
    fn announce_elimination(&mut self, color: Color);

    fn announce_victory(&mut self, message: &OutcomeMessage);

    fn announce_defeat(&mut self, message: &OutcomeMessage);

    /// Win or lose video
    fn play_end_of_game_media(&mut self, won: bool);

    /// Ask whether to keep playing after a single-player victory
    fn offer_continue_after_victory(&mut self) -> bool;

    /// Record the finished game in the highscore table
    fn record_highscores(&mut self);
}

/// Sink that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSink {
    /// Answer given when continuing after victory is offered
    pub continue_after_victory: bool,
}

impl PresentationSink for LoggingSink {
    fn announce_elimination(&mut self, color: Color) {
        log::info!("{} player has been vanquished!", color);
    }

    fn announce_victory(&mut self, message: &OutcomeMessage) {
        log::info!("victory ({:?}): {}", message.condition, message.body);
    }

    fn announce_defeat(&mut self, message: &OutcomeMessage) {
        log::info!("defeat ({:?}): {}", message.condition, message.body);
    }

    fn play_end_of_game_media(&mut self, won: bool) {
        log::debug!("playing {} video", if won { "WIN" } else { "LOSE" });
    }

    fn offer_continue_after_victory(&mut self) -> bool {
        log::info!("continue after victory: {}", self.continue_after_victory);
        self.continue_after_victory
    }

    fn record_highscores(&mut self) {
        log::debug!("recording highscores");
    }
}

/// One notification received by a [`RecordingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Elimination(Color),
    Victory(OutcomeMessage),
    Defeat(OutcomeMessage),
    EndOfGameMedia { won: bool },
    ContinueOffered,
    Highscores,
}

/// Sink that keeps every notification, in order
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub notifications: Vec<Notification>,
    pub continue_after_victory: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that answers "yes" when asked to continue after victory
    pub fn continuing() -> Self {
        Self {
            continue_after_victory: true,
            ..Self::default()
        }
    }

    pub fn eliminated(&self) -> Vec<Color> {
        self.notifications
            .iter()
            .filter_map(|n| match n {
                Notification::Elimination(color) => Some(*color),
                _ => None,
            })
            .collect()
    }

    pub fn victories(&self) -> usize {
        self.count(|n| matches!(n, Notification::Victory(_)))
    }

    pub fn defeats(&self) -> usize {
        self.count(|n| matches!(n, Notification::Defeat(_)))
    }

    pub fn media(&self) -> Vec<bool> {
        self.notifications
            .iter()
            .filter_map(|n| match n {
                Notification::EndOfGameMedia { won } => Some(*won),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&Notification) -> bool) -> usize {
        self.notifications.iter().filter(|n| pred(n)).count()
    }
}

impl PresentationSink for RecordingSink {
    fn announce_elimination(&mut self, color: Color) {
        self.notifications.push(Notification::Elimination(color));
    }

    fn announce_victory(&mut self, message: &OutcomeMessage) {
        self.notifications.push(Notification::Victory(message.clone()));
    }

    fn announce_defeat(&mut self, message: &OutcomeMessage) {
        self.notifications.push(Notification::Defeat(message.clone()));
    }

    fn play_end_of_game_media(&mut self, won: bool) {
        self.notifications.push(Notification::EndOfGameMedia { won });
    }

    fn offer_continue_after_victory(&mut self) -> bool {
        self.notifications.push(Notification::ContinueOffered);
        self.continue_after_victory
    }

    fn record_highscores(&mut self) {
        self.notifications.push(Notification::Highscores);
    }
}
