use crate::difficulty::Difficulty;
use crate::runtime::TICK_RATE_MS;
use crate::words::{Vocabulary, Word};

/// One stage of the memorize-and-recall loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Memorize,
    Recall,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Represents one playthrough being displayed to the user.
///
/// All mutation goes through the transition methods below; the UI only
/// reads. A fresh session is produced by `start` and discarded whole by
/// `exit_to_start`, so no state survives across playthroughs except the
/// selected difficulty.
#[derive(Debug)]
pub struct Game {
    vocabulary: Vocabulary,
    phase: Phase,
    difficulty: Difficulty,
    words: Vec<Word>,
    input: String,
    current_index: usize,
    remaining_ms: u64,
    score: usize,
    outcomes: Vec<Outcome>,
}

impl Game {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            vocabulary: Vocabulary::load(),
            phase: Phase::Start,
            difficulty,
            words: vec![],
            input: String::new(),
            current_index: 0,
            remaining_ms: 0,
            score: 0,
            outcomes: vec![],
        }
    }

    /// Begins a fresh session from the selected difficulty, discarding any
    /// prior one. Also serves the play-again transition from `Complete`.
    pub fn start(&mut self) {
        self.words = self.vocabulary.generate_words(self.difficulty.word_count());
        self.input.clear();
        self.current_index = 0;
        self.remaining_ms = self.difficulty.memorize_secs() * 1000;
        self.score = 0;
        self.outcomes.clear();
        self.phase = Phase::Memorize;
    }

    pub fn play_again(&mut self) {
        if self.phase == Phase::Complete {
            self.start();
        }
    }

    /// Abandons the session immediately, discarding all progress.
    pub fn exit_to_start(&mut self) {
        if matches!(self.phase, Phase::Memorize | Phase::Recall) {
            self.words.clear();
            self.input.clear();
            self.current_index = 0;
            self.remaining_ms = 0;
            self.score = 0;
            self.outcomes.clear();
            self.phase = Phase::Start;
        }
    }

    /// Advances the memorize countdown by one tick. Ticks arriving in any
    /// other phase are dropped, so a stale tick can never mutate a
    /// superseded session.
    pub fn on_tick(&mut self) {
        if self.phase != Phase::Memorize {
            return;
        }

        self.remaining_ms = self.remaining_ms.saturating_sub(TICK_RATE_MS);
        if self.remaining_ms == 0 {
            self.phase = Phase::Recall;
        }
    }

    pub fn write(&mut self, c: char) {
        if self.phase == Phase::Recall {
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.phase == Phase::Recall {
            self.input.pop();
        }
    }

    /// Scores the current input against the word at `current_index`.
    /// Comparison is case-insensitive with surrounding whitespace ignored;
    /// an empty submission simply counts as incorrect.
    pub fn submit(&mut self) {
        if self.phase != Phase::Recall {
            return;
        }
        let Some(word) = self.words.get(self.current_index) else {
            return;
        };

        let outcome = if self.input.trim().to_lowercase() == word.text.to_lowercase() {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };

        if outcome == Outcome::Correct {
            self.score += 1;
        }
        self.outcomes.push(outcome);

        if self.current_index == self.words.len() - 1 {
            self.phase = Phase::Complete;
        } else {
            self.current_index += 1;
        }

        self.input.clear();
    }

    /// Difficulty can only change before a session has started.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.phase == Phase::Start {
            self.difficulty = difficulty;
        }
    }

    pub fn next_difficulty(&mut self) {
        self.set_difficulty(self.difficulty.next());
    }

    pub fn prev_difficulty(&mut self) {
        self.set_difficulty(self.difficulty.prev());
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Whole seconds left on the memorize clock, rounded up so the display
    /// counts N..1 and only shows 0 once the phase flips.
    pub fn seconds_remaining(&self) -> u64 {
        self.remaining_ms.div_ceil(1000)
    }

    pub fn is_perfect(&self) -> bool {
        !self.words.is_empty() && self.score == self.words.len()
    }
}
