use std::time::Duration;

use crate::constants::*;
use crate::error::{CarouselError, Result};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TypewriterState {
    Waiting,  // Initial delay before the first character
    Typing,   // Adding one character per step
    Holding,  // Full phrase shown
    Deleting, // Removing one character per step
    Cleared,  // Empty line before the next phrase
}

/// Hero tagline that types, holds, deletes and cycles through phrases.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    phrase_index: usize,
    shown_chars: usize,
    state: TypewriterState,
    timer: Duration,
}

impl Typewriter {
    pub fn new<I, P>(phrases: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();
        if phrases.is_empty() {
            return Err(CarouselError::invalid("typewriter needs at least one phrase"));
        }
        Ok(Self {
            phrases,
            phrase_index: 0,
            shown_chars: 0,
            state: TypewriterState::Waiting,
            timer: Duration::ZERO,
        })
    }

    pub fn with_taglines() -> Self {
        Self {
            phrases: TAGLINES.iter().map(|p| p.to_string()).collect(),
            phrase_index: 0,
            shown_chars: 0,
            state: TypewriterState::Waiting,
            timer: Duration::ZERO,
        }
    }

    pub fn state(&self) -> TypewriterState {
        self.state
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    /// Currently visible prefix of the active phrase.
    pub fn displayed(&self) -> &str {
        let phrase = &self.phrases[self.phrase_index];
        let end = phrase
            .char_indices()
            .nth(self.shown_chars)
            .map_or(phrase.len(), |(offset, _)| offset);
        &phrase[..end]
    }

    fn phrase_chars(&self) -> usize {
        self.phrases[self.phrase_index].chars().count()
    }

    fn step_delay(&self) -> Duration {
        match self.state {
            TypewriterState::Waiting => TYPE_DELAY,
            TypewriterState::Typing => TYPING_SPEED,
            TypewriterState::Holding => PAUSE_AFTER_TYPED,
            TypewriterState::Deleting => DELETING_SPEED,
            TypewriterState::Cleared => PAUSE_AFTER_DELETED,
        }
    }

    pub fn update(&mut self, dt: Duration) {
        self.timer += dt;
        while self.timer >= self.step_delay() {
            self.timer -= self.step_delay();
            self.step();
        }
    }

    fn step(&mut self) {
        match self.state {
            TypewriterState::Waiting | TypewriterState::Cleared => {
                self.state = TypewriterState::Typing;
                self.type_char();
            }
            TypewriterState::Typing => self.type_char(),
            TypewriterState::Holding => {
                self.state = TypewriterState::Deleting;
                self.delete_char();
            }
            TypewriterState::Deleting => self.delete_char(),
        }
    }

    fn type_char(&mut self) {
        if self.shown_chars < self.phrase_chars() {
            self.shown_chars += 1;
        }
        if self.shown_chars == self.phrase_chars() {
            self.state = TypewriterState::Holding;
        }
    }

    fn delete_char(&mut self) {
        self.shown_chars = self.shown_chars.saturating_sub(1);
        if self.shown_chars == 0 {
            self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
            self.state = TypewriterState::Cleared;
        }
    }
}
