//! Economy collaborator: player lives and credits.
//!
//! The simulation charges lives when enemies leak and pays credits for kills
//! and completed waves. Calls are fire-and-forget.

use std::cell::RefCell;
use std::rc::Rc;

use rampart_core::config::LevelSettings;

pub trait Economy {
    fn take_lives(&mut self, lives: u32);
    fn give_credits(&mut self, credits: u32);
}

/// Plain lives/credits bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    pub lives: u32,
    pub credits: u32,
    pub lives_lost: u32,
    pub credits_earned: u32,
}

impl Ledger {
    pub fn new(settings: LevelSettings) -> Self {
        Self {
            lives: settings.lives,
            credits: settings.credits,
            ..Default::default()
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }
}

impl Economy for Ledger {
    fn take_lives(&mut self, lives: u32) {
        self.lives = self.lives.saturating_sub(lives);
        self.lives_lost += lives;
    }

    fn give_credits(&mut self, credits: u32) {
        self.credits += credits;
        self.credits_earned += credits;
    }
}

/// Lets a driver keep a handle on the economy it hands to the engine.
impl<E: Economy> Economy for Rc<RefCell<E>> {
    fn take_lives(&mut self, lives: u32) {
        self.borrow_mut().take_lives(lives);
    }

    fn give_credits(&mut self, credits: u32) {
        self.borrow_mut().give_credits(credits);
    }
}
