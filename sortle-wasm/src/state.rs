use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use sortle_core::{Game, GameConfig, GameView};
use web_sys::{Document, Window};

/// Where the page is in its lifecycle.
pub enum Phase {
    /// Catalog fetch in flight; no game exists yet.
    Loading,
    /// Fetch or selection failed; the page shows the message and stops.
    Failed(String),
    Ready(Box<Game>),
}

/// Global application state stored behind an `Rc<RefCell<_>>` so it can be
/// shared across the WASM callbacks. Every handler holds the mutable borrow
/// for the whole of one operation.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub config: GameConfig,
    pub phase: Phase,
    pub rng: StdRng,
}

impl State {
    pub fn game_mut(&mut self) -> Option<&mut Game> {
        match &mut self.phase {
            Phase::Ready(game) => Some(&mut **game),
            _ => None,
        }
    }

    pub fn game(&self) -> Option<&Game> {
        match &self.phase {
            Phase::Ready(game) => Some(&**game),
            _ => None,
        }
    }

    pub fn view(&self) -> GameView {
        match &self.phase {
            Phase::Ready(game) => game.view(),
            _ => GameView::loading(),
        }
    }
}

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}
