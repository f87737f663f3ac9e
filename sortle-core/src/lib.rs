//! Daily contest-problem ordering puzzle.
//!
//! A [`Game`] picks one contest per day from a problem [`Catalog`], shuffles
//! its problems into a pool and lets the player drop them into ordered slots
//! until the slot order matches the contest's problem order.

pub mod arrangement;
pub mod catalog;
pub mod config;
pub mod error;
pub mod game;
pub mod palette;
pub mod scorer;
pub mod selector;
pub mod session;

pub use arrangement::{Arrangement, Destination, MoveEffect, POOL_CONTAINER_ID};
pub use catalog::{Catalog, Problem};
pub use config::GameConfig;
pub use error::{Result, SortleError};
pub use game::{CardView, Game, GameView, SlotView};
pub use palette::{POOL_COLOR, SLOT_HOVER_COLOR, slot_color};
pub use scorer::{SubmissionResult, evaluate};
pub use selector::{DaySeed, Puzzle, compare_ordinal_labels, parse_group_number, select_puzzle};
pub use session::{SharePayload, Submission, format_elapsed};
