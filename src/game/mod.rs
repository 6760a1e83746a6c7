//! Two-card comparison game.
//!
//! Each round shows card A in full and only the header of card B. The
//! player picks a property on A; the engine compares it against the same
//! property on B, reveals B and shows the sign. Any further interaction
//! starts a new round. There is no score and no end.
//!
//! ```text
//!           select property on A
//! Awaiting ────────────────────────► Revealed
//! Selection ◄──────────────────────  (sign shown)
//!           any interaction: new pair
//! ```

pub mod round;
pub mod engine;
pub mod view;

pub use round::{Comparison, Phase, Round, Side};
pub use engine::{GameEngine, Transition};
pub use view::{capitalize, CardView, PropertyRow, RoundView};
