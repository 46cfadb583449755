pub mod appearance;
pub mod date;
pub mod fixture;
pub mod score;

pub use appearance::{format_minutes, PlayerAppearance, Role};
pub use date::MatchDate;
pub use fixture::{MatchKey, MatchRecord};
pub use score::{parse_score, Outcome, Score};
