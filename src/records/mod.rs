pub mod normalize;
pub mod reader;
pub mod tables;

pub use normalize::{duplicate_keys, normalize};
pub use reader::{read_match_file, read_match_rows, read_player_file, read_player_rows};
pub use tables::{MatchRow, PlayerRow};
