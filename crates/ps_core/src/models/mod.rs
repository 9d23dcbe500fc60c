pub mod formation;
pub mod player;
pub mod position;
pub mod team;

pub use formation::{create_formation, create_player, Formation, FormationSlot};
pub use player::{Player, PlayerRef, PlayerRole, TeamSlot};
pub use position::Position;
pub use team::{Side, Team};
