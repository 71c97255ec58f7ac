use crate::cells::CellState;
use crate::entities::EnemyState;

/// The player wins by standing on the end cell.
#[inline]
pub fn has_won(player_cell_state: CellState) -> bool {
    player_cell_state == CellState::End
}

/// The player loses when sharing a cell with an attacking enemy. Passive enemies can be
/// walked through.
#[inline]
pub fn has_lost(player_index: usize, enemy_index: usize, enemy_state: EnemyState) -> bool {
    player_index == enemy_index && enemy_state == EnemyState::Attacking
}
