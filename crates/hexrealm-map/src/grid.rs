//! Offset-row hex neighbor scan.

use hexrealm_core::Pos;

/// Neighbor direction, in scan order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Row above, right half.
    UpperRight = 0,
    /// Same row, right.
    Right,
    /// Row below, right half.
    LowerRight,
    /// Row below, left half.
    LowerLeft,
    /// Same row, left.
    Left,
    /// Row above, left half.
    UpperLeft,
}

impl Direction {
    /// Every direction in scan order.
    pub const ALL: [Direction; 6] = [
        Direction::UpperRight,
        Direction::Right,
        Direction::LowerRight,
        Direction::LowerLeft,
        Direction::Left,
        Direction::UpperLeft,
    ];
}

/// Column offsets, indexed by `[y & 1][direction]`. Even rows are shifted.
const DX: [[i32; 6]; 2] = [
    [1, 1, 1, 0, -1, 0],   // shifted
    [0, 1, 0, -1, -1, -1], // unshifted
];

/// Row offsets, indexed by direction.
const DY: [i32; 6] = [-1, 0, 1, 1, 0, -1];

/// Position of the neighbor of `pos` in direction `dir`.
///
/// The result may lie outside any map.
pub fn neighbor(pos: Pos, dir: Direction) -> Pos {
    let row = (pos.y & 1) as usize;
    let d = dir as usize;
    Pos::new(pos.x + DX[row][d], pos.y + DY[d])
}

/// All six neighbor positions of `pos`, in scan order.
pub fn neighbors(pos: Pos) -> [Pos; 6] {
    Direction::ALL.map(|dir| neighbor(pos, dir))
}
