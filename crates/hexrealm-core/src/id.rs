//! Board positions and per-tile identifiers.

use std::fmt;
use std::ops::Add;

/// A tile position on the board, in offset (column, row) coordinates.
///
/// Positions are plain values: they may point outside the board. Every
/// lookup goes through the map, which answers `None` for such positions.
///
/// # Examples
///
/// ```
/// use hexrealm_core::Pos;
///
/// let p = Pos::new(3, 4);
/// assert_eq!(p + Pos::new(1, -1), Pos::new(4, 3));
/// assert_eq!(p.to_string(), "(3, 4)");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Pos {
    /// Create a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the row is shifted by half a tile (even rows are).
    pub fn shifted_row(&self) -> bool {
        self.y & 1 == 0
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Pos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, rhs: Pos) -> Pos {
        Pos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Tile owner.
///
/// `Unclaimed` doubles as the "void" team: tiles nobody owns, and the value
/// a tolerant decoder falls back to for out-of-range input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Team {
    /// No owner.
    #[default]
    Unclaimed = 0,
    /// Red team.
    Red,
    /// Orange team.
    Orange,
    /// Yellow team.
    Yellow,
    /// Green team.
    Green,
    /// Aqua team.
    Aqua,
    /// Blue team.
    Blue,
    /// Purple team.
    Purple,
    /// Pink team.
    Pink,
}

impl Team {
    /// Number of teams, including `Unclaimed`.
    pub const COUNT: usize = 9;

    /// Every team in discriminant order.
    pub const ALL: [Team; Self::COUNT] = [
        Team::Unclaimed,
        Team::Red,
        Team::Orange,
        Team::Yellow,
        Team::Green,
        Team::Aqua,
        Team::Blue,
        Team::Purple,
        Team::Pink,
    ];

    /// Look up a team by its discriminant.
    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }

    /// Look up a team, mapping out-of-range values to `Unclaimed`.
    pub fn clamped(v: u8) -> Self {
        Self::from_u8(v).unwrap_or(Team::Unclaimed)
    }

    /// Whether some player owns the tile.
    pub fn is_claimed(&self) -> bool {
        *self != Team::Unclaimed
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(crate::names::team_key(*self as u8))
    }
}

/// Tile terrain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HexType {
    /// Outside the playable board.
    #[default]
    Void = 0,
    /// Water, can be bridged.
    Water,
    /// Ground, can be captured.
    Ground,
    /// Bridge: water that can be stood on.
    Bridge,
}

impl HexType {
    /// Every terrain type in discriminant order.
    pub const ALL: [HexType; 4] = [HexType::Void, HexType::Water, HexType::Ground, HexType::Bridge];

    /// Look up a terrain type by its discriminant.
    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }

    /// Whether entities can stand on the tile.
    pub fn solid(&self) -> bool {
        matches!(self, HexType::Ground | HexType::Bridge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_lookup_and_clamp() {
        assert_eq!(Team::from_u8(4), Some(Team::Green));
        assert_eq!(Team::from_u8(9), None);
        assert_eq!(Team::clamped(15), Team::Unclaimed);
        assert_eq!(Team::clamped(8), Team::Pink);
    }

    #[test]
    fn shifted_rows_are_even() {
        assert!(Pos::new(0, 0).shifted_row());
        assert!(!Pos::new(0, 1).shifted_row());
        assert!(Pos::new(5, -2).shifted_row());
    }

    #[test]
    fn only_ground_and_bridge_are_solid() {
        assert!(!HexType::Void.solid());
        assert!(!HexType::Water.solid());
        assert!(HexType::Ground.solid());
        assert!(HexType::Bridge.solid());
    }
}
