//! Stable name keys for presentation layers.
//!
//! Lookups take raw discriminants so that values straight off the wire can
//! be named without validation. Anything out of range maps to [`BAD_KEY`].

/// Key returned for out-of-range input.
pub const BAD_KEY: &str = "bad";

const TEAM_KEYS: [&str; 9] = [
    "team.unclaimed",
    "team.red",
    "team.orange",
    "team.yellow",
    "team.green",
    "team.aqua",
    "team.blue",
    "team.purple",
    "team.pink",
];

const TROOP_KEYS: [&str; 6] = [
    "troop.farmer",
    "troop.lumberjack",
    "troop.spearman",
    "troop.archer",
    "troop.baron",
    "troop.knight",
];

const BUILD_KEYS: [&str; 7] = [
    "build.castle",
    "build.farm",
    "build.mine",
    "build.tower",
    "build.beacon",
    "build.fort",
    "build.tent",
];

const PLANT_KEYS: [&str; 7] = [
    "plant.bush",
    "plant.berry",
    "plant.sapling",
    "plant.tree",
    "plant.peach",
    "plant.pine",
    "plant.grave",
];

fn lookup(table: &[&'static str], v: u8) -> &'static str {
    table.get(v as usize).copied().unwrap_or(BAD_KEY)
}

/// Name key of a team.
pub fn team_key(v: u8) -> &'static str {
    lookup(&TEAM_KEYS, v)
}

/// Name key of a troop type.
pub fn troop_key(v: u8) -> &'static str {
    lookup(&TROOP_KEYS, v)
}

/// Name key of a building type.
pub fn build_key(v: u8) -> &'static str {
    lookup(&BUILD_KEYS, v)
}

/// Name key of a plant type.
pub fn plant_key(v: u8) -> &'static str {
    lookup(&PLANT_KEYS, v)
}
