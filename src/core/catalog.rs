//! Built-in pattern catalog.
//!
//! The catalog is static: each entry is a name plus a plaintext picture
//! parsed through [`Pattern::parse`].

use super::pattern::Pattern;

/// Name and plaintext picture of every built-in pattern.
pub(crate) const ENTRIES: &[(&str, &str)] = &[
    ("Glider", ".O.\n..O\nOOO"),
    ("Blinker", "OOO"),
    ("Toad", ".OOO\nOOO."),
    ("Beacon", "OO..\nOO..\n..OO\n..OO"),
    ("R-pentomino", ".OO\nOO.\n.O."),
    ("LWSS", ".O..O\nO....\nO...O\nOOOO."),
    (
        "Pulsar",
        "
        ..OOO...OOO..
        .............
        O....O.O....O
        O....O.O....O
        O....O.O....O
        ..OOO...OOO..
        .............
        ..OOO...OOO..
        O....O.O....O
        O....O.O....O
        O....O.O....O
        .............
        ..OOO...OOO..
        ",
    ),
    (
        "Gosper Glider Gun",
        "
        ........................O...........
        ......................O.O...........
        ............OO......OO............OO
        ...........O...O....OO............OO
        OO........O.....O...OO..............
        OO........O...O.OO....O.O...........
        ..........O.....O.......O...........
        ...........O...O....................
        ............OO......................
        ",
    ),
];

fn build(name: &str, picture: &str) -> Pattern {
    Pattern::parse(name, picture).expect("Catalog patterns should always parse")
}

/// Every catalog pattern, in catalog order.
pub fn all() -> Vec<Pattern> {
    ENTRIES
        .iter()
        .map(|&(name, picture)| build(name, picture))
        .collect()
}

/// Look up a pattern by name, ignoring ASCII case.
pub fn find(name: &str) -> Option<Pattern> {
    ENTRIES
        .iter()
        .find(|(entry, _)| entry.eq_ignore_ascii_case(name))
        .map(|&(name, picture)| build(name, picture))
}
