//! Deterministic name generation for citizens, factions, and gods
//!
//! All pools are fixed; every draw comes from the shared stream, so the
//! same seed always names the same world.

use crate::core::rng::RandomStream;
use crate::core::types::Domain;

const CITIZEN_PREFIXES: [&str; 26] = [
    "Ash", "Brin", "Cal", "Dara", "Eld", "Fenn", "Gael", "Haran", "Isen", "Jora", "Kael", "Lira",
    "Morn", "Neth", "Oren", "Pira", "Quell", "Rath", "Sev", "Tarn", "Ula", "Vorn", "Wren", "Xan",
    "Yara", "Zeph",
];

const CITIZEN_SUFFIXES: [&str; 20] = [
    "an", "el", "is", "on", "us", "a", "en", "or", "ia", "yn", "ax", "ix", "eth", "oth", "ara",
    "ira", "ona", "ius", "eon", "wyn",
];

const FACTION_ADJECTIVES: [&str; 8] = [
    "Crimson", "Azure", "Golden", "Ashen", "Verdant", "Obsidian", "Silver", "Amber",
];

const FACTION_NOUNS: [&str; 8] = [
    "Covenant",
    "Circle",
    "Order",
    "Pact",
    "Brotherhood",
    "Sisterhood",
    "Assembly",
    "Conclave",
];

const GOD_SUFFIXES: [&str; 10] = [
    "us", "a", "ion", "or", "is", "ax", "oth", "iel", "ara", "eon",
];

fn god_prefixes(domain: Domain) -> &'static [&'static str; 5] {
    match domain {
        Domain::River => &["Aqua", "Thal", "Riv", "Und", "Mare"],
        Domain::Flame => &["Pyr", "Igna", "Braz", "Cind", "Scor"],
        Domain::Sky => &["Ael", "Cael", "Zeph", "Aur", "Nub"],
        Domain::War => &["Bel", "Mort", "Vic", "Mar", "Stri"],
        Domain::Harvest => &["Cer", "Fert", "Plen", "Grai", "Boun"],
        Domain::Memory => &["Mnem", "Chron", "Eter", "Rem", "Hist"],
    }
}

pub fn citizen_name(rng: &mut RandomStream) -> String {
    format!("{}{}", rng.pick(&CITIZEN_PREFIXES), rng.pick(&CITIZEN_SUFFIXES))
}

pub fn faction_name(rng: &mut RandomStream) -> String {
    format!(
        "The {} {}",
        rng.pick(&FACTION_ADJECTIVES),
        rng.pick(&FACTION_NOUNS)
    )
}

pub fn god_name(domain: Domain, rng: &mut RandomStream) -> String {
    format!("{}{}", rng.pick(god_prefixes(domain)), rng.pick(&GOD_SUFFIXES))
}
