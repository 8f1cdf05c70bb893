//! Epic narration for the chronicle
//!
//! The narrator owns its own random stream, salted from the world
//! seed, so phrasing choices never move the simulation stream: a run
//! narrated verbosely and a silent run produce identical worlds.

use crate::core::rng::RandomStream;
use crate::core::types::Domain;
use crate::sim::ages::Age;
use crate::sim::engine::TickResult;
use crate::sim::events::WorldEvent;
use crate::sim::gods::God;

/// XOR salt separating the narrator's stream from the world's
const NARRATOR_SALT: u64 = 0x6e61_7272_6174_6f72;

const AGE_TRANSITION_PHRASES: [&[&str]; 6] = [
    &[
        "From the void, new light stirs. The Age of Emergence begins.",
        "The world awakens. An Age of Emergence dawns upon the land.",
        "Silence breaks. The Age of Emergence rises from primordial dark.",
    ],
    &[
        "Laws bind the chaos. The Age of Order commences.",
        "Structure takes hold. The Age of Order begins its reign.",
        "From turbulence, pattern emerges. The Age of Order is upon us.",
    ],
    &[
        "Cracks appear in the foundation. The Age of Strain begins.",
        "Old certainties falter. The Age of Strain descends.",
        "The weight of ages bears down. Strain marks this era.",
    ],
    &[
        "All that was built now crumbles. The Age of Collapse is here.",
        "Pillars shatter. The Age of Collapse consumes the world.",
        "What rose must fall. The Age of Collapse begins its terrible work.",
    ],
    &[
        "The tumult fades to nothing. The Age of Silence settles.",
        "Even echoes die. The Age of Silence blankets the land.",
        "In the aftermath, only quiet remains. The Age of Silence.",
    ],
    &[
        "From ashes, green shoots. The Age of Rebirth begins.",
        "Hope stirs in barren soil. The Age of Rebirth awakens.",
        "The cycle turns anew. Rebirth comes to a waiting world.",
    ],
];

const GOD_BIRTH_PHRASES: [&str; 5] = [
    "The faithful's prayers coalesce into divine form. {name}, God of {domain}, is born!",
    "Belief made manifest! {name} rises as deity of {domain}!",
    "From collective dreams and fears, {name} awakens, a new God of {domain}!",
    "The heavens welcome a new power. {name}, Lord of {domain}, takes divine form!",
    "Mortal faith births immortal power. {name}, the {domain} God, emerges!",
];

const GOD_FADE_PHRASES: [&str; 5] = [
    "{name}, God of {domain}, fades from memory. The divine light dims.",
    "Forgotten by mortals, {name} dissolves into myth and shadow.",
    "The prayers cease. {name}, once mighty, becomes mere legend.",
    "{name}'s divine essence scatters. The God of {domain} is no more.",
    "Faith wavers, and with it, {name} descends into eternal silence.",
];

const MAGNITUDE_LOW: [&str; 3] = ["A minor", "A small", "A brief"];
const MAGNITUDE_MEDIUM: [&str; 3] = ["A significant", "A notable", "An important"];
const MAGNITUDE_HIGH: [&str; 3] = ["A great", "A mighty", "A terrible"];
const MAGNITUDE_EXTREME: [&str; 3] = ["A cataclysmic", "An apocalyptic", "A world-shaking"];

fn domain_title(domain: Domain) -> &'static str {
    match domain {
        Domain::River => "River",
        Domain::Flame => "Flame",
        Domain::Sky => "Sky",
        Domain::War => "War",
        Domain::Harvest => "Harvest",
        Domain::Memory => "Memory",
    }
}

fn domain_epithet(domain: Domain) -> &'static str {
    match domain {
        Domain::River => "of the Waters",
        Domain::Flame => "of the Eternal Fire",
        Domain::Sky => "of the Heavens",
        Domain::War => "of Battle",
        Domain::Harvest => "of the Bountiful Earth",
        Domain::Memory => "of the Ageless Past",
    }
}

/// Turns tick results into chronicle prose
pub struct Narrator {
    rng: RandomStream,
    verbose: bool,
}

impl Narrator {
    pub fn new(world_seed: u64, verbose: bool) -> Self {
        Self {
            rng: RandomStream::new(world_seed ^ NARRATOR_SALT),
            verbose,
        }
    }

    pub fn narrate_age_transition(&mut self, age: Age) -> String {
        self.rng.pick(AGE_TRANSITION_PHRASES[age.index()]).to_string()
    }

    pub fn narrate_god_birth(&mut self, god: &God) -> String {
        let phrase = *self.rng.pick(&GOD_BIRTH_PHRASES);
        phrase
            .replace("{name}", &god.name)
            .replace("{domain}", domain_title(god.domain))
    }

    pub fn narrate_god_fade(&mut self, god: &God) -> String {
        let phrase = *self.rng.pick(&GOD_FADE_PHRASES);
        phrase
            .replace("{name}", &god.name)
            .replace("{domain}", domain_title(god.domain))
    }

    pub fn narrate_event(&mut self, event: &WorldEvent) -> String {
        let words: &[&str] = if event.magnitude < 0.3 {
            &MAGNITUDE_LOW
        } else if event.magnitude < 0.6 {
            &MAGNITUDE_MEDIUM
        } else if event.magnitude < 0.85 {
            &MAGNITUDE_HIGH
        } else {
            &MAGNITUDE_EXTREME
        };
        let word = *self.rng.pick(words);
        let epithet = domain_epithet(event.primary_domain);

        let mut text = format!("{} omen {}: {}.\n  {}.", word, epithet, event.name, event.description);
        if let Some(secondary) = event.secondary_domain {
            text.push_str(&format!(
                "\n  Echoes stir in the realm {}.",
                domain_epithet(secondary)
            ));
        }
        text
    }

    fn day_header(day: u64, age: Age) -> String {
        format!("═══ Day {} · Age of {} ═══", day, age.name())
    }

    /// The day's narration, most important happenings first
    ///
    /// Normal mode reports age turns, god births and fades, and only
    /// the major events; verbose mode reports every day including the
    /// quiet ones, plus freshly recorded myths.
    pub fn describe_tick(&mut self, tick: &TickResult) -> Vec<String> {
        let mut lines = Vec::new();

        if self.verbose {
            lines.push(Self::day_header(tick.day, tick.age));
        }

        if let Some(age) = tick.age_transition {
            lines.push(self.narrate_age_transition(age));
        }

        for god in &tick.born_gods {
            lines.push(self.narrate_god_birth(god));
        }
        for god in &tick.faded_gods {
            lines.push(self.narrate_god_fade(god));
        }

        match &tick.event {
            Some(event) if self.verbose || event.magnitude >= 0.5 => {
                if !self.verbose {
                    lines.push(Self::day_header(tick.day, tick.age));
                }
                lines.push(self.narrate_event(event));
            }
            Some(_) => {}
            None if self.verbose => {
                lines.push("  The day passes without portent.".to_string());
            }
            None => {}
        }

        if self.verbose {
            for myth in &tick.new_myths {
                lines.push(format!("  A new myth is spoken: \"{}\"", myth.text));
            }
        }

        lines
    }
}
