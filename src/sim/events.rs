//! Event generation and the myth log
//!
//! Each day produces zero or one event, rolled against the current
//! age's event rate. Events shift belief toward their domain and push
//! fear or gratitude through the population; factions may record them
//! as myths.

use serde::{Deserialize, Serialize};

use crate::core::config::{AgeTraits, SimulationConfig};
use crate::core::rng::RandomStream;
use crate::core::types::{Day, Domain, FactionId, MythId};

/// An event that occurred in the world on a given day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldEvent {
    pub name: String,
    pub description: String,
    pub primary_domain: Domain,
    pub secondary_domain: Option<Domain>,
    pub fear_impact: f32,
    pub gratitude_impact: f32,
    /// How strongly belief shifts toward the primary domain
    pub belief_impact: f32,
    /// Overall scale in [0.1, 1.0]; also grades the narration
    pub magnitude: f32,
}

struct EventTemplate {
    name: &'static str,
    description: &'static str,
    fear: f32,
    gratitude: f32,
    belief: f32,
}

const fn template(
    name: &'static str,
    description: &'static str,
    fear: f32,
    gratitude: f32,
    belief: f32,
) -> EventTemplate {
    EventTemplate {
        name,
        description,
        fear,
        gratitude,
        belief,
    }
}

const RIVER_EVENTS: [EventTemplate; 5] = [
    template("The Great Flooding", "Waters rise beyond their banks", 0.4, -0.2, 0.3),
    template("The Still Waters", "Rivers calm to mirror-glass", -0.2, 0.3, 0.2),
    template("The River's Bounty", "Fish leap willingly into nets", -0.1, 0.5, 0.4),
    template("The Poisoned Springs", "Wells turn bitter and foul", 0.5, -0.3, 0.3),
    template("The Parting Currents", "Waters divide before the faithful", 0.1, 0.4, 0.5),
];

const FLAME_EVENTS: [EventTemplate; 5] = [
    template("The Consuming Fire", "Flames devour without warning", 0.6, -0.4, 0.4),
    template("The Warming Hearth", "All fires burn steady and true", -0.2, 0.4, 0.3),
    template("The Forge's Blessing", "Metalwork emerges flawless", -0.1, 0.5, 0.4),
    template("The Ember Rain", "Sparks fall from cloudless sky", 0.5, -0.2, 0.5),
    template("The Eternal Flame", "A fire burns without fuel", 0.2, 0.3, 0.6),
];

const SKY_EVENTS: [EventTemplate; 5] = [
    template("The Darkened Sun", "Shadow crosses the daylight", 0.5, -0.3, 0.5),
    template("The Gentle Rains", "Clouds bring life-giving water", -0.2, 0.5, 0.3),
    template("The Thunder Voice", "Lightning speaks across valleys", 0.3, 0.1, 0.4),
    template("The Clear Heavens", "Stars align in ancient patterns", 0.1, 0.4, 0.4),
    template("The Howling Winds", "Gales tear at all standing", 0.5, -0.3, 0.3),
];

const WAR_EVENTS: [EventTemplate; 5] = [
    template("The Border Clash", "Blood spills at the boundaries", 0.4, -0.2, 0.3),
    template("The Victorious Return", "Warriors come home triumphant", 0.1, 0.5, 0.4),
    template("The Broken Peace", "Old alliances shatter", 0.5, -0.4, 0.4),
    template("The Honorable Duel", "Champions settle disputes", 0.2, 0.2, 0.3),
    template("The Siege Lifted", "Enemies retreat in defeat", 0.0, 0.6, 0.5),
];

const HARVEST_EVENTS: [EventTemplate; 5] = [
    template("The Abundant Yield", "Fields overflow with grain", -0.2, 0.6, 0.4),
    template("The Blighted Crops", "Rot spreads through stores", 0.5, -0.4, 0.3),
    template("The First Fruits", "Early harvest brings hope", -0.1, 0.4, 0.3),
    template("The Locust Swarm", "Insects devour all growth", 0.6, -0.5, 0.4),
    template("The Golden Fields", "Grain grows tall and strong", -0.2, 0.5, 0.4),
];

const MEMORY_EVENTS: [EventTemplate; 5] = [
    template("The Forgotten Name", "Ancient knowledge is lost", 0.3, -0.2, 0.3),
    template("The Recovered Scroll", "Old wisdom resurfaces", 0.1, 0.4, 0.4),
    template("The Prophetic Dream", "Visions reveal hidden truths", 0.2, 0.3, 0.5),
    template("The Ancestral Voice", "The dead speak to the living", 0.3, 0.2, 0.5),
    template("The Chronicle Burns", "Records are destroyed", 0.4, -0.3, 0.3),
];

fn templates_for(domain: Domain) -> &'static [EventTemplate; 5] {
    match domain {
        Domain::River => &RIVER_EVENTS,
        Domain::Flame => &FLAME_EVENTS,
        Domain::Sky => &SKY_EVENTS,
        Domain::War => &WAR_EVENTS,
        Domain::Harvest => &HARVEST_EVENTS,
        Domain::Memory => &MEMORY_EVENTS,
    }
}

/// Major calamities, outside the daily rate roll; always magnitude 1.0
const DISASTERS: [(&str, &str, Domain, f32, f32, f32); 6] = [
    ("The Great Cataclysm", "The world trembles to its foundations", Domain::Sky, 0.8, -0.6, 0.7),
    ("The Plague Years", "Sickness spreads without mercy", Domain::Memory, 0.7, -0.5, 0.5),
    ("The Endless Winter", "Cold grips the land", Domain::Sky, 0.6, -0.4, 0.5),
    ("The Burning Lands", "Fire consumes all", Domain::Flame, 0.8, -0.6, 0.6),
    ("The Great Famine", "Hunger stalks every home", Domain::Harvest, 0.7, -0.5, 0.5),
    ("The War of All", "Every hand turns against another", Domain::War, 0.8, -0.7, 0.6),
];

/// Roll for today's event under the current age tone
///
/// The presence roll is consumed whether or not an event occurs, so the
/// stream position is a pure function of the day count and prior
/// history. A day without an event is a normal outcome, not an error.
pub fn generate(
    tone: &AgeTraits,
    config: &SimulationConfig,
    rng: &mut RandomStream,
) -> Option<WorldEvent> {
    if !rng.chance(tone.event_rate) {
        return None;
    }

    let primary = *rng.pick(&Domain::ALL);
    let template = rng.pick(templates_for(primary).as_slice());

    let secondary = if rng.chance(config.secondary_domain_chance) {
        let others: Vec<Domain> = Domain::ALL
            .iter()
            .copied()
            .filter(|d| *d != primary)
            .collect();
        Some(*rng.pick(&others))
    } else {
        None
    };

    let magnitude = (0.5 + rng.range_f32(-0.2, 0.2) + tone.magnitude_boost).clamp(0.1, 1.0);

    // Age mood shades the emotional payload
    let fear = template.fear - tone.positive_bias * 0.2;
    let gratitude = template.gratitude + tone.positive_bias * 0.2;

    Some(WorldEvent {
        name: template.name.to_string(),
        description: template.description.to_string(),
        primary_domain: primary,
        secondary_domain: secondary,
        fear_impact: fear * magnitude,
        gratitude_impact: gratitude * magnitude,
        belief_impact: template.belief * magnitude,
        magnitude,
    })
}

/// Produce a scripted calamity, bypassing the daily rate roll
pub fn generate_disaster(rng: &mut RandomStream) -> WorldEvent {
    let (name, description, domain, fear, gratitude, belief) = *rng.pick(&DISASTERS);
    WorldEvent {
        name: name.to_string(),
        description: description.to_string(),
        primary_domain: domain,
        secondary_domain: None,
        fear_impact: fear,
        gratitude_impact: gratitude,
        belief_impact: belief,
        magnitude: 1.0,
    }
}

/// A faction's interpretation of an event, recorded forever
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Myth {
    pub id: MythId,
    pub text: String,
    pub faction: FactionId,
    pub domain: Domain,
    /// The recording faction's bias toward the domain at the time
    pub confidence: f32,
    pub day: Day,
}

/// Append-only log of every myth ever recorded
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MythLog {
    myths: Vec<Myth>,
    next_id: u32,
}

impl MythLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        text: String,
        faction: FactionId,
        domain: Domain,
        confidence: f32,
        day: Day,
    ) -> &Myth {
        let id = MythId(self.next_id);
        self.next_id += 1;
        self.myths.push(Myth {
            id,
            text,
            faction,
            domain,
            confidence,
            day,
        });
        self.myths.last().expect("just pushed")
    }

    pub fn len(&self) -> usize {
        self.myths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.myths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Myth> {
        self.myths.iter()
    }

    pub fn for_domain(&self, domain: Domain) -> impl Iterator<Item = &Myth> {
        self.myths.iter().filter(move |m| m.domain == domain)
    }

    pub fn for_faction(&self, faction: FactionId) -> impl Iterator<Item = &Myth> {
        self.myths.iter().filter(move |m| m.faction == faction)
    }
}
