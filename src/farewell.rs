use rand::seq::SliceRandom;
use rand::Rng;

const TEMPLATES: [&str; 12] = [
    "Farewell, {}",
    "Adios, {}",
    "R.I.P., {}",
    "We'll miss you, {}",
    "Oh no, not {}!",
    "{} bites the dust",
    "Gone but not forgotten, {}",
    "The end of {} as we know it",
    "Off into the sunset, {}",
    "{}, it's been real",
    "{}, your watch has ended",
    "{} has left the building",
];

/// A send-off line for the chip that was just crossed off.
pub fn farewell_text<R: Rng + ?Sized>(name: &str, rng: &mut R) -> String {
    TEMPLATES
        .choose(rng)
        .unwrap_or(&TEMPLATES[0])
        .replace("{}", name)
}
