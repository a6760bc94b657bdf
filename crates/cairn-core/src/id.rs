//! Opaque slug identifiers for plans and steps.
//!
//! Identifiers are three-word slugs such as `brisk-amber-heron`. The store
//! only requires global uniqueness, which the primary key enforces at insert
//! time; a collision surfaces as a constraint violation rather than being
//! retried here.

use rand::seq::SliceRandom;

const ADJECTIVES: &[&str] = &[
    "able", "brisk", "calm", "clever", "crisp", "daring", "deft", "eager", "early", "fair",
    "fleet", "fond", "gentle", "glad", "grand", "hardy", "keen", "kind", "late", "lively",
    "lucid", "merry", "mild", "neat", "nimble", "patient", "plain", "proud", "quick", "quiet",
    "rapid", "sharp", "shy", "sly", "solid", "stout", "swift", "tidy", "vivid", "wise",
];

const COLORS: &[&str] = &[
    "amber", "azure", "beige", "bronze", "brown", "cobalt", "copper", "coral", "cream",
    "crimson", "ebony", "fawn", "gold", "gray", "green", "indigo", "ivory", "jade", "lilac",
    "maroon", "ochre", "olive", "onyx", "pearl", "plum", "rose", "ruby", "russet", "rust",
    "sable", "saffron", "scarlet", "sepia", "silver", "slate", "teal", "umber", "violet",
    "wheat", "white",
];

const ANIMALS: &[&str] = &[
    "badger", "bison", "crane", "curlew", "deer", "dove", "egret", "falcon", "ferret", "finch",
    "fox", "gull", "hare", "heron", "ibis", "jay", "kite", "lark", "lynx", "marten",
    "merlin", "mole", "moose", "osprey", "otter", "owl", "pike", "plover", "raven", "robin",
    "seal", "shrew", "stoat", "stork", "swan", "swift", "tern", "vole", "weasel", "wren",
];

/// Generates a new three-word identifier such as `brisk-amber-heron`.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("plain");
    let color = COLORS.choose(&mut rng).copied().unwrap_or("gray");
    let animal = ANIMALS.choose(&mut rng).copied().unwrap_or("wren");
    format!("{adjective}-{color}-{animal}")
}
