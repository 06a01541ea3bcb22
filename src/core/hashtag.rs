use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::collections::HashSet;

pub const MAX_TAGS: usize = 6;

/// Tags every post can draw from regardless of category.
const DEFAULT_TAGS: &[&str] = &[
    "#Deals",
    "#DealAlert",
    "#Sale",
    "#Discount",
    "#Savings",
    "#Shopping",
];

/// Lowercase keyword -> category tags. Scanned as substrings of the
/// cleaned title, all matches contribute.
const CATEGORY_TAGS: &[(&str, &[&str])] = &[
    ("echo", &["#Alexa", "#SmartHome"]),
    ("alexa", &["#Alexa", "#SmartHome"]),
    ("kindle", &["#Kindle", "#Reading"]),
    ("fire tv", &["#FireTV", "#Streaming"]),
    ("laptop", &["#Tech", "#Laptops"]),
    ("monitor", &["#Tech", "#Electronics"]),
    ("ssd", &["#Tech", "#PCGaming"]),
    ("headphone", &["#Audio", "#Music"]),
    ("earbud", &["#Audio", "#Music"]),
    ("speaker", &["#Audio", "#HomeAudio"]),
    ("vacuum", &["#Home", "#Cleaning"]),
    ("robot", &["#SmartHome", "#Cleaning"]),
    ("kitchen", &["#Kitchen", "#Home"]),
    ("air fryer", &["#Kitchen", "#Cooking"]),
    ("coffee", &["#Coffee", "#Kitchen"]),
    ("toy", &["#Toys", "#Kids"]),
    ("lego", &["#LEGO", "#Toys"]),
    ("game", &["#Gaming"]),
    ("watch", &["#Wearables", "#Tech"]),
    ("skincare", &["#Beauty", "#SkinCare"]),
    ("tool", &["#DIY", "#Tools"]),
];

/// Samples a bounded set of hashtags for a title. Holds only a base seed;
/// each call derives its own rng from seed + salt, so picks stay varied
/// across listings in a run yet fully reproducible when the seed is fixed.
pub struct HashtagPicker {
    seed: u64,
}

impl HashtagPicker {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn pick(&self, title: &str, salt: u64) -> Vec<String> {
        let lower = title.to_lowercase();

        // Union of matching category tags plus the default pool,
        // first-seen order, no duplicates.
        let mut pool: Vec<&str> = Vec::new();
        let mut seen = HashSet::new();
        for (keyword, tags) in CATEGORY_TAGS {
            if lower.contains(keyword) {
                for tag in *tags {
                    if seen.insert(*tag) {
                        pool.push(tag);
                    }
                }
            }
        }
        for tag in DEFAULT_TAGS {
            if seen.insert(*tag) {
                pool.push(tag);
            }
        }

        let mut rng = SmallRng::seed_from_u64(self.seed.wrapping_add(salt));
        pool.choose_multiple(&mut rng, MAX_TAGS)
            .map(|tag| tag.to_string())
            .collect()
    }
}
