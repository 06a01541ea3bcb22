use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

/// Discount thresholds in descending order; the first one the discount
/// meets wins. Below every threshold means no tier phrase at all.
const TIER_PHRASES: &[(i64, &str)] = &[
    (50, "🔥 HUGE discount!"),
    (30, "💥 Big savings!"),
    (15, "👀 Nice deal!"),
    (1, "✨ Deal alert!"),
];

/// Keyword -> intro, first match wins, so order matters: more specific
/// keywords go first.
const CATEGORY_INTROS: &[(&str, &str)] = &[
    ("air fryer", "Level up your kitchen:"),
    ("echo", "Upgrade your smart home:"),
    ("alexa", "Upgrade your smart home:"),
    ("kindle", "Bookworms, look at this:"),
    ("laptop", "Tech upgrade time:"),
    ("kitchen", "Level up your kitchen:"),
    ("vacuum", "Make cleaning easier:"),
    ("headphone", "For the music lovers:"),
    ("earbud", "For the music lovers:"),
    ("toy", "Fun for the little ones:"),
    ("lego", "Fun for the little ones:"),
];

/// Inclusive month ranges -> seasonal pools, checked in order.
const SEASONAL_INTROS: &[(u32, u32, &[&str])] = &[
    (11, 12, &["Holiday shopping sorted:", "Gift idea unlocked:"]),
    (6, 8, &["Summer steal:", "Hot weather, hotter deal:"]),
    (1, 2, &["New year, new deal:", "Fresh start, fresh deal:"]),
];

const GENERIC_INTROS: &[&str] = &[
    "Check out this find:",
    "Today's pick:",
    "Spotted a good one:",
    "Worth a look:",
];

/// Builds the lead line of a caption: optional discount-tier phrase plus
/// a category or seasonal/generic intro. Same seed + salt discipline as
/// the hashtag picker; the month is a parameter so tests control it.
pub struct IntroSelector {
    seed: u64,
}

impl IntroSelector {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn pick(&self, title: &str, discount_percent: Option<i64>, month: u32, salt: u64) -> String {
        let lower = title.to_lowercase();

        let intro = CATEGORY_INTROS
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, phrase)| *phrase)
            .unwrap_or_else(|| {
                let pool = SEASONAL_INTROS
                    .iter()
                    .find(|(from, to, _)| (*from..=*to).contains(&month))
                    .map(|(_, _, phrases)| *phrases)
                    .unwrap_or(GENERIC_INTROS);
                let mut rng = SmallRng::seed_from_u64(self.seed.wrapping_add(salt));
                pool.choose(&mut rng).copied().unwrap_or(GENERIC_INTROS[0])
            });

        let tier = discount_percent.and_then(|percent| {
            TIER_PHRASES
                .iter()
                .find(|(threshold, _)| percent >= *threshold)
                .map(|(_, phrase)| *phrase)
        });

        match tier {
            Some(tier) => format!("{} {}", tier, intro),
            None => intro.to_string(),
        }
    }
}
