use regex::Regex;

const MAX_TITLE_LEN: usize = 200;

/// Strips the price and promo noise that rides along with scraped deal
/// titles. Rules run in a fixed order and every rule is idempotent, so
/// cleaning an already-clean title is a no-op.
pub struct TitleCleaner {
    percent_off: Regex,
    promo_label: Regex,
    price: Regex,
    doubled_price: Regex,
    price_tail: Regex,
    digit_upper: Regex,
    whitespace: Regex,
}

impl Default for TitleCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleCleaner {
    pub fn new() -> Self {
        Self {
            percent_off: Regex::new(r"(?i)\b\d{1,3}\s*%(\s*off)?").unwrap(),
            promo_label: Regex::new(r"(?i)limited[ -]time deal|typical:|list:").unwrap(),
            price: Regex::new(r"\$\s?\d+(?:,\d{3})*(?:\.\d{1,2})?").unwrap(),
            doubled_price: Regex::new(r"(\d+\.\d{2})(\d+\.\d{2})").unwrap(),
            price_tail: Regex::new(r"(\d+\.\d{2})\d+").unwrap(),
            digit_upper: Regex::new(r"(\d)([A-Z])").unwrap(),
            whitespace: Regex::new(r"\s+").unwrap(),
        }
    }

    pub fn clean(&self, raw: &str) -> String {
        let s = self.percent_off.replace_all(raw, "");
        let s = self.promo_label.replace_all(&s, "");
        let s = self.price.replace_all(&s, "");
        // The regex engine has no backreferences, so the doubled-price
        // collapse compares the captures by hand.
        let s = self.doubled_price.replace_all(&s, |caps: &regex::Captures| {
            if caps[1] == caps[2] {
                caps[1].to_string()
            } else {
                caps[0].to_string()
            }
        });
        let s = self.price_tail.replace_all(&s, "$1");
        // Only uppercase: "2Pack" gets a space, ordinals like "5th" do not.
        let s = self.digit_upper.replace_all(&s, "$1 $2");
        let s = self.whitespace.replace_all(&s, " ");
        let s = s.trim();

        if s.chars().count() > MAX_TITLE_LEN {
            s.chars().take(MAX_TITLE_LEN).collect::<String>().trim_end().to_string()
        } else {
            s.to_string()
        }
    }
}
