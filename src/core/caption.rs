/// Assembles the final post text: intro line, cleaned title, discount
/// line, affiliate link, hashtag line. Empty pieces are dropped rather
/// than leaving blank lines.
pub fn build_caption(
    intro: &str,
    title: &str,
    discount_line: Option<&str>,
    link: &str,
    hashtags: &[String],
) -> String {
    let mut lines = Vec::new();

    if !intro.is_empty() {
        lines.push(intro.to_string());
    }
    if !title.is_empty() {
        lines.push(title.to_string());
    }
    if let Some(discount) = discount_line {
        lines.push(format!("💰 {}", discount));
    }
    lines.push(format!("👉 {}", link));
    if !hashtags.is_empty() {
        lines.push(hashtags.join(" "));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_caption_ordering() {
        let caption = build_caption(
            "🔥 HUGE discount! Upgrade your smart home:",
            "Echo Dot (5th Gen)",
            Some("50% off"),
            "https://www.amazon.com/dp/B08N5WRWNW?tag=test-20",
            &["#Deals".to_string(), "#Alexa".to_string()],
        );

        let lines: Vec<&str> = caption.lines().collect();
        assert_eq!(lines[0], "🔥 HUGE discount! Upgrade your smart home:");
        assert_eq!(lines[1], "Echo Dot (5th Gen)");
        assert_eq!(lines[2], "💰 50% off");
        assert_eq!(lines[3], "👉 https://www.amazon.com/dp/B08N5WRWNW?tag=test-20");
        assert_eq!(lines[4], "#Deals #Alexa");
    }

    #[test]
    fn test_optional_pieces_dropped() {
        let caption = build_caption("", "Widget", None, "https://example.com/dp/X", &[]);
        assert_eq!(caption, "Widget\n👉 https://example.com/dp/X");
    }
}
