/// Price strings come straight off the page and may carry a currency
/// symbol and thousands separators.
fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .trim_start_matches('$')
        .replace(',', "")
        .parse::<f64>()
        .ok()
}

/// Percentage saved between list and deal price, rounded to the nearest
/// whole number. Missing or unparsable prices, a zero list price, and
/// negative results (deal above list, a scraping artifact) all yield None.
pub fn discount_percent(list_price: Option<&str>, deal_price: Option<&str>) -> Option<i64> {
    let list = parse_price(list_price?)?;
    let deal = parse_price(deal_price?)?;
    if list <= 0.0 {
        return None;
    }
    let percent = ((list - deal) / list * 100.0).round() as i64;
    if percent <= 0 {
        return None;
    }
    Some(percent)
}

pub fn discount_line(list_price: Option<&str>, deal_price: Option<&str>) -> Option<String> {
    discount_percent(list_price, deal_price).map(format_discount)
}

pub fn format_discount(percent: i64) -> String {
    format!("{}% off", percent)
}
