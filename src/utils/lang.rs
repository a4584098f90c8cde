/// Language codes served under the URL prefix, in sitemap order.
pub const SUPPORTED_LANGS: [&str; 6] = ["zh-CN", "zh-TW", "en", "vi", "ja", "ko"];

pub const DEFAULT_LANG: &str = "en";

pub fn is_supported(code: &str) -> bool {
    SUPPORTED_LANGS.contains(&code)
}

/// Unknown language codes fall back to the default.
pub fn normalize(code: &str) -> &str {
    if is_supported(code) {
        code
    } else {
        DEFAULT_LANG
    }
}

/// Best-effort city name from a free-text address. Western-style addresses
/// put the city last ("..., Hanoi"); CJK addresses put it first.
pub fn extract_city(address: &str, lang: &str) -> String {
    let segments: Vec<&str> = address
        .split(&[',', '，'][..])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let city = match lang {
        "zh-CN" | "zh-TW" | "ja" | "ko" => segments.first(),
        _ => segments.last(),
    };

    city.copied().unwrap_or(address).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_falls_back_to_english() {
        assert_eq!(normalize("vi"), "vi");
        assert_eq!(normalize("zh-CN"), "zh-CN");
        assert_eq!(normalize("fr"), "en");
        assert_eq!(normalize(""), "en");
    }

    #[test]
    fn extract_city_western_order() {
        assert_eq!(extract_city("1 Le Duan Street, District 1, Hanoi", "en"), "Hanoi");
        assert_eq!(extract_city("Da Nang", "vi"), "Da Nang");
    }

    #[test]
    fn extract_city_cjk_order() {
        assert_eq!(extract_city("河内市，还剑郡，黎笋街1号", "zh-CN"), "河内市");
    }
}
