//! The host environment's preferred colour scheme.

/// Explicit override: `1`/`true`/`dark` or `0`/`false`/`light`.
pub const DARK_MODE_ENV: &str = "GAMEVAULT_DARK_MODE";

/// Best guess at whether the terminal prefers a dark theme, or `None` when
/// the environment gives no hint.
pub fn ambient_dark_mode() -> Option<bool> {
    if let Some(flag) = std::env::var(DARK_MODE_ENV).ok().and_then(|v| parse_flag(&v)) {
        return Some(flag);
    }
    std::env::var("COLORFGBG").ok().and_then(|v| parse_colorfgbg(&v))
}

pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "dark" => Some(true),
        "0" | "false" | "no" | "light" => Some(false),
        _ => None,
    }
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); background colours
/// 0-6 and 8 are dark in the standard 16-colour palette.
pub fn parse_colorfgbg(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(bg <= 6 || bg == 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("Dark"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_parse_colorfgbg() {
        assert_eq!(parse_colorfgbg("15;0"), Some(true));
        assert_eq!(parse_colorfgbg("0;15"), Some(false));
        assert_eq!(parse_colorfgbg("15;default;8"), Some(true));
        assert_eq!(parse_colorfgbg("garbage"), None);
    }
}
