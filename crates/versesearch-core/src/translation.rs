/// Bible translations offered by the verse API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Translation {
    #[default]
    Web,
    Kjv,
    Asv,
    Bbe,
}

impl Translation {
    /// Code sent as the `translation` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Translation::Web => "web",
            Translation::Kjv => "kjv",
            Translation::Asv => "asv",
            Translation::Bbe => "bbe",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "web" => Some(Translation::Web),
            "kjv" => Some(Translation::Kjv),
            "asv" => Some(Translation::Asv),
            "bbe" => Some(Translation::Bbe),
            _ => None,
        }
    }

    pub fn all() -> Vec<Translation> {
        vec![
            Translation::Web,
            Translation::Kjv,
            Translation::Asv,
            Translation::Bbe,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Translation::Web => "WEB - World English Bible (default)",
            Translation::Kjv => "KJV - King James Version",
            Translation::Asv => "ASV - American Standard Version",
            Translation::Bbe => "BBE - Bible in Basic English",
        }
    }

    /// Upper-case code used in history entries, e.g. `KJV`
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|t| t == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|t| t == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

impl std::fmt::Display for Translation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_web() {
        assert_eq!(Translation::default(), Translation::Web);
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!(Translation::from_str("KJV"), Some(Translation::Kjv));
        assert_eq!(Translation::from_str(" bbe "), Some(Translation::Bbe));
        assert_eq!(Translation::from_str("niv"), None);
    }

    #[test]
    fn test_codes_round_trip() {
        for t in Translation::all() {
            assert_eq!(Translation::from_str(t.as_str()), Some(t));
        }
    }

    #[test]
    fn test_cycle_wraps_around() {
        assert_eq!(Translation::Bbe.next(), Translation::Web);
        assert_eq!(Translation::Web.prev(), Translation::Bbe);
        assert_eq!(Translation::Web.next().prev(), Translation::Web);
    }

    #[test]
    fn test_label_is_uppercase_code() {
        assert_eq!(Translation::Asv.label(), "ASV");
    }
}
