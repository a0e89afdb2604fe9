//! The fixed set of "special" schemes the standard treats differently (they require an
//! authority and a hierarchical path, and accept `\` as an alternative path separator).

/// Which of the six recognized special schemes (or none) a URL's scheme string names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchemeKind {
    Http,
    Https,
    Ws,
    Wss,
    Ftp,
    File,
    Other,
}

impl SchemeKind {
    /// Classifies a scheme string case-insensitively, without allocating to lowercase it first.
    pub(crate) fn classify(scheme: &str) -> SchemeKind {
        if scheme.eq_ignore_ascii_case("http") {
            SchemeKind::Http
        } else if scheme.eq_ignore_ascii_case("https") {
            SchemeKind::Https
        } else if scheme.eq_ignore_ascii_case("ws") {
            SchemeKind::Ws
        } else if scheme.eq_ignore_ascii_case("wss") {
            SchemeKind::Wss
        } else if scheme.eq_ignore_ascii_case("ftp") {
            SchemeKind::Ftp
        } else if scheme.eq_ignore_ascii_case("file") {
            SchemeKind::File
        } else {
            SchemeKind::Other
        }
    }

    #[inline]
    pub fn is_special(self) -> bool {
        !matches!(self, SchemeKind::Other)
    }

    #[inline]
    pub fn is_file(self) -> bool {
        matches!(self, SchemeKind::File)
    }

    /// The scheme's default port, or `None` for `file:` and non-special schemes.
    pub fn default_port(self) -> Option<u16> {
        match self {
            SchemeKind::Http | SchemeKind::Ws => Some(80),
            SchemeKind::Https | SchemeKind::Wss => Some(443),
            SchemeKind::Ftp => Some(21),
            SchemeKind::File | SchemeKind::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_case_insensitively() {
        assert_eq!(SchemeKind::classify("HTTP"), SchemeKind::Http);
        assert_eq!(SchemeKind::classify("FtP"), SchemeKind::Ftp);
        assert_eq!(SchemeKind::classify("gemini"), SchemeKind::Other);
    }

    #[test]
    fn default_ports() {
        assert_eq!(SchemeKind::Http.default_port(), Some(80));
        assert_eq!(SchemeKind::Wss.default_port(), Some(443));
        assert_eq!(SchemeKind::File.default_port(), None);
        assert_eq!(SchemeKind::Other.default_port(), None);
    }

    #[test]
    fn specialness() {
        assert!(SchemeKind::Ftp.is_special());
        assert!(SchemeKind::File.is_special());
        assert!(!SchemeKind::Other.is_special());
    }
}
