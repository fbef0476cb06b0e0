/// Recurrence pattern of a dose schedule.
///
/// Stored as free text so that frequencies added later do not break existing
/// rows; anything other than `daily` or `weekly` is carried as `Unsupported`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    Weekly,
    Unsupported(String),
}

impl Frequency {
    /// Parses a stored frequency, ignoring ASCII case.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            _ => Self::Unsupported(raw.to_owned()),
        }
    }

    /// Text as stored; unsupported values keep their original spelling.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Unsupported(raw) => raw.as_str(),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
