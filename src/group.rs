use std::fmt;

/// Title used when a sample has no entry in the title table
pub const MISSING_TITLE: &str = "N/A";

/// Biological group of a sample, inferred from its title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Group {
    Pigmented,
    NonPigmented,
    Irrelevant,
}
impl Group {
    /// Classifies a title
    ///
    /// `PB`/`PU` are checked before `NB`/`NU`, so a title carrying both kinds
    /// of tag is pigmented. Only the exact title `N/A` counts as missing.
    pub fn classify(title: Option<&str>) -> Self {
        match title {
            None | Some(MISSING_TITLE) => Group::Irrelevant,
            Some(t) if t.contains("PB") || t.contains("PU") => Group::Pigmented,
            Some(t) if t.contains("NB") || t.contains("NU") => Group::NonPigmented,
            Some(_) => Group::Irrelevant,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Pigmented => "pigmented",
            Group::NonPigmented => "non_pigmented",
            Group::Irrelevant => "irrelevant",
        }
    }

    pub fn is_relevant(&self) -> bool {
        !matches!(self, Group::Irrelevant)
    }
}
impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
