use std::fmt::Display;

/// Which flavor of TypeScript file a converted module is written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputVariant {
    /// No JSX anywhere: `.ts`.
    #[default]
    Plain,

    /// The module contains JSX: `.tsx`.
    Markup,
}

impl OutputVariant {
    /// The output file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputVariant::Plain => "ts",
            OutputVariant::Markup => "tsx",
        }
    }
}

impl Display for OutputVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

/// Remembers whether a JSX element or fragment was seen during a traversal.
///
/// Starts out false for each module and never goes back once set.
#[derive(Debug, Default)]
pub struct MarkupDetector {
    seen: bool,
}

impl MarkupDetector {
    /// Records a JSX node.
    pub fn observe(&mut self) {
        self.seen = true;
    }

    /// Whether any JSX node was recorded.
    pub fn has_markup(&self) -> bool {
        self.seen
    }

    /// The output variant implied by what was seen.
    pub fn variant(&self) -> OutputVariant {
        if self.seen {
            OutputVariant::Markup
        } else {
            OutputVariant::Plain
        }
    }
}
