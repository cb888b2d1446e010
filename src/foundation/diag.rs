/// Category of a soft constraint violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// A feature requested a single-axis size larger than the panel interior.
    FeatureOverflow,
    /// Text did not fit its bounds even at the minimum font size.
    TextOverflow,
    /// Page dimensions were given in portrait and swapped to landscape.
    PageOrientation,
}

/// A soft constraint violation. Rendering continued with an adjusted value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
    /// What kind of violation occurred.
    pub kind: WarningKind,
    /// Human-readable detail.
    pub message: String,
}

/// Collects warnings raised while resolving configuration or rendering a page.
///
/// Every warning is also emitted through `tracing` when it is recorded.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning.
    pub fn warn(&mut self, kind: WarningKind, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(?kind, "{message}");
        self.warnings.push(Warning { kind, message });
    }

    /// Append all warnings from `other`, keeping their order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }

    /// Recorded warnings in the order they were raised.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Number of warnings of the given kind.
    pub fn count(&self, kind: WarningKind) -> usize {
        self.warnings.iter().filter(|w| w.kind == kind).count()
    }

    /// `true` when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}
