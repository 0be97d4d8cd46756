//! Writer options.

use contracts::*;

/// How terms are rendered.
///
/// The default inlines every subterm at each of its occurrences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WriterConfig {
    /// Bind each interior node to a `let` name so shared subterms are written once.
    pub daggify: bool,
}

impl WriterConfig {
    #[must_use]
    pub const fn new(daggify: bool) -> Self {
        Self { daggify }
    }

    #[must_use]
    pub const fn builder() -> WriterConfigBuilder {
        WriterConfigBuilder {
            config: Self::new(false),
        }
    }
}

/// Builder for [`WriterConfig`].
#[derive(Clone, Copy, Debug, Default)]
pub struct WriterConfigBuilder {
    config: WriterConfig,
}

impl WriterConfigBuilder {
    /// Sets whether terms are rendered with `let` bindings.
    #[must_use]
    #[ensures(ret.config.daggify == daggify)]
    pub fn daggify(mut self, daggify: bool) -> Self {
        self.config.daggify = daggify;
        self
    }

    #[must_use]
    pub const fn build(self) -> WriterConfig {
        self.config
    }
}
