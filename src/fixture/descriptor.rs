use crate::{CompressionLevel, Strategy};

/// Text compressed by every built-in fixture
pub const FIXTURE_TEXT: &str = "Some text. Oh text.. oh text oh text ooh.. yayyyy ayayayya.
    I am a text fan aaaahhh.. I\"m a text fan. I need just text. Gimme the text! Gimme.";

/// One fixture to produce: what to compress, how, and where it goes
///
/// Immutable once built. `name` is the output identity handed to the sink and
/// must be unique within a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixtureDescriptor {
    name: String,
    input: Vec<u8>,
    strategy: Strategy,
    level: Option<CompressionLevel>,
}

impl FixtureDescriptor {
    pub fn new(name: impl Into<String>, input: impl Into<Vec<u8>>, strategy: Strategy) -> Self {
        Self { name: name.into(), input: input.into(), strategy, level: None }
    }

    pub fn with_level(mut self, level: CompressionLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input(&self) -> &[u8] {
        &self.input
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Level as given in the table, if any
    pub fn level(&self) -> Option<CompressionLevel> {
        self.level
    }

    /// Level the encoder runs with
    pub fn effective_level(&self) -> CompressionLevel {
        self.level.unwrap_or_default()
    }
}

/// The fixture table shipped with the generator
pub fn builtin_fixtures() -> Vec<FixtureDescriptor> {
    vec![
        FixtureDescriptor::new("nocompression-deflate.deflate", FIXTURE_TEXT, Strategy::Stored),
        FixtureDescriptor::new("fixed-comp-deflate.deflate", FIXTURE_TEXT, Strategy::FixedHuffman)
            .with_level(CompressionLevel::default()),
        FixtureDescriptor::new(
            "fixed-comp-deflate-best.deflate",
            FIXTURE_TEXT,
            Strategy::DynamicHuffman,
        )
        .with_level(CompressionLevel::Level9),
    ]
}
