pub mod descriptor;
pub mod driver;
pub mod inspect;
pub mod sink;
pub mod verify;

pub use descriptor::{builtin_fixtures, FixtureDescriptor, FIXTURE_TEXT};
pub use driver::{DriverConfig, FixtureDriver, FixtureOutcome, FixtureSummary, Inspector, RunReport};
pub use inspect::{dump, DumpFormat};
pub use sink::{DirectorySink, FixtureSink};
pub use verify::verify_roundtrip;
