pub mod file_source;
pub mod intake;
pub mod presenter;

pub use file_source::{FileSource, PathFileSource, StaticFileSource};
pub use intake::{remove_at, validate_batch, IntakePolicy, IntakeSession};
pub use presenter::{ResultPresenter, ResultsView};
