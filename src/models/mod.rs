pub mod category;
pub mod research_gap;
pub mod uploaded_file;

pub use category::{CategoryStyle, GapCategory};
pub use research_gap::{AnalysisResponse, ResearchGap, ResultSet};
pub use uploaded_file::{FileSet, UploadedFile};
