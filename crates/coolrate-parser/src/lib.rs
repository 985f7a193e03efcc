pub mod directory;
pub mod errors;
pub mod model;
mod reader;
pub mod schema;

pub use directory::{discover_files, load_directory, load_sample_file};
pub use errors::LoaderError;
pub use model::{LoaderOptions, SampleFile};
pub use reader::parse_sample_file;
