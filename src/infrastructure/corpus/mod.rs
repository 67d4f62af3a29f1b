//! Document source implementations

mod directory;

pub use directory::DirectoryDocumentSource;
