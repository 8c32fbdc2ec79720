pub mod json_file;
pub mod memory;

pub use json_file::JsonFileUserDirectory;
pub use memory::InMemoryUserDirectory;
