pub mod calculated;
pub mod draft;
pub mod equipment;
pub mod file_formats;
pub mod lenient;
pub mod recipe;
pub mod style;
