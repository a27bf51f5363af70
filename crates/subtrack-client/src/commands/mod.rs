pub mod categories;
pub mod common;
pub mod cycles;
pub mod dash;
pub mod forecast;
pub mod list;
pub mod summary;
pub mod upcoming;
pub mod validate;
