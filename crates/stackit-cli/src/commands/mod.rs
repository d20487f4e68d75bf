//! Command implementations.

pub mod list;
pub mod tags;

pub use self::list::execute_list;
pub use self::tags::execute_tags;
