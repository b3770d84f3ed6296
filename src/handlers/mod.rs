pub mod map;
pub mod mappings;

pub use map::{MapOptions, handle_map};
pub use mappings::handle_mappings;
