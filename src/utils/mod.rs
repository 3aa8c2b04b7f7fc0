// Parsing utilities
pub mod parse_flag;
pub mod parse_int;

// Path utilities
pub mod path_decode;

// Re-export all utilities for convenient access
pub use parse_flag::parse_flag;
pub use parse_int::parse_optional_u64;
pub use path_decode::decode_segment;
