//! Stateless helpers shared by the archive and PDF readers.

pub mod binary;
pub mod encoding;
pub mod path;
pub mod size;

pub use binary::{binary_runs, binary_spawns};
pub use encoding::{decode_base64, encode_base64, is_base64, write_base64, write_bytes};
pub use path::{extension, is_hidden, is_image, IMAGE_EXTENSIONS};
pub use size::bytes_to_human;
