pub mod model;

pub use model::{is_mapped, load_raw_bin, read_u8, read_u16, Image, Segment};
