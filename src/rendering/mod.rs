pub mod codec;
pub mod composite;

pub use codec::{decode_rgba, encode_gray_png, encode_png, optimize_png};
pub use composite::{composite, flatten_color};
