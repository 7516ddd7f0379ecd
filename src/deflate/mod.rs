pub mod lz77;
pub mod stored;
pub mod tables;
pub mod tokens;

pub use lz77::Matcher;
pub use stored::encode_stored;
pub use tokens::LZ77Token;
