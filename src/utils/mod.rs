pub mod id_codec;
pub mod password;
pub mod url_canonicalizer;

pub use id_codec::{decode as decode_id, encode as encode_id};
pub use url_canonicalizer::canonicalize;
