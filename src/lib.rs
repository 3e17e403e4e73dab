pub mod error;
pub mod normalizer;
pub(crate) mod parser;
pub mod reader;
pub mod types;

pub use error::{ParseError, ReadError};
pub use normalizer::{is_comment, parse_line, LineNormalizer};
pub use parser::{decode_attributes, Attribute};
pub use reader::{detect, Numbering, ReaderOptions, ReaderStats, VariantRecords};
pub use types::{FormatTag, ParsedLine, VariantRecord, MISSING, UNKNOWN_REF};
