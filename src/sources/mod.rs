pub mod normalizer;
pub mod linkedin;
pub mod github;
pub mod pdf;

pub use normalizer::normalize;
pub use linkedin::extract_profile;
pub use pdf::{decode_document, PdfDecoder, PdfExtractDecoder};
