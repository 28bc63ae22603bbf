//! Document Extractor Adapters - 文档文本提取实现

mod http_extractor;
mod plain_text;

pub use http_extractor::{HttpDocumentExtractor, HttpExtractorConfig};
pub use plain_text::{PlainTextExtractor, PLAIN_TEXT_EXTENSIONS};
