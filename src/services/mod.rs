pub mod document_url;
pub mod rate_reader;
