// Résumé analysis: upload staging, text extraction, tokenizing, keyword
// scoring, section splitting and suggestions.
// Everything below the handlers is synchronous and request-local except PDF
// parsing, which runs on the blocking pool.

pub mod extractor;
pub mod handlers;
pub mod report;
pub mod scoring;
pub mod sections;
pub mod suggestions;
pub mod tokenizer;
pub mod upload;
pub mod vocabulary;
