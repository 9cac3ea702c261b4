pub mod client;
pub mod deserializers;
pub mod synonyms;
pub mod types;

pub use client::{download_href, ClientConfig, DocumentApi, DownloadedDocument, HttpDocumentClient};
pub use types::{Analysis, AnalysisResponse, Decision, Law, Recommendations, RequestPayload};
