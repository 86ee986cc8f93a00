//! Pipeline step implementations.
//!
//! The campaign pipeline is fetch-authors → generate-emails →
//! store-campaign (optional) → write-csv. Each step owns the adapter
//! handles it needs; nothing here is a global.

pub mod authors;
pub mod csv;
pub mod draft;
pub mod emails;
pub mod memories;

pub use authors::FetchAuthors;
pub use csv::WriteCsv;
pub use draft::draft_email;
pub use emails::GenerateEmails;
pub use memories::StoreCampaign;
