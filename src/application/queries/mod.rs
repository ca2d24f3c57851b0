pub mod articles;
pub mod records;

pub use articles::{PublicArticleFilter, PublicArticleService};
pub use records::RecordQueryService;
