pub mod articles;
pub mod auth;
pub mod catalog;
pub mod organization;
pub mod pagination;
pub mod patch;
pub mod serde_time;
pub mod taxonomy;

pub use articles::ArticleDto;
pub use auth::Actor;
pub use catalog::{GalleryDto, ProductDto};
pub use organization::{DivisionDto, SocialLinkDto, StaffDto, SubDivisionDto};
pub use pagination::{ListResponse, PageMetaDto, SortDto};
pub use taxonomy::{CategoryDto, TagDto};
