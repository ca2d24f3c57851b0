pub mod article;
pub mod category;
pub mod division;
pub mod errors;
pub mod gallery;
pub mod listing;
pub mod product;
pub mod record;
pub mod slug;
pub mod staff;
pub mod tag;
pub mod user;
pub mod values;
