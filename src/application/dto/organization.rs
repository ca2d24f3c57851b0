use crate::domain::{
    division::{Division, SubDivision},
    staff::{SocialLink, Staff},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DivisionDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
    #[serde(with = "serde_time::option", skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Division> for DivisionDto {
    fn from(division: Division) -> Self {
        Self {
            id: division.id.into(),
            name: division.name.into_inner(),
            slug: division.slug.into_inner(),
            description: division.description.map(|d| d.into_inner()),
            image: division.image.map(|i| i.into_inner()),
            created_at: division.created_at,
            updated_at: division.updated_at,
            deleted_at: division.deleted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubDivisionDto {
    pub id: i64,
    pub division_id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
    #[serde(with = "serde_time::option", skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<SubDivision> for SubDivisionDto {
    fn from(sub: SubDivision) -> Self {
        Self {
            id: sub.id.into(),
            division_id: sub.division_id.into(),
            name: sub.name.into_inner(),
            slug: sub.slug.into_inner(),
            description: sub.description.map(|d| d.into_inner()),
            created_at: sub.created_at,
            updated_at: sub.updated_at,
            deleted_at: sub.deleted_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SocialLinkDto {
    pub platform: String,
    pub url: String,
}

impl From<SocialLink> for SocialLinkDto {
    fn from(link: SocialLink) -> Self {
        Self {
            platform: link.platform.as_str().to_string(),
            url: link.url,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StaffDto {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub division_id: i64,
    pub sub_division_id: Option<i64>,
    pub image: Option<String>,
    pub social_links: Vec<SocialLinkDto>,
    pub sort_order: i32,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
    #[serde(with = "serde_time::option", skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Staff> for StaffDto {
    fn from(staff: Staff) -> Self {
        Self {
            id: staff.id.into(),
            name: staff.name.into_inner(),
            position: staff.position.into_inner(),
            division_id: staff.division_id.into(),
            sub_division_id: staff.sub_division_id.map(Into::into),
            image: staff.image.map(|i| i.into_inner()),
            social_links: staff.social_links.into_iter().map(Into::into).collect(),
            sort_order: staff.sort_order,
            created_at: staff.created_at,
            updated_at: staff.updated_at,
            deleted_at: staff.deleted_at,
        }
    }
}
