// src/domain/staff.rs
//! Staff members ("pengurus") and their social links.
use crate::domain::division::{DivisionFilter, DivisionId, SubDivisionId};
use crate::domain::errors::{DomainError, DomainResult, FieldErrors};
use crate::domain::listing::{ListSpec, Listable, SortKey};
use crate::domain::record::{Record, Resource};
use crate::domain::values::{ImagePath, Name, Position, http_url, record_id};
use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

record_id!(StaffId, "staff");

pub const MAX_SOCIAL_LINKS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialPlatform {
    Instagram,
    Facebook,
    Twitter,
    Linkedin,
    Github,
    Youtube,
    Tiktok,
    Website,
}

impl SocialPlatform {
    pub fn as_str(self) -> &'static str {
        match self {
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Linkedin => "linkedin",
            SocialPlatform::Github => "github",
            SocialPlatform::Youtube => "youtube",
            SocialPlatform::Tiktok => "tiktok",
            SocialPlatform::Website => "website",
        }
    }
}

impl FromStr for SocialPlatform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "instagram" => Ok(SocialPlatform::Instagram),
            "facebook" => Ok(SocialPlatform::Facebook),
            "twitter" | "x" => Ok(SocialPlatform::Twitter),
            "linkedin" => Ok(SocialPlatform::Linkedin),
            "github" => Ok(SocialPlatform::Github),
            "youtube" => Ok(SocialPlatform::Youtube),
            "tiktok" => Ok(SocialPlatform::Tiktok),
            "website" | "web" => Ok(SocialPlatform::Website),
            other => Err(DomainError::Validation(format!(
                "unsupported platform: {other}"
            ))),
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub url: String,
}

impl SocialLink {
    pub fn new(platform: &str, url: impl Into<String>) -> DomainResult<Self> {
        let mut errors = FieldErrors::new();
        let platform = errors.capture("platform", platform.parse::<SocialPlatform>());
        let url = errors.capture("url", http_url(url));
        match (platform, url) {
            (Some(platform), Some(url)) => Ok(Self { platform, url }),
            _ => Err(errors.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Staff {
    pub id: StaffId,
    pub name: Name,
    pub position: Position,
    pub division_id: DivisionId,
    pub sub_division_id: Option<SubDivisionId>,
    pub image: Option<ImagePath>,
    pub social_links: Vec<SocialLink>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewStaff {
    pub name: Name,
    pub position: Position,
    pub division_id: DivisionId,
    pub sub_division_id: Option<SubDivisionId>,
    pub image: Option<ImagePath>,
    pub social_links: Vec<SocialLink>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listable for Staff {
    fn record_id(&self) -> i64 {
        self.id.0
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn search_text(&self, column: &str) -> Option<&str> {
        match column {
            "name" => Some(self.name.as_str()),
            "position" => Some(self.position.as_str()),
            _ => None,
        }
    }

    fn sort_key(&self, column: &str) -> SortKey<'_> {
        match column {
            "name" => SortKey::Text(self.name.as_str()),
            "position" => SortKey::Text(self.position.as_str()),
            "sort_order" => SortKey::Int(i64::from(self.sort_order)),
            "created_at" => SortKey::Time(self.created_at),
            "updated_at" => SortKey::Time(self.updated_at),
            _ => SortKey::Int(self.id.0),
        }
    }
}

/// A staff member's sub-division must sit under their division.
pub fn sub_division_outside_division() -> DomainError {
    DomainError::InvalidFields(FieldErrors::single(
        "sub_division_id",
        "does not belong to the selected division",
    ))
}

impl Record for Staff {
    type New = NewStaff;
    type Filter = DivisionFilter;

    const RESOURCE: Resource = Resource::Staff;
    const LIST: ListSpec = ListSpec {
        searchable: &["name", "position"],
        sortable: &["id", "name", "position", "sort_order", "created_at", "updated_at"],
    };

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn from_new(id: i64, new: NewStaff) -> DomainResult<Self> {
        Ok(Self {
            id: StaffId::new(id)?,
            name: new.name,
            position: new.position,
            division_id: new.division_id,
            sub_division_id: new.sub_division_id,
            image: new.image,
            social_links: new.social_links,
            sort_order: new.sort_order,
            created_at: new.created_at,
            updated_at: new.updated_at,
            deleted_at: None,
        })
    }

    fn set_deleted_at(&mut self, deleted_at: Option<DateTime<Utc>>) {
        self.deleted_at = deleted_at;
    }

    fn matches(&self, filter: &DivisionFilter) -> bool {
        filter.division_id.is_none_or(|id| id == self.division_id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_parsing_is_case_insensitive() {
        assert_eq!("Instagram".parse::<SocialPlatform>().unwrap(), SocialPlatform::Instagram);
        assert_eq!("x".parse::<SocialPlatform>().unwrap(), SocialPlatform::Twitter);
        assert!("myspace".parse::<SocialPlatform>().is_err());
    }

    #[test]
    fn social_link_reports_each_bad_field() {
        let err = SocialLink::new("myspace", "not a url").unwrap_err();
        match err {
            DomainError::InvalidFields(fields) => {
                assert!(fields.contains("platform"));
                assert!(fields.contains("url"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
