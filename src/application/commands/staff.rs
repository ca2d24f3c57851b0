// src/application/commands/staff.rs
use super::records::{CreateInput, ManagedRecord, UpdateInput, WriteContext, required};
use crate::{
    application::dto::{StaffDto, patch::nullable},
    domain::{
        division::{DivisionId, SubDivisionId},
        errors::{DomainError, DomainResult, FieldErrors},
        staff::{MAX_SOCIAL_LINKS, NewStaff, SocialLink, Staff},
        values::{ImagePath, Name, Position},
    },
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SocialLinkInput {
    /// instagram, facebook, twitter/x, linkedin, github, youtube, tiktok or website.
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateStaffCommand {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub division_id: Option<i64>,
    #[serde(default)]
    pub sub_division_id: Option<i64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub social_links: Vec<SocialLinkInput>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateStaffCommand {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub division_id: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i64>)]
    pub sub_division_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
    /// Replaces every link when present; `[]` removes them all.
    #[serde(default)]
    pub social_links: Option<Vec<SocialLinkInput>>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

fn social_links(errors: &mut FieldErrors, inputs: Vec<SocialLinkInput>) -> Option<Vec<SocialLink>> {
    if inputs.len() > MAX_SOCIAL_LINKS {
        errors.insert(
            "social_links",
            format!("may not have more than {MAX_SOCIAL_LINKS} items"),
        );
        return None;
    }

    let mut links = Vec::with_capacity(inputs.len());
    let mut valid = true;
    for (index, input) in inputs.into_iter().enumerate() {
        match errors.capture(
            &format!("social_links.{index}"),
            SocialLink::new(&input.platform, input.url),
        ) {
            Some(link) => links.push(link),
            None => valid = false,
        }
    }
    valid.then_some(links)
}

fn sort_order(value: i32) -> DomainResult<i32> {
    if value < 0 {
        Err(DomainError::Validation("must not be negative".into()))
    } else {
        Ok(value)
    }
}

fn sub_division(value: Option<i64>) -> DomainResult<Option<SubDivisionId>> {
    value.map(SubDivisionId::new).transpose()
}

impl CreateInput<Staff> for CreateStaffCommand {
    fn into_new(self, ctx: &WriteContext<'_>) -> Result<NewStaff, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.capture("name", Name::new(self.name));
        let position = errors.capture("position", Position::new(self.position));
        let division_id = required(
            &mut errors,
            "division_id",
            self.division_id.map(DivisionId::new),
        );
        let sub_division_id = errors.capture("sub_division_id", sub_division(self.sub_division_id));
        let image = errors.capture("image", ImagePath::optional(self.image));
        let links = social_links(&mut errors, self.social_links);
        let order = errors.capture("sort_order", sort_order(self.sort_order.unwrap_or(0)));

        match (name, position, division_id, sub_division_id, image, links, order) {
            (
                Some(name),
                Some(position),
                Some(division_id),
                Some(sub_division_id),
                Some(image),
                Some(social_links),
                Some(sort_order),
            ) if errors.is_empty() => Ok(NewStaff {
                name,
                position,
                division_id,
                sub_division_id,
                image,
                social_links,
                sort_order,
                created_at: ctx.now,
                updated_at: ctx.now,
            }),
            _ => Err(errors),
        }
    }
}

impl UpdateInput<Staff> for UpdateStaffCommand {
    fn apply(self, record: &mut Staff, _ctx: &WriteContext<'_>) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.capture_some("name", self.name.map(Name::new));
        let position = errors.capture_some("position", self.position.map(Position::new));
        let division_id =
            errors.capture_some("division_id", self.division_id.map(DivisionId::new));
        let sub_division_id =
            errors.capture_some("sub_division_id", self.sub_division_id.map(sub_division));
        let image = errors.capture_some("image", self.image.map(ImagePath::optional));
        let links = self
            .social_links
            .and_then(|inputs| social_links(&mut errors, inputs));
        let order = errors.capture_some("sort_order", self.sort_order.map(sort_order));
        errors.into_result()?;

        if let Some(name) = name {
            record.name = name;
        }
        if let Some(position) = position {
            record.position = position;
        }
        if let Some(division_id) = division_id {
            record.division_id = division_id;
        }
        if let Some(sub_division_id) = sub_division_id {
            record.sub_division_id = sub_division_id;
        }
        if let Some(image) = image {
            record.image = image;
        }
        if let Some(links) = links {
            record.social_links = links;
        }
        if let Some(order) = order {
            record.sort_order = order;
        }
        Ok(())
    }
}

impl ManagedRecord for Staff {
    type Dto = StaffDto;
    type Create = CreateStaffCommand;
    type Update = UpdateStaffCommand;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(platform: &str, url: &str) -> SocialLinkInput {
        SocialLinkInput {
            platform: platform.into(),
            url: url.into(),
        }
    }

    #[test]
    fn social_link_errors_are_indexed() {
        let mut errors = FieldErrors::new();
        let links = social_links(
            &mut errors,
            vec![
                link("instagram", "https://instagram.com/himpunan"),
                link("myspace", "https://myspace.com/x"),
            ],
        );
        assert!(links.is_none());
        assert!(errors.contains("social_links.1.platform"));
        assert!(!errors.contains("social_links.0.platform"));
    }

    #[test]
    fn too_many_social_links_are_rejected() {
        let mut errors = FieldErrors::new();
        let inputs = (0..=MAX_SOCIAL_LINKS)
            .map(|_| link("github", "https://github.com/himpunan"))
            .collect();
        assert!(social_links(&mut errors, inputs).is_none());
        assert!(errors.contains("social_links"));
    }

    #[test]
    fn empty_social_links_clear_the_set() {
        let mut errors = FieldErrors::new();
        assert_eq!(social_links(&mut errors, vec![]), Some(vec![]));
        assert!(errors.is_empty());
    }
}
