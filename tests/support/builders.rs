// tests/support/builders.rs
use profil_cms::application::commands::{
    articles::CreateArticleCommand, categories::CreateCategoryCommand,
    staff::{CreateStaffCommand, SocialLinkInput},
    tags::CreateTagCommand,
};

pub fn category(name: &str) -> CreateCategoryCommand {
    CreateCategoryCommand {
        name: name.into(),
        ..Default::default()
    }
}

pub fn tag(name: &str) -> CreateTagCommand {
    CreateTagCommand {
        name: name.into(),
        ..Default::default()
    }
}

pub struct ArticleBuilder {
    command: CreateArticleCommand,
}

impl ArticleBuilder {
    pub fn new(category_id: i64) -> Self {
        Self {
            command: CreateArticleCommand {
                title: "Test Article".into(),
                body: "Test body".into(),
                category_id: Some(category_id),
                ..Default::default()
            },
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.command.title = title.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.command.slug = Some(slug.into());
        self
    }

    pub fn tags(mut self, ids: &[i64]) -> Self {
        self.command.tag_ids = ids.to_vec();
        self
    }

    pub fn published(mut self) -> Self {
        self.command.published = true;
        self
    }

    pub fn build(self) -> CreateArticleCommand {
        self.command
    }
}

pub fn staff_member(name: &str, division_id: i64) -> CreateStaffCommand {
    CreateStaffCommand {
        name: name.into(),
        position: "Ketua".into(),
        division_id: Some(division_id),
        social_links: vec![
            SocialLinkInput {
                platform: "instagram".into(),
                url: "https://instagram.com/example".into(),
            },
            SocialLinkInput {
                platform: "github".into(),
                url: "https://github.com/example".into(),
            },
        ],
        ..Default::default()
    }
}
