use profil_cms::application::commands::staff::{SocialLinkInput, UpdateStaffCommand};
use profil_cms::application::commands::divisions::CreateDivisionCommand;
use profil_cms::application::error::ApplicationError;
use profil_cms::application::queries::PublicArticleFilter;
use profil_cms::domain::listing::ListParams;
use profil_cms::domain::division::DivisionFilter;

mod support;

use support::{ArticleBuilder, admin, build_services, category, staff_member, tag};

#[tokio::test]
async fn show_counts_views_for_published_articles_only() {
    let services = build_services();
    let cat = services
        .categories
        .commands
        .create(&admin(), category("Berita"))
        .await
        .unwrap();
    let live = services
        .articles
        .commands
        .create(
            &admin(),
            ArticleBuilder::new(cat.id).title("Juara Lomba").published().build(),
        )
        .await
        .unwrap();
    services
        .articles
        .commands
        .create(&admin(), ArticleBuilder::new(cat.id).title("Draf").build())
        .await
        .unwrap();

    let first = services.public_articles.show_by_slug("juara-lomba").await.unwrap();
    let second = services.public_articles.show_by_slug("juara-lomba").await.unwrap();
    assert_eq!(first.id, live.id);
    assert_eq!(first.views, 1);
    assert_eq!(second.views, 2);

    let err = services
        .public_articles
        .show_by_slug("draf")
        .await
        .expect_err("drafts are not public");
    assert!(matches!(err, ApplicationError::NotFound(_)));

    let err = services
        .public_articles
        .show_by_slug("Not A Slug")
        .await
        .expect_err("malformed slug");
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn trashed_articles_disappear_from_the_public_site() {
    let services = build_services();
    let cat = services
        .categories
        .commands
        .create(&admin(), category("Berita"))
        .await
        .unwrap();
    let article = services
        .articles
        .commands
        .create(&admin(), ArticleBuilder::new(cat.id).published().build())
        .await
        .unwrap();
    services.articles.commands.delete(&admin(), article.id).await.unwrap();

    let err = services
        .public_articles
        .show_by_slug(&article.slug)
        .await
        .expect_err("trashed");
    assert!(matches!(err, ApplicationError::NotFound(_)));

    let page = services
        .public_articles
        .list_published(&ListParams::default(), &PublicArticleFilter::default())
        .await
        .unwrap();
    assert_eq!(page.meta.total, 0);
}

#[tokio::test]
async fn public_list_is_newest_first_and_filters_by_slug() {
    let services = build_services();
    let news = services
        .categories
        .commands
        .create(&admin(), category("Berita"))
        .await
        .unwrap();
    let events = services
        .categories
        .commands
        .create(&admin(), category("Acara"))
        .await
        .unwrap();
    let robot = services.tags.commands.create(&admin(), tag("Robot")).await.unwrap();

    for (title, cat, tags) in [
        ("Pertama", news.id, vec![robot.id]),
        ("Kedua", events.id, vec![]),
        ("Ketiga", news.id, vec![]),
    ] {
        services
            .articles
            .commands
            .create(
                &admin(),
                ArticleBuilder::new(cat).title(title).tags(&tags).published().build(),
            )
            .await
            .unwrap();
    }

    let all = services
        .public_articles
        .list_published(&ListParams::default(), &PublicArticleFilter::default())
        .await
        .unwrap();
    let titles: Vec<_> = all.items.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, ["Ketiga", "Kedua", "Pertama"]);

    let by_category = services
        .public_articles
        .list_published(
            &ListParams::default(),
            &PublicArticleFilter {
                category: Some("berita".into()),
                tag: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(by_category.meta.total, 2);

    let by_tag = services
        .public_articles
        .list_published(
            &ListParams::default(),
            &PublicArticleFilter {
                category: None,
                tag: Some("robot".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(by_tag.items.len(), 1);
    assert_eq!(by_tag.items[0].title, "Pertama");

    let unknown = services
        .public_articles
        .list_published(
            &ListParams::default(),
            &PublicArticleFilter {
                category: Some("tidak-ada".into()),
                tag: None,
            },
        )
        .await
        .unwrap();
    assert!(unknown.items.is_empty());
    assert_eq!(unknown.meta.total, 0);
}

#[tokio::test]
async fn staff_social_links_keep_their_order_and_are_replaced() {
    let services = build_services();
    let division = services
        .divisions
        .commands
        .create(
            &admin(),
            CreateDivisionCommand {
                name: "Riset".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let member = services
        .staff
        .commands
        .create(&admin(), staff_member("Budi", division.id))
        .await
        .unwrap();
    let platforms: Vec<_> = member
        .social_links
        .iter()
        .map(|l| l.platform.as_str())
        .collect();
    assert_eq!(platforms, ["instagram", "github"]);

    let updated = services
        .staff
        .commands
        .update(
            &admin(),
            member.id,
            UpdateStaffCommand {
                social_links: Some(vec![SocialLinkInput {
                    platform: "website".into(),
                    url: "https://example.org".into(),
                }]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.social_links.len(), 1);
    assert_eq!(updated.social_links[0].platform, "website");

    let listed = services
        .staff
        .queries
        .list_public(
            &ListParams::default(),
            &DivisionFilter {
                division_id: Some(division.id),
            },
        )
        .await
        .unwrap();
    assert_eq!(listed.meta.total, 1);
}

#[tokio::test]
async fn invalid_social_link_is_reported_by_index() {
    let services = build_services();
    let mut command = staff_member("Sari", 1);
    command.social_links[1].url = "not a url".into();

    let err = services
        .staff
        .commands
        .create(&admin(), command)
        .await
        .expect_err("bad url");
    let fields = err.field_errors().expect("field errors");
    assert!(
        fields.iter().any(|(field, _)| field.starts_with("social_links.1")),
        "{fields:?}"
    );
}
