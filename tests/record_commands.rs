use profil_cms::application::commands::{
    articles::{SetPublishStateCommand, UpdateArticleCommand},
    categories::UpdateCategoryCommand,
    divisions::{CreateDivisionCommand, CreateSubDivisionCommand},
    staff::UpdateStaffCommand,
};
use profil_cms::application::error::ApplicationError;
use profil_cms::domain::listing::{ListParams, Trashed};
use profil_cms::domain::{article::ArticleFilter, record::NoFilter};

mod support;

use support::{
    ArticleBuilder, admin, build_services, category, editor, staff_member, stranger, tag,
};

fn field_error(err: &ApplicationError, field: &str) -> String {
    err.field_errors()
        .and_then(|fields| fields.get(field))
        .unwrap_or_else(|| panic!("expected a field error on {field}, got {err:?}"))
        .to_string()
}

#[tokio::test]
async fn slug_is_derived_then_rederived_on_rename() {
    let services = build_services();
    let commands = &services.categories.commands;

    let created = commands.create(&admin(), category("Robot Beroda")).await.unwrap();
    assert_eq!(created.slug, "robot-beroda");

    let renamed = commands
        .update(
            &admin(),
            created.id,
            UpdateCategoryCommand {
                name: Some("Robot Beroda 2".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.slug, "robot-beroda-2");

    let explicit = commands
        .update(
            &admin(),
            created.id,
            UpdateCategoryCommand {
                name: Some("Robot Terbang".into()),
                slug: Some("custom-slug".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(explicit.name, "Robot Terbang");
    assert_eq!(explicit.slug, "custom-slug");
}

#[tokio::test]
async fn duplicate_slug_is_a_field_error() {
    let services = build_services();
    let commands = &services.categories.commands;

    commands.create(&admin(), category("Berita")).await.unwrap();
    let err = commands
        .create(&admin(), category("Berita"))
        .await
        .expect_err("second create must fail");
    assert_eq!(field_error(&err, "slug"), "has already been taken");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_creates_with_the_same_name_yield_one_record() {
    let services = build_services();
    let commands = &services.tags.commands;
    let actor = admin();

    let (first, second) = tokio::join!(
        commands.create(&actor, tag("Lomba")),
        commands.create(&actor, tag("Lomba")),
    );
    assert_eq!(
        [first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(),
        1
    );
    let err = first.err().or(second.err()).unwrap();
    assert!(err.field_errors().unwrap().contains("slug"));
}

#[tokio::test]
async fn invalid_article_reports_every_field() {
    let services = build_services();
    let mut command = ArticleBuilder::new(1).title("   ").build();
    command.body = String::new();
    command.category_id = None;

    let err = services
        .articles
        .commands
        .create(&admin(), command)
        .await
        .expect_err("invalid article");
    let fields = err.field_errors().expect("field errors");
    assert!(fields.contains("title"));
    assert!(fields.contains("body"));
    assert!(fields.contains("category_id"));
}

#[tokio::test]
async fn permission_check_runs_before_validation() {
    let services = build_services();
    let err = services
        .categories
        .commands
        .create(&stranger(), category(""))
        .await
        .expect_err("stranger may not create");
    assert!(matches!(err, ApplicationError::Forbidden(_)), "{err:?}");
}

#[tokio::test]
async fn soft_delete_hides_and_restore_brings_back() {
    let services = build_services();
    let cats = &services.categories;
    let created = cats.commands.create(&admin(), category("Sosial")).await.unwrap();

    cats.commands.delete(&admin(), created.id).await.unwrap();
    // second delete is a no-op
    cats.commands.delete(&admin(), created.id).await.unwrap();

    let live = cats
        .queries
        .list(&admin(), &ListParams::default(), &NoFilter::default())
        .await
        .unwrap();
    assert_eq!(live.meta.total, 0);

    let err = cats
        .queries
        .get(&admin(), created.id, Trashed::Without)
        .await
        .expect_err("trashed record is hidden");
    assert!(matches!(err, ApplicationError::NotFound(_)));

    let trashed = cats
        .queries
        .get(&admin(), created.id, Trashed::With)
        .await
        .unwrap();
    assert!(trashed.deleted_at.is_some());

    let restored = cats.commands.restore(&admin(), created.id).await.unwrap();
    assert!(restored.deleted_at.is_none());
    assert_eq!(restored.slug, "sosial");
}

#[tokio::test]
async fn restore_fails_when_slug_was_reused() {
    let services = build_services();
    let commands = &services.categories.commands;

    let old = commands.create(&admin(), category("Kegiatan")).await.unwrap();
    commands.delete(&admin(), old.id).await.unwrap();
    commands.create(&admin(), category("Kegiatan")).await.unwrap();

    let err = commands
        .restore(&admin(), old.id)
        .await
        .expect_err("slug now belongs to another record");
    assert!(err.field_errors().unwrap().contains("slug"));
}

#[tokio::test]
async fn force_delete_only_applies_to_trashed_records() {
    let services = build_services();
    let commands = &services.tags.commands;
    let created = commands.create(&admin(), tag("Arsip")).await.unwrap();

    let err = commands
        .force_delete(&admin(), created.id)
        .await
        .expect_err("live record cannot be purged");
    assert!(matches!(err, ApplicationError::NotFound(_)));

    commands.delete(&admin(), created.id).await.unwrap();
    commands.force_delete(&admin(), created.id).await.unwrap();

    let err = services
        .tags
        .queries
        .get(&admin(), created.id, Trashed::With)
        .await
        .expect_err("purged");
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn article_tags_are_replaced_as_a_set() {
    let services = build_services();
    let cat = services
        .categories
        .commands
        .create(&admin(), category("Berita"))
        .await
        .unwrap();
    let t1 = services.tags.commands.create(&admin(), tag("Satu")).await.unwrap();
    let t2 = services.tags.commands.create(&admin(), tag("Dua")).await.unwrap();

    let article = services
        .articles
        .commands
        .create(&admin(), ArticleBuilder::new(cat.id).tags(&[t1.id]).build())
        .await
        .unwrap();
    assert_eq!(article.tag_ids, vec![t1.id]);
    assert_eq!(article.author_id, 1);

    let replaced = services
        .articles
        .commands
        .update(
            &admin(),
            article.id,
            UpdateArticleCommand {
                tag_ids: Some(vec![t2.id]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(replaced.tag_ids, vec![t2.id]);

    let untouched = services
        .articles
        .commands
        .update(
            &admin(),
            article.id,
            UpdateArticleCommand {
                title: Some("Judul Baru".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(untouched.tag_ids, vec![t2.id]);

    let cleared = services
        .articles
        .commands
        .update(
            &admin(),
            article.id,
            UpdateArticleCommand {
                tag_ids: Some(Vec::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(cleared.tag_ids.is_empty());
}

#[tokio::test]
async fn publishing_requires_the_publish_permission() {
    let services = build_services();
    let cat = services
        .categories
        .commands
        .create(&admin(), category("Berita"))
        .await
        .unwrap();

    let err = services
        .articles
        .commands
        .create(&editor(), ArticleBuilder::new(cat.id).published().build())
        .await
        .expect_err("editor cannot publish");
    assert!(matches!(err, ApplicationError::Forbidden(_)));

    let draft = services
        .articles
        .commands
        .create(&editor(), ArticleBuilder::new(cat.id).build())
        .await
        .unwrap();
    assert!(!draft.published);
    assert!(draft.published_at.is_none());

    let err = services
        .articles
        .commands
        .set_publish_state(&editor(), draft.id, SetPublishStateCommand { publish: true })
        .await
        .expect_err("editor cannot publish");
    assert!(matches!(err, ApplicationError::Forbidden(_)));

    let published = services
        .articles
        .commands
        .set_publish_state(&admin(), draft.id, SetPublishStateCommand { publish: true })
        .await
        .unwrap();
    assert!(published.published);
    let stamp = published.published_at.expect("published_at set");

    let again = services
        .articles
        .commands
        .set_publish_state(&admin(), draft.id, SetPublishStateCommand { publish: true })
        .await
        .unwrap();
    assert_eq!(again.published_at, Some(stamp));

    let unpublished = services
        .articles
        .commands
        .set_publish_state(&admin(), draft.id, SetPublishStateCommand { publish: false })
        .await
        .unwrap();
    assert!(!unpublished.published);
    assert!(unpublished.published_at.is_none());
}

#[tokio::test]
async fn admin_article_list_filters_by_state() {
    let services = build_services();
    let cat = services
        .categories
        .commands
        .create(&admin(), category("Berita"))
        .await
        .unwrap();
    for (title, publish) in [("Satu", true), ("Dua", false), ("Tiga", true)] {
        let mut builder = ArticleBuilder::new(cat.id).title(title);
        if publish {
            builder = builder.published();
        }
        services
            .articles
            .commands
            .create(&admin(), builder.build())
            .await
            .unwrap();
    }

    let drafts = services
        .articles
        .queries
        .list(
            &admin(),
            &ListParams::default(),
            &ArticleFilter {
                published: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(drafts.meta.total, 1);
    assert_eq!(drafts.items[0].title, "Dua");
}

#[tokio::test]
async fn out_of_range_page_is_empty_with_meta() {
    let services = build_services();
    for name in ["A", "B", "C"] {
        services.tags.commands.create(&admin(), tag(name)).await.unwrap();
    }

    let params = ListParams {
        page: Some("999".into()),
        per_page: Some("2".into()),
        ..Default::default()
    };
    let page = services
        .tags
        .queries
        .list(&admin(), &params, &NoFilter::default())
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.meta.current_page, 999);
    assert_eq!(page.meta.last_page, 2);
    assert_eq!(page.meta.total, 3);
    assert_eq!(page.meta.from, None);
}

#[tokio::test]
async fn listing_trashed_records_requires_restore_permission() {
    let services = build_services();
    let params = ListParams {
        trashed: Some("only".into()),
        ..Default::default()
    };
    let err = services
        .categories
        .queries
        .list(&editor(), &params, &NoFilter::default())
        .await
        .expect_err("editor lacks restore kategori");
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}

#[tokio::test]
async fn staff_sub_division_must_sit_under_their_division() {
    let services = build_services();
    let mut divisions = Vec::new();
    for name in ["Riset", "Humas"] {
        let division = services
            .divisions
            .commands
            .create(
                &admin(),
                CreateDivisionCommand {
                    name: name.into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        divisions.push(division.id);
    }
    let (research, outreach) = (divisions[0], divisions[1]);
    let media = services
        .sub_divisions
        .commands
        .create(
            &admin(),
            CreateSubDivisionCommand {
                division_id: Some(outreach),
                name: "Media".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let mut command = staff_member("Budi", research);
    command.sub_division_id = Some(media.id);
    let err = services
        .staff
        .commands
        .create(&admin(), command)
        .await
        .expect_err("sub-division of another division");
    assert_eq!(
        field_error(&err, "sub_division_id"),
        "does not belong to the selected division"
    );

    let mut command = staff_member("Budi", outreach);
    command.sub_division_id = Some(media.id);
    let member = services.staff.commands.create(&admin(), command).await.unwrap();

    let err = services
        .staff
        .commands
        .update(
            &admin(),
            member.id,
            UpdateStaffCommand {
                division_id: Some(research),
                ..Default::default()
            },
        )
        .await
        .expect_err("division moved away from the sub-division");
    assert!(err.field_errors().unwrap().contains("sub_division_id"));

    let moved = services
        .staff
        .commands
        .update(
            &admin(),
            member.id,
            UpdateStaffCommand {
                division_id: Some(research),
                sub_division_id: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.division_id, research);
    assert_eq!(moved.sub_division_id, None);
}
