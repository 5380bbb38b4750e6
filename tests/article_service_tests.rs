use chrono::Utc;
use std::sync::Arc;
use wayfarer_core::application::commands::articles::{
    ArticleCommandService, CreateArticleCommand, DestinationInput, FaqInput,
    SetPublishStateCommand, UpdateArticleCommand,
};
use wayfarer_core::application::error::ApplicationError;
use wayfarer_core::application::ports::util::SlugGenerator;
use wayfarer_core::application::queries::articles::{
    ArticleQueryService, GetArticleBySlugQuery, ListArticlesQuery,
};

mod support;
use support::{FixedClock, MockArticleRepo, admin_actor, editor_actor};

struct Slugger;

impl SlugGenerator for Slugger {
    fn slugify(&self, input: &str) -> String {
        input
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }
}

struct Harness {
    commands: ArticleCommandService,
    queries: ArticleQueryService,
}

fn harness() -> Harness {
    let repo = Arc::new(MockArticleRepo::default());
    let clock = Arc::new(FixedClock::at(Utc::now()));

    Harness {
        commands: ArticleCommandService::new(
            Arc::clone(&repo) as _,
            Arc::clone(&repo) as _,
            clock as _,
            Arc::new(Slugger) as _,
        ),
        queries: ArticleQueryService::new(repo as _),
    }
}

fn create_command(title: &str) -> CreateArticleCommand {
    CreateArticleCommand {
        title: title.into(),
        summary: Some("Two days on the coast".into()),
        body: "Take the early train out of the city.".into(),
        destinations: vec![DestinationInput {
            name: "Cinque Terre".into(),
            country: "Italy".into(),
            description: Some("Five villages, one trail".into()),
        }],
        faqs: vec![FaqInput {
            question: "When to go?".into(),
            answer: "Late spring, before the crowds.".into(),
        }],
        seo: None,
        publish: false,
    }
}

#[tokio::test]
async fn slugs_are_unique_per_title() {
    let h = harness();
    let actor = admin_actor(1);

    let first = h
        .commands
        .create_article(&actor, create_command("Hidden Coves"))
        .await
        .unwrap();
    let second = h
        .commands
        .create_article(&actor, create_command("Hidden Coves"))
        .await
        .unwrap();

    assert_eq!(first.slug, "hidden-coves");
    assert_eq!(second.slug, "hidden-coves-2");
    assert_eq!(first.destinations.len(), 1);
    assert_eq!(first.faqs.len(), 1);
}

#[tokio::test]
async fn empty_destination_fields_are_rejected() {
    let h = harness();
    let mut command = create_command("Broken");
    command.destinations.push(DestinationInput {
        name: "".into(),
        country: "Nowhere".into(),
        description: None,
    });

    let err = h
        .commands
        .create_article(&admin_actor(1), command)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Validation(_)));
}

#[tokio::test]
async fn drafts_are_invisible_to_anonymous_readers() {
    let h = harness();
    let actor = admin_actor(1);

    let draft = h
        .commands
        .create_article(&actor, create_command("Quiet Draft"))
        .await
        .unwrap();

    let err = h
        .queries
        .get_article_by_slug(
            None,
            GetArticleBySlugQuery {
                slug: draft.slug.clone(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));

    let anonymous_page = h
        .queries
        .list_articles(
            None,
            ListArticlesQuery {
                include_drafts: false,
                limit: 10,
                cursor: None,
            },
        )
        .await
        .unwrap();
    assert!(anonymous_page.items.is_empty());

    // The author sees it once drafts are requested.
    let editor_page = h
        .queries
        .list_articles(
            Some(&actor),
            ListArticlesQuery {
                include_drafts: true,
                limit: 10,
                cursor: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(editor_page.items.len(), 1);
}

#[tokio::test]
async fn publishing_makes_the_article_public() {
    let h = harness();
    let actor = admin_actor(1);

    let draft = h
        .commands
        .create_article(&actor, create_command("Coastal Walks"))
        .await
        .unwrap();
    h.commands
        .set_publish_state(
            &actor,
            SetPublishStateCommand {
                id: draft.id,
                publish: true,
            },
        )
        .await
        .unwrap();

    let public = h
        .queries
        .get_article_by_slug(
            None,
            GetArticleBySlugQuery {
                slug: draft.slug.clone(),
            },
        )
        .await
        .unwrap();
    assert!(public.published);
    assert!(public.published_at.is_some());
}

#[tokio::test]
async fn editors_cannot_update_someone_elses_article() {
    let h = harness();
    let author = admin_actor(1);
    let other = editor_actor(2);

    let article = h
        .commands
        .create_article(&author, create_command("Not Yours"))
        .await
        .unwrap();

    let err = h
        .commands
        .update_article(
            &other,
            UpdateArticleCommand {
                id: article.id,
                title: Some("Mine Now".into()),
                summary: None,
                body: None,
                destinations: None,
                faqs: None,
                seo: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}

#[tokio::test]
async fn update_can_clear_the_summary() {
    let h = harness();
    let actor = admin_actor(1);

    let article = h
        .commands
        .create_article(&actor, create_command("Summaries"))
        .await
        .unwrap();
    assert!(article.summary.is_some());

    let updated = h
        .commands
        .update_article(
            &actor,
            UpdateArticleCommand {
                id: article.id,
                title: None,
                summary: Some(None),
                body: None,
                destinations: None,
                faqs: None,
                seo: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.summary, None);
}
