use payloads::{Attribute, ListParams, RequestOptions, StatusCode, requests::AttributeForm};
use resource_hooks::{FetchOptions, FetchState};
use std::{cell::Cell, rc::Rc};
use test_helpers::spawn_app;

use crate::hooks;

#[tokio::test]
async fn list_fetches_on_mount_and_on_param_changes() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let (attributes, notifier) = hooks::<Attribute>(&app);
    app.clear_requests();

    let list = attributes.list(ListParams::default(), FetchOptions::default());
    assert_eq!(list.data(), FetchState::NotFetched);
    assert!(app.requests().is_empty());

    list.mount().await?;
    let gets = |app: &test_helpers::TestApp| {
        app.requests()
            .into_iter()
            .filter(|r| r.method == "GET" && r.path == "/api/attributes")
            .count()
    };
    assert_eq!(gets(&app), 1);
    assert!(list.data().as_ref().is_some_and(|r| r.data.is_empty()));

    list.update_deps(ListParams::default()).await?;
    assert_eq!(gets(&app), 1);

    list.update_deps(ListParams::default().with("page", "2")).await?;
    assert_eq!(gets(&app), 2);
    assert_eq!(app.requests().last().map(|r| r.query.clone()), Some("page=2".into()));
    assert!(notifier.notifications().is_empty());
    Ok(())
}

#[tokio::test]
async fn refetch_sees_new_records() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let (attributes, _) = hooks::<Attribute>(&app);

    let list = attributes.list(ListParams::default(), FetchOptions::default());
    list.mount().await?;

    app.client
        .service::<Attribute>()
        .create(
            &AttributeForm {
                name: "Speed".into(),
                value: "Fast".into(),
                description: "x".into(),
            },
            &RequestOptions::default(),
        )
        .await?;
    list.refetch().await?;

    let names: Vec<_> = list
        .data()
        .into_option()
        .map(|r| r.data.into_iter().map(|a| a.name).collect())
        .unwrap_or_default();
    assert_eq!(names, ["Speed"]);
    Ok(())
}

#[tokio::test]
async fn unauthenticated_fetch_notifies_and_keeps_the_error() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (attributes, notifier) = hooks::<Attribute>(&app);

    let list = attributes.list(ListParams::default(), FetchOptions::default());
    let result = list.mount().await;

    assert!(result.is_err_and(|e| e.is_unauthorized()));
    assert!(list.error().is_some_and(|e| e.is_unauthorized()));
    assert!(!list.is_loading());
    assert_eq!(list.data(), FetchState::NotFetched);
    assert_eq!(notifier.errors(), ["Unauthenticated."]);
    Ok(())
}

#[tokio::test]
async fn custom_fetch_error_handler_replaces_the_toast() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (attributes, notifier) = hooks::<Attribute>(&app);
    let handled = Rc::new(Cell::new(0));
    let counter = handled.clone();

    let list = attributes.list(
        ListParams::default(),
        FetchOptions::default().on_error(move |_| counter.set(counter.get() + 1)),
    );
    assert!(list.mount().await.is_err());

    assert_eq!(handled.get(), 1);
    assert!(notifier.notifications().is_empty());
    Ok(())
}

#[tokio::test]
async fn failed_refetch_hands_back_the_error_and_keeps_the_data() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let (attributes, notifier) = hooks::<Attribute>(&app);

    let list = attributes.list(ListParams::default(), FetchOptions::default());
    list.mount().await?;
    app.fail_next(500, serde_json::json!({ "message": "Server Error" }));

    let error = list.refetch().await.expect_err("refetch should fail");
    assert_eq!(error.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert!(list.data().as_ref().is_some());
    assert_eq!(notifier.errors(), ["Server Error"]);
    Ok(())
}
