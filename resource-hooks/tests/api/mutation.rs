use payloads::{
    Attribute, ClientError, ListParams, Project, StatusCode,
    requests::{AttributeForm, ProjectForm},
};
use resource_hooks::{FetchOptions, MutationOptions, Notification};
use serde_json::json;
use std::{cell::Cell, rc::Rc};
use test_helpers::spawn_app;

use crate::hooks;

fn speed() -> AttributeForm {
    AttributeForm {
        name: "Speed".into(),
        value: "Fast".into(),
        description: "x".into(),
    }
}

#[tokio::test]
async fn create_then_list_round_trip() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let (attributes, notifier) = hooks::<Attribute>(&app);

    let create = attributes.create(MutationOptions::default());
    let created = create.mutate(speed()).await?;
    assert_eq!(created.data.name, "Speed");
    assert_eq!(
        notifier.notifications(),
        [Notification::Success("Attribute created successfully".into())]
    );

    let list = attributes.list(ListParams::default(), FetchOptions::default());
    list.mount().await?;
    let listed = list.data().into_option().map(|r| r.data).unwrap_or_default();
    assert_eq!(listed, vec![created.data]);
    Ok(())
}

#[tokio::test]
async fn field_errors_from_the_server_become_one_toast_each() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let (attributes, notifier) = hooks::<Attribute>(&app);
    app.fail_next(
        422,
        json!({
            "message": "The name field is required.",
            "errors": { "name": ["Name is required"] },
        }),
    );

    let create = attributes.create(MutationOptions::default());
    let result = create.mutate(speed()).await;

    assert!(matches!(result, Err(ClientError::Validation { .. })));
    assert_eq!(create.error().and_then(|e| e.status()), Some(StatusCode::UNPROCESSABLE_ENTITY));
    assert!(!create.is_loading());
    assert_eq!(notifier.notifications(), [Notification::Error("Name is required".into())]);
    Ok(())
}

#[tokio::test]
async fn field_errors_keep_the_server_order() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let (attributes, notifier) = hooks::<Attribute>(&app);
    app.fail_next(
        422,
        json!({
            "message": "Title first (and 1 more error)",
            "errors": { "title": ["Title first"], "name": ["Name second"] },
        }),
    );

    let create = attributes.create(MutationOptions::default());
    assert!(create.mutate(speed()).await.is_err());
    assert_eq!(notifier.errors(), ["Title first", "Name second"]);
    Ok(())
}

#[tokio::test]
async fn custom_error_handler_suppresses_the_toasts() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let (attributes, notifier) = hooks::<Attribute>(&app);
    app.fail_next(
        422,
        json!({ "message": "Invalid", "errors": { "name": ["Name is required"] } }),
    );
    let handled = Rc::new(Cell::new(0));
    let counter = handled.clone();

    let create = attributes.create(
        MutationOptions::default().on_error(move |_| counter.set(counter.get() + 1)),
    );
    assert!(create.mutate(speed()).await.is_err());

    assert_eq!(handled.get(), 1);
    assert!(notifier.notifications().is_empty());
    Ok(())
}

#[tokio::test]
async fn deleting_twice_reports_not_found() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let (attributes, notifier) = hooks::<Attribute>(&app);
    let created = attributes
        .create(MutationOptions::default())
        .mutate(speed())
        .await?;
    notifier.clear();

    let delete = attributes.delete(MutationOptions::default());
    delete.mutate(created.data.id).await?;
    let again = delete.mutate(created.data.id).await;

    assert_eq!(again.err().and_then(|e| e.status()), Some(StatusCode::NOT_FOUND));
    assert!(delete.error().is_some());
    assert_eq!(
        notifier.notifications(),
        [
            Notification::Success("Attribute deleted successfully".into()),
            Notification::Error(format!(
                "No query results for model [App\\Models\\Attribute] {}",
                created.data.id
            )),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn project_update_goes_out_as_one_multipart_post() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let (projects, notifier) = hooks::<Project>(&app);
    let project = projects
        .create(MutationOptions::default())
        .mutate(ProjectForm {
            title: "Bakery storefront".into(),
            ..Default::default()
        })
        .await?
        .data;
    app.clear_requests();

    let update = projects.update(MutationOptions::default().success_message("Saved"));
    let mut form = ProjectForm::from(&project);
    form.client = "Crumb & Co".into();
    let updated = update.mutate((project.id, form)).await?;

    assert_eq!(updated.data.client.as_deref(), Some("Crumb & Co"));
    let requests = app.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].content_type.as_deref(), Some("multipart/form-data"));
    assert_eq!(notifier.successes().last().map(String::as_str), Some("Saved"));
    Ok(())
}
