use payloads::{
    Attribute, Benefit, Booking, ClientError, EntityId, Faq, Future, ListParams,
    Project, RequestOptions, Service, Step, User,
    requests::{AttributeForm, FaqForm, StepForm},
};
use reqwest::StatusCode;
use serde_json::json;
use test_helpers::{assert_status_code, spawn_app};

fn speed() -> AttributeForm {
    AttributeForm {
        name: "Speed".into(),
        value: "Fast".into(),
        description: "x".into(),
    }
}

#[tokio::test]
async fn created_record_shows_up_in_the_list() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let attributes = app.client.service::<Attribute>();

    let created = attributes.create(&speed(), &RequestOptions::default()).await?;
    assert_eq!(created.message.as_deref(), Some("Attribute created successfully"));
    assert_eq!(created.data.name, "Speed");
    assert_eq!(created.data.value.as_deref(), Some("Fast"));

    let list = attributes.get_all(&ListParams::default()).await?;
    assert_eq!(list.data, vec![created.data.clone()]);

    let fetched = attributes.get_by_id(created.data.id).await?;
    assert_eq!(fetched.data, created.data);
    Ok(())
}

#[tokio::test]
async fn get_all_issues_one_get_per_resource() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    app.clear_requests();

    let client = &app.client;
    let params = ListParams::default();
    client.service::<Attribute>().get_all(&params).await?;
    client.service::<Benefit>().get_all(&params).await?;
    client.service::<Booking>().get_all(&params).await?;
    client.service::<Faq>().get_all(&params).await?;
    client.service::<Future>().get_all(&params).await?;
    client.service::<Project>().get_all(&params).await?;
    client.service::<Service>().get_all(&params).await?;
    client.service::<Step>().get_all(&params).await?;
    client.service::<User>().get_all(&params).await?;

    let paths: Vec<_> = app
        .requests()
        .into_iter()
        .map(|request| {
            assert_eq!(request.method, "GET");
            request.path
        })
        .collect();
    assert_eq!(
        paths,
        [
            "/api/attributes",
            "/api/benefits",
            "/api/books",
            "/api/faqs",
            "/api/futures",
            "/api/projects",
            "/api/services",
            "/api/steps",
            "/api/users",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn list_params_become_the_query_string() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    app.clear_requests();

    let params = ListParams::default().with("page", "2").with("category", "General");
    app.client.service::<Faq>().get_all(&params).await?;

    let requests = app.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query, "category=General&page=2");
    Ok(())
}

#[tokio::test]
async fn json_updates_use_put() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let steps = app.client.service::<Step>();
    let options = RequestOptions::default();

    let step = steps
        .create(
            &StepForm {
                title: "Discovery".into(),
                order: Some(1),
                ..Default::default()
            },
            &options,
        )
        .await?
        .data;
    app.clear_requests();

    let mut form = StepForm::from(&step);
    form.order = Some(2);
    let updated = steps.update(step.id, &form, &options).await?;

    assert_eq!(updated.message.as_deref(), Some("Step updated successfully"));
    assert_eq!(updated.data.order, Some(2));
    assert_eq!(updated.data.title, "Discovery");

    let requests = app.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].path, format!("/api/steps/{}", step.id));
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
    Ok(())
}

#[tokio::test]
async fn deleting_twice_is_not_found() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let faqs = app.client.service::<Faq>();

    let faq = faqs
        .create(
            &FaqForm {
                question: "Do you host?".into(),
                answer: "Yes.".into(),
                category: String::new(),
            },
            &RequestOptions::default(),
        )
        .await?
        .data;

    let deleted = faqs.delete(faq.id).await?;
    assert_eq!(deleted.message.as_deref(), Some("FAQ deleted successfully"));

    let again = faqs.delete(faq.id).await;
    assert_eq!(
        again.as_ref().err().and_then(ClientError::server_message),
        Some(format!("No query results for model [App\\Models\\FAQ] {}", faq.id).as_str())
    );
    assert_status_code(again, StatusCode::NOT_FOUND);
    assert_status_code(faqs.get_by_id(faq.id).await, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn missing_required_fields_never_reach_the_server() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    app.clear_requests();

    let result = app
        .client
        .service::<Attribute>()
        .create(&AttributeForm::default(), &RequestOptions::default())
        .await;

    match result {
        Err(ClientError::Form(e)) => {
            assert_eq!(e.messages().collect::<Vec<_>>(), ["The name field is required."]);
        }
        other => panic!("Expected a form error, got {other:?}"),
    }
    assert!(app.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn server_errors_keep_status_and_message() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    app.fail_next(
        500,
        json!({ "message": "Server Error", "error": "SQLSTATE[HY000]" }),
    );

    let result = app.client.service::<Benefit>().get_all(&ListParams::default()).await;
    match &result {
        Err(ClientError::APIError { status, message }) => {
            assert_eq!(*status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message.as_deref(), Some("Server Error"));
        }
        other => panic!("Expected an API error, got {other:?}"),
    }

    // only the next request fails
    app.client.service::<Benefit>().get_all(&ListParams::default()).await?;
    Ok(())
}

#[tokio::test]
async fn unknown_ids_are_not_found() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;

    let result = app
        .client
        .service::<Attribute>()
        .update(EntityId(999), &speed(), &RequestOptions::default())
        .await;
    assert_status_code(result, StatusCode::NOT_FOUND);
    Ok(())
}
