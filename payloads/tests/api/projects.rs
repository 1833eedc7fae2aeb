use payloads::{
    ListParams, Project, RequestOptions,
    requests::{ImageUpload, ProjectForm},
};
use test_helpers::spawn_app;

fn storefront() -> ProjectForm {
    ProjectForm {
        title: "Bakery storefront".into(),
        description: "Online ordering".into(),
        client: "Crumb & Co".into(),
        image: Some(ImageUpload {
            file_name: "front.png".into(),
            mime_type: "image/png".into(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }),
        ..Default::default()
    }
}

#[tokio::test]
async fn projects_are_sent_as_multipart() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    app.clear_requests();

    let created = app
        .client
        .service::<Project>()
        .create(&storefront(), &RequestOptions::default())
        .await?;

    assert_eq!(created.message.as_deref(), Some("Project created successfully"));
    assert_eq!(created.data.title, "Bakery storefront");
    assert_eq!(created.data.client.as_deref(), Some("Crumb & Co"));
    let image = created.data.image.expect("uploaded image url");
    assert!(image.ends_with("-front.png"), "{image}");
    // empty text fields are not sent
    assert_eq!(created.data.category, None);

    let requests = app.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/projects");
    assert_eq!(
        requests[0].content_type.as_deref(),
        Some("multipart/form-data")
    );
    Ok(())
}

#[tokio::test]
async fn project_updates_post_to_the_record() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_admin().await?;
    let projects = app.client.service::<Project>();
    let options = RequestOptions::default();

    let project = projects.create(&storefront(), &options).await?.data;
    app.clear_requests();

    let mut form = ProjectForm::from(&project);
    form.duration = "3 weeks".into();
    let updated = projects.update(project.id, &form, &options).await?;

    assert_eq!(updated.message.as_deref(), Some("Project updated successfully"));
    assert_eq!(updated.data.duration.as_deref(), Some("3 weeks"));
    // no new image was chosen, so the stored one is kept
    assert_eq!(updated.data.image, project.image);

    let requests = app.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, format!("/api/projects/{}", project.id));
    assert_eq!(
        requests[0].content_type.as_deref(),
        Some("multipart/form-data")
    );

    let listed = projects.get_all(&ListParams::default()).await?;
    assert_eq!(listed.data, vec![updated.data]);
    Ok(())
}
