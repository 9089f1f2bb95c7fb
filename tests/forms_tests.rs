mod common;

use common::{admin_for, data, project_json, property_json, user_json};
use estate_admin::catalog::{ProjectFeature, PropertyStatus};
use estate_admin::forms::{BrokerForm, PasswordReset, ProjectForm, PropertyForm, ResetStep};
use estate_admin::notice::{NoticeKind, NoticeLog};
use estate_admin::storage::ImageFile;
use estate_admin::Error;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn png(name: &str) -> ImageFile {
    ImageFile::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
}

fn complete_broker() -> BrokerForm {
    BrokerForm {
        first_name: "Omar".into(),
        last_name: "Said".into(),
        dob: "1990-04-12".into(),
        title: "Senior broker".into(),
        country: "Egypt".into(),
        address: "12 Nile St".into(),
        postal_code: "11511".into(),
        email: "omar@example.com".into(),
        phone: "01012345678".into(),
        broker_id: "BR-77".into(),
        agency: "Nile Homes".into(),
        previous_agency: "Cairo Estates".into(),
        agent_license: "LIC-1".into(),
        tax_number: "TX-9".into(),
        password: "s3cret!".into(),
        confirm_password: "s3cret!".into(),
        avatar: Some(png("avatar.png")),
    }
}

#[tokio::test]
async fn test_incomplete_forms_never_reach_the_network() {
    let mock_server = MockServer::start().await;
    let admin = admin_for(&mock_server);
    let notices = NoticeLog::new();

    let mut broker = complete_broker();
    broker.first_name = "  ".into();
    broker.agency.clear();
    broker.avatar = None;
    let result = broker.submit(admin.auth(), &admin.storage(), &notices).await;
    assert!(matches!(result, Err(Error::Validation(_))));

    let project = ProjectForm::blank();
    let result = project
        .submit(&admin.projects(), &admin.storage(), &notices)
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));

    let property = PropertyForm::for_project("p1");
    let result = property
        .submit(&admin.properties(), &admin.storage(), &notices)
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));

    assert!(mock_server.received_requests().await.unwrap().is_empty());

    let shown = notices.take();
    assert_eq!(shown.len(), 3);
    assert!(shown
        .iter()
        .all(|n| n.kind == NoticeKind::Error && n.title == "Incomplete information"));
    assert!(shown[0].text.contains("First name"));
    assert!(shown[0].text.contains("Agency"));
    assert!(shown[0].text.contains("Photo"));
    assert!(shown[1].text.contains("Name"));
}

#[tokio::test]
async fn test_broker_format_checks() {
    let mock_server = MockServer::start().await;
    let admin = admin_for(&mock_server);
    let notices = NoticeLog::new();

    let mut broker = complete_broker();
    broker.email = "omar-at-example".into();
    broker.phone = "+20 101".into();
    broker.confirm_password = "different".into();

    let err = broker
        .submit(admin.auth(), &admin.storage(), &notices)
        .await
        .unwrap_err();
    match err {
        Error::Validation(failure) => {
            assert!(failure.missing.is_empty());
            assert!(failure
                .invalid
                .contains(&"Please enter a valid email address".to_string()));
            assert!(failure
                .invalid
                .contains(&"Phone number must contain digits only".to_string()));
            assert!(failure.invalid.contains(&"Passwords do not match".to_string()));
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_broker_upload_precedes_signup() {
    let mock_server = MockServer::start().await;
    let avatar_url = "https://cdn.example.com/users/avatar.png";

    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(data(json!({ "urls": [avatar_url] }))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut created = user_json("b9", "broker");
    created["image"] = json!(avatar_url);
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .and(body_partial_json(json!({
            "email": "omar@example.com",
            "role": "broker",
            "image": avatar_url,
            "brokerId": "BR-77"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(data(json!({ "user": created }))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let admin = admin_for(&mock_server);
    let notices = NoticeLog::new();
    let user = complete_broker()
        .submit(admin.auth(), &admin.storage(), &notices)
        .await
        .unwrap();
    assert_eq!(user.image.as_deref(), Some(avatar_url));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url.path(), "/api/upload");
    assert_eq!(requests[1].url.path(), "/api/auth/signup");

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"type\""));
    assert!(body.contains("name=\"files\""));
    assert_eq!(body.matches("name=\"files\"").count(), 1);

    let shown = notices.take();
    assert_eq!(shown[0].kind, NoticeKind::Success);
}

#[tokio::test]
async fn test_edit_project_is_prefilled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/projects/p1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(data(project_json("p1", "Palm Hills"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let admin = admin_for(&mock_server);
    let form = ProjectForm::load(&admin.projects(), "p1").await.unwrap();

    assert!(form.is_edit());
    assert_eq!(form.id(), Some("p1"));
    assert_eq!(form.name, "Palm Hills");
    assert_eq!(form.developer, "Emaar");
    assert_eq!(form.description, "Gated compound");
    assert_eq!(form.location, "New Cairo");
    assert!(form.has_feature(ProjectFeature::Parking));
    assert!(form.has_feature(ProjectFeature::Balcony));
    assert_eq!(form.features.len(), 2);
    assert_eq!(
        form.existing_image.as_deref(),
        Some("https://cdn.example.com/p1.jpg")
    );
    assert!(form.image.is_none());
}

#[tokio::test]
async fn test_project_update_keeps_existing_image_without_upload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/projects/p1"))
        .and(body_partial_json(json!({
            "name": "Palm Hills",
            "image": "https://cdn.example.com/p1.jpg",
            "features": ["Parking In The Area", "Elevator Lift", "Balcony"]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(data(project_json("p1", "Palm Hills"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let admin = admin_for(&mock_server);
    let project = serde_json::from_value(project_json("p1", "Palm Hills")).unwrap();
    let mut form = ProjectForm::from_project(&project);
    form.toggle_feature(ProjectFeature::Elevator);

    let notices = NoticeLog::new();
    form.submit(&admin.projects(), &admin.storage(), &notices)
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() != "/api/upload"));
}

#[tokio::test]
async fn test_failed_write_discards_uploaded_image() {
    let mock_server = MockServer::start().await;
    let image_url = "https://cdn.example.com/projects/new.png";

    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(data(json!({ "urls": [image_url] }))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/projects"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Project name already taken"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/upload"))
        .and(body_json(json!({ "urls": [image_url] })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let admin = admin_for(&mock_server);
    let mut form = ProjectForm::blank();
    form.name = "Palm Hills".into();
    form.developer = "Emaar".into();
    form.description = "Gated compound".into();
    form.location = "New Cairo".into();
    form.image = Some(png("new.png"));

    let notices = NoticeLog::new();
    let err = form
        .submit(&admin.projects(), &admin.storage(), &notices)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Api { status: 500, .. }));

    let shown = notices.take();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].title, "Error");
    assert_eq!(shown[0].text, "Project name already taken");

    let requests = mock_server.received_requests().await.unwrap();
    let order: Vec<_> = requests
        .iter()
        .map(|r| format!("{} {}", r.method, r.url.path()))
        .collect();
    assert_eq!(
        order,
        vec!["POST /api/upload", "POST /api/projects", "DELETE /api/upload"]
    );
}

#[tokio::test]
async fn test_property_edit_appends_new_images() {
    let mock_server = MockServer::start().await;
    let new_url = "https://cdn.example.com/properties/d.png";

    Mock::given(method("GET"))
        .and(path("/api/projects/property/pr1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(property_json("pr1", "Chalet 4"))))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!({ "urls": [new_url] }))))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/projects/property/pr1"))
        .and(body_partial_json(json!({
            "type": "chalet",
            "status": "sold",
            "bedrooms": 3,
            "images": ["https://cdn.example.com/c.jpg", new_url]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(property_json("pr1", "Chalet 4"))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let admin = admin_for(&mock_server);
    let notices = NoticeLog::new();
    let mut form = PropertyForm::load(&admin.properties(), "pr1").await.unwrap();
    assert_eq!(form.project_id(), Some("p1"));
    assert_eq!(form.bedrooms, "2");

    form.status = PropertyStatus::Sold;
    form.bedrooms = "3".into();
    form.set_images(vec![png("d.png")], &notices).unwrap();
    assert!(form.previews()[0].starts_with("data:image/png;base64,"));

    form.submit(&admin.properties(), &admin.storage(), &notices)
        .await
        .unwrap();
    assert_eq!(notices.take().last().map(|n| n.kind), Some(NoticeKind::Success));
}

#[tokio::test]
async fn test_new_property_is_added_to_its_project() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!({
            "urls": ["https://cdn.example.com/1.png", "https://cdn.example.com/2.png"]
        }))))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/projects/p1/property"))
        .and(body_partial_json(json!({
            "status": "available",
            "areaRange": "150_to_200",
            "priceRange": "2_to_3_million"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(data(property_json("pr2", "Duplex 1"))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let admin = admin_for(&mock_server);
    let notices = NoticeLog::new();
    let mut form = PropertyForm::for_project("p1");
    form.title = "Duplex 1".into();
    form.description = "Two floors".into();
    form.property_type = Some(estate_admin::catalog::PropertyType::Duplex);
    form.area_range = Some(estate_admin::catalog::AreaRange::From150To200);
    form.price_range = Some(estate_admin::catalog::PriceRange::TwoToThreeMillion);
    form.bedrooms = "4".into();
    form.bathrooms = "2".into();
    form.set_images(vec![png("1.png"), png("2.png")], &notices).unwrap();

    let property = form
        .submit(&admin.properties(), &admin.storage(), &notices)
        .await
        .unwrap();
    assert_eq!(property.id, "pr2");
}

#[tokio::test]
async fn test_oversized_count_is_never_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(property_json("pr1", "Chalet 4"))))
        .expect(0)
        .mount(&mock_server)
        .await;

    let admin = admin_for(&mock_server);
    let notices = NoticeLog::new();
    let property = serde_json::from_value(property_json("pr1", "Chalet 4")).unwrap();
    let mut form = PropertyForm::from_property(&property);
    form.bedrooms = "99999999999".into();

    let err = form
        .submit(&admin.properties(), &admin.storage(), &notices)
        .await
        .unwrap_err();
    match err {
        Error::Validation(failure) => {
            assert_eq!(failure.invalid, vec!["Bedrooms is too large".to_string()])
        }
        other => panic!("unexpected {:?}", other),
    }
    let shown = notices.take();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].title, "Incomplete information");
}

#[tokio::test]
async fn test_password_reset_flow() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/validateUserAndSendOtp"))
        .and(body_json(json!({ "email": "admin@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "OTP sent" })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/validate-otp"))
        .and(body_json(json!({ "email": "admin@example.com", "otp": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "OTP valid" })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/reset-password-otp"))
        .and(body_json(json!({
            "email": "admin@example.com",
            "otp": "123456",
            "newPassword": "n3w-pass"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Password reset" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let admin = admin_for(&mock_server);
    let mut reset = PasswordReset::new();

    assert!(reset.verify_code(admin.auth(), "123456").await.is_err());

    reset
        .request_code(admin.auth(), " admin@example.com ")
        .await
        .unwrap();
    assert_eq!(reset.step(), ResetStep::Code);

    reset.verify_code(admin.auth(), "123456").await.unwrap();
    assert_eq!(reset.step(), ResetStep::NewPassword);

    let mismatch = reset
        .set_password(admin.auth(), "n3w-pass", "n3w-pas")
        .await
        .unwrap_err();
    assert_eq!(
        mismatch.user_message(),
        "Passwords do not match"
    );
    assert_eq!(reset.step(), ResetStep::NewPassword);

    reset
        .set_password(admin.auth(), "n3w-pass", "n3w-pass")
        .await
        .unwrap();
    assert_eq!(reset.step(), ResetStep::Done);

    assert_eq!(mock_server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_rejected_code_keeps_the_step() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/validateUserAndSendOtp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "OTP sent" })))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/validate-otp"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid OTP" })))
        .mount(&mock_server)
        .await;

    let admin = admin_for(&mock_server);
    let mut reset = PasswordReset::new();
    reset
        .request_code(admin.auth(), "admin@example.com")
        .await
        .unwrap();

    let err = reset.verify_code(admin.auth(), "000000").await.unwrap_err();
    assert_eq!(err.user_message(), "Invalid OTP");
    assert_eq!(reset.step(), ResetStep::Code);
}
