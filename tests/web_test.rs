mod helpers;

use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::*;

async fn api_with_events() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(sample_events())))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/events/evt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(sample_events()[0].clone())))
        .mount(&server)
        .await;
    server
}

fn valid_booking(seats: &str) -> Vec<(&'static str, String)> {
    vec![
        ("fullName", "Jane Doe".to_string()),
        ("email", "jane@example.com".to_string()),
        ("phone", "9876543210".to_string()),
        ("numberOfSeats", seats.to_string()),
        ("cardNumber", "4111111111111111".to_string()),
        ("cardName", "JANE DOE".to_string()),
        ("expiryDate", "1227".to_string()),
        ("cvv", "123".to_string()),
    ]
}

fn as_pairs<'a>(fields: &'a [(&'static str, String)]) -> Vec<(&'static str, &'a str)> {
    fields.iter().map(|(k, v)| (*k, v.as_str())).collect()
}

#[tokio::test]
async fn browsing_does_not_start_a_session() {
    let server = api_with_events().await;
    let state = test_state(&server.uri());
    let app = ticket_hub::app(state.clone());

    let response = get(&app, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!has_session_cookie(&response));
    let html = body_text(response).await;
    assert!(html.contains("Featured Events"));
    assert!(html.contains("Summer Music Festival 2025"));

    for _ in 0..50 {
        let response = get(&app, "/events", None).await;
        assert!(!has_session_cookie(&response));
    }
    // чужой cookie тоже не заводит сессию
    get(&app, "/events", Some("tickethub_sid=6f1c2a1e-0000-4000-8000-000000000000")).await;
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn events_list_is_filtered_by_query() {
    let server = api_with_events().await;
    let app = test_app(&server.uri());

    let html = body_text(get(&app, "/events?q=JAZZ&category=All", None).await).await;
    assert!(html.contains("Jazz Night Live"));
    assert!(!html.contains("Tech Conference 2025"));
    assert!(!html.contains("Summer Music Festival 2025"));

    let html = body_text(get(&app, "/events?category=Conference", None).await).await;
    assert!(html.contains("Tech Conference 2025"));
    assert!(!html.contains("Jazz Night Live"));
}

#[tokio::test]
async fn rejected_event_list_shows_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": false, "message": "db down" })),
        )
        .mount(&server)
        .await;
    let app = test_app(&server.uri());

    let response = get(&app, "/events", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Failed to fetch events"));
}

#[tokio::test]
async fn unreachable_api_shows_connection_error() {
    // на этом порту никто не слушает
    let app = test_app("http://127.0.0.1:9");

    let html = body_text(get(&app, "/events", None).await).await;
    assert!(html.contains("Failed to connect to server"));
}

#[tokio::test]
async fn missing_event_is_not_found() {
    let server = api_with_events().await;
    let app = test_app(&server.uri());

    let response = get(&app, "/events/nope", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Event not found"));
}

#[tokio::test]
async fn event_details_render() {
    let server = api_with_events().await;
    let app = test_app(&server.uri());

    let response = get(&app, "/events/evt-1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Hollywood Bowl"));
    assert!(html.contains("₹149.99"));
    assert!(html.contains(r#"href="/booking/evt-1""#));
}

#[tokio::test]
async fn invalid_booking_never_reaches_api() {
    let server = api_with_events().await;
    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    let app = test_app(&server.uri());

    let mut fields = valid_booking("2");
    fields[4].1 = "4111".to_string();
    fields[7].1 = "12".to_string();
    let response = post_form(&app, "/booking/evt-1", &as_pairs(&fields), None).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("Card number must be 16 digits"));
    assert!(html.contains("CVV must be 3-4 digits"));
    assert!(html.contains("border-red-500"));
}

#[tokio::test]
async fn booking_then_ticket_download() {
    let server = api_with_events().await;
    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .and(body_partial_json(json!({
            "eventId": "evt-1",
            "numberOfSeats": 3,
            "totalAmount": 449.97,
            "paymentStatus": "Completed",
            "paymentDetails": { "cardLastFour": "1111", "paymentMethod": "Credit Card" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(envelope(json!({
            "_id": "bk-42",
            "eventId": "evt-1",
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "phone": "9876543210",
            "numberOfSeats": 3,
            "pricePerSeat": 149.99,
            "totalAmount": 449.97,
            "bookingStatus": "Confirmed",
            "bookingReference": "TH-2025-0042"
        }))))
        .expect(1)
        .mount(&server)
        .await;
    let app = test_app(&server.uri());

    let fields = valid_booking("3");
    let response = post_form(&app, "/booking/evt-1", &as_pairs(&fields), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    let html = body_text(response).await;
    assert!(html.contains("Booking Confirmed!"));
    assert!(html.contains("TH-2025-0042"));
    assert!(html.contains("₹449.97"));

    let ticket = get(&app, "/booking/evt-1/ticket", Some(&cookie)).await;
    assert_eq!(ticket.status(), StatusCode::OK);
    let disposition = ticket
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("TicketHub_TH-2025-0042.txt"));
    let text = body_text(ticket).await;
    assert!(text.contains("Summer Music Festival 2025"));
    assert!(text.contains("Jane Doe"));
}

#[tokio::test]
async fn ticket_without_booking_redirects_to_form() {
    let server = api_with_events().await;
    let app = test_app(&server.uri());

    let response = get(&app, "/booking/evt-1/ticket", None).await;
    assert!(is_redirect(&response));
    assert_eq!(location(&response), "/booking/evt-1");
}

#[tokio::test]
async fn server_rejection_is_shown_on_form() {
    let server = api_with_events().await;
    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "message": "Not enough seats available" })),
        )
        .mount(&server)
        .await;
    let app = test_app(&server.uri());

    let fields = valid_booking("2");
    let response = post_form(&app, "/booking/evt-1", &as_pairs(&fields), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Booking failed: Not enough seats available"));
}

#[tokio::test]
async fn admin_pages_redirect_to_login_without_token() {
    let server = api_with_events().await;
    let app = test_app(&server.uri());

    for uri in ["/admin", "/admin/create-event", "/admin/edit-event/evt-1"] {
        let response = get(&app, uri, None).await;
        assert!(is_redirect(&response), "{} should redirect", uri);
        assert_eq!(location(&response), "/login");
    }
}

#[tokio::test]
async fn wrong_credentials_are_rejected() {
    let server = api_with_events().await;
    let app = test_app(&server.uri());

    let response = post_form(
        &app,
        "/login",
        &[("email", "admin@tickethub.com"), ("password", "nope")],
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_text(response)
        .await
        .contains("Invalid email or password. Please check your credentials."));
}

#[tokio::test]
async fn login_opens_dashboard_until_logout() {
    let server = api_with_events().await;
    let app = test_app(&server.uri());

    let response = post_form(
        &app,
        "/login",
        &[("email", "admin@tickethub.com"), ("password", "admin123")],
        None,
    )
    .await;
    assert!(is_redirect(&response));
    assert_eq!(location(&response), "/admin");
    let cookie = session_cookie(&response);

    let response = get(&app, "/admin", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Admin Dashboard"));
    // 477 + 144 + 88 бронирований, активных два события из трех
    assert!(html.contains("709"));

    let response = post_form(&app, "/logout", &[], Some(&cookie)).await;
    assert_eq!(location(&response), "/login");

    let response = get(&app, "/admin", Some(&cookie)).await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn admin_event_form_shows_field_errors() {
    let server = api_with_events().await;
    Mock::given(method("POST"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    let app = test_app(&server.uri());

    let login = post_form(
        &app,
        "/login",
        &[("email", "admin@tickethub.com"), ("password", "admin123")],
        None,
    )
    .await;
    let cookie = session_cookie(&login);

    let response = post_form(&app, "/admin/create-event", &[("title", "")], Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("border-red-500"));
}

#[tokio::test]
async fn theme_toggle_persists_in_session() {
    let server = api_with_events().await;
    let state = test_state(&server.uri());
    let app = ticket_hub::app(state.clone());

    assert!(body_text(get(&app, "/login", None).await).await.contains(r#"data-theme="light""#));

    let response = post_form(&app, "/theme", &[("back", "/events?q=jazz&category=Concert")], None).await;
    assert!(is_redirect(&response));
    assert_eq!(location(&response), "/events?q=jazz&category=Concert");
    let cookie = session_cookie(&response);
    assert_eq!(state.sessions.len(), 1);

    let html = body_text(get(&app, "/login", Some(&cookie)).await).await;
    assert!(html.contains(r#"data-theme="dark""#));

    // вторая смена темы в той же сессии, без нового cookie
    let response = post_form(&app, "/theme", &[("back", "/login")], Some(&cookie)).await;
    assert!(!has_session_cookie(&response));
    assert_eq!(state.sessions.len(), 1);
}

#[tokio::test]
async fn navbar_returns_to_filtered_list() {
    let server = api_with_events().await;
    let app = test_app(&server.uri());

    let html = body_text(get(&app, "/events?q=jazz", None).await).await;
    assert!(html.contains(r#"name="back" value="/events?q=jazz""#));
}

#[tokio::test]
async fn theme_toggle_ignores_foreign_back_path() {
    let server = api_with_events().await;
    let app = test_app(&server.uri());

    let response = post_form(&app, "/theme", &[("back", "https://evil.example/")], None).await;
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn unknown_path_redirects_home() {
    let server = api_with_events().await;
    let app = test_app(&server.uri());

    let response = get(&app, "/no/such/page", None).await;
    assert!(is_redirect(&response));
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn event_id_cannot_leave_events_endpoint() {
    let server = api_with_events().await;
    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .expect(0)
        .mount(&server)
        .await;
    let app = test_app(&server.uri());

    let response = get(&app, "/events/..%2Fbookings", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Event not found"));
}

#[tokio::test]
async fn admin_delete_cannot_leave_events_endpoint() {
    let server = api_with_events().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(0)
        .mount(&server)
        .await;
    let app = test_app(&server.uri());
    let cookie = admin_cookie(&app).await;

    let response = post_form(&app, "/admin/events/..%2Fbookings%2Fx/delete", &[], Some(&cookie)).await;
    assert!(!is_redirect(&response));
    assert!(body_text(response).await.contains("Failed to delete event"));
}

#[tokio::test]
async fn ticket_redirect_survives_odd_ids() {
    let server = api_with_events().await;
    let app = test_app(&server.uri());

    let response = get(&app, "/booking/%0A/ticket", None).await;
    assert!(is_redirect(&response));
    assert_eq!(location(&response), "/");
}

async fn admin_cookie(app: &axum::Router) -> String {
    let response = post_form(
        app,
        "/login",
        &[("email", "admin@tickethub.com"), ("password", "admin123")],
        None,
    )
    .await;
    session_cookie(&response)
}

fn event_fields<'a>(venue: &'a str, price: &'a str) -> Vec<(&'static str, &'a str)> {
    vec![
        ("title", "Summer Music Festival 2025"),
        ("description", ""),
        ("date", "2025-07-15"),
        ("hour", "6"),
        ("minute", "30"),
        ("period", "PM"),
        ("location", "Los Angeles, CA"),
        ("venue", venue),
        ("price", price),
        ("capacity", "5000"),
        ("category", "Festival"),
        ("organizer", "Live Nation"),
        ("imageUrl", ""),
    ]
}

#[tokio::test]
async fn admin_creates_event() {
    let server = api_with_events().await;
    Mock::given(method("POST"))
        .and(path("/api/events"))
        .and(body_partial_json(json!({
            "title": "Summer Music Festival 2025",
            "time": "18:30",
            "price": 149.99,
            "capacity": 5000
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(envelope(sample_events()[0].clone())))
        .expect(1)
        .mount(&server)
        .await;
    let app = test_app(&server.uri());
    let cookie = admin_cookie(&app).await;

    let page = body_text(get(&app, "/admin/create-event", Some(&cookie)).await).await;
    assert!(page.contains("Create New Event"));
    assert!(page.contains(r#"name="period""#));

    let response = post_form(&app, "/admin/create-event", &event_fields("Hollywood Bowl", "149.99"), Some(&cookie)).await;
    assert!(is_redirect(&response));
    assert_eq!(location(&response), "/admin?notice=created");

    let html = body_text(get(&app, "/admin?notice=created", Some(&cookie)).await).await;
    assert!(html.contains("Event created successfully"));
}

#[tokio::test]
async fn admin_updates_event() {
    let server = api_with_events().await;
    Mock::given(method("PUT"))
        .and(path("/api/events/evt-1"))
        .and(body_partial_json(json!({ "venue": "The Forum", "time": "18:30" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(sample_events()[0].clone())))
        .expect(1)
        .mount(&server)
        .await;
    let app = test_app(&server.uri());
    let cookie = admin_cookie(&app).await;

    let page = body_text(get(&app, "/admin/edit-event/evt-1", Some(&cookie)).await).await;
    assert!(page.contains("Edit Event"));
    assert!(page.contains(r#"value="Hollywood Bowl""#));
    assert!(page.contains(r#"<option value="6" selected>6</option>"#));

    let response = post_form(&app, "/admin/edit-event/evt-1", &event_fields("The Forum", "149.99"), Some(&cookie)).await;
    assert!(is_redirect(&response));
    assert_eq!(location(&response), "/admin?notice=updated");
}

#[tokio::test]
async fn edit_errors_show_changed_fields() {
    let server = api_with_events().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let app = test_app(&server.uri());
    let cookie = admin_cookie(&app).await;

    let response = post_form(&app, "/admin/edit-event/evt-1", &event_fields("The Forum", "abc"), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("Unsaved changes: venue, price"));
    assert!(html.contains("Price must be a number of at least 0"));
}

#[tokio::test]
async fn admin_deletes_event() {
    let server = api_with_events().await;
    Mock::given(method("DELETE"))
        .and(path("/api/events/evt-2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "Event deleted" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let app = test_app(&server.uri());
    let cookie = admin_cookie(&app).await;

    let response = post_form(&app, "/admin/events/evt-2/delete", &[], Some(&cookie)).await;
    assert!(is_redirect(&response));
    assert_eq!(location(&response), "/admin?notice=deleted");
}
