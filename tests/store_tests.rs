use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use dealership_rust::config::ClientOptions;
use dealership_rust::models::{
    BookingDraft, BookingStatus, Faq, FaqDraft, ListingKind, SettingsPatch, Theme, ThemeColors, Vehicle,
    VehicleDraft,
};
use dealership_rust::store::HydrateOutcome;
use dealership_rust::theme::{resolve_tokens, TokenSource};
use dealership_rust::Dealership;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dealership(server: &MockServer) -> Dealership {
    let options = ClientOptions::default().with_persist_preferences(false);
    Dealership::new_with_options(&server.uri(), options).unwrap()
}

fn vehicle_row() -> Value {
    json!({
        "id": "1",
        "make": "Toyota",
        "model": "Corolla",
        "year": 2020,
        "price": 15000.5,
        "type": "sale",
        "mileage": "30,000 km",
        "fuel": "Gasoline",
        "seats": 5,
        "inStock": true,
        "featured": true,
        "selling": false,
        "image": "/cars/1/front.jpg",
        "images": ["/cars/1/front.jpg", "/cars/1/back.jpg"],
        "description": "One owner",
        "bodyType": "Sedan",
        "doors": 4,
        "transmission": "Automatic",
        "features": {
            "interior": ["Leather seats"],
            "exterior": [],
            "comfort": ["Air conditioning"],
            "safety": ["ABS"]
        },
        "paymentOptions": ["Cash"],
        "warranty": ["6 months"]
    })
}

fn booking_row() -> Value {
    json!({
        "id": "3",
        "type": "rental",
        "customerName": "Ana",
        "customerEmail": "ana@example.com",
        "customerPhone": "555-0101",
        "bookingDate": "2024-06-01",
        "bookingTime": "10:00:00",
        "carId": "1",
        "status": "pending",
        "createdAt": "2024-05-20T09:00:00Z"
    })
}

fn faq_rows() -> Value {
    json!([
        { "id": "1", "question": "Do you finance?", "answer": "Yes", "displayOrder": 2, "active": true },
        { "id": "2", "question": "Old question", "answer": "Gone", "displayOrder": 1, "active": false },
        { "id": "3", "question": "Where are you?", "answer": "Paramaribo", "displayOrder": 1, "active": true }
    ])
}

async fn mount_gateway(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/init"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "initialized": true })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/cars"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [vehicle_row()] })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [booking_row()] })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/faqs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": faq_rows() })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "dealershipName": "Auto Plaza",
                "rentalEnabled": true,
                "theme": "classic",
                "homeLayout": "layout2"
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_hydrate_round_trip() {
    let mock_server = MockServer::start().await;
    mount_gateway(&mock_server).await;

    let store = dealership(&mock_server).create_store();
    assert_eq!(store.hydrate().await, HydrateOutcome::Loaded);

    let state = store.snapshot().await;
    assert!(state.initialized);
    assert!(!state.loading);

    // Collections come back exactly as the gateway sent them
    assert_eq!(serde_json::to_value(&state.vehicles).unwrap(), json!([vehicle_row()]));
    assert_eq!(serde_json::to_value(&state.bookings).unwrap(), json!([booking_row()]));
    let faqs: Vec<Faq> = serde_json::from_value(faq_rows()).unwrap();
    assert_eq!(state.faqs, faqs);

    assert_eq!(state.settings.dealership_name, "Auto Plaza");
    assert_eq!(state.settings.theme, Theme::Classic);
    assert_eq!(state.settings.contact_email, "combecarcenternv@gmail.com");
}

#[tokio::test]
async fn test_visible_faqs_after_hydrate() {
    let mock_server = MockServer::start().await;
    mount_gateway(&mock_server).await;

    let store = dealership(&mock_server).create_store();
    store.hydrate().await;

    let ids: Vec<String> = store.visible_faqs().await.into_iter().map(|faq| faq.id).collect();
    assert_eq!(ids, vec!["3", "1"]);
}

#[tokio::test]
async fn test_hydrate_not_initialized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/init"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "initialized": false })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/cars"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let store = dealership(&mock_server).create_store();
    assert_eq!(store.hydrate().await, HydrateOutcome::NotInitialized);
    assert!(!store.is_initialized().await);
    assert_eq!(store.settings().await.theme, Theme::RedBlack);
}

#[tokio::test]
async fn test_hydrate_failure_falls_back_to_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/init"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "initialized": true })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/cars"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Failed to fetch cars" })))
        .mount(&mock_server)
        .await;

    for collection in ["/api/bookings", "/api/faqs"] {
        Mock::given(method("GET"))
            .and(path(collection))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&mock_server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/api/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .mount(&mock_server)
        .await;

    let store = dealership(&mock_server).create_store();
    let outcome = store.hydrate().await;

    assert_eq!(outcome, HydrateOutcome::Failed("Failed to fetch cars".to_string()));
    assert!(store.vehicles().await.is_empty());
    assert!(!store.is_loading().await);
}

#[tokio::test]
async fn test_add_vehicle_uses_gateway_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/cars"))
        .and(body_partial_json(json!({
            "make": "Kia",
            "type": "sale",
            "image": "/cars/temp/a.jpg",
            "images": ["/cars/temp/a.jpg"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "id": 12,
            "image": "/cars/12/a.jpg",
            "images": ["/cars/12/a.jpg"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = dealership(&mock_server).create_store();
    let before = store.vehicles().await.len();

    let draft = VehicleDraft::new("Kia", "Rio", 2018, Decimal::new(9000, 0), ListingKind::Sale)
        .with_images(vec!["/cars/temp/a.jpg".to_string()]);
    let vehicle = store.add(draft).await.unwrap();

    let vehicles = store.vehicles().await;
    assert_eq!(vehicles.len(), before + 1);
    assert_eq!(vehicle.id, "12");
    assert_eq!(vehicles[0].primary_image(), Some("/cars/12/a.jpg"));
}

#[tokio::test]
async fn test_failed_mutations_leave_state_unchanged() {
    let mock_server = MockServer::start().await;
    mount_gateway(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/cars"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Failed to create car" })))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/cars/1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Failed to update car" })))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/faqs/1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "FAQ not found" })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/settings"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let store = dealership(&mock_server).create_store();
    store.hydrate().await;
    let before = store.snapshot().await;

    let draft = VehicleDraft::new("Kia", "Rio", 2018, Decimal::new(9000, 0), ListingKind::Sale);
    let err = store.add(draft).await.unwrap_err();
    assert!(err.is_gateway());
    assert_eq!(err.user_message(), "Failed to create car");

    let mut vehicle = store.find_vehicle("1").await.unwrap();
    vehicle.details.price = Decimal::new(1, 0);
    assert!(store.update(vehicle).await.is_err());
    assert!(store.toggle_in_stock("1").await.is_err());
    assert!(store.delete::<Faq>("1").await.is_err());
    assert!(store
        .update_settings(SettingsPatch::new().rental_enabled(false))
        .await
        .is_err());

    assert_eq!(store.snapshot().await, before);
}

#[tokio::test]
async fn test_update_and_delete_faq() {
    let mock_server = MockServer::start().await;
    mount_gateway(&mock_server).await;

    Mock::given(method("PUT"))
        .and(path("/api/faqs/3"))
        .and(body_partial_json(json!({ "id": "3", "answer": "Grote Combeweg" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/faqs/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = dealership(&mock_server).create_store();
    store.hydrate().await;

    let mut faq = store.visible_faqs().await.remove(0);
    faq.details.answer = "Grote Combeweg".to_string();
    store.update(faq).await.unwrap();
    store.delete::<Faq>("1").await.unwrap();

    let visible = store.visible_faqs().await;
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].details.answer, "Grote Combeweg");
}

#[tokio::test]
async fn test_delete_absent_vehicle_is_noop() {
    let mock_server = MockServer::start().await;
    mount_gateway(&mock_server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/cars/99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = dealership(&mock_server).create_store();
    store.hydrate().await;
    let before = store.vehicles().await;

    store.delete::<Vehicle>("99").await.unwrap();
    assert_eq!(store.vehicles().await, before);
}

#[tokio::test]
async fn test_bookings_and_status_changes() {
    let mock_server = MockServer::start().await;
    mount_gateway(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .and(body_partial_json(json!({ "type": "rental", "carId": "1", "status": "pending" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "id": 4 })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/bookings/3"))
        .and(body_partial_json(json!({ "status": "confirmed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = dealership(&mock_server).create_store();
    store.hydrate().await;

    let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
    let booking = store
        .add(BookingDraft::rental("Bo", "bo@example.com", date, "1"))
        .await
        .unwrap();
    assert_eq!(booking.id, "4");

    // Unknown vehicles are rejected before anything is sent
    let err = store
        .add(BookingDraft::rental("Bo", "bo@example.com", date, "404"))
        .await
        .unwrap_err();
    assert!(err.is_precondition());

    store.set_booking_status("3", BookingStatus::Confirmed).await.unwrap();
    let bookings = store.bookings().await;
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0].status(), BookingStatus::Confirmed);
}

#[tokio::test]
async fn test_add_faq() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/faqs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "id": "8" })))
        .mount(&mock_server)
        .await;

    let store = dealership(&mock_server).create_store();
    store.add(FaqDraft::new("Do you trade in?", "Yes", 0)).await.unwrap();

    let faqs = store.visible_faqs().await;
    assert_eq!(faqs.len(), 1);
    assert_eq!(faqs[0].id, "8");
}

#[tokio::test]
async fn test_settings_drive_theme_tokens() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&mock_server)
        .await;

    let dealership = dealership(&mock_server);
    let store = dealership.create_store();
    let resolver = dealership.theme_resolver(&store).await;

    store
        .update_settings(SettingsPatch::new().theme(Theme::Modern))
        .await
        .unwrap();
    assert_eq!(resolver.theme().await, Theme::Modern);

    assert!(!resolver.is_dark_mode().await);
    assert_eq!(resolver.tokens().await, resolve_tokens(Theme::Modern, None, false));

    resolver.toggle_dark_mode().await.unwrap();
    assert_eq!(resolver.tokens().await, resolve_tokens(Theme::Modern, None, true));

    let palette = ThemeColors::new("#111111", "#222222", "#333333", "#ffffff", "#000000");
    let tokens = resolver.set_theme(Theme::Custom, Some(palette.clone())).await.unwrap();
    assert_eq!(tokens.source, TokenSource::Palette);
    assert_eq!(tokens.primary, "0 0% 7%");
    assert_eq!(store.settings().await.custom_colors, Some(palette));

    let requests = mock_server.received_requests().await.unwrap();
    let last: Value = serde_json::from_slice(&requests.last().unwrap().body).unwrap();
    assert_eq!(last["theme"], "custom");
    assert_eq!(last["customColors"]["accent"], "#333333");
}

#[tokio::test]
async fn test_get_vehicle_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cars/1"))
        .and(header("x-client-info", dealership_rust::config::CLIENT_INFO))
        .respond_with(ResponseTemplate::new(200).set_body_json(vehicle_row()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/cars/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Car not found" })))
        .mount(&mock_server)
        .await;

    let dealership = dealership(&mock_server);
    let vehicle = dealership.gateway().get_vehicle("1").await.unwrap();
    assert_eq!(vehicle.id, "1");
    assert_eq!(vehicle.details.make, "Toyota");

    let missing = dealership.gateway().get_vehicle("404").await.unwrap_err();
    assert!(missing.is_gateway());
    assert_eq!(missing.user_message(), "Car not found");

    // Bodiless requests carry no JSON content type
    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.iter().all(|request| request
        .headers
        .keys()
        .all(|name| name.as_str() != "content-type")));
}
