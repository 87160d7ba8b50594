//! End-to-end: dashboards driving a real server through `HttpBackend`
//!
//! Each test binds an ephemeral port, serves the full router on it and
//! points an `HttpBackend` at that address.

#![cfg(feature = "client")]

use husk::prelude::*;
use serde_json::json;
use std::time::Duration;
use tokio::net::TcpListener;

async fn spawn_server(config: AppConfig) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_path = config.server.base_path.clone();

    let builder = ServerBuilder::from_config(&config);
    tokio::spawn(async move {
        builder.serve_on(listener).await.unwrap();
    });

    format!("http://{}{}", addr, base_path)
}

fn backend(base_url: &str) -> HttpBackend {
    HttpBackend::new(base_url, Duration::from_secs(5)).unwrap()
}

fn order_form(waste_type: &str) -> serde_json::Value {
    json!({
        "wasteType": waste_type,
        "quantity": 8,
        "amount": 1200,
        "address": "Kurunegala",
        "phoneNumber": "0761234567",
        "email": "mill@example.com"
    })
}

#[tokio::test]
async fn test_order_lifecycle_over_http() {
    let base_url = spawn_server(AppConfig::default()).await;
    let mut dashboard = OrderDashboard::new(backend(&base_url));

    dashboard.load().await;
    assert_eq!(dashboard.collection().load_state(), &LoadState::Ready);
    assert!(dashboard.orders().is_empty());

    let husk = dashboard.submit(order_form("CoconutHusk")).await.unwrap();
    dashboard.submit(order_form("CoconutShell")).await.unwrap();
    assert_eq!(dashboard.stats().total_amount, 2400.0);

    dashboard
        .update_status(&husk.id, OrderStatus::OnDelivery)
        .await
        .unwrap();
    assert_eq!(
        dashboard.stats().status_counts.get(&OrderStatus::OnDelivery),
        1
    );

    dashboard.delete(&husk.id).await.unwrap();

    // a fresh dashboard sees what the server kept
    let mut reloaded = OrderDashboard::new(backend(&base_url));
    reloaded.load().await;
    assert_eq!(reloaded.orders().len(), 1);
    assert_eq!(reloaded.orders()[0].waste_type, "CoconutShell");
}

#[tokio::test]
async fn test_server_errors_become_typed_client_errors() {
    let base_url = spawn_server(AppConfig::default()).await;
    let http = backend(&base_url);

    let err = http.delete_order("missing").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }));

    let bad = NewOrder {
        waste_type: "CoconutHusk".into(),
        quantity: 1,
        amount: 10.0,
        address: "Jaffna".into(),
        phone_number: "123".into(),
        email: "x@example.com".into(),
        status: None,
    };
    let err = http.create_order(&bad).await.unwrap_err();
    assert_eq!(err.first_message(), Some("Phone Number must be 10 digits"));
}

#[tokio::test]
async fn test_unreachable_server_fails_load() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut dashboard = OrderDashboard::new(backend(&format!("http://{}", addr)));
    dashboard.load().await;
    assert!(matches!(
        dashboard.collection().load_state(),
        LoadState::Failed { .. }
    ));
}

#[tokio::test]
async fn test_employee_dashboard_under_base_path() {
    let mut config = AppConfig::default();
    config.server.base_path = "/api".into();
    let base_url = spawn_server(config).await;
    let mut dashboard = EmployeeDashboard::new(backend(&base_url));

    let created = dashboard
        .submit(json!({
            "EmployeeName": "Ruwan",
            "EmployeeId": "E700",
            "DepartmentName": "Processing",
            "JobRole": "Operator",
            "PhoneNumber": "0701234567",
            "Email": "ruwan@example.com",
            "BasicSalary": 60000,
            "OverTimeHours": 2
        }))
        .await
        .unwrap();
    assert_eq!(created.employee_id, "E700");

    // duplicate business key is refused by the server
    let err = dashboard
        .submit(json!({
            "EmployeeName": "Another",
            "EmployeeId": "E700",
            "DepartmentName": "Processing",
            "JobRole": "Operator",
            "PhoneNumber": "0701234568",
            "Email": "another@example.com",
            "BasicSalary": 50000
        }))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Server { status: 409, .. }));
    assert_eq!(
        dashboard.take_notice().unwrap().message(),
        "Failed to add employee."
    );

    dashboard.load().await;
    assert_eq!(dashboard.employees().len(), 1);
    assert_eq!(dashboard.payroll_summary().total_overtime_payment, 1000.0);
}

#[tokio::test]
async fn test_detail_pages_fetch_by_id() {
    let base_url = spawn_server(AppConfig::default()).await;

    let mut missing = OrderDetail::new(backend(&base_url), "no-such-order");
    missing.load().await;
    assert_eq!(
        missing.load_state(),
        &LoadState::Failed {
            message: "Order not found.".to_string()
        }
    );

    let mut dashboard = OrderDashboard::new(backend(&base_url));
    let placed = dashboard.submit(order_form("CoconutFiber")).await.unwrap();

    let mut detail = OrderDetail::new(backend(&base_url), placed.id.clone());
    detail.load().await;
    assert_eq!(detail.load_state(), &LoadState::Ready);
    assert_eq!(detail.order().unwrap().waste_type, "CoconutFiber");
    assert_eq!(detail.summary()[2].value, "Rs. 1,200");

    let mut employees = EmployeeDashboard::new(backend(&base_url));
    let hired = employees
        .submit(json!({
            "EmployeeName": "Ruwan",
            "EmployeeId": "E300",
            "DepartmentName": "Stores",
            "JobRole": "Clerk",
            "PhoneNumber": "0751112222",
            "Email": "ruwan@example.com",
            "BasicSalary": 45000
        }))
        .await
        .unwrap();

    let mut editor = EmployeeEditor::new(backend(&base_url), hired.id);
    editor.load().await;
    let mut form = editor.form().unwrap();
    form.bonus = Some(2500.0);
    let saved = editor.save(form).await.unwrap();
    assert_eq!(saved.payroll().net_salary, 42550.0);
}
