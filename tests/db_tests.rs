//! Escenarios transaccionales contra PostgreSQL
//!
//! Cada test recibe una base de datos nueva con las migraciones aplicadas
//! (requiere `DATABASE_URL`).

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use freight_dispatch::config::environment::EnvironmentConfig;
use freight_dispatch::controllers::manifest_controller::ManifestController;
use freight_dispatch::controllers::order_controller::OrderController;
use freight_dispatch::dto::manifest_dto::ManifestRequest;
use freight_dispatch::dto::order_dto::{CreateOrderRequest, LocationInput, OrderCreatedResponse};
use freight_dispatch::dto::split_dto::{SplitOrderRequest, SplitPointInput};
use freight_dispatch::middleware::auth::AuthenticatedUser;
use freight_dispatch::models::{Currency, ManifestStatus, OrderLeg};
use freight_dispatch::services::fleet_tracker::{FleetTracker, MockTelemetryProvider};
use freight_dispatch::utils::errors::{AppError, BookedResource};
use freight_dispatch::{create_router, AppState};

struct Geo {
    country_id: Uuid,
    state_id: Uuid,
    city_id: Uuid,
}

async fn seed_geo(pool: &PgPool) -> Result<Geo> {
    let country_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO countries (name, code) VALUES ('Canada', 'CA') RETURNING id",
    )
    .fetch_one(pool)
    .await?;
    let state_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO states (country_id, name, code) VALUES ($1, 'Ontario', 'ON') RETURNING id",
    )
    .bind(country_id)
    .fetch_one(pool)
    .await?;
    let city_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO cities (state_id, name) VALUES ($1, 'Toronto') RETURNING id",
    )
    .bind(state_id)
    .fetch_one(pool)
    .await?;

    Ok(Geo {
        country_id,
        state_id,
        city_id,
    })
}

async fn seed_driver(pool: &PgPool, name: &str) -> Result<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>("INSERT INTO drivers (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(id)
}

async fn seed_vehicle(pool: &PgPool, number: &str) -> Result<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO vehicles (number, type) VALUES ($1, 'Tractor') RETURNING id",
    )
    .bind(number)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn count(pool: &PgPool, table: &str) -> Result<i64> {
    let total = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await?;
    Ok(total)
}

fn actor() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: Uuid::new_v4(),
        email: Some("dispatcher@example.com".to_string()),
    }
}

fn location(geo: &Geo, date: &str) -> LocationInput {
    LocationInput {
        name: "Main Warehouse".to_string(),
        street_address: "100 King St W".to_string(),
        country_id: Some(geo.country_id),
        state_id: Some(geo.state_id),
        city_id: Some(geo.city_id),
        date: date.to_string(),
        time: "09:00".to_string(),
        special_instructions: None,
    }
}

fn order_request(geo: &Geo, load_tender_number: &str) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_name: "Acme Logistics".to_string(),
        customer_address: "1 Front St, Toronto".to_string(),
        contact_person: "Jane Doe".to_string(),
        phone_number: "4165550199".to_string(),
        load_tender_number: load_tender_number.to_string(),
        rate: Decimal::from(1500),
        currency: Currency::Cad,
        commodity: "Steel coils".to_string(),
        weight: Decimal::from(20000),
        reference_number: None,
        pickup_locations: vec![location(geo, "2024-05-01")],
        delivery_locations: vec![location(geo, "2024-05-03")],
    }
}

fn manifest_request(driver_id: Uuid, vehicle_id: Uuid, status: ManifestStatus) -> ManifestRequest {
    ManifestRequest {
        driver_id: Some(driver_id),
        vehicle_id: Some(vehicle_id),
        driver_rate: Some(Decimal::from(30)),
        status,
        ..Default::default()
    }
}

async fn create_order(pool: &PgPool, geo: &Geo, load_tender_number: &str) -> Result<OrderCreatedResponse> {
    let response = OrderController::new(pool.clone())
        .create(&actor(), order_request(geo, load_tender_number))
        .await?;
    response
        .data
        .ok_or_else(|| anyhow::anyhow!("create order returned no data"))
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_load_tender_writes_nothing(pool: PgPool) -> Result<()> {
    let geo = seed_geo(&pool).await?;
    create_order(&pool, &geo, "LT-1001").await?;

    let error = OrderController::new(pool.clone())
        .create(&actor(), order_request(&geo, "LT-1001"))
        .await
        .unwrap_err();

    assert!(matches!(error, AppError::DuplicateLoadTender));
    assert_eq!(error.to_string(), "This load tender number already exists");
    assert_eq!(count(&pool, "orders").await?, 1);
    assert_eq!(count(&pool, "locations").await?, 2);
    assert_eq!(count(&pool, "order_legs").await?, 1);
    assert_eq!(count(&pool, "audit_logs").await?, 1);
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_created_order_has_locations_leg_and_audit(pool: PgPool) -> Result<()> {
    let geo = seed_geo(&pool).await?;
    let created = create_order(&pool, &geo, "LT-2001").await?;

    assert_eq!(created.locations.len(), 2);
    assert!(created.locations.iter().all(|l| l.sequence_number == 0));

    let leg = sqlx::query_as::<_, OrderLeg>("SELECT * FROM order_legs WHERE id = $1")
        .bind(created.leg_id)
        .fetch_one(&pool)
        .await?;
    assert_eq!(leg.sequence_number, 1);
    assert_eq!(leg.status, ManifestStatus::Pending);
    assert!(leg.parent_leg_id.is_none());

    let logs = OrderController::new(pool.clone())
        .audit_logs(created.order.id)
        .await?;
    assert_eq!(logs.entries.len(), 1);
    assert_eq!(logs.entries[0].created_by, "dispatcher@example.com");
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_double_booking_requires_confirmation(pool: PgPool) -> Result<()> {
    let geo = seed_geo(&pool).await?;
    let order = create_order(&pool, &geo, "LT-3001").await?.order;
    let driver = seed_driver(&pool, "Sam Carter").await?;
    let first_vehicle = seed_vehicle(&pool, "TRK-01").await?;
    let second_vehicle = seed_vehicle(&pool, "TRK-02").await?;
    let manifests = ManifestController::new(pool.clone());

    let first = manifests
        .create_for_order(
            &actor(),
            order.id,
            manifest_request(driver, first_vehicle, ManifestStatus::InProgress),
        )
        .await?
        .data
        .ok_or_else(|| anyhow::anyhow!("create manifest returned no data"))?;

    // El tramo enlazado hereda el estado del manifiesto
    let linked_status = sqlx::query_scalar::<_, ManifestStatus>(
        "SELECT status FROM order_legs WHERE manifest_id = $1",
    )
    .bind(first.id)
    .fetch_one(&pool)
    .await?;
    assert_eq!(linked_status, ManifestStatus::InProgress);

    let error = manifests
        .create_for_order(
            &actor(),
            order.id,
            manifest_request(driver, second_vehicle, ManifestStatus::Pending),
        )
        .await
        .unwrap_err();
    match error {
        AppError::AssignmentConflict(conflicts) => {
            assert_eq!(conflicts.len(), 1);
            assert_eq!(conflicts[0].resource, BookedResource::Driver);
            assert_eq!(conflicts[0].manifest_id, first.id);
            assert_eq!(
                conflicts[0].message(),
                format!("Driver is already assigned to manifest #{}", first.number)
            );
        }
        other => panic!("expected an assignment conflict, got {:?}", other),
    }
    assert_eq!(count(&pool, "manifests").await?, 1);

    let confirmed = ManifestRequest {
        confirm: true,
        ..manifest_request(driver, second_vehicle, ManifestStatus::Pending)
    };
    manifests.create_for_order(&actor(), order.id, confirmed).await?;
    assert_eq!(count(&pool, "manifests").await?, 2);
    assert_eq!(count(&pool, "manifest_history").await?, 2);
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_split_creates_two_children_and_keeps_parent_manifest(pool: PgPool) -> Result<()> {
    let geo = seed_geo(&pool).await?;
    let created = create_order(&pool, &geo, "LT-4001").await?;
    let order_id = created.order.id;
    let driver = seed_driver(&pool, "Alex Moreau").await?;
    let vehicle = seed_vehicle(&pool, "TRK-07").await?;

    let manifest = ManifestController::new(pool.clone())
        .create_for_order(&actor(), order_id, manifest_request(driver, vehicle, ManifestStatus::Pending))
        .await?
        .data
        .ok_or_else(|| anyhow::anyhow!("create manifest returned no data"))?;
    let orders = OrderController::new(pool.clone());
    orders.assign_manifest(&actor(), order_id, manifest.id).await?;

    let top_level_before = count(&pool, "order_legs WHERE parent_leg_id IS NULL").await?;

    let split = orders
        .split(
            &actor(),
            order_id,
            SplitOrderRequest {
                split_point: SplitPointInput::Gps {
                    name: "Highway 401 rest stop".to_string(),
                    latitude: 43.7,
                    longitude: -79.4,
                },
                reason: "Driver hours exceeded".to_string(),
                legs: Vec::new(),
            },
        )
        .await?
        .data
        .ok_or_else(|| anyhow::anyhow!("split returned no data"))?;

    assert_eq!(split.parent_leg_id, created.leg_id);
    assert_eq!(split.legs.len(), 2);
    assert_eq!(count(&pool, "split_points").await?, 1);
    for (index, leg) in split.legs.iter().enumerate() {
        assert_eq!(leg.parent_leg_id, Some(created.leg_id));
        assert_eq!(leg.split_point_id, Some(split.split_point.id));
        assert_eq!(leg.split_sequence, Some(index as i32 + 1));
        assert_eq!(leg.status, ManifestStatus::Pending);
        assert_eq!(leg.split_reason.as_deref(), Some("Driver hours exceeded"));
    }

    let parent = sqlx::query_as::<_, OrderLeg>("SELECT * FROM order_legs WHERE id = $1")
        .bind(created.leg_id)
        .fetch_one(&pool)
        .await?;
    assert_eq!(parent.manifest_id, Some(manifest.id));
    assert_eq!(
        count(&pool, "order_legs WHERE parent_leg_id IS NULL").await?,
        top_level_before
    );
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_split_without_top_level_leg_rolls_back(pool: PgPool) -> Result<()> {
    let geo = seed_geo(&pool).await?;
    let order_id = create_order(&pool, &geo, "LT-5001").await?.order.id;
    sqlx::query("DELETE FROM order_legs WHERE order_id = $1")
        .bind(order_id)
        .execute(&pool)
        .await?;

    let error = OrderController::new(pool.clone())
        .split(
            &actor(),
            order_id,
            SplitOrderRequest {
                split_point: SplitPointInput::Gps {
                    name: "Depot".to_string(),
                    latitude: 45.0,
                    longitude: -75.0,
                },
                reason: "Equipment swap".to_string(),
                legs: Vec::new(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(error, AppError::OriginalLegNotFound(id) if id == order_id));
    assert_eq!(count(&pool, "split_points").await?, 0);
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_edit_context_route_preloads_hierarchy(pool: PgPool) -> Result<()> {
    let geo = seed_geo(&pool).await?;
    let order_id = create_order(&pool, &geo, "LT-6001").await?.order.id;

    let config = EnvironmentConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgresql://unused".to_string()),
        "AUTH_JWT_SECRET" => Some("integration-secret".to_string()),
        _ => None,
    })?;
    let fleet = FleetTracker::new(Arc::new(MockTelemetryProvider), Duration::from_secs(30));
    let app = create_router(AppState::new(pool, config, fleet));

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/orders/{}/edit-context", order_id))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;

    assert_eq!(body["order"]["id"], order_id.to_string());
    assert_eq!(body["order"]["locations"].as_array().map(Vec::len), Some(2));
    let states = &body["states_by_country"][geo.country_id.to_string()];
    assert_eq!(states[0]["name"], "Ontario");
    let cities = &body["cities_by_state"][geo.state_id.to_string()];
    assert_eq!(cities[0]["name"], "Toronto");
    assert_eq!(body["states_by_country"].as_object().map(|m| m.len()), Some(1));
    Ok(())
}
