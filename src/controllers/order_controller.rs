use std::collections::HashMap;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dto::common_dto::ApiResponse;
use crate::dto::order_dto::{
    AuditLogListResponse, CreateOrderRequest, OrderCreatedResponse, OrderDetailResponse,
    OrderEditContext, OrderFormStep, OrderSummaryResponse, UpdateOrderRequest,
    ValidateStepRequest, ValidateStepResponse,
};
use crate::dto::split_dto::{SplitOrderRequest, SplitOrderResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{AuditAction, Location, NewAuditLog, NewOrderLeg};
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::location_repository::LocationRepository;
use crate::repositories::manifest_repository::{ManifestRepository, StopOwner};
use crate::repositories::order_leg_repository::OrderLegRepository;
use crate::repositories::order_repository::OrderRepository;
use crate::services::location_resolver::LocationResolver;
use crate::services::order_planner::order_snapshot;
use crate::services::order_validation::{validate_create_order, validate_order_update, validate_step};
use crate::services::split_planner::{plan_child_legs, plan_leg_stops, validate_split};
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

pub struct OrderController {
    pool: PgPool,
    orders: OrderRepository,
    legs: OrderLegRepository,
    audit: AuditRepository,
    locations: LocationRepository,
}

impl OrderController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool.clone()),
            legs: OrderLegRepository::new(pool.clone()),
            audit: AuditRepository::new(pool.clone()),
            locations: LocationRepository::new(pool.clone()),
            pool,
        }
    }

    /// Crear orden, ubicaciones, tramo inicial y auditoría en una sola transacción
    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateOrderRequest,
    ) -> Result<ApiResponse<OrderCreatedResponse>, AppError> {
        let planned = validate_create_order(&request).map_err(AppError::FormValidation)?;

        let mut tx = self.pool.begin().await?;

        let order = OrderRepository::insert(&mut tx, &request, actor.user_id).await?;
        let locations = OrderRepository::insert_locations(&mut tx, order.id, &planned).await?;
        let leg = OrderLegRepository::insert(&mut tx, &NewOrderLeg::initial(order.id)).await?;
        AuditRepository::insert(
            &mut tx,
            &NewAuditLog {
                order_id: order.id,
                action: AuditAction::Create,
                previous_data: None,
                new_data: order_snapshot(&order, &locations),
                created_by: actor.actor_label(),
            },
        )
        .await?;

        tx.commit().await?;

        info!(
            "📦 Orden {} creada por {} ({} ubicaciones)",
            order.order_number,
            actor.actor_label(),
            locations.len()
        );

        Ok(ApiResponse::success_with_message(
            OrderCreatedResponse {
                order,
                locations,
                leg_id: leg.id,
            },
            "Order created successfully",
        ))
    }

    pub async fn list(&self) -> Result<Vec<OrderSummaryResponse>, AppError> {
        let orders = self.orders.list().await?;
        let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();

        let mut by_order: HashMap<Uuid, Vec<Location>> = HashMap::new();
        for location in self.orders.locations_for_orders(&ids).await? {
            by_order.entry(location.order_id).or_default().push(location);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let locations = by_order.remove(&order.id).unwrap_or_default();
                OrderSummaryResponse { order, locations }
            })
            .collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<OrderDetailResponse, AppError> {
        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Order", &id.to_string()))?;
        let locations = self.orders.locations_with_address(id).await?;
        let legs = self.legs.legs_with_manifest(id).await?;

        Ok(OrderDetailResponse {
            order,
            locations,
            legs,
        })
    }

    /// Detalle de la orden más estados y ciudades para su editor
    pub async fn edit_context(&self, id: Uuid) -> Result<OrderEditContext, AppError> {
        let order = self.get(id).await?;
        let resolver = LocationResolver::new(self.locations.clone());
        let pairs: Vec<(Uuid, Uuid)> = order
            .locations
            .iter()
            .map(|l| (l.country_id, l.state_id))
            .collect();
        let preloaded = resolver.preload(pairs).await;

        Ok(OrderEditContext {
            order,
            states_by_country: preloaded.states_by_country,
            cities_by_state: preloaded.cities_by_state,
        })
    }

    /// Editar orden y ubicaciones, con foto antes/después en la auditoría
    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: UpdateOrderRequest,
    ) -> Result<ApiResponse<OrderSummaryResponse>, AppError> {
        let changes = validate_order_update(&request).map_err(AppError::FormValidation)?;

        let mut tx = self.pool.begin().await?;

        let previous = OrderRepository::find_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| not_found_error("Order", &id.to_string()))?;
        let previous_locations = OrderRepository::locations_of(&mut tx, id).await?;

        let order = OrderRepository::update(&mut tx, id, &request).await?;
        for change in &changes {
            if OrderRepository::update_location(&mut tx, id, change).await?.is_none() {
                return Err(not_found_error("Location", &change.id.to_string()));
            }
        }
        let locations = OrderRepository::locations_of(&mut tx, id).await?;

        AuditRepository::insert(
            &mut tx,
            &NewAuditLog {
                order_id: id,
                action: AuditAction::Update,
                previous_data: Some(order_snapshot(&previous, &previous_locations)),
                new_data: order_snapshot(&order, &locations),
                created_by: actor.actor_label(),
            },
        )
        .await?;

        tx.commit().await?;

        info!("✏️ Orden {} actualizada por {}", order.order_number, actor.actor_label());

        Ok(ApiResponse::success_with_message(
            OrderSummaryResponse { order, locations },
            "Order updated successfully",
        ))
    }

    pub async fn audit_logs(&self, order_id: Uuid) -> Result<AuditLogListResponse, AppError> {
        if self.orders.find_by_id(order_id).await?.is_none() {
            return Err(not_found_error("Order", &order_id.to_string()));
        }
        let entries = self.audit.list_for_order(order_id).await?;
        Ok(AuditLogListResponse { order_id, entries })
    }

    /// Validar un paso del asistente sin tocar la base de datos
    pub fn validate_step(&self, request: &ValidateStepRequest) -> Result<ValidateStepResponse, AppError> {
        let step = OrderFormStep::from_number(request.step)
            .ok_or_else(|| bad_request_error("Step must be 1, 2 or 3"))?;

        let errors = validate_step(step, &request.order);
        if !errors.is_empty() {
            return Err(AppError::FormValidation(errors));
        }

        Ok(ValidateStepResponse {
            step: request.step,
            valid: true,
        })
    }

    /// Dividir el tramo principal en dos tramos hijos
    pub async fn split(
        &self,
        actor: &AuthenticatedUser,
        order_id: Uuid,
        request: SplitOrderRequest,
    ) -> Result<ApiResponse<SplitOrderResponse>, AppError> {
        validate_split(&request.split_point, &request.reason).map_err(AppError::FormValidation)?;
        let leg_stops = plan_leg_stops(&request.legs).map_err(AppError::FormValidation)?;

        let mut tx = self.pool.begin().await?;

        if OrderRepository::find_for_update(&mut tx, order_id).await?.is_none() {
            return Err(not_found_error("Order", &order_id.to_string()));
        }

        let split_point = OrderLegRepository::insert_split_point(&mut tx, &request.split_point).await?;
        let parent = OrderLegRepository::top_level_leg(&mut tx, order_id)
            .await?
            .ok_or(AppError::OriginalLegNotFound(order_id))?;

        let mut legs = Vec::with_capacity(2);
        for child in plan_child_legs(&parent, split_point.id, &request.reason) {
            legs.push(OrderLegRepository::insert(&mut tx, &child).await?);
        }
        for (leg, stops) in legs.iter().zip(leg_stops.iter()) {
            ManifestRepository::insert_stops(&mut tx, StopOwner::OrderLeg(leg.id), stops).await?;
        }

        tx.commit().await?;

        info!(
            "✂️ Tramo {} de la orden {} dividido en {} por {}",
            parent.id,
            order_id,
            split_point.name,
            actor.actor_label()
        );

        Ok(ApiResponse::success_with_message(
            SplitOrderResponse {
                split_point,
                parent_leg_id: parent.id,
                legs,
            },
            "Order split successfully",
        ))
    }

    /// Enlazar un manifiesto existente con los tramos principales
    pub async fn assign_manifest(
        &self,
        actor: &AuthenticatedUser,
        order_id: Uuid,
        manifest_id: Uuid,
    ) -> Result<ApiResponse<OrderDetailResponse>, AppError> {
        let mut tx = self.pool.begin().await?;

        if OrderRepository::find_for_update(&mut tx, order_id).await?.is_none() {
            return Err(not_found_error("Order", &order_id.to_string()));
        }
        if ManifestRepository::find_for_update(&mut tx, manifest_id).await?.is_none() {
            return Err(not_found_error("Manifest", &manifest_id.to_string()));
        }

        let updated =
            OrderLegRepository::assign_manifest_to_top_level(&mut tx, order_id, manifest_id).await?;
        if updated == 0 {
            return Err(AppError::OriginalLegNotFound(order_id));
        }

        tx.commit().await?;

        info!(
            "🔗 Manifiesto {} asignado a la orden {} por {}",
            manifest_id,
            order_id,
            actor.actor_label()
        );

        let detail = self.get(order_id).await?;
        Ok(ApiResponse::success_with_message(detail, "Manifest assigned successfully"))
    }
}
