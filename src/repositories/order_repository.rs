use log::debug;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::order_dto::{CreateOrderRequest, NewLocation, UpdateOrderRequest};
use crate::models::{Location, LocationWithAddress, Order};
use crate::services::order_validation::LocationChange;
use crate::utils::errors::{map_write_error, AppError};

const LOCATION_WITH_ADDRESS: &str = r#"
    SELECT l.id, l.order_id, l.type, l.name, l.street_address,
           c.id AS city_id, c.name AS city_name,
           s.id AS state_id, s.name AS state_name,
           co.id AS country_id, co.name AS country_name,
           l.date, l.time, l.special_instructions, l.sequence_number
    FROM locations l
    JOIN cities c ON c.id = l.city_id
    JOIN states s ON s.id = c.state_id
    JOIN countries co ON co.id = s.country_id
"#;

pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    pub async fn locations_for_orders(&self, order_ids: &[Uuid]) -> Result<Vec<Location>, AppError> {
        let locations = sqlx::query_as::<_, Location>(
            "SELECT * FROM locations WHERE order_id = ANY($1) ORDER BY type, sequence_number",
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(locations)
    }

    pub async fn locations_with_address(&self, order_id: Uuid) -> Result<Vec<LocationWithAddress>, AppError> {
        let sql = format!(
            "{} WHERE l.order_id = $1 ORDER BY l.type, l.sequence_number",
            LOCATION_WITH_ADDRESS
        );
        let locations = sqlx::query_as::<_, LocationWithAddress>(&sql)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(locations)
    }

    // Operaciones dentro de una transacción

    pub async fn insert(
        conn: &mut PgConnection,
        request: &CreateOrderRequest,
        created_by: Uuid,
    ) -> Result<Order, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (customer_name, customer_address, contact_person, phone_number,
                                load_tender_number, rate, currency, commodity, weight,
                                reference_number, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(request.customer_name.trim())
        .bind(request.customer_address.trim())
        .bind(request.contact_person.trim())
        .bind(request.phone_number.trim())
        .bind(request.load_tender_number.trim())
        .bind(request.rate)
        .bind(request.currency)
        .bind(request.commodity.trim())
        .bind(request.weight)
        .bind(non_blank(&request.reference_number))
        .bind(created_by)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_write_error)?;

        debug!("Orden insertada: {} ({})", order.order_number, order.id);
        Ok(order)
    }

    pub async fn insert_locations(
        conn: &mut PgConnection,
        order_id: Uuid,
        locations: &[NewLocation],
    ) -> Result<Vec<Location>, AppError> {
        let mut inserted = Vec::with_capacity(locations.len());
        for location in locations {
            let row = sqlx::query_as::<_, Location>(
                r#"
                INSERT INTO locations (order_id, type, name, street_address, city_id, date, time,
                                       special_instructions, sequence_number)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING *
                "#,
            )
            .bind(order_id)
            .bind(location.location_type)
            .bind(&location.name)
            .bind(&location.street_address)
            .bind(location.city_id)
            .bind(location.date)
            .bind(&location.time)
            .bind(&location.special_instructions)
            .bind(location.sequence_number)
            .fetch_one(&mut *conn)
            .await
            .map_err(map_write_error)?;
            inserted.push(row);
        }
        Ok(inserted)
    }

    pub async fn find_for_update(conn: &mut PgConnection, id: Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(order)
    }

    pub async fn locations_of(conn: &mut PgConnection, order_id: Uuid) -> Result<Vec<Location>, AppError> {
        let locations = sqlx::query_as::<_, Location>(
            "SELECT * FROM locations WHERE order_id = $1 ORDER BY type, sequence_number",
        )
        .bind(order_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(locations)
    }

    pub async fn update(
        conn: &mut PgConnection,
        id: Uuid,
        request: &UpdateOrderRequest,
    ) -> Result<Order, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET customer_name = $2, customer_address = $3, contact_person = $4, phone_number = $5,
                load_tender_number = $6, rate = $7, currency = $8, commodity = $9, weight = $10,
                reference_number = $11, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.customer_name.trim())
        .bind(request.customer_address.trim())
        .bind(request.contact_person.trim())
        .bind(request.phone_number.trim())
        .bind(request.load_tender_number.trim())
        .bind(request.rate)
        .bind(request.currency)
        .bind(request.commodity.trim())
        .bind(request.weight)
        .bind(non_blank(&request.reference_number))
        .fetch_one(&mut *conn)
        .await
        .map_err(map_write_error)?;
        Ok(order)
    }

    /// Actualiza una ubicación solo si pertenece a la orden
    pub async fn update_location(
        conn: &mut PgConnection,
        order_id: Uuid,
        change: &LocationChange,
    ) -> Result<Option<Location>, AppError> {
        let location = sqlx::query_as::<_, Location>(
            r#"
            UPDATE locations
            SET name = $3, street_address = $4, city_id = $5, date = $6, time = $7,
                special_instructions = $8
            WHERE id = $1 AND order_id = $2
            RETURNING *
            "#,
        )
        .bind(change.id)
        .bind(order_id)
        .bind(&change.name)
        .bind(&change.street_address)
        .bind(change.city_id)
        .bind(change.date)
        .bind(&change.time)
        .bind(&change.special_instructions)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_write_error)?;
        Ok(location)
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
