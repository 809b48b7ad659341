//! Calculadora de pagos del conductor
//!
//! Pago base por horas (tarifa × horas) o por millas (tarifa × millas) más
//! una lista fija de cargos adicionales ilustrativos.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dto::payment_dto::{AdditionalCharge, PaymentDisplay, PaymentSummaryResponse};
use crate::models::DriverPaymentType;
use crate::utils::errors::{bad_request_error, AppResult};

pub const PAYMENT_OUT_OF_RANGE: &str = "Payment amount is too large to compute";

/// Entero inicial de un token, 0 si no hay dígitos
fn leading_integer(token: Option<&str>) -> i64 {
    let Some(token) = token.map(str::trim) else {
        return 0;
    };
    let (sign, digits) = match token.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, token.strip_prefix('+').unwrap_or(token)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

/// "H hours M minutes" → H + M/60
pub fn parse_duration_hours(duration: &str) -> Decimal {
    let tokens: Vec<&str> = duration.split(' ').collect();
    let hours = Decimal::from(leading_integer(tokens.first().copied()));
    let minutes = Decimal::from(leading_integer(tokens.get(2).copied()));
    hours + minutes / Decimal::from(60)
}

/// "N miles" → N
pub fn parse_distance_miles(distance: &str) -> Decimal {
    Decimal::from(leading_integer(distance.split(' ').next()))
}

/// Tarifa × horas o tarifa × millas; un desbordamiento es un error de la petición
pub fn base_pay(
    payment_type: DriverPaymentType,
    rate: Decimal,
    hours: Decimal,
    miles: Decimal,
) -> AppResult<Decimal> {
    let amount = match payment_type {
        DriverPaymentType::Hourly => rate.checked_mul(hours),
        DriverPaymentType::Mileage => rate.checked_mul(miles),
    };
    amount.ok_or_else(|| bad_request_error(PAYMENT_OUT_OF_RANGE))
}

/// Cargos adicionales ilustrativos
pub fn additional_charges() -> Vec<AdditionalCharge> {
    [
        (1, "Detention Time", Decimal::new(6250, 2), "Waiting at loading dock"),
        (2, "Extra Stop", Decimal::new(5000, 2), "Unscheduled delivery location"),
        (3, "Tolls", Decimal::new(3575, 2), "Highway tolls"),
        (4, "Fuel Surcharge", Decimal::new(2250, 2), "5% surcharge due to fuel price increase"),
        (5, "Special Handling", Decimal::new(7500, 2), "Oversized item handling"),
    ]
    .into_iter()
    .map(|(id, charge_type, total, notes)| AdditionalCharge {
        id,
        charge_type: charge_type.to_string(),
        total,
        notes: notes.to_string(),
    })
    .collect()
}

fn display(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Resumen completo de pago
pub fn summarize(
    manifest_id: Option<Uuid>,
    payment_type: DriverPaymentType,
    rate: Decimal,
    duration: &str,
    distance: &str,
) -> AppResult<PaymentSummaryResponse> {
    let hours = parse_duration_hours(duration);
    let miles = parse_distance_miles(distance);
    let base = base_pay(payment_type, rate, hours, miles)?;
    let charges = additional_charges();
    let additional_total: Decimal = charges.iter().map(|c| c.total).sum();
    let grand_total = base
        .checked_add(additional_total)
        .ok_or_else(|| bad_request_error(PAYMENT_OUT_OF_RANGE))?;

    Ok(PaymentSummaryResponse {
        manifest_id,
        driver_payment_type: payment_type,
        driver_rate: rate,
        hours,
        miles,
        base_pay: base,
        additional_charges: charges,
        additional_total,
        grand_total,
        display: PaymentDisplay {
            base_pay: display(base),
            additional_total: display(additional_total),
            grand_total: display(grand_total),
        },
    })
}
