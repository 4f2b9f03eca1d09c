use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::orders::OrderWithItems,
    dto::payments::{CreatePaymentRequest, PaymentCreated, PaymentHistory, PaymentWithOrder},
    entity::{
        orders::{Column as OrderCol, Entity as Orders},
        payments::{
            ActiveModel as PaymentActive, Column as PaymentCol, Entity as Payments,
            Model as PaymentModel, PaymentStatus,
        },
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Payment,
    response::{ApiResponse, Meta},
    services::order_service::{load_items_for_orders, order_from_entity},
    state::AppState,
};

/// Record a simulated payment against an order. There is no gateway call;
/// the payment is stored as Pending and stays there.
pub async fn create_payment(
    state: &AppState,
    user: &AuthUser,
    payload: CreatePaymentRequest,
) -> AppResult<ApiResponse<PaymentCreated>> {
    if payload.amount <= 0 {
        return Err(AppError::Validation("amount must be positive".into()));
    }

    let order = Orders::find_by_id(payload.order).one(&state.orm).await?;
    if order.is_none() {
        return Err(AppError::NotFound("order"));
    }

    let existing = Payments::find()
        .filter(PaymentCol::OrderId.eq(payload.order))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "Order already has a payment".to_string(),
        ));
    }

    let active = PaymentActive {
        id: Set(Uuid::new_v4()),
        order_id: Set(payload.order),
        payment_method: Set(payload.payment_method),
        amount: Set(payload.amount),
        transaction_id: Set(payload.transaction_id),
        payment_status: Set(PaymentStatus::Pending),
        created_at: NotSet,
    };

    // The pre-check above races with concurrent requests; the unique index on
    // order_id is the real guarantee.
    let payment = match active.insert(&state.orm).await {
        Ok(p) => p,
        Err(err) => {
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                return Err(AppError::Conflict("Order already has a payment".to_string()));
            }
            return Err(err.into());
        }
    };

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "payment_create",
        Some("payments"),
        Some(serde_json::json!({ "payment_id": payment.id, "order_id": payment.order_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Payment processed successfully",
        PaymentCreated {
            payment_id: payment.id,
            status: payment.payment_status,
        },
        Some(Meta::empty()),
    ))
}

/// All payments whose order belongs to the user, newest first, with the
/// order and its items nested.
pub async fn list_payment_history(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<PaymentHistory>> {
    let orders = Orders::find()
        .filter(OrderCol::UserId.eq(user.user_id))
        .all(&state.orm)
        .await?;

    let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    if order_ids.is_empty() {
        return Ok(ApiResponse::success(
            "Payment history",
            PaymentHistory { items: Vec::new() },
            Some(Meta::empty()),
        ));
    }

    let payments = Payments::find()
        .filter(PaymentCol::OrderId.is_in(order_ids.clone()))
        .order_by_desc(PaymentCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let mut items_by_order = load_items_for_orders(state, &order_ids).await?;
    let mut orders_by_id: std::collections::HashMap<Uuid, _> =
        orders.into_iter().map(|o| (o.id, o)).collect();

    let mut items: Vec<PaymentWithOrder> = Vec::with_capacity(payments.len());
    for payment in payments {
        let Some(order) = orders_by_id.remove(&payment.order_id) else {
            continue;
        };
        let order_items = items_by_order.remove(&order.id).unwrap_or_default();
        items.push(PaymentWithOrder {
            payment: payment_from_entity(payment),
            order: OrderWithItems {
                order: order_from_entity(order),
                items: order_items,
            },
        });
    }

    Ok(ApiResponse::success(
        "Payment history",
        PaymentHistory { items },
        Some(Meta::empty()),
    ))
}

fn payment_from_entity(model: PaymentModel) -> Payment {
    Payment {
        id: model.id,
        order_id: model.order_id,
        payment_method: model.payment_method,
        amount: model.amount,
        transaction_id: model.transaction_id,
        payment_status: model.payment_status,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
