use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::orders::OrderWithItems;
use crate::models::{Payment, PaymentMethod, PaymentStatus};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    /// Id of the order being paid for.
    pub order: Uuid,
    pub payment_method: PaymentMethod,
    pub amount: i64,
    pub transaction_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentCreated {
    pub payment_id: Uuid,
    pub status: PaymentStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentWithOrder {
    #[serde(flatten)]
    pub payment: Payment,
    pub order: OrderWithItems,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentHistory {
    pub items: Vec<PaymentWithOrder>,
}
