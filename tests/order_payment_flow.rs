use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use storefront_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::orders::{CreateOrderRequest, OrderItemRequest},
    dto::payments::CreatePaymentRequest,
    entity::{
        orders::{Column as OrderCol, Entity as Orders},
        order_items::{Column as OrderItemCol, Entity as OrderItems},
        products::ActiveModel as ProductActive,
        users::ActiveModel as UserActive,
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::{PaymentMethod, PaymentStatus},
    routes::params::Pagination,
    services::{order_service, payment_service},
    state::AppState,
};
use uuid::Uuid;

// Integration flow: user orders two products, pays once, and sees exactly
// that payment in the history. Requires a Postgres instance.
#[tokio::test]
async fn order_and_payment_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    let user_a = create_user(&state, "a@example.com", "user_a").await?;
    let user_b = create_user(&state, "b@example.com", "user_b").await?;
    let auth_a = AuthUser { user_id: user_a };
    let auth_b = AuthUser { user_id: user_b };

    let p1 = create_product(&state, "Product P1", 1000).await?;
    let p2 = create_product(&state, "Product P2", 500).await?;

    // Create an order: 2 units of P1, 1 unit of P2.
    let resp = order_service::create_order(
        &state,
        &auth_a,
        CreateOrderRequest {
            items: vec![
                OrderItemRequest {
                    product_id: p1,
                    quantity: 2,
                },
                OrderItemRequest {
                    product_id: p2,
                    quantity: 1,
                },
            ],
        },
    )
    .await?;
    let created = resp.data.unwrap();
    assert_eq!(created.items.len(), 2);
    let q1 = created
        .items
        .iter()
        .find(|i| i.product_id == p1)
        .expect("P1 line");
    assert_eq!(q1.quantity, 2);
    let q2 = created
        .items
        .iter()
        .find(|i| i.product_id == p2)
        .expect("P2 line");
    assert_eq!(q2.quantity, 1);

    // Exactly one order and two item rows were persisted.
    assert_eq!(count_orders(&state, user_a).await?, 1);
    assert_eq!(count_items(&state, created.order.id).await?, 2);

    // A missing product aborts the whole order; nothing extra is persisted.
    let err = order_service::create_order(
        &state,
        &auth_a,
        CreateOrderRequest {
            items: vec![
                OrderItemRequest {
                    product_id: p1,
                    quantity: 1,
                },
                OrderItemRequest {
                    product_id: Uuid::new_v4(),
                    quantity: 1,
                },
            ],
        },
    )
    .await
    .expect_err("missing product must fail");
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(count_orders(&state, user_a).await?, 1);

    // Zero quantity is a validation error.
    let err = order_service::create_order(
        &state,
        &auth_a,
        CreateOrderRequest {
            items: vec![OrderItemRequest {
                product_id: p1,
                quantity: 0,
            }],
        },
    )
    .await
    .expect_err("zero quantity must fail");
    assert!(matches!(err, AppError::Validation(_)));

    // Order listing is scoped to the owner.
    let mine = order_service::list_my_orders(&state, &auth_a, default_page()).await?;
    assert_eq!(mine.data.unwrap().items.len(), 1);
    let theirs = order_service::list_my_orders(&state, &auth_b, default_page()).await?;
    assert!(theirs.data.unwrap().items.is_empty());

    // Pay for the order: 2 * 10.00 + 1 * 5.00 in minor units.
    let pay = payment_service::create_payment(
        &state,
        &auth_a,
        CreatePaymentRequest {
            order: created.order.id,
            payment_method: PaymentMethod::Card,
            amount: 2500,
            transaction_id: Some("txn-0001".into()),
        },
    )
    .await?;
    let payment = pay.data.unwrap();
    assert_eq!(payment.status, PaymentStatus::Pending);

    // A second payment for the same order is a conflict.
    let err = payment_service::create_payment(
        &state,
        &auth_a,
        CreatePaymentRequest {
            order: created.order.id,
            payment_method: PaymentMethod::Cod,
            amount: 2500,
            transaction_id: None,
        },
    )
    .await
    .expect_err("duplicate payment must fail");
    assert!(matches!(err, AppError::Conflict(_)));

    // Paying for a missing order is NotFound.
    let err = payment_service::create_payment(
        &state,
        &auth_a,
        CreatePaymentRequest {
            order: Uuid::new_v4(),
            payment_method: PaymentMethod::Wallet,
            amount: 100,
            transaction_id: None,
        },
    )
    .await
    .expect_err("missing order must fail");
    assert!(matches!(err, AppError::NotFound(_)));

    // History shows the payment to its owner only, with the order nested.
    let history = payment_service::list_payment_history(&state, &auth_a).await?;
    let history = history.data.unwrap();
    assert_eq!(history.items.len(), 1);
    let entry = &history.items[0];
    assert_eq!(entry.payment.id, payment.payment_id);
    assert_eq!(entry.payment.amount, 2500);
    assert_eq!(entry.order.order.id, created.order.id);
    assert_eq!(entry.order.items.len(), 2);

    let empty = payment_service::list_payment_history(&state, &auth_b).await?;
    assert!(empty.data.unwrap().items.is_empty());

    Ok(())
}

fn default_page() -> Pagination {
    Pagination {
        page: Some(1),
        per_page: Some(20),
    }
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    run_migrations(&pool).await?;
    let orm = create_orm_conn(database_url).await?;

    // Clean tables between runs
    sqlx::query(
        "TRUNCATE TABLE payments, order_items, orders, audit_logs, products, users CASCADE",
    )
    .execute(&pool)
    .await?;

    Ok(AppState { pool, orm })
}

async fn create_user(state: &AppState, email: &str, username: &str) -> anyhow::Result<Uuid> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        username: Set(username.to_string()),
        password_hash: Set("dummy".into()),
        is_active: Set(true),
        is_admin: Set(false),
        is_staff: Set(false),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(user.id)
}

async fn create_product(state: &AppState, name: &str, price: i64) -> anyhow::Result<Uuid> {
    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        description: Set(Some("A product for testing".into())),
        price: Set(price),
        image_url: Set(None),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(product.id)
}

async fn count_orders(state: &AppState, user_id: Uuid) -> anyhow::Result<u64> {
    Ok(Orders::find()
        .filter(OrderCol::UserId.eq(user_id))
        .count(&state.orm)
        .await?)
}

async fn count_items(state: &AppState, order_id: Uuid) -> anyhow::Result<u64> {
    Ok(OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order_id))
        .count(&state.orm)
        .await?)
}
