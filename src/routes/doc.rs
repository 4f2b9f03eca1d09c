use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{AccessToken, LoginRequest, RefreshRequest, RegisterRequest, TokenPair},
        orders::{CreateOrderRequest, OrderItemRequest, OrderList, OrderWithItems},
        payments::{CreatePaymentRequest, PaymentCreated, PaymentHistory, PaymentWithOrder},
        products,
    },
    models::{Order, OrderItem, Payment, PaymentMethod, PaymentStatus, Product, User},
    response::{ApiResponse, Meta},
    routes::{auth, health, orders, params, payments, products as product_routes},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::refresh,
        product_routes::list_products,
        product_routes::get_product,
        orders::create_order,
        orders::my_orders,
        payments::create_payment,
        payments::payment_history
    ),
    components(
        schemas(
            User,
            Product,
            Order,
            OrderItem,
            Payment,
            PaymentMethod,
            PaymentStatus,
            RegisterRequest,
            LoginRequest,
            RefreshRequest,
            TokenPair,
            AccessToken,
            CreateOrderRequest,
            OrderItemRequest,
            OrderList,
            OrderWithItems,
            CreatePaymentRequest,
            PaymentCreated,
            PaymentWithOrder,
            PaymentHistory,
            products::ProductList,
            params::Pagination,
            Meta,
            ApiResponse<Product>,
            ApiResponse<products::ProductList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>,
            ApiResponse<PaymentCreated>,
            ApiResponse<PaymentHistory>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Payments", description = "Payment endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
