pub mod order_items;
pub mod orders;
pub mod payments;
pub mod products;
pub mod users;

pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use payments::Entity as Payments;
pub use products::Entity as Products;
pub use users::Entity as Users;
