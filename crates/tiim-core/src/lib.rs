pub mod app_config;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod map;
pub mod messages;
pub mod models;
pub mod search;

pub use app_config::{AppConfig, Environment};
pub use cart::{Cart, CartLine};
pub use checkout::{build_order_request, CheckoutFlow, CheckoutForm, CheckoutState};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use map::{MapView, Marker};
pub use models::{
    Coordinate, DeliveryMethod, InventoryResult, OrderItem, OrderRequest, OrderResult, Pharmacy,
};
pub use search::{SearchPanel, SearchQuery, SearchToken};
