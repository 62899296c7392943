pub mod health;
pub mod lookup;

pub use health::health_handler;
pub use lookup::lookup_handler;
