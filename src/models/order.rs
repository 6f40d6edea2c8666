//! Delivery orders.

use serde::{Deserialize, Serialize};

/// A delivery order placed at a known location.
///
/// # Examples
///
/// ```
/// use courier_routing::models::Order;
///
/// let order = Order::new("P1", "Market");
/// assert_eq!(order.id(), "P1");
/// assert_eq!(order.location_id(), "Market");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    id: String,
    location_id: String,
}

impl Order {
    /// Creates an order for delivery at `location_id`.
    pub fn new(id: impl Into<String>, location_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location_id: location_id.into(),
        }
    }

    /// Order identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Identifier of the delivery location.
    pub fn location_id(&self) -> &str {
        &self.location_id
    }
}
