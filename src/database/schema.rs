// SQL enum types shared between the models and the migrations.

pub mod types {
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use utoipa::ToSchema;

    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::Type, ToSchema)]
    #[sqlx(type_name = "user_role", rename_all = "lowercase")]
    #[serde(rename_all = "UPPERCASE")]
    pub enum UserRole {
        User,
        Admin,
    }

    impl fmt::Display for UserRole {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                UserRole::User => write!(f, "user"),
                UserRole::Admin => write!(f, "admin"),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
    #[sqlx(type_name = "order_status", rename_all = "lowercase")]
    #[serde(rename_all = "UPPERCASE")]
    pub enum OrderStatus {
        Pending,
        Confirmed,
        Shipped,
        Delivered,
        Cancelled,
    }

    impl OrderStatus {
        /// Allowed next statuses. Delivered and cancelled are terminal.
        pub fn allowed_transitions(&self) -> &'static [OrderStatus] {
            match self {
                OrderStatus::Pending => &[OrderStatus::Confirmed, OrderStatus::Cancelled],
                OrderStatus::Confirmed => &[OrderStatus::Shipped, OrderStatus::Cancelled],
                OrderStatus::Shipped => &[OrderStatus::Delivered],
                OrderStatus::Delivered | OrderStatus::Cancelled => &[],
            }
        }

        pub fn can_transition_to(&self, next: OrderStatus) -> bool {
            self.allowed_transitions().contains(&next)
        }

        pub fn is_terminal(&self) -> bool {
            self.allowed_transitions().is_empty()
        }
    }

    impl fmt::Display for OrderStatus {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                OrderStatus::Pending => write!(f, "pending"),
                OrderStatus::Confirmed => write!(f, "confirmed"),
                OrderStatus::Shipped => write!(f, "shipped"),
                OrderStatus::Delivered => write!(f, "delivered"),
                OrderStatus::Cancelled => write!(f, "cancelled"),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_order_status_transitions() {
            assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
            assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Confirmed));
            assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Cancelled));
            assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Shipped));
            assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered));

            // No re-entry and no skipping ahead
            assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Delivered));
            assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Cancelled));
            assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Shipped));
            assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Pending));
        }

        #[test]
        fn test_terminal_statuses() {
            assert!(OrderStatus::Delivered.is_terminal());
            assert!(OrderStatus::Cancelled.is_terminal());
            assert!(!OrderStatus::Pending.is_terminal());
            assert!(!OrderStatus::Shipped.is_terminal());
        }
    }
}
