//! Order lifecycle allow-list checks against the library API.

use marketplace_api::database::schema::types::OrderStatus;

#[test]
fn happy_path_walks_every_forward_transition() {
    let path = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    for pair in path.windows(2) {
        assert!(
            pair[0].can_transition_to(pair[1]),
            "{} -> {} should be allowed",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn cancellation_is_only_reachable_before_shipping() {
    assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
    assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Cancelled));
    assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Cancelled));
    assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Cancelled));
}

#[test]
fn terminal_statuses_reject_everything() {
    let all = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    for next in all {
        assert!(!OrderStatus::Delivered.can_transition_to(next));
        assert!(!OrderStatus::Cancelled.can_transition_to(next));
    }
}

#[test]
fn no_skipping_ahead() {
    assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Shipped));
    assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Delivered));
    assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Delivered));
}

#[test]
fn statuses_serialize_uppercase_on_the_wire() {
    let json = serde_json::to_string(&OrderStatus::Pending).unwrap();
    assert_eq!(json, "\"PENDING\"");

    let parsed: OrderStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
    assert_eq!(parsed, OrderStatus::Cancelled);
}
