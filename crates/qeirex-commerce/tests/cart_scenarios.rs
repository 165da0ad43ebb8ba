//! End-to-end cart scenarios as the storefront drives them.

use qeirex_commerce::prelude::*;

fn input(id: &str, dollars: f64) -> LineInput {
    LineInput::new(id, id, Money::from_decimal(dollars))
}

#[test]
fn repeat_add_ignores_new_price() {
    let mut store = CartStore::new();
    store.add(input("p1", 10.0));
    store.add(input("p1", 999.0));

    assert_eq!(store.line_count(), 1);
    let line = &store.items()[0];
    assert_eq!(line.id.as_str(), "p1");
    assert_eq!(line.price, Money::from_decimal(10.0));
    assert_eq!(line.quantity, 2);
    assert_eq!(store.total(), Money::from_decimal(20.0));
}

#[test]
fn update_quantity_recomputes_total() {
    let mut store = CartStore::new();
    store.add(input("p1", 5.0));
    store.add(input("p2", 7.0));
    store.update_quantity(&ProductId::new("p1"), 3);

    assert_eq!(store.total(), Money::from_decimal(22.0));
}

#[test]
fn clear_after_any_state() {
    let mut store = CartStore::new();
    store.add(input("p1", 5.0));
    store.add(input("p2", 7.0));
    store.toggle_open();
    store.clear();

    assert!(store.items().is_empty());
    assert_eq!(store.total(), Money::zero());
    assert!(store.is_open());
}

#[test]
fn item_count_differs_from_line_count() {
    let mut store = CartStore::new();
    store.add(input("p1", 1.0));
    store.add(input("p1", 1.0));
    store.add(input("p2", 1.0));

    assert_eq!(store.item_count(), 3);
    assert_eq!(store.line_count(), 2);
}

#[test]
fn product_card_adds_and_opens_cart() {
    let catalog = Catalog::featured();
    let handle = CartHandle::default();

    let navbar_badge = std::rc::Rc::new(std::cell::RefCell::new(None::<String>));
    let sink = std::rc::Rc::clone(&navbar_badge);
    handle.subscribe(move |state| {
        *sink.borrow_mut() = state.summary(Money::zero()).badge();
    });

    for id in ["prod_5", "prod_1", "prod_5"] {
        let input = catalog.line_input(&ProductId::new(id)).unwrap();
        handle.dispatch(CartAction::Add(input));
        handle.dispatch(CartAction::Open);
    }

    let state = handle.state();
    assert!(state.is_open());
    assert_eq!(state.item_count(), 3);
    assert_eq!(state.total().display(), "$86.97");
    assert_eq!(navbar_badge.borrow().as_deref(), Some("3"));

    let summary = state.summary(qeirex_commerce::cart::DEFAULT_FREE_SHIPPING_THRESHOLD);
    assert!(summary.qualifies_for_free_shipping);
}

#[test]
fn replayed_actions_match_direct_calls() {
    let json = r#"[
        {"type": "add", "id": "prod_2", "name": "Espresso Blend", "price": 23.99},
        {"type": "add", "id": "prod_8", "name": "Calming Mix", "price": 26.99},
        {"type": "add", "id": "prod_2", "name": "Espresso Blend", "price": 23.99},
        {"type": "update_quantity", "id": "prod_8", "quantity": 0},
        {"type": "toggle_open"}
    ]"#;
    let actions: Vec<CartAction> = serde_json::from_str(json).unwrap();

    let mut replayed = CartStore::new();
    let mut validated_store = CartStore::new();
    let mut validated = ValidatingCart::new(&mut validated_store, ValidationRules::default());
    for action in actions {
        validated.dispatch(action.clone()).unwrap();
        replayed.dispatch(action);
    }

    assert_eq!(replayed.state(), validated_store.state());
    assert_eq!(replayed.item_count(), 2);
    assert_eq!(replayed.total(), Money::new(4798));
    assert!(replayed.is_open());
}

#[test]
fn saved_cart_survives_a_new_session() {
    let dir = tempfile::tempdir().unwrap();
    let key = qeirex_commerce::snapshot_key!("cart", "guest");

    let mut first = CartStore::new();
    first.add(input("prod_4", 26.99));
    first.update_quantity(&ProductId::new("prod_4"), 4);
    FileSnapshotStore::new(dir.path())
        .save(&key, &first.snapshot())
        .unwrap();

    let snapshots = FileSnapshotStore::new(dir.path());
    let mut second = CartStore::new();
    second.hydrate(snapshots.load(&key).unwrap().unwrap()).unwrap();

    assert_eq!(second.items(), first.items());
    assert_eq!(second.total(), Money::new(10796));
}
