//! End-to-end storefront flows with latency switched off.

use apex_storefront::prelude::*;
use apex_trade::TRADE_SESSION_KEY;

fn open(cache: &Cache) -> Storefront {
    Storefront::open(cache.clone(), LatencyConfig::zero()).unwrap()
}

#[tokio::test]
async fn test_lookup_then_add_to_cart() {
    let cache = Cache::in_memory();
    let mut store = open(&cache);

    let found = store
        .vehicles()
        .lookup_with_parts(&Vrm::parse("ab12cde"))
        .await
        .unwrap();
    let part = found.parts[0].clone();

    store.add_part(&part.part_number, 2).unwrap();
    assert_eq!(store.cart().item_count(), 2);
    assert!(store.cart().is_open());
    assert_eq!(store.cart().subtotal(), part.price * 2);
}

#[tokio::test]
async fn test_lookup_in_scoped_task() {
    let store = open(&Cache::in_memory());
    let vehicles = store.vehicles();

    let task = ScopedTask::spawn(async move { vehicles.lookup_vehicle(&Vrm::parse("YN19 ABC")).await });
    let vehicle = task.join().await.unwrap().unwrap();
    assert_eq!(vehicle.engine_code, "DETA");
}

#[tokio::test]
async fn test_unknown_part_number() {
    let mut store = open(&Cache::in_memory());
    let err = store.add_part("NOPE-1", 1).unwrap_err();
    assert!(matches!(err, StorefrontError::PartNotFound(_)));
    assert!(store.cart().is_empty());
}

#[tokio::test]
async fn test_trade_login_switches_to_ex_vat() {
    let cache = Cache::in_memory();
    let mut store = open(&cache);
    assert!(store.cart().show_vat());
    assert_eq!(store.trade_access(), RouteAccess::Redirect("/trade/login"));

    let account = store.login("trade@apexmotors.co.uk", "trade123").await.unwrap();
    assert_eq!(account.account_number, "APX-78432");
    assert!(!store.cart().show_vat());
    assert!(store.trade_access().is_allowed());

    // The user may switch back; staying signed in does not override it.
    store.cart_mut().set_show_vat(true);
    assert!(store.cart().show_vat());
}

#[tokio::test]
async fn test_restored_trade_session_defaults_to_ex_vat() {
    let cache = Cache::in_memory();
    {
        let mut store = open(&cache);
        store.login("demo@garage.com", "demo123").await.unwrap();
    }

    let store = open(&cache);
    assert!(store.session().is_authenticated());
    assert!(!store.cart().show_vat());
}

#[tokio::test]
async fn test_failed_login() {
    let mut store = open(&Cache::in_memory());
    let err = store.login("demo@garage.com", "nope").await.unwrap_err();
    assert!(matches!(err, StorefrontError::Trade(ref e) if e.is_auth_failure()));
    assert!(store.trade_user().is_none());
    assert!(store.cart().show_vat());
}

#[tokio::test]
async fn test_logout_clears_session_record() {
    let cache = Cache::in_memory();
    let mut store = open(&cache);
    store.login("demo@garage.com", "demo123").await.unwrap();

    store.logout().unwrap();
    assert!(!cache.exists(TRADE_SESSION_KEY).unwrap());
    assert_eq!(store.trade_access(), RouteAccess::Redirect("/trade/login"));
}

#[tokio::test]
async fn test_guest_checkout() {
    let cache = Cache::in_memory();
    let mut store = open(&cache);
    store.add_part("P659", 1).unwrap();
    let cart_total = store.cart().total();

    let order = store.checkout(DeliveryMethod::Express).await.unwrap();
    assert!(order.number.as_str().starts_with("APX-"));
    assert_eq!(order.payment_terms, PaymentTerms::PayOnOrder);
    assert_eq!(order.summary.total, cart_total + Money::gbp(719));
    assert!(order.trade_account.is_none());

    assert!(store.cart().is_empty());
    let stored: Vec<LineItem> = cache.get(CART_STORAGE_KEY).unwrap().unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_trade_checkout_on_account() {
    let mut store = open(&Cache::in_memory());
    store.login("trade@apexmotors.co.uk", "trade123").await.unwrap();
    store.add_part("P659", 1).unwrap();

    let order = store.checkout(DeliveryMethod::Collection).await.unwrap();
    assert_eq!(order.payment_terms, PaymentTerms::TradeAccount { days: 30 });
    assert_eq!(order.trade_account.unwrap().as_str(), "TRD-001");
    // Ex. VAT display: the order total is the net subtotal.
    assert_eq!(order.summary.total, order.summary.subtotal);
}

#[tokio::test]
async fn test_checkout_empty_cart() {
    let mut store = open(&Cache::in_memory());
    let err = store.checkout(DeliveryMethod::Standard).await.unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Commerce(CommerceError::EmptyCart)
    ));
}

#[tokio::test]
async fn test_file_backed_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = Storefront::open(Cache::open(dir.path()).unwrap(), LatencyConfig::zero()).unwrap();
        store.add_part("P659", 3).unwrap();
    }

    let store = Storefront::open(Cache::open(dir.path()).unwrap(), LatencyConfig::zero()).unwrap();
    assert_eq!(store.cart().item_count(), 3);
    assert!(!store.cart().is_open());
}
