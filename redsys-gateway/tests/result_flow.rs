use std::{collections::HashMap, convert::Infallible, sync::Mutex};

use redsys_core::{
    encrypter,
    errors::Error as Redsys,
    signature::Signature,
    types::{MerchantParameters, MerchantSecret, Record, fields},
};
use redsys_gateway::{
    bridge::{PaymentBridge, PaymentEventDispatcher, PaymentOrder},
    config::{REDSYS_TEST_URL, RedsysConfig},
    errors::Error,
    manager::RedsysManager,
    method::RedsysMethod,
    routes::{RedirectionRoute, RedsysRoutes},
};
use url_macro::url;

const SECRET: &str = "sq7HjrUOBfKmC576ILgskD5srU870gJ7";

#[derive(Default)]
struct MemoryBridge {
    current: Option<PaymentOrder>,
    orders: HashMap<u64, PaymentOrder>,
    lookups: Mutex<Vec<u64>>,
}

impl MemoryBridge {
    fn with_order(order: PaymentOrder) -> Self {
        let id = order.id.parse().unwrap();
        MemoryBridge {
            current: Some(order.clone()),
            orders: HashMap::from([(id, order)]),
            lookups: Mutex::default(),
        }
    }

    fn lookups(&self) -> Vec<u64> {
        self.lookups.lock().unwrap().clone()
    }
}

impl PaymentBridge for MemoryBridge {
    type Error = Infallible;

    fn order(&self) -> Option<PaymentOrder> {
        self.current.clone()
    }

    async fn find_order(&self, order_id: u64) -> Result<Option<PaymentOrder>, Infallible> {
        self.lookups.lock().unwrap().push(order_id);
        Ok(self.orders.get(&order_id).cloned())
    }
}

#[derive(Default)]
struct Recorder(Mutex<Vec<(&'static str, Option<String>)>>);

impl Recorder {
    fn record(&self, event: &'static str, method: &RedsysMethod) {
        self.0.lock().unwrap().push((event, method.ds_order()));
    }

    fn events(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().iter().map(|(e, _)| *e).collect()
    }
}

impl PaymentEventDispatcher<MemoryBridge> for Recorder {
    type Error = Infallible;

    async fn on_order_load(&self, _: &MemoryBridge, m: &RedsysMethod) -> Result<(), Infallible> {
        self.record("load", m);
        Ok(())
    }

    async fn on_order_created(&self, _: &MemoryBridge, m: &RedsysMethod) -> Result<(), Infallible> {
        self.record("created", m);
        Ok(())
    }

    async fn on_order_done(&self, _: &MemoryBridge, m: &RedsysMethod) -> Result<(), Infallible> {
        self.record("done", m);
        Ok(())
    }

    async fn on_order_success(&self, _: &MemoryBridge, m: &RedsysMethod) -> Result<(), Infallible> {
        self.record("success", m);
        Ok(())
    }

    async fn on_order_fail(&self, _: &MemoryBridge, m: &RedsysMethod) -> Result<(), Infallible> {
        self.record("fail", m);
        Ok(())
    }
}

type Manager = RedsysManager<MemoryBridge, Recorder, RedsysRoutes>;

fn manager(bridge: MemoryBridge) -> Manager {
    RedsysManager::builder()
        .config(
            RedsysConfig::builder()
                .merchant_code("999008881")
                .secret_key(SECRET)
                .url(REDSYS_TEST_URL.parse().unwrap())
                .build(),
        )
        .routes(
            RedsysRoutes::builder()
                .merchant_url(url!("https://shop.example/redsys/result"))
                .ok(RedirectionRoute::builder()
                    .route(url!("https://shop.example/ok"))
                    .append(true)
                    .build())
                .ko(RedirectionRoute::builder()
                    .route(url!("https://shop.example/ko"))
                    .build())
                .build(),
        )
        .bridge(bridge)
        .dispatcher(Recorder::default())
        .build()
}

fn order_42() -> PaymentOrder {
    PaymentOrder::builder()
        .id("42")
        .amount("10.00")
        .currency("EUR")
        .build()
}

/// Start a payment, then answer it the way Redsys does.
async fn checkout_and_notify(manager: &Manager, response: &str) -> Record<String> {
    let form = manager.process_payment().await.unwrap();
    let [_, (_, blob), _] = form.fields();
    let sent = encrypter::decode(blob).unwrap();

    let notification = MerchantParameters::new()
        .with("Ds_Date", "19/10/2026")
        .with("Ds_Hour", "12:00")
        .with("Ds_Amount", sent.text(fields::MERCHANT_AMOUNT).unwrap())
        .with("Ds_Currency", sent.text(fields::MERCHANT_CURRENCY).unwrap())
        .with(fields::ORDER, sent.text(fields::MERCHANT_ORDER).unwrap())
        .with("Ds_MerchantCode", "999008881")
        .with("Ds_Terminal", "1")
        .with(fields::RESPONSE, response);

    let signature = Signature::for_result(&notification, &MerchantSecret::new(SECRET)).unwrap();
    let blob = encrypter::encode(&notification).unwrap();

    Record::from([
        (fields::MERCHANT_PARAMETERS.to_string(), encrypter::denormalize(blob.as_str())),
        (fields::SIGNATURE.to_string(), signature.denormalized()),
        (fields::SIGNATURE_VERSION.to_string(), "HMAC_SHA256_V1".to_string()),
    ])
}

#[tokio::test]
async fn test_end_to_end_success() {
    let manager = manager(MemoryBridge::with_order(order_42()));
    let posted = checkout_and_notify(&manager, "00").await;

    let outcome = manager.process_result(posted).await.unwrap();

    assert_eq!(outcome.order, order_42());
    assert_eq!(outcome.response_code, 0);
    assert!(outcome.method.is_transaction_successful());
    assert_eq!(manager.bridge.lookups(), vec![42]);
    assert_eq!(
        manager.dispatcher.events(),
        vec!["load", "created", "done", "success"]
    );

    // Hooks of the result flow see the decoded notification.
    let recorded = manager.dispatcher.0.lock().unwrap();
    let (_, ds_order) = &recorded[2];
    assert!(ds_order.as_deref().is_some_and(|o| o.starts_with("0042T")));
}

#[tokio::test]
async fn test_end_to_end_tampered_signature() {
    let manager = manager(MemoryBridge::with_order(order_42()));
    let mut posted = checkout_and_notify(&manager, "00").await;

    let signature = posted.get_mut(fields::SIGNATURE).unwrap();
    let flipped = if signature.starts_with('A') { "B" } else { "A" };
    signature.replace_range(0..1, flipped);

    let err = manager.process_result(posted).await.unwrap_err();

    assert!(matches!(err, Error::Redsys(Redsys::InvalidSignature)));
    assert!(manager.bridge.lookups().is_empty());
    assert_eq!(manager.dispatcher.events(), vec!["load", "created"]);
}

#[tokio::test]
async fn test_end_to_end_missing_signature_version() {
    let manager = manager(MemoryBridge::with_order(order_42()));
    let mut posted = checkout_and_notify(&manager, "00").await;
    posted.remove(fields::SIGNATURE_VERSION);

    let err = manager.process_result(posted).await.unwrap_err();

    match err {
        Error::Redsys(Redsys::MissingParameters(missing)) => {
            assert_eq!(missing, vec!["Ds_SignatureVersion".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(manager.bridge.lookups().is_empty());
    assert_eq!(manager.dispatcher.events(), vec!["load", "created"]);
}

#[tokio::test]
async fn test_end_to_end_refused_payment() {
    let manager = manager(MemoryBridge::with_order(order_42()));
    let posted = checkout_and_notify(&manager, "0190").await;

    let err = manager.process_result(posted).await.unwrap_err();

    assert!(matches!(
        err,
        Error::PaymentFailed {
            response_code: Some(190)
        }
    ));
    assert_eq!(err.status(), http::StatusCode::PAYMENT_REQUIRED);
    assert_eq!(
        manager.dispatcher.events(),
        vec!["load", "created", "done", "fail"]
    );
}

#[tokio::test]
async fn test_notification_for_unknown_order() {
    let paying = manager(MemoryBridge::with_order(order_42()));
    let posted = checkout_and_notify(&paying, "00").await;

    let other = manager(MemoryBridge::default());
    let err = other.process_result(posted).await.unwrap_err();

    assert!(matches!(err, Error::OrderNotFound));
    assert_eq!(other.bridge.lookups(), vec![42]);
    assert!(other.dispatcher.events().is_empty());
}

#[tokio::test]
async fn test_process_payment_without_order() {
    let manager = manager(MemoryBridge::default());

    let err = manager.process_payment().await.unwrap_err();

    assert!(matches!(err, Error::OrderNotFound));
    assert_eq!(manager.dispatcher.events(), vec!["load"]);
}
