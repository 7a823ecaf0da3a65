use crate::application::orders::{OrderRepository, attributes};
use crate::domain::decision::{self, AuthorizeDecision, CaptureDecision};
use crate::domain::ledger::RequestLedger;
use crate::domain::order::{AMOUNT, CARD_NUMBER, ORDER_ID};
use crate::domain::ports::KeyValueStoreBox;
use crate::error::Result;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// The fake processor as a client of it sees it.
///
/// `PaymentGateway` owns the request ledger and the order store. The ledger
/// sits behind a mutex so each call reads and updates it as one step, even
/// when requests are served from several tasks.
pub struct PaymentGateway {
    ledger: Mutex<RequestLedger>,
    orders: OrderRepository,
}

impl PaymentGateway {
    /// Creates a new `PaymentGateway` with an empty ledger.
    ///
    /// # Arguments
    ///
    /// * `order_store` - The key-value store orders are persisted in.
    pub fn new(order_store: KeyValueStoreBox) -> Self {
        Self {
            ledger: Mutex::new(RequestLedger::new()),
            orders: OrderRepository::new(order_store),
        }
    }

    /// Handles an authorize call.
    ///
    /// An authorized order is also created in the order store; a second
    /// authorization for an id that is already stored keeps the first record.
    /// The ledger is only updated once the order write succeeded, so a failed
    /// call leaves nothing to capture.
    pub async fn authorize(
        &self,
        card_number: &str,
        order_id: &str,
        amount: &str,
    ) -> Result<AuthorizeDecision> {
        let decision = decision::decide_authorize(card_number);
        info!(
            order_id,
            succeeded = decision.succeeded,
            status = decision.status.code(),
            "authorize"
        );

        if decision.succeeded {
            let created = self
                .orders
                .create(attributes([
                    (ORDER_ID, order_id),
                    (CARD_NUMBER, card_number),
                    (AMOUNT, amount),
                ]))
                .await?;
            match created {
                Some(mut order) if decision.captured => {
                    self.orders.capture(&mut order).await?;
                }
                Some(_) => {}
                None => warn!(order_id, "order already exists, keeping stored record"),
            }
        }

        let mut ledger = self.ledger.lock().await;
        decision::record_authorize(&mut ledger, &decision, card_number, order_id, amount);
        Ok(decision)
    }

    /// Handles a capture call.
    pub async fn capture(&self, order_id: &str) -> Result<CaptureDecision> {
        let decision = {
            let mut ledger = self.ledger.lock().await;
            decision::capture(&mut ledger, order_id)
        };
        info!(
            order_id,
            succeeded = decision.succeeded,
            status = decision.status.map(|s| s.code()).unwrap_or(""),
            "capture"
        );

        if decision.succeeded {
            match self.orders.find_optional(order_id).await? {
                Some(mut order) => {
                    if !self.orders.capture(&mut order).await? {
                        warn!(order_id, "order vanished before it could be captured");
                    }
                }
                None => warn!(order_id, "captured order has no stored record"),
            }
        }

        Ok(decision)
    }

    /// Amount authorized for `order_id`, empty if never authorized.
    pub async fn amount_for(&self, order_id: &str) -> String {
        let ledger = self.ledger.lock().await;
        decision::amount_for(&ledger, order_id)
    }

    /// Captured order ids in capture order.
    pub async fn captured(&self) -> Vec<String> {
        self.ledger.lock().await.captured().to_vec()
    }

    pub async fn clear_authorized(&self) {
        self.ledger.lock().await.clear_authorized();
    }

    pub async fn clear_captured(&self) {
        self.ledger.lock().await.clear_captured();
    }

    pub async fn clear_orders(&self) -> Result<usize> {
        self.orders.clear().await
    }

    /// Clears both ledgers and every stored order.
    pub async fn reset(&self) -> Result<()> {
        {
            let mut ledger = self.ledger.lock().await;
            ledger.clear_authorized();
            ledger.clear_captured();
        }
        let removed = self.clear_orders().await?;
        info!(removed, "reset");
        Ok(())
    }

    pub fn orders(&self) -> &OrderRepository {
        &self.orders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::CardProfile;
    use crate::domain::ports::{KeyValueStore, SetMode};
    use crate::domain::status::CaptureStatus;
    use crate::error::PagadorError;
    use crate::infrastructure::in_memory::InMemoryKeyValueStore;
    use async_trait::async_trait;

    struct UnavailableStore;

    #[async_trait]
    impl KeyValueStore for UnavailableStore {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Err(PagadorError::Storage("down".to_string()))
        }

        async fn set(&self, _key: &str, _value: Vec<u8>, _mode: SetMode) -> Result<bool> {
            Err(PagadorError::Storage("down".to_string()))
        }

        async fn keys(&self, _prefix: &str) -> Result<Vec<String>> {
            Err(PagadorError::Storage("down".to_string()))
        }

        async fn delete(&self, _key: &str) -> Result<bool> {
            Err(PagadorError::Storage("down".to_string()))
        }
    }

    fn gateway() -> PaymentGateway {
        PaymentGateway::new(Box::new(InMemoryKeyValueStore::new()))
    }

    #[tokio::test]
    async fn test_authorize_creates_masked_order() {
        let gateway = gateway();
        let card = CardProfile::CaptureOk.card_number();
        gateway.authorize(card, "1", "18,36").await.unwrap();

        let order = gateway.orders().find("1").await.unwrap();
        assert_eq!(order.card_number(), Some("************1678"));
        assert_eq!(order.amount(), Some("18.36"));
        assert!(!order.is_captured());
    }

    #[tokio::test]
    async fn test_denied_authorize_stores_nothing() {
        let gateway = gateway();
        let card = CardProfile::AuthorizeDenied.card_number();
        let decision = gateway.authorize(card, "1", "1").await.unwrap();

        assert!(!decision.succeeded);
        assert_eq!(gateway.orders().count().await.unwrap(), 0);
        assert_eq!(gateway.amount_for("1").await, "");
    }

    #[tokio::test]
    async fn test_capture_marks_order_captured() {
        let gateway = gateway();
        let card = CardProfile::CaptureOk.card_number();
        gateway.authorize(card, "1", "1").await.unwrap();
        let decision = gateway.capture("1").await.unwrap();

        assert!(decision.succeeded);
        assert_eq!(decision.status, Some(CaptureStatus::Captured));
        assert!(gateway.orders().find("1").await.unwrap().is_captured());
        assert_eq!(gateway.captured().await, vec!["1".to_string()]);
    }

    #[tokio::test]
    async fn test_authorize_and_capture_marks_order_at_authorize() {
        let gateway = gateway();
        let card = CardProfile::AuthorizeAndCaptureOk.card_number();
        gateway.authorize(card, "1", "1").await.unwrap();

        assert!(gateway.orders().find("1").await.unwrap().is_captured());
        assert_eq!(gateway.captured().await, vec!["1".to_string()]);
    }

    #[tokio::test]
    async fn test_reauthorize_keeps_first_order() {
        let gateway = gateway();
        gateway
            .authorize(CardProfile::AuthorizeOk.card_number(), "1", "1,00")
            .await
            .unwrap();
        gateway
            .authorize(CardProfile::CaptureOk.card_number(), "1", "2,00")
            .await
            .unwrap();

        // Ledger follows the latest call, the store keeps the first record
        assert_eq!(gateway.amount_for("1").await, "2.00");
        let order = gateway.orders().find("1").await.unwrap();
        assert_eq!(order.amount(), Some("1.00"));
        assert_eq!(gateway.orders().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_failed_authorize_leaves_ledger_untouched() {
        let gateway = PaymentGateway::new(Box::new(UnavailableStore));
        let card = CardProfile::AuthorizeAndCaptureOk.card_number();

        let result = gateway.authorize(card, "1", "10,00").await;
        assert!(matches!(result, Err(PagadorError::Storage(_))));

        assert_eq!(gateway.amount_for("1").await, "");
        assert!(gateway.captured().await.is_empty());
        let decision = gateway.capture("1").await.unwrap();
        assert!(!decision.succeeded);
        assert_eq!(decision.status, None);
    }

    #[tokio::test]
    async fn test_denied_authorize_skips_the_store() {
        let gateway = PaymentGateway::new(Box::new(UnavailableStore));
        let card = CardProfile::AuthorizeDenied.card_number();

        let decision = gateway.authorize(card, "1", "1").await.unwrap();
        assert!(!decision.succeeded);
    }

    #[tokio::test]
    async fn test_reset() {
        let gateway = gateway();
        gateway
            .authorize(CardProfile::AuthorizeAndCaptureOk.card_number(), "1", "1")
            .await
            .unwrap();
        gateway.reset().await.unwrap();

        assert!(gateway.captured().await.is_empty());
        assert_eq!(gateway.amount_for("1").await, "");
        assert_eq!(gateway.orders().count().await.unwrap(), 0);

        let decision = gateway.capture("1").await.unwrap();
        assert_eq!(decision.status, None);
    }

    #[tokio::test]
    async fn test_partial_clears() {
        let gateway = gateway();
        gateway
            .authorize(CardProfile::CaptureOk.card_number(), "1", "1")
            .await
            .unwrap();
        gateway.capture("1").await.unwrap();

        gateway.clear_captured().await;
        assert!(gateway.captured().await.is_empty());
        assert_eq!(gateway.amount_for("1").await, "1");

        gateway.clear_authorized().await;
        assert_eq!(gateway.amount_for("1").await, "");
        assert_eq!(gateway.orders().count().await.unwrap(), 1);
    }
}
