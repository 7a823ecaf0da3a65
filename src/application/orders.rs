use crate::domain::order::{Attributes, Lifecycle, ORDER_ID, Order};
use crate::domain::ports::{KeyValueStoreBox, SetMode};
use crate::error::{PagadorError, Result};
use tracing::debug;

/// Prefix of every order key in the backing store.
pub const KEY_PREFIX: &str = "fake-braspag.order.";

/// Persists [`Order`]s in a [`KeyValueStore`](crate::domain::ports::KeyValueStore).
///
/// Creation and updates are conditional writes, so the store decides which of
/// several concurrent creators of the same order id wins.
pub struct OrderRepository {
    store: KeyValueStoreBox,
}

impl OrderRepository {
    pub fn new(store: KeyValueStoreBox) -> Self {
        Self { store }
    }

    pub fn key_for(id: &str) -> String {
        format!("{KEY_PREFIX}{id}")
    }

    /// Builds an order from `attributes` and stores it if no order with the
    /// same id exists.
    ///
    /// Returns `None` when the id is already taken; the stored order is left untouched.
    pub async fn create(&self, attributes: Attributes) -> Result<Option<Order>> {
        let mut order = Order::new(attributes);
        if self.save(&mut order).await? {
            Ok(Some(order))
        } else {
            Ok(None)
        }
    }

    /// Fails with [`PagadorError::NotFound`] when no order is stored under `id`.
    pub async fn find(&self, id: &str) -> Result<Order> {
        let attributes = self.load(id).await?;
        Ok(Order::from_stored(attributes))
    }

    /// Like [`find`](Self::find) but returns `None` for a missing order.
    pub async fn find_optional(&self, id: &str) -> Result<Option<Order>> {
        match self.find(id).await {
            Ok(order) => Ok(Some(order)),
            Err(PagadorError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Writes `order` to the store.
    ///
    /// A transient order is created (fails if the id exists); a persisted one
    /// is updated (fails if the record is gone). Returns whether the write
    /// happened.
    pub async fn save(&self, order: &mut Order) -> Result<bool> {
        let id = order.order_id().ok_or(PagadorError::MissingOrderId)?;
        let mode = match order.lifecycle() {
            Lifecycle::Transient => SetMode::CreateOnly,
            Lifecycle::Persisted => SetMode::UpdateOnly,
        };
        let value = serde_json::to_vec(order.attributes())?;

        let written = self.store.set(&Self::key_for(id), value, mode).await?;
        debug!(order_id = id, ?mode, written, "saved order");

        if written {
            order.mark_persisted();
        }
        Ok(written)
    }

    /// Marks `order` captured and saves it.
    pub async fn capture(&self, order: &mut Order) -> Result<bool> {
        order.mark_captured();
        self.save(order).await
    }

    /// Replaces the attributes of `order` with the stored ones.
    pub async fn reload(&self, order: &mut Order) -> Result<()> {
        let id = order.order_id().ok_or(PagadorError::MissingOrderId)?;
        let attributes = self.load(id).await?;
        order.replace_attributes(attributes);
        Ok(())
    }

    /// Number of stored orders.
    pub async fn count(&self) -> Result<usize> {
        Ok(self.store.keys(KEY_PREFIX).await?.len())
    }

    /// Removes every stored order, returning how many were removed.
    pub async fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        for key in self.store.keys(KEY_PREFIX).await? {
            if self.store.delete(&key).await? {
                removed += 1;
            }
        }
        debug!(removed, "cleared orders");
        Ok(removed)
    }

    async fn load(&self, id: &str) -> Result<Attributes> {
        let bytes = self
            .store
            .get(&Self::key_for(id))
            .await?
            .ok_or_else(|| PagadorError::NotFound(id.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Convenience for building [`Attributes`] from string pairs.
pub fn attributes<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Attributes {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Attributes of a fresh order with the given id.
pub fn order_attributes(order_id: &str) -> Attributes {
    attributes([(ORDER_ID, order_id)])
}
