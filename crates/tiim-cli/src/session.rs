//! The single controller behind an interactive session.
//!
//! Owns every piece of view state (results, cart, checkout form state, the
//! transient message) and changes it only through the action handlers below.

use anyhow::Context;
use tiim_client::{ApiClient, ClientError};
use tiim_core::checkout::rejection_message;
use tiim_core::{
    messages, Cart, CheckoutFlow, CheckoutForm, Coordinate, InventoryResult, SearchPanel,
    SearchQuery,
};

use crate::geo::Geolocation;

pub(crate) struct Session {
    client: ApiClient,
    coordinates: Option<Coordinate>,
    search: SearchPanel,
    cart: Cart,
    checkout: CheckoutFlow,
    message: Option<String>,
}

impl Session {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self {
            client,
            coordinates: None,
            search: SearchPanel::new(),
            cart: Cart::new(),
            checkout: CheckoutFlow::new(),
            message: None,
        }
    }

    /// Looks the user up once. Later searches reuse the result; it is not
    /// refreshed.
    pub(crate) async fn mount(&mut self, geo: &Geolocation) {
        self.coordinates = geo.locate_soft().await;
    }

    pub(crate) fn client(&self) -> &ApiClient {
        &self.client
    }

    pub(crate) fn coordinates(&self) -> Option<Coordinate> {
        self.coordinates
    }

    pub(crate) fn search_panel(&self) -> &SearchPanel {
        &self.search
    }

    pub(crate) fn cart(&self) -> &Cart {
        &self.cart
    }

    pub(crate) fn checkout(&self) -> &CheckoutFlow {
        &self.checkout
    }

    pub(crate) fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Runs a search and shows its outcome. Failures never escape: they
    /// become the search panel's error message.
    pub(crate) async fn search(&mut self, query: Option<&str>, barcode: Option<&str>) {
        let query = SearchQuery::new(query, barcode).near(self.coordinates);
        let token = self.search.begin();
        self.message = None;

        let outcome = self.client.search(&query).await;
        if let Err(e) = &outcome {
            tracing::warn!(error = %e, token = token.value(), "search failed");
        }
        if !self.search.finish(token, outcome) {
            tracing::debug!(token = token.value(), "discarding stale search response");
        }
        self.message = self.search.message().map(str::to_string);
    }

    /// Adds the displayed result at `result_index` to the cart.
    pub(crate) fn add_to_cart(&mut self, result_index: usize) -> anyhow::Result<&InventoryResult> {
        let item = self
            .search
            .result(result_index)
            .with_context(|| format!("no search result #{}", result_index + 1))?;
        self.cart.add(item);
        Ok(item)
    }

    pub(crate) fn update_quantity(&mut self, index: usize, quantity: u32) -> anyhow::Result<()> {
        self.cart.update_quantity(index, quantity)?;
        Ok(())
    }

    pub(crate) fn increment(&mut self, index: usize) -> anyhow::Result<u32> {
        Ok(self.cart.increment(index)?)
    }

    pub(crate) fn decrement(&mut self, index: usize) -> anyhow::Result<u32> {
        Ok(self.cart.decrement(index)?)
    }

    pub(crate) fn remove(&mut self, index: usize) -> anyhow::Result<()> {
        self.cart.remove(index)?;
        Ok(())
    }

    pub(crate) fn open_checkout(&mut self) -> anyhow::Result<()> {
        self.checkout.open(&self.cart)?;
        Ok(())
    }

    pub(crate) fn close_checkout(&mut self) -> anyhow::Result<()> {
        self.checkout.close()?;
        Ok(())
    }

    /// Submits the open checkout form.
    ///
    /// Invalid input is rejected before any request is made. On success the
    /// cart is emptied and the form closes; on failure the form stays open
    /// and the cart is left exactly as it was. Either way the outcome ends up
    /// in [`Session::message`].
    pub(crate) async fn submit_checkout(&mut self, form: &CheckoutForm) {
        let request = match self.checkout.begin_submit(form, &self.cart) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "checkout rejected before submission");
                self.message = Some(rejection_message(&e));
                return;
            }
        };

        let message = match self.client.submit_order(&request).await {
            Ok(result) => self.checkout.complete(&result, &mut self.cart),
            Err(e) => {
                tracing::warn!(error = %e, "order submission failed");
                let message = order_failure_message(&e);
                self.checkout.fail(message.clone()).map(|()| message)
            }
        };

        self.message = Some(match message {
            Ok(message) => message,
            Err(e) => e.to_string(),
        });
    }
}

/// The backend's own explanation when it gave one. A request that never got
/// an answer reports the transport error itself.
fn order_failure_message(err: &ClientError) -> String {
    match err {
        ClientError::Http(e) => e.to_string(),
        _ => err.detail().unwrap_or(messages::ORDER_FAILED).to_string(),
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
