//! Checkout flow.
//!
//! ```text
//! Closed ──open──► Open ──submit──► Submitting ──ok──► Closed (cart cleared)
//!   ▲               │  ▲                │
//!   └────close──────┘  └─────failed─────┘ (cart untouched, error shown)
//! ```
//!
//! A submit that fails validation never leaves `Open` and produces no
//! [`OrderRequest`], so no request can go out.

use crate::cart::Cart;
use crate::error::CoreError;
use crate::messages;
use crate::models::{DeliveryMethod, OrderRequest, OrderResult};

/// Fields typed into the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub user_name: String,
    pub user_phone: String,
    pub delivery_method: DeliveryMethod,
    /// Kept while the user toggles methods; only sent for `Delivery`.
    pub delivery_address: String,
    pub prescription_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckoutState {
    #[default]
    Closed,
    Open {
        error: Option<String>,
    },
    Submitting,
}

impl CheckoutState {
    fn name(&self) -> &'static str {
        match self {
            CheckoutState::Closed => "closed",
            CheckoutState::Open { .. } => "open",
            CheckoutState::Submitting => "submitting",
        }
    }
}

/// Builds the order payload for `cart`, enforcing the checkout rules:
/// name and phone are required, the cart must be non-empty and every line
/// must come from the same pharmacy.
///
/// # Errors
///
/// - [`CoreError::Validation`] when name or phone is blank.
/// - [`CoreError::EmptyCart`] when there is nothing to order.
/// - [`CoreError::MixedPharmacies`] when lines span several pharmacies.
pub fn build_order_request(form: &CheckoutForm, cart: &Cart) -> Result<OrderRequest, CoreError> {
    let user_name = form.user_name.trim();
    let user_phone = form.user_phone.trim();
    if user_name.is_empty() || user_phone.is_empty() {
        return Err(CoreError::Validation(messages::MISSING_CONTACT.to_string()));
    }

    let Some(pharmacy_id) = cart.pharmacy_id() else {
        return Err(CoreError::EmptyCart);
    };

    let count = cart.pharmacy_count();
    if count > 1 {
        return Err(CoreError::MixedPharmacies { count });
    }

    let delivery_address = match form.delivery_method {
        DeliveryMethod::Delivery => Some(form.delivery_address.trim().to_string()),
        DeliveryMethod::ClickCollect => None,
    };

    let prescription_url = Some(form.prescription_url.trim())
        .filter(|url| !url.is_empty())
        .map(str::to_string);

    Ok(OrderRequest {
        user_name: user_name.to_string(),
        user_phone: user_phone.to_string(),
        pharmacy_id: pharmacy_id.to_string(),
        items: cart.lines().iter().map(|line| line.to_order_item()).collect(),
        delivery_method: form.delivery_method,
        delivery_address,
        prescription_url,
    })
}

/// The user-facing text for a checkout rejection.
#[must_use]
pub fn rejection_message(err: &CoreError) -> String {
    match err {
        CoreError::Validation(msg) => msg.clone(),
        CoreError::MixedPharmacies { .. } => messages::MIXED_PHARMACIES.to_string(),
        CoreError::EmptyCart => messages::EMPTY_CART.to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    state: CheckoutState,
}

impl CheckoutFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, CheckoutState::Open { .. })
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.state == CheckoutState::Submitting
    }

    /// The error shown inside the open form, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            CheckoutState::Open { error } => error.as_deref(),
            _ => None,
        }
    }

    /// Opens the form. Opening an already open form is a no-op.
    ///
    /// # Errors
    ///
    /// - [`CoreError::EmptyCart`] when `cart` has no lines.
    /// - [`CoreError::InvalidTransition`] while a submission is in flight.
    pub fn open(&mut self, cart: &Cart) -> Result<(), CoreError> {
        match self.state {
            CheckoutState::Submitting => Err(self.invalid("open checkout")),
            CheckoutState::Open { .. } => Ok(()),
            CheckoutState::Closed if cart.is_empty() => Err(CoreError::EmptyCart),
            CheckoutState::Closed => {
                self.state = CheckoutState::Open { error: None };
                Ok(())
            }
        }
    }

    /// Dismisses the form.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] while a submission is in flight.
    pub fn close(&mut self) -> Result<(), CoreError> {
        if self.is_submitting() {
            return Err(self.invalid("close checkout"));
        }
        self.state = CheckoutState::Closed;
        Ok(())
    }

    /// Validates the form and, on success, moves to `Submitting` and returns
    /// the payload to send. On a validation failure the flow stays `Open`
    /// with the rejection message attached.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidTransition`] unless the form is open.
    /// - Any error from [`build_order_request`].
    pub fn begin_submit(
        &mut self,
        form: &CheckoutForm,
        cart: &Cart,
    ) -> Result<OrderRequest, CoreError> {
        if !self.is_open() {
            return Err(self.invalid("submit an order"));
        }

        match build_order_request(form, cart) {
            Ok(request) => {
                self.state = CheckoutState::Submitting;
                Ok(request)
            }
            Err(err) => {
                self.state = CheckoutState::Open {
                    error: Some(rejection_message(&err)),
                };
                Err(err)
            }
        }
    }

    /// Records an accepted order: clears the cart, closes the form and
    /// returns the confirmation message.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless a submission is in flight.
    pub fn complete(&mut self, result: &OrderResult, cart: &mut Cart) -> Result<String, CoreError> {
        if !self.is_submitting() {
            return Err(self.invalid("complete an order"));
        }
        cart.clear();
        self.state = CheckoutState::Closed;
        Ok(messages::order_created(result))
    }

    /// Records a rejected order: the form reopens with `message`; the cart is
    /// not touched.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless a submission is in flight.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), CoreError> {
        if !self.is_submitting() {
            return Err(self.invalid("fail an order"));
        }
        self.state = CheckoutState::Open {
            error: Some(message.into()),
        };
        Ok(())
    }

    fn invalid(&self, action: &'static str) -> CoreError {
        CoreError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}

#[cfg(test)]
#[path = "checkout_test.rs"]
mod tests;
