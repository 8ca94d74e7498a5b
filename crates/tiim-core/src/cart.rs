//! In-memory shopping cart.
//!
//! Lines are unique by `inventory_id`: adding an item already in the cart
//! bumps its quantity instead of appending a second line. Every quantity the
//! cart holds is at least 1. The cart lives for the process only and is never
//! written anywhere.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::models::{InventoryResult, OrderItem};

/// A selected inventory match plus the quantity the customer wants.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: InventoryResult,
    pub quantity: u32,
    pub requires_prescription: bool,
}

impl CartLine {
    fn new(item: InventoryResult) -> Self {
        Self {
            item,
            quantity: 1,
            requires_prescription: false,
        }
    }

    /// Unit price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.item.price * Decimal::from(self.quantity)
    }

    pub(crate) fn to_order_item(&self) -> OrderItem {
        OrderItem {
            inventory_id: self.item.inventory_id.clone(),
            medicine_name: self.item.medicine_name.clone(),
            price: self.item.price,
            quantity: self.quantity,
            requires_prescription: self.requires_prescription,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item`, merging with an existing line of the same
    /// `inventory_id`. Returns the index of the affected line.
    pub fn add(&mut self, item: &InventoryResult) -> usize {
        if let Some(index) = self
            .lines
            .iter()
            .position(|line| line.item.inventory_id == item.inventory_id)
        {
            let line = &mut self.lines[index];
            line.quantity = line.quantity.saturating_add(1);
            return index;
        }

        self.lines.push(CartLine::new(item.clone()));
        self.lines.len() - 1
    }

    /// Sets the quantity of the line at `index`. Values below 1 are clamped
    /// to 1.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::LineOutOfRange`] if `index` does not name a line;
    /// the cart is left unchanged.
    pub fn update_quantity(&mut self, index: usize, quantity: u32) -> Result<(), CoreError> {
        let line = self.line_mut(index)?;
        line.quantity = quantity.max(1);
        Ok(())
    }

    /// The "+" button.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::LineOutOfRange`] for an unknown index.
    pub fn increment(&mut self, index: usize) -> Result<u32, CoreError> {
        let line = self.line_mut(index)?;
        line.quantity = line.quantity.saturating_add(1);
        Ok(line.quantity)
    }

    /// The "-" button; never goes below 1.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::LineOutOfRange`] for an unknown index.
    pub fn decrement(&mut self, index: usize) -> Result<u32, CoreError> {
        let line = self.line_mut(index)?;
        line.quantity = line.quantity.saturating_sub(1).max(1);
        Ok(line.quantity)
    }

    /// Removes the line at `index` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::LineOutOfRange`] for an unknown index.
    pub fn remove(&mut self, index: usize) -> Result<CartLine, CoreError> {
        if index >= self.lines.len() {
            return Err(CoreError::LineOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        Ok(self.lines.remove(index))
    }

    /// Σ price × quantity over every line. Zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Pharmacy of the first line, which an order is addressed to.
    #[must_use]
    pub fn pharmacy_id(&self) -> Option<&str> {
        self.lines.first().map(|line| line.item.pharmacy_id.as_str())
    }

    /// Number of distinct pharmacies across all lines.
    #[must_use]
    pub fn pharmacy_count(&self) -> usize {
        self.lines
            .iter()
            .map(|line| line.item.pharmacy_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut CartLine, CoreError> {
        let len = self.lines.len();
        self.lines
            .get_mut(index)
            .ok_or(CoreError::LineOutOfRange { index, len })
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
