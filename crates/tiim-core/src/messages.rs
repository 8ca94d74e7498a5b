//! User-facing strings. The interface speaks French.

use rust_decimal::Decimal;

use crate::models::OrderResult;

pub const LOADING: &str = "Chargement...";
pub const START_SEARCHING: &str = "Commencez par une recherche.";
pub const NO_RESULTS: &str = "Aucun résultat";
pub const SEARCH_FAILED: &str = "Erreur lors de la recherche";

pub const EMPTY_CART: &str = "Votre panier est vide.";
pub const MISSING_CONTACT: &str = "Veuillez entrer votre nom et téléphone";
pub const MIXED_PHARMACIES: &str =
    "Votre panier contient des produits de plusieurs pharmacies. Veuillez commander une pharmacie à la fois.";
pub const ORDER_FAILED: &str = "Erreur lors de la commande";
pub const PRESCRIPTION_NOTICE: &str = "Pour les médicaments sur ordonnance, vous devez présenter l'original lors de la livraison ou du retrait.";

pub const PHARMACIES_LOAD_FAILED: &str = "Erreur de chargement des pharmacies";
pub const NO_LOCATED_PHARMACY: &str = "Aucune pharmacie géolocalisée trouvée pour le moment.";
pub const YOU_ARE_HERE: &str = "Vous êtes ici";
pub const DIRECTIONS: &str = "Itinéraire";

/// Confirmation shown once the backend accepted an order.
#[must_use]
pub fn order_created(result: &OrderResult) -> String {
    format!(
        "Commande créée. Statut: {}. Total: {} CFA",
        result.status, result.total_amount
    )
}

/// Formats a price or total, e.g. `2200.00 CFA`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2} CFA", amount.round_dp(2))
}
