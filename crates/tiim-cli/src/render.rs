//! Plain-text rendering of the views. Lists are numbered from 1.

use tiim_core::messages::{self, format_amount};
use tiim_core::{Cart, InventoryResult, MapView, SearchPanel};

pub(crate) fn result_line(index: usize, item: &InventoryResult) -> String {
    let dci = item.dci.as_deref().unwrap_or("\u{2014}");
    let identity = match &item.barcode {
        Some(barcode) => format!("{dci} \u{2022} {barcode}"),
        None => dci.to_string(),
    };

    let mut lines = vec![
        format!("{:>2}. {}", index + 1, item.medicine_name),
        format!("    {identity}"),
        format!(
            "    {} \u{2014} {}",
            item.pharmacy_name, item.pharmacy_address
        ),
    ];
    if let Some(distance) = item.distance_km {
        lines.push(format!("    {distance} km"));
    }
    lines.push(format!("    {}", format_amount(item.price)));
    lines.join("\n")
}

pub(crate) fn search_panel(panel: &SearchPanel) -> String {
    if panel.is_loading() {
        return messages::LOADING.to_string();
    }
    if let Some(placeholder) = panel.placeholder() {
        return placeholder.to_string();
    }
    panel
        .results()
        .iter()
        .enumerate()
        .map(|(i, item)| result_line(i, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Outcome of the last search: its message (failure, no results) when there
/// is one, followed by the results. The idle placeholder only shows when
/// there is nothing else to say.
pub(crate) fn search_outcome(message: Option<&str>, panel: &SearchPanel) -> String {
    match message {
        Some(message) if panel.results().is_empty() => message.to_string(),
        Some(message) => format!("{message}\n{}", search_panel(panel)),
        None => search_panel(panel),
    }
}

pub(crate) fn cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return format!("Panier\n{}", messages::EMPTY_CART);
    }

    let mut lines = vec!["Panier".to_string()];
    lines.extend(cart.lines().iter().enumerate().map(|(i, line)| {
        format!(
            "{:>2}. {} ({}) x{}  {}",
            i + 1,
            line.item.medicine_name,
            line.item.pharmacy_name,
            line.quantity,
            format_amount(line.line_total())
        )
    }));
    lines.push(format!("Total: {}", format_amount(cart.total())));
    lines.join("\n")
}

pub(crate) fn map(view: &MapView) -> String {
    let mut lines = vec![match &view.city {
        Some(city) => format!("Pharmacies sur la carte \u{2013} {city}"),
        None => "Pharmacies sur la carte".to_string(),
    }];
    if view.loading {
        lines.push(messages::LOADING.to_string());
        return lines.join("\n");
    }
    if let Some(error) = &view.error {
        lines.push(error.clone());
    }

    lines.push(format!("Centre: {}", view.center()));
    if let Some(here) = view.user_position {
        lines.push(format!("  * {} ({here})", messages::YOU_ARE_HERE));
    }
    for marker in &view.markers {
        lines.push(format!("  - {} ({})", marker.name, marker.position));
        if let Some(address) = &marker.address {
            lines.push(format!("      {address}"));
        }
        if let Some(phone) = &marker.phone {
            lines.push(format!("      T\u{e9}l: {phone}"));
        }
        lines.push(format!(
            "      {}: {}",
            messages::DIRECTIONS,
            marker.directions_url
        ));
    }
    if let Some(hint) = view.empty_hint() {
        lines.push(hint.to_string());
    }
    lines.join("\n")
}
