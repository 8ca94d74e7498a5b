use tiim_client::ApiClient;
use tiim_core::MapView;

use crate::geo::Geolocation;

/// Mounts the pharmacy map for `city`: the location lookup and the pharmacy
/// listing run concurrently and each fills in its own part of the view.
pub(crate) async fn mount(
    client: &ApiClient,
    geo: &Geolocation,
    city: Option<&str>,
) -> MapView {
    let mut view = MapView::new(city);

    let (position, pharmacies) = tokio::join!(geo.locate_soft(), client.list_pharmacies(city));

    view.set_user_position(position);
    match pharmacies {
        Ok(pharmacies) => {
            tracing::debug!(
                total = pharmacies.len(),
                placed = pharmacies.iter().filter(|p| p.position().is_some()).count(),
                "pharmacies loaded for map"
            );
            view.set_pharmacies(&pharmacies);
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                city = city.unwrap_or_default(),
                "failed to load pharmacies"
            );
            view.set_load_error();
        }
    }
    view
}
