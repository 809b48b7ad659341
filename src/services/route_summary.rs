//! Resumen de ruta de un manifiesto
//!
//! Ordena las paradas por `sequence_number` y construye la URL de un mapa
//! estático: sin paradas un mapa por defecto, con una parada un marcador
//! centrado y con dos o más un trazado origen → intermedias → destino.

use crate::dto::reference_dto::RouteStop;
use crate::models::StopWithAddress;

const STATIC_MAP_BASE: &str = "https://maps.googleapis.com/maps/api/staticmap";
pub const DEFAULT_MAP_URL: &str =
    "https://maps.googleapis.com/maps/api/staticmap?center=United+States&zoom=4&size=600x400&maptype=roadmap";

/// "calle, ciudad, estado, país" omitiendo partes vacías
pub fn format_address(stop: &StopWithAddress) -> String {
    [
        stop.street_address.as_str(),
        stop.city_name.as_str(),
        stop.state_name.as_str(),
        stop.country_name.as_str(),
    ]
    .iter()
    .map(|part| part.trim())
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}

pub fn build_map_url(addresses: &[String], api_key: Option<&str>) -> String {
    let encoded: Vec<String> = addresses
        .iter()
        .map(|address| urlencoding::encode(address).into_owned())
        .collect();

    let mut url = match encoded.as_slice() {
        [] => return DEFAULT_MAP_URL.to_string(),
        [center] => format!(
            "{}?center={center}&zoom=13&size=600x400&maptype=roadmap&markers=color:red|{center}",
            STATIC_MAP_BASE
        ),
        [origin, waypoints @ .., destination] => {
            let path = std::iter::once(origin)
                .chain(waypoints.iter())
                .chain(std::iter::once(destination))
                .cloned()
                .collect::<Vec<_>>()
                .join("|");
            format!(
                "{}?size=600x400&maptype=roadmap&path=color:0x0000ff|weight:5|{}&markers=color:green|label:S|{}&markers=color:red|label:E|{}",
                STATIC_MAP_BASE, path, origin, destination
            )
        }
    };

    if let Some(key) = api_key {
        url.push_str("&key=");
        url.push_str(&urlencoding::encode(key));
    }
    url
}

/// Paradas ordenadas con su dirección y la URL del mapa
pub fn summarize(mut stops: Vec<StopWithAddress>, api_key: Option<&str>) -> (Vec<RouteStop>, String) {
    stops.sort_by_key(|stop| stop.sequence_number);

    let route: Vec<RouteStop> = stops
        .into_iter()
        .map(|stop| {
            let address = format_address(&stop);
            RouteStop { stop, address }
        })
        .collect();

    let addresses: Vec<String> = route.iter().map(|s| s.address.clone()).collect();
    let url = build_map_url(&addresses, api_key);
    (route, url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocationType;
    use chrono::Utc;
    use uuid::Uuid;

    fn stop(sequence_number: i32, street: &str) -> StopWithAddress {
        StopWithAddress {
            id: Uuid::new_v4(),
            location_type: LocationType::Pickup,
            name: format!("Stop {}", sequence_number),
            street_address: street.to_string(),
            city_name: "Toronto".to_string(),
            state_name: "Ontario".to_string(),
            country_name: "Canada".to_string(),
            date: Utc::now(),
            time: "08:00".to_string(),
            sequence_number,
        }
    }

    #[test]
    fn test_no_stops_uses_default_map() {
        let (route, url) = summarize(Vec::new(), None);
        assert!(route.is_empty());
        assert_eq!(url, DEFAULT_MAP_URL);
    }

    #[test]
    fn test_single_stop_is_centered_and_encoded() {
        let (_, url) = summarize(vec![stop(0, "1 Yonge St")], None);
        assert!(url.contains("center=1%20Yonge%20St%2C%20Toronto%2C%20Ontario%2C%20Canada"));
        assert!(url.contains("zoom=13"));
        assert!(url.contains("markers=color:red|1%20Yonge%20St"));
    }

    #[test]
    fn test_multiple_stops_follow_sequence() {
        let (route, url) = summarize(
            vec![stop(2, "C St"), stop(0, "A St"), stop(1, "B St")],
            Some("abc"),
        );

        assert_eq!(route[0].stop.street_address, "A St");
        assert_eq!(route[2].stop.street_address, "C St");
        let a = url.find("A%20St").unwrap();
        let b = url.find("B%20St").unwrap();
        let c = url.find("C%20St").unwrap();
        assert!(a < b && b < c);
        assert!(url.contains("label:S|A%20St"));
        assert!(url.ends_with("&key=abc"));
    }
}
