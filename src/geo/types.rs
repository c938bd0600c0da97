//! Geolocation data structures.

use serde::Deserialize;

/// Raw JSON answer of the geolocation API.
///
/// Every field is optional: a failed query only carries `status` and
/// `message`, and a successful one may omit any field the service does not know.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoApiResponse {
    pub status: Option<String>,
    pub message: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "regionName")]
    pub region_name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Location of a public IP, as far as the service knows it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoResult {
    pub country: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    /// `(latitude, longitude)`, present only when the service returned both.
    pub coordinates: Option<(f64, f64)>,
}

/// What the service said about a query that reached it.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoOutcome {
    Located(GeoResult),
    /// `status == "fail"`, with the service's reason when it gave one.
    ServiceFailure { message: Option<String> },
}

impl From<GeoApiResponse> for GeoOutcome {
    fn from(response: GeoApiResponse) -> Self {
        if response.status.as_deref() == Some("fail") {
            return GeoOutcome::ServiceFailure {
                message: response.message,
            };
        }

        let coordinates = match (response.lat, response.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        };

        GeoOutcome::Located(GeoResult {
            country: response.country,
            city: response.city,
            region: response.region_name,
            coordinates,
        })
    }
}
