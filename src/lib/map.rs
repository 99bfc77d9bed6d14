use super::geo::{compute_bounds, BoundingRegion, GeoPoint};
use super::items::{Collection, GeoData, RequestFeature};
use super::request::{extract_request_code, resolve_request};
use serde::Serialize;
use tracing::debug;

/// Highest zoom level at which points are still clustered.
pub const CLUSTER_MAX_ZOOM: u8 = 14;
/// Radius of each cluster, in pixels.
pub const CLUSTER_RADIUS: u32 = 30;

/// Default service area the viewport is anchored to.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct HomeRegion {
    pub bounds: BoundingRegion,
    pub center: GeoPoint,
}

impl HomeRegion {
    pub const CROWN_HEIGHTS: HomeRegion = HomeRegion {
        bounds: BoundingRegion::new(
            GeoPoint::new(-73.9625, 40.66),
            GeoPoint::new(-73.9065, 40.6795),
        ),
        center: GeoPoint::new(-73.943, 40.6686),
    };
}

impl Default for HomeRegion {
    fn default() -> Self {
        HomeRegion::CROWN_HEIGHTS
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterConfig {
    pub cluster_max_zoom: u8,
    pub cluster_radius: u32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        ClusterConfig {
            cluster_max_zoom: CLUSTER_MAX_ZOOM,
            cluster_radius: CLUSTER_RADIUS,
        }
    }
}

/// A clustered point source the renderer sets up for one collection.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ClusterSource {
    pub id: &'static str,
    pub collection: Collection,
    pub cluster: bool,
    #[serde(flatten)]
    pub config: ClusterConfig,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapViewModel {
    pub center: GeoPoint,
    pub bounds: BoundingRegion,
    pub matched_request: Option<RequestFeature>,
    /// Set when a code was requested but no feature carries it.
    pub request_code_not_found: Option<String>,
    pub sources: Vec<ClusterSource>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MapDataAssembler {
    pub home: HomeRegion,
    pub cluster: ClusterConfig,
}

impl MapDataAssembler {
    pub fn new(home: HomeRegion, cluster: ClusterConfig) -> Self {
        MapDataAssembler { home, cluster }
    }

    pub fn sources(&self) -> Vec<ClusterSource> {
        Collection::ALL
            .iter()
            .map(|&collection| ClusterSource {
                id: collection.source_id(),
                collection,
                cluster: true,
                config: self.cluster,
            })
            .collect()
    }

    pub fn assemble(&self, geo_data: &GeoData, query: &str) -> MapViewModel {
        let request_code = extract_request_code(query);

        let (matched_request, request_code_not_found) = if request_code.is_empty() {
            (None, None)
        } else {
            match resolve_request(&request_code, &geo_data.collections()) {
                Some(feature) => {
                    debug!(code = %request_code, collection = %feature.collection, "request found");
                    (Some(feature.clone()), None)
                }
                None => {
                    debug!(code = %request_code, "request not found");
                    (None, Some(request_code))
                }
            }
        };

        let points: Vec<GeoPoint> = geo_data.features().map(|f| f.location).collect();
        let bounds = compute_bounds(&self.home.bounds, &points);

        MapViewModel {
            center: self.home.center,
            bounds,
            matched_request,
            request_code_not_found,
            sources: self.sources(),
        }
    }
}

/// Assemble a view model anchored to the default home region.
pub fn assemble(geo_data: &GeoData, query: &str) -> MapViewModel {
    MapDataAssembler::default().assemble(geo_data, query)
}

/// Without geo data there is nothing to render.
pub fn assemble_optional(geo_data: Option<&GeoData>, query: &str) -> Option<MapViewModel> {
    geo_data.map(|data| assemble(data, query))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geo_data() -> GeoData {
        GeoData {
            requests: vec![RequestFeature::new(
                "Z",
                Collection::Requests,
                GeoPoint::new(-73.9, 40.67),
            )],
            driving_cluster_requests: vec![],
        }
    }

    #[test]
    fn matched_request() {
        let model = assemble(&geo_data(), "request=Z");
        let matched = model.matched_request.unwrap();
        assert_eq!(matched.code.as_str(), "Z");
        assert_eq!(model.request_code_not_found, None);
        assert!(model.bounds.contains(&GeoPoint::new(-73.9, 40.67)));
    }

    #[test]
    fn request_not_found() {
        let model = assemble(&geo_data(), "request=Q");
        assert_eq!(model.matched_request, None);
        assert_eq!(model.request_code_not_found, Some("Q".to_string()));
    }

    #[test]
    fn no_request_code() {
        let model = assemble(&geo_data(), "");
        assert_eq!(model.matched_request, None);
        assert_eq!(model.request_code_not_found, None);
        let expected = compute_bounds(
            &HomeRegion::CROWN_HEIGHTS.bounds,
            &[GeoPoint::new(-73.9, 40.67)],
        );
        assert_eq!(model.bounds, expected);
        assert_eq!(model.center, HomeRegion::CROWN_HEIGHTS.center);
    }

    #[test]
    fn empty_request_param_is_no_request() {
        let model = assemble(&geo_data(), "request=");
        assert_eq!(model.matched_request, None);
        assert_eq!(model.request_code_not_found, None);
    }

    #[test]
    fn empty_geo_data_keeps_home_bounds() {
        let model = assemble(&GeoData::default(), "request=Z");
        assert_eq!(model.bounds, HomeRegion::CROWN_HEIGHTS.bounds);
        assert_eq!(model.request_code_not_found, Some("Z".to_string()));
    }

    #[test]
    fn driving_cluster_points_extend_bounds() {
        let mut data = geo_data();
        data.driving_cluster_requests.push(RequestFeature::new(
            "D",
            Collection::DrivingClusterRequests,
            GeoPoint::new(-74.2, 40.9),
        ));
        let model = assemble(&data, "request=D");
        assert_eq!(model.bounds.sw.lon, -74.2);
        assert_eq!(model.bounds.ne.lat, 40.9);
        let matched = model.matched_request.unwrap();
        assert_eq!(matched.collection, Collection::DrivingClusterRequests);
    }

    #[test]
    fn requests_take_precedence() {
        let mut data = geo_data();
        data.driving_cluster_requests.push(RequestFeature::new(
            "Z",
            Collection::DrivingClusterRequests,
            GeoPoint::new(-74.2, 40.9),
        ));
        let model = assemble(&data, "request=Z");
        assert_eq!(model.matched_request.unwrap().collection, Collection::Requests);
    }

    #[test]
    fn idempotent() {
        let data = geo_data();
        assert_eq!(assemble(&data, "request=Z"), assemble(&data, "request=Z"));
    }

    #[test]
    fn missing_geo_data() {
        assert_eq!(assemble_optional(None, "request=Z"), None);
        assert!(assemble_optional(Some(&geo_data()), "").is_some());
    }

    #[test]
    fn custom_home_region() {
        let home = HomeRegion {
            bounds: BoundingRegion::new(GeoPoint::new(13.3, 52.4), GeoPoint::new(13.5, 52.6)),
            center: GeoPoint::new(13.4, 52.5),
        };
        let assembler = MapDataAssembler::new(home, ClusterConfig::default());
        let model = assembler.assemble(&geo_data(), "");
        assert_eq!(model.center, home.center);
        assert_eq!(model.bounds.sw.lon, -73.9);
        assert_eq!(model.bounds.ne.lon, 13.5);
    }

    #[test]
    fn cluster_sources() {
        let model = assemble(&geo_data(), "");
        let ids: Vec<&str> = model.sources.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["requestsSource", "drivingClusterRequestsSource"]);
        for source in model.sources {
            assert!(source.cluster);
            assert_eq!(source.config.cluster_max_zoom, 14);
            assert_eq!(source.config.cluster_radius, 30);
        }
    }
}
