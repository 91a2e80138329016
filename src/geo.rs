pub const EARTH_RADIUS_MILES: f64 = 3959.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Great-circle distance in miles.
pub fn haversine_miles(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Mean over all points of the distance to that point's nearest other point.
///
/// Returns 0 for fewer than two points. All pairs are compared, which is fine
/// for the few hundred locations a county holds.
pub fn mean_nearest_neighbor_miles(points: &[Coordinate]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let mut total = 0.0;
    for (i, p) in points.iter().enumerate() {
        let mut nearest = f64::MAX;
        for (j, q) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            nearest = nearest.min(haversine_miles(*p, *q));
        }
        total += nearest;
    }
    total / points.len() as f64
}
