use std::ops::RangeInclusive;

use axum::{Extension, Json};
use rand::Rng;
use serde::Serialize;

use crate::middleware::RequestId;

use super::ApiResponse;

const SPEED_KMH: RangeInclusive<u32> = 20..=65;
const AVG_SPEED_KMH: RangeInclusive<u32> = 20..=60;
const CONGESTION_PCT: RangeInclusive<u32> = 0..=100;

/// Placeholder traffic metrics. Randomized, not derived from any data source.
#[derive(Debug, Serialize)]
pub(super) struct TrafficInfo {
    pub speed: String,
    #[serde(rename = "avgSpeed")]
    pub avg_speed: String,
    pub congestion: String,
}

pub(super) fn sample_traffic<R: Rng>(rng: &mut R) -> TrafficInfo {
    TrafficInfo {
        speed: format!("{} km/h", rng.random_range(SPEED_KMH)),
        avg_speed: format!("{} km/h", rng.random_range(AVG_SPEED_KMH)),
        congestion: format!("{}%", rng.random_range(CONGESTION_PCT)),
    }
}

pub(super) async fn get_traffic(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<TrafficInfo>> {
    let info = sample_traffic(&mut rand::rng());
    Json(ApiResponse::new(info, req_id.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn leading_number(value: &str) -> u32 {
        value
            .trim_end_matches(" km/h")
            .trim_end_matches('%')
            .parse()
            .expect("numeric prefix")
    }

    #[test]
    fn sampled_values_stay_in_documented_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let info = sample_traffic(&mut rng);
            assert!(SPEED_KMH.contains(&leading_number(&info.speed)));
            assert!(AVG_SPEED_KMH.contains(&leading_number(&info.avg_speed)));
            assert!(CONGESTION_PCT.contains(&leading_number(&info.congestion)));
        }
    }

    #[test]
    fn units_are_attached() {
        let info = sample_traffic(&mut StdRng::seed_from_u64(1));
        assert!(info.speed.ends_with(" km/h"));
        assert!(info.avg_speed.ends_with(" km/h"));
        assert!(info.congestion.ends_with('%'));
    }
}
