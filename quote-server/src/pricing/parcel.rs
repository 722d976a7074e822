//! The parcel delivery pricing pipeline.

use chrono::{Datelike, NaiveDate, Utc, Weekday};

use crate::distance::RoutingProvider;
use crate::factors::{is_public_holiday, time_factor};
use crate::location::GeocodingProvider;
use crate::rates::{
    DistanceCategory, GST_RATE, SURGE_HOLIDAY, SURGE_PEAK_HOUR, SURGE_WEEKEND,
    VOLUMETRIC_DIVISOR, is_peak_hour,
};

use super::{
    AppliedFactors, CostBreakdown, OrderType, QuoteError, QuoteRequest, Quoter, new_quote_id,
    round2,
};

pub(super) async fn estimate<G: GeocodingProvider, R: RoutingProvider>(
    quoter: &Quoter<G, R>,
    request: &QuoteRequest,
) -> Result<CostBreakdown, QuoteError> {
    let chargeable_weight = chargeable_weight(request)?;

    if let Some(hour) = request.pickup_hour {
        if hour > 23 {
            return Err(QuoteError::InvalidInput(format!(
                "pickupHour out of range: {hour}"
            )));
        }
    }

    let date = request.effective_date();

    let (origin, dest, distance) = quoter
        .resolve_route(&request.from_zip, &request.to_zip)
        .await;
    let km = distance.distance_km as f64;

    let category = DistanceCategory::bucket(distance.distance_km);
    let weight_multiplier = quoter.rates.parcel_weight_multiplier(chargeable_weight);

    // Distance-proportional charge, floored at the category minimum so a
    // two-street hop still covers pickup and handling.
    let base_cost = (km * quoter.rates.parcel_per_km(category) * weight_multiplier)
        .max(quoter.rates.parcel_minimum(category));

    let package_multiplier = quoter
        .rates
        .package_type_multiplier(request.package_type.as_deref().unwrap_or("standard"));

    let time = time_factor(date);
    let surge = surge_factor(date, request.pickup_hour);

    let subtotal = round2(base_cost * package_multiplier * time * surge);
    let gst = round2(subtotal * GST_RATE);
    let total = round2(subtotal + gst);

    let description = format!(
        "{chargeable_weight:.1} kg parcel from {} to {}, {} km ({} confidence), delivery {}",
        request.from_zip,
        request.to_zip,
        distance.distance_km,
        distance.confidence.label(),
        category.delivery_estimate(),
    );

    tracing::debug!(
        origin = %origin.region,
        dest = %dest.region,
        distance_km = distance.distance_km,
        chargeable_weight,
        "priced parcel order"
    );

    Ok(CostBreakdown {
        quote_id: new_quote_id(),
        generated_at: Utc::now(),
        order_type: OrderType::Parcel,
        base_cost: round2(base_cost),
        transport_cost: None,
        labor_cost: None,
        packing_cost: None,
        floor_surcharge: None,
        parking_surcharge: None,
        special_item_handling: None,
        storage_cost: None,
        toll_charges: None,
        insurance_cost: None,
        additional_services: None,
        chargeable_weight: Some(round2(chargeable_weight)),
        distance_category: Some(category),
        delivery_estimate: Some(category.delivery_estimate()),
        rider_incentive_pct: Some(quoter.rates.rider_incentive_pct(category)),
        factors: AppliedFactors {
            time,
            vendor_markup: None,
            fuel_adjustment: None,
            road_composition: None,
            road_quality: None,
            heuristic: None,
            surge: Some(surge),
            weight_multiplier: Some(weight_multiplier),
            package_multiplier: Some(package_multiplier),
        },
        subtotal,
        gst,
        total,
        distance_km: distance.distance_km,
        duration_mins: distance.duration_mins,
        distance_confidence: distance.confidence,
        description,
    })
}

/// Chargeable weight: the greater of actual and volumetric weight.
/// Requires at least one of weight and dimensions, and rejects
/// non-positive values.
fn chargeable_weight(request: &QuoteRequest) -> Result<f64, QuoteError> {
    let actual = match request.parcel_weight {
        Some(w) if w <= 0.0 || !w.is_finite() => {
            return Err(QuoteError::InvalidInput(format!(
                "parcelWeight must be positive, got {w}"
            )));
        }
        Some(w) => w,
        None => 0.0,
    };

    let volumetric = match request.parcel_dimensions {
        Some(d) => {
            if d.length <= 0.0 || d.width <= 0.0 || d.height <= 0.0 {
                return Err(QuoteError::InvalidInput(
                    "parcelDimensions must all be positive".into(),
                ));
            }
            d.length * d.width * d.height / VOLUMETRIC_DIVISOR
        }
        None => 0.0,
    };

    let chargeable = actual.max(volumetric);
    if chargeable <= 0.0 {
        return Err(QuoteError::InvalidInput(
            "parcel orders need parcelWeight or parcelDimensions".into(),
        ));
    }
    Ok(chargeable)
}

/// Demand surge on top of the seasonal time factor. Peak-hour, weekend and
/// holiday components stack multiplicatively.
fn surge_factor(date: NaiveDate, pickup_hour: Option<u32>) -> f64 {
    let mut surge = 1.0;
    if pickup_hour.is_some_and(is_peak_hour) {
        surge *= SURGE_PEAK_HOUR;
    }
    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        surge *= SURGE_WEEKEND;
    }
    if is_public_holiday(date) {
        surge *= SURGE_HOLIDAY;
    }
    surge
}

#[cfg(test)]
mod tests {
    use crate::pricing::ParcelDimensions;
    use crate::pricing::testutil::{parcel_request, quoter};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn long_distance_parcel_prices_end_to_end() {
        let quoter = quoter().await;
        let request = parcel_request();

        let breakdown = quoter.quote(&request).await.unwrap();

        assert_eq!(breakdown.order_type, OrderType::Parcel);
        // Delhi→Mumbai is past 300 km however it is measured.
        assert_eq!(
            breakdown.distance_category,
            Some(DistanceCategory::LongDistance)
        );
        assert_eq!(breakdown.delivery_estimate, Some("4-7 days"));
        assert_eq!(breakdown.rider_incentive_pct, Some(12.0));
        // 8 kg falls in the second weight slab.
        assert_eq!(breakdown.factors.weight_multiplier, Some(1.2));
        assert_eq!(breakdown.factors.surge, Some(1.0));
        assert_eq!(breakdown.gst, round2(breakdown.subtotal * GST_RATE));
        assert_eq!(breakdown.total, round2(breakdown.subtotal + breakdown.gst));
        // Relocation-only line items stay unset.
        assert!(breakdown.labor_cost.is_none());
        assert!(breakdown.transport_cost.is_none());
    }

    #[tokio::test]
    async fn repeat_quotes_share_distance_but_not_identity() {
        let quoter = quoter().await;
        let request = parcel_request();

        let first = quoter.quote(&request).await.unwrap();
        let second = quoter.quote(&request).await.unwrap();

        assert_eq!(first.distance_km, second.distance_km);
        assert_eq!(first.duration_mins, second.duration_mins);
        assert_eq!(first.subtotal, second.subtotal);
        assert_ne!(first.quote_id, second.quote_id);
    }

    #[tokio::test]
    async fn volumetric_weight_wins_for_bulky_parcels() {
        let quoter = quoter().await;
        let mut request = parcel_request();
        request.parcel_weight = Some(2.0);
        // 50×40×30 cm → 60000 cm³ / 5000 = 12 kg volumetric.
        request.parcel_dimensions = Some(ParcelDimensions {
            length: 50.0,
            width: 40.0,
            height: 30.0,
        });

        let breakdown = quoter.quote(&request).await.unwrap();
        assert_eq!(breakdown.chargeable_weight, Some(12.0));
        assert_eq!(breakdown.factors.weight_multiplier, Some(1.5));
    }

    #[tokio::test]
    async fn missing_weight_and_dimensions_is_rejected() {
        let quoter = quoter().await;
        let mut request = parcel_request();
        request.parcel_weight = None;

        let err = quoter.quote(&request).await.unwrap_err();
        assert!(matches!(err, QuoteError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn non_positive_weight_is_rejected() {
        let quoter = quoter().await;
        let mut request = parcel_request();
        request.parcel_weight = Some(-3.0);

        assert!(quoter.quote(&request).await.is_err());
    }

    #[tokio::test]
    async fn out_of_range_pickup_hour_is_rejected() {
        let quoter = quoter().await;
        let mut request = parcel_request();
        request.pickup_hour = Some(24);

        assert!(quoter.quote(&request).await.is_err());
    }

    #[tokio::test]
    async fn package_type_premium_applies() {
        let quoter = quoter().await;
        let mut request = parcel_request();

        let standard = quoter.quote(&request).await.unwrap();
        request.package_type = Some("medicine".to_string());
        let medicine = quoter.quote(&request).await.unwrap();

        assert_eq!(medicine.factors.package_multiplier, Some(1.25));
        assert_eq!(
            medicine.subtotal,
            round2(standard.subtotal * 1.25)
        );
    }

    #[test]
    fn surge_components_stack() {
        // Plain Wednesday, off-peak.
        assert_eq!(surge_factor(date(2026, 4, 15), Some(13)), 1.0);
        // Peak hour on a weekday.
        assert_eq!(surge_factor(date(2026, 4, 15), Some(9)), SURGE_PEAK_HOUR);
        // Saturday, no hour given.
        assert_eq!(surge_factor(date(2026, 4, 18), None), SURGE_WEEKEND);
        // Independence Day 2026 is a Saturday, picked up at peak hour.
        let all = surge_factor(date(2026, 8, 15), Some(18));
        assert!((all - SURGE_PEAK_HOUR * SURGE_WEEKEND * SURGE_HOLIDAY).abs() < 1e-9);
    }

    #[tokio::test]
    async fn minimum_charge_floors_short_hops() {
        let quoter = quoter().await;
        let mut request = parcel_request();
        // Same endpoint twice: distance floors at the minimum but the
        // category minimum still dominates the per-km charge.
        request.to_zip = request.from_zip.clone();
        request.parcel_weight = Some(1.0);

        let breakdown = quoter.quote(&request).await.unwrap();
        assert_eq!(
            breakdown.distance_category,
            Some(DistanceCategory::Intracity)
        );
        assert_eq!(breakdown.base_cost, 100.0);
    }
}
