//! The relocation (household move) pricing pipeline.

use chrono::Utc;

use crate::distance::RoutingProvider;
use crate::factors::{
    VendorTier, composition_factor, region_road_factor, time_factor, vendor_markup,
};
use crate::location::GeocodingProvider;
use crate::rates::{
    ELEVATOR_DISCOUNT, FLOOR_RATE, GST_RATE, INSURANCE_RATE, LABOR_DURATION_FLOOR, LABOR_RATIO,
    MoveSize, PACKING_PREMIUM, PACKING_STANDARD, REFERENCE_DURATION_MINS, STORAGE_PER_MONTH,
    TOLL_PER_KM,
};

use super::{
    AppliedFactors, CostBreakdown, OrderType, QuoteError, QuoteRequest, Quoter, new_quote_id,
    round2,
};

/// Heuristic adjustments applied after the factor multipliers.
const LARGE_HOME_UPLIFT: f64 = 1.05;
const LONG_HAUL_DISCOUNT: f64 = 0.95;
const SHORT_HOP_UPLIFT: f64 = 1.10;
const LONG_HAUL_KM: u32 = 1000;
const SHORT_HOP_KM: u32 = 20;

pub(super) async fn estimate<G: GeocodingProvider, R: RoutingProvider>(
    quoter: &Quoter<G, R>,
    request: &QuoteRequest,
) -> Result<CostBreakdown, QuoteError> {
    // Validation happens before any resolution so bad requests never touch
    // the network or the caches.
    let size = request
        .move_size
        .as_deref()
        .ok_or_else(|| QuoteError::InvalidInput("moveSize is required for moving orders".into()))?;
    let size = MoveSize::parse(size)
        .ok_or_else(|| QuoteError::InvalidInput(format!("unknown move size: {size}")))?;

    let mut special_items = Vec::with_capacity(request.special_items.len());
    for item in &request.special_items {
        let rate = quoter.rates.special_item_rate(&item.category).ok_or_else(|| {
            QuoteError::InvalidInput(format!("unknown special item category: {}", item.category))
        })?;
        special_items.push((rate, item.quantity));
    }

    let date = request.effective_date();

    let (origin, dest, distance) = quoter
        .resolve_route(&request.from_zip, &request.to_zip)
        .await;
    let km = distance.distance_km as f64;

    let base_cost = quoter.rates.base_cost(size, origin.tier);

    let fuel_adjustment = quoter.fuel.adjustment().await;
    let road_composition = composition_factor(&distance.roads);
    let road_quality = region_road_factor(&origin.region, &dest.region);
    let transport_cost = km
        * quoter.rates.per_km_rate(origin.tier, dest.tier)
        * road_composition
        * road_quality
        * fuel_adjustment;

    // Labor scales with trip duration relative to a reference day, floored
    // so short hops still pay for the crew.
    let duration_scale =
        (distance.duration_mins as f64 / REFERENCE_DURATION_MINS).max(LABOR_DURATION_FLOOR);
    let labor_cost = base_cost * LABOR_RATIO * duration_scale;

    let packing_ratio = if request.premium_packing {
        PACKING_PREMIUM
    } else {
        PACKING_STANDARD
    };
    let packing_cost = base_cost * packing_ratio;

    let floor_surcharge = floor_cost(request.origin_floor, request.origin_elevator)
        + floor_cost(request.destination_floor, request.destination_elevator);

    let parking_surcharge = quoter.rates.parking_surcharge(request.origin_parking_distance)
        + quoter
            .rates
            .parking_surcharge(request.destination_parking_distance);

    let special_item_handling: f64 = special_items
        .iter()
        .map(|(rate, quantity)| rate * *quantity as f64)
        .sum();

    let storage_cost = STORAGE_PER_MONTH * request.storage_months as f64;
    let toll_charges = km * TOLL_PER_KM;
    let insurance_cost = request.insurance_value * INSURANCE_RATE;
    let additional_services: f64 = request.additional_services.iter().map(|s| s.cost).sum();

    let component_sum = base_cost
        + transport_cost
        + labor_cost
        + packing_cost
        + floor_surcharge
        + parking_surcharge
        + special_item_handling
        + storage_cost
        + toll_charges
        + insurance_cost
        + additional_services;

    let time = time_factor(date);
    let vendor = vendor_markup(
        request
            .vendor_type
            .as_deref()
            .map(VendorTier::parse)
            .unwrap_or_default(),
        &origin.region,
        &dest.region,
    );
    let heuristic = heuristic_adjustment(size, distance.distance_km);

    let subtotal = round2(component_sum * time * vendor * heuristic);
    let gst = round2(subtotal * GST_RATE);
    let total = round2(subtotal + gst);

    let description = format!(
        "{} move from {} to {}, about {} km by road ({} confidence)",
        size.label(),
        request.from_zip,
        request.to_zip,
        distance.distance_km,
        distance.confidence.label(),
    );

    Ok(CostBreakdown {
        quote_id: new_quote_id(),
        generated_at: Utc::now(),
        order_type: OrderType::Moving,
        base_cost: round2(base_cost),
        transport_cost: Some(round2(transport_cost)),
        labor_cost: Some(round2(labor_cost)),
        packing_cost: Some(round2(packing_cost)),
        floor_surcharge: Some(round2(floor_surcharge)),
        parking_surcharge: Some(round2(parking_surcharge)),
        special_item_handling: Some(round2(special_item_handling)),
        storage_cost: Some(round2(storage_cost)),
        toll_charges: Some(round2(toll_charges)),
        insurance_cost: Some(round2(insurance_cost)),
        additional_services: Some(round2(additional_services)),
        chargeable_weight: None,
        distance_category: None,
        delivery_estimate: None,
        rider_incentive_pct: None,
        factors: AppliedFactors {
            time,
            vendor_markup: Some(vendor),
            fuel_adjustment: Some(fuel_adjustment),
            road_composition: Some(road_composition),
            road_quality: Some(road_quality),
            heuristic: Some(heuristic),
            surge: None,
            weight_multiplier: None,
            package_multiplier: None,
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

/// Per-endpoint floor surcharge; an elevator halves it.
fn floor_cost(floor: u32, elevator: bool) -> f64 {
    let cost = FLOOR_RATE * floor as f64;
    if elevator { cost * ELEVATOR_DISCOUNT } else { cost }
}

/// Final tweak from operational experience: large homes run over estimate,
/// long hauls amortize fixed costs, short hops do not.
fn heuristic_adjustment(size: MoveSize, distance_km: u32) -> f64 {
    let mut factor = 1.0;
    if size.is_large_home() {
        factor *= LARGE_HOME_UPLIFT;
    }
    if distance_km > LONG_HAUL_KM {
        factor *= LONG_HAUL_DISCOUNT;
    } else if distance_km < SHORT_HOP_KM {
        factor *= SHORT_HOP_UPLIFT;
    }
    factor
}

#[cfg(test)]
mod tests {
    use crate::pricing::testutil::{moving_request, quoter};

    use super::*;

    #[tokio::test]
    async fn metro_to_metro_move_prices_end_to_end() {
        let quoter = quoter().await;
        let request = moving_request();

        let breakdown = quoter.quote(&request).await.unwrap();

        assert_eq!(breakdown.order_type, OrderType::Moving);
        // Delhi is a metro, so the 2BHK metro base applies.
        assert_eq!(breakdown.base_cost, 9000.0);
        // Plain April weekday.
        assert_eq!(breakdown.factors.time, 1.0);
        assert_eq!(breakdown.factors.fuel_adjustment, Some(1.0));
        // Delhi→Mumbai haversine is well past the long-haul threshold.
        assert!(breakdown.distance_km > LONG_HAUL_KM);
        assert_eq!(breakdown.factors.heuristic, Some(LONG_HAUL_DISCOUNT));
        assert_eq!(
            breakdown.distance_confidence,
            crate::distance::DistanceConfidence::Estimated
        );
        assert!(breakdown.total > breakdown.subtotal);
    }

    #[tokio::test]
    async fn gst_is_a_single_line_over_the_subtotal() {
        let quoter = quoter().await;
        let breakdown = quoter.quote(&moving_request()).await.unwrap();

        assert_eq!(breakdown.gst, round2(breakdown.subtotal * GST_RATE));
        assert_eq!(breakdown.total, round2(breakdown.subtotal + breakdown.gst));
    }

    #[tokio::test]
    async fn missing_move_size_is_rejected_without_resolution() {
        let quoter = quoter().await;
        let mut request = moving_request();
        request.move_size = None;

        let err = quoter.quote(&request).await.unwrap_err();
        assert!(matches!(err, QuoteError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn unknown_move_size_is_rejected() {
        let quoter = quoter().await;
        let mut request = moving_request();
        request.move_size = Some("7bhk".to_string());

        let err = quoter.quote(&request).await.unwrap_err();
        assert!(err.to_string().contains("7bhk"));
    }

    #[tokio::test]
    async fn unknown_special_item_is_rejected() {
        let quoter = quoter().await;
        let mut request = moving_request();
        request.special_items = vec![crate::pricing::SpecialItem {
            category: "spaceship".to_string(),
            quantity: 1,
        }];

        let err = quoter.quote(&request).await.unwrap_err();
        assert!(err.to_string().contains("spaceship"));
    }

    #[tokio::test]
    async fn special_items_charge_rate_times_quantity() {
        let quoter = quoter().await;
        let mut request = moving_request();

        let plain = quoter.quote(&request).await.unwrap();

        request.special_items = vec![crate::pricing::SpecialItem {
            category: "fragile".to_string(),
            quantity: 2,
        }];
        let with_items = quoter.quote(&request).await.unwrap();

        assert_eq!(plain.special_item_handling, Some(0.0));
        assert_eq!(with_items.special_item_handling, Some(1000.0));
        assert!(with_items.subtotal > plain.subtotal);
    }

    #[tokio::test]
    async fn premium_packing_costs_more() {
        let quoter = quoter().await;
        let mut request = moving_request();

        let standard = quoter.quote(&request).await.unwrap();
        request.premium_packing = true;
        let premium = quoter.quote(&request).await.unwrap();

        assert_eq!(standard.packing_cost, Some(round2(9000.0 * 0.2)));
        assert_eq!(premium.packing_cost, Some(round2(9000.0 * 0.3)));
    }

    #[tokio::test]
    async fn elevator_halves_the_floor_surcharge() {
        let quoter = quoter().await;
        let mut request = moving_request();
        request.origin_floor = 4;

        let stairs = quoter.quote(&request).await.unwrap();
        request.origin_elevator = true;
        let lift = quoter.quote(&request).await.unwrap();

        assert_eq!(stairs.floor_surcharge, Some(1200.0));
        assert_eq!(lift.floor_surcharge, Some(600.0));
    }

    #[tokio::test]
    async fn storage_and_insurance_are_linear() {
        let quoter = quoter().await;
        let mut request = moving_request();
        request.storage_months = 3;
        request.insurance_value = 200_000.0;

        let breakdown = quoter.quote(&request).await.unwrap();
        assert_eq!(breakdown.storage_cost, Some(6000.0));
        assert_eq!(breakdown.insurance_cost, Some(6000.0));
    }

    #[tokio::test]
    async fn additional_services_sum_at_face_value() {
        let quoter = quoter().await;
        let mut request = moving_request();
        request.additional_services = vec![
            crate::pricing::AdditionalService {
                name: "cleaning".to_string(),
                cost: 1500.0,
            },
            crate::pricing::AdditionalService {
                name: "pet transport".to_string(),
                cost: 2500.0,
            },
        ];

        let breakdown = quoter.quote(&request).await.unwrap();
        assert_eq!(breakdown.additional_services, Some(4000.0));
    }

    #[test]
    fn heuristics_compose() {
        assert_eq!(heuristic_adjustment(MoveSize::TwoBhk, 500), 1.0);
        assert_eq!(heuristic_adjustment(MoveSize::ThreeBhk, 500), 1.05);
        assert_eq!(heuristic_adjustment(MoveSize::TwoBhk, 1500), 0.95);
        assert_eq!(heuristic_adjustment(MoveSize::TwoBhk, 10), 1.10);
        let combined = heuristic_adjustment(MoveSize::FourBhk, 1500);
        assert!((combined - 1.05 * 0.95).abs() < 1e-9);
    }
}
