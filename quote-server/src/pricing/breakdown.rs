//! The itemized quote returned to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::distance::DistanceConfidence;
use crate::rates::DistanceCategory;

/// Which pipeline priced the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Moving,
    Parcel,
}

/// Every multiplier that entered the final amount, surfaced so callers
/// can see why two otherwise-identical quotes differ.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFactors {
    /// Month × weekday × holiday multiplier; always applied.
    pub time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_markup: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_adjustment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub road_composition: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub road_quality: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heuristic: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surge: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_multiplier: Option<f64>,
}

/// Itemized, GST-inclusive quote. Amounts are rupees rounded to two
/// decimals; line items absent from the order are omitted from the JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub quote_id: String,
    pub generated_at: DateTime<Utc>,
    pub order_type: OrderType,

    pub base_cost: f64,

    // Relocation line items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labor_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packing_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_surcharge: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_surcharge: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_item_handling: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toll_charges: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_services: Option<f64>,

    // Parcel-specific fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chargeable_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_category: Option<DistanceCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_estimate: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rider_incentive_pct: Option<f64>,

    pub factors: AppliedFactors,

    /// Pre-GST amount after all factors.
    pub subtotal: f64,
    pub gst: f64,
    /// `subtotal + gst`, the customer-facing figure.
    pub total: f64,

    pub distance_km: u32,
    pub duration_mins: u32,
    pub distance_confidence: DistanceConfidence,

    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_type_serde_round_trip() {
        assert_eq!(
            serde_json::to_string(&OrderType::Moving).unwrap(),
            "\"moving\""
        );
        let parsed: OrderType = serde_json::from_str("\"parcel\"").unwrap();
        assert_eq!(parsed, OrderType::Parcel);
    }

    #[test]
    fn absent_line_items_are_omitted() {
        let breakdown = CostBreakdown {
            quote_id: "Q-test".to_string(),
            generated_at: Utc::now(),
            order_type: OrderType::Parcel,
            base_cost: 250.0,
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
            chargeable_weight: Some(8.0),
            distance_category: Some(DistanceCategory::Intracity),
            delivery_estimate: Some("same day"),
            rider_incentive_pct: Some(5.0),
            factors: AppliedFactors {
                time: 1.0,
                vendor_markup: None,
                fuel_adjustment: None,
                road_composition: None,
                road_quality: None,
                heuristic: None,
                surge: Some(1.0),
                weight_multiplier: Some(1.2),
                package_multiplier: Some(1.0),
            },
            subtotal: 250.0,
            gst: 45.0,
            total: 295.0,
            distance_km: 12,
            duration_mins: 18,
            distance_confidence: DistanceConfidence::Estimated,
            description: "test".to_string(),
        };

        let json = serde_json::to_value(&breakdown).unwrap();
        assert!(json.get("laborCost").is_none());
        assert!(json.get("vendorMarkup").is_none());
        assert_eq!(json["chargeableWeight"], 8.0);
        assert_eq!(json["distanceCategory"], "intracity");
        assert_eq!(json["orderType"], "parcel");
    }
}
