use primitive_guest_type::PrimitiveGuestTypeRule;
use primitive_privacy_tier::PrimitivePrivacyTier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// The reference data a client needs to recompute quotes locally
///
/// Pricing is pure, so a UI holding this data can reprice the cart on
/// every guest, bed or privacy change without a server round trip
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingReferenceResponse {
	pub guest_type_rules: Vec<GuestTypeRuleResponse>,
	pub privacy_tiers:    Vec<PrivacyTierResponse>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestTypeRuleResponse {
	pub id:              i32,
	pub label:           String,
	pub age_min:         Option<i32>,
	pub age_max:         Option<i32>,
	pub discount_pct:    Decimal,
	pub city_tax:        bool,
	pub city_tax_amount: Decimal,
}

impl From<PrimitiveGuestTypeRule> for GuestTypeRuleResponse {
	fn from(rule: PrimitiveGuestTypeRule) -> Self {
		Self {
			id:              rule.id,
			label:           rule.label,
			age_min:         rule.age_min,
			age_max:         rule.age_max,
			discount_pct:    rule.discount_pct,
			city_tax:        rule.city_tax,
			city_tax_amount: rule.city_tax_amount,
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyTierResponse {
	pub position: i32,
	pub price:    Decimal,
}

impl From<PrimitivePrivacyTier> for PrivacyTierResponse {
	fn from(tier: PrimitivePrivacyTier) -> Self {
		Self { position: tier.position, price: tier.price }
	}
}
