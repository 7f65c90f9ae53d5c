//! Pure price computation for prospective stays
//!
//! Every surface that shows or charges a total goes through [`quote_cart`],
//! so a quoted price and a charged price can never diverge. Nothing here
//! performs I/O; the reference data comes in as plain slices so the same
//! computation can run against cached data anywhere.
//!
//! Missing reference data never fails a computation: an unmatched guest
//! type prices at the full base rate, an unassigned guest contributes
//! zero. A data-entry gap degrades price accuracy rather than blocking
//! checkout.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use db::PensionType;
use primitive_bed::PrimitiveBed;
use primitive_guest_type::{PrimitiveGuestTypeRule, match_label};
use primitive_privacy_tier::PrimitivePrivacyTier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A member of the shopper's party while assembling a cart
///
/// Room and bed stay unset until the shopper assigns them
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
	pub guest_type: String,
	pub room_id:    Option<i32>,
	pub bed_id:     Option<i32>,
}

/// The beds a shopper pays to keep empty in one room on one night
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySelection {
	pub room_id: i32,
	pub night:   NaiveDate,
	pub bed_ids: Vec<i32>,
}

/// The price of one bed for one guest over a whole stay
///
/// The undiscounted base is retained so receipts can show
/// "was X, now Y"
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BedQuote {
	pub base_per_night: Decimal,
	pub per_night:      Decimal,
	pub discount_pct:   Decimal,
	pub total:          Decimal,
	pub city_tax:       Decimal,
}

/// One guest's line inside a [`RoomQuote`]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestQuote {
	pub guest_type: String,
	pub bed_id:     Option<i32>,
	#[serde(flatten)]
	pub quote:      BedQuote,
}

/// The price of all assigned guests in one room
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomQuote {
	pub room_id:  i32,
	pub guests:   Vec<GuestQuote>,
	pub total:    Decimal,
	pub city_tax: Decimal,
}

/// The full cart total
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartQuote {
	pub rooms:                    Vec<RoomQuote>,
	pub privacy_cost:             Decimal,
	pub additional_services_cost: Decimal,
	pub subtotal:                 Decimal,
	pub city_tax_total:           Decimal,
	pub grand_total:              Decimal,
}

/// The progressive privacy-block price table, in position order
#[derive(Clone, Debug, Default)]
pub struct PrivacyTiers(Vec<Decimal>);

impl PrivacyTiers {
	/// Build the table from its rows, sorted ascending by position once
	#[must_use]
	pub fn from_table(mut tiers: Vec<PrimitivePrivacyTier>) -> Self {
		tiers.sort_by_key(|tier| tier.position);

		Self(tiers.into_iter().map(|tier| tier.price).collect())
	}

	/// Build the table from prices already in position order
	#[must_use]
	pub fn from_prices(prices: Vec<Decimal>) -> Self { Self(prices) }

	/// The price of blocking `count` beds in one room on one night
	///
	/// The n-th blocked bed costs the price at position n, positions past
	/// the end of the table clamp to the last tier. Which physical beds
	/// are blocked never matters, only how many
	#[must_use]
	pub fn price_for(&self, count: usize) -> Decimal {
		let Some(last) = self.0.last() else {
			return Decimal::ZERO;
		};

		(0..count)
			.map(|position| self.0.get(position).copied().unwrap_or(*last))
			.sum()
	}
}

/// Price one bed for one guest over `nights` nights
///
/// `rule` is the guest's matched [`PrimitiveGuestTypeRule`]; without one
/// the bed prices at the full base rate with no city tax
#[must_use]
pub fn bed_price(
	bed: &PrimitiveBed,
	rule: Option<&PrimitiveGuestTypeRule>,
	pension_type: PensionType,
	nights: u32,
) -> BedQuote {
	let base_per_night = bed.nightly_price(pension_type);
	let discount_pct = rule.map_or(Decimal::ZERO, |rule| rule.discount_pct);

	let per_night = base_per_night
		* (Decimal::ONE - discount_pct / Decimal::ONE_HUNDRED);

	let nights = Decimal::from(nights);
	let total = per_night * nights;

	let city_tax = rule
		.filter(|rule| rule.city_tax)
		.map_or(Decimal::ZERO, |rule| rule.city_tax_amount * nights);

	BedQuote { base_per_night, per_night, discount_pct, total, city_tax }
}

/// Price every guest assigned to one room
///
/// Guests without a bed (or whose bed id matches no known bed) appear in
/// the breakdown with a zero quote
#[must_use]
pub fn room_total(
	room_id: i32,
	guests: &[Guest],
	beds: &[PrimitiveBed],
	rules: &[PrimitiveGuestTypeRule],
	pension_type: PensionType,
	nights: u32,
) -> RoomQuote {
	let guests: Vec<GuestQuote> = guests
		.iter()
		.filter(|guest| guest.room_id == Some(room_id))
		.map(|guest| {
			let bed = guest
				.bed_id
				.and_then(|bed_id| beds.iter().find(|bed| bed.id == bed_id));

			let quote = match bed {
				Some(bed) => {
					bed_price(
						bed,
						match_label(rules, &guest.guest_type),
						pension_type,
						nights,
					)
				},
				None => BedQuote::default(),
			};

			GuestQuote {
				guest_type: guest.guest_type.clone(),
				bed_id: guest.bed_id,
				quote,
			}
		})
		.collect();

	let total = guests.iter().map(|guest| guest.quote.total).sum();
	let city_tax = guests.iter().map(|guest| guest.quote.city_tax).sum();

	RoomQuote { room_id, guests, total, city_tax }
}

/// The total privacy-block surcharge over all selections
#[must_use]
pub fn privacy_total(
	selections: &[PrivacySelection],
	tiers: &PrivacyTiers,
) -> Decimal {
	selections
		.iter()
		.map(|selection| {
			let unique: HashSet<i32> =
				selection.bed_ids.iter().copied().collect();

			tiers.price_for(unique.len())
		})
		.sum()
}

/// Combine room quotes, privacy surcharges and additional services into
/// the grand total
///
/// subtotal = room totals + privacy cost;
/// grand total = subtotal + additional services + city tax
#[must_use]
pub fn cart_total(
	rooms: Vec<RoomQuote>,
	privacy_cost: Decimal,
	additional_services_cost: Decimal,
) -> CartQuote {
	let room_sum: Decimal = rooms.iter().map(|room| room.total).sum();
	let city_tax_total: Decimal = rooms.iter().map(|room| room.city_tax).sum();

	let subtotal = room_sum + privacy_cost;
	let grand_total = subtotal + additional_services_cost + city_tax_total;

	CartQuote {
		rooms,
		privacy_cost,
		additional_services_cost,
		subtotal,
		city_tax_total,
		grand_total,
	}
}

/// Quote a full cart
///
/// The one entry point behind every displayed and every charged total
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn quote_cart(
	guests: &[Guest],
	beds: &[PrimitiveBed],
	rules: &[PrimitiveGuestTypeRule],
	tiers: &PrivacyTiers,
	selections: &[PrivacySelection],
	pension_type: PensionType,
	nights: u32,
	additional_services_cost: Decimal,
) -> CartQuote {
	let room_ids: BTreeSet<i32> =
		guests.iter().filter_map(|guest| guest.room_id).collect();

	let rooms: Vec<RoomQuote> = room_ids
		.into_iter()
		.map(|room_id| {
			room_total(room_id, guests, beds, rules, pension_type, nights)
		})
		.collect();

	let privacy_cost = privacy_total(selections, tiers);

	cart_total(rooms, privacy_cost, additional_services_cost)
}
