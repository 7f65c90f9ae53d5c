use chrono::NaiveDateTime;
use db::PensionType;
use pricing::{
	Guest,
	PrivacySelection,
	PrivacyTiers,
	bed_price,
	cart_total,
	privacy_total,
	quote_cart,
	room_total,
};
use primitive_bed::PrimitiveBed;
use primitive_guest_type::{PrimitiveGuestTypeRule, match_label};
use primitive_privacy_tier::PrimitivePrivacyTier;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn bed(id: i32, room_id: i32, price_bb: Decimal, price_hb: Decimal) -> PrimitiveBed {
	PrimitiveBed {
		id,
		room_id,
		name: format!("bed {id}"),
		price_bb,
		price_hb,
		sort_index: id,
		created_at: NaiveDateTime::default(),
		updated_at: NaiveDateTime::default(),
	}
}

fn rule(
	id: i32,
	label: &str,
	discount_pct: Decimal,
	city_tax: bool,
	city_tax_amount: Decimal,
) -> PrimitiveGuestTypeRule {
	PrimitiveGuestTypeRule {
		id,
		label: label.to_string(),
		age_min: None,
		age_max: None,
		discount_pct,
		city_tax,
		city_tax_amount,
		created_at: NaiveDateTime::default(),
		updated_at: NaiveDateTime::default(),
	}
}

fn tier(position: i32, price: Decimal) -> PrimitivePrivacyTier {
	PrimitivePrivacyTier { id: position + 1, position, price }
}

fn guest(guest_type: &str, room_id: Option<i32>, bed_id: Option<i32>) -> Guest {
	Guest { guest_type: guest_type.to_string(), room_id, bed_id }
}

#[test]
fn adult_and_discounted_child_for_three_nights() {
	let beds = [bed(1, 1, dec!(50), dec!(70)), bed(2, 1, dec!(60), dec!(80))];
	let rules = [
		rule(1, "Adulti", dec!(0), false, dec!(0)),
		rule(2, "Bambini", dec!(30), false, dec!(0)),
	];

	let guests = [
		guest("Adulti", Some(1), Some(1)),
		guest("Bambini", Some(1), Some(2)),
	];

	let quote = room_total(1, &guests, &beds, &rules, PensionType::Bb, 3);

	assert_eq!(quote.guests.len(), 2);
	assert_eq!(quote.guests[0].quote.total, dec!(150));
	assert_eq!(quote.guests[1].quote.total, dec!(126.0));
	assert_eq!(quote.total, dec!(276.0));
}

#[test]
fn half_board_uses_the_other_base_price() {
	let beds = [bed(1, 1, dec!(50), dec!(70))];
	let rules = [rule(1, "Adulti", dec!(0), false, dec!(0))];
	let guests = [guest("Adulti", Some(1), Some(1))];

	let quote = room_total(1, &guests, &beds, &rules, PensionType::Hb, 3);

	assert_eq!(quote.total, dec!(210));
}

#[test]
fn bed_quote_retains_the_undiscounted_base() {
	let child_bed = bed(2, 1, dec!(60), dec!(80));
	let child_rule = rule(2, "Bambini", dec!(30), false, dec!(0));

	let quote =
		bed_price(&child_bed, Some(&child_rule), PensionType::Bb, 3);

	assert_eq!(quote.base_per_night, dec!(60));
	assert_eq!(quote.per_night, dec!(42.0));
	assert_eq!(quote.discount_pct, dec!(30));
	assert_eq!(quote.total, dec!(126.0));
}

#[test]
fn unmatched_guest_type_prices_at_full_rate() {
	let beds = [bed(1, 1, dec!(50), dec!(70))];
	let rules = [rule(1, "Adulti", dec!(0), true, dec!(2))];
	let guests = [guest("Neonati", Some(1), Some(1))];

	assert!(match_label(&rules, "Neonati").is_none());

	let quote = room_total(1, &guests, &beds, &rules, PensionType::Bb, 2);

	assert_eq!(quote.total, dec!(100));
	assert_eq!(quote.city_tax, dec!(0));
}

#[test]
fn unassigned_guest_contributes_zero() {
	let beds = [bed(1, 1, dec!(50), dec!(70))];
	let rules = [rule(1, "Adulti", dec!(0), false, dec!(0))];

	let guests = [
		guest("Adulti", Some(1), Some(1)),
		guest("Adulti", Some(1), None),
	];

	let quote = room_total(1, &guests, &beds, &rules, PensionType::Bb, 2);

	assert_eq!(quote.guests.len(), 2);
	assert_eq!(quote.guests[1].quote.total, dec!(0));
	assert_eq!(quote.total, dec!(100));
}

#[test]
fn unknown_bed_id_contributes_zero() {
	let beds = [bed(1, 1, dec!(50), dec!(70))];
	let rules = [rule(1, "Adulti", dec!(0), false, dec!(0))];
	let guests = [guest("Adulti", Some(1), Some(99))];

	let quote = room_total(1, &guests, &beds, &rules, PensionType::Bb, 2);

	assert_eq!(quote.total, dec!(0));
}

#[test]
fn city_tax_applies_per_taxed_guest_per_night() {
	let beds = [bed(1, 1, dec!(50), dec!(70)), bed(2, 1, dec!(60), dec!(80))];
	let rules = [
		rule(1, "Adulti", dec!(0), true, dec!(2.50)),
		rule(2, "Bambini", dec!(30), false, dec!(0)),
	];

	let guests = [
		guest("Adulti", Some(1), Some(1)),
		guest("Bambini", Some(1), Some(2)),
	];

	let quote = room_total(1, &guests, &beds, &rules, PensionType::Bb, 3);

	assert_eq!(quote.guests[0].quote.city_tax, dec!(7.50));
	assert_eq!(quote.guests[1].quote.city_tax, dec!(0));
	assert_eq!(quote.city_tax, dec!(7.50));
}

#[test]
fn fourth_blocked_bed_clamps_to_the_last_tier() {
	let tiers = PrivacyTiers::from_prices(vec![dec!(20), dec!(15), dec!(10)]);

	assert_eq!(tiers.price_for(0), dec!(0));
	assert_eq!(tiers.price_for(1), dec!(20));
	assert_eq!(tiers.price_for(2), dec!(35));
	assert_eq!(tiers.price_for(3), dec!(45));
	assert_eq!(tiers.price_for(4), dec!(55));
	assert_eq!(tiers.price_for(6), dec!(75));
}

#[test]
fn privacy_price_is_monotone_in_blocked_count() {
	let tiers = PrivacyTiers::from_prices(vec![dec!(20), dec!(15), dec!(10)]);

	let mut previous = Decimal::ZERO;

	for count in 0..=8 {
		let price = tiers.price_for(count);

		assert!(price >= previous);

		previous = price;
	}
}

#[test]
fn privacy_price_ignores_which_beds_are_blocked() {
	let tiers = PrivacyTiers::from_prices(vec![dec!(20), dec!(15), dec!(10)]);

	let night = "2026-08-10".parse().unwrap();

	let first = [PrivacySelection {
		room_id: 1,
		night,
		bed_ids: vec![3, 4],
	}];
	let second = [PrivacySelection {
		room_id: 1,
		night,
		bed_ids: vec![7, 1],
	}];

	assert_eq!(
		privacy_total(&first, &tiers),
		privacy_total(&second, &tiers),
	);
}

#[test]
fn duplicate_bed_ids_count_once() {
	let tiers = PrivacyTiers::from_prices(vec![dec!(20), dec!(15), dec!(10)]);

	let night = "2026-08-10".parse().unwrap();

	let selection =
		[PrivacySelection { room_id: 1, night, bed_ids: vec![3, 3, 4] }];

	assert_eq!(privacy_total(&selection, &tiers), dec!(35));
}

#[test]
fn empty_tier_table_prices_to_zero() {
	let tiers = PrivacyTiers::from_prices(Vec::new());

	assert_eq!(tiers.price_for(3), dec!(0));
}

#[test]
fn tier_table_is_ordered_by_position_not_insertion() {
	let tiers = PrivacyTiers::from_table(vec![
		tier(2, dec!(10)),
		tier(0, dec!(20)),
		tier(1, dec!(15)),
	]);

	assert_eq!(tiers.price_for(1), dec!(20));
	assert_eq!(tiers.price_for(4), dec!(55));
}

#[test]
fn cart_total_identity_holds_exactly() {
	let beds = [bed(1, 1, dec!(50), dec!(70)), bed(2, 2, dec!(60), dec!(80))];
	let rules = [
		rule(1, "Adulti", dec!(0), true, dec!(2.50)),
		rule(2, "Bambini", dec!(30), false, dec!(0)),
	];
	let tiers = PrivacyTiers::from_prices(vec![dec!(20), dec!(15), dec!(10)]);

	let guests = [
		guest("Adulti", Some(1), Some(1)),
		guest("Bambini", Some(2), Some(2)),
	];
	let selections = [PrivacySelection {
		room_id: 2,
		night:   "2026-08-10".parse().unwrap(),
		bed_ids: vec![5],
	}];

	let quote = quote_cart(
		&guests,
		&beds,
		&rules,
		&tiers,
		&selections,
		PensionType::Bb,
		3,
		dec!(12.50),
	);

	let room_sum: Decimal =
		quote.rooms.iter().map(|room| room.total).sum();
	let city_tax_sum: Decimal =
		quote.rooms.iter().map(|room| room.city_tax).sum();

	assert_eq!(quote.subtotal, room_sum + quote.privacy_cost);
	assert_eq!(quote.city_tax_total, city_tax_sum);
	assert_eq!(
		quote.grand_total,
		quote.subtotal
			+ quote.additional_services_cost
			+ quote.city_tax_total,
	);

	assert_eq!(quote.privacy_cost, dec!(20));
	assert_eq!(quote.subtotal, dec!(296.0));
	assert_eq!(quote.grand_total, dec!(316.00));
}

#[test]
fn cart_groups_guests_by_room() {
	let beds = [bed(1, 1, dec!(50), dec!(70)), bed(2, 2, dec!(60), dec!(80))];
	let rules = [rule(1, "Adulti", dec!(0), false, dec!(0))];

	let guests = [
		guest("Adulti", Some(2), Some(2)),
		guest("Adulti", Some(1), Some(1)),
		guest("Adulti", None, None),
	];

	let quote = quote_cart(
		&guests,
		&beds,
		&rules,
		&PrivacyTiers::from_prices(Vec::new()),
		&[],
		PensionType::Bb,
		1,
		Decimal::ZERO,
	);

	assert_eq!(quote.rooms.len(), 2);
	assert_eq!(quote.rooms[0].room_id, 1);
	assert_eq!(quote.rooms[1].room_id, 2);
	assert_eq!(quote.grand_total, dec!(110));
}

#[test]
fn cart_total_sums_prebuilt_room_quotes() {
	let beds = [bed(1, 1, dec!(50), dec!(70))];
	let rules = [rule(1, "Adulti", dec!(0), true, dec!(1))];
	let guests = [guest("Adulti", Some(1), Some(1))];

	let room = room_total(1, &guests, &beds, &rules, PensionType::Bb, 2);

	let quote = cart_total(vec![room], dec!(15), dec!(5));

	assert_eq!(quote.subtotal, dec!(115));
	assert_eq!(quote.city_tax_total, dec!(2));
	assert_eq!(quote.grand_total, dec!(122));
}
