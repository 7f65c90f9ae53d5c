use primitive_bed::PrimitiveBed;
use room::Room;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BedResponse {
	pub id:       i32,
	pub name:     String,
	pub price_bb: Decimal,
	pub price_hb: Decimal,
}

impl From<PrimitiveBed> for BedResponse {
	fn from(bed: PrimitiveBed) -> Self {
		Self {
			id:       bed.id,
			name:     bed.name,
			price_bb: bed.price_bb,
			price_hb: bed.price_hb,
		}
	}
}

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
	pub id:          i32,
	pub name:        String,
	pub description: Option<String>,
	pub beds:        Vec<BedResponse>,
}

impl From<Room> for RoomResponse {
	fn from(value: Room) -> Self {
		Self {
			id:          value.room.id,
			name:        value.room.name,
			description: value.room.description,
			beds:        value.beds.into_iter().map(Into::into).collect(),
		}
	}
}
