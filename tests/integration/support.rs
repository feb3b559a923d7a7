use proptest::prelude::*;
use takelist::{Status, Timecode};

pub const SEQUENCES: [&str; 3] = ["Shot1", "Shot2", "Pickups"];
pub const SLATES: [&str; 3] = ["Run in place", "Jump", "Wide, low angle"];

/// One `add_take` call drawn from small name pools so keys collide often.
#[derive(Debug, Clone)]
pub struct AddOp {
    pub sequence: &'static str,
    pub slate: &'static str,
    pub take: u32,
    pub notes: String,
    pub status: Status,
    pub timecode: Timecode,
}

pub fn status_strategy() -> impl Strategy<Value = Status> {
    prop::sample::select(Status::ALL.to_vec())
}

pub fn timecode_strategy() -> impl Strategy<Value = Timecode> {
    (0u8..24, 0u8..60, 0u8..60, 0u8..30)
        .prop_map(|(h, m, s, f)| Timecode::new(h, m, s, f).unwrap())
}

pub fn add_op_strategy() -> impl Strategy<Value = AddOp> {
    (
        prop::sample::select(SEQUENCES.to_vec()),
        prop::sample::select(SLATES.to_vec()),
        1u32..6,
        "[a-zA-Z ,\"\n]{0,12}",
        status_strategy(),
        timecode_strategy(),
    )
        .prop_map(|(sequence, slate, take, notes, status, timecode)| AddOp {
            sequence,
            slate,
            take,
            notes,
            status,
            timecode,
        })
}
