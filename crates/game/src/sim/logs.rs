#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataLog {
    pub title: &'static str,
    pub lines: &'static [&'static str],
}

pub const DATA_LOGS: [DataLog; 5] = [
    DataLog {
        title: "LOG 1: THE LAST CLIMB",
        lines: &[
            "THE LIFTS STOPPED RUNNING IN THE SPRING.",
            "WHOEVER STAYED BELOW LEARNED TO DIG.",
        ],
    },
    DataLog {
        title: "LOG 2: SAND IN THE BOARDS",
        lines: &[
            "EVERY CIRCUIT WE FIND IS HALF BURIED.",
            "TWO BROKEN ONES STILL MAKE ONE GOOD ONE.",
        ],
    },
    DataLog {
        title: "LOG 3: GATE PROTOCOL",
        lines: &[
            "THE CITY TAKES ONLY CLEAN PARTS.",
            "TOKENS ARE THE ONLY WORD THEY TRUST.",
        ],
    },
    DataLog {
        title: "LOG 4: STORM SEASON",
        lines: &[
            "WHEN THE WIND RISES, WALK SLOWER.",
            "THE DUNES MOVE THE PARTS FOR YOU.",
        ],
    },
    DataLog {
        title: "LOG 5: ABOVE THE CLOUDS",
        lines: &[
            "THEY NEVER LOOK DOWN.",
            "ONE DAY THE WORKSHOP WILL BUILD A LIFT.",
        ],
    },
];

pub fn data_log(entry: u32) -> Option<&'static DataLog> {
    DATA_LOGS.get(entry as usize)
}
