//! Luau equivalents of the native workloads.
//! Each script times its own hot section through the `bench` API and stores the
//! result in the `elapsed_ms` global.

use crate::workload::WorkloadKind;

/// Global the scripts assign their measured time to.
pub const RESULT_GLOBAL: &str = "elapsed_ms";

/// Factorial-style nested loop over `0..=multiplier*1000`.
pub const MATH_SCRIPT: &str = r#"
bench.start_timer()
for i = 0, bench.multiplier * 1000 do
    local result = 1
    for j = 1, i do
        result = result * j
    end
end
elapsed_ms = bench.end_timer()
"#;

/// Fills `multiplier*100000` random values in [0, 100000), then times `table.sort`.
pub const SORT_SCRIPT: &str = r#"
local arr = {}
for i = 1, bench.multiplier * 100000 do
    arr[i] = math.random(0, 99999)
end
bench.print_same_line("sorting " .. tostring(#arr) .. " values")
bench.start_timer()
table.sort(arr)
elapsed_ms = bench.end_timer()
"#;

pub fn script_for(kind: WorkloadKind) -> &'static str {
    match kind {
        WorkloadKind::Math => MATH_SCRIPT,
        WorkloadKind::Sort => SORT_SCRIPT,
    }
}
