//! Band-limited step kernels
//!
//! The table holds the left half of a windowed-sinc step response sampled at
//! `PHASE_COUNT + 1` sub-sample phases. The right half of the kernel for
//! phase `p` is the left half of phase `PHASE_COUNT - p`, read backwards, so
//! a full 16-tap kernel is assembled from two rows.

use super::constants::{DELTA_BITS, DELTA_UNIT, HALF_WIDTH, PHASE_COUNT};

/// Read-only table of phase kernels shared by every buffer
#[derive(Debug)]
pub struct StepTable {
    rows: [[i16; HALF_WIDTH]; PHASE_COUNT + 1],
}

/// Windowed-sinc step (0.9, 0.55, 4.5), one row per phase
pub static STEP_TABLE: StepTable = StepTable {
    rows: [
        [43, -115, 350, -488, 1136, -914, 5861, 21022],
        [44, -118, 348, -473, 1076, -799, 5274, 21001],
        [45, -121, 344, -454, 1011, -677, 4706, 20936],
        [46, -122, 336, -431, 942, -549, 4156, 20829],
        [47, -123, 327, -404, 868, -418, 3629, 20679],
        [47, -122, 316, -375, 792, -285, 3124, 20488],
        [47, -120, 303, -344, 714, -151, 2644, 20256],
        [46, -117, 289, -310, 634, -17, 2188, 19985],
        [46, -114, 273, -275, 553, 117, 1758, 19675],
        [44, -108, 255, -237, 471, 247, 1356, 19327],
        [43, -103, 237, -199, 390, 373, 981, 18944],
        [42, -98, 218, -160, 310, 495, 633, 18527],
        [40, -91, 198, -121, 231, 611, 314, 18078],
        [38, -84, 178, -81, 153, 722, 22, 17599],
        [36, -76, 157, -43, 80, 824, -241, 17092],
        [34, -68, 135, -3, 8, 919, -476, 16558],
        [32, -61, 115, 34, -60, 1006, -683, 16001],
        [29, -52, 94, 70, -123, 1083, -862, 15422],
        [27, -44, 73, 106, -184, 1152, -1015, 14824],
        [25, -36, 53, 139, -239, 1211, -1142, 14210],
        [22, -27, 34, 170, -290, 1261, -1244, 13582],
        [20, -20, 16, 199, -335, 1301, -1322, 12942],
        [18, -12, -3, 226, -375, 1331, -1376, 12293],
        [15, -4, -19, 250, -410, 1351, -1408, 11638],
        [13, 3, -35, 272, -439, 1361, -1419, 10979],
        [11, 9, -49, 292, -464, 1362, -1410, 10319],
        [9, 16, -63, 309, -483, 1354, -1383, 9660],
        [7, 22, -75, 322, -496, 1337, -1339, 9005],
        [6, 26, -85, 333, -504, 1312, -1280, 8355],
        [4, 31, -94, 341, -507, 1278, -1205, 7713],
        [3, 35, -102, 347, -506, 1238, -1119, 7082],
        [1, 40, -110, 350, -499, 1190, -1021, 6464],
        [0, 43, -115, 350, -488, 1136, -914, 5861],
    ],
};

impl StepTable {
    /// Number of distinct phases (the table has one extra row for interpolation)
    pub const fn phase_count(&self) -> usize {
        PHASE_COUNT
    }

    /// Left half of the kernel for `phase` (0..=PHASE_COUNT)
    pub fn row(&self, phase: usize) -> &[i16; HALF_WIDTH] {
        &self.rows[phase]
    }

    /// Tap `k` (0..2*HALF_WIDTH) of the full kernel for `phase`
    pub fn tap(&self, phase: usize, k: usize) -> i16 {
        if k < HALF_WIDTH {
            self.rows[phase][k]
        } else {
            self.rows[PHASE_COUNT - phase][2 * HALF_WIDTH - 1 - k]
        }
    }

    /// Adds the kernel for `phase`, blended with the one for `phase + 1`,
    /// into the `2 * HALF_WIDTH` cells of `out`.
    ///
    /// `delta1` weights the lower phase and `delta2` the upper one; callers
    /// split a step so that `delta1 + delta2` is the full amplitude.
    pub(crate) fn add_interpolated(
        &self,
        out: &mut [i64],
        phase: usize,
        delta1: i64,
        delta2: i64,
    ) {
        let (left, right) = out.split_at_mut(HALF_WIDTH);

        let lo = &self.rows[phase];
        let hi = &self.rows[phase + 1];
        for (k, cell) in left.iter_mut().enumerate() {
            *cell += lo[k] as i64 * delta1 + hi[k] as i64 * delta2;
        }

        // Right half comes from the mirrored phases, read backwards
        let lo = &self.rows[PHASE_COUNT - phase];
        let hi = &self.rows[PHASE_COUNT - phase - 1];
        for (k, cell) in right[..HALF_WIDTH].iter_mut().enumerate() {
            let i = HALF_WIDTH - 1 - k;
            *cell += lo[i] as i64 * delta1 + hi[i] as i64 * delta2;
        }
    }

    /// Adds a two-tap step centred on the kernel midpoint.
    ///
    /// `interp` is the sub-sample position in `DELTA_BITS` fixed point; the
    /// step is split linearly between the two middle cells.
    pub(crate) fn add_nearest(&self, out: &mut [i64], interp: i64, delta: i64) {
        let delta2 = delta * interp;
        out[HALF_WIDTH - 1] += delta * DELTA_UNIT - delta2;
        out[HALF_WIDTH] += delta2;
    }

    /// Splits `delta` between two adjacent phases by the interpolation weight
    pub(crate) fn split(delta: i64, interp: i64) -> (i64, i64) {
        let delta2 = (delta * interp) >> DELTA_BITS;
        (delta - delta2, delta2)
    }
}
