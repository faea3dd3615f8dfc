use waterfall::data::raster::{CellRect, ResampleMode, RingRaster};
use waterfall::WaterfallError;

fn ramp(n: usize) -> Vec<f32> {
    (0..n).map(|i| i as f32).collect()
}

#[test]
fn zero_dimensions_rejected() {
    assert!(matches!(
        RingRaster::<f32>::new(0.0, 1.0, 0, 4),
        Err(WaterfallError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        RingRaster::<f32>::new(0.0, 1.0, 4, 0),
        Err(WaterfallError::InvalidDimensions { .. })
    ));
}

#[test]
fn oversized_dimensions_rejected() {
    // cell count overflows usize
    assert!(matches!(
        RingRaster::<u8>::new(0.0, 1.0, usize::MAX / 2 + 1, 2),
        Err(WaterfallError::InvalidDimensions { .. })
    ));
    // cell count fits, byte size does not
    assert!(matches!(
        RingRaster::<f64>::new(0.0, 1.0, usize::MAX / 8, 2),
        Err(WaterfallError::InvalidDimensions { .. })
    ));
}

#[test]
fn reversed_x_bounds_are_swapped() {
    let r = RingRaster::<f32>::new(500.0, 0.0, 4, 4).unwrap();
    assert_eq!(r.x_interval(), (0.0, 500.0));
    assert_eq!(r.y_interval(), (0.0, 4.0));
}

#[test]
fn history_length_saturates_at_capacity() {
    let mut r = RingRaster::<u16>::new(0.0, 3.0, 5, 3).unwrap();
    for i in 0..12u16 {
        r.add_row(&[i, i, i], i as i64).unwrap();
        assert_eq!(r.current_history_length(), (i as usize + 1).min(5));
    }
    assert!(r.is_full());
}

#[test]
fn rows_read_back_oldest_first() {
    let mut r = RingRaster::<i32>::new(0.0, 2.0, 4, 2).unwrap();
    for i in 1..=3 {
        r.add_row(&[i, -i], 100 + i as i64).unwrap();
    }
    let rows: Vec<Vec<i32>> = r.written_rows().map(|(_, row)| row.to_vec()).collect();
    assert_eq!(rows, vec![vec![1, -1], vec![2, -2], vec![3, -3]]);
    // newest row lives in the last physical slot
    assert_eq!(r.row(3), Some(&[3, -3][..]));
    assert_eq!(r.row(0), Some(&[0, 0][..]));
    assert_eq!(r.row(4), None);
    assert_eq!(r.timestamps(), &[0, 101, 102, 103]);
}

#[test]
fn length_mismatch_leaves_state_untouched() {
    let mut r = RingRaster::<f32>::new(0.0, 500.0, 64, 126).unwrap();
    r.add_row(&ramp(126), 42).unwrap();
    let data_before = r.data().to_vec();
    let ts_before = r.timestamps().to_vec();

    let err = r.add_row(&ramp(10), 43).unwrap_err();
    assert!(matches!(
        err,
        WaterfallError::LengthMismatch {
            expected: 126,
            actual: 10
        }
    ));
    assert_eq!(r.current_history_length(), 1);
    assert_eq!(r.data(), &data_before[..]);
    assert_eq!(r.timestamps(), &ts_before[..]);
}

#[test]
fn sample_newest_row_and_exclusive_upper_bound() {
    let mut r = RingRaster::<f32>::new(0.0, 500.0, 64, 126).unwrap();
    r.add_row(&ramp(126), 1).unwrap();
    assert_eq!(r.sample(0.0, 63.0), 0.0);
    assert!(r.sample(500.0, 63.0).is_nan());
    assert!(r.sample(-0.1, 63.0).is_nan());
    assert!(r.sample(0.0, 64.0).is_nan());
    assert!(r.sample(0.0, -1.0).is_nan());
}

#[test]
fn sample_returns_exact_cell_value() {
    let mut r = RingRaster::<f64>::new(0.0, 500.0, 64, 126).unwrap();
    let row: Vec<f64> = (0..126).map(|i| i as f64 * 1.5).collect();
    r.add_row(&row, 1).unwrap();
    let dx = 500.0 / 126.0;
    for col in [0usize, 1, 62, 125] {
        let x = col as f64 * dx + dx / 2.0;
        assert_eq!(r.sample(x, 63.5), row[col]);
    }
    // unwritten rows read as zero
    assert_eq!(r.sample(250.0, 10.0), 0.0);
}

#[test]
fn eviction_drops_oldest_row() {
    let mut r = RingRaster::<f32>::new(0.0, 500.0, 64, 126).unwrap();
    for i in 0..65 {
        r.add_row(&vec![i as f32; 126], i as i64 + 1).unwrap();
    }
    assert_eq!(r.current_history_length(), 64);
    assert_eq!(r.row(0).unwrap()[0], 1.0);
    assert_eq!(r.row(63).unwrap()[0], 64.0);
    assert_eq!(r.sample(10.0, 0.0), 1.0);
    assert_eq!(r.row_timestamp(0.0), 2);
    assert_eq!(r.data_range(), (1.0, 64.0));
}

#[test]
fn display_range_independent_from_data() {
    let mut r = RingRaster::<f32>::new(0.0, 1.0, 2, 1).unwrap();
    assert_eq!(r.display_range(), (0.0, 0.0));
    r.set_display_range(10.0, -10.0);
    assert_eq!(r.display_range(), (-10.0, 10.0));
    r.add_row(&[100.0], 1).unwrap();
    assert_eq!(r.display_range(), (-10.0, 10.0));
    r.clear();
    assert_eq!(r.display_range(), (-10.0, 10.0));
}

#[test]
fn clear_resets_and_replays_like_fresh() {
    let rows: [[u8; 3]; 3] = [[1, 2, 3], [4, 5, 6], [7, 8, 9]];
    let mut used = RingRaster::<u8>::new(0.0, 3.0, 2, 3).unwrap();
    for (i, row) in rows.iter().enumerate() {
        used.add_row(row, i as i64 + 1).unwrap();
    }
    used.clear();
    assert_eq!(used.current_history_length(), 0);
    assert_eq!(used.data_range(), (0.0, 0.0));
    assert!(used.timestamps().iter().all(|t| *t == 0));

    let mut fresh = RingRaster::<u8>::new(0.0, 3.0, 2, 3).unwrap();
    for (i, row) in rows.iter().take(2).enumerate() {
        used.add_row(row, i as i64 + 1).unwrap();
        fresh.add_row(row, i as i64 + 1).unwrap();
    }
    assert_eq!(used.data(), fresh.data());
    assert_eq!(used.timestamps(), fresh.timestamps());
}

#[test]
fn data_range_scans_written_rows_only() {
    let mut r = RingRaster::<i16>::new(0.0, 2.0, 3, 2).unwrap();
    assert_eq!(r.data_range(), (0.0, 0.0));
    r.add_row(&[5, 7], 1).unwrap();
    // the zero-filled unwritten rows must not drag the minimum down
    assert_eq!(r.data_range(), (5.0, 7.0));
}

#[test]
fn row_timestamp_out_of_range_is_zero() {
    let mut r = RingRaster::<f32>::new(0.0, 1.0, 3, 1).unwrap();
    r.add_row(&[1.0], 77).unwrap();
    assert_eq!(r.row_timestamp(2.0), 77);
    assert_eq!(r.row_timestamp(2.9), 77);
    assert_eq!(r.row_timestamp(1.0), 0);
    assert_eq!(r.row_timestamp(3.0), 0);
    assert_eq!(r.row_timestamp(-0.5), 0);
    assert_eq!(r.row_timestamp(f64::NAN), 0);
}

#[test]
fn pixel_footprint_per_mode() {
    let r = RingRaster::<f32>::new(0.0, 500.0, 64, 125).unwrap();
    assert_eq!(
        r.pixel_footprint(ResampleMode::NearestNeighbour),
        Some(CellRect {
            x: 0.0,
            y: 0.0,
            width: 4.0,
            height: 1.0
        })
    );
    assert_eq!(r.pixel_footprint(ResampleMode::BilinearInterpolation), None);
}

#[test]
fn add_row_now_stamps_current_time() {
    let mut r = RingRaster::<f32>::new(0.0, 1.0, 1, 1).unwrap();
    let before = chrono::Utc::now().timestamp();
    r.add_row_now(&[1.0]).unwrap();
    let after = chrono::Utc::now().timestamp();
    let ts = r.row_timestamp(0.0);
    assert!(ts >= before && ts <= after);
}
