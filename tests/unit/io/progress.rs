//! Tests for progress bookkeeping across batch sizes

#[cfg(test)]
mod tests {
    use shrinkfit::convergence::{Attempt, EncodeParameters, Phase};
    use shrinkfit::io::progress::ProgressManager;
    use std::path::Path;

    fn attempt(number: usize) -> Attempt {
        Attempt {
            number,
            phase: Phase::Quality,
            parameters: EncodeParameters {
                quality: 101 - number as u8,
                scale: 100,
            },
            size: 1000,
        }
    }

    // Tests a small batch runs through every lifecycle call
    // Verified by panicking on out-of-range file indices
    #[test]
    fn test_small_batch_lifecycle() {
        let mut pm = ProgressManager::new();
        pm.initialize(2);
        assert_eq!(pm.file_count(), 2);

        pm.start_file(0, Path::new("/a/one.png"), 25);
        pm.update_attempt(0, &attempt(1));
        pm.update_attempt(0, &attempt(2));
        pm.complete_file(0, "✓");
        pm.start_file(1, Path::new("/a/two.png"), 25);
        pm.complete_file(1, "✗");
        pm.println("done");
        pm.finish();
    }

    // Tests large batches with a rolling window and out-of-order indices
    // Verified by indexing file bars without bounds checks
    #[test]
    fn test_large_batch_rolling_window() {
        let mut pm = ProgressManager::default();
        pm.initialize(20);

        for index in 0..20 {
            pm.start_file(index, Path::new("img.jpg"), 10);
            pm.update_attempt(index, &attempt(3));
            pm.complete_file(index, "-");
        }
        // Updates for files never started are ignored
        pm.update_attempt(99, &attempt(1));
        pm.finish();
        assert_eq!(pm.file_count(), 20);
    }
}
