use bolero::check;
use sha256x8::{digest_many, digest_one};

#[test]
fn fuzz_batch_ordering() {
    check!().with_type::<Vec<Vec<u8>>>().for_each(|inputs| {
        // =============================================================================
        // GROUPED EXECUTION
        // =============================================================================

        // Collapse lengths onto a few buckets so that full groups of eight occur.
        let inputs: Vec<&[u8]> = inputs
            .iter()
            .map(|input| &input[..input.len() % 5])
            .collect();
        let digests = digest_many(&inputs);

        // =============================================================================
        // VERIFICATION
        // =============================================================================

        assert_eq!(digests.len(), inputs.len());
        for (input, digest) in inputs.iter().zip(&digests) {
            assert_eq!(*digest, digest_one(input), "Batch result out of order");
        }
    });
}
