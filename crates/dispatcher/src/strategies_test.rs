#[cfg(test)]
mod strategies_tests {
    use std::collections::BTreeSet;

    use crate::strategies::*;
    use roster_core::{models::specialities, *};

    struct TestWorker {
        id: StaffId,
        specialities: BTreeSet<Speciality>,
        load: u64,
    }

    fn create_test_worker(id: &str, tags: Vec<&str>, load: u64) -> TestWorker {
        TestWorker {
            id: StaffId::from(id),
            specialities: specialities(tags),
            load,
        }
    }

    fn candidates(workers: &[TestWorker]) -> Vec<StaffCandidate<'_>> {
        workers
            .iter()
            .map(|w| StaffCandidate {
                id: &w.id,
                specialities: &w.specialities,
                load: w.load,
            })
            .collect()
    }

    #[test]
    fn test_least_loaded_prefers_lower_load() {
        let strategy = LeastLoadedStrategy::new();
        let workers = vec![
            create_test_worker("w1", vec!["A"], 2),
            create_test_worker("w2", vec!["A", "B"], 1),
        ];

        let selected = strategy.select_worker(&Speciality::from("A"), &candidates(&workers));
        assert_eq!(selected, Some(StaffId::from("w2")));
    }

    #[test]
    fn test_least_loaded_filters_by_speciality() {
        let strategy = LeastLoadedStrategy::new();
        let workers = vec![
            create_test_worker("w1", vec!["salad"], 0),
            create_test_worker("w2", vec!["grill"], 5),
        ];

        let selected = strategy.select_worker(&Speciality::from("grill"), &candidates(&workers));
        assert_eq!(selected, Some(StaffId::from("w2")));
    }

    #[test]
    fn test_least_loaded_no_match() {
        let strategy = LeastLoadedStrategy::new();
        let workers = vec![create_test_worker("w1", vec!["salad"], 0)];

        assert!(strategy
            .select_worker(&Speciality::from("grill"), &candidates(&workers))
            .is_none());
        assert!(strategy
            .select_worker(&Speciality::from("grill"), &[])
            .is_none());
    }

    #[test]
    fn test_least_loaded_tie_takes_first_registered() {
        let strategy = LeastLoadedStrategy::new();
        let workers = vec![
            create_test_worker("w3", vec!["grill"], 1),
            create_test_worker("w1", vec!["grill", "salad"], 1),
            create_test_worker("w2", vec!["grill"], 1),
        ];
        let candidates = candidates(&workers);

        // 快照不变时结果稳定
        for _ in 0..3 {
            let selected = strategy.select_worker(&Speciality::from("grill"), &candidates);
            assert_eq!(selected, Some(StaffId::from("w3")));
        }
    }

    #[test]
    fn test_specialist_first_tie_break() {
        let strategy = SpecialistFirstStrategy::new();
        let workers = vec![
            create_test_worker("generalist", vec!["grill", "salad", "fryer"], 1),
            create_test_worker("specialist", vec!["grill"], 1),
            create_test_worker("second", vec!["grill"], 1),
        ];

        let selected = strategy.select_worker(&Speciality::from("grill"), &candidates(&workers));
        assert_eq!(selected, Some(StaffId::from("specialist")));
    }

    #[test]
    fn test_specialist_first_still_prefers_lower_load() {
        let strategy = SpecialistFirstStrategy::new();
        let workers = vec![
            create_test_worker("specialist", vec!["grill"], 3),
            create_test_worker("generalist", vec!["grill", "salad"], 0),
        ];

        let selected = strategy.select_worker(&Speciality::from("grill"), &candidates(&workers));
        assert_eq!(selected, Some(StaffId::from("generalist")));
    }

    #[test]
    fn test_strategy_for_tie_break() {
        assert_eq!(strategy_for(TieBreak::FirstRegistered).name(), "LeastLoaded");
        assert_eq!(
            strategy_for(TieBreak::FewestSpecialities).name(),
            "SpecialistFirst"
        );
    }
}
