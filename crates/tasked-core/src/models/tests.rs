#[cfg(test)]
mod model_tests {
    use crate::{
        error::{ErrorKind, PlannerError},
        models::{Plan, PlanState, PlanSummary, RemovalOutcome, RemovalReport, StepStatus},
    };

    fn ids(plan: &Plan) -> Vec<&str> {
        plan.steps().iter().map(|step| step.id()).collect()
    }

    fn create_test_plan() -> Plan {
        let mut plan = Plan::new("test-plan").expect("valid name");
        plan.add_step("a", "First", vec![], vec![]);
        plan.add_step("b", "Second", vec![], vec![]);
        plan.add_step("c", "Third", vec![], vec![]);
        plan
    }

    #[test]
    fn test_new_plan_is_unsaved_and_empty() {
        let plan = Plan::new("p").unwrap();
        assert_eq!(plan.id(), "p");
        assert!(plan.steps().is_empty());
        assert_eq!(plan.state(), PlanState::Unsaved);
        assert!(plan.is_new());
    }

    #[test]
    fn test_new_plan_rejects_empty_name() {
        let err = Plan::new("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_assume_persisted_is_not_new() {
        let plan = Plan::assume_persisted("elsewhere");
        assert!(!plan.is_new());
        assert_eq!(plan.state(), PlanState::Persisted);
    }

    #[test]
    fn test_add_step_defaults() {
        let mut plan = Plan::new("p").unwrap();
        plan.add_step("s1", "d1", vec!["c1".into()], vec!["r1".into(), "r2".into()]);
        plan.add_step("s2", "d2", Vec::new(), Vec::new());

        let s1 = plan.step("s1").unwrap();
        assert_eq!(s1.status(), StepStatus::Todo);
        assert_eq!(s1.acceptance_criteria(), ["c1"]);
        assert_eq!(s1.references(), ["r1", "r2"]);

        let s2 = plan.step("s2").unwrap();
        assert!(s2.acceptance_criteria().is_empty());
        assert!(s2.references().is_empty());
    }

    #[test]
    fn test_add_step_tolerates_duplicate_ids() {
        let mut plan = Plan::new("p").unwrap();
        plan.add_step("dup", "one", vec![], vec![]);
        plan.add_step("dup", "two", vec![], vec![]);
        assert_eq!(plan.steps().len(), 2);
    }

    #[test]
    fn test_remove_steps_preserves_order_and_ignores_unknown() {
        let mut plan = create_test_plan();
        let removed = plan.remove_steps(&["b", "missing"]);
        assert_eq!(removed, 1);
        assert_eq!(ids(&plan), ["a", "c"]);

        let removed = plan.remove_steps::<&str>(&[]);
        assert_eq!(removed, 0);
    }

    #[test]
    fn test_reorder_partial_prefix() {
        let mut plan = create_test_plan();
        plan.reorder(&["b", "a"]);
        assert_eq!(ids(&plan), ["b", "a", "c"]);
    }

    #[test]
    fn test_reorder_ignores_unknown_and_duplicates() {
        let mut plan = create_test_plan();
        plan.reorder(&["c", "zzz", "c", "a"]);
        assert_eq!(ids(&plan), ["c", "a", "b"]);
    }

    #[test]
    fn test_reorder_empty_order_is_identity() {
        let mut plan = create_test_plan();
        plan.reorder::<&str>(&[]);
        assert_eq!(ids(&plan), ["a", "b", "c"]);
    }

    #[test]
    fn test_mark_status_is_idempotent() {
        let mut plan = create_test_plan();
        plan.mark_as_completed("a").unwrap();
        plan.mark_as_completed("a").unwrap();
        assert_eq!(plan.step("a").unwrap().status(), StepStatus::Done);

        plan.mark_as_incomplete("b").unwrap();
        assert_eq!(plan.step("b").unwrap().status(), StepStatus::Todo);

        plan.mark_as_incomplete("a").unwrap();
        assert_eq!(plan.step("a").unwrap().status(), StepStatus::Todo);
    }

    #[test]
    fn test_mark_missing_step_fails() {
        let mut plan = create_test_plan();
        let err = plan.mark_as_completed("nope").unwrap_err();
        assert!(matches!(err, PlannerError::StepNotFound { ref step, .. } if step == "nope"));
        assert_eq!(plan.mark_as_incomplete("nope").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_next_step_and_completion() {
        let mut plan = create_test_plan();
        assert_eq!(plan.next_step().map(|s| s.id()), Some("a"));
        assert!(!plan.is_completed());

        plan.mark_as_completed("a").unwrap();
        assert_eq!(plan.next_step().map(|s| s.id()), Some("b"));

        plan.mark_as_completed("b").unwrap();
        plan.mark_as_completed("c").unwrap();
        assert!(plan.next_step().is_none());
        assert!(plan.is_completed());
    }

    #[test]
    fn test_empty_plan_is_completed() {
        let plan = Plan::new("empty").unwrap();
        assert!(plan.next_step().is_none());
        assert!(plan.is_completed());
    }

    #[test]
    fn test_inspect_rendering() {
        let mut plan = Plan::new("p").unwrap();
        plan.add_step(
            "setup",
            "Install the toolchain",
            vec!["rustc runs".into(), "cargo runs".into()],
            vec!["https://rustup.rs".into()],
        );
        plan.add_step("ship", "", vec![], vec![]);
        plan.mark_as_completed("setup").unwrap();

        let expected = "## 1. [DONE] setup\n\
                        \n\
                        Install the toolchain\n\
                        \n\
                        Acceptance Criteria:\n\
                        1. rustc runs\n\
                        2. cargo runs\n\
                        \n\
                        References:\n\
                        - https://rustup.rs\n\
                        \n\
                        ## 2. [TODO] ship\n\
                        \n";
        assert_eq!(plan.inspect(), expected);
    }

    #[test]
    fn test_inspect_empty_plan() {
        let plan = Plan::new("p").unwrap();
        assert_eq!(plan.inspect(), "");
    }

    #[test]
    fn test_json_always_has_references() {
        let mut plan = Plan::new("p").unwrap();
        plan.add_step("s2", "d2", vec![], vec![]);
        let value: serde_json::Value = serde_json::from_str(&plan.to_json().unwrap()).unwrap();

        let step = &value["steps"][0];
        assert_eq!(step["id"], "s2");
        assert_eq!(step["status"], "TODO");
        assert_eq!(step["references"], serde_json::json!([]));
        assert_eq!(step["acceptance_criteria"], serde_json::json!([]));
        assert!(value.get("state").is_none());
    }

    #[test]
    fn test_plan_summary_status() {
        let empty = PlanSummary::from_counts("e".into(), 0, 0);
        assert_eq!(empty.status, StepStatus::Todo);

        let partial = PlanSummary::from_counts("p".into(), 3, 2);
        assert_eq!(partial.status, StepStatus::Todo);
        assert_eq!(partial.pending_tasks(), 1);

        let done = PlanSummary::from_counts("d".into(), 2, 2);
        assert_eq!(done.status, StepStatus::Done);
    }

    #[test]
    fn test_plan_summary_from_plan() {
        let mut plan = create_test_plan();
        plan.mark_as_completed("b").unwrap();
        let summary = PlanSummary::from(&plan);
        assert_eq!(summary.name, "test-plan");
        assert_eq!(summary.total_tasks, 3);
        assert_eq!(summary.completed_tasks, 1);
        assert_eq!(summary.status, StepStatus::Todo);
    }

    #[test]
    fn test_removal_report_revision() {
        let mut report = RemovalReport::new();
        report.push("a", RemovalOutcome::Removed);
        report.push("b", RemovalOutcome::NotFound);
        report.push("c", RemovalOutcome::Removed);

        assert!(!report.is_success());
        assert_eq!(report.error_count(), 1);
        assert_eq!(
            report.first_error().as_deref(),
            Some("plan 'b' not found for deletion")
        );

        report.revise_removed("disk I/O error");
        assert_eq!(report.removed().count(), 0);
        assert_eq!(report.error_count(), 3);
        assert!(matches!(
            report.outcome("a"),
            Some(RemovalOutcome::RolledBack { .. })
        ));
        assert_eq!(report.outcome("b"), Some(&RemovalOutcome::NotFound));
    }
}
