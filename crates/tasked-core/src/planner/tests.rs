//! Tests for the planner module.

use tempfile::TempDir;

use super::*;
use crate::{
    error::ErrorKind,
    models::{RemovalOutcome, StepStatus},
    params::{AddStep, PlanName, RemovePlans, RemoveSteps, ReorderSteps, SetStepStatus, StatusChange},
};

/// Helper function to create a test planner
async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

fn add_step(plan: &str, id: &str) -> AddStep {
    AddStep {
        plan: plan.to_string(),
        id: id.to_string(),
        description: format!("Do {id}"),
        ..Default::default()
    }
}

fn step_ids(plan: &crate::models::Plan) -> Vec<String> {
    plan.steps().iter().map(|s| s.id().to_string()).collect()
}

#[tokio::test]
async fn test_builder_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("deeper").join("tasks.db");

    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");

    assert!(db_path.exists());
    assert_eq!(planner.database_path(), db_path.as_path());
}

#[tokio::test]
async fn test_new_plan_then_duplicate() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = planner.new_plan(&PlanName::new("release")).await.unwrap();
    assert!(!plan.is_new());

    let err = planner.new_plan(&PlanName::new("release")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);

    let err = planner.new_plan(&PlanName::new("")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[tokio::test]
async fn test_failed_save_leaves_plan_unsaved() {
    let (_temp_dir, planner) = create_test_planner().await;
    planner.new_plan(&PlanName::new("taken")).await.unwrap();

    let mut plan = planner.create_plan("taken").unwrap();
    plan.add_step("s1", "d1", vec![], vec![]);
    let err = planner.save_plan(&mut plan).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert!(plan.is_new());
    assert_eq!(plan.steps().len(), 1);
}

#[tokio::test]
async fn test_add_step_requires_existing_plan() {
    let (_temp_dir, planner) = create_test_planner().await;

    let err = planner
        .add_step_to_plan(&add_step("missing", "s1"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(planner.list_plans().await.unwrap().is_empty());

    planner.new_plan(&PlanName::new("missing")).await.unwrap();
    let step = planner
        .add_step_to_plan(&add_step("missing", "s1"))
        .await
        .unwrap();
    assert_eq!(step.id(), "s1");
    assert_eq!(step.status(), StepStatus::Todo);

    let plan = planner.get_plan("missing").await.unwrap();
    assert_eq!(step_ids(&plan), ["s1"]);
}

#[tokio::test]
async fn test_add_step_rejects_duplicate_id() {
    let (_temp_dir, planner) = create_test_planner().await;
    planner.new_plan(&PlanName::new("p")).await.unwrap();
    planner.add_step_to_plan(&add_step("p", "s1")).await.unwrap();

    let err = planner
        .add_step_to_plan(&add_step("p", "s1"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(err
        .to_string()
        .contains("step with ID 's1' already exists in plan 'p'"));
}

#[tokio::test]
async fn test_add_step_after() {
    let (_temp_dir, planner) = create_test_planner().await;
    planner.new_plan(&PlanName::new("p")).await.unwrap();
    for id in ["a", "b", "c"] {
        planner.add_step_to_plan(&add_step("p", id)).await.unwrap();
    }

    let params = AddStep {
        after: Some("a".into()),
        ..add_step("p", "x")
    };
    planner.add_step_to_plan(&params).await.unwrap();

    let plan = planner.get_plan("p").await.unwrap();
    assert_eq!(step_ids(&plan), ["a", "x", "b", "c"]);
    let orders: Vec<usize> = plan.steps().iter().map(|s| s.order()).collect();
    assert_eq!(orders, [0, 1, 2, 3]);

    let params = AddStep {
        after: Some("nope".into()),
        ..add_step("p", "y")
    };
    let err = planner.add_step_to_plan(&params).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_set_step_status_round_trip() {
    let (_temp_dir, planner) = create_test_planner().await;
    planner.new_plan(&PlanName::new("p")).await.unwrap();
    planner.add_step_to_plan(&add_step("p", "a")).await.unwrap();
    planner.add_step_to_plan(&add_step("p", "b")).await.unwrap();

    let step = planner
        .set_step_status(&SetStepStatus {
            plan: "p".into(),
            step_id: "a".into(),
            status: StatusChange::Completed,
        })
        .await
        .unwrap();
    assert_eq!(step.status(), StepStatus::Done);

    let next = planner.next_step(&PlanName::new("p")).await.unwrap();
    assert_eq!(next.map(|s| s.id().to_string()), Some("b".to_string()));
    assert!(!planner.is_plan_completed(&PlanName::new("p")).await.unwrap());

    planner
        .set_step_status(&SetStepStatus {
            plan: "p".into(),
            step_id: "b".into(),
            status: StatusChange::Completed,
        })
        .await
        .unwrap();
    assert!(planner.is_plan_completed(&PlanName::new("p")).await.unwrap());
    assert!(planner.next_step(&PlanName::new("p")).await.unwrap().is_none());

    let err = planner
        .set_step_status(&SetStepStatus {
            plan: "p".into(),
            step_id: "zzz".into(),
            status: StatusChange::Incomplete,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_remove_steps_reports_missing() {
    let (_temp_dir, planner) = create_test_planner().await;
    planner.new_plan(&PlanName::new("p")).await.unwrap();
    planner.add_step_to_plan(&add_step("p", "a")).await.unwrap();
    planner.add_step_to_plan(&add_step("p", "b")).await.unwrap();

    let removal = planner
        .remove_steps_from_plan(&RemoveSteps {
            plan: "p".into(),
            step_ids: vec!["a".into(), "ghost".into(), "a".into()],
        })
        .await
        .unwrap();

    assert_eq!(removal.removed_count(), 1);
    assert_eq!(removal.missing().collect::<Vec<_>>(), ["ghost"]);
    assert_eq!(removal.outcomes.len(), 2);

    let plan = planner.get_plan("p").await.unwrap();
    assert_eq!(step_ids(&plan), ["b"]);
}

#[tokio::test]
async fn test_reorder_validates_ids() {
    let (_temp_dir, planner) = create_test_planner().await;
    planner.new_plan(&PlanName::new("p")).await.unwrap();
    for id in ["a", "b", "c"] {
        planner.add_step_to_plan(&add_step("p", id)).await.unwrap();
    }

    let err = planner
        .reorder_plan_steps(&ReorderSteps {
            plan: "p".into(),
            step_ids: vec!["c".into(), "missing".into()],
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(
        step_ids(&planner.get_plan("p").await.unwrap()),
        ["a", "b", "c"]
    );

    let plan = planner
        .reorder_plan_steps(&ReorderSteps {
            plan: "p".into(),
            step_ids: vec!["b".into(), "a".into()],
        })
        .await
        .unwrap();
    assert_eq!(step_ids(&plan), ["b", "a", "c"]);
    assert_eq!(
        step_ids(&planner.get_plan("p").await.unwrap()),
        ["b", "a", "c"]
    );
}

#[tokio::test]
async fn test_list_remove_and_compact() {
    let (_temp_dir, planner) = create_test_planner().await;
    planner.new_plan(&PlanName::new("empty")).await.unwrap();
    planner.new_plan(&PlanName::new("open")).await.unwrap();
    planner.add_step_to_plan(&add_step("open", "a")).await.unwrap();
    planner.new_plan(&PlanName::new("gone")).await.unwrap();

    let summaries = planner.list_plans_summary().await.unwrap();
    assert_eq!(summaries.len(), 3);

    let report = planner
        .remove_plans_by_name(&RemovePlans {
            names: vec!["gone".into(), "never".into()],
        })
        .await
        .unwrap();
    assert!(matches!(
        report.outcome("gone"),
        Some(RemovalOutcome::RolledBack { .. })
    ));
    assert_eq!(report.outcome("never"), Some(&RemovalOutcome::NotFound));
    assert_eq!(planner.list_plans_summary().await.unwrap().len(), 3);

    let report = planner
        .remove_plans_by_name(&RemovePlans {
            names: vec!["gone".into()],
        })
        .await
        .unwrap();
    assert_eq!(report.outcome("gone"), Some(&RemovalOutcome::Removed));

    let report = planner.compact_plans().await.unwrap();
    assert_eq!(report.removed().collect::<Vec<_>>(), ["empty"]);

    let names: Vec<String> = planner
        .list_plans()
        .await
        .unwrap()
        .into_iter()
        .map(|summary| summary.name)
        .collect();
    assert_eq!(names, ["open"]);
}

#[tokio::test]
async fn test_compact_with_nothing_to_do() {
    let (_temp_dir, planner) = create_test_planner().await;
    let report = planner.compact_plans().await.unwrap();
    assert!(report.is_empty());
}
