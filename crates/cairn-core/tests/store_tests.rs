use cairn_core::{
    params::{CompleteStep, CreatePlan, FailStep, Id, ListPlans, StepCreate},
    StepStatus, StoreError,
};

mod common;
use common::create_test_store;

#[tokio::test]
async fn test_complete_plan_workflow() {
    let (_temp_dir, store) = create_test_store().await;

    // Create a plan
    let plan = store
        .create_plan(&CreatePlan {
            name: "Integration Test".to_string(),
            description: "Testing complete workflow".to_string(),
        })
        .await
        .expect("Failed to create plan");

    // Add multiple steps
    let step1 = store
        .create_step(&StepCreate {
            plan_id: plan.id.clone(),
            description: "First step".to_string(),
            completion_condition: "First condition holds".to_string(),
            completion_context: None,
        })
        .await
        .expect("Failed to create step");
    let step2 = store
        .create_step(&StepCreate {
            plan_id: plan.id.clone(),
            description: "Second step".to_string(),
            completion_condition: "Second condition holds".to_string(),
            completion_context: None,
        })
        .await
        .expect("Failed to create step");
    let step3 = store
        .create_step(&StepCreate {
            plan_id: plan.id.clone(),
            description: "Third step".to_string(),
            completion_condition: "Third condition holds".to_string(),
            completion_context: None,
        })
        .await
        .expect("Failed to create step");

    // Verify step ordering
    let steps = store
        .list_steps(&plan.id)
        .await
        .expect("Failed to list steps");
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0].step_order, 1);
    assert_eq!(steps[1].step_order, 2);
    assert_eq!(steps[2].step_order, 3);

    // The first step is the active step
    let active = store
        .get_active_step(&plan.id)
        .await
        .expect("Failed to get active step")
        .expect("Active step should exist");
    assert_eq!(active.id, step1.id);

    // Complete the first step; the second becomes active
    let next = store
        .complete_step(&CompleteStep {
            step_id: step1.id.clone(),
            completion_context: "Set up the environment".to_string(),
        })
        .await
        .expect("Failed to complete step")
        .expect("A next step should exist");
    assert_eq!(next.id, step2.id);

    // The second step fails; a replacement is spliced in before the third
    let outcome = store
        .fail_step(&FailStep {
            step_id: step2.id.clone(),
            description: "Second step, smaller scope".to_string(),
            completion_condition: "Reduced condition holds".to_string(),
        })
        .await
        .expect("Failed to fail step");
    assert_eq!(outcome.failed_step_id, step2.id);

    let steps = store
        .list_steps(&plan.id)
        .await
        .expect("Failed to list steps");
    let ids: Vec<&str> = steps.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            step1.id.as_str(),
            step2.id.as_str(),
            outcome.new_step.id.as_str(),
            step3.id.as_str()
        ]
    );
    assert_eq!(steps[1].status, StepStatus::Failed);
    assert_eq!(steps[3].step_order, 4);

    // Walk the plan to completion
    let next = store
        .complete_step(&CompleteStep {
            step_id: outcome.new_step.id.clone(),
            completion_context: "Reduced scope worked".to_string(),
        })
        .await
        .expect("Failed to complete step")
        .expect("A next step should exist");
    assert_eq!(next.id, step3.id);

    let done = store
        .complete_step(&CompleteStep {
            step_id: step3.id.clone(),
            completion_context: "Wrapped up".to_string(),
        })
        .await
        .expect("Failed to complete step");
    assert!(done.is_none());

    let plan = store
        .get_plan(&Id { id: plan.id })
        .await
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(plan.active_step_id, None);
}

#[tokio::test]
async fn test_list_plans_pagination_across_pages() {
    let (_temp_dir, store) = create_test_store().await;

    for i in 1..=15 {
        store
            .create_plan(&CreatePlan {
                name: format!("Plan {i}"),
                description: "One of fifteen".to_string(),
            })
            .await
            .expect("Failed to create plan");
    }

    let second_page = store
        .list_plans(&ListPlans {
            page: 2,
            page_size: 10,
        })
        .await
        .expect("Failed to list plans");
    assert_eq!(second_page.items.len(), 5);
    assert_eq!(second_page.total, 15);

    // Newest first: the last plan created leads the first page
    let first_page = store
        .list_plans(&ListPlans {
            page: 1,
            page_size: 10,
        })
        .await
        .expect("Failed to list plans");
    assert_eq!(first_page.items.len(), 10);
    assert_eq!(first_page.items[0].name, "Plan 15");
}

#[tokio::test]
async fn test_identifiers_are_three_word_slugs() {
    let (_temp_dir, store) = create_test_store().await;

    let plan = store
        .create_plan(&CreatePlan {
            name: "Slugged".to_string(),
            description: "Identifier shape check".to_string(),
        })
        .await
        .expect("Failed to create plan");
    let step = store
        .create_step(&StepCreate {
            plan_id: plan.id.clone(),
            description: "A step".to_string(),
            completion_condition: "It happened".to_string(),
            completion_context: None,
        })
        .await
        .expect("Failed to create step");

    for id in [&plan.id, &step.id] {
        let words: Vec<&str> = id.split('-').collect();
        assert_eq!(words.len(), 3);
        assert!(words.iter().all(|w| !w.is_empty()));
    }
    assert_ne!(plan.id, step.id);
}

#[tokio::test]
async fn test_precondition_errors_surface_through_facade() {
    let (_temp_dir, store) = create_test_store().await;

    let result = store
        .create_step(&StepCreate {
            plan_id: "no-such-plan".to_string(),
            description: "Orphan".to_string(),
            completion_condition: "Never".to_string(),
            completion_context: None,
        })
        .await;
    assert!(matches!(result, Err(StoreError::Precondition { .. })));

    let result = store
        .complete_step(&CompleteStep {
            step_id: "no-such-step".to_string(),
            completion_context: "Nothing".to_string(),
        })
        .await;
    assert!(matches!(result, Err(StoreError::Precondition { .. })));
}

#[tokio::test]
async fn test_concurrent_step_creation_keeps_orders_dense() {
    let (_temp_dir, store) = create_test_store().await;
    let store = std::sync::Arc::new(store);

    let plan = store
        .create_plan(&CreatePlan {
            name: "Contended".to_string(),
            description: "Steps created concurrently".to_string(),
        })
        .await
        .expect("Failed to create plan");

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = store.clone();
        let plan_id = plan.id.clone();
        handles.push(tokio::spawn(async move {
            store
                .create_step(&StepCreate {
                    plan_id,
                    description: format!("Concurrent step {i}"),
                    completion_condition: "Created".to_string(),
                    completion_context: None,
                })
                .await
        }));
    }
    for handle in handles {
        handle
            .await
            .expect("Task panicked")
            .expect("Failed to create step");
    }

    // Orders are dense 1..=8 regardless of interleaving
    let steps = store
        .list_steps(&plan.id)
        .await
        .expect("Failed to list steps");
    let orders: Vec<u32> = steps.iter().map(|s| s.step_order).collect();
    assert_eq!(orders, (1..=8).collect::<Vec<u32>>());

    // Exactly one active step, the lowest-ordered one
    let active = store
        .get_active_step(&plan.id)
        .await
        .expect("Failed to get active step")
        .expect("Active step should exist");
    assert_eq!(active.step_order, 1);
}
