use super::create_test_service;
use crate::DivvyError;
use crate::models::{ExpenseSplit, SplitType, User};
use uuid::Uuid;

async fn seed_users(
    service: &crate::service::ExpenseService<crate::storage::in_memory::InMemoryStorage>,
    names: &[&str],
) -> Vec<User> {
    let mut users = Vec::new();
    for name in names {
        users.push(service.create_user(name.to_string()).await.unwrap());
    }
    users
}

fn percentage_split(user_id: Uuid, percentage: f64) -> ExpenseSplit {
    ExpenseSplit {
        user_id,
        amount: None,
        percentage: Some(percentage),
    }
}

fn exact_split(user_id: Uuid, amount: f64) -> ExpenseSplit {
    ExpenseSplit {
        user_id,
        amount: Some(amount),
        percentage: None,
    }
}

#[tokio::test]
async fn test_equal_expense_produces_settlements() {
    let _ = env_logger::try_init();
    let service = create_test_service();
    let users = seed_users(&service, &["Alice", "Bob", "Carol"]).await;
    let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();

    let group = service
        .create_group("Trip".to_string(), 500.0, ids.clone())
        .await
        .unwrap();

    service
        .add_expense(
            group.id,
            "Dinner".to_string(),
            90.0,
            ids[0],
            SplitType::Equal,
            vec![],
        )
        .await
        .unwrap();

    let report = service.group_balance(group.id).await.unwrap();
    assert_eq!(report.total_spent, 90.0);
    assert_eq!(report.remaining_budget, 410.0);
    assert!(!report.budget_exceeded);

    let alice = &report.members[0];
    assert_eq!(alice.paid, 90.0);
    assert_eq!(alice.should_pay, 0.0);
    assert_eq!(alice.get_back, 60.0);
    assert_eq!(alice.net, 60.0);

    assert_eq!(report.settlements.len(), 2);
    for tx in &report.settlements {
        assert_eq!(tx.to, ids[0]);
        assert_eq!(tx.amount, 30.0);
    }

    assert_eq!(report.highest_spenders.len(), 1);
    assert_eq!(report.highest_spenders[0].name, "Alice");
    assert_eq!(report.highest_spenders[0].amount, 60.0);
}

#[tokio::test]
async fn test_batch_create_skips_existing_names() {
    let service = create_test_service();
    service.create_user("Alice".to_string()).await.unwrap();

    let created = service
        .create_users(vec!["Alice".to_string(), "Bob".to_string()])
        .await
        .unwrap();

    assert_eq!(created.len(), 1);
    assert_eq!(created[0].name, "Bob");
    assert_eq!(service.list_users().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_percentage_expense_resolves_amounts() {
    let service = create_test_service();
    let users = seed_users(&service, &["Alice", "Bob", "Carol"]).await;
    let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
    let group = service
        .create_group("Flat".to_string(), 1000.0, ids.clone())
        .await
        .unwrap();

    let created = service
        .add_expense(
            group.id,
            "Rent".to_string(),
            200.0,
            ids[0],
            SplitType::Percentage,
            vec![percentage_split(ids[1], 50.0), percentage_split(ids[2], 50.0)],
        )
        .await
        .unwrap();

    assert_eq!(created.splits.len(), 2);
    assert!(created.splits.iter().all(|s| s.amount == Some(100.0)));

    let report = service.group_balance(group.id).await.unwrap();
    assert_eq!(report.members[0].net, 200.0);
    assert_eq!(report.members[1].net, -100.0);
    assert_eq!(report.balances.len(), 2);
}

#[tokio::test]
async fn test_percentage_must_sum_to_one_hundred() {
    let service = create_test_service();
    let users = seed_users(&service, &["Alice", "Bob"]).await;
    let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
    let group = service
        .create_group("Pair".to_string(), 100.0, ids.clone())
        .await
        .unwrap();

    let result = service
        .add_expense(
            group.id,
            "Snacks".to_string(),
            50.0,
            ids[0],
            SplitType::Percentage,
            vec![percentage_split(ids[1], 80.0)],
        )
        .await;

    assert!(matches!(result, Err(DivvyError::InvalidPercentageTotal(_))));
}

#[tokio::test]
async fn test_exact_splits_must_match_amount() {
    let service = create_test_service();
    let users = seed_users(&service, &["Alice", "Bob"]).await;
    let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
    let group = service
        .create_group("Pair".to_string(), 100.0, ids.clone())
        .await
        .unwrap();

    let result = service
        .add_expense(
            group.id,
            "Taxi".to_string(),
            50.0,
            ids[0],
            SplitType::Exact,
            vec![exact_split(ids[1], 30.0)],
        )
        .await;

    assert!(matches!(result, Err(DivvyError::InvalidSplit)));
}

#[tokio::test]
async fn test_payer_must_be_group_member() {
    let service = create_test_service();
    let users = seed_users(&service, &["Alice", "Bob", "Mallory"]).await;
    let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
    let group = service
        .create_group("Pair".to_string(), 100.0, vec![ids[0], ids[1]])
        .await
        .unwrap();

    let result = service
        .add_expense(
            group.id,
            "Coffee".to_string(),
            10.0,
            ids[2],
            SplitType::Equal,
            vec![],
        )
        .await;

    assert!(matches!(result, Err(DivvyError::NotGroupMember(_))));
}

#[tokio::test]
async fn test_group_requires_two_members() {
    let service = create_test_service();
    let users = seed_users(&service, &["Alice"]).await;

    let result = service
        .create_group("Solo".to_string(), 100.0, vec![users[0].id])
        .await;

    assert!(matches!(result, Err(DivvyError::NotEnoughMembers(1))));
}

#[tokio::test]
async fn test_budget_exceeded_is_flagged() {
    let service = create_test_service();
    let users = seed_users(&service, &["Alice", "Bob"]).await;
    let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
    let group = service
        .create_group("Weekend".to_string(), 100.0, ids.clone())
        .await
        .unwrap();

    service
        .add_expense(
            group.id,
            "Hotel".to_string(),
            150.0,
            ids[0],
            SplitType::Equal,
            vec![],
        )
        .await
        .unwrap();

    let report = service.group_balance(group.id).await.unwrap();
    assert_eq!(report.total_spent, 150.0);
    assert_eq!(report.remaining_budget, -50.0);
    assert!(report.budget_exceeded);
}

#[tokio::test]
async fn test_user_balances_across_groups() {
    let service = create_test_service();
    let users = seed_users(&service, &["Alice", "Bob", "Carol"]).await;
    let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();

    let trip = service
        .create_group("Trip".to_string(), 500.0, ids.clone())
        .await
        .unwrap();
    let flat = service
        .create_group("Flat".to_string(), 500.0, vec![ids[0], ids[1]])
        .await
        .unwrap();

    service
        .add_expense(
            trip.id,
            "Dinner".to_string(),
            90.0,
            ids[0],
            SplitType::Equal,
            vec![],
        )
        .await
        .unwrap();
    service
        .add_expense(
            flat.id,
            "Internet".to_string(),
            40.0,
            ids[1],
            SplitType::Equal,
            vec![],
        )
        .await
        .unwrap();

    let balances = service.user_balances(ids[1]).await.unwrap();
    // Bob owes Alice 30 from the trip and is owed 20 for the internet.
    assert_eq!(balances.len(), 2);
    assert!(
        balances
            .iter()
            .any(|b| b.user_id == ids[1] && b.owes_to == ids[0] && b.amount == 30.0)
    );
    assert!(
        balances
            .iter()
            .any(|b| b.user_id == ids[0] && b.owes_to == ids[1] && b.amount == 20.0)
    );

    // Carol's view excludes the flat entirely.
    let carol = service.user_balances(ids[2]).await.unwrap();
    assert_eq!(carol.len(), 1);
    assert_eq!(carol[0].owes_to, ids[0]);
}

#[tokio::test]
async fn test_delete_group_removes_expenses() {
    let service = create_test_service();
    let users = seed_users(&service, &["Alice", "Bob"]).await;
    let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
    let group = service
        .create_group("Gone".to_string(), 100.0, ids.clone())
        .await
        .unwrap();
    service
        .add_expense(
            group.id,
            "Lunch".to_string(),
            20.0,
            ids[0],
            SplitType::Equal,
            vec![],
        )
        .await
        .unwrap();

    service.delete_group(group.id).await.unwrap();

    assert!(matches!(
        service.group_balance(group.id).await,
        Err(DivvyError::GroupNotFound(_))
    ));
    assert!(service.user_balances(ids[0]).await.unwrap().is_empty());
}
