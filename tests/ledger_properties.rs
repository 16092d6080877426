mod common;

use chrono::NaiveDate;
use common::{expense, income, memory_ledger, reopen};
use ledger_core::{
    errors::{Field, ValidationError},
    ledger::{Ledger, TransactionDraft, TransactionFilter, TransactionKind},
    storage::{KeyValueStore, DEFAULT_STORAGE_KEY},
};
use rust_decimal_macros::dec;

fn ids(ledger: &Ledger, filter: TransactionFilter) -> Vec<i64> {
    ledger.list(filter).iter().map(|txn| txn.id).collect()
}

#[test]
fn add_preserves_submitted_fields() {
    let (mut ledger, _memory) = memory_ledger();
    let before = ledger.list(TransactionFilter::All).len();

    let added = ledger
        .add(&income("2024-06-01", "Freelance, June", "1234,5"))
        .expect("valid draft");

    let all = ledger.list(TransactionFilter::All);
    assert_eq!(all.len(), before + 1);
    let stored = all.iter().find(|txn| txn.id == added.id).expect("stored");
    assert_eq!(stored.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    assert_eq!(stored.description, "Freelance, June");
    assert_eq!(stored.kind, TransactionKind::Income);
    assert_eq!(stored.value, dec!(1234.5));
}

#[test]
fn invalid_drafts_leave_ledger_unchanged() {
    let (mut ledger, memory) = memory_ledger();
    ledger
        .add(&income("2024-06-01", "Salary", "100"))
        .expect("seed");
    let snapshot = ledger.list(TransactionFilter::All);
    let stored_blob = memory.get(DEFAULT_STORAGE_KEY).unwrap();

    for value in ["0", "-5", "abc"] {
        assert_eq!(
            ledger.add(&expense("2024-06-02", "Coffee", value)),
            Err(ValidationError::InvalidAmount(value.to_string()))
        );
    }
    assert_eq!(
        ledger.add(&expense("2024-06-02", "", "3")),
        Err(ValidationError::MissingField(Field::Description))
    );
    assert_eq!(
        ledger.add(&TransactionDraft::new("", "Coffee", "3", TransactionKind::Expense)),
        Err(ValidationError::MissingField(Field::Date))
    );

    assert_eq!(ledger.list(TransactionFilter::All), snapshot);
    assert_eq!(memory.get(DEFAULT_STORAGE_KEY).unwrap(), stored_blob);
}

#[test]
fn remove_targets_exactly_one_transaction() {
    let (mut ledger, _memory) = memory_ledger();
    let keep = ledger.add(&income("2024-01-01", "Salary", "10")).unwrap();
    let drop = ledger.add(&expense("2024-01-02", "Rent", "5")).unwrap();

    assert!(!ledger.remove(drop.id + 1_000_000));
    assert_eq!(ledger.len(), 2);

    assert!(ledger.remove(drop.id));
    assert_eq!(ids(&ledger, TransactionFilter::All), vec![keep.id]);
}

#[test]
fn remove_twice_matches_remove_once() {
    let (mut ledger, memory) = memory_ledger();
    let txn = ledger.add(&income("2024-01-01", "Salary", "10")).unwrap();
    ledger.add(&expense("2024-01-03", "Bus", "2,50")).unwrap();

    assert!(ledger.remove(txn.id));
    let after_once = ledger.list(TransactionFilter::All);
    let blob_once = memory.get(DEFAULT_STORAGE_KEY).unwrap();

    assert!(!ledger.remove(txn.id));
    assert_eq!(ledger.list(TransactionFilter::All), after_once);
    assert_eq!(memory.get(DEFAULT_STORAGE_KEY).unwrap(), blob_once);
}

#[test]
fn balance_follows_income_minus_expense() {
    let (mut ledger, _memory) = memory_ledger();
    assert_eq!(ledger.balance(), dec!(0));

    ledger.add(&income("2024-02-01", "Salary", "100.00")).unwrap();
    ledger.add(&expense("2024-02-02", "Groceries", "30.00")).unwrap();
    assert_eq!(ledger.balance(), dec!(70.00));

    ledger.add(&expense("2024-02-03", "Rent", "70.00")).unwrap();
    assert_eq!(ledger.balance(), dec!(0.00));

    ledger.add(&expense("2024-02-04", "Dinner", "12,5")).unwrap();
    assert_eq!(ledger.balance(), dec!(-12.5));
}

#[test]
fn balance_ignores_list_filters() {
    let (mut ledger, _memory) = memory_ledger();
    ledger.add(&income("2024-02-01", "Salary", "40")).unwrap();
    ledger.add(&expense("2024-02-02", "Rent", "15")).unwrap();

    let _ = ledger.list(TransactionFilter::Expense);
    assert_eq!(ledger.balance(), dec!(25));
}

#[test]
fn income_and_expense_partition_all() {
    let (mut ledger, _memory) = memory_ledger();
    let mut added = Vec::new();
    for day in 1..=12 {
        let date = format!("2024-03-{day:02}");
        let draft = if day % 3 == 0 {
            income(&date, "Payment", "20")
        } else {
            expense(&date, "Purchase", "3")
        };
        added.push(ledger.add(&draft).unwrap().id);
    }
    ledger.remove(added[2]);
    ledger.remove(added[7]);

    let all = ids(&ledger, TransactionFilter::All);
    let incomes = ids(&ledger, TransactionFilter::Income);
    let expenses = ids(&ledger, TransactionFilter::Expense);

    assert_eq!(incomes.len() + expenses.len(), all.len());
    assert!(incomes.iter().all(|id| !expenses.contains(id)));
    assert!(all
        .iter()
        .all(|id| incomes.contains(id) || expenses.contains(id)));
}

#[test]
fn list_is_a_snapshot() {
    let (mut ledger, _memory) = memory_ledger();
    ledger.add(&income("2024-02-01", "Salary", "40")).unwrap();

    let mut listed = ledger.list(TransactionFilter::All);
    listed[0].description.push_str(" (edited)");
    listed.clear();

    let fresh = ledger.list(TransactionFilter::All);
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].description, "Salary");
}

#[test]
fn list_keeps_insertion_order() {
    let (mut ledger, _memory) = memory_ledger();
    let late = ledger.add(&income("2024-12-01", "Bonus", "5")).unwrap();
    let early = ledger.add(&income("2024-01-01", "Salary", "5")).unwrap();
    assert_eq!(
        ids(&ledger, TransactionFilter::All),
        vec![late.id, early.id]
    );
}

#[test]
fn every_mutation_reaches_the_store() {
    let (mut ledger, memory) = memory_ledger();
    let salary = ledger.add(&income("2024-01-01", "Salary", "10")).unwrap();
    let rent = ledger.add(&expense("2024-01-02", "Rent", "4")).unwrap();
    assert_eq!(reopen(&memory).list(TransactionFilter::All).len(), 2);

    ledger.remove(salary.id);
    let reloaded = reopen(&memory);
    assert_eq!(reloaded.list(TransactionFilter::All), vec![rent]);
    assert_eq!(reloaded.balance(), dec!(-4));
}

#[test]
fn corrupted_store_yields_empty_ledger() {
    let (_ledger, memory) = memory_ledger();
    for blob in [
        "not json at all",
        r#"{"id":1}"#,
        r#"[{"id":1,"date":"01/02/2024","description":"x","value":1,"kind":"income"}]"#,
        r#"[{"id":1,"date":"2024-01-02","description":"x","value":0,"kind":"income"}]"#,
        r#"[{"id":1,"date":"2024-01-02","description":"x","value":1,"kind":"transfer"}]"#,
    ] {
        memory.set(DEFAULT_STORAGE_KEY, blob).unwrap();
        let mut ledger = reopen(&memory);
        assert!(ledger.is_empty(), "blob {blob} should be rejected");

        ledger.add(&income("2024-01-01", "Fresh start", "1")).unwrap();
        assert_eq!(ledger.len(), 1);
    }
}

#[test]
fn rejected_writes_do_not_block_the_session() {
    let (mut ledger, memory) = memory_ledger();
    ledger.add(&income("2024-01-01", "Salary", "10")).unwrap();
    memory.fail_writes(true);

    let rent = ledger.add(&expense("2024-01-02", "Rent", "4")).unwrap();
    assert!(ledger.storage_failure().is_some());
    assert_eq!(ledger.balance(), dec!(6));
    assert_eq!(reopen(&memory).len(), 1, "durable state lags one operation");

    memory.fail_writes(false);
    assert!(ledger.remove(rent.id));
    assert!(ledger.storage_failure().is_none());
    assert_eq!(reopen(&memory).balance(), dec!(10));
}
