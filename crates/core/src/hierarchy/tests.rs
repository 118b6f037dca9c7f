//! Tests for hierarchical aggregation.

use std::collections::HashMap;

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally_shared::types::{AccountId, Currency, ReportNodeId};

use super::*;
use crate::ledger::{AccountType, DebitCredit};
use crate::selection::{DisplayMode, LedgerStore};
use crate::test_support::FixtureLedger;

fn movement(debit: Decimal, credit: Decimal) -> NodeTotals {
    NodeTotals {
        debit,
        credit,
        balance: debit - credit,
        ..NodeTotals::default()
    }
}

struct Sample {
    ledger: FixtureLedger,
    root: ReportNodeId,
    bank: AccountId,
    receivable: AccountId,
    payable: AccountId,
}

fn sample() -> Sample {
    let mut ledger = FixtureLedger::new();
    let receivable = ledger.add_account("1100", "Receivables", AccountType::Receivable);
    let bank = ledger.add_account("1000", "Bank", AccountType::Other);
    let payable = ledger.add_account("2100", "Payables", AccountType::Payable);
    let root = ledger.node(None, "Balance Sheet", 0, NodeKind::Sum, Sign::Positive);
    ledger.node(
        Some(root),
        "Liabilities",
        20,
        NodeKind::AccountType {
            account_types: vec![AccountType::Payable],
        },
        Sign::Negative,
    );
    ledger.node(
        Some(root),
        "Assets",
        10,
        NodeKind::Accounts {
            account_ids: vec![receivable, bank],
        },
        Sign::Positive,
    );
    Sample {
        ledger,
        root,
        bank,
        receivable,
        payable,
    }
}

fn run(
    sample: &Sample,
    totals: &HashMap<AccountId, NodeTotals>,
    display: DisplayMode,
) -> (Vec<AggregateRow>, NodeTotals) {
    let tree = AccountHierarchy::from_nodes(sample.ledger.hierarchy_nodes().unwrap()).unwrap();
    let accounts = sample.ledger.accounts().unwrap();
    let currency = Currency::new("USD", 2);
    HierarchicalAggregator::new(&tree, &accounts, totals, display, &currency)
        .aggregate(sample.root, 0)
        .unwrap()
}

#[test]
fn test_rows_layout_and_totals() {
    let sample = sample();
    let totals = HashMap::from([
        (sample.receivable, movement(dec!(100), Decimal::ZERO)),
        (sample.bank, movement(dec!(50), dec!(20))),
        (sample.payable, movement(Decimal::ZERO, dec!(70))),
    ]);
    let (rows, root) = run(&sample, &totals, DisplayMode::All);

    let layout: Vec<_> = rows
        .iter()
        .map(|r| (r.name.as_str(), r.indent, r.heading))
        .collect();
    assert_eq!(
        layout,
        vec![
            ("Balance Sheet", 0, true),
            ("Assets", 5, true),
            ("Total Assets", 5, false),
            ("Liabilities", 5, true),
            ("Total Liabilities", 5, false),
            ("Total Balance Sheet", 0, false),
        ]
    );

    let assets: Vec<_> = rows[1]
        .child_rows
        .iter()
        .map(|r| (r.name.as_str(), r.indent))
        .collect();
    assert_eq!(assets, vec![("1000 - Bank", 10), ("1100 - Receivables", 10)]);

    // Negative sign flips the payable account's columns.
    assert_eq!(rows[3].child_rows[0].totals.credit, dec!(-70));
    assert_eq!(rows[3].child_rows[0].totals.balance, dec!(70));

    assert_eq!(root.debit, dec!(150));
    assert_eq!(root.credit, dec!(-50));
    assert_eq!(root.balance, dec!(200));
    assert_eq!(rows[0].totals, root);
    assert_eq!(rows[5].totals, root);
}

#[test]
fn test_comparison_fields_zero_without_comparison() {
    let sample = sample();
    let totals = HashMap::from([(sample.bank, movement(dec!(50), dec!(20)))]);
    let (_, root) = run(&sample, &totals, DisplayMode::All);
    assert_eq!(root.debit_comp, Decimal::ZERO);
    assert_eq!(root.credit_comp, Decimal::ZERO);
    assert_eq!(root.balance_comp, Decimal::ZERO);
}

#[test]
fn test_display_mode_filters_account_rows_only() {
    let sample = sample();
    let totals = HashMap::from([
        (sample.receivable, movement(dec!(40), dec!(40))),
        (sample.payable, movement(Decimal::ZERO, dec!(70))),
    ]);

    let (rows, all_totals) = run(&sample, &totals, DisplayMode::All);
    assert_eq!(rows[1].child_rows.len(), 2);

    let (rows, movement_totals) = run(&sample, &totals, DisplayMode::Movement);
    let names: Vec<_> = rows[1].child_rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["1100 - Receivables"]);

    let (rows, not_zero_totals) = run(&sample, &totals, DisplayMode::NotZero);
    assert!(rows[1].child_rows.is_empty());
    assert_eq!(rows[3].child_rows.len(), 1);

    assert_eq!(all_totals, movement_totals);
    assert_eq!(all_totals, not_zero_totals);
}

#[test]
fn test_hidden_node_still_rolls_up() {
    let mut sample = sample();
    for node in sample.ledger.nodes.iter_mut().filter(|n| n.name == "Assets") {
        node.hide_heading = true;
    }
    let totals = HashMap::from([(sample.bank, movement(dec!(50), Decimal::ZERO))]);
    let (rows, root) = run(&sample, &totals, DisplayMode::Movement);

    assert!(rows[1].hide);
    assert!(rows[2].hide);
    assert!(!rows[1].child_rows[0].hide);
    assert!(!rows[0].hide);
    assert_eq!(root.balance, dec!(50));
}

#[test]
fn test_unknown_node() {
    let sample = sample();
    let tree = AccountHierarchy::from_nodes(sample.ledger.nodes.clone()).unwrap();
    let currency = Currency::new("USD", 2);
    let totals = HashMap::new();
    let err = HierarchicalAggregator::new(&tree, &[], &totals, DisplayMode::All, &currency)
        .aggregate(ReportNodeId::from_u128(999), 0)
        .unwrap_err();
    assert_eq!(err, HierarchyError::UnknownNode(ReportNodeId::from_u128(999)));
}

/// (debit, credit, comp debit, comp credit, negative sign) in cents.
fn leaf_strategy() -> impl Strategy<Value = (i64, i64, i64, i64, bool)> {
    (
        0i64..1_000_000,
        0i64..1_000_000,
        0i64..1_000_000,
        0i64..1_000_000,
        any::<bool>(),
    )
}

fn groups_strategy() -> impl Strategy<Value = Vec<Vec<(i64, i64, i64, i64, bool)>>> {
    prop::collection::vec(prop::collection::vec(leaf_strategy(), 1..4), 1..4)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Property 4: Sum node totals equal the sum of its children**
    ///
    /// *For any* two-level hierarchy, every scalar returned by a sum node SHALL
    /// equal the elementwise sum of the scalars returned by its children.
    #[test]
    fn prop_sum_node_equals_children(groups in groups_strategy()) {
        let mut ledger = FixtureLedger::new();
        let root = ledger.node(None, "Root", 0, NodeKind::Sum, Sign::Positive);
        let mut totals = HashMap::new();
        let mut groups_ids = Vec::new();

        for (g, leaves) in groups.iter().enumerate() {
            let sequence = i32::try_from(g).unwrap();
            let group = ledger.node(Some(root), &format!("Group {g}"), sequence, NodeKind::Sum, Sign::Positive);
            groups_ids.push(group);
            for (l, &(debit, credit, debit_comp, credit_comp, negative)) in leaves.iter().enumerate() {
                let account = ledger.add_account(&format!("{g}{l:03}"), "Account", AccountType::Other);
                let main = DebitCredit::new(Decimal::new(debit, 2), Decimal::new(credit, 2));
                let comp = DebitCredit::new(Decimal::new(debit_comp, 2), Decimal::new(credit_comp, 2));
                totals.insert(account, NodeTotals {
                    debit: main.debit,
                    credit: main.credit,
                    balance: main.net(),
                    debit_comp: comp.debit,
                    credit_comp: comp.credit,
                    balance_comp: comp.net(),
                });
                let sign = if negative { Sign::Negative } else { Sign::Positive };
                ledger.node(
                    Some(group),
                    &format!("Leaf {g}.{l}"),
                    i32::try_from(l).unwrap(),
                    NodeKind::Accounts { account_ids: vec![account] },
                    sign,
                );
            }
        }

        let tree = AccountHierarchy::from_nodes(ledger.nodes.clone()).unwrap();
        let accounts = ledger.accounts().unwrap();
        let currency = Currency::new("USD", 2);
        let aggregator =
            HierarchicalAggregator::new(&tree, &accounts, &totals, DisplayMode::All, &currency);

        let (_, root_totals) = aggregator.aggregate(root, 0).unwrap();
        let mut expected = NodeTotals::default();
        for group in &groups_ids {
            let (_, group_totals) = aggregator.aggregate(*group, INDENT_STEP).unwrap();
            let children: NodeTotals = tree
                .children(*group)
                .map(|leaf| aggregator.aggregate(leaf.id, 2 * INDENT_STEP).unwrap().1)
                .sum();
            prop_assert_eq!(group_totals, children);
            expected += group_totals;
        }
        prop_assert_eq!(root_totals, expected);
    }
}
