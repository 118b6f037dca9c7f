//! Report orchestration.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_shared::types::{AccountId, JournalId, MoveId, PartnerId};
use tracing::{debug, info};

use super::context::ReportContext;
use super::definition::{ReportConfigSource, ReportDefinition, ReportKind};
use super::error::ReportError;
use super::output::{BalanceSheetReport, FilterSummary, ReportBody, ReportOutput};
use crate::aging::{AgedLine, AgingBucketer, AgingPeriods, AgingReport, UNKNOWN_PARTNER};
use crate::currency::{CurrencyNormalizer, is_zero};
use crate::hierarchy::{AccountHierarchy, HierarchicalAggregator, NodeTotals};
use crate::ledger::{Account, AccountType, DebitCredit, LedgerLine};
use crate::partner_ledger::{
    LedgerEntry, OpeningBalance, PartnerLedgerReport, PartnerLedgerSection,
    RunningBalanceSequencer,
};
use crate::selection::{
    DisplayMode, LedgerStore, LinePredicate, LineSelector, ReconciliationMode, ReportFilter,
    StoreError,
};
use crate::trial_balance::{
    BalanceRoller, TrialBalanceReport, accounts_in_scope, retained_earnings_account,
};

/// Runs reports against a ledger store.
///
/// Every run is a pure read: the same store contents, filter and context
/// always produce the same output.
pub struct ReportEngine<'a, S: LedgerStore + ?Sized> {
    store: &'a S,
    context: &'a ReportContext,
}

impl<'a, S: LedgerStore + ?Sized> ReportEngine<'a, S> {
    /// Creates an engine over a store and run context.
    pub const fn new(store: &'a S, context: &'a ReportContext) -> Self {
        Self { store, context }
    }

    /// Looks up a stored definition and runs it.
    pub fn run_by_id(
        &self,
        source: &dyn ReportConfigSource,
        id: &str,
    ) -> Result<ReportOutput, ReportError> {
        let definition = source
            .definition(id)
            .ok_or_else(|| ReportError::UnknownDefinition(id.to_string()))?;
        self.run(&definition)
    }

    /// Runs one report definition.
    pub fn run(&self, definition: &ReportDefinition) -> Result<ReportOutput, ReportError> {
        info!(
            report_id = %definition.id,
            kind = ?definition.kind,
            company = %self.context.company_name,
            "Running report"
        );

        let filter = &definition.filter;
        let body = match definition.kind {
            ReportKind::Aging => ReportBody::Aging(self.aging(filter)?),
            ReportKind::BalanceSheet => {
                let name = definition
                    .financial_report
                    .as_deref()
                    .ok_or_else(|| ReportError::MissingFinancialReport(definition.id.clone()))?;
                ReportBody::BalanceSheet(self.balance_sheet(name, filter)?)
            }
            ReportKind::TrialBalance => ReportBody::TrialBalance(self.trial_balance(filter)?),
            ReportKind::PartnerLedger => ReportBody::PartnerLedger(self.partner_ledger(filter)?),
        };
        let summary = self.filter_summary(filter)?;

        info!(report_id = %definition.id, "Report complete");
        Ok(ReportOutput {
            id: definition.id.clone(),
            title: definition.title().to_string(),
            company_name: self.context.company_name.clone(),
            currency: self.context.currency.code.clone(),
            filter: filter.clone(),
            summary,
            body,
        })
    }

    /// Partner aging as of `date_from` (or the context date).
    pub fn aging(&self, filter: &ReportFilter) -> Result<AgingReport, ReportError> {
        let as_of = filter.date_from.unwrap_or(self.context.today);
        let currency = &self.context.currency;
        let selector = LineSelector::new(self.store).include_unassigned_partners(true);
        let open = selector.open_as_of(as_of)?;
        let lines = selector.select(
            filter,
            None,
            Some(as_of),
            &filter.partner_scope.account_types(),
            open,
        )?;

        let accounts = self.accounts_by_id()?;
        let normalizer = CurrencyNormalizer::new(self.store);
        let mut labels = LabelCache::new(self.store);
        let mut taxes: HashMap<MoveId, (Decimal, Decimal)> = HashMap::new();
        let mut aged = Vec::with_capacity(lines.len());

        for line in lines {
            let account = lookup_account(&accounts, line.account_id)?;
            let amount =
                normalizer.normalize(line.balance_as_of(as_of), &line.company_currency, currency, as_of)?;
            let (duty, vat) = match taxes.get(&line.move_id) {
                Some(&split) => split,
                None => {
                    let split = self.tax_amounts(filter, line.move_id)?;
                    taxes.insert(line.move_id, split);
                    split
                }
            };
            aged.push(AgedLine {
                line_id: line.id,
                partner_id: line.partner_id,
                partner_name: line.partner_id.map(|id| labels.partner(id)).transpose()?,
                journal_code: labels.journal(line.journal_id)?,
                account_code: account.code.clone(),
                account_type: account.account_type,
                due_date: line.aging_date(),
                amount,
                duty_amount: normalizer.normalize(duty, &line.currency, currency, as_of)?,
                vat_amount: normalizer.normalize(vat, &line.currency, currency, as_of)?,
                move_name: line.move_name,
            });
        }

        let period_length = filter
            .period_length_days
            .unwrap_or(self.context.default_period_length_days);
        let report = AgingBucketer::new(AgingPeriods::new(as_of, period_length), currency)
            .include_nullified(self.context.include_nullified_amount)
            .bucketize(aged);
        debug!(
            as_of = %as_of,
            partners = report.partners.len(),
            "Built aging report"
        );
        Ok(report)
    }

    /// Hierarchical balance sheet rooted at the node named `name`.
    pub fn balance_sheet(
        &self,
        name: &str,
        filter: &ReportFilter,
    ) -> Result<BalanceSheetReport, ReportError> {
        validate_range(filter.date_from, filter.date_to)?;
        let comparison = filter.comparison_range();
        if let Some(range) = comparison {
            validate_range(range.from, range.to)?;
        }

        let tree = AccountHierarchy::from_nodes(self.store.hierarchy_nodes()?)?;
        let root = tree
            .find_root(name)
            .ok_or_else(|| ReportError::FinancialReportNotFound(name.to_string()))?;

        let accounts = self.store.accounts()?;
        let scope: Vec<Account> = accounts_in_scope(&accounts, filter)
            .into_iter()
            .cloned()
            .collect();
        if scope.is_empty() {
            return Err(ReportError::NoAccounts);
        }
        let retained = retained_earnings_account(&scope)?.map(|a| a.id);

        let as_of = filter.date_to.unwrap_or(self.context.today);
        let mut totals: HashMap<AccountId, NodeTotals> = HashMap::new();
        for (id, columns) in
            self.window_columns(filter, filter.date_from, filter.date_to, retained, as_of)?
        {
            let entry = totals.entry(id).or_default();
            entry.debit = columns.debit;
            entry.credit = columns.credit;
            entry.balance = columns.net();
        }
        if let Some(range) = comparison {
            let comparison_as_of = range.to.unwrap_or(as_of);
            for (id, columns) in
                self.window_columns(filter, range.from, range.to, retained, comparison_as_of)?
            {
                let entry = totals.entry(id).or_default();
                entry.debit_comp = columns.debit;
                entry.credit_comp = columns.credit;
                entry.balance_comp = columns.net();
            }
        }

        let aggregator = HierarchicalAggregator::new(
            &tree,
            &scope,
            &totals,
            filter.display,
            &self.context.currency,
        );
        let (rows, node_totals) = aggregator.aggregate(root.id, 0)?;
        debug!(report = %root.name, rows = rows.len(), "Built balance sheet");

        Ok(BalanceSheetReport {
            name: root.name.clone(),
            date_from: filter.date_from,
            date_to: filter.date_to,
            comparison,
            rows,
            totals: node_totals,
        })
    }

    /// Trial balance with opening, period and closing columns.
    pub fn trial_balance(&self, filter: &ReportFilter) -> Result<TrialBalanceReport, ReportError> {
        validate_range(filter.date_from, filter.date_to)?;
        let accounts = self.store.accounts()?;
        let scope = accounts_in_scope(&accounts, filter);
        if scope.is_empty() {
            return Err(ReportError::NoAccounts);
        }

        let currency = &self.context.currency;
        let as_of = filter.date_to.unwrap_or(self.context.today);
        let roller = BalanceRoller::prepare(self.store, filter, &accounts, currency, as_of)?;
        let report =
            roller.trial_balance(&scope, filter.display, currency, filter.date_from, filter.date_to);
        debug!(rows = report.rows.len(), "Built trial balance");
        Ok(report)
    }

    /// Partner ledger: per-partner summary and running-balance detail.
    pub fn partner_ledger(
        &self,
        filter: &ReportFilter,
    ) -> Result<PartnerLedgerReport, ReportError> {
        validate_range(filter.date_from, filter.date_to)?;
        let currency = &self.context.currency;
        let as_of = filter.date_to.unwrap_or(self.context.today);
        let selector = LineSelector::new(self.store).include_unassigned_partners(true);
        let extra = match filter.reconciliation {
            ReconciliationMode::All => LinePredicate::Always,
            ReconciliationMode::Unreconciled => selector.open_as_of(as_of)?,
        };
        let lines = selector.select(filter, None, filter.date_to, &AccountType::PARTNER, extra)?;

        let accounts = self.accounts_by_id()?;
        let normalizer = CurrencyNormalizer::new(self.store);
        let mut labels = LabelCache::new(self.store);
        let mut by_partner: BTreeMap<Option<PartnerId>, Vec<&LedgerLine>> = BTreeMap::new();
        for line in &lines {
            by_partner.entry(line.partner_id).or_default().push(line);
        }

        let mut sections = Vec::with_capacity(by_partner.len());
        for (partner_id, partner_lines) in by_partner {
            let mut summary = DebitCredit::default();
            let mut opening = DebitCredit::default();
            let mut entries = Vec::new();
            for line in partner_lines {
                let columns = normalizer.line_columns(line, currency, as_of)?;
                summary += columns;
                match filter.date_from {
                    Some(from) if line.date < from => opening += columns,
                    _ => entries.push(LedgerEntry {
                        line_id: line.id,
                        date: line.date,
                        journal_code: labels.journal(line.journal_id)?,
                        account_name: lookup_account(&accounts, line.account_id)?.name.clone(),
                        move_name: line.move_name.clone(),
                        label: line.label.clone(),
                        debit: columns.debit,
                        credit: columns.credit,
                    }),
                }
            }
            if filter.display == DisplayMode::NotZero && is_zero(summary.net(), currency) {
                continue;
            }

            let name = match partner_id {
                Some(id) => labels.partner(id)?,
                None => UNKNOWN_PARTNER.to_string(),
            };
            let opening = filter.date_from.map(|date| OpeningBalance {
                date,
                columns: opening,
            });
            sections.push(PartnerLedgerSection {
                partner_id,
                name,
                debit: summary.debit,
                credit: summary.credit,
                balance: summary.net(),
                rows: RunningBalanceSequencer::sequence(entries, opening),
            });
        }
        sections.sort_by_cached_key(|s| (s.partner_id.is_none(), s.name.to_uppercase(), s.partner_id));

        let totals = sections
            .iter()
            .map(|s| DebitCredit::new(s.debit, s.credit))
            .fold(DebitCredit::default(), |acc, columns| acc + columns);
        debug!(
            partners = sections.len(),
            lines = lines.len(),
            "Built partner ledger"
        );
        Ok(PartnerLedgerReport {
            date_from: filter.date_from,
            date_to: filter.date_to,
            sections,
            totals,
        })
    }

    /// Resolves the names behind a filter's selections.
    pub fn filter_summary(&self, filter: &ReportFilter) -> Result<FilterSummary, ReportError> {
        let journals = filter
            .journal_ids
            .iter()
            .map(|&id| self.store.journal(id).map(|j| j.code))
            .collect::<Result<Vec<_>, _>>()?;
        let accounts = filter
            .account_ids
            .iter()
            .map(|&id| self.store.account(id).map(|a| a.display_name()))
            .collect::<Result<Vec<_>, _>>()?;
        let partners = filter
            .partner_ids
            .iter()
            .map(|&id| self.store.partner(id).map(|p| p.name))
            .collect::<Result<Vec<_>, _>>()?;
        let partner_tags = filter
            .partner_tag_ids
            .iter()
            .map(|&id| self.store.partner_tag(id).map(|t| t.name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FilterSummary {
            journals,
            accounts,
            partners,
            partner_tags,
            account_types: filter
                .account_types
                .iter()
                .map(|t| t.label().to_string())
                .collect(),
            target_move: filter.target_move.label().to_string(),
            partner_scope: filter.partner_scope.label().to_string(),
        })
    }

    /// Debit/credit per account inside a window.
    ///
    /// The retained-earnings account also absorbs the net of every income and
    /// expense line of the window, whatever the account selection.
    fn window_columns(
        &self,
        filter: &ReportFilter,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        retained_earnings: Option<AccountId>,
        as_of: NaiveDate,
    ) -> Result<HashMap<AccountId, DebitCredit>, ReportError> {
        let currency = &self.context.currency;
        let selector = LineSelector::new(self.store);
        let normalizer = CurrencyNormalizer::new(self.store);

        let mut columns: HashMap<AccountId, DebitCredit> = HashMap::new();
        for line in selector.select(filter, date_from, date_to, &[], LinePredicate::Always)? {
            *columns.entry(line.account_id).or_default() +=
                normalizer.line_columns(&line, currency, as_of)?;
        }

        if let Some(retained) = retained_earnings {
            let mut window = filter.clone();
            window.account_ids.clear();
            window.account_types.clear();
            let mut profit_and_loss = DebitCredit::default();
            let lines = selector.select(
                &window,
                date_from,
                date_to,
                &AccountType::PROFIT_AND_LOSS,
                LinePredicate::Always,
            )?;
            for line in &lines {
                profit_and_loss += normalizer.line_columns(line, currency, as_of)?;
            }
            if !lines.is_empty() {
                *columns.entry(retained).or_default() += profit_and_loss.netted();
            }
        }
        Ok(columns)
    }

    /// Gross duty and VAT totals of a move's invoice lines.
    fn tax_amounts(
        &self,
        filter: &ReportFilter,
        move_id: MoveId,
    ) -> Result<(Decimal, Decimal), StoreError> {
        if filter.duty_product_ids.is_empty() && filter.vat_product_ids.is_empty() {
            return Ok((Decimal::ZERO, Decimal::ZERO));
        }
        let mut duty = Decimal::ZERO;
        let mut vat = Decimal::ZERO;
        for line in self.store.invoice_lines(move_id)? {
            match line.product_id {
                Some(product) if filter.duty_product_ids.contains(&product) => {
                    duty += line.price_total;
                }
                Some(product) if filter.vat_product_ids.contains(&product) => {
                    vat += line.price_total;
                }
                _ => {}
            }
        }
        Ok((duty, vat))
    }

    fn accounts_by_id(&self) -> Result<HashMap<AccountId, Account>, StoreError> {
        Ok(self
            .store
            .accounts()?
            .into_iter()
            .map(|a| (a.id, a))
            .collect())
    }
}

fn lookup_account(
    accounts: &HashMap<AccountId, Account>,
    id: AccountId,
) -> Result<&Account, StoreError> {
    accounts
        .get(&id)
        .ok_or_else(|| StoreError::not_found("account", id))
}

fn validate_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), ReportError> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => {
            Err(ReportError::InvalidDateRange { start, end })
        }
        _ => Ok(()),
    }
}

/// Memoized partner names and journal codes.
struct LabelCache<'a, S: LedgerStore + ?Sized> {
    store: &'a S,
    partners: HashMap<PartnerId, String>,
    journals: HashMap<JournalId, String>,
}

impl<'a, S: LedgerStore + ?Sized> LabelCache<'a, S> {
    fn new(store: &'a S) -> Self {
        Self {
            store,
            partners: HashMap::new(),
            journals: HashMap::new(),
        }
    }

    fn partner(&mut self, id: PartnerId) -> Result<String, StoreError> {
        if let Some(name) = self.partners.get(&id) {
            return Ok(name.clone());
        }
        let name = self.store.partner(id)?.name;
        self.partners.insert(id, name.clone());
        Ok(name)
    }

    fn journal(&mut self, id: JournalId) -> Result<String, StoreError> {
        if let Some(code) = self.journals.get(&id) {
            return Ok(code.clone());
        }
        let code = self.store.journal(id)?.code;
        self.journals.insert(id, code.clone());
        Ok(code)
    }
}
