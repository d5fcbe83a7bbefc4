//! Export of the ledger as a paginated plain-text report or a CSV sheet.
//!
//! The text report has four sections: summary metrics, payments, expenses
//! and the detailed member balances. Pages are separated by a form feed
//! (`\x0c`), so `lpr` and most viewers break them correctly. A table that
//! does not fit on a page continues on the next one under a repeated header.

use std::{fmt, fs, io, path::Path, str::FromStr};

use chrono::NaiveDate;
use csv::Writer;
use serde::Serialize;

use crate::{EngineError, Expense, Ledger, Member, ResultEngine, Summary};

pub const DEFAULT_TITLE: &str = "Mess Meal Report";
pub const DEFAULT_PAGE_HEIGHT: usize = 60;
const MIN_PAGE_HEIGHT: usize = 12;
const PAGE_SEPARATOR: &str = "\n\u{000C}";

/// Output format of [`Report::export`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Csv,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Text),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(EngineError::Export(format!("unsupported format: {other}"))),
        }
    }
}

/// A read-only rendering of a ledger snapshot.
#[derive(Debug)]
pub struct Report<'a> {
    title: String,
    generated_on: NaiveDate,
    page_height: usize,
    members: &'a [Member],
    expenses: &'a [Expense],
    summary: Summary,
}

impl<'a> Report<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            generated_on: ledger.today(),
            page_height: DEFAULT_PAGE_HEIGHT,
            members: ledger.members(),
            expenses: ledger.expenses(),
            summary: ledger.summary(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = date;
        self
    }

    /// Lines per page, page header included.
    pub fn page_height(mut self, lines: usize) -> Self {
        self.page_height = lines.max(MIN_PAGE_HEIGHT);
        self
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// The report split into pages, each starting with a title/page line.
    pub fn pages(&self) -> Vec<String> {
        let sections = [
            self.metrics_section(),
            self.payments_section(),
            self.expenses_section(),
            self.balances_section(),
        ];
        let bodies = paginate(&sections, self.page_height - 2);
        let count = bodies.len();
        bodies
            .into_iter()
            .enumerate()
            .map(|(index, body)| {
                let marker = format!("Page {} of {count}", index + 1);
                let pad = REPORT_WIDTH.saturating_sub(self.title.chars().count() + marker.len());
                let mut lines = vec![
                    format!("{}{}{marker}", self.title, " ".repeat(pad.max(1))),
                    String::new(),
                ];
                lines.extend(body);
                lines.join("\n")
            })
            .collect()
    }

    pub fn to_text(&self) -> String {
        let mut text = self.pages().join(PAGE_SEPARATOR);
        text.push('\n');
        text
    }

    /// Writes the member balance table as CSV.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> ResultEngine<()> {
        let mut writer = Writer::from_writer(writer);
        for statement in &self.summary.statements {
            writer.serialize(BalanceRow {
                name: &statement.name,
                meals: statement.meals,
                rice: statement.rice_count,
                eggs: statement.egg_count,
                meal_cost: statement.meal_cost.plain(),
                extra: statement.extra_cost.plain(),
                total: statement.total_cost.plain(),
                paid: statement.paid.plain(),
                balance: statement.balance.plain(),
                standing: statement.standing().abbreviation(),
            })?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn render(&self, format: ExportFormat) -> ResultEngine<Vec<u8>> {
        match format {
            ExportFormat::Text => Ok(self.to_text().into_bytes()),
            ExportFormat::Csv => {
                let mut buffer = Vec::new();
                self.write_csv(&mut buffer)?;
                Ok(buffer)
            }
        }
    }

    /// Renders and writes the report to `path`, creating parent directories.
    pub fn export(&self, path: &Path, format: ExportFormat) -> ResultEngine<()> {
        let data = self.render(format)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)?;
        tracing::info!(path = %path.display(), %format, "report exported");
        Ok(())
    }

    /// Default file name, e.g. `messbook-report-2024-03-09.txt`.
    pub fn file_name(&self, format: ExportFormat) -> String {
        format!(
            "messbook-report-{}.{}",
            self.generated_on.format("%Y-%m-%d"),
            format.extension()
        )
    }

    fn metrics_section(&self) -> Section {
        let s = &self.summary;
        let active = self.members.iter().filter(|m| m.is_active).count();
        let metric = |label: &str, value: String| format!("{label:<18}{value}");
        Section::new(
            "SUMMARY",
            Vec::new(),
            vec![
                metric("Generated on", self.generated_on.format("%Y-%m-%d").to_string()),
                metric(
                    "Members",
                    format!("{} ({active} active)", self.members.len()),
                ),
                metric("Total meals", s.total_meals.to_string()),
                metric(
                    "Rice cost",
                    format!("{} x {} = {}", s.total_rice, s.prices.rice.plain(), s.rice_cost),
                ),
                metric(
                    "Egg cost",
                    format!("{} x {} = {}", s.total_eggs, s.prices.egg.plain(), s.egg_cost),
                ),
                metric("Total payments", s.total_payments.to_string()),
                metric("Total expenses", s.total_expenses.to_string()),
                metric("Base expenses", s.base_expenses.to_string()),
                metric("Meal rate", format!("{} per meal", s.meal_rate)),
                metric(
                    "Group balance",
                    format!("{} ({})", s.group_balance.abs(), s.group_standing().label()),
                ),
            ],
        )
    }

    fn payments_section(&self) -> Section {
        let table = Table::new(vec![
            Column::left("Name", 30),
            Column::left("Status", 10),
            Column::right("Paid", 14),
        ]);
        let mut rows: Vec<String> = self
            .members
            .iter()
            .map(|member| {
                table.row(&[
                    member.name.clone(),
                    if member.is_active { "active" } else { "inactive" }.to_string(),
                    member.payments.plain(),
                ])
            })
            .collect();
        rows.push(table.rule());
        rows.push(table.row(&[
            "Total".to_string(),
            String::new(),
            self.summary.total_payments.plain(),
        ]));
        Section::new("PAYMENTS", table.header(), rows)
    }

    fn expenses_section(&self) -> Section {
        let table = Table::new(vec![
            Column::left("Date", 10),
            Column::left("Description", 40),
            Column::right("Amount", 14),
        ]);
        let mut rows: Vec<String> = self
            .expenses
            .iter()
            .map(|expense| {
                table.row(&[
                    expense.date.format("%Y-%m-%d").to_string(),
                    expense.description.clone(),
                    expense.amount.plain(),
                ])
            })
            .collect();
        if rows.is_empty() {
            rows.push("No expenses recorded.".to_string());
        }
        rows.push(table.rule());
        rows.push(table.row(&[
            "Total".to_string(),
            String::new(),
            self.summary.total_expenses.plain(),
        ]));
        Section::new("EXPENSES", table.header(), rows)
    }

    fn balances_section(&self) -> Section {
        let table = balance_table();
        let rows = self
            .summary
            .statements
            .iter()
            .map(|st| {
                table.row(&[
                    st.name.clone(),
                    st.meals.to_string(),
                    st.rice_count.to_string(),
                    st.egg_count.to_string(),
                    st.meal_cost.plain(),
                    st.extra_cost.plain(),
                    st.total_cost.plain(),
                    st.paid.plain(),
                    format!("{} {}", st.balance.abs().plain(), st.standing().abbreviation()),
                ])
            })
            .collect();
        Section::new("MEMBER BALANCES", table.header(), rows)
    }
}

#[derive(Serialize)]
struct BalanceRow<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Meals")]
    meals: u32,
    #[serde(rename = "Rice")]
    rice: u32,
    #[serde(rename = "Eggs")]
    eggs: u32,
    #[serde(rename = "Meal Cost")]
    meal_cost: String,
    #[serde(rename = "Extra")]
    extra: String,
    #[serde(rename = "Total")]
    total: String,
    #[serde(rename = "Paid")]
    paid: String,
    #[serde(rename = "Balance")]
    balance: String,
    #[serde(rename = "Standing")]
    standing: &'static str,
}

fn balance_table() -> Table {
    Table::new(vec![
        Column::left("Name", 18),
        Column::right("Meals", 6),
        Column::right("Rice", 5),
        Column::right("Eggs", 5),
        Column::right("Meal Cost", 11),
        Column::right("Extra", 10),
        Column::right("Total", 11),
        Column::right("Paid", 11),
        Column::right("Balance", 14),
    ])
}

/// Width of the widest table; page headers are right-aligned to it.
const REPORT_WIDTH: usize = 18 + 6 + 5 + 5 + 11 + 10 + 11 + 11 + 14 + 8;

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

struct Column {
    title: &'static str,
    width: usize,
    align: Align,
}

impl Column {
    fn left(title: &'static str, width: usize) -> Self {
        Self {
            title,
            width,
            align: Align::Left,
        }
    }

    fn right(title: &'static str, width: usize) -> Self {
        Self {
            title,
            width,
            align: Align::Right,
        }
    }
}

struct Table {
    columns: Vec<Column>,
}

impl Table {
    fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    fn header(&self) -> Vec<String> {
        let titles: Vec<String> = self.columns.iter().map(|c| c.title.to_string()).collect();
        vec![self.row(&titles), self.rule()]
    }

    fn rule(&self) -> String {
        let width = self.columns.iter().map(|c| c.width).sum::<usize>() + self.columns.len() - 1;
        "-".repeat(width)
    }

    fn row(&self, cells: &[String]) -> String {
        self.columns
            .iter()
            .zip(cells)
            .map(|(column, cell)| fit(cell, column.width, column.align))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Pads or truncates `text` to exactly `width` characters.
fn fit(text: &str, width: usize, align: Align) -> String {
    let len = text.chars().count();
    if len > width {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('~');
        return cut;
    }
    match align {
        Align::Left => format!("{text:<width$}"),
        Align::Right => format!("{text:>width$}"),
    }
}

struct Section {
    /// Title plus column header; repeated when the section spills over.
    heading: Vec<String>,
    rows: Vec<String>,
}

impl Section {
    fn new(title: &str, columns: Vec<String>, rows: Vec<String>) -> Self {
        let mut heading = vec![title.to_string()];
        heading.extend(columns);
        Self { heading, rows }
    }
}

/// Lays sections out on pages of `height` lines.
///
/// A section starts on a new page unless its heading and first row fit on the
/// current one.
fn paginate(sections: &[Section], height: usize) -> Vec<Vec<String>> {
    let mut pages = Vec::new();
    let mut page: Vec<String> = Vec::new();

    for section in sections {
        let needed = section.heading.len() + usize::from(!section.rows.is_empty());
        if !page.is_empty() && page.len() + 1 + needed > height {
            pages.push(std::mem::take(&mut page));
        }
        if !page.is_empty() {
            page.push(String::new());
        }
        page.extend(section.heading.iter().cloned());

        for row in &section.rows {
            if page.len() >= height {
                pages.push(std::mem::take(&mut page));
                page.extend(section.heading.iter().cloned());
            }
            page.push(row.clone());
        }
    }

    if !page.is_empty() || pages.is_empty() {
        pages.push(page);
    }
    pages
}
