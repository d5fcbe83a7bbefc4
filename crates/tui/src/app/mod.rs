use std::{
    collections::HashMap,
    path::PathBuf,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use engine::{
    Counter, Expense, ExportFormat, Ledger, Member, MemberId, Report, ResultEngine, Summary,
    aggregate, input,
};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

mod form;

pub use form::{FormState, Submission};

const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Meals,
    Payments,
    Expenses,
    Summary,
    Settings,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Dashboard,
        Section::Meals,
        Section::Payments,
        Section::Expenses,
        Section::Summary,
        Section::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Meals => "Meals",
            Self::Payments => "Payments",
            Self::Expenses => "Expenses",
            Self::Summary => "Summary",
            Self::Settings => "Settings",
        }
    }

    pub fn shortcut(self) -> char {
        match self {
            Self::Dashboard => '1',
            Self::Meals => '2',
            Self::Payments => '3',
            Self::Expenses => '4',
            Self::Summary => '5',
            Self::Settings => '6',
        }
    }

    fn from_shortcut(ch: char) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.shortcut() == ch)
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|section| *section == self)
            .unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Selection inside a list whose length can change under it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListCursor {
    selected: usize,
}

impl ListCursor {
    /// Selected row clamped to `len`, `None` for an empty list.
    pub fn selected(self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.selected.min(len - 1))
        }
    }

    fn select_next(&mut self, len: usize) {
        self.selected = (self.selected + 1).min(len.saturating_sub(1));
    }

    fn select_prev(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1)).saturating_sub(1);
    }
}

/// The per-member stepper counts on the Meals screen, not yet recorded.
#[derive(Debug)]
pub struct MealsState {
    pub cursor: ListCursor,
    pub counter: Counter,
    pending: HashMap<(MemberId, Counter), u32>,
}

impl Default for MealsState {
    fn default() -> Self {
        Self {
            cursor: ListCursor::default(),
            counter: Counter::Meals,
            pending: HashMap::new(),
        }
    }
}

impl MealsState {
    pub fn pending(&self, id: MemberId, counter: Counter) -> u32 {
        self.pending.get(&(id, counter)).copied().unwrap_or(0)
    }

    fn step(&mut self, id: MemberId, delta: i32) {
        let key = (id, self.counter);
        match input::step_entry_count(self.pending(id, self.counter), delta) {
            0 => {
                self.pending.remove(&key);
            }
            count => {
                self.pending.insert(key, count);
            }
        }
    }

    fn clear(&mut self, id: MemberId, counter: Counter) {
        self.pending.remove(&(id, counter));
    }

    fn forget(&mut self, id: MemberId) {
        self.pending.retain(|(member_id, _), _| *member_id != id);
    }

    fn cycle_counter(&mut self, forward: bool) {
        let len = Counter::ALL.len();
        let index = Counter::ALL
            .iter()
            .position(|counter| *counter == self.counter)
            .unwrap_or(0);
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        self.counter = Counter::ALL[next];
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    EditPrices,
    Export,
    FactoryReset,
}

impl SettingsAction {
    pub const ALL: [SettingsAction; 3] = [
        SettingsAction::EditPrices,
        SettingsAction::Export,
        SettingsAction::FactoryReset,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::EditPrices => "Edit unit prices",
            Self::Export => "Export report (text + csv)",
            Self::FactoryReset => "Factory reset",
        }
    }

    pub fn shortcut(self) -> char {
        match self {
            Self::EditPrices => 'p',
            Self::Export => 'x',
            Self::FactoryReset => 'r',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    RemoveMember(MemberId),
    DeleteExpense(engine::ExpenseId),
    FactoryReset,
}

#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub action: ConfirmAction,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    expires_at: Instant,
}

impl ToastState {
    fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub ledger: Ledger,
    pub section: Section,
    pub meals: MealsState,
    pub payments: ListCursor,
    pub expenses: ListCursor,
    pub settings: ListCursor,
    pub form: Option<FormState>,
    pub confirm: Option<ConfirmState>,
    pub toast: Option<ToastState>,
    pub help: bool,
    pub data_dir: String,
    pub export_dir: PathBuf,
    summary: Summary,
    summary_version: u64,
}

impl AppState {
    fn new(config: &AppConfig, ledger: Ledger) -> Self {
        let summary = ledger.summary();
        let summary_version = ledger.version();
        Self {
            ledger,
            section: Section::Dashboard,
            meals: MealsState::default(),
            payments: ListCursor::default(),
            expenses: ListCursor::default(),
            settings: ListCursor::default(),
            form: None,
            confirm: None,
            toast: None,
            help: false,
            data_dir: config.data_dir.clone(),
            export_dir: PathBuf::from(&config.export_dir),
            summary,
            summary_version,
        }
    }

    /// Derived figures for the current ledger version.
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    fn sync_summary(&mut self) {
        if self.summary_version != self.ledger.version() {
            self.summary = self.ledger.summary();
            self.summary_version = self.ledger.version();
        }
    }

    /// Expenses newest first, the order every expense list uses.
    pub fn sorted_expenses(&self) -> Vec<&Expense> {
        let expenses = self.ledger.expenses();
        aggregate::recent_expenses(expenses, expenses.len())
    }

    pub fn selected_member(&self, cursor: ListCursor) -> Option<&Member> {
        let members = self.ledger.members();
        cursor
            .selected(members.len())
            .and_then(|index| members.get(index))
    }

    pub fn selected_expense(&self) -> Option<&Expense> {
        let expenses = self.sorted_expenses();
        self.expenses
            .selected(expenses.len())
            .and_then(|index| expenses.get(index).copied())
    }

    pub fn selected_setting(&self) -> SettingsAction {
        self.settings
            .selected(SettingsAction::ALL.len())
            .map_or(SettingsAction::EditPrices, |index| SettingsAction::ALL[index])
    }

    fn expire_toast(&mut self, now: Instant) {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
        }
    }
}

pub struct App {
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, ledger: Ledger) -> Self {
        Self {
            state: AppState::new(&config, ledger),
            should_quit: false,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        ui::restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            self.state.sync_summary();
            self.state.expire_toast(Instant::now());
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key);
        if action == AppAction::ForceQuit {
            self.should_quit = true;
            return;
        }
        if self.state.confirm.is_some() {
            self.handle_confirm_key(action);
            return;
        }
        if self.state.form.is_some() {
            self.handle_form_key(action);
            return;
        }
        if self.state.help {
            if matches!(action, AppAction::Cancel | AppAction::Input('?' | 'q')) {
                self.state.help = false;
            }
            return;
        }

        if let AppAction::Input(ch) = action
            && let Some(section) = Section::from_shortcut(ch)
        {
            self.state.section = section;
            return;
        }

        match action {
            AppAction::Input('q') => self.should_quit = true,
            AppAction::Input('?') => self.state.help = true,
            AppAction::Left => self.state.section = self.state.section.prev(),
            AppAction::Right => self.state.section = self.state.section.next(),
            _ => match self.state.section {
                Section::Dashboard => {}
                Section::Meals => self.handle_meals_key(action),
                Section::Payments => self.handle_payments_key(action),
                Section::Expenses => self.handle_expenses_key(action),
                Section::Summary => {
                    if action == AppAction::Input('x') {
                        self.export_reports();
                    }
                }
                Section::Settings => self.handle_settings_key(action),
            },
        }
    }

    fn handle_meals_key(&mut self, action: AppAction) {
        let len = self.state.ledger.members().len();
        match action {
            AppAction::Up | AppAction::Input('k') => self.state.meals.cursor.select_prev(len),
            AppAction::Down | AppAction::Input('j') => self.state.meals.cursor.select_next(len),
            AppAction::NextField => self.state.meals.cycle_counter(true),
            AppAction::PrevField => self.state.meals.cycle_counter(false),
            AppAction::Input('+' | '=') => self.step_pending(1),
            AppAction::Input('-') => self.step_pending(-1),
            AppAction::Submit => self.commit_pending(),
            AppAction::Input(' ') => self.toggle_selected_member(),
            AppAction::Input('a') => self.state.form = Some(FormState::add_member()),
            AppAction::Input('e') => {
                if let Some(member) = self.state.selected_member(self.state.meals.cursor) {
                    self.state.form = Some(FormState::rename_member(member));
                }
            }
            AppAction::Input('s') => {
                if let Some(member) = self.state.selected_member(self.state.meals.cursor) {
                    self.state.form = Some(FormState::set_count(member, self.state.meals.counter));
                }
            }
            AppAction::Input('d') => {
                if let Some(member) = self.state.selected_member(self.state.meals.cursor) {
                    self.state.confirm = Some(ConfirmState {
                        action: ConfirmAction::RemoveMember(member.id),
                        message: format!("Remove {}? This cannot be undone.", member.name),
                    });
                }
            }
            _ => {}
        }
    }

    fn handle_payments_key(&mut self, action: AppAction) {
        let len = self.state.ledger.members().len();
        match action {
            AppAction::Up | AppAction::Input('k') => self.state.payments.select_prev(len),
            AppAction::Down | AppAction::Input('j') => self.state.payments.select_next(len),
            AppAction::Input('a') | AppAction::Submit => {
                if let Some(member) = self.state.selected_member(self.state.payments) {
                    self.state.form = Some(FormState::add_payment(member));
                }
            }
            AppAction::Input('s') => {
                if let Some(member) = self.state.selected_member(self.state.payments) {
                    self.state.form = Some(FormState::set_payment_total(member));
                }
            }
            _ => {}
        }
    }

    fn handle_expenses_key(&mut self, action: AppAction) {
        let len = self.state.ledger.expenses().len();
        match action {
            AppAction::Up | AppAction::Input('k') => self.state.expenses.select_prev(len),
            AppAction::Down | AppAction::Input('j') => self.state.expenses.select_next(len),
            AppAction::Input('a') => {
                self.state.form = Some(FormState::add_expense(self.state.ledger.today()));
            }
            AppAction::Input('e') | AppAction::Submit => {
                if let Some(expense) = self.state.selected_expense() {
                    self.state.form = Some(FormState::edit_expense(expense));
                }
            }
            AppAction::Input('d') => {
                if let Some(expense) = self.state.selected_expense() {
                    self.state.confirm = Some(ConfirmState {
                        action: ConfirmAction::DeleteExpense(expense.id),
                        message: format!("Delete \"{}\" ({})?", expense.description, expense.amount),
                    });
                }
            }
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, action: AppAction) {
        let len = SettingsAction::ALL.len();
        let chosen = match action {
            AppAction::Up | AppAction::Input('k') => {
                self.state.settings.select_prev(len);
                None
            }
            AppAction::Down | AppAction::Input('j') => {
                self.state.settings.select_next(len);
                None
            }
            AppAction::Submit => Some(self.state.selected_setting()),
            AppAction::Input(ch) => SettingsAction::ALL
                .into_iter()
                .find(|setting| setting.shortcut() == ch),
            _ => None,
        };

        match chosen {
            Some(SettingsAction::EditPrices) => {
                self.state.form = Some(FormState::prices(self.state.ledger.prices()));
            }
            Some(SettingsAction::Export) => self.export_reports(),
            Some(SettingsAction::FactoryReset) => {
                self.state.confirm = Some(ConfirmState {
                    action: ConfirmAction::FactoryReset,
                    message: "Delete every member and expense? Prices are kept.".to_string(),
                });
            }
            None => {}
        }
    }

    fn handle_form_key(&mut self, action: AppAction) {
        let Some(form) = self.state.form.as_mut() else {
            return;
        };
        match action {
            AppAction::Cancel => self.state.form = None,
            AppAction::NextField | AppAction::Down => form.focus_next(),
            AppAction::PrevField | AppAction::Up => form.focus_prev(),
            AppAction::Backspace => form.pop_char(),
            AppAction::Input(ch) => form.push_char(ch),
            AppAction::Submit => self.submit_form(),
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, action: AppAction) {
        match action {
            AppAction::Submit | AppAction::Input('y' | 'Y') => {
                if let Some(confirm) = self.state.confirm.take() {
                    self.run_confirmed(confirm.action);
                }
            }
            AppAction::Cancel | AppAction::Input('n' | 'N') => self.state.confirm = None,
            _ => {}
        }
    }

    fn selected_meals_member(&mut self) -> Option<(MemberId, String)> {
        let member = self.state.selected_member(self.state.meals.cursor)?;
        if !member.is_active {
            let message = format!("{} is inactive, press space to reactivate", member.name);
            self.toast(ToastLevel::Info, message);
            return None;
        }
        Some((member.id, member.name.clone()))
    }

    fn step_pending(&mut self, delta: i32) {
        if let Some((id, _)) = self.selected_meals_member() {
            self.state.meals.step(id, delta);
        }
    }

    fn commit_pending(&mut self) {
        let Some((id, name)) = self.selected_meals_member() else {
            return;
        };
        let counter = self.state.meals.counter;
        let count = self.state.meals.pending(id, counter);
        if count == 0 {
            self.toast(ToastLevel::Info, "Pick a count with + and - first");
            return;
        }
        let result = self.state.ledger.add_count(id, counter, count);
        let label = counter.label().to_lowercase();
        if self.notify(result, |()| format!("Added {count} {label} for {name}")) {
            self.state.meals.clear(id, counter);
        }
    }

    fn toggle_selected_member(&mut self) {
        let Some(member) = self.state.selected_member(self.state.meals.cursor) else {
            return;
        };
        let (id, name) = (member.id, member.name.clone());
        let result = self.state.ledger.toggle_active(id);
        self.notify(result, |active| {
            let status = if active { "active" } else { "inactive" };
            format!("{name} is now {status}")
        });
    }

    fn submit_form(&mut self) {
        let Some(mut form) = self.state.form.take() else {
            return;
        };
        match form.submission() {
            Ok(submission) => self.apply(submission),
            Err(message) => {
                form.error = Some(message);
                self.state.form = Some(form);
            }
        }
    }

    fn apply(&mut self, submission: Submission) {
        let ledger = &mut self.state.ledger;
        match submission {
            Submission::AddMember { name } => {
                let result = ledger.add_member(&name);
                self.notify(result, |id| format!("Added {name} (#{id})"));
            }
            Submission::RenameMember { id, name } => {
                let result = ledger.update_name(id, &name);
                self.notify(result, |()| format!("Renamed to {name}"));
            }
            Submission::SetCount { id, counter, value } => {
                let result = ledger.set_count(id, counter, value);
                let label = counter.label().to_lowercase();
                self.notify(result, |()| format!("{label} set to {value}"));
            }
            Submission::AddPayment { id, amount } => {
                let result = ledger.add_payment(id, amount);
                self.notify(result, |()| format!("Recorded payment of {amount}"));
            }
            Submission::SetPaymentTotal { id, total } => {
                let result = ledger.set_payment_total(id, total);
                self.notify(result, |()| format!("Total paid set to {total}"));
            }
            Submission::AddExpense {
                description,
                amount,
                date,
            } => {
                let result = ledger.add_expense_on(&description, amount, date);
                self.notify(result, |_| format!("Added expense {description} ({amount})"));
            }
            Submission::EditExpense {
                id,
                description,
                amount,
            } => {
                let result = ledger.update_expense(id, &description, amount);
                self.notify(result, |()| format!("Updated expense {description}"));
            }
            Submission::Prices(prices) => {
                let result = ledger.set_prices(prices);
                self.notify(result, |()| {
                    format!("Prices set: rice {} / egg {}", prices.rice, prices.egg)
                });
            }
        }
    }

    fn run_confirmed(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::RemoveMember(id) => {
                let result = self.state.ledger.remove_member(id);
                if self.notify(result, |member| format!("Removed {}", member.name)) {
                    self.state.meals.forget(id);
                }
            }
            ConfirmAction::DeleteExpense(id) => {
                let result = self.state.ledger.delete_expense(id);
                self.notify(result, |expense| {
                    format!("Deleted expense {}", expense.description)
                });
            }
            ConfirmAction::FactoryReset => {
                let result = self.state.ledger.clear_all();
                if self.notify(result, |()| "All members and expenses cleared".to_string()) {
                    self.state.meals = MealsState::default();
                }
            }
        }
    }

    fn export_reports(&mut self) {
        let report = Report::new(&self.state.ledger);
        let mut written = Vec::new();
        for format in [ExportFormat::Text, ExportFormat::Csv] {
            let path = self.state.export_dir.join(report.file_name(format));
            if let Err(err) = report.export(&path, format) {
                tracing::error!(path = %path.display(), "export failed: {err}");
                self.toast(ToastLevel::Error, format!("Export failed: {err}"));
                return;
            }
            written.push(path.display().to_string());
        }
        self.toast(ToastLevel::Success, format!("Exported {}", written.join(", ")));
    }

    /// Turns a ledger result into a toast. Returns whether it succeeded.
    fn notify<T>(&mut self, result: ResultEngine<T>, message: impl FnOnce(T) -> String) -> bool {
        match result {
            Ok(value) => {
                self.toast(ToastLevel::Success, message(value));
                true
            }
            Err(err) => {
                tracing::warn!("action failed: {err}");
                self.toast(ToastLevel::Error, err.to_string());
                false
            }
        }
    }

    fn toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.state.toast = Some(ToastState::new(level, message));
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use engine::{MemoryStorage, Money};

    use super::*;

    fn app() -> App {
        let ledger = Ledger::builder()
            .storage(MemoryStorage::new())
            .build()
            .unwrap();
        App::new(AppConfig::default(), ledger)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn digits_and_arrows_switch_sections() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.state.section, Section::Expenses);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.state.section, Section::Summary);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.state.section, Section::Dashboard);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.state.section, Section::Settings);
    }

    #[test]
    fn stepper_adds_pending_meals() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Down);
        for _ in 0..12 {
            press(&mut app, KeyCode::Char('+'));
        }
        assert_eq!(app.state.meals.pending(2, Counter::Meals), 9);
        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state.ledger.member(2).unwrap().meals, 8);
        assert_eq!(app.state.meals.pending(2, Counter::Meals), 0);
        assert_eq!(app.state.toast.as_ref().unwrap().level, ToastLevel::Success);
    }

    #[test]
    fn tab_moves_the_stepper_to_rice() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.state.meals.counter, Counter::Rice);
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Enter);
        let member = app.state.ledger.member(1).unwrap();
        assert_eq!((member.meals, member.rice_count), (0, 2));
    }

    #[test]
    fn inactive_members_cannot_log_meals() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.state.ledger.member(1).unwrap().is_active);

        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.state.meals.pending(1, Counter::Meals), 0);
        assert_eq!(app.state.toast.as_ref().unwrap().level, ToastLevel::Info);
    }

    #[test]
    fn add_member_form_round_trip() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        let form = app.state.form.as_ref().unwrap();
        assert_eq!(form.error.as_deref(), Some("Name cannot be empty"));

        type_text(&mut app, "quinn");
        press(&mut app, KeyCode::Enter);
        assert!(app.state.form.is_none());
        assert_eq!(app.state.ledger.member(6).unwrap().name, "quinn");
    }

    #[test]
    fn q_is_text_inside_a_form() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "q");
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        assert!(app.state.form.is_none());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn removing_a_member_needs_confirmation() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(
            app.state.confirm.as_ref().unwrap().action,
            ConfirmAction::RemoveMember(3)
        );
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.state.ledger.members().len(), 5);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        let ids: Vec<_> = app.state.ledger.members().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 5]);
    }

    #[test]
    fn payment_form_rejects_zero() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "0");
        press(&mut app, KeyCode::Enter);
        assert!(app.state.form.as_ref().unwrap().error.is_some());

        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "250");
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.state.ledger.member(1).unwrap().payments,
            Money::new(250.0)
        );
    }

    #[test]
    fn expenses_are_added_edited_and_deleted() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Rice sack");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "1200");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.ledger.expenses().len(), 1);
        assert_eq!(app.state.ledger.expenses()[0].date, app.state.ledger.today());

        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Tab);
        for _ in 0..7 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "1100");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.ledger.expenses()[0].amount, Money::new(1100.0));

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Enter);
        assert!(app.state.ledger.expenses().is_empty());
    }

    #[test]
    fn factory_reset_keeps_prices() {
        let mut app = app();
        press(&mut app, KeyCode::Char('6'));
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "25");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.ledger.prices().rice, Money::new(25.0));

        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.state.ledger.members().is_empty());
        assert_eq!(app.state.ledger.prices().rice, Money::new(25.0));
    }

    #[test]
    fn summary_cache_follows_the_ledger_version() {
        let mut app = app();
        app.state.ledger.add_meals(1, 4).unwrap();
        assert_eq!(app.state.summary().total_meals, 0);
        app.state.sync_summary();
        assert_eq!(app.state.summary().total_meals, 4);
    }

    #[test]
    fn cursor_survives_shrinking_lists() {
        let mut cursor = ListCursor::default();
        cursor.select_next(5);
        cursor.select_next(5);
        assert_eq!(cursor.selected(5), Some(2));
        assert_eq!(cursor.selected(2), Some(1));
        cursor.select_prev(2);
        assert_eq!(cursor.selected(2), Some(0));
        assert_eq!(cursor.selected(0), None);
    }
}
