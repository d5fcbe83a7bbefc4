use std::{
    error::Error,
    io::{IsTerminal, Write},
    path::PathBuf,
};

use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
};
use engine::{
    Counter, ExportFormat, FileStorage, Ledger, MemberId, Money, Prices, Report,
    ResultEngine, aggregate, input,
};

mod exit;
mod print;

use exit::Confirmation;

type CliResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

#[derive(Parser, Debug)]
#[command(name = "messbook")]
#[command(about = "Meal and expense ledger for a shared mess")]
struct Cli {
    /// Directory holding the ledger snapshot (also read from `MESSBOOK_DATA_DIR`).
    #[arg(long, env = "MESSBOOK_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// IANA timezone that decides "today" (also read from `MESSBOOK_TIMEZONE`).
    #[arg(long, env = "MESSBOOK_TIMEZONE", default_value = "Asia/Dhaka", value_parser = parse_timezone)]
    timezone: Tz,

    /// Log level for diagnostics written to stderr.
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage members.
    Member(Member),
    /// Record meals for a member.
    Meal(Count),
    /// Record rice units for a member.
    Rice(Count),
    /// Record egg units for a member.
    Egg(Count),
    /// Record payments.
    Payment(Payment),
    /// Manage shared expenses.
    Expense(Expense),
    /// Show or change unit prices.
    Prices(PricesCmd),
    /// Print totals, meal rate and every member's balance.
    Summary,
    /// Write the paginated report or the balance CSV.
    Export(ExportArgs),
    /// Delete every member and expense. Prices are kept.
    Reset(ConfirmArgs),
}

#[derive(Args, Debug)]
struct Member {
    #[command(subcommand)]
    command: MemberCommand,
}

#[derive(Subcommand, Debug)]
enum MemberCommand {
    List,
    Add {
        name: String,
    },
    Rename {
        id: MemberId,
        name: String,
    },
    /// Flip between active and inactive.
    Toggle {
        id: MemberId,
    },
    Remove {
        id: MemberId,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

#[derive(Args, Debug)]
struct Count {
    #[command(subcommand)]
    command: CountCommand,
}

#[derive(Subcommand, Debug)]
enum CountCommand {
    /// Add to the running count.
    Add {
        id: MemberId,
        /// Invalid or negative values count as 0.
        #[arg(allow_hyphen_values = true)]
        count: String,
    },
    /// Overwrite the running count.
    Set {
        id: MemberId,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[derive(Args, Debug)]
struct Payment {
    #[command(subcommand)]
    command: PaymentCommand,
}

#[derive(Subcommand, Debug)]
enum PaymentCommand {
    /// Add a payment to the member's total.
    Add { id: MemberId, amount: String },
    /// Overwrite the member's total paid (negative values become 0).
    Set {
        id: MemberId,
        #[arg(allow_hyphen_values = true)]
        total: String,
    },
}

#[derive(Args, Debug)]
struct Expense {
    #[command(subcommand)]
    command: ExpenseCommand,
}

#[derive(Subcommand, Debug)]
enum ExpenseCommand {
    /// List expenses, newest first.
    List,
    Add {
        description: String,
        amount: String,
        /// Date as YYYY-MM-DD; defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
    /// Change description and amount; the date is kept.
    Update {
        id: i64,
        description: String,
        amount: String,
    },
    Delete {
        id: i64,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

#[derive(Args, Debug)]
struct PricesCmd {
    #[command(subcommand)]
    command: PricesCommand,
}

#[derive(Subcommand, Debug)]
enum PricesCommand {
    Show,
    /// Change one or both unit prices.
    Set {
        #[arg(long)]
        rice: Option<String>,
        #[arg(long)]
        egg: Option<String>,
    },
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// `text` (paginated report) or `csv` (balance table).
    #[arg(long, default_value = "text")]
    format: ExportFormat,
    /// Output file, `-` for stdout. Defaults to a dated file name.
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long)]
    title: Option<String>,
}

#[derive(Args, Debug)]
struct ConfirmArgs {
    /// Skip the confirmation prompt.
    #[arg(long)]
    yes: bool,
}

fn parse_timezone(raw: &str) -> Result<Tz, String> {
    raw.parse::<Tz>()
        .map_err(|err| format!("unknown timezone {raw}: {err}"))
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> CliResult<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Reads a single y/n keypress. Anything but `y` declines.
fn prompt_yes_no(question: &str) -> CliResult<bool> {
    let _raw = RawModeGuard::enter()?;

    let mut out = std::io::stderr();
    execute!(out, Print(format!("{question} [y/N] ")))?;
    out.flush()?;

    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        let answer = match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => false,
            KeyCode::Char('y' | 'Y') => true,
            KeyCode::Char(_) | KeyCode::Enter | KeyCode::Esc => false,
            _ => continue,
        };
        execute!(out, Print(if answer { "y\r\n" } else { "n\r\n" }))?;
        out.flush()?;
        return Ok(answer);
    }
}

/// Destructive commands need `--yes`, or an interactive confirmation.
fn confirm(args: &ConfirmArgs, question: &str) -> CliResult<()> {
    match exit::confirmation(args.yes, std::io::stdin().is_terminal()) {
        Confirmation::Granted => Ok(()),
        Confirmation::Refused => {
            eprintln!("refusing without --yes: {question}");
            std::process::exit(exit::DECLINED);
        }
        Confirmation::Prompt => {
            if !prompt_yes_no(question)? {
                eprintln!("aborted");
                std::process::exit(exit::DECLINED);
            }
            Ok(())
        }
    }
}

/// Ends the process on bad input or unknown ids; other errors propagate.
fn check<T>(result: ResultEngine<T>) -> CliResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) => match exit::code_for(&err) {
            Some(code) => {
                eprintln!("{err}");
                std::process::exit(code);
            }
            None => Err(err.into()),
        },
    }
}

fn member_name(ledger: &Ledger, id: MemberId) -> String {
    ledger
        .member(id)
        .map_or_else(|| format!("member {id}"), |member| member.name.clone())
}

fn run_count(ledger: &mut Ledger, counter: Counter, command: CountCommand) -> CliResult<()> {
    let label = counter.label().to_lowercase();
    match command {
        CountCommand::Add { id, count } => {
            let count = input::coerce_count(&count);
            check(ledger.add_count(id, counter, count))?;
            println!(
                "{}: {label} +{count} = {}",
                member_name(ledger, id),
                ledger.member(id).map_or(0, |m| m.count(counter))
            );
        }
        CountCommand::Set { id, value } => {
            let value = input::coerce_count(&value);
            check(ledger.set_count(id, counter, value))?;
            println!("{}: {label} = {value}", member_name(ledger, id));
        }
    }
    Ok(())
}

fn export(ledger: &Ledger, args: ExportArgs) -> CliResult<()> {
    let mut report = Report::new(ledger);
    if let Some(title) = args.title {
        report = report.title(title);
    }

    match args.out {
        Some(path) if path.as_os_str() == "-" => {
            std::io::stdout().write_all(&report.render(args.format)?)?;
        }
        out => {
            let path = out.unwrap_or_else(|| PathBuf::from(report.file_name(args.format)));
            report.export(&path, args.format)?;
            println!("exported {}", path.display());
        }
    }
    Ok(())
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "messbook={level},engine={level}",
            level = cli.log_level
        ))
        .with_writer(std::io::stderr)
        .init();

    let mut ledger = Ledger::builder()
        .storage(FileStorage::new(&cli.data_dir))
        .timezone(cli.timezone)
        .build()?;

    match cli.command {
        Command::Member(Member { command }) => match command {
            MemberCommand::List => print!("{}", print::members(ledger.members())),
            MemberCommand::Add { name } => {
                let id = check(ledger.add_member(&name))?;
                println!("added member #{id}: {}", name.trim());
            }
            MemberCommand::Rename { id, name } => {
                check(ledger.update_name(id, &name))?;
                println!("renamed #{id} to {}", name.trim());
            }
            MemberCommand::Toggle { id } => {
                let active = check(ledger.toggle_active(id))?;
                let status = if active { "active" } else { "inactive" };
                println!("{} is now {status}", member_name(&ledger, id));
            }
            MemberCommand::Remove { id, confirm: args } => {
                let name = member_name(&ledger, id);
                confirm(&args, &format!("Remove {name} (#{id})?"))?;
                let removed = check(ledger.remove_member(id))?;
                println!("removed {}", removed.name);
            }
        },
        Command::Meal(Count { command }) => run_count(&mut ledger, Counter::Meals, command)?,
        Command::Rice(Count { command }) => run_count(&mut ledger, Counter::Rice, command)?,
        Command::Egg(Count { command }) => run_count(&mut ledger, Counter::Eggs, command)?,
        Command::Payment(Payment { command }) => match command {
            PaymentCommand::Add { id, amount } => {
                let amount = check(exit::positive_amount(&amount))?;
                check(ledger.add_payment(id, amount))?;
                let total = ledger.member(id).map_or(Money::ZERO, |m| m.payments);
                println!("{}: paid {amount}, total {total}", member_name(&ledger, id));
            }
            PaymentCommand::Set { id, total } => {
                let total = input::coerce_amount(&total);
                check(ledger.set_payment_total(id, total))?;
                println!("{}: total paid {total}", member_name(&ledger, id));
            }
        },
        Command::Expense(Expense { command }) => match command {
            ExpenseCommand::List => {
                let expenses = ledger.expenses();
                print!(
                    "{}",
                    print::expenses(&aggregate::recent_expenses(expenses, expenses.len()))
                );
            }
            ExpenseCommand::Add {
                description,
                amount,
                date,
            } => {
                let amount = check(exit::positive_amount(&amount))?;
                let id = match date {
                    Some(raw) => {
                        let date = check(input::parse_date(&raw))?;
                        check(ledger.add_expense_on(&description, amount, date))?
                    }
                    None => check(ledger.add_expense(&description, amount))?,
                };
                println!("added expense {id}: {} {amount}", description.trim());
            }
            ExpenseCommand::Update {
                id,
                description,
                amount,
            } => {
                let amount = check(exit::positive_amount(&amount))?;
                check(ledger.update_expense(id, &description, amount))?;
                println!("updated expense {id}");
            }
            ExpenseCommand::Delete { id, confirm: args } => {
                let question = match ledger.expense(id) {
                    Some(expense) => format!("Delete {expense}?"),
                    None => format!("Delete expense {id}?"),
                };
                confirm(&args, &question)?;
                let removed = check(ledger.delete_expense(id))?;
                println!("deleted {removed}");
            }
        },
        Command::Prices(PricesCmd { command }) => match command {
            PricesCommand::Show => print!("{}", print::prices(ledger.prices())),
            PricesCommand::Set { rice, egg } => {
                let current = ledger.prices();
                let prices = Prices::new(
                    rice.map_or(current.rice, |raw| input::coerce_amount(&raw)),
                    egg.map_or(current.egg, |raw| input::coerce_amount(&raw)),
                );
                ledger.set_prices(prices)?;
                print!("{}", print::prices(ledger.prices()));
            }
        },
        Command::Summary => print!("{}", print::summary(&ledger.summary())),
        Command::Export(args) => export(&ledger, args)?,
        Command::Reset(args) => {
            confirm(&args, "Delete every member and expense?")?;
            ledger.clear_all()?;
            println!("ledger cleared; prices kept");
        }
    }

    Ok(())
}
