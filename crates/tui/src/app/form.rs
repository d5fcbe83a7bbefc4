use chrono::NaiveDate;
use engine::{Counter, Expense, ExpenseId, Member, MemberId, Money, Prices, input};

/// What a popup form edits, with the record it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    AddMember,
    RenameMember(MemberId),
    SetCount(MemberId, Counter),
    AddPayment(MemberId),
    SetPaymentTotal(MemberId),
    AddExpense,
    EditExpense(ExpenseId),
    Prices,
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
}

impl FormField {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// A validated form, ready to be applied to the ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    AddMember {
        name: String,
    },
    RenameMember {
        id: MemberId,
        name: String,
    },
    SetCount {
        id: MemberId,
        counter: Counter,
        value: u32,
    },
    AddPayment {
        id: MemberId,
        amount: Money,
    },
    SetPaymentTotal {
        id: MemberId,
        total: Money,
    },
    AddExpense {
        description: String,
        amount: Money,
        date: NaiveDate,
    },
    EditExpense {
        id: ExpenseId,
        description: String,
        amount: Money,
    },
    Prices(Prices),
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub kind: FormKind,
    pub title: String,
    pub fields: Vec<FormField>,
    pub focus: usize,
    pub error: Option<String>,
}

impl FormState {
    fn new(kind: FormKind, title: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            title: title.into(),
            fields,
            focus: 0,
            error: None,
        }
    }

    pub fn add_member() -> Self {
        Self::new(
            FormKind::AddMember,
            "Add member",
            vec![FormField::new("Name", "")],
        )
    }

    pub fn rename_member(member: &Member) -> Self {
        Self::new(
            FormKind::RenameMember(member.id),
            format!("Rename {}", member.name),
            vec![FormField::new("Name", member.name.clone())],
        )
    }

    pub fn set_count(member: &Member, counter: Counter) -> Self {
        Self::new(
            FormKind::SetCount(member.id, counter),
            format!("Set {} for {}", counter.label().to_lowercase(), member.name),
            vec![FormField::new(
                counter.label(),
                member.count(counter).to_string(),
            )],
        )
    }

    pub fn add_payment(member: &Member) -> Self {
        Self::new(
            FormKind::AddPayment(member.id),
            format!("Payment from {}", member.name),
            vec![FormField::new("Amount", "")],
        )
    }

    pub fn set_payment_total(member: &Member) -> Self {
        Self::new(
            FormKind::SetPaymentTotal(member.id),
            format!("Total paid by {}", member.name),
            vec![FormField::new("Total", member.payments.plain())],
        )
    }

    pub fn add_expense(today: NaiveDate) -> Self {
        Self::new(
            FormKind::AddExpense,
            "Add expense",
            vec![
                FormField::new("Description", ""),
                FormField::new("Amount", ""),
                FormField::new("Date", today.format("%Y-%m-%d").to_string()),
            ],
        )
    }

    pub fn edit_expense(expense: &Expense) -> Self {
        Self::new(
            FormKind::EditExpense(expense.id),
            format!("Edit expense of {}", expense.date.format("%Y-%m-%d")),
            vec![
                FormField::new("Description", expense.description.clone()),
                FormField::new("Amount", expense.amount.plain()),
            ],
        )
    }

    pub fn prices(prices: Prices) -> Self {
        Self::new(
            FormKind::Prices,
            "Unit prices",
            vec![
                FormField::new("Rice", prices.rice.plain()),
                FormField::new("Egg", prices.egg.plain()),
            ],
        )
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len().max(1);
    }

    pub fn focus_prev(&mut self) {
        let len = self.fields.len().max(1);
        self.focus = (self.focus + len - 1) % len;
    }

    pub fn push_char(&mut self, ch: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(ch);
            self.error = None;
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
            self.error = None;
        }
    }

    fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|field| field.value.trim())
            .unwrap_or_default()
    }

    /// Validates the typed values. The error is shown inside the popup.
    pub fn submission(&self) -> Result<Submission, String> {
        match self.kind {
            FormKind::AddMember => Ok(Submission::AddMember {
                name: required(self.value(0), "Name")?,
            }),
            FormKind::RenameMember(id) => Ok(Submission::RenameMember {
                id,
                name: required(self.value(0), "Name")?,
            }),
            FormKind::SetCount(id, counter) => Ok(Submission::SetCount {
                id,
                counter,
                value: input::coerce_count(self.value(0)),
            }),
            FormKind::AddPayment(id) => Ok(Submission::AddPayment {
                id,
                amount: positive_amount(self.value(0))?,
            }),
            FormKind::SetPaymentTotal(id) => Ok(Submission::SetPaymentTotal {
                id,
                total: input::coerce_amount(self.value(0)),
            }),
            FormKind::AddExpense => {
                let description = required(self.value(0), "Description")?;
                let amount = positive_amount(self.value(1))?;
                let date = input::parse_date(self.value(2))
                    .map_err(|_| "Date must look like 2024-05-31".to_string())?;
                Ok(Submission::AddExpense {
                    description,
                    amount,
                    date,
                })
            }
            FormKind::EditExpense(id) => Ok(Submission::EditExpense {
                id,
                description: required(self.value(0), "Description")?,
                amount: positive_amount(self.value(1))?,
            }),
            FormKind::Prices => Ok(Submission::Prices(Prices::new(
                input::coerce_amount(self.value(0)),
                input::coerce_amount(self.value(1)),
            ))),
        }
    }
}

fn required(value: &str, label: &str) -> Result<String, String> {
    if value.is_empty() {
        Err(format!("{label} cannot be empty"))
    } else {
        Ok(value.to_string())
    }
}

fn positive_amount(raw: &str) -> Result<Money, String> {
    let amount = input::coerce_amount(raw);
    if amount.is_positive() {
        Ok(amount)
    } else {
        Err("Enter an amount greater than zero".to_string())
    }
}
