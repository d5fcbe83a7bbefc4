use serde::Serialize;

use crate::{EngineError, Ledger, Money, ResultEngine, SnapshotKey};

mod expenses;
mod members;
mod settings;

impl Ledger {
    /// Serialize `value` and write it under `key`.
    fn persist<T: Serialize + ?Sized>(&mut self, key: SnapshotKey, value: &T) -> ResultEngine<()> {
        let payload = serde_json::to_string(value)?;
        self.storage.write(key.as_str(), &payload).inspect_err(|err| {
            tracing::error!(%key, "failed to persist snapshot: {err}");
        })
    }

    fn bump_version(&mut self) {
        self.version += 1;
    }
}

/// Rejects NaN and infinite amounts before they reach a snapshot.
fn finite_amount(amount: Money, label: &str) -> ResultEngine<Money> {
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(EngineError::InvalidAmount(format!("{label} is not a finite number")))
    }
}

fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}
