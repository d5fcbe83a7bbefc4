use crate::{Counter, EngineError, Ledger, Member, MemberId, Money, ResultEngine, SnapshotKey};

use super::{finite_amount, normalize_required_name};

impl Ledger {
    /// Apply `change` to a copy of the member list, persist it and swap it in.
    ///
    /// An unknown `id` leaves the ledger untouched and returns `KeyNotFound`.
    fn update_member<T>(
        &mut self,
        id: MemberId,
        op: &'static str,
        change: impl FnOnce(&mut Member) -> T,
    ) -> ResultEngine<T> {
        let mut members = self.members.clone();
        let Some(member) = members.iter_mut().find(|member| member.id == id) else {
            tracing::warn!(member_id = id, op, "member not found");
            return Err(member_not_found(id));
        };
        let output = change(member);
        self.commit_members(members)?;
        tracing::debug!(member_id = id, op, "member updated");
        Ok(output)
    }

    fn commit_members(&mut self, members: Vec<Member>) -> ResultEngine<()> {
        self.persist(SnapshotKey::Members, &members)?;
        self.members = members;
        self.bump_version();
        Ok(())
    }

    /// Appends a new active member with zeroed counters and returns its id.
    ///
    /// The id is the current maximum plus one; gaps left by removed members
    /// are never refilled.
    pub fn add_member(&mut self, name: &str) -> ResultEngine<MemberId> {
        let name = normalize_required_name(name, "member name")?;
        let id = self
            .members
            .iter()
            .map(|member| member.id)
            .max()
            .map_or(1, |max| max + 1);

        let mut members = self.members.clone();
        members.push(Member::new(id, name));
        self.commit_members(members)?;
        tracing::debug!(member_id = id, "member added");
        Ok(id)
    }

    /// Removes a member. Remaining ids are not renumbered.
    pub fn remove_member(&mut self, id: MemberId) -> ResultEngine<Member> {
        let Some(index) = self.members.iter().position(|member| member.id == id) else {
            tracing::warn!(member_id = id, op = "remove", "member not found");
            return Err(member_not_found(id));
        };
        let mut members = self.members.clone();
        let removed = members.remove(index);
        self.commit_members(members)?;
        tracing::debug!(member_id = id, "member removed");
        Ok(removed)
    }

    pub fn update_name(&mut self, id: MemberId, name: &str) -> ResultEngine<()> {
        let name = normalize_required_name(name, "member name")?;
        self.update_member(id, "rename", |member| member.name = name)
    }

    /// Flips the active flag and returns the new value.
    pub fn toggle_active(&mut self, id: MemberId) -> ResultEngine<bool> {
        self.update_member(id, "toggle_active", |member| {
            member.is_active = !member.is_active;
            member.is_active
        })
    }

    /// Adds `count` units to a counter (saturating).
    pub fn add_count(&mut self, id: MemberId, counter: Counter, count: u32) -> ResultEngine<()> {
        self.update_member(id, "add_count", |member| {
            let value = member.count_mut(counter);
            *value = value.saturating_add(count);
        })
    }

    /// Overwrites a counter. Setting the same value twice is a no-op the
    /// second time (apart from the snapshot write).
    pub fn set_count(&mut self, id: MemberId, counter: Counter, value: u32) -> ResultEngine<()> {
        self.update_member(id, "set_count", |member| *member.count_mut(counter) = value)
    }

    pub fn add_meals(&mut self, id: MemberId, count: u32) -> ResultEngine<()> {
        self.add_count(id, Counter::Meals, count)
    }

    pub fn add_rice(&mut self, id: MemberId, count: u32) -> ResultEngine<()> {
        self.add_count(id, Counter::Rice, count)
    }

    pub fn add_eggs(&mut self, id: MemberId, count: u32) -> ResultEngine<()> {
        self.add_count(id, Counter::Eggs, count)
    }

    pub fn set_meals(&mut self, id: MemberId, value: u32) -> ResultEngine<()> {
        self.set_count(id, Counter::Meals, value)
    }

    pub fn set_rice(&mut self, id: MemberId, value: u32) -> ResultEngine<()> {
        self.set_count(id, Counter::Rice, value)
    }

    pub fn set_eggs(&mut self, id: MemberId, value: u32) -> ResultEngine<()> {
        self.set_count(id, Counter::Eggs, value)
    }

    /// Adds `amount` to the member's cumulative payments.
    ///
    /// A negative amount reduces the total but never below zero.
    pub fn add_payment(&mut self, id: MemberId, amount: Money) -> ResultEngine<()> {
        let amount = finite_amount(amount, "payment")?;
        if let Some(member) = self.member(id) {
            finite_amount(member.payments + amount, "payment total")?;
        }
        self.update_member(id, "add_payment", |member| {
            member.payments = (member.payments + amount).non_negative();
        })
    }

    /// Overwrites the cumulative payments, clamping negative totals to zero.
    pub fn set_payment_total(&mut self, id: MemberId, total: Money) -> ResultEngine<()> {
        let total = finite_amount(total, "payment total")?.non_negative();
        self.update_member(id, "set_payment_total", |member| member.payments = total)
    }
}

fn member_not_found(id: MemberId) -> EngineError {
    EngineError::KeyNotFound(format!("member {id}"))
}
