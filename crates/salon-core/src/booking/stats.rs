//! Client statistics projection for status transitions.

use jiff::civil::Date;
use log::debug;

use super::ports::VisitStats;
use crate::{
    error::Result,
    models::{AppointmentStatus, Money},
};

/// Side effect a status transition has on client aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsEffect {
    None,
    /// scheduled → completed
    RecordVisit,
    /// completed → canceled
    RevokeVisit,
}

impl StatsEffect {
    /// Only scheduled → completed and completed → canceled carry an effect.
    /// Custom statuses and every other pair are no-ops.
    pub fn of(from: &AppointmentStatus, to: &AppointmentStatus) -> Self {
        match (from, to) {
            (AppointmentStatus::Scheduled, AppointmentStatus::Completed) => StatsEffect::RecordVisit,
            (AppointmentStatus::Completed, AppointmentStatus::Canceled) => StatsEffect::RevokeVisit,
            _ => StatsEffect::None,
        }
    }
}

/// The client and price an appointment contributes to aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    pub client_id: u64,
    pub price: Money,
}

/// Applies [`StatsEffect`]s to a [`VisitStats`] store.
pub struct ClientStatsProjector<'a, S: ?Sized> {
    stats: &'a S,
    today: Date,
}

impl<'a, S: VisitStats + ?Sized> ClientStatsProjector<'a, S> {
    pub fn new(stats: &'a S, today: Date) -> Self {
        Self { stats, today }
    }

    /// Projects a status change.
    ///
    /// A recorded visit is credited to `after`; a revoked visit is debited
    /// from `before`, the visit that was previously recorded.
    pub fn project(
        &self,
        from: &AppointmentStatus,
        to: &AppointmentStatus,
        before: Visit,
        after: Visit,
    ) -> Result<StatsEffect> {
        let effect = StatsEffect::of(from, to);
        match effect {
            StatsEffect::RecordVisit => {
                self.stats
                    .record_visit(after.client_id, after.price, self.today)?;
            }
            StatsEffect::RevokeVisit => {
                self.stats.revoke_visit(before.client_id, before.price)?;
            }
            StatsEffect::None => {}
        }
        debug!(
            "Status {} -> {} projected as {effect:?}",
            from.as_str(),
            to.as_str()
        );
        Ok(effect)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::HashMap};

    use jiff::civil::date;

    use super::*;

    #[derive(Default)]
    struct MemoryStats {
        clients: RefCell<HashMap<u64, (u32, Money, Option<Date>)>>,
    }

    impl VisitStats for MemoryStats {
        fn record_visit(&self, client_id: u64, amount: Money, day: Date) -> Result<()> {
            let mut clients = self.clients.borrow_mut();
            let entry = clients.entry(client_id).or_insert((0, Money::ZERO, None));
            entry.0 += 1;
            entry.1 = entry.1 + amount;
            entry.2 = Some(day);
            Ok(())
        }

        fn revoke_visit(&self, client_id: u64, amount: Money) -> Result<()> {
            let mut clients = self.clients.borrow_mut();
            let entry = clients.entry(client_id).or_insert((0, Money::ZERO, None));
            entry.0 = entry.0.saturating_sub(1);
            entry.1 = entry.1.saturating_sub_floor(amount);
            Ok(())
        }
    }

    const VISIT: Visit = Visit {
        client_id: 1,
        price: Money::from_cents(8000),
    };

    #[test]
    fn test_effect_table() {
        use AppointmentStatus::*;

        assert_eq!(StatsEffect::of(&Scheduled, &Completed), StatsEffect::RecordVisit);
        assert_eq!(StatsEffect::of(&Completed, &Canceled), StatsEffect::RevokeVisit);
        assert_eq!(StatsEffect::of(&Scheduled, &Canceled), StatsEffect::None);
        assert_eq!(StatsEffect::of(&Completed, &Completed), StatsEffect::None);
        assert_eq!(StatsEffect::of(&Completed, &Scheduled), StatsEffect::None);
        assert_eq!(StatsEffect::of(&Canceled, &Completed), StatsEffect::None);
        assert_eq!(
            StatsEffect::of(&Scheduled, &Other("no_show".to_string())),
            StatsEffect::None
        );
    }

    #[test]
    fn test_complete_then_cancel_is_net_zero() {
        let stats = MemoryStats::default();
        stats
            .clients
            .borrow_mut()
            .insert(1, (4, Money::from_cents(12_345), None));
        let projector = ClientStatsProjector::new(&stats, date(2026, 3, 14));

        projector
            .project(
                &AppointmentStatus::Scheduled,
                &AppointmentStatus::Completed,
                VISIT,
                VISIT,
            )
            .unwrap();
        assert_eq!(stats.clients.borrow()[&1].0, 5);

        projector
            .project(
                &AppointmentStatus::Completed,
                &AppointmentStatus::Canceled,
                VISIT,
                VISIT,
            )
            .unwrap();
        let (visits, spent, last) = stats.clients.borrow()[&1];
        assert_eq!(visits, 4);
        assert_eq!(spent, Money::from_cents(12_345));
        assert_eq!(last, Some(date(2026, 3, 14)));
    }

    #[test]
    fn test_revoke_from_empty_client_floors_at_zero() {
        let stats = MemoryStats::default();
        let projector = ClientStatsProjector::new(&stats, date(2026, 3, 14));
        let effect = projector
            .project(
                &AppointmentStatus::Completed,
                &AppointmentStatus::Canceled,
                VISIT,
                VISIT,
            )
            .unwrap();
        assert_eq!(effect, StatsEffect::RevokeVisit);
        assert_eq!(stats.clients.borrow()[&1], (0, Money::ZERO, None));
    }

    #[test]
    fn test_record_credits_new_client_and_revoke_debits_old() {
        let stats = MemoryStats::default();
        let projector = ClientStatsProjector::new(&stats, date(2026, 3, 14));
        let other = Visit {
            client_id: 2,
            price: Money::from_cents(5000),
        };

        projector
            .project(
                &AppointmentStatus::Scheduled,
                &AppointmentStatus::Completed,
                VISIT,
                other,
            )
            .unwrap();
        assert!(!stats.clients.borrow().contains_key(&1));
        assert_eq!(stats.clients.borrow()[&2].1, Money::from_cents(5000));
    }
}
