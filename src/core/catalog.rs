//! Administrator operations on the service type, helper, client and weekly
//! slot catalogs.

use crate::db::clients::{self, ClientInput};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::{helpers, service_types, slots};
use crate::errors::{AppError, AppResult};
use crate::models::weekday::DayOfWeek;
use crate::utils::time::{add_minutes, format_time};
use chrono::NaiveTime;

/// Outcome of removing a service type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceRemoval {
    Deleted,
    /// Still referenced, so only hidden from the active catalog.
    Deactivated,
}

/// A default visit length between one minute and a full day.
fn check_minutes(minutes: u32) -> AppResult<()> {
    if minutes == 0 || minutes > MAX_SERVICE_MINUTES {
        return Err(AppError::InvalidInput(format!(
            "default minutes must be between 1 and {MAX_SERVICE_MINUTES}"
        )));
    }
    Ok(())
}

pub const MAX_SERVICE_MINUTES: u32 = 24 * 60;

pub struct CatalogLogic;

impl CatalogLogic {
    pub fn add_service(pool: &mut DbPool, name: &str, minutes: u32) -> AppResult<i64> {
        let name = non_empty(name, "service name")?;
        check_minutes(minutes)?;
        let id = service_types::insert(pool, name, minutes)?;
        ttlog(&pool.conn, "add", &format!("service #{id}"), &format!("{name} ({minutes} min)"))?;
        Ok(id)
    }

    pub fn edit_service(
        pool: &mut DbPool,
        id: i64,
        name: Option<&str>,
        minutes: Option<u32>,
    ) -> AppResult<()> {
        let current = service_types::get(pool, id)?;
        let name = match name {
            Some(n) => non_empty(n, "service name")?.to_string(),
            None => current.name,
        };
        let minutes = minutes.unwrap_or(current.default_minutes);
        check_minutes(minutes)?;
        service_types::update(pool, id, &name, minutes)?;
        ttlog(&pool.conn, "edit", &format!("service #{id}"), &format!("{name} ({minutes} min)"))?;
        Ok(())
    }

    /// Delete a service type, or deactivate it while something refers to it.
    pub fn remove_service(pool: &mut DbPool, id: i64) -> AppResult<ServiceRemoval> {
        let st = service_types::get(pool, id)?;
        let outcome = if service_types::usage_count(pool, id)? > 0 {
            service_types::deactivate(pool, id)?;
            ServiceRemoval::Deactivated
        } else {
            service_types::delete(pool, id)?;
            ServiceRemoval::Deleted
        };
        let msg = match outcome {
            ServiceRemoval::Deleted => format!("{} deleted", st.name),
            ServiceRemoval::Deactivated => format!("{} deactivated (in use)", st.name),
        };
        ttlog(&pool.conn, "del", &format!("service #{id}"), &msg)?;
        Ok(outcome)
    }

    pub fn add_helper(pool: &mut DbPool, last: &str, first: &str, guest: bool) -> AppResult<i64> {
        let last = non_empty(last, "last name")?;
        let id = helpers::insert(pool, last, first.trim(), guest)?;
        ttlog(
            &pool.conn,
            "add",
            &format!("helper #{id}"),
            &format!("{} {}{}", last, first.trim(), if guest { " (guest)" } else { "" }),
        )?;
        Ok(id)
    }

    pub fn edit_helper(
        pool: &mut DbPool,
        id: i64,
        last: Option<&str>,
        first: Option<&str>,
    ) -> AppResult<()> {
        let current = helpers::get(pool, id)?;
        let last = match last {
            Some(l) => non_empty(l, "last name")?.to_string(),
            None => current.last_name,
        };
        let first = first.map(|f| f.trim().to_string()).unwrap_or(current.first_name);
        helpers::update(pool, id, &last, &first)?;
        ttlog(&pool.conn, "edit", &format!("helper #{id}"), &format!("{last} {first}"))?;
        Ok(())
    }

    /// Helpers with logged visits cannot be removed.
    pub fn remove_helper(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let h = helpers::get(pool, id)?;
        if helpers::record_count(pool, id)? > 0 {
            return Err(AppError::InUse(format!(
                "Helper {} has visit records and cannot be deleted",
                h.full_name()
            )));
        }
        helpers::delete(pool, id)?;
        ttlog(&pool.conn, "del", &format!("helper #{id}"), &h.full_name())?;
        Ok(())
    }

    pub fn add_client(pool: &mut DbPool, input: &ClientInput) -> AppResult<i64> {
        non_empty(&input.last_name, "last name")?;
        if let Some(sid) = input.default_service_id {
            service_types::get(pool, sid)?;
        }
        let id = clients::insert(pool, input)?;
        ttlog(
            &pool.conn,
            "add",
            &format!("client #{id}"),
            &format!("{} {}", input.last_name, input.first_name),
        )?;
        Ok(id)
    }

    pub fn edit_client(pool: &mut DbPool, id: i64, input: &ClientInput) -> AppResult<()> {
        non_empty(&input.last_name, "last name")?;
        if let Some(sid) = input.default_service_id {
            service_types::get(pool, sid)?;
        }
        clients::update(pool, id, input)?;
        ttlog(
            &pool.conn,
            "edit",
            &format!("client #{id}"),
            &format!("{} {}", input.last_name, input.first_name),
        )?;
        Ok(())
    }

    /// Clients with logged visits cannot be removed; their weekly slots are
    /// dropped together with them.
    pub fn remove_client(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let c = clients::get(pool, id)?;
        if clients::record_count(pool, id)? > 0 {
            return Err(AppError::InUse(format!(
                "Client {} has visit records and cannot be deleted",
                c.full_name()
            )));
        }
        clients::delete(pool, id)?;
        ttlog(&pool.conn, "del", &format!("client #{id}"), &c.full_name())?;
        Ok(())
    }

    /// Add a weekly slot; without `end` the slot lasts the service's
    /// default minutes.
    pub fn add_slot(
        pool: &mut DbPool,
        client_id: i64,
        service_type_id: i64,
        day: DayOfWeek,
        start: NaiveTime,
        end: Option<NaiveTime>,
    ) -> AppResult<i64> {
        clients::get(pool, client_id)?;
        let service = service_types::get(pool, service_type_id)?;
        let end = end.unwrap_or_else(|| add_minutes(start, service.default_minutes));

        let id = slots::insert(pool, client_id, service_type_id, day, start, end)?;
        ttlog(
            &pool.conn,
            "add",
            &format!("slot #{id}"),
            &format!(
                "client #{} {} {}-{} {}",
                client_id,
                day.short(),
                format_time(start),
                format_time(end),
                service.name
            ),
        )?;
        Ok(id)
    }

    pub fn remove_slot(pool: &mut DbPool, id: i64) -> AppResult<()> {
        slots::delete(pool, id)?;
        ttlog(&pool.conn, "del", &format!("slot #{id}"), "weekly slot removed")?;
        Ok(())
    }
}

fn non_empty<'a>(s: &'a str, what: &str) -> AppResult<&'a str> {
    let t = s.trim();
    if t.is_empty() {
        return Err(AppError::InvalidInput(format!("{what} must not be empty")));
    }
    Ok(t)
}
