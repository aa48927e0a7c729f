use std::path::Path;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime, Utc};
use parking_lot::Mutex;
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use super::{open_database, open_memory_database, DatabaseError};
use crate::domain::{Assignment, NewReferral, Referral, ReferralField, ReferralStatus};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Referral storage over a single SQLite connection.
///
/// Every write runs inside its own transaction; uniqueness of `email` is
/// enforced by the schema and surfaced as [`DatabaseError::EmailConflict`].
pub struct ReferralRepository {
    conn: Mutex<Connection>,
}

impl ReferralRepository {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        Ok(Self::new(open_database(path)?))
    }

    pub fn in_memory() -> Result<Self, DatabaseError> {
        Ok(Self::new(open_memory_database()?))
    }

    /// One page of referrals, newest first, plus the count matching `status`.
    pub fn list(
        &self,
        status: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<Referral>, u64), DatabaseError> {
        let conn = self.conn.lock();

        let mut filter_sql = String::new();
        let mut filter_values: Vec<Value> = Vec::new();
        if let Some(status) = status {
            filter_sql.push_str(" WHERE status = ?");
            filter_values.push(Value::Text(status.to_string()));
        }

        let query = format!(
            "SELECT {} FROM referrals{} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            select_columns(),
            filter_sql
        );
        let mut page_values = filter_values.clone();
        page_values.push(Value::Integer(to_sql_int(limit)));
        page_values.push(Value::Integer(to_sql_int(offset)));

        let mut stmt = conn.prepare(&query)?;
        let referrals = stmt
            .query_map(params_from_iter(page_values.iter()), referral_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM referrals{filter_sql}"),
            params_from_iter(filter_values.iter()),
            |row| row.get(0),
        )?;

        Ok((referrals, total.max(0) as u64))
    }

    pub fn get(&self, id: i64) -> Result<Option<Referral>, DatabaseError> {
        let conn = self.conn.lock();
        Ok(find(&conn, id)?)
    }

    pub fn insert(&self, referral: &NewReferral) -> Result<Referral, DatabaseError> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        let columns: Vec<&str> = ReferralField::all().map(ReferralField::column).collect();
        let placeholders = vec!["?"; columns.len() + 2].join(", ");
        let sql = format!(
            "INSERT INTO referrals ({}, created_at, updated_at) VALUES ({})",
            columns.join(", "),
            placeholders
        );

        let now = format_timestamp(Utc::now().naive_utc());
        let mut values: Vec<Value> = ReferralField::all()
            .map(|field| text_or_null(referral.value(field)))
            .collect();
        values.push(Value::Text(now.clone()));
        values.push(Value::Text(now));

        tx.execute(&sql, params_from_iter(values.iter()))
            .map_err(map_write_error)?;
        let id = tx.last_insert_rowid();
        let created = find(&tx, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        tx.commit()?;

        tracing::debug!(id, "Inserted referral");
        Ok(created)
    }

    /// Apply `assignments` to the referral `id`, returning `None` when it does
    /// not exist. `updated_at` always moves forward, even within the same
    /// millisecond as the previous write.
    pub fn update(
        &self,
        id: i64,
        assignments: &[Assignment],
    ) -> Result<Option<Referral>, DatabaseError> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        let Some(existing) = find(&tx, id)? else {
            return Ok(None);
        };
        let updated_at = next_timestamp(&existing)?;

        let mut set_clauses: Vec<String> = assignments
            .iter()
            .map(|a| format!("{} = ?", a.field.column()))
            .collect();
        set_clauses.push("updated_at = ?".to_string());

        let mut values: Vec<Value> = assignments
            .iter()
            .map(|a| text_or_null(a.value.as_deref()))
            .collect();
        values.push(Value::Text(updated_at));
        values.push(Value::Integer(id));

        let sql = format!("UPDATE referrals SET {} WHERE id = ?", set_clauses.join(", "));
        tx.execute(&sql, params_from_iter(values.iter()))
            .map_err(map_write_error)?;

        let updated = find(&tx, id)?;
        tx.commit()?;

        tracing::debug!(id, fields = assignments.len(), "Updated referral");
        Ok(updated)
    }

    /// Returns whether a row was removed.
    pub fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let conn = self.conn.lock();
        let changed = conn.execute("DELETE FROM referrals WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Remove every referral. Returns the number of rows deleted.
    pub fn clear(&self) -> Result<usize, DatabaseError> {
        let conn = self.conn.lock();
        Ok(conn.execute("DELETE FROM referrals", [])?)
    }

    pub fn count(&self) -> Result<u64, DatabaseError> {
        let conn = self.conn.lock();
        let total: i64 = conn.query_row("SELECT COUNT(*) FROM referrals", [], |row| row.get(0))?;
        Ok(total.max(0) as u64)
    }
}

fn select_columns() -> String {
    let mut columns = vec!["id"];
    columns.extend(ReferralField::all().map(ReferralField::column));
    columns.push("created_at");
    columns.push("updated_at");
    columns.join(", ")
}

fn find(conn: &Connection, id: i64) -> Result<Option<Referral>, rusqlite::Error> {
    conn.query_row(
        &format!("SELECT {} FROM referrals WHERE id = ?1", select_columns()),
        params![id],
        referral_from_row,
    )
    .optional()
}

fn referral_from_row(row: &Row<'_>) -> Result<Referral, rusqlite::Error> {
    let text = |field: ReferralField| row.get::<_, String>(field.column());
    let nullable = |field: ReferralField| row.get::<_, Option<String>>(field.column());

    let raw_status = text(ReferralField::Status)?;
    let status = ReferralStatus::from_str(&raw_status).map_err(|e| {
        let index = row
            .as_ref()
            .column_index(ReferralField::Status.column())
            .unwrap_or_default();
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e))
    })?;

    Ok(Referral {
        id: row.get("id")?,
        given_name: text(ReferralField::GivenName)?,
        surname: text(ReferralField::Surname)?,
        email: text(ReferralField::Email)?,
        phone: text(ReferralField::Phone)?,
        home_name_or_number: text(ReferralField::HomeNameOrNumber)?,
        street: text(ReferralField::Street)?,
        suburb: text(ReferralField::Suburb)?,
        state: text(ReferralField::State)?,
        postcode: text(ReferralField::Postcode)?,
        country: text(ReferralField::Country)?,
        status,
        notes: nullable(ReferralField::Notes)?,
        referred_by: nullable(ReferralField::ReferredBy)?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn text_or_null(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |v| Value::Text(v.to_string()))
}

fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

fn next_timestamp(existing: &Referral) -> Result<String, DatabaseError> {
    let previous = NaiveDateTime::parse_from_str(&existing.updated_at, TIMESTAMP_FORMAT)
        .map_err(|_| DatabaseError::InvalidTimestamp {
            id: existing.id,
            value: existing.updated_at.clone(),
        })?;
    let now = Utc::now().naive_utc();
    let next = if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    };
    Ok(format_timestamp(next))
}

fn map_write_error(err: rusqlite::Error) -> DatabaseError {
    match &err {
        rusqlite::Error::SqliteFailure(code, message)
            if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                && message
                    .as_deref()
                    .is_some_and(|m| m.contains("referrals.email")) =>
        {
            DatabaseError::EmailConflict
        }
        _ => DatabaseError::Sqlite(err),
    }
}
