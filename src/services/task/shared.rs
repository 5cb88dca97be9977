use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{self, Result, Row};

use crate::models::task::{Task, TaskCategory, TaskId};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) const TASK_COLUMNS: &str = "id, name, category, start_date, end_date";

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_date(idx: usize, value: String) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&value, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn parse_category(idx: usize, value: String) -> Result<TaskCategory> {
    value
        .parse::<TaskCategory>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn map_task_row(row: &Row<'_>) -> Result<Task> {
    Ok(Task {
        id: TaskId::new(row.get::<_, String>(0)?),
        name: row.get(1)?,
        category: parse_category(2, row.get(2)?)?,
        start_date: parse_date(3, row.get(3)?)?,
        end_date: parse_date(4, row.get(4)?)?,
    })
}
